use crate::internal::patch::{exec_contains_prefix, rollback_desktop_file};
use crate::internal::search::{SearchFilter, desktop_files, search_candidates};
use crate::internal::select::choose_indices;
use crate::types::CandidateKind;
use crate::types::settings::PatcherSettings;
use anyhow::Result;
use log::warn;
use std::fs;
use std::path::Path;

/// Reverses everything: strips the offload prefix from all application
/// launchers, removes patched user-session overrides and strips the
/// prefix from system session descriptors.
pub fn rollback_all(settings: &PatcherSettings) -> Result<usize> {
    let mut apps = 0;
    for dir in &settings.app_dirs {
        for file in desktop_files(dir) {
            match rollback_desktop_file(&file, settings.offload_prefix) {
                Ok(true) => apps += 1,
                Ok(false) => {}
                Err(e) => warn!("Rollback failed for {}: {e}", file.display()),
            }
        }
    }
    let sessions = rollback_sessions_all(settings);
    println!("Rollback done. apps={apps}, sessions={sessions}");
    Ok(apps + sessions)
}

/// Session half of the full rollback. User-dir overrides that carry the
/// prefix are deleted outright (they only exist because a patch run
/// created them); system session files are stripped in place.
fn rollback_sessions_all(settings: &PatcherSettings) -> usize {
    let mut total = 0;
    for dir in &settings.user_session_dirs {
        for file in desktop_files(dir) {
            if !exec_contains_prefix(&file, settings.offload_prefix) {
                continue;
            }
            match fs::remove_file(&file) {
                Ok(()) => {
                    println!("Removed session override: {}", file.display());
                    total += 1;
                }
                Err(e) => warn!("Failed to remove session {}: {e}", file.display()),
            }
        }
    }
    for dir in &settings.system_session_dirs {
        for file in desktop_files(dir) {
            match rollback_desktop_file(&file, settings.offload_prefix) {
                Ok(true) => total += 1,
                Ok(false) => {}
                Err(e) => warn!("Rollback failed for {}: {e}", file.display()),
            }
        }
    }
    total
}

/// Searches by keyword and rolls back the entries the user picks.
/// Application candidates get the prefix stripped. For a session
/// candidate a user-dir override with the same filename takes priority
/// and is removed; otherwise the system file is stripped in place. Only
/// files under the home directory are ever deleted.
pub fn rollback_interactive(query: &str, settings: &PatcherSettings) -> Result<usize> {
    let candidates = search_candidates(&SearchFilter::Substring(query), settings);
    if candidates.is_empty() {
        println!("No matching entries.");
        return Ok(0);
    }

    let mut total = 0;
    for index in choose_indices(&candidates, "roll back")? {
        let candidate = &candidates[index];
        match candidate.kind {
            CandidateKind::Application => {
                match rollback_desktop_file(&candidate.path, settings.offload_prefix) {
                    Ok(true) => total += 1,
                    Ok(false) => {}
                    Err(e) => {
                        warn!("Rollback failed for {}: {e}", candidate.path.display())
                    }
                }
            }
            CandidateKind::Session => {
                total += rollback_session_candidate(&candidate.path, settings);
            }
        }
    }
    Ok(total)
}

fn rollback_session_candidate(path: &Path, settings: &PatcherSettings) -> usize {
    let override_path = settings
        .user_session_dirs
        .first()
        .zip(path.file_name())
        .map(|(dir, name)| dir.join(name));
    let target = match override_path {
        Some(override_path) if override_path.exists() => override_path,
        _ => path.to_path_buf(),
    };

    if target.starts_with(&settings.home_dir) {
        match fs::remove_file(&target) {
            Ok(()) => {
                println!("Removed session override: {}", target.display());
                1
            }
            Err(e) => {
                warn!("Failed to remove session {}: {e}", target.display());
                0
            }
        }
    } else {
        match rollback_desktop_file(&target, settings.offload_prefix) {
            Ok(true) => 1,
            Ok(false) => {
                println!("Session not modified: {}", target.display());
                0
            }
            Err(e) => {
                warn!("Rollback failed for {}: {e}", target.display());
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::settings::OFFLOAD_PREFIX;

    fn test_settings(dir: &tempfile::TempDir) -> PatcherSettings {
        let settings = PatcherSettings {
            app_dirs: vec![dir.path().join("applications")],
            system_session_dirs: vec![dir.path().join("wayland-sessions")],
            user_session_dirs: vec![dir.path().join("home").join("wayland-sessions")],
            home_dir: dir.path().join("home"),
            ..PatcherSettings::default()
        };
        for d in settings
            .app_dirs
            .iter()
            .chain(&settings.system_session_dirs)
            .chain(&settings.user_session_dirs)
        {
            fs::create_dir_all(d).unwrap();
        }
        settings
    }

    #[test]
    fn test_rollback_all_strips_apps_and_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir);

        let app = settings.app_dirs[0].join("firefox.desktop");
        fs::write(&app, format!("Exec={OFFLOAD_PREFIX} firefox %u\n")).unwrap();
        let clean = settings.app_dirs[0].join("calc.desktop");
        fs::write(&clean, "Exec=gnome-calculator\n").unwrap();
        let session = settings.system_session_dirs[0].join("gnome.desktop");
        fs::write(&session, format!("Exec={OFFLOAD_PREFIX} gnome-session\n")).unwrap();
        let override_file = settings.user_session_dirs[0].join("gnome.desktop");
        fs::write(&override_file, format!("Exec={OFFLOAD_PREFIX} gnome-session\n")).unwrap();
        let foreign_override = settings.user_session_dirs[0].join("sway.desktop");
        fs::write(&foreign_override, "Exec=sway\n").unwrap();

        assert_eq!(rollback_all(&settings).unwrap(), 3);

        assert_eq!(fs::read_to_string(&app).unwrap(), "Exec=firefox %u\n");
        assert_eq!(fs::read_to_string(&clean).unwrap(), "Exec=gnome-calculator\n");
        assert_eq!(fs::read_to_string(&session).unwrap(), "Exec=gnome-session\n");
        // The patched override goes away, the unpatched one stays
        assert!(!override_file.exists());
        assert!(foreign_override.exists());

        assert_eq!(rollback_all(&settings).unwrap(), 0);
    }

    #[test]
    fn test_session_candidate_prefers_removing_user_override() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir);

        let system = settings.system_session_dirs[0].join("gnome.desktop");
        fs::write(&system, format!("Exec={OFFLOAD_PREFIX} gnome-session\n")).unwrap();
        let override_file = settings.user_session_dirs[0].join("gnome.desktop");
        fs::write(&override_file, format!("Exec={OFFLOAD_PREFIX} gnome-session\n")).unwrap();

        assert_eq!(rollback_session_candidate(&system, &settings), 1);
        assert!(!override_file.exists());
        // System file untouched while an override existed
        assert!(exec_contains_prefix(&system, OFFLOAD_PREFIX));

        // No override left: the system file is stripped in place now
        assert_eq!(rollback_session_candidate(&system, &settings), 1);
        assert_eq!(fs::read_to_string(&system).unwrap(), "Exec=gnome-session\n");
    }
}
