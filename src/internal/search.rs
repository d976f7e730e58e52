// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Paul <abonnementspaul (at) gmail.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::types::settings::PatcherSettings;
use crate::types::{Candidate, CandidateKind};
use std::fs;
use std::path::{Path, PathBuf};

const NAME_KEY: &str = "Name=";

/// How discovery filters candidates. The two modes are deliberately
/// distinct: `All` means "enumerate everything", while `Substring("")`
/// matches nothing, so an empty user query cannot silently become a
/// select-all.
#[derive(Debug, Clone, Copy)]
pub enum SearchFilter<'a> {
    All,
    Substring(&'a str),
}

impl SearchFilter<'_> {
    fn matches(&self, file_name: &str, title: &str) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Substring(query) => {
                if query.is_empty() {
                    return false;
                }
                let query = query.to_lowercase();
                file_name.to_lowercase().contains(&query)
                    || title.to_lowercase().contains(&query)
            }
        }
    }
}

/// Display title for a descriptor: its `Name=` value, or the filename
/// when the field is absent or the file unreadable.
pub fn desktop_title(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let Ok(contents) = fs::read_to_string(path) else {
        return file_name;
    };
    for line in contents.lines() {
        if let Some(name) = line.strip_prefix(NAME_KEY) {
            let name = name.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    file_name
}

/// All `.desktop` files directly inside `dir`, sorted for stable
/// listing order. A missing or unreadable directory yields nothing.
pub fn desktop_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == "desktop")
        })
        .collect();
    files.sort();
    files
}

fn collect_from_dirs(
    dirs: &[PathBuf],
    kind: CandidateKind,
    filter: &SearchFilter,
    out: &mut Vec<Candidate>,
) {
    for dir in dirs {
        for path in desktop_files(dir) {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let title = desktop_title(&path);
            if filter.matches(&file_name, &title) {
                out.push(Candidate { kind, path, title });
            }
        }
    }
}

/// Searches application and session roots for matching descriptors.
/// Applications come first, then user session overrides, then system
/// sessions.
pub fn search_candidates(filter: &SearchFilter, settings: &PatcherSettings) -> Vec<Candidate> {
    let mut results = Vec::new();
    collect_from_dirs(&settings.app_dirs, CandidateKind::Application, filter, &mut results);
    collect_from_dirs(&settings.user_session_dirs, CandidateKind::Session, filter, &mut results);
    collect_from_dirs(&settings.system_session_dirs, CandidateKind::Session, filter, &mut results);
    results
}

/// Enumerates the system session descriptors only, for the interactive
/// session-patch flow.
pub fn collect_sessions(filter: &SearchFilter, settings: &PatcherSettings) -> Vec<Candidate> {
    let mut results = Vec::new();
    collect_from_dirs(&settings.system_session_dirs, CandidateKind::Session, filter, &mut results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_settings(dir: &tempfile::TempDir) -> PatcherSettings {
        PatcherSettings {
            app_dirs: vec![dir.path().join("applications")],
            system_session_dirs: vec![dir.path().join("wayland-sessions")],
            user_session_dirs: vec![dir.path().join("user-sessions")],
            home_dir: dir.path().to_path_buf(),
            ..PatcherSettings::default()
        }
    }

    fn write_desktop(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_title_from_name_field_or_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_desktop(dir.path(), "firefox.desktop", "[Desktop Entry]\nName=Firefox Web Browser\n");
        write_desktop(dir.path(), "bare.desktop", "[Desktop Entry]\nExec=bare\n");

        assert_eq!(
            desktop_title(&dir.path().join("firefox.desktop")),
            "Firefox Web Browser"
        );
        assert_eq!(desktop_title(&dir.path().join("bare.desktop")), "bare.desktop");
        assert_eq!(desktop_title(&dir.path().join("gone.desktop")), "gone.desktop");
    }

    #[test]
    fn test_query_matches_filename_or_title() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir);
        write_desktop(
            &settings.app_dirs[0],
            "firefox.desktop",
            "[Desktop Entry]\nName=Firefox Web Browser\nExec=firefox %u\n",
        );
        write_desktop(
            &settings.app_dirs[0],
            "org.gnome.Nautilus.desktop",
            "[Desktop Entry]\nName=Files\nExec=nautilus\n",
        );

        let hits = search_candidates(&SearchFilter::Substring("fire"), &settings);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, CandidateKind::Application);
        assert_eq!(hits[0].title, "Firefox Web Browser");

        // Match on the Name= value with a query absent from the filename
        let hits = search_candidates(&SearchFilter::Substring("files"), &settings);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Files");
    }

    #[test]
    fn test_empty_substring_matches_nothing_but_all_lists_everything() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir);
        write_desktop(
            &settings.app_dirs[0],
            "firefox.desktop",
            "[Desktop Entry]\nName=Firefox\n",
        );
        write_desktop(
            &settings.system_session_dirs[0],
            "gnome.desktop",
            "[Desktop Entry]\nName=GNOME\nExec=gnome-session\n",
        );

        assert!(search_candidates(&SearchFilter::Substring(""), &settings).is_empty());
        assert_eq!(search_candidates(&SearchFilter::All, &settings).len(), 2);
    }

    #[test]
    fn test_sessions_only_enumeration() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir);
        write_desktop(
            &settings.app_dirs[0],
            "firefox.desktop",
            "[Desktop Entry]\nName=Firefox\n",
        );
        write_desktop(
            &settings.system_session_dirs[0],
            "plasma.desktop",
            "[Desktop Entry]\nName=Plasma\nExec=startplasma-wayland\n",
        );

        let sessions = collect_sessions(&SearchFilter::All, &settings);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].kind, CandidateKind::Session);
        assert_eq!(sessions[0].title, "Plasma");
    }

    #[test]
    fn test_non_desktop_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir);
        write_desktop(&settings.app_dirs[0], "firefox.desktop", "Name=Firefox\n");
        fs::write(settings.app_dirs[0].join("notes.txt"), "Name=Firefox\n").unwrap();

        assert_eq!(search_candidates(&SearchFilter::All, &settings).len(), 1);
    }
}
