use crate::internal::patch::patch_session_inplace;
use crate::internal::search::{SearchFilter, collect_sessions};
use crate::internal::select::choose_indices;
use crate::types::SessionFamily;
use crate::types::settings::PatcherSettings;
use anyhow::Result;
use log::warn;

/// Interactive patching of desktop session descriptors. Without a query
/// every system session is listed; with one the list is filtered first.
/// Selected sessions are patched in place with a backup, optionally
/// restricted to one desktop family.
pub fn session_patch_interactive(
    query: Option<&str>,
    family: Option<SessionFamily>,
    settings: &PatcherSettings,
) -> Result<usize> {
    let filter = match query {
        Some(query) => SearchFilter::Substring(query),
        None => SearchFilter::All,
    };
    let sessions = collect_sessions(&filter, settings);
    if sessions.is_empty() {
        println!("No desktop session files found.");
        return Ok(0);
    }

    let mut total = 0;
    for index in choose_indices(&sessions, "patch")? {
        let session = &sessions[index];
        match patch_session_inplace(&session.path, family, settings.offload_prefix) {
            Ok(true) => total += 1,
            Ok(false) => {}
            Err(e) => warn!("Patch failed for {}: {e}", session.path.display()),
        }
    }

    if total > 0 {
        println!("Added PRIME offload to {total} session target(s).");
    }
    Ok(total)
}
