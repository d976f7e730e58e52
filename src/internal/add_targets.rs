use crate::internal::patch::patch_desktop_file;
use crate::internal::search::{SearchFilter, search_candidates};
use crate::internal::select::choose_indices;
use crate::types::CandidateKind;
use crate::types::settings::PatcherSettings;
use anyhow::Result;
use log::warn;
use std::path::Path;

/// Patches explicit targets: each item is either a `.desktop` path, taken
/// as-is, or a keyword searched against the application roots with the
/// matches offered for interactive selection. Returns how many files were
/// actually changed.
pub fn add_targets(items: &[String], settings: &PatcherSettings) -> Result<usize> {
    let mut total = 0;
    for item in items {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let path = Path::new(item);
        if path.exists() && item.ends_with(".desktop") {
            match patch_desktop_file(path, &settings.keywords, settings.offload_prefix) {
                Ok(true) => total += 1,
                Ok(false) => {}
                Err(e) => warn!("Patch failed for {}: {e}", path.display()),
            }
            continue;
        }

        let candidates: Vec<_> = search_candidates(&SearchFilter::Substring(item), settings)
            .into_iter()
            .filter(|candidate| candidate.kind == CandidateKind::Application)
            .collect();
        if candidates.is_empty() {
            println!("No matching application: {item}");
            continue;
        }

        for index in choose_indices(&candidates, "patch")? {
            let candidate = &candidates[index];
            match patch_desktop_file(
                &candidate.path,
                &settings.keywords,
                settings.offload_prefix,
            ) {
                Ok(true) => total += 1,
                Ok(false) => {}
                Err(e) => warn!("Patch failed for {}: {e}", candidate.path.display()),
            }
        }
    }

    if total > 0 {
        println!("Added PRIME offload to {total} target(s).");
    }
    Ok(total)
}
