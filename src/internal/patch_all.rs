use crate::internal::patch::patch_desktop_file;
use crate::internal::search::desktop_files;
use crate::types::settings::PatcherSettings;
use anyhow::Result;
use log::warn;

/// Runs the keyword-gated patch over every application launcher in the
/// search roots. Per-file failures are logged and skipped so one bad file
/// cannot stop the batch.
pub fn patch_all_apps(settings: &PatcherSettings) -> Result<usize> {
    let mut total = 0;
    for dir in &settings.app_dirs {
        for file in desktop_files(dir) {
            match patch_desktop_file(&file, &settings.keywords, settings.offload_prefix) {
                Ok(true) => total += 1,
                Ok(false) => {}
                Err(e) => warn!("Patch failed for {}: {e}", file.display()),
            }
        }
    }
    Ok(total)
}
