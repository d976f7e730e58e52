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

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// Generic read -> transform -> write-back editor. Every mutating
/// operation in the tool goes through here so they all share the same
/// failure and idempotence behavior:
///
/// * unreadable file: warn and report no change, the batch moves on
/// * transform error: warn and report no change
/// * transform reports no change: the file is not touched at all
/// * `backup`: copy to `<path>.bak` before the first write, never
///   overwriting an existing backup; a failed backup warns but does not
///   block the write
///
/// Returns `Ok(true)` only when new content was written. The only `Err`
/// is a failed write of the new content.
pub fn safe_edit_file<F>(path: &Path, transform: F, backup: bool, action: &str) -> Result<bool>
where
    F: FnOnce(Vec<String>) -> Result<(Vec<String>, bool)>,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Skip {}: {e}", path.display());
            return Ok(false);
        }
    };

    let (new_lines, changed) = match transform(split_keep_newlines(&contents)) {
        Ok(result) => result,
        Err(e) => {
            warn!("Mutation error on {}: {e}", path.display());
            return Ok(false);
        }
    };

    if !changed {
        return Ok(false);
    }

    if backup {
        let bak = backup_path(path);
        if !bak.exists() {
            // fs::copy carries permissions over to the backup
            if let Err(e) = fs::copy(path, &bak) {
                warn!("Backup failed for {}: {e}", path.display());
            }
        }
    }

    fs::write(path, new_lines.concat())
        .context(format!("Failed to write {}", path.display()))?;
    println!("{action}: {}", path.display());
    Ok(true)
}

/// Sibling path with a `.bak` suffix appended to the full filename,
/// extension included (`foo.desktop` -> `foo.desktop.bak`).
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Split into lines that keep their `\n` terminators, so untouched lines
/// round-trip byte-for-byte through a transform.
fn split_keep_newlines(contents: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = contents;
    while let Some(pos) = rest.find('\n') {
        lines.push(rest[..=pos].to_string());
        rest = &rest[pos + 1..];
    }
    if !rest.is_empty() {
        lines.push(rest.to_string());
    }
    lines
}
