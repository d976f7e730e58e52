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

use crate::internal::exec_cmd::{extract_candidates, matches_keywords};
use crate::internal::mutator::safe_edit_file;
use crate::internal::session::classify_session;
use crate::types::SessionFamily;
use anyhow::Result;
use std::fs;
use std::path::Path;

const EXEC_KEY: &str = "Exec=";

/// Prepends the offload prefix to every Exec line that qualifies.
/// With `keywords` set, a line only qualifies when its command matches the
/// corpus; with `None` every Exec line is patched (session descriptors).
/// Lines already carrying the prefix pass through, so a second apply is a
/// no-op. Field codes are only stripped for matching; the rewritten line
/// keeps the full original command.
fn prefix_exec_lines(
    lines: Vec<String>,
    keywords: Option<&[String]>,
    prefix: &str,
) -> (Vec<String>, bool) {
    let mut changed = false;
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(value) = line.strip_prefix(EXEC_KEY) {
            if !line.contains(prefix) {
                let exec_cmd = value.trim();
                let wanted = match keywords {
                    Some(keywords) => {
                        matches_keywords(&extract_candidates(exec_cmd), keywords)
                    }
                    None => true,
                };
                if wanted && !exec_cmd.starts_with(prefix) {
                    out.push(format!("{EXEC_KEY}{prefix} {exec_cmd}\n"));
                    changed = true;
                    continue;
                }
            }
        }
        out.push(line);
    }
    (out, changed)
}

/// Exact left-inverse of the apply step for a single line: removes one
/// `<prefix> ` occurrence from the Exec value. Non-Exec lines and Exec
/// lines without the prefix pass through untouched.
pub fn strip_offload_prefix(line: &str, prefix: &str) -> String {
    let Some(value) = line.strip_prefix(EXEC_KEY) else {
        return line.to_string();
    };
    let exec_cmd = value.trim_start();
    let Some(rest) = exec_cmd
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(' '))
    else {
        return line.to_string();
    };
    if rest.ends_with('\n') {
        format!("{EXEC_KEY}{rest}")
    } else {
        format!("{EXEC_KEY}{rest}\n")
    }
}

/// Patches an application launcher in place, keyword-gated. No backup:
/// application descriptors are reinstallable and the edit is reversible.
pub fn patch_desktop_file(path: &Path, keywords: &[String], prefix: &str) -> Result<bool> {
    safe_edit_file(
        path,
        |lines| Ok(prefix_exec_lines(lines, Some(keywords), prefix)),
        false,
        "Patched",
    )
}

/// Patches a session descriptor in place, every Exec line, with a `.bak`
/// backup first. An edit here changes the login session itself, hence the
/// extra caution. `family` restricts the edit to descriptors classified
/// into that desktop family; `None` patches regardless.
pub fn patch_session_inplace(
    path: &Path,
    family: Option<SessionFamily>,
    prefix: &str,
) -> Result<bool> {
    safe_edit_file(
        path,
        move |lines| {
            if let Some(want) = family {
                if classify_session(&lines) != want {
                    return Ok((lines, false));
                }
            }
            Ok(prefix_exec_lines(lines, None, prefix))
        },
        true,
        "Patched session (inplace)",
    )
}

/// Removes the offload prefix from every Exec line of a descriptor.
pub fn rollback_desktop_file(path: &Path, prefix: &str) -> Result<bool> {
    safe_edit_file(
        path,
        |lines| {
            let mut changed = false;
            let new_lines = lines
                .into_iter()
                .map(|line| {
                    let new_line = strip_offload_prefix(&line, prefix);
                    if new_line != line {
                        changed = true;
                    }
                    new_line
                })
                .collect();
            Ok((new_lines, changed))
        },
        false,
        "Rolled back",
    )
}

/// True when any Exec line of the file carries the offload prefix.
/// Unreadable files count as unpatched.
pub fn exec_contains_prefix(path: &Path, prefix: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(contents) => contents
            .lines()
            .any(|line| line.starts_with(EXEC_KEY) && line.contains(prefix)),
        Err(_) => false,
    }
}
