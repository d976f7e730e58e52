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

use shlex::split as shlex_split;

/// Keywords shorter than 3 characters are too ambiguous to substring-match,
/// except the ones listed here.
const SHORT_KEYWORD_ALLOWLIST: &[&str] = &["qq"];

/// Pulls the tokens worth keyword-matching out of an Exec command.
///
/// Splits with shell quoting rules (falling back to plain whitespace on
/// malformed quoting), drops `%`-field codes, skips a leading `env` plus
/// its inline `VAR=value` assignments, then keeps up to the first four
/// non-option tokens, lowercased. When nothing survives, the whole
/// lowercased command is the sole candidate.
pub fn extract_candidates(exec_cmd: &str) -> Vec<String> {
    let parts: Vec<String> = shlex_split(exec_cmd).unwrap_or_else(|| {
        exec_cmd.split_whitespace().map(ToString::to_string).collect()
    });
    let parts: Vec<&str> = parts
        .iter()
        .map(String::as_str)
        .filter(|part| !part.starts_with('%'))
        .collect();

    let mut i = 0;
    if parts.first() == Some(&"env") {
        i = 1;
        while i < parts.len() && parts[i].contains('=') && !parts[i].starts_with('-') {
            i += 1;
        }
    }

    let mut candidates = Vec::new();
    while i < parts.len() && candidates.len() < 4 {
        let token = parts[i];
        i += 1;
        if token.starts_with('-') {
            continue;
        }
        candidates.push(token.to_lowercase());
    }

    if candidates.is_empty() {
        candidates.push(exec_cmd.to_lowercase());
    }
    candidates
}

/// True when any keyword is a substring of any candidate token. Substring
/// rather than equality so `/usr/bin/firefox-esr` still matches `firefox`.
/// Scans keywords in corpus order and returns on the first hit.
pub fn matches_keywords(candidates: &[String], keywords: &[String]) -> bool {
    for keyword in keywords {
        if keyword.len() < 3 && !SHORT_KEYWORD_ALLOWLIST.contains(&keyword.as_str()) {
            continue;
        }
        let keyword = keyword.to_lowercase();
        if candidates.iter().any(|token| token.contains(&keyword)) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_str(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_field_codes_are_dropped() {
        assert_eq!(extract_candidates("firefox %u"), vec_str(&["firefox"]));
        assert_eq!(
            extract_candidates("gimp-2.10 %U %f"),
            vec_str(&["gimp-2.10"])
        );
    }

    #[test]
    fn test_env_prefix_and_assignments_are_skipped() {
        assert_eq!(
            extract_candidates("env GDK_BACKEND=x11 MOZ_USE_XINPUT2=1 firefox %u"),
            vec_str(&["firefox"])
        );
        // A bare binary named env-something must not be treated as a prefix
        assert_eq!(extract_candidates("environ-tool"), vec_str(&["environ-tool"]));
    }

    #[test]
    fn test_options_skipped_but_do_not_count() {
        assert_eq!(
            extract_candidates("wrapper --no-sandbox --profile x a b c d"),
            vec_str(&["wrapper", "x", "a", "b"])
        );
    }

    #[test]
    fn test_at_most_four_candidates() {
        assert_eq!(
            extract_candidates("a b c d e f"),
            vec_str(&["a", "b", "c", "d"])
        );
    }

    #[test]
    fn test_candidates_are_lowercased() {
        assert_eq!(
            extract_candidates("/opt/Google/Chrome %U"),
            vec_str(&["/opt/google/chrome"])
        );
    }

    #[test]
    fn test_malformed_quoting_falls_back_to_whitespace() {
        // Unterminated quote makes shlex fail; naive split still works
        assert_eq!(
            extract_candidates("firefox \"broken %u"),
            vec_str(&["firefox", "\"broken"])
        );
    }

    #[test]
    fn test_empty_result_falls_back_to_whole_command() {
        assert_eq!(extract_candidates("%u %F"), vec_str(&["%u %f"]));
    }

    #[test]
    fn test_substring_match_tolerates_paths_and_versions() {
        let keywords = vec_str(&["firefox", "code"]);
        assert!(matches_keywords(
            &vec_str(&["/usr/lib/firefox-esr/firefox-bin"]),
            &keywords
        ));
        assert!(matches_keywords(&vec_str(&["vscode"]), &keywords));
        assert!(!matches_keywords(&vec_str(&["nautilus"]), &keywords));
        // "codium" is its own corpus entry precisely because "code" is
        // not a substring of it
        assert!(!matches_keywords(&vec_str(&["vscodium"]), &keywords));
        assert!(matches_keywords(&vec_str(&["vscodium"]), &vec_str(&["codium"])));
    }

    #[test]
    fn test_substring_heuristic_accepts_known_false_positives() {
        // "tor" hides inside "gnome-calculator"; an accepted cost of
        // tolerating path prefixes and version suffixes
        assert!(matches_keywords(
            &vec_str(&["gnome-calculator"]),
            &vec_str(&["tor"])
        ));
    }

    #[test]
    fn test_short_keywords_need_allowlisting() {
        assert!(!matches_keywords(&vec_str(&["vlc"]), &vec_str(&["vl"])));
        assert!(matches_keywords(&vec_str(&["qq-linux"]), &vec_str(&["qq"])));
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        assert!(matches_keywords(
            &extract_candidates("/opt/Firefox/Firefox %u"),
            &vec_str(&["firefox"])
        ));
    }
}
