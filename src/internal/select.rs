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

use crate::types::Candidate;
use anyhow::{Result, anyhow};
use std::io;
use std::io::Write;

/// What the user's one-line answer resolved to. Indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Cancel,
    All,
    Indices(Vec<usize>),
}

/// Pure resolution of a raw input line against a candidate count, kept
/// separate from the prompt so non-interactive callers (and tests) can
/// drive it directly.
///
/// Empty input and the cancel words abort; `a`/`all` selects everything;
/// anything else is read as comma-separated 1-based indices where
/// non-numeric and out-of-range entries are dropped. Only input with no
/// parsable number at all is an error.
pub fn resolve_selection(input: &str, count: usize) -> Result<Selection> {
    let input = input.trim().to_lowercase();
    if matches!(input.as_str(), "" | "q" | "quit" | "exit" | "cancel") {
        return Ok(Selection::Cancel);
    }
    if matches!(input.as_str(), "a" | "all") {
        return Ok(Selection::All);
    }

    let mut indices = Vec::new();
    let mut parsed_any = false;
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Ok(index) = part.parse::<usize>() {
            parsed_any = true;
            if (1..=count).contains(&index) {
                indices.push(index - 1);
            }
        }
    }
    if !parsed_any {
        return Err(anyhow!("Invalid selection: {input:?}"));
    }
    Ok(Selection::Indices(indices))
}

pub fn print_candidates(candidates: &[Candidate]) {
    println!("Found the following .desktop entries:");
    for (index, candidate) in candidates.iter().enumerate() {
        println!(
            "  [{}] {}: {} -> {}",
            index + 1,
            candidate.kind,
            candidate.title,
            candidate.path.display()
        );
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Lists the candidates, prompts once and returns the chosen indices.
/// Cancellation and unparsable input both come back as an empty set so
/// the caller's outer loop simply continues.
pub fn choose_indices(candidates: &[Candidate], verb: &str) -> Result<Vec<usize>> {
    print_candidates(candidates);
    let input = prompt_line(&format!(
        "Enter numbers to {verb} (comma separated), a for all, q to cancel: "
    ))?;
    match resolve_selection(&input, candidates.len()) {
        Ok(Selection::Cancel) => {
            println!("Cancelled.");
            Ok(Vec::new())
        }
        Ok(Selection::All) => Ok((0..candidates.len()).collect()),
        Ok(Selection::Indices(indices)) => Ok(indices),
        Err(e) => {
            println!("{e}, cancelled.");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_words_and_empty_input() {
        for input in ["", "  ", "q", "Q", "quit", "exit", "cancel"] {
            assert_eq!(resolve_selection(input, 5).unwrap(), Selection::Cancel);
        }
    }

    #[test]
    fn test_select_all() {
        assert_eq!(resolve_selection("a", 3).unwrap(), Selection::All);
        assert_eq!(resolve_selection("ALL", 3).unwrap(), Selection::All);
    }

    #[test]
    fn test_comma_separated_indices_are_zero_based() {
        assert_eq!(
            resolve_selection("1,3", 3).unwrap(),
            Selection::Indices(vec![0, 2])
        );
        assert_eq!(
            resolve_selection(" 2 , 2 ,", 3).unwrap(),
            Selection::Indices(vec![1, 1])
        );
    }

    #[test]
    fn test_out_of_range_and_garbage_entries_are_dropped() {
        assert_eq!(
            resolve_selection("0,1,4,xyz", 3).unwrap(),
            Selection::Indices(vec![0])
        );
    }

    #[test]
    fn test_fully_unparsable_input_is_an_error() {
        assert!(resolve_selection("x,y,z", 3).is_err());
        assert!(resolve_selection("first", 3).is_err());
    }
}
