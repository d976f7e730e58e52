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

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod settings;

/// Where a discovered descriptor came from: a regular application
/// launcher directory, or a desktop-session directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Application,
    Session,
}

impl Display for CandidateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateKind::Application => write!(f, "app"),
            CandidateKind::Session => write!(f, "session"),
        }
    }
}

/// A discovered `.desktop` file waiting for user selection.
/// `title` is the descriptor's `Name=` value, or the filename when absent.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub path: PathBuf,
    pub title: String,
}

/// Desktop environment family a session descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFamily {
    Gnome,
    Kde,
    Unknown,
}
