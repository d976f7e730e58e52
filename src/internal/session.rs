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

use crate::types::SessionFamily;

/// Best-effort classification of a session descriptor by substring
/// inspection of its whole content ("gnome"/"gnome-session" vs
/// "plasma"/"startplasma"/"kde"), not a grammar-aware parse. A file
/// containing both sets of markers resolves to Gnome because that check
/// runs first; the tie-break is check order and is kept that way on
/// purpose.
pub fn classify_session(lines: &[String]) -> SessionFamily {
    let joined = lines.concat().to_lowercase();
    if joined.contains("gnome") {
        return SessionFamily::Gnome;
    }
    if joined.contains("plasma") || joined.contains("kde") {
        return SessionFamily::Kde;
    }
    SessionFamily::Unknown
}
