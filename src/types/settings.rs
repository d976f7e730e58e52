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

use std::path::PathBuf;

/// Environment prefix prepended to Exec commands to force PRIME render
/// offload onto the NVIDIA dGPU. Must stay byte-identical across releases:
/// rollback matches it literally against files patched by earlier runs.
pub const OFFLOAD_PREFIX: &str =
    "env __NV_PRIME_RENDER_OFFLOAD=1 __GLX_VENDOR_LIBRARY_NAME=nvidia";

/// Well-known application identifiers worth offloading to the dGPU.
/// Matched as lowercase substrings against Exec command tokens, so path
/// prefixes and version suffixes ("firefox-esr", "/opt/google/chrome")
/// still hit. Desktop-environment binaries are deliberately absent.
const COMMON_APP_KEYWORDS: &[&str] = &[
    // Browsers
    "firefox", "chrome", "chromium", "brave", "vivaldi", "opera", "librewolf",
    "waterfox", "edge", "tor", "epiphany", "falkon",
    // IDEs / Editors
    "code", "code-insiders", "vscodium", "codium", "sublime", "pycharm",
    "idea", "clion", "goland", "webstorm", "rider", "datagrip",
    "android-studio", "atom", "kate", "gedit", "notepadqq", "neovide",
    "nvim-qt",
    // Terminals
    "yakuake", "xfce4-terminal", "mate-terminal", "tilix", "alacritty",
    "kitty",
    // File managers
    "nautilus", "nemo", "thunar", "dolphin", "pcmanfm", "doublecmd",
    // Office / Productivity
    "libreoffice", "onlyoffice", "wps", "wpp", "okular", "xreader", "atril",
    "zathura", "xmind", "obsidian", "zotero",
    // Graphics / Media
    "gimp", "inkscape", "krita", "pinta", "blender", "shotwell", "darktable",
    "rawtherapee", "vlc", "mpv", "rhythmbox", "audacious", "audacity",
    "kdenlive", "shotcut", "handbrake", "obs", "obs-studio", "cheese",
    "pavucontrol",
    // Messaging / Communication
    "slack", "discord", "telegram", "element", "signal", "thunderbird",
    "teams", "zoom", "skype", "feishu", "lark", "wecom", "whatsapp",
    "wechat", "qq",
    // Cloud / Sync
    "dropbox", "insync", "megasync", "nextcloud",
    // Virtualization / Containers
    "virtualbox", "vmware", "virt-manager", "qemu", "gns3",
    // Gaming
    "steam", "lutris", "heroic", "bottles",
    // Download / Network
    "qbittorrent", "transmission", "motrix", "filezilla",
];

/// Immutable per-invocation configuration: search roots, the offload
/// prefix and the keyword corpus. Built once in main and passed down, so
/// tests can point everything at temporary directories.
#[derive(Debug)]
pub struct PatcherSettings {
    pub app_dirs: Vec<PathBuf>,
    pub system_session_dirs: Vec<PathBuf>,
    pub user_session_dirs: Vec<PathBuf>,
    pub home_dir: PathBuf,
    pub offload_prefix: &'static str,
    pub keywords: Vec<String>,
}

impl Default for PatcherSettings {
    fn default() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        Self {
            app_dirs: vec![
                PathBuf::from("/usr/share/applications"),
                home_dir.join(".local").join("share").join("applications"),
            ],
            system_session_dirs: vec![PathBuf::from("/usr/share/wayland-sessions")],
            user_session_dirs: vec![
                home_dir.join(".local").join("share").join("wayland-sessions"),
            ],
            home_dir,
            offload_prefix: OFFLOAD_PREFIX,
            keywords: COMMON_APP_KEYWORDS.iter().map(ToString::to_string).collect(),
        }
    }
}
