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

use log::debug;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const NVIDIA_PCI_VENDOR_ID: &str = "0x10de";

/// Best-effort probe for an NVIDIA dGPU with a usable driver. Checks the
/// driver's device nodes and procfs entries first, then scans PCI vendor
/// IDs in sysfs, and finally asks nvidia-smi if it is installed. Never
/// fails hard; any probe error just means "not detected".
pub fn has_nvidia_dgpu() -> bool {
    if Path::new("/dev/nvidiactl").exists()
        || Path::new("/proc/driver/nvidia/gpus").is_dir()
        || Path::new("/proc/driver/nvidia/version").exists()
    {
        debug!("NVIDIA driver nodes present");
        return true;
    }
    if pci_has_nvidia_vendor(Path::new("/sys/bus/pci/devices")) {
        debug!("NVIDIA PCI vendor id found in sysfs");
        return true;
    }
    nvidia_smi_reports_gpu()
}

fn pci_has_nvidia_vendor(sysfs_root: &Path) -> bool {
    let Ok(entries) = fs::read_dir(sysfs_root) else {
        return false;
    };
    for entry in entries.flatten() {
        if let Ok(vendor) = fs::read_to_string(entry.path().join("vendor")) {
            if vendor.trim().eq_ignore_ascii_case(NVIDIA_PCI_VENDOR_ID) {
                return true;
            }
        }
    }
    false
}

/// `nvidia-smi -L` can hang on a broken driver, so the call runs on a
/// throwaway thread and is abandoned after a short wait.
fn nvidia_smi_reports_gpu() -> bool {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = Command::new("nvidia-smi").arg("-L").output();
        let _ = tx.send(result);
    });
    match rx.recv_timeout(Duration::from_secs(2)) {
        Ok(Ok(output)) => output.status.success() && !output.stdout.is_empty(),
        Ok(Err(e)) => {
            debug!("nvidia-smi not usable: {e}");
            false
        }
        Err(_) => {
            debug!("nvidia-smi timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pci_scan_finds_nvidia_vendor() {
        let dir = tempfile::tempdir().unwrap();
        let dev = dir.path().join("0000:01:00.0");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("vendor"), "0x10DE\n").unwrap();

        assert!(pci_has_nvidia_vendor(dir.path()));
    }

    #[test]
    fn test_pci_scan_ignores_other_vendors() {
        let dir = tempfile::tempdir().unwrap();
        let dev = dir.path().join("0000:00:02.0");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("vendor"), "0x8086\n").unwrap();

        assert!(!pci_has_nvidia_vendor(dir.path()));
        assert!(!pci_has_nvidia_vendor(&dir.path().join("missing")));
    }
}
