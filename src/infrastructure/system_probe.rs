// SPDX-License-Identifier: MPL-2.0
//! Host environment probe backed by `sysinfo`.
//!
//! Memory and storage are read fresh on every query. Device facts never
//! change during a process lifetime and are read once at construction.

use std::path::{Path, PathBuf};

use sysinfo::{CpuRefreshKind, Disks, RefreshKind, System};

use crate::application::port::EnvironmentProbe;
use crate::domain::diagnostics::{
    AbiList, DeviceInfo, MemoryStats, MountState, StorageStats, UNKNOWN,
};

const LOG_TARGET: &str = "sketch_monitor::probe";

/// [`EnvironmentProbe`] reading the host system.
///
/// Figures map onto the report vocabulary as follows:
///
/// | Report field | Host figure |
/// |--------------|-------------|
/// | free memory | available RAM |
/// | max memory | total RAM |
/// | total memory | RAM in use |
/// | external storage | volume holding `storage_dir` |
/// | device model | CPU brand, else OS name |
#[derive(Debug, Clone)]
pub struct SystemProbe {
    storage_dir: Option<PathBuf>,
    device: DeviceInfo,
    abis: AbiList,
}

impl SystemProbe {
    /// Creates a probe reporting the volume that holds `storage_dir`.
    ///
    /// Without a directory, storage state is always `unknown`.
    #[must_use]
    pub fn new(storage_dir: Option<PathBuf>) -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()),
        );
        let model = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .or_else(System::name)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let os_version = System::os_version().unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            storage_dir,
            device: DeviceInfo::new(model, os_version),
            abis: abis_for_arch(std::env::consts::ARCH),
        }
    }

    #[must_use]
    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new(dirs::data_dir())
    }
}

impl EnvironmentProbe for SystemProbe {
    fn memory_stats(&self) -> MemoryStats {
        let mut sys = System::new();
        sys.refresh_memory();

        if sys.total_memory() == 0 {
            tracing::warn!(target: LOG_TARGET, "memory counters unavailable");
            return MemoryStats::unknown();
        }
        MemoryStats::new(sys.available_memory(), sys.total_memory(), sys.used_memory())
    }

    fn storage_stats(&self) -> StorageStats {
        let Some(dir) = self.storage_dir.as_deref() else {
            return StorageStats::with_state(MountState::Unknown);
        };
        if !dir.exists() {
            return StorageStats::with_state(MountState::Unmounted);
        }

        let disks = Disks::new_with_refreshed_list();

        // The disk with the longest mount point containing the directory
        let mut best_match: Option<(&sysinfo::Disk, usize)> = None;
        for disk in &disks {
            let mount_point = disk.mount_point();
            if dir.starts_with(mount_point) {
                let len = mount_point.as_os_str().len();
                if best_match.is_none_or(|(_, best_len)| len > best_len) {
                    best_match = Some((disk, len));
                }
            }
        }

        match best_match {
            Some((disk, _)) if disk.is_read_only() => {
                StorageStats::with_state(MountState::MountedReadOnly)
            }
            Some((disk, _)) => StorageStats::mounted(disk.available_space(), disk.total_space()),
            None => {
                tracing::warn!(
                    target: LOG_TARGET,
                    dir = %dir.display(),
                    "no mounted volume holds the storage directory"
                );
                StorageStats::with_state(MountState::Unknown)
            }
        }
    }

    fn device_abis(&self) -> AbiList {
        self.abis.clone()
    }

    fn device_info(&self) -> DeviceInfo {
        self.device.clone()
    }
}

/// ABIs a binary for `arch` can run.
///
/// 64-bit targets list themselves and their 32-bit compatibility ABI; 32-bit
/// targets only expose a single legacy ABI.
fn abis_for_arch(arch: &str) -> AbiList {
    let compat = match arch {
        "x86_64" => Some("x86"),
        "aarch64" => Some("arm"),
        "x86" | "arm" => {
            return AbiList::Legacy {
                primary: arch.to_string(),
                secondary: String::new(),
            }
        }
        _ => None,
    };
    AbiList::Supported(
        std::iter::once(arch)
            .chain(compat)
            .map(str::to_string)
            .collect(),
    )
}
