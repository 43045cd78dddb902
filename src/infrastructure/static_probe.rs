// SPDX-License-Identifier: MPL-2.0
//! Environment probe returning fixed values.

use crate::application::port::EnvironmentProbe;
use crate::domain::diagnostics::{AbiList, DeviceInfo, MemoryStats, StorageStats};

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// [`EnvironmentProbe`] with preset answers, for tests and for hosts that
/// collect device facts elsewhere.
///
/// The default describes a typical phone: 32 MiB free of a 256 MiB heap
/// with 64 MiB reserved, 8 GiB free of 32 GiB mounted storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProbe {
    memory: MemoryStats,
    storage: StorageStats,
    abis: AbiList,
    device: DeviceInfo,
}

impl StaticProbe {
    #[must_use]
    pub fn with_memory(mut self, memory: MemoryStats) -> Self {
        self.memory = memory;
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: StorageStats) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_abis(mut self, abis: AbiList) -> Self {
        self.abis = abis;
        self
    }

    #[must_use]
    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = device;
        self
    }
}

impl Default for StaticProbe {
    fn default() -> Self {
        Self {
            memory: MemoryStats::new(32 * MIB, 256 * MIB, 64 * MIB),
            storage: StorageStats::mounted(8 * GIB, 32 * GIB),
            abis: AbiList::Supported(vec!["arm64-v8a".into(), "armeabi-v7a".into()]),
            device: DeviceInfo::new("Pixel 7", "34"),
        }
    }
}

impl EnvironmentProbe for StaticProbe {
    fn memory_stats(&self) -> MemoryStats {
        self.memory
    }

    fn storage_stats(&self) -> StorageStats {
        self.storage
    }

    fn device_abis(&self) -> AbiList {
        self.abis.clone()
    }

    fn device_info(&self) -> DeviceInfo {
        self.device.clone()
    }
}
