// SPDX-License-Identifier: MPL-2.0
//! Environment snapshots taken at report time.
//!
//! The monitor asks the probe only for the facts a report actually prints,
//! after throttling has allowed it, so suppressed events never touch the
//! probe. The formatter then works on the captured values alone.

use crate::application::port::EnvironmentProbe;
use crate::domain::diagnostics::{AbiList, DeviceInfo, MemoryStats, StorageStats};

/// Which environment facts a report needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotNeeds {
    pub memory: bool,
    pub storage: bool,
    pub abis: bool,
    pub device: bool,
}

impl SnapshotNeeds {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Requests memory stats when `needed`; never clears an earlier request.
    #[must_use]
    pub fn with_memory(mut self, needed: bool) -> Self {
        self.memory |= needed;
        self
    }

    #[must_use]
    pub fn with_storage(mut self, needed: bool) -> Self {
        self.storage |= needed;
        self
    }

    #[must_use]
    pub fn with_abis(mut self, needed: bool) -> Self {
        self.abis |= needed;
        self
    }

    #[must_use]
    pub fn with_device(mut self, needed: bool) -> Self {
        self.device |= needed;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.memory || self.storage || self.abis || self.device)
    }
}

/// Facts read from an [`EnvironmentProbe`] for one report.
///
/// A missing field means the report did not ask for it; the formatter prints
/// `unknown` if a layout needs a fact that was not captured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvironmentSnapshot {
    memory: Option<MemoryStats>,
    storage: Option<StorageStats>,
    abis: Option<AbiList>,
    device: Option<DeviceInfo>,
}

impl EnvironmentSnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Queries `probe` for exactly the facts in `needs`.
    #[must_use]
    pub fn capture(probe: &dyn EnvironmentProbe, needs: SnapshotNeeds) -> Self {
        Self {
            memory: needs.memory.then(|| probe.memory_stats()),
            storage: needs.storage.then(|| probe.storage_stats()),
            abis: needs.abis.then(|| probe.device_abis()),
            device: needs.device.then(|| probe.device_info()),
        }
    }

    #[must_use]
    pub fn with_memory(mut self, memory: MemoryStats) -> Self {
        self.memory = Some(memory);
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: StorageStats) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn with_abis(mut self, abis: AbiList) -> Self {
        self.abis = Some(abis);
        self
    }

    #[must_use]
    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = Some(device);
        self
    }

    #[must_use]
    pub fn memory(&self) -> Option<&MemoryStats> {
        self.memory.as_ref()
    }

    #[must_use]
    pub fn storage(&self) -> Option<&StorageStats> {
        self.storage.as_ref()
    }

    #[must_use]
    pub fn abis(&self) -> Option<&AbiList> {
        self.abis.as_ref()
    }

    #[must_use]
    pub fn device(&self) -> Option<&DeviceInfo> {
        self.device.as_ref()
    }
}
