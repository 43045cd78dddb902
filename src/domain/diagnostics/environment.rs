// SPDX-License-Identifier: MPL-2.0
//! Device and runtime facts used to enrich reports.
//!
//! Every figure is optional: a probe that cannot read a value leaves it
//! unset and the report prints `unknown` instead of failing.

use std::fmt;

/// Memory counters of the running process' allocator or host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStats {
    /// Bytes still available for allocation.
    pub free_bytes: Option<u64>,
    /// Upper bound the process may grow to.
    pub max_bytes: Option<u64>,
    /// Bytes currently reserved.
    pub total_bytes: Option<u64>,
}

impl MemoryStats {
    #[must_use]
    pub fn new(free_bytes: u64, max_bytes: u64, total_bytes: u64) -> Self {
        Self {
            free_bytes: Some(free_bytes),
            max_bytes: Some(max_bytes),
            total_bytes: Some(total_bytes),
        }
    }

    /// All figures unknown.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Mount state of the external storage volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Mounted,
    MountedReadOnly,
    Unmounted,
    Removed,
    Unknown,
}

impl MountState {
    /// Only a writable mount reports capacity.
    #[must_use]
    pub fn is_mounted(self) -> bool {
        matches!(self, MountState::Mounted)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MountState::Mounted => "mounted",
            MountState::MountedReadOnly => "mounted_ro",
            MountState::Unmounted => "unmounted",
            MountState::Removed => "removed",
            MountState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free and total size of a volume, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageCapacity {
    pub available_bytes: u64,
    pub total_bytes: u64,
}

/// External storage state.
///
/// `capacity` is only meaningful while mounted; see [`StorageStats::capacity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    pub state: MountState,
    capacity: Option<StorageCapacity>,
}

impl StorageStats {
    /// A mounted volume with known capacity.
    #[must_use]
    pub fn mounted(available_bytes: u64, total_bytes: u64) -> Self {
        Self {
            state: MountState::Mounted,
            capacity: Some(StorageCapacity {
                available_bytes,
                total_bytes,
            }),
        }
    }

    /// A volume in any state, with no capacity figures.
    #[must_use]
    pub fn with_state(state: MountState) -> Self {
        Self {
            state,
            capacity: None,
        }
    }

    /// Capacity, present only when the volume is mounted.
    #[must_use]
    pub fn capacity(&self) -> Option<StorageCapacity> {
        if self.state.is_mounted() {
            self.capacity
        } else {
            None
        }
    }
}

/// Instruction-set ABIs supported by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiList {
    /// Platform reports a full, ordered list.
    Supported(Vec<String>),
    /// Platform only exposes two legacy single-ABI fields.
    Legacy { primary: String, secondary: String },
}

impl AbiList {
    /// Flattened, ordered view of the supported ABIs.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            AbiList::Supported(abis) => abis.clone(),
            AbiList::Legacy { primary, secondary } => [primary, secondary]
                .into_iter()
                .filter(|abi| !abi.is_empty())
                .cloned()
                .collect(),
        }
    }
}

impl fmt::Display for AbiList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiList::Supported(abis) if abis.is_empty() => f.write_str("unknown"),
            AbiList::Supported(abis) => write!(f, "[{}]", abis.join(", ")),
            AbiList::Legacy { primary, secondary } => {
                write!(f, "abi1={primary}, abi2={secondary}")
            }
        }
    }
}

/// Sentinel printed for device facts that could not be read.
pub const UNKNOWN: &str = "unknown";

/// Device identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub model: String,
    pub os_version: String,
}

impl DeviceInfo {
    /// Builds device info, substituting `unknown` for blank values.
    #[must_use]
    pub fn new(model: impl Into<String>, os_version: impl Into<String>) -> Self {
        fn or_unknown(value: String) -> String {
            if value.trim().is_empty() {
                UNKNOWN.to_string()
            } else {
                value
            }
        }
        Self {
            model: or_unknown(model.into()),
            os_version: or_unknown(os_version.into()),
        }
    }
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.model, self.os_version)
    }
}
