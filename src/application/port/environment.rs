// SPDX-License-Identifier: MPL-2.0
//! Environment probing port definitions.
//!
//! This module defines the [`EnvironmentProbe`] trait for reading device and
//! runtime facts, and [`ResourceNames`] for turning packaged-resource ids into
//! readable names. Infrastructure adapters implement both.

use crate::domain::diagnostics::{AbiList, DeviceInfo, MemoryStats, StorageStats};

// =============================================================================
// EnvironmentProbe Trait
// =============================================================================

/// Port for read-only device and runtime queries.
///
/// # Contract
///
/// - Queries never mutate anything and may be called repeatedly and
///   concurrently.
/// - Queries never fail. When a figure cannot be read the implementation
///   returns an `unknown` sentinel (`None` figures, [`DeviceInfo::default`],
///   an empty ABI list, [`MountState::Unknown`](crate::domain::diagnostics::MountState)).
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one probe can serve every
/// pipeline worker.
///
/// # Example
///
/// ```
/// use sketch_monitor::application::port::EnvironmentProbe;
/// use sketch_monitor::infrastructure::StaticProbe;
///
/// fn headroom(probe: &impl EnvironmentProbe) -> Option<u64> {
///     let memory = probe.memory_stats();
///     Some(memory.max_bytes? - memory.total_bytes?)
/// }
///
/// assert_eq!(headroom(&StaticProbe::default()), Some(192 * 1024 * 1024));
/// ```
pub trait EnvironmentProbe: Send + Sync {
    /// Current allocator counters.
    fn memory_stats(&self) -> MemoryStats;

    /// External storage mount state and, when mounted, its capacity.
    fn storage_stats(&self) -> StorageStats;

    /// Supported instruction-set ABIs, most preferred first.
    fn device_abis(&self) -> AbiList;

    /// Device model and OS version.
    fn device_info(&self) -> DeviceInfo;
}

impl<P: EnvironmentProbe + ?Sized> EnvironmentProbe for Box<P> {
    fn memory_stats(&self) -> MemoryStats {
        (**self).memory_stats()
    }

    fn storage_stats(&self) -> StorageStats {
        (**self).storage_stats()
    }

    fn device_abis(&self) -> AbiList {
        (**self).device_abis()
    }

    fn device_info(&self) -> DeviceInfo {
        (**self).device_info()
    }
}

// =============================================================================
// ResourceNames Trait
// =============================================================================

/// Port for resolving packaged-resource ids to human-readable names.
///
/// Returns `None` when the id is unknown; callers fall back to the raw URI.
pub trait ResourceNames: Send + Sync {
    fn resource_name(&self, id: u32) -> Option<String>;
}

/// Resolver that knows no resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResourceNames;

impl ResourceNames for NoResourceNames {
    fn resource_name(&self, _id: u32) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::MountState;

    struct DegradedProbe;

    impl EnvironmentProbe for DegradedProbe {
        fn memory_stats(&self) -> MemoryStats {
            MemoryStats::unknown()
        }

        fn storage_stats(&self) -> StorageStats {
            StorageStats::with_state(MountState::Unknown)
        }

        fn device_abis(&self) -> AbiList {
            AbiList::Supported(Vec::new())
        }

        fn device_info(&self) -> DeviceInfo {
            DeviceInfo::default()
        }
    }

    #[test]
    fn boxed_probe_delegates() {
        let probe: Box<dyn EnvironmentProbe> = Box::new(DegradedProbe);
        assert_eq!(probe.memory_stats(), MemoryStats::unknown());
        assert_eq!(probe.device_info().model, "unknown");
        assert!(probe.storage_stats().capacity().is_none());
    }

    #[test]
    fn no_resource_names_resolves_nothing() {
        assert!(NoResourceNames.resource_name(42).is_none());
    }

    #[test]
    fn probe_trait_is_object_safe() {
        fn assert_dyn(_: &dyn EnvironmentProbe) {}
        assert_dyn(&DegradedProbe);
    }
}
