// SPDX-License-Identifier: MPL-2.0
//! In-memory resource name table.

use std::collections::HashMap;

use crate::application::port::ResourceNames;
use crate::config::MonitorConfig;

/// [`ResourceNames`] backed by a fixed id-to-name map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTable {
    names: HashMap<u32, String>,
}

impl ResourceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from the `[resources]` section of the configuration.
    ///
    /// Keys must be decimal resource ids; other keys are skipped with a warning.
    #[must_use]
    pub fn from_config(config: &MonitorConfig) -> Self {
        let names = config
            .resources
            .iter()
            .filter_map(|(key, name)| match key.trim().parse::<u32>() {
                Ok(id) => Some((id, name.clone())),
                Err(_) => {
                    tracing::warn!(
                        target: "sketch_monitor::config",
                        key = %key,
                        "ignoring resource entry with non-numeric id"
                    );
                    None
                }
            })
            .collect();
        Self { names }
    }

    #[must_use]
    pub fn with_name(mut self, id: u32, name: impl Into<String>) -> Self {
        self.names.insert(id, name.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ResourceNames for ResourceTable {
    fn resource_name(&self, id: u32) -> Option<String> {
        self.names.get(&id).cloned()
    }
}
