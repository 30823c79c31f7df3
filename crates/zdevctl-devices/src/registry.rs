//! Insertion-ordered device registry.

use std::collections::HashMap;

use crate::error::{Result, ZdevError};
use crate::record::DeviceRecord;

/// Insertion-ordered mapping from device id to [`DeviceRecord`].
///
/// One registry is exclusively owned by one inventory source per session;
/// consumers read snapshots or mutate through the dispatcher only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistry {
    order: Vec<String>,
    devices: HashMap<String, DeviceRecord>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole enumeration snapshot, one record per line.
    ///
    /// Atomic: any malformed line or duplicate id fails the whole parse
    /// and no registry is produced.
    pub fn parse_snapshot(text: &str) -> Result<Self> {
        let mut registry = Self::new();
        for line in text.lines() {
            registry.insert(DeviceRecord::parse(line)?)?;
        }
        Ok(registry)
    }

    /// Insert a record, rejecting duplicate ids.
    pub fn insert(&mut self, record: DeviceRecord) -> Result<()> {
        if self.devices.contains_key(&record.id) {
            return Err(ZdevError::MalformedRecord {
                detail: format!("duplicate device id: {:?}", record.id),
            });
        }
        self.order.push(record.id.clone());
        self.devices.insert(record.id.clone(), record);
        Ok(())
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no devices.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&DeviceRecord> {
        self.devices.get(id)
    }

    /// Look up a record for in-place mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut DeviceRecord> {
        self.devices.get_mut(id)
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.order.iter().map(|id| &self.devices[id])
    }

    /// Clone the records in insertion order.
    pub fn snapshot(&self) -> Vec<DeviceRecord> {
        self.iter().cloned().collect()
    }
}
