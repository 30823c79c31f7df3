//! Consumer-facing session facade.
//!
//! A [`ZdevSession`] owns one inventory source and one command runner for
//! the duration of a session. The mode is selected at construction and
//! never switched at runtime. All calls are blocking and the session is
//! not reentrant-safe for concurrent use.

use std::path::PathBuf;

use tracing::info;

use crate::command::{CommandRunner, SystemRunner, ToolPaths};
use crate::dispatch::{self, Activation};
use crate::error::Result;
use crate::inventory::{InventorySource, LiveInventory, SimulatedInventory};
use crate::record::DeviceRecord;

/// How a session sources device data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// Enumerate and activate through the real external tools.
    Live,
    /// Simulate activation against a seeded registry.
    ///
    /// Seeding order: the supplied snapshot file if any, otherwise one real
    /// enumeration on channel-attached hosts, otherwise the built-in stock
    /// dataset.
    DryRun { snapshot_path: Option<PathBuf> },
}

/// One device-management session.
pub struct ZdevSession {
    source: InventorySource,
    runner: Box<dyn CommandRunner>,
}

impl std::fmt::Debug for ZdevSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZdevSession")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl ZdevSession {
    /// Open a session backed by the real system tools.
    pub fn new(mode: SessionMode, tools: ToolPaths) -> Result<Self> {
        Self::with_runner(mode, tools, Box::new(SystemRunner))
    }

    /// Open a session with a caller-supplied command runner.
    pub fn with_runner(
        mode: SessionMode,
        tools: ToolPaths,
        mut runner: Box<dyn CommandRunner>,
    ) -> Result<Self> {
        let source = match mode {
            SessionMode::Live => {
                info!("opening live device session");
                InventorySource::Live(LiveInventory::new(tools))
            }
            SessionMode::DryRun { snapshot_path } => {
                info!("opening dry-run device session");
                let sim = match snapshot_path {
                    Some(path) => SimulatedInventory::from_snapshot_file(&path)?,
                    None if cfg!(target_arch = "s390x") => {
                        SimulatedInventory::from_live_probe(&tools, runner.as_mut())?
                    }
                    None => SimulatedInventory::from_stock()?,
                };
                InventorySource::Simulated(sim)
            }
        };
        Ok(Self { source, runner })
    }

    /// Whether activation is simulated.
    pub fn is_dry_run(&self) -> bool {
        matches!(self.source, InventorySource::Simulated(_))
    }

    /// Refresh the device inventory. A no-op in dry-run mode; in live mode
    /// a failure retains the previous snapshot.
    pub fn refresh(&mut self) -> Result<()> {
        self.source.refresh(self.runner.as_mut())
    }

    /// Current devices in enumeration order; empty before the first live
    /// refresh.
    pub fn list_devices(&self) -> Vec<DeviceRecord> {
        self.source.snapshot()
    }

    /// Look up one device by id.
    pub fn device(&self, id: &str) -> Option<&DeviceRecord> {
        self.source.registry().get(id)
    }

    /// Enable or disable one device.
    ///
    /// In live mode the change becomes observable only through the next
    /// [`refresh`](Self::refresh).
    pub fn set_device_active(&mut self, id: &str, active: bool) -> Result<()> {
        let action = if active {
            Activation::Enable
        } else {
            Activation::Disable
        };
        dispatch::apply(&mut self.source, self.runner.as_mut(), action, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "s390x"))]
    #[test]
    fn test_dry_run_stock_round_trip() {
        let mut session = ZdevSession::new(
            SessionMode::DryRun { snapshot_path: None },
            ToolPaths::default(),
        )
        .unwrap();
        assert!(session.is_dry_run());
        session.refresh().unwrap();

        session.set_device_active("0.0.0190", true).unwrap();
        let device = session.device("0.0.0190").unwrap();
        assert!(device.on);
        assert!(device.pers);

        session.set_device_active("0.0.0190", false).unwrap();
        let device = session.device("0.0.0190").unwrap();
        assert!(!device.on);
        assert!(!device.pers);
    }

    #[cfg(not(target_arch = "s390x"))]
    #[test]
    fn test_dry_run_mutation_survives_refresh() {
        let mut session = ZdevSession::new(
            SessionMode::DryRun { snapshot_path: None },
            ToolPaths::default(),
        )
        .unwrap();
        session.set_device_active("0.0.0190", true).unwrap();
        session.refresh().unwrap();
        assert!(session.device("0.0.0190").unwrap().on);
    }

    #[test]
    fn test_dry_run_missing_snapshot_file() {
        let err = ZdevSession::new(
            SessionMode::DryRun {
                snapshot_path: Some(PathBuf::from("/nonexistent/devices.pairs")),
            },
            ToolPaths::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::ZdevError::SnapshotIo { .. }));
    }
}
