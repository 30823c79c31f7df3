//! Inventory sources: live enumeration and dry-run simulation.

use std::path::Path;

use tracing::{debug, info};

use crate::command::{enumeration_args, CommandRunner, ToolPaths};
use crate::error::{Result, ZdevError};
use crate::record::DeviceRecord;
use crate::registry::DeviceRegistry;

/// Baseline enumeration snapshot used to seed dry-run sessions on hosts
/// without channel hardware.
pub const STOCK_SNAPSHOT: &str = r#"id="0.0.0190" type="dasd-eckd" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.0191" type="dasd-eckd" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.019d" type="dasd-eckd" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.019e" type="dasd-eckd" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.0200" type="dasd-eckd" on="yes" exists="yes" pers="yes" auto="no" failed="no" names="dasda"
id="0.0.0300" type="dasd-eckd" on="yes" exists="yes" pers="yes" auto="no" failed="no" names="dasdb"
id="0.0.0400" type="dasd-eckd" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.0592" type="dasd-eckd" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.0600:0.0.0601:0.0.0602" type="qeth" on="yes" exists="yes" pers="yes" auto="no" failed="no" names="enc600"
id="0.0.0603:0.0.0604:0.0.0605" type="qeth" on="no" exists="yes" pers="yes" auto="no" failed="yes" names="enc603"
id="0.0.0606:0.0.0607:0.0.0608" type="qeth" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.d000:0.0.d001:0.0.d002" type="qeth" on="yes" exists="yes" pers="yes" auto="no" failed="no" names="encd000"
id="0.0.d003:0.0.d004:0.0.d005" type="qeth" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.0009" type="generic-ccw" on="yes" exists="yes" pers="yes" auto="no" failed="no" names=""
id="0.0.000c" type="generic-ccw" on="no" exists="yes" pers="no" auto="no" failed="no" names=""
id="0.0.000d" type="generic-ccw" on="yes" exists="yes" pers="yes" auto="no" failed="no" names="vmpun-0.0.000d"
id="0.0.000e" type="generic-ccw" on="yes" exists="yes" pers="no" auto="yes" failed="no" names="vmprt-0.0.000e"
"#;

/// Inventory backed by the real enumeration command.
///
/// Refresh is atomic: the cached registry is replaced only after the whole
/// command output parsed; on any failure the previous snapshot is retained.
#[derive(Debug, Clone)]
pub struct LiveInventory {
    tools: ToolPaths,
    registry: DeviceRegistry,
}

impl LiveInventory {
    /// Create a live inventory with an empty registry; call
    /// [`refresh`](Self::refresh) before the first read.
    pub fn new(tools: ToolPaths) -> Self {
        Self {
            tools,
            registry: DeviceRegistry::new(),
        }
    }

    /// Tool paths this inventory enumerates and activates with.
    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    /// Re-enumerate devices and replace the cached registry.
    pub fn refresh(&mut self, runner: &mut dyn CommandRunner) -> Result<()> {
        let stdout = runner.run(&self.tools.lszdev, &enumeration_args())?;
        let parsed = DeviceRegistry::parse_snapshot(&stdout)?;
        info!(devices = parsed.len(), "refreshed device inventory");
        self.registry = parsed;
        Ok(())
    }

    /// Current cached registry; empty before the first successful refresh.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }
}

/// Inventory seeded once at construction; refresh is a no-op.
///
/// All visible change arrives through the activation dispatcher mutating
/// records in place, since there is no external source to re-poll.
#[derive(Debug, Clone)]
pub struct SimulatedInventory {
    registry: DeviceRegistry,
}

impl SimulatedInventory {
    /// Seed from the built-in stock dataset.
    pub fn from_stock() -> Result<Self> {
        debug!("seeding simulated inventory from stock data");
        Ok(Self {
            registry: DeviceRegistry::parse_snapshot(STOCK_SNAPSHOT)?,
        })
    }

    /// Seed from a caller-supplied pairs file.
    pub fn from_snapshot_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ZdevError::SnapshotIo {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        debug!(path = %path.display(), "seeding simulated inventory from snapshot file");
        Ok(Self {
            registry: DeviceRegistry::parse_snapshot(&text)?,
        })
    }

    /// Seed from one real enumeration, performed once at construction.
    /// Used on channel-attached hosts where real device data is available
    /// even though activation stays simulated.
    pub fn from_live_probe(tools: &ToolPaths, runner: &mut dyn CommandRunner) -> Result<Self> {
        let stdout = runner.run(&tools.lszdev, &enumeration_args())?;
        debug!("seeding simulated inventory from live probe");
        Ok(Self {
            registry: DeviceRegistry::parse_snapshot(&stdout)?,
        })
    }

    /// Current registry.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Mutable registry access for the activation dispatcher.
    pub fn registry_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }
}

/// Closed set of inventory variants behind one call surface, selected at
/// session start and never switched at runtime.
#[derive(Debug, Clone)]
pub enum InventorySource {
    /// Enumerates through the external command on every refresh.
    Live(LiveInventory),
    /// Replays a seeded snapshot; mutated only by the dispatcher.
    Simulated(SimulatedInventory),
}

impl InventorySource {
    /// Refresh the registry. Live sources re-enumerate; simulated refresh
    /// is idempotent and side-effect-free.
    pub fn refresh(&mut self, runner: &mut dyn CommandRunner) -> Result<()> {
        match self {
            Self::Live(live) => live.refresh(runner),
            Self::Simulated(_) => Ok(()),
        }
    }

    /// Current registry; never fails, empty before the first live refresh.
    pub fn registry(&self) -> &DeviceRegistry {
        match self {
            Self::Live(live) => live.registry(),
            Self::Simulated(sim) => sim.registry(),
        }
    }

    /// Clone the current records in insertion order.
    pub fn snapshot(&self) -> Vec<DeviceRecord> {
        self.registry().snapshot()
    }
}
