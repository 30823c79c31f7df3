//! Z-series channel device inventory and activation.
//!
//! Provides the device-management core used by installer front ends:
//! - Record parser for `lszdev --pairs` output lines
//! - Insertion-ordered device registry with atomic snapshot replacement
//! - Four-way status classification (failed / auto / online / blank)
//! - Live and simulated (dry-run) inventory sources behind one surface
//! - Activation dispatch via `chzdev` or in-memory mutation

pub mod command;
pub mod dispatch;
pub mod error;
pub mod inventory;
pub mod record;
pub mod registry;
pub mod session;
pub mod status;

pub use command::{CommandRunner, SystemRunner, ToolPaths};
pub use dispatch::Activation;
pub use error::{Result, ZdevError};
pub use inventory::{InventorySource, LiveInventory, SimulatedInventory};
pub use record::DeviceRecord;
pub use registry::DeviceRegistry;
pub use session::{SessionMode, ZdevSession};
pub use status::DeviceStatus;
