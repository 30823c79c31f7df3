//! Activation dispatch.
//!
//! Applies an enable/disable action to one device: live sources run the
//! activation command and cache nothing (the caller refreshes afterward to
//! observe the new truth); simulated sources mutate the registry in place
//! to the net effect a successful command would have had.

use tracing::info;

use crate::command::CommandRunner;
use crate::error::{Result, ZdevError};
use crate::inventory::InventorySource;

/// An activation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Enable,
    Disable,
}

impl Activation {
    /// The activation tool's command-line flag.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Enable => "--enable",
            Self::Disable => "--disable",
        }
    }

    /// Target value for the `on` and `pers` flags after a successful
    /// activation command.
    pub fn is_enable(self) -> bool {
        matches!(self, Self::Enable)
    }
}

/// Argument list for the activation command.
pub fn activation_args(action: Activation, id: &str) -> Vec<String> {
    vec![action.flag().to_string(), id.to_string()]
}

/// Apply an activation action to one device.
///
/// Errors are surfaced, never retried: activation commands are not assumed
/// idempotent-safe against failed hardware.
pub fn apply(
    source: &mut InventorySource,
    runner: &mut dyn CommandRunner,
    action: Activation,
    id: &str,
) -> Result<()> {
    info!(device = %id, action = action.flag(), "applying activation");
    match source {
        InventorySource::Live(live) => {
            let chzdev = live.tools().chzdev.clone();
            runner.run(&chzdev, &activation_args(action, id))?;
            Ok(())
        }
        InventorySource::Simulated(sim) => {
            let record = sim.registry_mut().get_mut(id).ok_or_else(|| {
                ZdevError::UnknownDevice { id: id.to_string() }
            })?;
            record.on = action.is_enable();
            record.pers = action.is_enable();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::SimulatedInventory;

    struct NoRunner;

    impl CommandRunner for NoRunner {
        fn run(&mut self, program: &str, _args: &[String]) -> Result<String> {
            panic!("simulated dispatch must not run commands, ran {program}");
        }
    }

    #[test]
    fn test_activation_args() {
        assert_eq!(
            activation_args(Activation::Enable, "0.0.0190"),
            vec!["--enable", "0.0.0190"]
        );
        assert_eq!(
            activation_args(Activation::Disable, "0.0.0190"),
            vec!["--disable", "0.0.0190"]
        );
    }

    #[test]
    fn test_simulated_enable_sets_on_and_pers() {
        let mut source =
            InventorySource::Simulated(SimulatedInventory::from_stock().unwrap());
        apply(&mut source, &mut NoRunner, Activation::Enable, "0.0.0190").unwrap();
        let device = source.registry().get("0.0.0190").unwrap();
        assert!(device.on);
        assert!(device.pers);
    }

    #[test]
    fn test_simulated_disable_clears_on_and_pers() {
        let mut source =
            InventorySource::Simulated(SimulatedInventory::from_stock().unwrap());
        apply(&mut source, &mut NoRunner, Activation::Disable, "0.0.0200").unwrap();
        let device = source.registry().get("0.0.0200").unwrap();
        assert!(!device.on);
        assert!(!device.pers);
    }

    #[test]
    fn test_simulated_unknown_device() {
        let mut source =
            InventorySource::Simulated(SimulatedInventory::from_stock().unwrap());
        let err =
            apply(&mut source, &mut NoRunner, Activation::Enable, "0.0.ffff").unwrap_err();
        assert_eq!(
            err,
            ZdevError::UnknownDevice {
                id: "0.0.ffff".to_string()
            }
        );
    }

    #[test]
    fn test_simulated_does_not_touch_failed_flag() {
        let mut source =
            InventorySource::Simulated(SimulatedInventory::from_stock().unwrap());
        let id = "0.0.0603:0.0.0604:0.0.0605";
        apply(&mut source, &mut NoRunner, Activation::Enable, id).unwrap();
        let device = source.registry().get(id).unwrap();
        assert!(device.on);
        assert!(device.pers);
        assert!(device.failed);
    }
}
