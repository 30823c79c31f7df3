//! External command execution seam.
//!
//! All process execution funnels through the [`CommandRunner`] trait so
//! that tests (and the CLI's dry-run mode) can substitute a fake without
//! touching real hardware tools.

use std::process::Command;

use tracing::debug;

use crate::error::{Result, ZdevError};

/// Columns requested from the enumeration tool, in output order.
pub const LSZDEV_COLUMNS: &str = "id,type,on,exists,pers,auto,failed,names";

/// Program names (or paths) of the external device tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Enumeration tool.
    pub lszdev: String,
    /// Activation tool.
    pub chzdev: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            lszdev: "lszdev".to_string(),
            chzdev: "chzdev".to_string(),
        }
    }
}

/// Argument list for the enumeration command.
pub fn enumeration_args() -> Vec<String> {
    vec![
        "--pairs".to_string(),
        "--columns".to_string(),
        LSZDEV_COLUMNS.to_string(),
    ]
}

/// Runs an external program and captures its standard output.
pub trait CommandRunner {
    /// Run `program` with `args`; return captured stdout on exit code 0.
    fn run(&mut self, program: &str, args: &[String]) -> Result<String>;
}

/// [`CommandRunner`] that spawns the real process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<String> {
        debug!(command = %program, ?args, "running external command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ZdevError::CommandFailed {
                command: program.to_string(),
                detail: format!("failed to spawn: {e}"),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ZdevError::CommandFailed {
                command: program.to_string(),
                detail: format!("{}: {}", output.status, stderr.trim()),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
