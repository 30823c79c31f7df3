//! Error taxonomy for device inventory and activation.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ZdevError>;

/// Errors for device inventory and activation operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ZdevError {
    /// A device record line did not match the `key="value"` pair format.
    #[error("malformed device record: {detail}")]
    MalformedRecord { detail: String },

    /// An external command could not be spawned or exited non-zero.
    #[error("command failed: {command}: {detail}")]
    CommandFailed { command: String, detail: String },

    /// A device id was not present in the simulated registry.
    ///
    /// Ids always originate from a prior snapshot, so this indicates a
    /// caller contract violation rather than a user-facing condition.
    #[error("unknown device: {id}")]
    UnknownDevice { id: String },

    /// A dry-run snapshot file could not be read.
    #[error("cannot read snapshot {path}: {detail}")]
    SnapshotIo { path: String, detail: String },
}
