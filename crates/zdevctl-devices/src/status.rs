//! Device status classification.

use serde::Serialize;

use crate::record::DeviceRecord;

/// Display status derived from a record's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// Last activation attempt failed.
    Failed,
    /// Active because of automatic boot-time activation.
    Auto,
    /// Active with persistent configuration.
    Online,
    /// Present but neither active nor flagged.
    Blank,
}

impl DeviceStatus {
    /// Classify a record; total, first match wins.
    ///
    /// A failed device always surfaces as failed even when also flagged
    /// auto or persistent, and auto outranks plain persistent-online.
    pub fn classify(record: &DeviceRecord) -> Self {
        if record.failed {
            Self::Failed
        } else if record.auto && record.on {
            Self::Auto
        } else if record.pers && record.on {
            Self::Online
        } else {
            Self::Blank
        }
    }

    /// Untranslated display label; translation and color are the view
    /// layer's concern.
    pub fn label(self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::Auto => "auto",
            Self::Online => "online",
            Self::Blank => "",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
