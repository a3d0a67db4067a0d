//! JSON record of the most recent export.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::export::ExportError;
use crate::models::ExportFormat;

/// Default export log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "scholarsift_export_log.json";

/// One export event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLogEntry {
    /// Tool that wrote the export
    pub tool: String,
    /// Always `"export"`
    pub action: String,
    /// Format display name
    pub format: String,
    /// Number of papers written
    pub count: usize,
    /// Local ISO-8601 time of the export
    pub time: String,
}

impl ExportLogEntry {
    /// Describe an export that just happened
    pub fn export(format: ExportFormat, count: usize) -> Self {
        Self {
            tool: crate::TOOL_NAME.to_string(),
            action: "export".to_string(),
            format: format.name().to_string(),
            count,
            time: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        }
    }

    /// Overwrite `path` with this entry as pretty-printed JSON
    pub fn write(&self, path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
