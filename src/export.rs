use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::IatError;
use crate::timeline::Timeline;

/// Serialized handoff to the presentation runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineExport {
    /// When the export was built.
    pub generated_at: DateTime<Utc>,
    /// Seed the timeline was generated from.
    pub seed: u64,
    /// The timeline, flattened into the top-level object.
    #[serde(flatten)]
    pub timeline: Timeline,
}

impl TimelineExport {
    /// Stamp `timeline` with the current time.
    pub fn new(seed: u64, timeline: Timeline) -> Self {
        Self {
            generated_at: Utc::now(),
            seed,
            timeline,
        }
    }

    /// Pretty JSON.
    pub fn to_json(&self) -> Result<String, IatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously written export.
    pub fn from_json(raw: &str) -> Result<Self, IatError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Write pretty JSON to `path`, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IatError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_vec_pretty(self)?;
        fs::write(path, raw)?;
        info!(path = %path.display(), nodes = self.timeline.nodes.len(), "wrote timeline export");
        Ok(())
    }
}
