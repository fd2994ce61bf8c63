//! JSON-lines adaptation journal.
//!
//! The entry points perform no I/O themselves; callers that want a record of
//! what was applied append one entry per call with [`log_adaptation`].

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::image::Image;

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationLogEntry {
    pub operation: String,
    pub timestamp_ms: u128,
    /// `[height, width, channels]` of the adapted image
    pub shape: [usize; 3],
    /// Blend weight, `beta` or blend ratio, depending on the operation
    pub parameter: f32,
    pub mean_before: Vec<f32>,
    pub mean_after: Vec<f32>,
}

impl AdaptationLogEntry {
    pub fn new(operation: &str, parameter: f32, before: &Image, after: &Image) -> Self {
        let (height, width, channels) = after.shape();
        Self {
            operation: operation.to_string(),
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
            shape: [height, width, channels],
            parameter,
            mean_before: before.channel_means(),
            mean_after: after.channel_means(),
        }
    }
}

/// Append one entry describing `before → after` to the journal at `path`,
/// creating the parent directory when needed.
pub fn log_adaptation<P: AsRef<Path>>(
    path: P,
    operation: &str,
    parameter: f32,
    before: &Image,
    after: &Image,
) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    append_json_line(path, &AdaptationLogEntry::new(operation, parameter, before, after))
}
