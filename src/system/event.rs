//! Daemon lifecycle events

use crate::error::{require, Result};
use crate::shape::{Shape, ShapeKind};
use crate::time::from_epoch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One event from the daemon's event stream
///
/// The daemon writes event keys in lowercase; both spellings decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Event {
    /// Container or image the event is about
    #[serde(alias = "id")]
    pub id: String,
    /// Event keyword, e.g. `create`, `start`, `die`
    #[serde(alias = "status")]
    pub status: String,
    /// Image the subject was created from
    #[serde(alias = "from")]
    pub from: String,
    /// Epoch seconds
    #[serde(alias = "time")]
    pub time: i64,
}

impl Event {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        from_epoch(self.time)
    }
}

impl Shape for Event {
    const KIND: ShapeKind = ShapeKind::Event;

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Status", &self.status)
    }
}
