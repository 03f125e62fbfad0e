//! Log retrieval and attach parameters

use crate::error::{ApiError, Result};
use crate::query::{flag, QueryParams};
use crate::shape::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// How many trailing log lines to return
///
/// On the wire this is an integer where any non-positive value is the
/// "all lines" sentinel, so `0` and `-5` both decode to [`Tail::All`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Tail {
    /// Every available line
    #[default]
    All,
    /// The last N lines
    Last(NonZeroU64),
}

impl Tail {
    /// Wire value sent for [`Tail::All`]
    pub const ALL_LINES: i64 = 0;

    /// Largest line count the wire integer can carry
    pub const MAX_LINES: u64 = i64::MAX as u64;

    /// Last `n` lines; zero or negative means all lines
    pub fn last(n: i64) -> Self {
        u64::try_from(n)
            .ok()
            .and_then(NonZeroU64::new)
            .map_or(Tail::All, Tail::Last)
    }

    /// Line limit, or `None` when unbounded
    pub fn limit(self) -> Option<u64> {
        match self {
            Tail::All => None,
            Tail::Last(n) => Some(n.get()),
        }
    }
}

impl From<i64> for Tail {
    fn from(raw: i64) -> Self {
        Tail::last(raw)
    }
}

impl From<Tail> for i64 {
    fn from(tail: Tail) -> Self {
        match tail {
            Tail::All => Tail::ALL_LINES,
            Tail::Last(n) => i64::try_from(n.get()).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for Tail {
    /// Query form: `all` or a line count
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tail::All => f.write_str("all"),
            Tail::Last(n) => write!(f, "{}", n),
        }
    }
}

/// Parameters for retrieving container logs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogOptions {
    /// Keep the response open and stream new lines
    pub follow: bool,
    pub stdout: bool,
    pub stderr: bool,
    pub timestamps: bool,
    pub tail: Tail,
}

impl LogOptions {
    /// Both output streams, all lines
    pub fn new() -> Self {
        Self {
            stdout: true,
            stderr: true,
            ..Self::default()
        }
    }

    pub fn follow(mut self) -> Self {
        self.follow = true;
        self
    }

    pub fn timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    pub fn tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }

    /// Whether the read is a long-lived stream rather than a bounded response
    pub fn is_stream(&self) -> bool {
        self.follow
    }
}

impl Shape for LogOptions {
    const KIND: ShapeKind = ShapeKind::LogOptions;

    fn validate(&self) -> Result<()> {
        if !self.stdout && !self.stderr {
            return Err(ApiError::validation(
                Self::KIND.wire_name(),
                "Stdout",
                "or Stderr must be selected",
            ));
        }
        if let Some(n) = self.tail.limit().filter(|n| *n > Tail::MAX_LINES) {
            return Err(ApiError::validation(
                Self::KIND.wire_name(),
                "Tail",
                format!("{} exceeds {} lines", n, Tail::MAX_LINES),
            ));
        }
        Ok(())
    }
}

impl QueryParams for LogOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("follow", flag(self.follow)),
            ("stdout", flag(self.stdout)),
            ("stderr", flag(self.stderr)),
            ("timestamps", flag(self.timestamps)),
            ("tail", self.tail.to_string()),
        ]
    }
}

/// Parameters for attaching to a container's streams
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AttachOptions {
    /// Replay output produced before attaching
    pub logs: bool,
    /// Keep streaming after the replay
    pub stream: bool,
    pub stdin: bool,
    pub stdout: bool,
    pub stderr: bool,
}

impl AttachOptions {
    /// Stream stdout and stderr
    pub fn new() -> Self {
        Self {
            stream: true,
            stdout: true,
            stderr: true,
            ..Self::default()
        }
    }
}

impl Shape for AttachOptions {
    const KIND: ShapeKind = ShapeKind::AttachOptions;
}

impl QueryParams for AttachOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("logs", flag(self.logs)),
            ("stream", flag(self.stream)),
            ("stdin", flag(self.stdin)),
            ("stdout", flag(self.stdout)),
            ("stderr", flag(self.stderr)),
        ]
    }
}
