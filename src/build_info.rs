//! Build metadata
//!
//! build.rs stamps each compile with a counter and a UTC time. Builds that
//! skip the script (or stamp garbage) are reported as dev builds.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const STAMPED_NUMBER: Option<&str> = option_env!("COOKBOOK_BUILD_NUMBER");
const STAMPED_TIME: Option<&str> = option_env!("COOKBOOK_BUILD_TIMESTAMP");
const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// What this binary knows about how it was built
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: Option<u64>,
    pub compiled_at: Option<DateTime<Utc>>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamps(STAMPED_NUMBER, STAMPED_TIME)
    }

    fn from_stamps(number: Option<&str>, time: Option<&str>) -> Self {
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()),
            compiled_at: time
                .and_then(|t| NaiveDateTime::parse_from_str(t.trim(), STAMP_FORMAT).ok())
                .map(|t| t.and_utc()),
        }
    }

    /// One-line description, e.g. `cookbook 1.0.0 (build 42, 2026-01-01T00:00:00Z)`
    pub fn label(&self) -> String {
        match (self.build_number, self.compiled_at) {
            (Some(n), Some(at)) => format!(
                "cookbook {} (build {}, {})",
                self.version,
                n,
                at.format(STAMP_FORMAT)
            ),
            (Some(n), None) => format!("cookbook {} (build {})", self.version, n),
            _ => format!("cookbook {} (dev build)", self.version),
        }
    }
}

/// Print the startup banner to stderr (stdout belongs to the MCP transport)
pub fn print_startup_banner() {
    eprintln!("{}", BuildInfo::current().label());
}
