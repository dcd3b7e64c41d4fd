//! Cookbook Status Tool
//!
//! Provides runtime status information about the Cookbook service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::store::{Cookbook, EntryCounts};

/// Usage instructions for AI assistants
pub const COOKBOOK_INSTRUCTIONS: &str = r#"
# Cookbook Instructions

## Entries

There are two kinds of entry. Names are unique across both kinds.

**Ingredient** - atomic, with a whole-number cook time per unit:

```json
{ "type": "ingredient", "name": "Egg", "cookTime": 5 }
```

**Recipe** - built from other entries by name:

```json
{ "type": "recipe", "name": "Omelette", "requiredItems": [{ "name": "Egg", "quantity": 2 }] }
```

- `cookTime` must be 0 or more
- Each name may appear only once in `requiredItems`
- Required items may name entries that do not exist yet; they must exist by the time you summarize
- Entries cannot be edited or deleted once added

## Summaries

`get_summary` expands a recipe down to its ingredients for one unit:

- Quantities multiply down through nested recipes
- An ingredient reached through several paths is summed
- `cookTime` is the sum of quantity x cookTime over all ingredients
- Fails if the name is missing, is an ingredient, requires a missing entry, or depends on itself

Ingredient order in a summary follows first use and is not guaranteed.

## Names

Use `parse_handwriting` to clean up a scrawled name (e.g. "alpHa-alFRedo" -> "Alpha Alfredo")
before adding it.
"#;

/// Runtime status of the Cookbook service
#[derive(Debug, Clone, Serialize)]
pub struct CookbookStatus {
    pub build: BuildInfo,

    /// Store information
    pub entries: EntryCounts,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, cookbook: &Cookbook) -> Result<CookbookStatus, String> {
        let entries = cookbook
            .counts()
            .map_err(|e| format!("Store error: {}", e))?;

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        Ok(CookbookStatus {
            build: BuildInfo::current(),
            entries,
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        })
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
