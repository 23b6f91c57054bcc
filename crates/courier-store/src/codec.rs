//! Compact text encodings for trace columns.
//!
//! History and route-plan columns store their lists as flat text so the rows
//! stay greppable with the sqlite3 shell:
//!
//! ```text
//! history: "Austin|1700000000,Dallas|1700003600,DELIVERED|1700010800"
//! plan:    "Dallas,Houston"
//! ```
//!
//! Labels must not contain `,`; a history label must also keep its last `|`
//! for the timestamp.  City names and the fixed event markers satisfy both.

use courier_dispatch::TraceEntry;

use crate::error::{DepotError, DepotResult};

/// Render a history trace into its column form.  Empty history → `""`.
pub fn encode_history(history: &[TraceEntry]) -> String {
    let segments: Vec<String> = history
        .iter()
        .map(|entry| format!("{}|{}", entry.label, entry.at))
        .collect();
    segments.join(",")
}

/// Parse a history column.  The split on `|` is from the right, so a label
/// containing `|` still decodes as long as the timestamp is last.
pub fn parse_history(column: &str) -> DepotResult<Vec<TraceEntry>> {
    if column.is_empty() {
        return Ok(Vec::new());
    }
    column
        .split(',')
        .map(|segment| {
            let (label, at) = segment
                .rsplit_once('|')
                .ok_or_else(|| DepotError::Corrupt(format!("history segment {segment:?} has no timestamp")))?;
            let at: i64 = at
                .parse()
                .map_err(|_| DepotError::Corrupt(format!("history segment {segment:?} has a bad timestamp")))?;
            Ok(TraceEntry::new(label, at))
        })
        .collect()
}

/// Render a route plan into its column form.  Empty plan → `""`.
pub fn encode_plan(plan: &[String]) -> String {
    plan.join(",")
}

/// Parse a route-plan column.
pub fn parse_plan(column: &str) -> Vec<String> {
    if column.is_empty() {
        return Vec::new();
    }
    column.split(',').map(str::to_owned).collect()
}
