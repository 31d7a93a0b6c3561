//! Scoring module - flat per-row line clear points
//!
//! Every full row is worth the same amount; clearing several rows at once
//! earns no tiered bonus, and there are no drop points.

/// Points for clearing `rows` rows at `per_row` points each.
pub fn line_clear_score(rows: usize, per_row: u32) -> u32 {
    u32::try_from(rows)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_row)
}
