// Per-batter aggregation: team scope, group-by, rate stats, ordering.

use crate::event::PlateAppearanceEvent;
use crate::stats::rates::{BattingLine, ObpFormula};
use std::collections::HashMap;

/// One output row per batter, fields in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatterSummary {
    pub batter: String,
    pub batting_average: f64,
    pub on_base_percentage: f64,
    pub slugging_average: f64,
    pub ops: f64,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
}

/// Aggregate plate-appearance events into one summary row per batter.
///
/// Only events whose team identity exactly matches `team` are counted
/// (case-sensitive). Events with an empty batter identity cannot be
/// grouped and are dropped. The result is sorted descending by OPS;
/// equal OPS resolves by batter identity ascending so the output order
/// is reproducible run to run. An empty result is not an error.
pub fn aggregate(
    events: &[PlateAppearanceEvent],
    team: &str,
    formula: ObpFormula,
) -> Vec<BatterSummary> {
    // One pass: batter identity -> append-only list of that batter's events.
    let mut groups: HashMap<&str, Vec<&PlateAppearanceEvent>> = HashMap::new();
    for event in events {
        if event.team != team {
            continue;
        }
        if event.batter.is_empty() {
            continue;
        }
        groups.entry(event.batter.as_str()).or_default().push(event);
    }

    let mut summaries: Vec<BatterSummary> = groups
        .into_iter()
        .map(|(batter, group)| {
            let line = BattingLine::from_events(group.iter().copied());
            BatterSummary {
                batter: batter.to_string(),
                batting_average: line.batting_average(),
                on_base_percentage: line.on_base_percentage(formula),
                slugging_average: line.slugging_average(),
                ops: line.ops(formula),
                plate_appearances: line.plate_appearances,
                at_bats: line.at_bats,
                hits: line.hits(),
                singles: line.singles,
                doubles: line.doubles,
                triples: line.triples,
                home_runs: line.home_runs,
                walks: line.walks,
                strikeouts: line.strikeouts,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.ops
            .partial_cmp(&a.ops)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.batter.cmp(&b.batter))
    });

    summaries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
