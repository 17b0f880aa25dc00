// Plain-text rendering of the per-batter summary table.
//
// Column order follows the dashboard display contract: identity, the four
// rate stats, then the counting stats.

use crate::stats::aggregate::BatterSummary;
use std::fmt::Write;

const RATE_WIDTH: usize = 6;
const COUNT_WIDTH: usize = 4;

/// Render summaries as an aligned text table. Rate stats are shown with
/// three decimals; an empty input renders just the header.
pub fn render(summaries: &[BatterSummary]) -> String {
    let name_width = summaries
        .iter()
        .map(|s| s.batter.chars().count())
        .chain(std::iter::once("Batter".len()))
        .max()
        .unwrap_or(6);

    let mut out = String::new();

    let _ = write!(out, "{:<name_width$}", "Batter");
    for header in ["BA", "OBP", "SLG", "OPS"] {
        let _ = write!(out, "  {header:>RATE_WIDTH$}");
    }
    for header in ["PA", "AB", "H", "1B", "2B", "3B", "HR", "BB", "SO"] {
        let _ = write!(out, "  {header:>COUNT_WIDTH$}");
    }
    out.push('\n');

    for s in summaries {
        let _ = write!(out, "{:<name_width$}", s.batter);
        for rate in [
            s.batting_average,
            s.on_base_percentage,
            s.slugging_average,
            s.ops,
        ] {
            let _ = write!(out, "  {rate:>RATE_WIDTH$.3}");
        }
        for count in [
            s.plate_appearances,
            s.at_bats,
            s.hits,
            s.singles,
            s.doubles,
            s.triples,
            s.home_runs,
            s.walks,
            s.strikeouts,
        ] {
            let _ = write!(out, "  {count:>COUNT_WIDTH$}");
        }
        out.push('\n');
    }

    out
}
