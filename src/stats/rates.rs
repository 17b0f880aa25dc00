// Per-batter counting and rate statistics.

use crate::event::{PlateAppearanceEvent, PlayResult};
use crate::stats::classify;

// ---------------------------------------------------------------------------
// OBP formula variant
// ---------------------------------------------------------------------------

/// Which events beyond hits and walks count toward on-base percentage.
///
/// The variant is an explicit configuration value rather than a hidden
/// default at the call site; `WalksOnly` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObpFormula {
    /// (H + BB) / (AB + BB)
    #[default]
    WalksOnly,
    /// (H + BB + HBP) / (AB + BB + HBP)
    WithHitByPitch,
}

impl ObpFormula {
    pub fn from_flag(include_hit_by_pitch: bool) -> ObpFormula {
        if include_hit_by_pitch {
            ObpFormula::WithHitByPitch
        } else {
            ObpFormula::WalksOnly
        }
    }
}

// ---------------------------------------------------------------------------
// BattingLine
// ---------------------------------------------------------------------------

/// Counted outcomes for one batter's plate appearances.
///
/// Rate stats are derived on demand. Every rate returns 0.0 when its
/// denominator is zero, never NaN and never a fault, so downstream
/// sorting stays total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattingLine {
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub hit_by_pitches: u32,
}

impl BattingLine {
    /// Count all events in one pass.
    pub fn from_events<'a, I>(events: I) -> BattingLine
    where
        I: IntoIterator<Item = &'a PlateAppearanceEvent>,
    {
        let mut line = BattingLine::default();
        for event in events {
            line.record(event.result);
        }
        line
    }

    /// Count one classified play result.
    pub fn record(&mut self, result: PlayResult) {
        if classify::is_plate_appearance(result) {
            self.plate_appearances += 1;
        }
        if classify::is_at_bat(result) {
            self.at_bats += 1;
        }
        match result {
            PlayResult::Single => self.singles += 1,
            PlayResult::Double => self.doubles += 1,
            PlayResult::Triple => self.triples += 1,
            PlayResult::HomeRun => self.home_runs += 1,
            PlayResult::Walk => self.walks += 1,
            PlayResult::Strikeout => self.strikeouts += 1,
            PlayResult::HitByPitch => self.hit_by_pitches += 1,
            PlayResult::Sacrifice
            | PlayResult::Out
            | PlayResult::Error
            | PlayResult::FieldersChoice
            | PlayResult::Unrecognized => {}
        }
    }

    pub fn hits(&self) -> u32 {
        self.singles + self.doubles + self.triples + self.home_runs
    }

    pub fn total_bases(&self) -> u32 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    /// H / AB.
    pub fn batting_average(&self) -> f64 {
        ratio(self.hits(), self.at_bats)
    }

    /// Fraction of chances in which the batter reached base, per the
    /// configured formula variant.
    pub fn on_base_percentage(&self, formula: ObpFormula) -> f64 {
        let extra = match formula {
            ObpFormula::WalksOnly => 0,
            ObpFormula::WithHitByPitch => self.hit_by_pitches,
        };
        ratio(
            self.hits() + self.walks + extra,
            self.at_bats + self.walks + extra,
        )
    }

    /// Total bases / AB.
    pub fn slugging_average(&self) -> f64 {
        ratio(self.total_bases(), self.at_bats)
    }

    /// On-base percentage plus slugging average.
    pub fn ops(&self, formula: ObpFormula) -> f64 {
        self.on_base_percentage(formula) + self.slugging_average()
    }
}

/// Rate with an explicit zero-denominator policy: 0.0, not NaN.
fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
