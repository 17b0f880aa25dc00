// Plate-appearance classification predicates.
//
// Pure functions of the play result: no side effects, never panic.

use crate::event::PlayResult;

/// Every recorded event is one completed plate appearance.
pub fn is_plate_appearance(_result: PlayResult) -> bool {
    true
}

/// Whether the plate appearance counts as an official at-bat.
///
/// Walks, sacrifices and hit-by-pitch are excluded per the standard
/// batting-average convention. Unrecognized codes are excluded as well:
/// they cannot be attributed to any at-bat outcome.
pub fn is_at_bat(result: PlayResult) -> bool {
    match result {
        PlayResult::Single
        | PlayResult::Double
        | PlayResult::Triple
        | PlayResult::HomeRun
        | PlayResult::Strikeout
        | PlayResult::Out
        | PlayResult::Error
        | PlayResult::FieldersChoice => true,
        PlayResult::Walk
        | PlayResult::Sacrifice
        | PlayResult::HitByPitch
        | PlayResult::Unrecognized => false,
    }
}

/// Whether the event's play result exactly matches the given outcome
/// (Single, Double, Triple, HomeRun, Walk or Strikeout).
pub fn is_outcome(result: PlayResult, outcome: PlayResult) -> bool {
    result == outcome
}
