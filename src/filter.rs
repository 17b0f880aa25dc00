// Pre-aggregation dataset filters: game level, pitcher handedness, date range.

use crate::config::FilterDefaults;
use crate::event::{GameLevel, Handedness, PlateAppearanceEvent};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("empty {field} selection: enable at least one option")]
    EmptySelection { field: &'static str },
}

/// Which game levels to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSelection {
    pub a: bool,
    pub b: bool,
}

impl Default for LevelSelection {
    fn default() -> Self {
        LevelSelection { a: true, b: true }
    }
}

impl LevelSelection {
    fn admits(&self, level: GameLevel) -> bool {
        match level {
            GameLevel::A => self.a,
            GameLevel::B => self.b,
        }
    }
}

/// Which pitcher handedness to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowsSelection {
    pub right: bool,
    pub left: bool,
}

impl Default for ThrowsSelection {
    fn default() -> Self {
        ThrowsSelection {
            right: true,
            left: true,
        }
    }
}

impl ThrowsSelection {
    fn admits(&self, throws: Handedness) -> bool {
        match throws {
            Handedness::Right => self.right,
            Handedness::Left => self.left,
        }
    }
}

/// The full filter selection applied to the combined dataset before
/// aggregation. Date bounds are inclusive; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub levels: LevelSelection,
    pub throws: ThrowsSelection,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterSelection {
    pub fn from_config(defaults: &FilterDefaults) -> FilterSelection {
        FilterSelection {
            levels: LevelSelection {
                a: defaults.level_a,
                b: defaults.level_b,
            },
            throws: ThrowsSelection {
                right: defaults.vs_right,
                left: defaults.vs_left,
            },
            start_date: defaults.start_date,
            end_date: defaults.end_date,
        }
    }

    /// Keep events matching every active criterion.
    ///
    /// Deselecting both options of a criterion is a caller error (it can
    /// only ever produce an empty dashboard); an empty *result* from a
    /// valid selection is fine.
    pub fn apply(
        &self,
        events: &[PlateAppearanceEvent],
    ) -> Result<Vec<PlateAppearanceEvent>, FilterError> {
        if !self.levels.a && !self.levels.b {
            return Err(FilterError::EmptySelection {
                field: "game level",
            });
        }
        if !self.throws.right && !self.throws.left {
            return Err(FilterError::EmptySelection {
                field: "pitcher handedness",
            });
        }

        Ok(events
            .iter()
            .filter(|e| self.levels.admits(e.level))
            .filter(|e| self.throws.admits(e.pitcher_throws))
            .filter(|e| self.start_date.map_or(true, |start| e.date >= start))
            .filter(|e| self.end_date.map_or(true, |end| e.date <= end))
            .cloned()
            .collect())
    }
}

/// Earliest and latest event date in the dataset, or `None` when empty.
pub fn date_bounds(events: &[PlateAppearanceEvent]) -> Option<(NaiveDate, NaiveDate)> {
    let min = events.iter().map(|e| e.date).min()?;
    let max = events.iter().map(|e| e.date).max()?;
    Some((min, max))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PlayResult;

    fn make_event(
        batter: &str,
        throws: Handedness,
        level: GameLevel,
        date: (i32, u32, u32),
    ) -> PlateAppearanceEvent {
        PlateAppearanceEvent {
            batter: batter.to_string(),
            team: "TOK".to_string(),
            pitcher_throws: throws,
            level,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            result: PlayResult::Single,
        }
    }

    fn sample_events() -> Vec<PlateAppearanceEvent> {
        vec![
            make_event("Sato", Handedness::Right, GameLevel::A, (2025, 3, 1)),
            make_event("Tanaka", Handedness::Left, GameLevel::A, (2025, 3, 5)),
            make_event("Suzuki", Handedness::Right, GameLevel::B, (2025, 3, 10)),
            make_event("Kobayashi", Handedness::Left, GameLevel::B, (2025, 3, 15)),
        ]
    }

    #[test]
    fn default_selection_keeps_everything() {
        let events = sample_events();
        let kept = FilterSelection::default().apply(&events).unwrap();
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn level_filter() {
        let events = sample_events();
        let selection = FilterSelection {
            levels: LevelSelection { a: true, b: false },
            ..Default::default()
        };
        let kept = selection.apply(&events).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.level == GameLevel::A));
    }

    #[test]
    fn throws_filter() {
        let events = sample_events();
        let selection = FilterSelection {
            throws: ThrowsSelection {
                right: false,
                left: true,
            },
            ..Default::default()
        };
        let kept = selection.apply(&events).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.pitcher_throws == Handedness::Left));
    }

    #[test]
    fn date_range_is_inclusive() {
        let events = sample_events();
        let selection = FilterSelection {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 5),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            ..Default::default()
        };
        let kept = selection.apply(&events).unwrap();
        let batters: Vec<&str> = kept.iter().map(|e| e.batter.as_str()).collect();
        assert_eq!(batters, vec!["Tanaka", "Suzuki"]);
    }

    #[test]
    fn open_ended_date_range() {
        let events = sample_events();
        let selection = FilterSelection {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            ..Default::default()
        };
        let kept = selection.apply(&events).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn no_level_selected_is_an_error() {
        let events = sample_events();
        let selection = FilterSelection {
            levels: LevelSelection { a: false, b: false },
            ..Default::default()
        };
        assert!(matches!(
            selection.apply(&events),
            Err(FilterError::EmptySelection { field: "game level" })
        ));
    }

    #[test]
    fn no_handedness_selected_is_an_error() {
        let events = sample_events();
        let selection = FilterSelection {
            throws: ThrowsSelection {
                right: false,
                left: false,
            },
            ..Default::default()
        };
        assert!(matches!(
            selection.apply(&events),
            Err(FilterError::EmptySelection {
                field: "pitcher handedness"
            })
        ));
    }

    #[test]
    fn valid_selection_may_yield_empty_result() {
        let events = sample_events();
        let selection = FilterSelection {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..Default::default()
        };
        let kept = selection.apply(&events).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn date_bounds_of_dataset() {
        let events = sample_events();
        let (min, max) = date_bounds(&events).unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn date_bounds_empty_dataset() {
        assert!(date_bounds(&[]).is_none());
    }
}
