// Plate-appearance event model and CSV decoding.
//
// Reads TrackMan-style per-game CSVs: one row per completed plate
// appearance with Batter, BatterTeam, PitcherThrows, Level, Date and
// PlayResult columns. Extra columns are ignored.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The play-result vocabulary for a completed plate appearance.
///
/// `Unrecognized` absorbs any code outside the known vocabulary: such an
/// event still counts as a plate appearance but never as an at-bat or a
/// named outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    Strikeout,
    Sacrifice,
    HitByPitch,
    Out,
    Error,
    FieldersChoice,
    Unrecognized,
}

impl PlayResult {
    /// Parse a raw play-result code. Unknown codes map to `Unrecognized`
    /// rather than failing, so one bad code never aborts a whole file.
    pub fn parse(code: &str) -> PlayResult {
        match code.trim() {
            "Single" => PlayResult::Single,
            "Double" => PlayResult::Double,
            "Triple" => PlayResult::Triple,
            "HomeRun" => PlayResult::HomeRun,
            "Walk" => PlayResult::Walk,
            "Strikeout" => PlayResult::Strikeout,
            "Sacrifice" => PlayResult::Sacrifice,
            "HitByPitch" => PlayResult::HitByPitch,
            "Out" => PlayResult::Out,
            "Error" => PlayResult::Error,
            "FieldersChoice" => PlayResult::FieldersChoice,
            _ => PlayResult::Unrecognized,
        }
    }
}

/// Which side the pitcher throws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Right,
    Left,
}

impl Handedness {
    pub fn parse(value: &str) -> Option<Handedness> {
        match value.trim() {
            "Right" => Some(Handedness::Right),
            "Left" => Some(Handedness::Left),
            _ => None,
        }
    }
}

/// Game classification (A games vs. B games).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameLevel {
    A,
    B,
}

impl GameLevel {
    pub fn parse(value: &str) -> Option<GameLevel> {
        match value.trim() {
            "A" => Some(GameLevel::A),
            "B" => Some(GameLevel::B),
            _ => None,
        }
    }
}

/// One decoded plate-appearance event. Events are read-only inputs to the
/// stats engine; nothing in this crate mutates them after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateAppearanceEvent {
    pub batter: String,
    pub team: String,
    pub pitcher_throws: Handedness,
    pub level: GameLevel,
    pub date: NaiveDate,
    pub result: PlayResult,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Whole-file decode failures: the file's overall shape is wrong, as
/// opposed to row-level problems, which degrade row by row.
#[derive(Debug, thiserror::Error)]
pub enum EventDecodeError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column(s): {0}")]
    MissingColumns(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        source: EventDecodeError,
    },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw event CSV row. All fields are read as strings and parsed by hand so
/// that a bad value in one column drops only that row. Extra columns are
/// silently ignored via `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawEventRow {
    #[serde(default)]
    Batter: String,
    #[serde(default)]
    BatterTeam: String,
    PitcherThrows: String,
    Level: String,
    Date: String,
    PlayResult: String,
    /// Absorb any extra columns the tracking system includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Columns every event CSV must carry. A bad value degrades row by row,
/// but a file without these columns is rejected outright.
const REQUIRED_COLUMNS: [&str; 6] = [
    "Batter",
    "BatterTeam",
    "PitcherThrows",
    "Level",
    "Date",
    "PlayResult",
];

/// Parse an event date, accepting the two formats seen in exported files.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .ok()
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Decode plate-appearance events from any reader (a downloaded file body,
/// an in-memory string in tests, or an open file).
///
/// Row-level problems degrade instead of aborting: rows with no batter
/// identity, an unknown handedness or level, or an unparseable date are
/// skipped with a warning; unknown play-result codes keep the row and
/// classify as `Unrecognized`. A file missing any required column is
/// rejected whole with `EventDecodeError::MissingColumns`.
pub fn load_events_from_reader<R: Read>(
    rdr: R,
) -> Result<Vec<PlateAppearanceEvent>, EventDecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(rdr);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .collect();
    if !missing.is_empty() {
        return Err(EventDecodeError::MissingColumns(missing.join(", ")));
    }

    let mut events = Vec::new();
    for result in reader.deserialize::<RawEventRow>() {
        match result {
            Ok(raw) => {
                let batter = raw.Batter.trim();
                if batter.is_empty() {
                    warn!("skipping row with missing batter identity");
                    continue;
                }
                let Some(pitcher_throws) = Handedness::parse(&raw.PitcherThrows) else {
                    warn!(
                        "skipping row for '{}': unknown PitcherThrows '{}'",
                        batter, raw.PitcherThrows
                    );
                    continue;
                };
                let Some(level) = GameLevel::parse(&raw.Level) else {
                    warn!("skipping row for '{}': unknown Level '{}'", batter, raw.Level);
                    continue;
                };
                let Some(date) = parse_date(&raw.Date) else {
                    warn!("skipping row for '{}': unparseable Date '{}'", batter, raw.Date);
                    continue;
                };
                let result = PlayResult::parse(&raw.PlayResult);
                if result == PlayResult::Unrecognized {
                    warn!(
                        "unrecognized PlayResult '{}' for '{}': counted as plate appearance only",
                        raw.PlayResult.trim(),
                        batter
                    );
                }
                events.push(PlateAppearanceEvent {
                    batter: batter.to_string(),
                    team: raw.BatterTeam.trim().to_string(),
                    pitcher_throws,
                    level,
                    date,
                    result,
                });
            }
            Err(e) => {
                warn!("skipping malformed event row: {}", e);
            }
        }
    }
    Ok(events)
}

/// Load plate-appearance events from a CSV file on disk.
pub fn load_events(path: &Path) -> Result<Vec<PlateAppearanceEvent>, EventError> {
    let file = std::fs::File::open(path).map_err(|e| EventError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_events_from_reader(file).map_err(|e| EventError::Decode {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_decoded() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
Sato,TOK,Right,A,2025-03-01,Single
Tanaka,TOK,Left,B,2025-03-02,Walk";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].batter, "Sato");
        assert_eq!(events[0].team, "TOK");
        assert_eq!(events[0].pitcher_throws, Handedness::Right);
        assert_eq!(events[0].level, GameLevel::A);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(events[0].result, PlayResult::Single);

        assert_eq!(events[1].result, PlayResult::Walk);
        assert_eq!(events[1].level, GameLevel::B);
    }

    #[test]
    fn extra_columns_ignored() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult,ExitSpeed,Angle
Sato,TOK,Right,A,2025-03-01,Double,102.3,28.5";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].result, PlayResult::Double);
    }

    #[test]
    fn unknown_play_result_kept_as_unrecognized() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
Sato,TOK,Right,A,2025-03-01,CaughtStealing";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].result, PlayResult::Unrecognized);
    }

    #[test]
    fn missing_batter_row_dropped() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
,TOK,Right,A,2025-03-01,Single
Sato,TOK,Right,A,2025-03-01,Single";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].batter, "Sato");
    }

    #[test]
    fn bad_date_row_dropped() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
Sato,TOK,Right,A,not-a-date,Single
Tanaka,TOK,Right,A,2025-03-05,Out";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].batter, "Tanaka");
    }

    #[test]
    fn slash_date_format_accepted() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
Sato,TOK,Right,A,2025/03/09,Triple";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }

    #[test]
    fn unknown_handedness_row_dropped() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
Sato,TOK,Both,A,2025-03-01,Single
Tanaka,TOK,Left,A,2025-03-01,Single";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].batter, "Tanaka");
    }

    #[test]
    fn unknown_level_row_dropped() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
Sato,TOK,Right,C,2025-03-01,Single";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn names_and_codes_trimmed() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult
  Sato  , TOK , Right , A , 2025-03-01 , Single ";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events[0].batter, "Sato");
        assert_eq!(events[0].team, "TOK");
        assert_eq!(events[0].result, PlayResult::Single);
    }

    #[test]
    fn empty_csv_returns_empty_vec() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date,PlayResult";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn missing_play_result_column_is_an_error() {
        let csv_data = "\
Batter,BatterTeam,PitcherThrows,Level,Date
Sato,TOK,Right,A,2025-03-01
Tanaka,TOK,Left,A,2025-03-01";

        let err = load_events_from_reader(csv_data.as_bytes()).unwrap_err();
        match err {
            EventDecodeError::MissingColumns(columns) => assert_eq!(columns, "PlayResult"),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn every_missing_column_reported() {
        let csv_data = "\
Batter,PitcherThrows,Level
Sato,Right,A";

        let err = load_events_from_reader(csv_data.as_bytes()).unwrap_err();
        match err {
            EventDecodeError::MissingColumns(columns) => {
                assert_eq!(columns, "BatterTeam, Date, PlayResult");
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn padded_headers_accepted() {
        let csv_data = "\
Batter , BatterTeam , PitcherThrows , Level , Date , PlayResult
Sato,TOK,Right,A,2025-03-01,Single";

        let events = load_events_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].batter, "Sato");
    }

    #[test]
    fn play_result_parse_vocabulary() {
        assert_eq!(PlayResult::parse("Single"), PlayResult::Single);
        assert_eq!(PlayResult::parse("Double"), PlayResult::Double);
        assert_eq!(PlayResult::parse("Triple"), PlayResult::Triple);
        assert_eq!(PlayResult::parse("HomeRun"), PlayResult::HomeRun);
        assert_eq!(PlayResult::parse("Walk"), PlayResult::Walk);
        assert_eq!(PlayResult::parse("Strikeout"), PlayResult::Strikeout);
        assert_eq!(PlayResult::parse("Sacrifice"), PlayResult::Sacrifice);
        assert_eq!(PlayResult::parse("HitByPitch"), PlayResult::HitByPitch);
        assert_eq!(PlayResult::parse("Out"), PlayResult::Out);
        assert_eq!(PlayResult::parse("Error"), PlayResult::Error);
        assert_eq!(PlayResult::parse("FieldersChoice"), PlayResult::FieldersChoice);
        assert_eq!(PlayResult::parse("homerun"), PlayResult::Unrecognized);
        assert_eq!(PlayResult::parse(""), PlayResult::Unrecognized);
    }
}
