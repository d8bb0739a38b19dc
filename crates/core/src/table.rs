//! The shared participant table
//!
//! A [`Table`] is the whole record store content: a header row and the
//! participant rows, kept as text cells so columns the tracker does not know
//! about survive a rewrite untouched. [`Participant`] is a typed, read-only
//! view of one row.
//!
//! ## Column conventions
//!
//! | Column | Meaning |
//! |--------|---------|
//! | `ID Code` | participant key |
//! | `Name` | display name |
//! | `Assigned Day` | dates on which day-gated activities are allowed |
//! | per activity | status (`Yes` when done) and timestamp |

use crate::types::{Activity, IdCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Header of the key column
pub const ID_COLUMN: &str = "ID Code";
/// Header of the display-name column
pub const NAME_COLUMN: &str = "Name";
/// Header of the assigned-days column
pub const ASSIGNED_DAY_COLUMN: &str = "Assigned Day";
/// Status value marking an activity as done
pub const DONE: &str = "Yes";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Structural problems with table content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The header has no `ID Code` column
    #[error("table has no '{}' column", ID_COLUMN)]
    MissingIdColumn,

    /// A row has more cells than the header has columns
    #[error("row {row} has {width} cells, header has {expected}")]
    RaggedRow {
        /// Zero-based data row index
        row: usize,
        /// Cells found
        width: usize,
        /// Header width
        expected: usize,
    },
}

/// Ordered participant rows under a header
///
/// Header names are kept verbatim; lookups by name ignore surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Unchecked wire shape of [`Table`], validated through [`Table::new`]
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::new(raw.columns, raw.rows)
    }
}

impl Table {
    /// Build a table, padding short rows with empty cells
    ///
    /// Fails if the header lacks `ID Code` or a row is wider than the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if !columns.iter().any(|c| c.trim() == ID_COLUMN) {
            return Err(TableError::MissingIdColumn);
        }
        let width = columns.len();
        let mut padded = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(TableError::RaggedRow {
                    row: i,
                    width: row.len(),
                    expected: width,
                });
            }
            row.resize(width, String::new());
            padded.push(row);
        }
        Ok(Table {
            columns,
            rows: padded,
        })
    }

    /// Header names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw rows, each as wide as the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of participant rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no participant rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == name)
    }

    /// Cell content, `None` if the column does not exist
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Row index of the first participant whose ID matches
    pub fn find(&self, id: &IdCode) -> Option<usize> {
        let col = self.column_index(ID_COLUMN)?;
        self.rows.iter().position(|r| id.matches(&r[col]))
    }

    /// Typed view of the participant with this ID
    pub fn participant(&self, id: &IdCode) -> Option<Participant> {
        self.find(id).map(|row| self.participant_at(row))
    }

    /// Typed view of every row
    pub fn participants(&self) -> impl Iterator<Item = Participant> + '_ {
        (0..self.rows.len()).map(move |row| self.participant_at(row))
    }

    /// Typed view of the row at `row`
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn participant_at(&self, row: usize) -> Participant {
        let text = |column: &str| self.cell(row, column).unwrap_or("").trim().to_string();
        let activities = Activity::ALL
            .into_iter()
            .map(|activity| {
                let done = text(activity.status_column()).eq_ignore_ascii_case(DONE);
                let stamp = text(activity.timestamp_column());
                let state = ActivityState {
                    done,
                    timestamp: (!stamp.is_empty()).then_some(stamp),
                };
                (activity, state)
            })
            .collect();
        Participant {
            id: text(ID_COLUMN),
            name: text(NAME_COLUMN),
            assigned: AssignedDays::parse(&text(ASSIGNED_DAY_COLUMN)),
            activities,
        }
    }

    /// Overwrite one cell, appending the column if it does not exist yet
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn set_cell(&mut self, row: usize, column: &str, value: &str) {
        let col = match self.column_index(column) {
            Some(col) => col,
            None => {
                self.columns.push(column.to_string());
                for r in &mut self.rows {
                    r.push(String::new());
                }
                self.columns.len() - 1
            }
        };
        self.rows[row][col] = value.to_string();
    }

    /// Mark `activity` done for the row at `row` with the given timestamp
    pub fn record(&mut self, row: usize, activity: Activity, timestamp: &str) {
        self.set_cell(row, activity.status_column(), DONE);
        self.set_cell(row, activity.timestamp_column(), timestamp);
    }

    /// Number of participants with `activity` done
    pub fn count_done(&self, activity: Activity) -> usize {
        let Some(col) = self.column_index(activity.status_column()) else {
            return 0;
        };
        self.rows
            .iter()
            .filter(|r| r[col].trim().eq_ignore_ascii_case(DONE))
            .count()
    }
}

/// Status of one activity for one participant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityState {
    /// Status is `Yes`
    pub done: bool,
    /// Recorded time, verbatim from the table
    pub timestamp: Option<String>,
}

/// Read-only view of one participant row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// ID code as stored (not normalized)
    pub id: String,
    /// Display name
    pub name: String,
    /// Days on which day-gated activities are permitted
    pub assigned: AssignedDays,
    /// Per-activity status
    pub activities: BTreeMap<Activity, ActivityState>,
}

impl Participant {
    /// Name for messages, falling back to the ID code when the name is blank
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Whether `activity` is already recorded
    pub fn is_done(&self, activity: Activity) -> bool {
        self.activities.get(&activity).map_or(false, |s| s.done)
    }

    /// Recorded timestamp for `activity`, if any
    pub fn timestamp(&self, activity: Activity) -> Option<&str> {
        self.activities
            .get(&activity)
            .and_then(|s| s.timestamp.as_deref())
    }
}

/// Dates listed in a participant's `Assigned Day` cell
///
/// Tokens are separated by commas and/or whitespace. An empty list means the
/// participant is unrestricted. Tokens are kept as written; one that is not a
/// `YYYY-MM-DD` date never matches, so a malformed cell restricts rather than
/// opens access.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignedDays(Vec<String>);

impl AssignedDays {
    /// Split a raw cell into day tokens
    pub fn parse(cell: &str) -> Self {
        AssignedDays(
            cell.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// No day restriction
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `day` is one of the listed dates
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.dates().any(|d| d == day)
    }

    /// Listed tokens that parse as dates
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0
            .iter()
            .filter_map(|t| NaiveDate::parse_from_str(t, DATE_FORMAT).ok())
    }

    /// Raw tokens
    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}
