use serde::{Deserialize, Serialize};

/// One input row, reduced to its four semantic roles.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Entity (compound) identifier; `None` for a blank cell.
    pub entity: Option<String>,
    /// Ordinal time coordinate; `None` for a blank cell.
    pub time: Option<f64>,
    /// Measured value; `None` for a blank cell.
    pub value: Option<f64>,
    /// Group label used for line color and table columns.
    pub group: String,
}

impl Record {
    /// Convenience constructor for a fully populated row.
    pub fn new(entity: &str, time: f64, value: f64, group: &str) -> Self {
        Self {
            entity: Some(entity.to_string()),
            time: Some(time),
            value: Some(value),
            group: group.to_string(),
        }
    }
}

/// Caller-provided mapping from semantic role to column header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    /// Entity identifier column.
    pub entity: String,
    /// Time (x-axis) column.
    pub time: String,
    /// Value (y-axis) column.
    pub value: String,
    /// Group (color) column.
    pub group: String,
}

/// Partially specified [`ColumnRoles`]; unset roles are auto-detected from headers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleHints {
    /// Entity identifier column.
    pub entity: Option<String>,
    /// Time column.
    pub time: Option<String>,
    /// Value column.
    pub value: Option<String>,
    /// Group column.
    pub group: Option<String>,
}

impl RoleHints {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merged(self, other: RoleHints) -> RoleHints {
        RoleHints {
            entity: other.entity.or(self.entity),
            time: other.time.or(self.time),
            value: other.value.or(self.value),
            group: other.group.or(self.group),
        }
    }
}

/// Ordered record set, input row order preserved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap records in input order.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Borrow all records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Render an ordinal number the way it appears in tick and row labels: integral values
/// without a fractional part, everything else in shortest round-trip form.
pub fn format_ordinal(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
