use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;
use calamine::Reader as _;

use crate::data::record::{ColumnRoles, Dataset, Record, RoleHints, format_ordinal};
use crate::foundation::error::{ReportError, ReportResult};

/// One raw cell before role assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum RawCell {
    /// Blank cell.
    Empty,
    /// Numeric cell (workbooks only).
    Number(f64),
    /// Anything else, as text.
    Text(String),
}

impl RawCell {
    fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(v) => v.is_nan(),
        }
    }
}

/// A header row plus data rows, as read from one sheet or delimited file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows; rows may be shorter than `headers`.
    pub rows: Vec<Vec<RawCell>>,
}

/// Input file flavor, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Comma separated text.
    Csv,
    /// Tab separated text.
    Tsv,
    /// Spreadsheet workbook (xlsx, xlsm, xls, ods).
    Workbook,
}

impl SourceKind {
    /// Classify a path by its extension; unknown extensions read as CSV.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "tsv" | "tab" => Self::Tsv,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::Workbook,
            _ => Self::Csv,
        }
    }
}

/// Header keywords used when a role is not named explicitly. First hit wins.
const ENTITY_KEYWORDS: &[&str] = &["化合物", "compound", "entity"];
const TIME_KEYWORDS: &[&str] = &["天数", "day", "time"];
const VALUE_KEYWORDS: &[&str] = &["峰面积", "value", "area"];
const GROUP_KEYWORDS: &[&str] = &["培养基", "group", "medium"];

/// List sheet names. Delimited text files report a single sheet named after the file stem.
pub fn sheet_names(path: &Path) -> ReportResult<Vec<String>> {
    match SourceKind::from_path(path) {
        SourceKind::Workbook => {
            let wb = calamine::open_workbook_auto(path)
                .with_context(|| format!("open workbook '{}'", path.display()))?;
            Ok(wb.sheet_names().to_vec())
        }
        SourceKind::Csv | SourceKind::Tsv => Ok(vec![
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("data")
                .to_string(),
        ]),
    }
}

/// Default sheet: the first whose name contains `表` or `Sheet1`, else the first sheet.
pub fn pick_default_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|n| n.contains('表') || n.contains("Sheet1"))
        .or_else(|| names.first())
        .map(String::as_str)
}

/// Read one sheet (or the whole delimited file) into a [`RawTable`].
#[tracing::instrument]
pub fn read_table(path: &Path, sheet: Option<&str>) -> ReportResult<RawTable> {
    match SourceKind::from_path(path) {
        SourceKind::Csv => read_delimited_path(path, b','),
        SourceKind::Tsv => read_delimited_path(path, b'\t'),
        SourceKind::Workbook => read_workbook(path, sheet),
    }
}

fn read_delimited_path(path: &Path, delimiter: u8) -> ReportResult<RawTable> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    read_delimited(BufReader::new(f), delimiter)
}

/// Parse delimited text with a header row. All cells stay textual.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> ReportResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ReportError::input(format!("read header row: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.map_err(|e| ReportError::input(format!("read data row {}: {e}", idx + 2)))?;
        rows.push(
            record
                .iter()
                .map(|s| {
                    if s.trim().is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(s.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(RawTable { headers, rows })
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> ReportResult<RawTable> {
    let mut wb = calamine::open_workbook_auto(path)
        .with_context(|| format!("open workbook '{}'", path.display()))?;
    let names = wb.sheet_names().to_vec();
    let name = match sheet {
        Some(s) => {
            if !names.iter().any(|n| n == s) {
                return Err(ReportError::input(format!(
                    "sheet \"{s}\" not found (available: {})",
                    names.join(", ")
                )));
            }
            s.to_string()
        }
        None => pick_default_sheet(&names)
            .ok_or_else(|| ReportError::input("workbook has no sheets"))?
            .to_string(),
    };

    let range = wb
        .worksheet_range(&name)
        .map_err(|e| ReportError::input(format!("read sheet \"{name}\": {e}")))?;

    let mut it = range.rows();
    let headers = it
        .next()
        .ok_or_else(|| ReportError::input(format!("sheet \"{name}\" is empty")))?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect::<Vec<_>>();
    let rows = it
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    tracing::debug!(sheet = %name, "read workbook sheet");
    Ok(RawTable { headers, rows })
}

fn workbook_cell(cell: &calamine::Data) -> RawCell {
    use calamine::Data;
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Int(v) => RawCell::Number(*v as f64),
        Data::Float(v) => RawCell::Number(*v),
        Data::DateTime(v) => RawCell::Number(v.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::Error(e) => RawCell::Text(format!("#{e:?}")),
    }
}

impl RawTable {
    /// Resolve role hints against this table's headers.
    ///
    /// Named roles must exist verbatim. Unnamed roles take the first header containing one
    /// of the role's keywords, falling back to the first column.
    pub fn resolve_roles(&self, hints: &RoleHints) -> ReportResult<ColumnRoles> {
        if self.headers.is_empty() {
            return Err(ReportError::input("table has no columns"));
        }
        Ok(ColumnRoles {
            entity: self.resolve_one("entity", hints.entity.as_deref(), ENTITY_KEYWORDS)?,
            time: self.resolve_one("time", hints.time.as_deref(), TIME_KEYWORDS)?,
            value: self.resolve_one("value", hints.value.as_deref(), VALUE_KEYWORDS)?,
            group: self.resolve_one("group", hints.group.as_deref(), GROUP_KEYWORDS)?,
        })
    }

    fn resolve_one(
        &self,
        role: &str,
        named: Option<&str>,
        keywords: &[&str],
    ) -> ReportResult<String> {
        if let Some(name) = named {
            return match self.headers.iter().find(|h| h.as_str() == name) {
                Some(h) => Ok(h.clone()),
                None => Err(ReportError::input(format!(
                    "{role} column \"{name}\" not found"
                ))),
            };
        }
        let found = keywords.iter().find_map(|kw| {
            let kw = kw.to_lowercase();
            self.headers
                .iter()
                .find(|h| h.to_lowercase().contains(kw.as_str()))
        });
        Ok(found.unwrap_or(&self.headers[0]).clone())
    }

    fn column_index(&self, name: &str) -> ReportResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReportError::input(format!("column \"{name}\" not found")))
    }

    /// Apply role assignments and build the typed dataset.
    ///
    /// Fully blank rows are skipped. Rows with a blank entity are kept (they are dropped
    /// later by the paginator) and tolerate unparseable time/value cells.
    pub fn to_dataset(&self, roles: &ColumnRoles) -> ReportResult<Dataset> {
        let ie = self.column_index(&roles.entity)?;
        let it = self.column_index(&roles.time)?;
        let iv = self.column_index(&roles.value)?;
        let ig = self.column_index(&roles.group)?;

        let mut records = Vec::with_capacity(self.rows.len());
        for (row_idx, row) in self.rows.iter().enumerate() {
            let cell = |i: usize| row.get(i).unwrap_or(&RawCell::Empty);
            let (ce, ct, cv, cg) = (cell(ie), cell(it), cell(iv), cell(ig));
            if ce.is_blank() && ct.is_blank() && cv.is_blank() && cg.is_blank() {
                continue;
            }

            let entity = cell_label(ce);
            // Spreadsheet row number: header is row 1.
            let line = row_idx + 2;
            let (time, value) = if entity.is_some() {
                (
                    cell_number(ct).map_err(|raw| {
                        ReportError::input(format!(
                            "row {line}: time column \"{}\" is not numeric: \"{raw}\"",
                            roles.time
                        ))
                    })?,
                    cell_number(cv).map_err(|raw| {
                        ReportError::input(format!(
                            "row {line}: value column \"{}\" is not numeric: \"{raw}\"",
                            roles.value
                        ))
                    })?,
                )
            } else {
                (cell_number(ct).ok().flatten(), cell_number(cv).ok().flatten())
            };

            records.push(Record {
                entity,
                time,
                value,
                group: cell_label(cg).unwrap_or_default(),
            });
        }
        Ok(Dataset::new(records))
    }
}

fn cell_label(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Empty => None,
        RawCell::Number(v) if v.is_nan() => None,
        RawCell::Number(v) => Some(format_ordinal(*v)),
        RawCell::Text(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
    }
}

fn cell_number(cell: &RawCell) -> Result<Option<f64>, String> {
    match cell {
        RawCell::Empty => Ok(None),
        RawCell::Number(v) if v.is_nan() => Ok(None),
        RawCell::Number(v) => Ok(Some(*v)),
        RawCell::Text(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Ok(None);
            }
            t.replace(',', "")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| s.clone())
        }
    }
}

/// Read a file and apply role hints in one step.
pub fn load_dataset(
    path: &Path,
    sheet: Option<&str>,
    hints: &RoleHints,
) -> ReportResult<(Dataset, ColumnRoles)> {
    let table = read_table(path, sheet)?;
    let roles = table.resolve_roles(hints)?;
    let dataset = table.to_dataset(&roles)?;
    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        entity = %roles.entity,
        time = %roles.time,
        value = %roles.value,
        group = %roles.group,
        "loaded dataset"
    );
    Ok((dataset, roles))
}

#[cfg(test)]
#[path = "../../tests/unit/data/load.rs"]
mod tests;
