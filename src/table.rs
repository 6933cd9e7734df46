use std::{fmt, io::Write};

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use log::warn;

use crate::error::Result;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Row label: either a plain position or a synthetic timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowLabel {
    Position(usize),
    Time(NaiveDateTime),
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Position(i) => write!(f, "{i}"),
            RowLabel::Time(t) => write!(f, "{}", t.format(TIME_FORMAT)),
        }
    }
}

/// Numeric table with named columns and a row index.
///
/// The index normally has one label per row, but a time index generated
/// from an assumed 365-day year may not (leap years, partial files). Such
/// a table is still returned; see [`DataTable::index_matches_rows`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows:    Vec<Vec<f64>>,
    index:   Vec<RowLabel>,
}

impl DataTable {
    /// New table with a zero-based positional index. Every row must have
    /// one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        let index = (0..rows.len()).map(RowLabel::Position).collect();
        Self { columns, rows, index }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn index(&self) -> &[RowLabel] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy of one column's values.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[i]).collect())
    }

    /// Replaces the row index with `times`, whatever its length.
    pub fn set_time_index(&mut self, times: Vec<NaiveDateTime>) {
        if times.len() != self.rows.len() {
            warn!(
                "time index has {} entries but table has {} rows",
                times.len(),
                self.rows.len()
            );
        }
        self.index = times.into_iter().map(RowLabel::Time).collect();
    }

    pub fn has_time_index(&self) -> bool {
        !self.index.is_empty() && self.index.iter().all(|l| matches!(l, RowLabel::Time(_)))
    }

    pub fn index_matches_rows(&self) -> bool {
        self.index.len() == self.rows.len()
    }

    /// Stacks `tables` in order. Columns are the union in first-seen order;
    /// cells a table lacks are NaN. Row labels are kept as they are.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = DataTable>,
    {
        let tables: Vec<DataTable> = tables.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for t in &tables {
            for c in &t.columns {
                if !columns.contains(c) {
                    columns.push(c.clone());
                }
            }
        }

        let total = tables.iter().map(|t| t.rows.len()).sum();
        let mut rows  = Vec::with_capacity(total);
        let mut index = Vec::with_capacity(total);
        for t in tables {
            // source column -> output column
            let map: Vec<usize> = t
                .columns
                .iter()
                .map(|c| columns.iter().position(|o| o == c).unwrap_or_default())
                .collect();
            for row in t.rows {
                let mut out = vec![f64::NAN; columns.len()];
                for (src, v) in row.into_iter().enumerate() {
                    out[map[src]] = v;
                }
                rows.push(out);
            }
            index.extend(t.index);
        }

        Self { columns, rows, index }
    }

    /// Writes an `index` column followed by the data columns. Rows without a
    /// label (mismatched time index) get an empty index cell.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(out);
        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push("index");
        header.extend(self.columns.iter().map(String::as_str));
        wtr.write_record(&header)?;

        for (i, row) in self.rows.iter().enumerate() {
            let mut rec = Vec::with_capacity(row.len() + 1);
            rec.push(self.index.get(i).map(|l| l.to_string()).unwrap_or_default());
            rec.extend(row.iter().map(|v| if v.is_nan() { String::new() } else { v.to_string() }));
            wtr.write_record(&rec)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
