use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};

use crate::{
    error::{NsrdbError, Result},
    interval::{detect_interval, time_index, IntervalDetection},
    metadata::Metadata,
    table::DataTable,
};

/// Everything read from one NSRDB file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedFile {
    pub data:     DataTable,
    pub metadata: Metadata,
    pub interval: IntervalDetection,
}

fn parse_cell(path: &Path, rec: &StringRecord, column: &str, raw: &str) -> Result<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(f64::NAN);
    }
    t.parse().map_err(|_| NsrdbError::ParseCell {
        path:   path.to_path_buf(),
        line:   rec.position().map_or(0, |p| p.line()),
        column: column.to_string(),
        value:  t.to_string(),
    })
}

fn year_of(path: &Path, value: f64) -> Result<i32> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(NsrdbError::InvalidYear { path: path.to_path_buf(), value: value.to_string() })
    }
}

/// Reads one NSRDB csv file.
///
/// Line 1/2 are the metadata header and its values, line 3 is the data
/// header and the rest is data. The row index becomes a half-hourly or
/// hourly date range starting on Jan 1 of the file's first `Year` when the
/// first two `Minute` values reveal the interval; otherwise the positional
/// index is kept and a warning is logged.
pub fn import_csv(path: &Path) -> Result<ImportedFile> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut records = rdr.records();

    let mut head = Vec::with_capacity(3);
    for _ in 0..3 {
        match records.next() {
            Some(rec) => head.push(rec?),
            None => {
                return Err(NsrdbError::Truncated { path: path.to_path_buf(), lines: head.len() })
            }
        }
    }
    let metadata = Metadata::from_records(&head[0], &head[1]);
    let columns: Vec<String> = head[2].iter().map(|c| c.trim().to_string()).collect();

    let mut rows = Vec::new();
    for rec in records {
        let rec = rec?;
        let mut row = Vec::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            row.push(parse_cell(path, &rec, name, rec.get(i).unwrap_or(""))?);
        }
        rows.push(row);
    }
    let mut data = DataTable::new(columns, rows);

    let missing = |column: &str| NsrdbError::MissingColumn {
        path:   path.to_path_buf(),
        column: column.to_string(),
    };
    let years   = data.column("Year").ok_or_else(|| missing("Year"))?;
    let minutes = data.column("Minute").ok_or_else(|| missing("Minute"))?;

    let interval = detect_interval(&minutes);
    match interval {
        IntervalDetection::Recognized(iv) => {
            let year = year_of(path, years[0])?;
            let times = time_index(year, iv).ok_or_else(|| NsrdbError::InvalidYear {
                path:  path.to_path_buf(),
                value: year.to_string(),
            })?;
            debug!("{}: {}-minute data for {year}", path.display(), iv.minutes());
            data.set_time_index(times);
        }
        IntervalDetection::Unrecognized => {
            warn!("Interval not understood! ({})", path.display());
        }
    }

    Ok(ImportedFile { data, metadata, interval })
}
