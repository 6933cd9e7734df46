use std::{
    io::Write,
    path::{Path, PathBuf},
};

use csv::WriterBuilder;
use log::debug;
use walkdir::WalkDir;

use crate::error::{NsrdbError, Result};

/// One NSRDB file, described purely from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub location_id: String,
    pub lat:         String,
    pub long:        String,
    pub year:        String,
    pub filename:    String,
    pub fullpath:    PathBuf,
}

/// Splits `{location_id}_{lat}_{long}_{year}.csv` into its four tokens.
pub fn parse_filename(filename: &str) -> Result<(String, String, String, String)> {
    let parts: Vec<&str> = filename.split('_').collect();
    if parts.len() < 4 {
        return Err(NsrdbError::InvalidFilename {
            filename: filename.to_string(),
            tokens:   parts.len(),
        });
    }
    let year = parts[3].strip_suffix(".csv").unwrap_or(parts[3]);
    Ok((
        parts[0].to_string(),
        parts[1].to_string(),
        parts[2].to_string(),
        year.to_string(),
    ))
}

impl FileRecord {
    pub fn from_path(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (location_id, lat, long, year) = parse_filename(&filename)?;
        Ok(Self { location_id, lat, long, year, filename, fullpath: path.to_path_buf() })
    }
}

/// File records sorted by `location_id`; the position is the row index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    records: Vec<FileRecord>,
}

impl FileIndex {
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(out);
        wtr.write_record(["", "location_id", "lat", "long", "year", "filename", "fullpath"])?;
        for (i, r) in self.records.iter().enumerate() {
            let row = i.to_string();
            let fullpath = r.fullpath.to_string_lossy();
            wtr.write_record([
                row.as_str(),
                r.location_id.as_str(),
                r.lat.as_str(),
                r.long.as_str(),
                r.year.as_str(),
                r.filename.as_str(),
                &*fullpath,
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl IntoIterator for FileIndex {
    type Item = FileRecord;
    type IntoIter = std::vec::IntoIter<FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Recursively finds `*.csv` under `root_path` and indexes them by file name
/// alone, without opening any file. Breaks if the naming scheme changes.
pub fn inspect_database(root_path: &Path) -> Result<FileIndex> {
    let mut records = Vec::new();
    for entry in WalkDir::new(root_path).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_csv = entry
            .file_name()
            .to_str()
            .map_or(false, |n| n.ends_with(".csv"));
        if !is_csv {
            continue;
        }
        records.push(FileRecord::from_path(entry.path())?);
    }

    // stable: equal ids keep walk order
    records.sort_by(|a, b| a.location_id.cmp(&b.location_id));
    debug!("indexed {} file(s) under {}", records.len(), root_path.display());
    Ok(FileIndex { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_nsrdb_name() {
        let (id, lat, long, year) = parse_filename("128364_38.29_-122.14_1998.csv").unwrap();
        assert_eq!(id, "128364");
        assert_eq!(lat, "38.29");
        assert_eq!(long, "-122.14");
        assert_eq!(year, "1998");
    }

    #[test]
    fn keeps_tmy_token() {
        let (_, _, _, year) = parse_filename("104_30.97_-83.22_tmy.csv").unwrap();
        assert_eq!(year, "tmy");
    }

    #[test]
    fn too_few_tokens() {
        match parse_filename("128364_38.29.csv") {
            Err(NsrdbError::InvalidFilename { filename, tokens }) => {
                assert_eq!(filename, "128364_38.29.csv");
                assert_eq!(tokens, 2);
            }
            other => panic!("expected InvalidFilename, got {other:?}"),
        }
    }
}
