use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use log::info;

use crate::{
    error::{NsrdbError, Result},
    import::{import_csv, ImportedFile},
    metadata::Metadata,
    table::DataTable,
};

/// All `*.csv` directly inside `folder`, sorted lexically. Dot-files
/// (e.g. macOS `._1998.csv`) are skipped.
pub fn list_csv_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let base = Pattern::escape(&folder.to_string_lossy());
    let opts = MatchOptions { require_literal_leading_dot: true, ..MatchOptions::new() };
    let mut v = glob_with(&format!("{base}/*.csv"), opts)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    v.sort();
    Ok(v)
}

/// Imports every csv file in `folder` (e.g. all years for one site) and
/// stacks them in file-name order. Returns the combined table and the
/// metadata of the last file. Files are read one at a time; the first
/// failure stops the import.
pub fn import_sequence(folder: &Path) -> Result<(DataTable, Metadata)> {
    let files = list_csv_files(folder)?;
    if files.is_empty() {
        return Err(NsrdbError::NoInputFiles { folder: folder.to_path_buf() });
    }

    let imported: Vec<ImportedFile> = files
        .iter()
        .map(|f| {
            info!("{}", f.display());
            import_csv(f)
        })
        .collect::<Result<_>>()?;

    let mut metadata = Metadata::default();
    let mut tables = Vec::with_capacity(imported.len());
    for file in imported {
        metadata = file.metadata;
        tables.push(file.data);
    }

    Ok((DataTable::concat(tables), metadata))
}
