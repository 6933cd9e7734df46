//! Helpers for NSRDB (National Solar Radiation Database) csv downloads:
//! lat/long grids for requesting sites, a file-name index over a download
//! tree, and importers for single files or whole folders.

pub mod error;
pub mod grid;
pub mod import;
pub mod index;
pub mod interval;
pub mod metadata;
pub mod sequence;
pub mod table;

pub use error::{NsrdbError, Result};
pub use grid::{make_lat_long_grid, LatLongGrid};
pub use import::{import_csv, ImportedFile};
pub use index::{inspect_database, parse_filename, FileIndex, FileRecord};
pub use interval::{detect_interval, time_index, Interval, IntervalDetection};
pub use metadata::Metadata;
pub use sequence::{import_sequence, list_csv_files};
pub use table::{DataTable, RowLabel};
