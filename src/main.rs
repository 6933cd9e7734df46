// USAGE #### cargo run --release -- <grid|index|import|sequence> [ARGS]
//   cargo run --release -- grid --lat-step 0.5 --long-step 0.5 -o grid.csv
//   cargo run --release -- index path/to/downloads
//   cargo run --release -- import path/to/128364_38.29_-122.14_1998.csv --metadata
//   cargo run --release -- sequence path/to/site_folder -o combined.csv

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use nsrdb_tools::{import_csv, import_sequence, inspect_database, make_lat_long_grid};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(name = "nsrdb_tools", about = "Locate, parse and concatenate NSRDB csv files")]
struct Args {
    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Lat/long grid of sites, upper limits excluded
    Grid {
        #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
        lat_min: f64,
        #[arg(long, default_value_t = 47.0, allow_negative_numbers = true)]
        lat_max: f64,
        #[arg(long, default_value_t = -124.0, allow_negative_numbers = true)]
        long_min: f64,
        #[arg(long, default_value_t = -66.0, allow_negative_numbers = true)]
        long_max: f64,
        #[arg(long, default_value_t = 1.0)]
        lat_step: f64,
        #[arg(long, default_value_t = 1.0)]
        long_step: f64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Index every *.csv under ROOT by location id, lat, long and year
    Index {
        root: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a single NSRDB file
    Import {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the metadata row instead of the data
        #[arg(long)]
        metadata: bool,
    },
    /// Import and stack every *.csv in FOLDER
    Sequence {
        folder: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the last file's metadata row instead of the data
        #[arg(long)]
        metadata: bool,
    },
}

/// stdout unless a path was given
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let out: Box<dyn Write> = match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let start: DateTime<Local> = Local::now();
    info!("[{}] Starting…", start.format("%Y-%m-%d %H:%M:%S"));

    match args.cmd {
        Cmd::Grid { lat_min, lat_max, long_min, long_max, lat_step, long_step, output } => {
            let grid = make_lat_long_grid([lat_min, lat_max], [long_min, long_max], lat_step, long_step);
            info!("{} grid points", grid.num);
            grid.write_csv(open_output(output.as_deref())?)
                .context("writing grid")?;
        }
        Cmd::Index { root, output } => {
            let index = inspect_database(&root)
                .with_context(|| format!("indexing {}", root.display()))?;
            info!("{} file(s) indexed", index.len());
            index.write_csv(open_output(output.as_deref())?)
                .context("writing index")?;
        }
        Cmd::Import { file, output, metadata } => {
            let imported = import_csv(&file)
                .with_context(|| format!("importing {}", file.display()))?;
            let out = open_output(output.as_deref())?;
            let written = if metadata {
                imported.metadata.write_csv(out)
            } else {
                imported.data.write_csv(out)
            };
            written.context("writing table")?;
        }
        Cmd::Sequence { folder, output, metadata } => {
            let (data, meta) = import_sequence(&folder)
                .with_context(|| format!("importing sequence from {}", folder.display()))?;
            info!("{} rows combined", data.len());
            let out = open_output(output.as_deref())?;
            let written = if metadata { meta.write_csv(out) } else { data.write_csv(out) };
            written.context("writing table")?;
        }
    }

    let end: DateTime<Local> = Local::now();
    let elapsed = end.signed_duration_since(start).num_milliseconds();
    info!("[{}] Finished. Total time: {}ms", end.format("%Y-%m-%d %H:%M:%S"), elapsed);
    Ok(())
}
