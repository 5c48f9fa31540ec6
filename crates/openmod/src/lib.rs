pub mod groups;
pub mod mass;
pub mod mztab;
pub mod psm;
pub mod stats;

use mztab::{MzTabError, MzTabReader};
use psm::Psm;
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;

#[derive(Debug)]
pub enum LoadError {
    IO(std::io::Error),
    MzTab(MzTabError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IO(e) => e.fmt(f),
            Self::MzTab(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug)]
pub enum Error {
    /// A match cannot take part in grouping
    Schema {
        row: usize,
        reason: &'static str,
    },
    Tolerance(f64),
    Load {
        path: String,
        source: LoadError,
    },
    IO(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema { row, reason } => write!(f, "invalid match at row {}: {}", row, reason),
            Self::Tolerance(tol) => write!(f, "invalid mass tolerance: {}", tol),
            Self::Load { path, source } => write!(f, "failed to read `{}`: {}", path, source),
            Self::IO(e) => e.fmt(f),
            Self::Json(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub score_column: String,
    /// Log and skip files that cannot be read, instead of failing
    pub skip_unreadable: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            score_column: mztab::DEFAULT_SCORE.into(),
            skip_unreadable: false,
        }
    }
}

pub fn read_mztab<S: AsRef<str>>(path: S, reader: &MzTabReader) -> Result<Vec<Psm>, LoadError> {
    let file = File::open(path.as_ref()).map_err(LoadError::IO)?;
    reader
        .parse(BufReader::new(file))
        .map_err(LoadError::MzTab)
}

/// Read the PSMs of several mzTab files into a single table, in the order
/// the files were given
pub fn read_matches<S>(paths: &[S], options: &LoadOptions) -> Result<Vec<Psm>, Error>
where
    S: AsRef<str> + Sync,
{
    let reader = MzTabReader::default().set_score_column(options.score_column.as_str());

    let tables = paths
        .par_iter()
        .map(|path| (path.as_ref(), read_mztab(path, &reader)))
        .collect::<Vec<_>>();

    let mut psms = Vec::new();
    for (path, table) in tables {
        match table {
            Ok(table) => {
                log::info!("- read {} PSMs from {}", table.len(), path);
                psms.extend(table);
            }
            Err(e) if options.skip_unreadable => {
                log::warn!("skipping `{}`: {}", path, e);
            }
            Err(source) => {
                return Err(Error::Load {
                    path: path.into(),
                    source,
                })
            }
        }
    }
    Ok(psms)
}

pub fn read_json<S, T>(path: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = std::fs::read_to_string(path.as_ref()).map_err(Error::IO)?;
    serde_json::from_str(&contents).map_err(Error::Json)
}
