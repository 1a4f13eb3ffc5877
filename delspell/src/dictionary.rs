//! Reader for plain-text frequency dictionaries.
//!
//! The expected format has one entry per line with a term and an occurrence
//! count in separate columns, such as `the 23135851162`. Lines starting with
//! `#` are comments. Malformed lines are logged and skipped.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::index::DictionaryEntry;
use crate::types::Frequency;

/// Column layout of a dictionary file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryFormat {
    /// zero-based column holding the term
    pub term_index: usize,
    /// zero-based column holding the count
    pub count_index: usize,
    /// column separator byte
    pub separator: u8,
}

impl DictionaryFormat {
    /// Term in the first column, count in the second, separated by a space.
    pub const fn default() -> DictionaryFormat {
        DictionaryFormat {
            term_index: 0,
            count_index: 1,
            separator: b' ',
        }
    }
}

/// Errors that can occur while reading a dictionary.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DictionaryError {
    /// The dictionary file could not be opened
    #[error("Could not open dictionary {}", path.display())]
    Io {
        /// path of the dictionary
        path: PathBuf,
        /// underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The data could not be read, e.g. it is not valid UTF-8
    #[error("Failed to read dictionary data")]
    Csv(#[from] csv::Error),
}

/// Reads dictionary entries in file order.
pub fn read_dictionary<R: Read>(
    reader: R,
    format: &DictionaryFormat,
) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .delimiter(format.separator)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = vec![];

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let (term, count) = match (record.get(format.term_index), record.get(format.count_index)) {
            (Some(term), Some(count)) if !term.is_empty() => (term, count),
            _ => {
                log::warn!("line {}: missing term or count column, skipping", line);
                continue;
            }
        };

        let frequency = match count.parse::<Frequency>() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("line {}: invalid count {:?} ({}), skipping", line, count, e);
                continue;
            }
        };

        entries.push(DictionaryEntry::new(term, frequency));
    }

    log::debug!("read {} dictionary entries", entries.len());
    Ok(entries)
}

/// Opens `path` and reads its dictionary entries.
pub fn load_dictionary<P: AsRef<Path>>(
    path: P,
    format: &DictionaryFormat,
) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("loading dictionary from {}", path.display());
    read_dictionary(file, format)
}
