use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::error::{CompareError, Result};

// ---------------------------------------------------------------------------
// Row – one parsed line of a headerless numeric CSV
// ---------------------------------------------------------------------------

/// A single numeric row together with the (1-based) line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: u64,
    pub values: Vec<f64>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

// ---------------------------------------------------------------------------
// RowReader – lazy row sequence
// ---------------------------------------------------------------------------

/// Streams numeric rows out of a comma-separated file, one record at a time.
///
/// Layout:  no header row, every field a float, blank lines ignored.
/// Rows may differ in width here; the model builder decides whether that is
/// acceptable.
pub struct RowReader<R> {
    source: PathBuf,
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl RowReader<File> {
    /// Open `path` for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(path, file))
    }
}

impl<R: io::Read> RowReader<R> {
    /// Wrap an arbitrary reader; `source` is only used in error messages.
    pub fn from_reader(source: impl Into<PathBuf>, rdr: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Self {
            source: source.into(),
            reader,
            record: StringRecord::new(),
        }
    }

    fn parse_record(&self) -> Result<Row> {
        let line = self.record.position().map(|p| p.line()).unwrap_or(0);
        let values = self
            .record
            .iter()
            .enumerate()
            .map(|(field, text)| {
                text.parse::<f64>().map_err(|_| CompareError::Parse {
                    path: self.source.clone(),
                    line,
                    field,
                    text: text.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(Row { line, values })
    }
}

impl<R: io::Read> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(false) => return None,
                Ok(true) => {
                    // A line of nothing but whitespace trims down to one empty field.
                    if self.record.iter().all(str::is_empty) {
                        continue;
                    }
                    return Some(self.parse_record());
                }
                Err(source) => {
                    return Some(Err(CompareError::Read {
                        path: self.source.clone(),
                        source,
                    }))
                }
            }
        }
    }
}
