use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::HistoryError;
use crate::track::{FIELDS, TrackRecord};

/// CSV-backed storage for the play history.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record. A missing or empty file is an empty history.
    ///
    /// The first row is the header and is skipped without inspection; every
    /// other row must have exactly six columns.
    pub fn load(&self) -> Result<Vec<TrackRecord>, HistoryError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            if i == 0 {
                continue;
            }

            let line = row.position().map(|p| p.line()).unwrap_or(i as u64 + 1);
            if row.len() != FIELDS.len() {
                return Err(HistoryError::CorruptRecord {
                    line,
                    found: row.len(),
                    expected: FIELDS.len(),
                });
            }

            let record = TrackRecord::from_row(&row[0], &row[1], &row[2], &row[3], &row[4], &row[5])
                .ok_or_else(|| HistoryError::CorruptTimestamp {
                    line,
                    value: row[5].to_string(),
                })?;
            records.push(record);
        }

        Ok(records)
    }

    /// Rewrite the whole file with `records`.
    ///
    /// Rows go to a temporary file next to the target which is then renamed
    /// over it, so readers see either the old or the new history.
    pub fn persist(&self, records: &[TrackRecord]) -> Result<(), HistoryError> {
        self.write_atomically(records).map_err(|source| HistoryError::Persist {
            path: self.path.clone(),
            source,
        })
    }

    fn write_atomically(&self, records: &[TrackRecord]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::Writer::from_writer(BufWriter::new(tmp.as_file_mut()));
            writer.write_record(FIELDS).map_err(io::Error::other)?;
            for record in records {
                writer.write_record(record.to_row()).map_err(io::Error::other)?;
            }
            writer.flush()?;
            let mut inner = writer.into_inner().map_err(|e| e.into_error())?;
            inner.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
