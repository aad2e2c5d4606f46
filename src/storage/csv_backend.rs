use std::{
    fs::{self, File},
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

use crate::errors::{NexusError, Result};

use super::{DatasetKind, Record};

const TMP_SUFFIX: &str = "tmp";

/// CSV-backed store keeping one file per dataset inside `data_dir`.
///
/// Every append rewrites the whole file through a temporary sibling that is
/// renamed into place, so readers never observe a half-written table.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    data_dir: PathBuf,
}

impl CsvRecordStore {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Loads every row of `R`'s dataset; a missing file is an empty table.
    pub fn load<R: Record>(&self) -> Result<Vec<R>> {
        let path = self.path_for(R::KIND);
        let rows = match File::open(&path) {
            Ok(file) => read_rows::<R, _>(file)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(dataset = %R::KIND, "no backing file yet, starting empty");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(dataset = %R::KIND, rows = rows.len(), "loaded dataset");
        Ok(rows)
    }

    /// Validates `row`, then rewrites the dataset with the previous rows plus `row`.
    ///
    /// Returns the number of rows now stored.
    pub fn append<R: Record>(&self, row: R) -> Result<usize> {
        row.validate()?;
        let mut rows = self.load::<R>()?;
        rows.push(row);
        let path = self.path_for(R::KIND);
        write_rows_atomic(&path, &rows)?;
        tracing::info!(dataset = %R::KIND, rows = rows.len(), "appended row");
        Ok(rows.len())
    }
}

fn read_rows<R: Record, T: Read>(source: T) -> Result<Vec<R>> {
    let kind = R::KIND;
    let mut reader = csv::ReaderBuilder::new().from_reader(source);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    check_headers(kind, headers.iter())?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<R>().enumerate() {
        // Line 1 is the header.
        let line = index + 2;
        let row = result.map_err(|err| NexusError::InvalidRecord {
            dataset: kind.label(),
            message: format!("line {line}: {err}"),
        })?;
        row.validate().map_err(|err| at_line(err, line))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Prefixes a validation failure with the line it was found on.
pub(crate) fn at_line(err: NexusError, line: usize) -> NexusError {
    match err {
        NexusError::InvalidRecord { dataset, message } => NexusError::InvalidRecord {
            dataset,
            message: format!("line {line}: {message}"),
        },
        other => other,
    }
}

/// Rejects a table whose header row differs from the canonical columns.
pub(crate) fn check_headers<'a>(
    kind: DatasetKind,
    found: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let found: Vec<&str> = found.map(str::trim).collect();
    if found != kind.columns() {
        return Err(NexusError::Schema {
            dataset: kind.label(),
            expected: kind.columns().join(", "),
            found: found.join(", "),
        });
    }
    Ok(())
}

fn write_rows_atomic<R: Record>(path: &Path, rows: &[R]) -> Result<()> {
    let tmp = tmp_path(path);
    let file = File::create(&tmp)?;
    let mut writer = csv::Writer::from_writer(file);
    if rows.is_empty() {
        writer.write_record(R::KIND.columns())?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    let file = writer.into_inner().map_err(|err| {
        NexusError::Io(std::io::Error::new(
            err.error().kind(),
            err.error().to_string(),
        ))
    })?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
