//! CSV persistence for the intermediate and final tables

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::constants::output::{FINAL_HEADER, INTERMEDIATE_HEADER};
use crate::domain::{JobRecord, NormalizedRow};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to open table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unexpected header in {path}: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl TableError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type TableResult<T> = Result<T, TableError>;

/// Write the intermediate table, replacing any existing file
pub fn write_intermediate(path: &Path, records: &[JobRecord]) -> TableResult<()> {
    write_rows(path, &INTERMEDIATE_HEADER, records)?;
    info!("💾 Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write the final table, replacing any existing file
pub fn write_final(path: &Path, rows: &[NormalizedRow]) -> TableResult<()> {
    write_rows(path, &FINAL_HEADER, rows)?;
    info!("💾 Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read an intermediate table back. Rows that fail to deserialize are skipped.
pub fn read_intermediate(path: &Path) -> TableResult<Vec<JobRecord>> {
    let file = File::open(path).map_err(|e| TableError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new().from_reader(file);

    let found: Vec<String> = reader
        .headers()
        .map_err(|e| TableError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if found != INTERMEDIATE_HEADER {
        return Err(TableError::HeaderMismatch {
            path: path.to_path_buf(),
            expected: INTERMEDIATE_HEADER.iter().map(|h| h.to_string()).collect(),
            found,
        });
    }

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<JobRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping unreadable row {} in {}: {}", index + 1, path.display(), e),
        }
    }

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// The header is written explicitly so an empty table still has one
fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> TableResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TableError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| TableError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(header).map_err(|e| TableError::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| TableError::csv(path, e))?;
    }
    writer.flush().map_err(|e| TableError::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record() -> JobRecord {
        JobRecord {
            title: "Data analyst".to_string(),
            company: "Uzum".to_string(),
            location: "Ташкент".to_string(),
            salary: None,
            required_experience: "1–3 года".to_string(),
            skills: "SQL, Power BI".to_string(),
            time_posted: Some("15 марта 2024".to_string()),
            link: "https://hh.ru/vacancy/42".to_string(),
            keyword: "Data analyst".to_string(),
        }
    }

    #[test]
    fn test_intermediate_table_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scraped_jobs.csv");

        write_intermediate(&path, &[record()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "title,company,location,salary,required_experience,skills,time_posted,link,keyword"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Data analyst,Uzum,Ташкент,,1–3 года,\"SQL, Power BI\",15 марта 2024,https://hh.ru/vacancy/42,Data analyst"
        );
    }

    #[test]
    fn test_intermediate_table_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scraped_jobs.csv");

        write_intermediate(&path, &[record()]).unwrap();
        let records = read_intermediate(&path).unwrap();

        assert_eq!(records, vec![record()]);
        assert_eq!(records[0].salary, None);
    }

    #[test]
    fn test_empty_final_table_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("final.csv");

        write_final(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "time_posted,keyword,skills,company,country");
    }

    #[test]
    fn test_final_row_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("final.csv");
        let row = NormalizedRow::new(
            "03/15/2024".to_string(),
            "Data analyst".to_string(),
            "SQL".to_string(),
            "Uzum".to_string(),
        );

        write_final(&path, &[row]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(1).unwrap(), "03/15/2024,Data analyst,SQL,Uzum,Uzbekistan");
    }

    #[test]
    fn test_foreign_header_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        assert!(matches!(
            read_intermediate(&path),
            Err(TableError::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_intermediate(&dir.path().join("absent.csv")),
            Err(TableError::Io { .. })
        ));
    }
}
