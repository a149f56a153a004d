use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{serialize_context, with_read_context, with_write_context};

/// Writes analysis tables into one output directory.
///
/// The directory is created on the first write.
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create output directory: {}", self.dir.display())
        })
    }

    /// Write `rows` as a CSV table with a header row; an empty table still
    /// gets its header
    pub fn write_csv<T: Serialize + Default>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let file_path = self.path(file_name);

        if rows.is_empty() {
            let header = header_line::<T>().context(serialize_context(file_name))?;
            with_write_context(fs::write(&file_path, header), file_name)?;
        } else {
            let mut writer = with_write_context(csv::Writer::from_path(&file_path), file_name)?;
            for row in rows {
                with_write_context(writer.serialize(row), file_name)?;
            }
            with_write_context(writer.flush(), file_name)?;
        }

        info!("Saved {} rows: {}", rows.len(), file_path.display());
        Ok(file_path)
    }

    pub fn write_json<T: Serialize>(&self, file_name: &str, data: &T) -> Result<PathBuf> {
        self.ensure_dir()?;
        let file_path = self.path(file_name);
        let json = serde_json::to_string_pretty(data).context(serialize_context(file_name))?;
        with_write_context(fs::write(&file_path, json), file_name)?;

        info!("Saved: {}", file_path.display());
        Ok(file_path)
    }

    /// Read a table previously written by `write_csv`
    pub fn read_csv<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let file_path = self.path(file_name);
        let display = file_path.display().to_string();
        let mut reader = with_read_context(csv::Reader::from_path(&file_path), &display)?;

        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(with_read_context(row, &display)?);
        }
        Ok(rows)
    }
}

/// Header line of a `T` table, taken from how a default row serializes
fn header_line<T: Serialize + Default>() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.serialize(T::default())?;
        writer.flush()?;
    }
    let end = buffer
        .iter()
        .position(|&b| b == b'\n')
        .map_or(buffer.len(), |i| i + 1);
    buffer.truncate(end);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        points: u32,
        seconds: Option<u32>,
    }

    #[test]
    fn test_directory_is_created_on_first_write() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        let writer = OutputWriter::new(&nested);
        assert!(!nested.exists());

        writer.write_json("info.json", &serde_json::json!({})).unwrap();
        assert!(writer.dir().is_dir());
    }

    #[test]
    fn test_empty_table_keeps_its_header() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(temp.path());

        let path = writer.write_csv::<Row>("empty.csv", &[]).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text, "name,points,seconds\n");

        let back: Vec<Row> = writer.read_csv("empty.csv").unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(temp.path());
        let rows = vec![
            Row {
                name: "Smith, John".to_string(),
                points: 12,
                seconds: Some(300),
            },
            Row {
                name: "Doe".to_string(),
                points: 0,
                seconds: None,
            },
        ];

        let path = writer.write_csv("rows.csv", &rows).unwrap();
        let text = fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,points,seconds"));
        assert_eq!(lines.next(), Some("\"Smith, John\",12,300"));
        assert_eq!(lines.next(), Some("Doe,0,"));

        let back: Vec<Row> = writer.read_csv("rows.csv").unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(temp.path());

        let path = writer.write_json("info.json", &serde_json::json!({"a": 1})).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("\n  \"a\": 1"));
    }

    #[test]
    fn test_reading_missing_table_fails_with_path() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(temp.path());

        let err = writer.read_csv::<Row>("absent.csv").unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
    }
}
