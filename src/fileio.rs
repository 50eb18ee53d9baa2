//! Text and JSON file helpers for the file I/O lesson.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FileError {
    fn io(path: &Path, source: io::Error) -> Self {
        FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: u16,
    pub pages: u32,
    pub tags: Vec<String>,
    pub in_print: bool,
}

//==============================================================================
// Text files
//==============================================================================

pub fn write_text(path: &Path, contents: &str) -> Result<(), FileError> {
    fs::write(path, contents).map_err(|e| FileError::io(path, e))
}

pub fn read_lines(path: &Path) -> Result<Vec<String>, FileError> {
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    BufReader::new(file)
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|e| FileError::io(path, e))
}

/// Writes every line through a `BufWriter`, flushing once at the end.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), FileError> {
    let file = File::create(path).map_err(|e| FileError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| FileError::io(path, e))?;
    }
    writer.flush().map_err(|e| FileError::io(path, e))
}

pub fn append_line(path: &Path, line: &str) -> Result<(), FileError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FileError::io(path, e))?;
    writeln!(file, "{}", line).map_err(|e| FileError::io(path, e))
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Returns the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, FileError> {
    let mut reader = File::open(src).map_err(|e| FileError::io(src, e))?;
    let mut writer = File::create(dst).map_err(|e| FileError::io(dst, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| FileError::io(dst, e))
}

/// Every file below `root`, relative to it, sorted.
pub fn list_tree(root: &Path) -> Result<Vec<PathBuf>, FileError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk failed"));
            FileError::io(root, source)
        })?;
        if entry.file_type().is_file() {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }
    }
    Ok(files)
}

//==============================================================================
// JSON files
//==============================================================================

pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FileError> {
    let file = File::create(path).map_err(|e| FileError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| FileError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| FileError::io(path, e))
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, FileError> {
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| FileError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_append_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");

        write_lines(&path, &["first", "second"]).unwrap();
        append_line(&path, "third").unwrap();

        assert_eq!(read_lines(&path).unwrap(), vec!["first", "second", "third"]);
        assert!(file_exists(&path));
        assert!(!file_exists(dir.path()));
    }

    #[test]
    fn test_copy_reports_bytes() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        write_text(&src, "hello world").unwrap();

        assert_eq!(copy_file(&src, &dst).unwrap(), 11);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello world");
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let err = read_lines(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_list_tree_is_sorted_and_relative() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        write_text(&dir.path().join("z.txt"), "").unwrap();
        write_text(&dir.path().join("sub/a.txt"), "").unwrap();
        write_text(&dir.path().join("sub/deeper/b.txt"), "").unwrap();

        let files = list_tree(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("sub/a.txt"),
                PathBuf::from("sub/deeper/b.txt"),
                PathBuf::from("z.txt"),
            ]
        );
    }

    #[test]
    fn test_json_skips_empty_email() {
        let person = Person {
            name: "Bob".to_string(),
            age: 25,
            email: String::new(),
        };
        let json = serde_json::to_string(&person).unwrap();
        assert_eq!(json, r#"{"name":"Bob","age":25}"#);

        let parsed: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, person);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.json");
        let books = vec![Book {
            title: "The Rust Programming Language".to_string(),
            author: "Klabnik & Nichols".to_string(),
            year: 2018,
            pages: 552,
            tags: vec!["rust".to_string()],
            in_print: true,
        }];

        save_json(&path, &books).unwrap();
        let loaded: Vec<Book> = load_json(&path).unwrap();
        assert_eq!(loaded, books);
    }

    #[test]
    fn test_load_json_reports_bad_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        write_text(&path, "{not json").unwrap();

        let err = load_json::<Person>(&path).unwrap_err();
        assert!(matches!(err, FileError::Json { .. }));
    }
}
