//! Importing source files into the editor and exporting code to disk.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::models::Language;

/// Largest source file accepted by [`import_source`].
pub const MAX_IMPORT_BYTES: u64 = 512 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is too large to open")]
    TooLarge(PathBuf),
    #[error("{0} is not a text file")]
    NotText(PathBuf),
}

/// A source file loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSource {
    pub code: String,
    /// Guessed from the extension; `None` leaves the current language alone.
    pub language: Option<Language>,
}

pub fn import_source(path: &Path) -> Result<ImportedSource, FileError> {
    let metadata = std::fs::metadata(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > MAX_IMPORT_BYTES {
        return Err(FileError::TooLarge(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let code = String::from_utf8(bytes).map_err(|_| FileError::NotText(path.to_path_buf()))?;
    let language = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension);

    tracing::info!("Imported {} ({:?})", path.display(), language);
    Ok(ImportedSource { code, language })
}

/// `playground-YYYY-MM-DD.<ext>`
pub fn playground_file_name(language: Language, date: NaiveDate) -> String {
    format!("playground-{}.{}", date.format("%Y-%m-%d"), language.extension())
}

/// Where exports land: the user's download directory, else the working directory.
pub fn export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Write `code` to `dir/file_name`, returning the full path.
pub fn export_code(dir: &Path, file_name: &str, code: &str) -> Result<PathBuf, FileError> {
    let path = dir.join(file_name);
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(&path, code))
        .map_err(|source| FileError::Write {
            path: path.clone(),
            source,
        })?;
    tracing::info!("Exported code to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_playground_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            playground_file_name(Language::Cpp, date),
            "playground-2024-03-09.cpp"
        );
    }

    #[test]
    fn test_export_then_import_detects_language() {
        let dir = TempDir::new().unwrap();
        let path = export_code(dir.path(), "solution.go", "package main\n").unwrap();
        assert_eq!(path, dir.path().join("solution.go"));

        let imported = import_source(&path).unwrap();
        assert_eq!(imported.code, "package main\n");
        assert_eq!(imported.language, Some(Language::Go));
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        assert!(export_code(&nested, "x.py", "print(1)").is_ok());
    }

    #[test]
    fn test_import_unknown_extension_keeps_language_unset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert_eq!(import_source(&path).unwrap().language, None);
    }

    #[test]
    fn test_import_rejects_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.py");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(import_source(&path), Err(FileError::NotText(_))));
    }

    #[test]
    fn test_import_missing_file() {
        let err = import_source(Path::new("/definitely/not/here.rs")).unwrap_err();
        assert!(err.to_string().starts_with("Could not read"));
    }
}
