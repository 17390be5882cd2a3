use std::path::{Path, PathBuf};

pub const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "text/csv",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub const ACCEPTED_PATTERNS: [&str; 3] = ["*.csv", "*.xls", "*.xlsx"];

/// A spreadsheet picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
}

impl UploadFile {
    /// Returns `None` for anything that is not CSV or Excel.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let mime = match ext.as_str() {
            "csv" => ACCEPTED_MIME_TYPES[0],
            "xls" => ACCEPTED_MIME_TYPES[1],
            "xlsx" => ACCEPTED_MIME_TYPES[2],
            _ => return None,
        };
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            path: path.to_path_buf(),
            file_name,
            mime,
        })
    }
}

/// Percentage of `total` covered by `sent`, clamped to 0..=100.
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (sent.min(total) * 100 / total) as u8
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    pub progress_visible: bool,
    pub progress: u8,
    pub message: String,
}

impl UploadState {
    pub const UPLOADING: &'static str = "Uploading...";
    pub const COMPLETE: &'static str = "Upload Complete";
    pub const FAILED: &'static str = "Upload Failed";
    pub const UNSUPPORTED: &'static str = "Unsupported file type";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_spreadsheets_only() {
        let csv = UploadFile::from_path(Path::new("/tmp/export.CSV")).unwrap();
        assert_eq!(csv.mime, "text/csv");
        assert_eq!(csv.file_name, "export.CSV");
        assert!(UploadFile::from_path(Path::new("book.xlsx")).is_some());
        assert!(UploadFile::from_path(Path::new("book.xls")).is_some());
        assert!(UploadFile::from_path(Path::new("notes.txt")).is_none());
        assert!(UploadFile::from_path(Path::new("README")).is_none());
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(percent(0, 200), 0);
        assert_eq!(percent(50, 200), 25);
        assert_eq!(percent(500, 200), 100);
        assert_eq!(percent(0, 0), 100);
    }
}
