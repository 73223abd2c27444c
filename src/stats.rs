//! Output size reporting.

use std::path::{Path, PathBuf};

#[derive(Debug, serde::Serialize)]
pub struct FileSize {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, serde::Serialize)]
pub struct SizeReport {
    pub files: Vec<FileSize>,
    pub total: u64,
}

/// Sizes of the given files; files that do not exist are left out.
pub fn file_sizes<P: AsRef<Path>>(paths: &[P]) -> SizeReport {
    let files: Vec<FileSize> = paths
        .iter()
        .filter_map(|path| {
            let path = path.as_ref();
            let bytes = std::fs::metadata(path).ok()?.len();
            Some(FileSize {
                path: path.to_path_buf(),
                bytes,
            })
        })
        .collect();
    let total = files.iter().map(|file| file.bytes).sum();
    SizeReport { files, total }
}

/// `12345` -> `12,345`.
pub fn format_bytes(bytes: u64) -> String {
    let digits = bytes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_bytes(0), "0");
        assert_eq!(format_bytes(999), "999");
        assert_eq!(format_bytes(1000), "1,000");
        assert_eq!(format_bytes(1234567), "1,234,567");
    }
}
