//! Upload folder listing

use std::io;
use std::path::Path;

/// File names of the PDFs in `dir`, sorted
///
/// The extension check ignores case. A missing folder lists as empty.
pub fn list_uploaded(dir: &Path) -> io::Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if let (true, Some(name)) = (is_pdf, path.file_name().and_then(|n| n.to_str())) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Whether `id` names a file directly inside the upload folder
pub fn is_plain_file_name(id: &str) -> bool {
    !id.is_empty() && Path::new(id).file_name().and_then(|n| n.to_str()) == Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_pdfs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "A.PDF", "notes.txt", "c.Pdf"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        assert_eq!(
            list_uploaded(dir.path()).unwrap(),
            vec!["A.PDF", "b.pdf", "c.Pdf"]
        );
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_uploaded(&dir.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_plain_file_name() {
        assert!(is_plain_file_name("report.pdf"));
        assert!(!is_plain_file_name("../report.pdf"));
        assert!(!is_plain_file_name("sub/report.pdf"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
    }
}
