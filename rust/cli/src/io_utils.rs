//! File I/O helpers shared by commands: stdin lines, text files with
//! transparent `.zst` decompression, and result-log discovery.

use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Reads one trimmed line. `None` on EOF or read error.
///
/// ```rust
/// # use quartet_cli::io_utils::read_stdin_line;
/// let mut input = std::io::Cursor::new(b"  x \n");
/// assert_eq!(read_stdin_line(&mut input), Some("x".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing Zstandard when the path ends in `.zst`.
/// A leading UTF-8 BOM is stripped.
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 8 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// All `.jsonl` and `.jsonl.zst` files under `dir`, sorted for stable output.
pub fn collect_result_files(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        let Ok(rd) = std::fs::read_dir(&d) else {
            continue;
        };
        for e in rd.filter_map(Result::ok) {
            let p = e.path();
            if p.is_dir() {
                stack.push(p);
            } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
            {
                found.push(p);
            }
        }
    }
    found.sort();
    found
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stdin_line_empty_after_trim() {
        let mut cursor = Cursor::new(b"   \n");
        assert_eq!(read_stdin_line(&mut cursor), Some("".to_string()));
    }

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");
    }

    #[test]
    fn test_read_text_auto_zst() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.jsonl.zst");
        let comp = zstd::bulk::compress(b"{\"a\":1}\n", 3).unwrap();
        std::fs::write(&path, comp).unwrap();
        let text = read_text_auto(&path.to_string_lossy()).unwrap();
        assert_eq!(text, "{\"a\":1}\n");
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("subdir").join("file.txt");
        assert!(ensure_parent_dir(&nested_path).is_ok());
        assert!(temp_dir.path().join("subdir").exists());
        assert!(ensure_parent_dir(Path::new("file.txt")).is_ok());
    }

    #[test]
    fn test_collect_result_files_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("a.jsonl"), "").unwrap();
        std::fs::write(dir.path().join("nested").join("b.jsonl.zst"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        let files = collect_result_files(dir.path());
        assert_eq!(files.len(), 2);
    }
}
