// src/file.rs
use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    Ok(())
}

/// `.html`/`.htm` files directly inside `dir`, sorted by name.
/// A missing directory is an empty listing.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(String::from)
        .unwrap_or_default()
}

/// Read a saved page; browsers occasionally save in a legacy encoding.
pub fn read_page(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_lists_nothing() {
        let dir = std::env::temp_dir().join("allaround_no_such_dir_for_listing");
        assert!(list_html_files(&dir).unwrap().is_empty());
    }

    #[test]
    fn listing_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!("allaround_list_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.html"), "x").unwrap();
        fs::write(dir.join("a.HTM"), "x").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();

        let names: Vec<String> = list_html_files(&dir).unwrap().iter().map(|p| file_name(p)).collect();
        assert_eq!(names, strings!["a.HTM", "b.html"]);
        let _ = fs::remove_dir_all(&dir);
    }
}
