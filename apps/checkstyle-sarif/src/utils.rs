//! Small helpers shared by the binary and printers.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Display `path` relative to `base` when possible.
pub fn display_path(path: &Path, base: &Path) -> String {
    match pathdiff::diff_paths(path, base) {
        Some(rel) if !rel.as_os_str().is_empty() && !rel.starts_with("..") => {
            rel.to_string_lossy().to_string()
        }
        _ => path.to_string_lossy().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_path_relative_inside_base() {
        let base = PathBuf::from("/work/repo");
        assert_eq!(
            display_path(Path::new("/work/repo/build/checkstyle.xml"), &base),
            "build/checkstyle.xml"
        );
    }

    #[test]
    fn test_display_path_outside_base_stays_absolute() {
        let base = PathBuf::from("/work/repo");
        assert_eq!(
            display_path(Path::new("/tmp/report.xml"), &base),
            "/tmp/report.xml"
        );
    }
}
