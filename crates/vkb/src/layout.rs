//! Key layouts loaded from TOML.
//!
//! ```toml
//! rows = 1
//! columns = 4
//! backspace_index = 3    # optional, defaults to columns - 1
//! key_sets = ["abc«", "ABC«"]
//! ```

use std::path::{Path, PathBuf};

use vkb_core::{KeyGrid, KeyGridSpec};

use crate::error::{CliError, Result};

/// Root that relative `--image` paths are resolved against.
pub const IMAGE_ROOT: &str = "/mnt/SDCARD/System/resources/";

/// Parse a layout document.
pub fn parse_layout(text: &str, path: &Path) -> Result<KeyGrid> {
    let spec: KeyGridSpec = toml::from_str(text).map_err(|source| CliError::Layout {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(KeyGrid::from_spec(&spec)?)
}

/// Read and parse a layout file.
pub fn load_layout(path: &Path) -> Result<KeyGrid> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_layout(&text, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = grid.geometry().rows(),
        columns = grid.geometry().columns(),
        key_sets = grid.key_set_count(),
        "layout loaded"
    );
    Ok(grid)
}

/// Background image location: absolute paths stay, relative ones live
/// under [`IMAGE_ROOT`].
#[must_use]
pub fn resolve_image(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(IMAGE_ROOT).join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vkb_core::VkbError;

    #[test]
    fn parses_small_layout() {
        let text = r#"
            rows = 1
            columns = 4
            key_sets = ["abc«", "ABC«"]
        "#;
        let grid = parse_layout(text, Path::new("mini.toml")).unwrap();
        assert_eq!(grid.geometry().cell_count(), 4);
        assert_eq!(grid.backspace_index(), 3);
        assert_eq!(grid.key(1, 2), Some("C"));
    }

    #[test]
    fn toml_syntax_error_names_file() {
        let err = parse_layout("rows = [", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, CliError::Layout { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn key_count_mismatch_is_a_layout_error() {
        let text = "rows = 2\ncolumns = 2\nkey_sets = [\"abc\"]\n";
        let err = parse_layout(text, Path::new("short.toml")).unwrap_err();
        assert!(matches!(err, CliError::Core(VkbError::InvalidLayout { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_layout(Path::new("/nonexistent/vkb/layout.toml")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn relative_images_resolve_under_resources() {
        assert_eq!(
            resolve_image(Path::new("bg.png")),
            PathBuf::from("/mnt/SDCARD/System/resources/bg.png")
        );
        assert_eq!(
            resolve_image(Path::new("/tmp/bg.png")),
            PathBuf::from("/tmp/bg.png")
        );
    }
}
