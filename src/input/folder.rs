use std::io;
use std::path::{Path, PathBuf};

/// Extensions picked up in batch mode, compared case-insensitively
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// List the convertible images directly inside `dir`, sorted by file name.
/// Subdirectories are not descended into.
pub fn list_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("b.JPG")));
        assert!(is_supported_image(Path::new("dir/c.Jpeg")));
        assert!(!is_supported_image(Path::new("d.gif")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn test_list_images_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt", "c.JPEG"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.png", "c.JPEG"]);
    }
}
