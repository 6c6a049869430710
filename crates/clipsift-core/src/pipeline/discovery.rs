//! File discovery for finding candidate images in the input directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Discovers image files in a directory.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Discover all supported image files directly inside a directory.
    ///
    /// The scan is a single directory level (subdirectories are not entered).
    /// Returns a deduplicated list sorted by path, so repeated runs over an
    /// unchanged directory enumerate candidates in the same order.
    pub fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && self.is_supported(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files.dedup();
        files
    }

    /// Check if a file has a supported extension (case-insensitive).
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.to_lowercase() == ext_lower)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.JPEG")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(discovery.is_supported(Path::new("test.PNG")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("test.gif")));
        assert!(!discovery.is_supported(Path::new("noextension")));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.png"));
        touch(&dir.path().join("a.jpg"));
        touch(&dir.path().join("c.JPEG"));
        touch(&dir.path().join("notes.txt"));

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let files = discovery.discover(dir.path());

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.JPEG"]);
    }

    #[test]
    fn test_discover_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.jpg"));
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        touch(&sub.join("deep.jpg"));

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let files = discovery.discover(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.jpg"));
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = FileDiscovery::new(ProcessingConfig::default());
        assert!(discovery.discover(dir.path()).is_empty());
    }
}
