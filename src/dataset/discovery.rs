use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions (lowercase, without the dot) recognized as images.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// A candidate person: one immediate subdirectory of the dataset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFolder {
    pub name: String,
    pub path: PathBuf,
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Immediate entries of `directory`, sorted by file name for consistent ordering.
fn immediate_entries(directory: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        paths.push(entry?.into_path());
    }

    Ok(paths)
}

/// List the person folders under `root`. Anything that is not a directory is ignored.
pub fn discover_people(root: &Path) -> Result<Vec<PersonFolder>, walkdir::Error> {
    let people = immediate_entries(root)?
        .into_iter()
        .filter(|path| path.is_dir())
        .map(|path| PersonFolder {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path,
        })
        .collect();

    Ok(people)
}

/// List the image files directly inside a person folder, sorted by file name.
pub fn discover_images(folder: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let images = immediate_entries(folder)?
        .into_iter()
        .filter(|path| path.is_file() && is_image(path))
        .collect();

    Ok(images)
}
