use super::path::{document_dir, normalize, with_relative_prefix};
use super::ImageResolver;
use crate::error::Result;
use crate::types::Resolution;
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in resolver for images stored next to the document
///
/// Locates the image relative to the document's directory. When the file
/// exists, the import path is that location relative to the document
/// directory, prefixed with `./` unless it climbs to a parent directory. A
/// missing file is no decision.
///
/// # Examples
/// ```no_run
/// use hast_img_import::resolve::{DefaultResolver, ImageResolver};
/// use hast_img_import::Resolution;
/// use std::path::Path;
///
/// let resolution = DefaultResolver
///     .resolve("./img1.png", Path::new("docs/index.md"))
///     .unwrap();
/// assert_eq!(resolution, Resolution::import("./img1.png"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl ImageResolver for DefaultResolver {
    fn resolve(&self, image_path: &str, document_path: &Path) -> Result<Resolution> {
        let dir = absolute_dir(document_path)?;
        let target = normalize(&dir.join(image_path));

        if !fs::exists(&target)? {
            return Ok(Resolution::Defer);
        }

        Ok(Resolution::Import(with_relative_prefix(&relative_to(&dir, &target))))
    }
}

/// Check whether an import path points at an existing file
///
/// Relative paths are taken from the document's directory; the query string
/// is ignored.
pub fn import_target_exists(import_path: &str, document_path: &Path) -> Result<bool> {
    let (path, _query) = super::path::split_query(import_path);
    let dir = absolute_dir(document_path)?;
    Ok(fs::exists(normalize(&dir.join(path)))?)
}

/// Path of `target` relative to `base`, rendered with `/` separators
fn relative_to(base: &Path, target: &Path) -> String {
    let path = diff_paths(target, base).unwrap_or_else(|| target.to_path_buf());
    let rendered = path.display().to_string();
    if cfg!(windows) {
        rendered.replace('\\', "/")
    } else {
        rendered
    }
}

/// Absolute, normalized directory of the document
fn absolute_dir(document_path: &Path) -> Result<PathBuf> {
    let dir = std::path::absolute(document_dir(document_path))?;
    Ok(normalize(&dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs/images")).unwrap();
        fs::write(dir.path().join("docs/img1.png"), b"png").unwrap();
        fs::write(dir.path().join("docs/images/img2.png"), b"png").unwrap();
        fs::write(dir.path().join("shared.png"), b"png").unwrap();
        let document = dir.path().join("docs/index.md");
        (dir, document)
    }

    #[test]
    fn test_resolve_sibling_image() {
        let (_dir, document) = site();
        let resolution = DefaultResolver.resolve("./img1.png", &document).unwrap();
        assert_eq!(resolution, Resolution::import("./img1.png"));
    }

    #[test]
    fn test_resolve_adds_relative_prefix() {
        let (_dir, document) = site();
        let resolution = DefaultResolver.resolve("images/img2.png", &document).unwrap();
        assert_eq!(resolution, Resolution::import("./images/img2.png"));
    }

    #[test]
    fn test_resolve_parent_directory() {
        let (_dir, document) = site();
        let resolution = DefaultResolver.resolve("../shared.png", &document).unwrap();
        assert_eq!(resolution, Resolution::import("../shared.png"));
    }

    #[test]
    fn test_resolve_normalizes_detours() {
        let (_dir, document) = site();
        let resolution = DefaultResolver
            .resolve("./images/../img1.png", &document)
            .unwrap();
        assert_eq!(resolution, Resolution::import("./img1.png"));
    }

    #[test]
    fn test_resolve_absolute_image_path() {
        let (dir, document) = site();
        let absolute = dir.path().join("docs/images/img2.png");
        let resolution = DefaultResolver
            .resolve(absolute.to_str().unwrap(), &document)
            .unwrap();
        assert_eq!(resolution, Resolution::import("./images/img2.png"));
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(relative_to(Path::new("/a/b"), Path::new("/a/b/img/c.png")), "img/c.png");
        assert_eq!(relative_to(Path::new("/a/b/c"), Path::new("/a/x.png")), "../../x.png");
        assert_eq!(relative_to(Path::new("/a/b"), Path::new("/a/b")), "");
    }

    #[test]
    fn test_missing_file_is_deferred() {
        let (_dir, document) = site();
        let resolution = DefaultResolver.resolve("./nope.png", &document).unwrap();
        assert_eq!(resolution, Resolution::Defer);
    }

    #[test]
    fn test_import_target_exists() {
        let (_dir, document) = site();
        assert!(import_target_exists("./img1.png?srcset", &document).unwrap());
        assert!(import_target_exists("../shared.png", &document).unwrap());
        assert!(!import_target_exists("$lib/img1.png", &document).unwrap());
    }
}
