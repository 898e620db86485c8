pub mod default;
pub mod path;

use crate::error::Result;
use crate::types::Resolution;
use std::path::Path;

// Re-export commonly used items
pub use default::{import_target_exists, DefaultResolver};
pub use path::{document_dir, normalize, split_query, with_relative_prefix};

/// Decides the import path for a local image
///
/// Implemented by the built-in [`DefaultResolver`] and by any closure
/// `Fn(&str, &Path) -> Resolution`. The resolver sees the image path without
/// its query string.
pub trait ImageResolver {
    fn resolve(&self, image_path: &str, document_path: &Path) -> Result<Resolution>;
}

impl<F> ImageResolver for F
where
    F: Fn(&str, &Path) -> Resolution,
{
    fn resolve(&self, image_path: &str, document_path: &Path) -> Result<Resolution> {
        Ok(self(image_path, document_path))
    }
}

/// Run an image source through a chain of resolvers
///
/// Resolvers are tried in order. The first `Import` wins and `Skip` stops
/// the chain; `Defer` (or an empty `Import`) moves on to the next resolver.
/// The query string of `src` is split off before resolution and appended
/// verbatim to the returned path.
///
/// # Arguments
/// * `src` - Raw local image source, possibly with a query string
/// * `document_path` - Path of the document referencing the image
/// * `resolvers` - Resolvers to consult, in priority order
///
/// # Returns
/// * `Ok(Some(String))` - Import path with the original query string
/// * `Ok(None)` - The image should be left untouched
/// * `Err(ImportError)` - If a resolver failed (e.g. filesystem error)
///
/// # Examples
/// ```no_run
/// use hast_img_import::resolve::{resolve_image, DefaultResolver, ImageResolver};
/// use std::path::Path;
///
/// let resolvers: [&dyn ImageResolver; 1] = [&DefaultResolver];
/// let import = resolve_image("./img1.png?srcset", Path::new("docs/index.md"), &resolvers).unwrap();
/// assert_eq!(import.as_deref(), Some("./img1.png?srcset"));
/// ```
pub fn resolve_image(
    src: &str,
    document_path: &Path,
    resolvers: &[&dyn ImageResolver],
) -> Result<Option<String>> {
    let (image_path, query) = split_query(src);

    for resolver in resolvers {
        match resolver.resolve(image_path, document_path)? {
            Resolution::Import(path) if !path.is_empty() => {
                return Ok(Some(format!("{}{}", path, query)));
            }
            Resolution::Skip => return Ok(None),
            Resolution::Import(_) | Resolution::Defer => {}
        }
    }

    Ok(None)
}
