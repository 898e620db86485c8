use super::ids::{IdAllocator, PrefixIds};
use crate::resolve::ImageResolver;
use std::fmt;

/// Configuration of the image import transform
///
/// # Examples
/// ```
/// use hast_img_import::{ImportOptions, Resolution};
/// use std::path::Path;
///
/// let options = ImportOptions::new()
///     .with_id(|i: usize| format!("__id{}", i))
///     .with_resolver(|src: &str, _doc: &Path| {
///         if src.starts_with("$lib/") { Resolution::import(src) } else { Resolution::Defer }
///     });
/// assert!(!options.check_existence);
/// ```
pub struct ImportOptions {
    /// Identifier generator (`__img_<n>` by default)
    pub id: Box<dyn IdAllocator>,
    /// Resolver consulted before the built-in one
    pub resolve: Option<Box<dyn ImageResolver>>,
    /// Discard resolved paths whose target file does not exist
    pub check_existence: bool,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override identifier generation
    pub fn with_id(mut self, id: impl IdAllocator + 'static) -> Self {
        self.id = Box::new(id);
        self
    }

    /// Consult `resolver` before the built-in resolver
    pub fn with_resolver(mut self, resolver: impl ImageResolver + 'static) -> Self {
        self.resolve = Some(Box::new(resolver));
        self
    }

    /// Discard resolved paths that do not exist on disk
    pub fn check_existence(mut self, check: bool) -> Self {
        self.check_existence = check;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            id: Box::new(PrefixIds::default()),
            resolve: None,
            check_existence: false,
        }
    }
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("resolve", &self.resolve.as_ref().map(|_| "<custom>"))
            .field("check_existence", &self.check_existence)
            .finish_non_exhaustive()
    }
}
