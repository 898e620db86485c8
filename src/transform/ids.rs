/// Default prefix for generated identifiers
pub const DEFAULT_ID_PREFIX: &str = "__img_";

/// Produces the binding identifier for the n-th imported image
///
/// Implemented by [`PrefixIds`] and by any closure `Fn(usize) -> String`.
/// Ordinals start at 0 and count only images that are actually imported.
pub trait IdAllocator {
    fn allocate_id(&self, ordinal: usize) -> String;
}

impl<F> IdAllocator for F
where
    F: Fn(usize) -> String,
{
    fn allocate_id(&self, ordinal: usize) -> String {
        self(ordinal)
    }
}

/// Identifiers of the form `<prefix><ordinal>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixIds {
    prefix: String,
}

impl PrefixIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for PrefixIds {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdAllocator for PrefixIds {
    fn allocate_id(&self, ordinal: usize) -> String {
        format!("{}{}", self.prefix, ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids() {
        let ids = PrefixIds::default();
        assert_eq!(ids.allocate_id(0), "__img_0");
        assert_eq!(ids.allocate_id(12), "__img_12");
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(PrefixIds::new("photo").allocate_id(3), "photo3");
    }

    #[test]
    fn test_closure_allocator() {
        let ids = |i: usize| format!("__id{}", i);
        assert_eq!(ids.allocate_id(0), "__id0");
    }
}
