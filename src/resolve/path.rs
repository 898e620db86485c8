use std::path::{Component, Path, PathBuf};

/// Split an image source into its path and query parts
///
/// The query part keeps its leading `?` so it can be appended back verbatim.
///
/// # Examples
/// ```
/// use hast_img_import::resolve::split_query;
///
/// assert_eq!(split_query("./a.png?srcset"), ("./a.png", "?srcset"));
/// assert_eq!(split_query("./a.png"), ("./a.png", ""));
/// ```
pub fn split_query(src: &str) -> (&str, &str) {
    match src.find('?') {
        Some(index) => src.split_at(index),
        None => (src, ""),
    }
}

/// Directory containing the document, `.` when it has none
pub fn document_dir(document_path: &Path) -> &Path {
    match document_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Lexically normalize a path
///
/// Removes `.` components and folds `..` into the preceding normal
/// component. Leading `..` components of a relative path are kept; `..`
/// directly under the root is dropped. The filesystem is not consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}

/// Prefix a relative import path with `./` unless it climbs to a parent
pub fn with_relative_prefix(relative: &str) -> String {
    let climbs = relative == ".." || relative.starts_with("../");
    if climbs {
        relative.to_string()
    } else if relative.is_empty() {
        "./".to_string()
    } else {
        format!("./{}", relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query_at_first_question_mark() {
        assert_eq!(split_query("a.png?w=1?h=2"), ("a.png", "?w=1?h=2"));
        assert_eq!(split_query("?only"), ("", "?only"));
    }

    #[test]
    fn test_document_dir() {
        assert_eq!(document_dir(Path::new("test/index.md")), Path::new("test"));
        assert_eq!(document_dir(Path::new("index.md")), Path::new("."));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("./x/y/")), PathBuf::from("x/y"));
    }

    #[test]
    fn test_with_relative_prefix() {
        assert_eq!(with_relative_prefix("img1.png"), "./img1.png");
        assert_eq!(with_relative_prefix("../img1.png"), "../img1.png");
        assert_eq!(with_relative_prefix("..img.png"), "./..img.png");
        assert_eq!(with_relative_prefix(""), "./");
    }
}
