//! # hast-img-import
//!
//! Rewrites locally referenced images in a compiled markdown (hast) tree into
//! script imports, so a bundler can resolve, hash and optimize the files.
//!
//! `![Image1](./img1.png)` compiles to an `img` element; after the transform
//! the document carries
//!
//! ```text
//! <script>;import __img_0 from "./img1.png";</script>
//! <p><img src="{__img_0}" alt="Image1"></p>
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use hast_img_import::{transform_json, FileContext, ImageImporter, ImportOptions};
//!
//! let text = std::fs::read_to_string("index.hast.json").unwrap();
//! let tree: serde_json::Value = serde_json::from_str(&text).unwrap();
//!
//! let importer = ImageImporter::new(ImportOptions::default());
//! let output = transform_json(tree, &FileContext::new("docs/index.md"), &importer).unwrap();
//! println!("{}", serde_json::to_string_pretty(&output).unwrap());
//! ```

pub mod error;
pub mod resolve;
pub mod transform;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use error::{ImportError, Result};
pub use resolve::{DefaultResolver, ImageResolver};
pub use transform::{transform_json, IdAllocator, ImageImporter, ImportOptions, PrefixIds};
pub use types::{FileContext, Resolution};
