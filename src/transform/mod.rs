//! Image import transform over compiled markdown trees
//!
//! This module rewrites local image sources into script imports so a bundler
//! can resolve, hash and optimize the referenced files:
//!
//! - `classify`: script container and image reference predicates
//! - `ids`: identifier allocation for generated bindings
//! - `options`: transform configuration
//! - `script`: instance script find-or-create, import splicing, module lookups

pub mod classify;
pub mod ids;
pub mod options;
pub mod script;

use crate::error::Result;
use crate::resolve::{import_target_exists, resolve_image, DefaultResolver, ImageResolver};
use crate::tree::{collect_paths, node_at, node_at_mut, Node, NodePath};
use crate::types::FileContext;
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::{debug, warn};

// Re-export commonly used items
pub use classify::{is_image_reference, is_instance_script, is_module_script, is_script_container};
pub use ids::{IdAllocator, PrefixIds, DEFAULT_ID_PREFIX};
pub use options::ImportOptions;
pub use script::{add_import, get_or_create_instance_script, indirection_token, lookup_module_entry};

/// Transform that turns local image sources into script imports
///
/// For every image element with a local `src`, the transform resolves the
/// file, allocates an identifier, appends `;import <id> from "<path>";` to
/// the instance script (creating one at the top of the document if needed)
/// and replaces the `src` with `{<id>}`. Remote images (`http://`,
/// `https://`) and images no resolver accepts are left as authored.
///
/// # Examples
/// ```no_run
/// use hast_img_import::{FileContext, ImageImporter, ImportOptions};
/// use hast_img_import::tree::Node;
/// use serde_json::json;
///
/// let mut tree: Node = serde_json::from_value(json!({
///     "type": "root",
///     "children": [{
///         "type": "element",
///         "tagName": "img",
///         "properties": {"src": "./img1.png", "alt": "Image1"},
///         "children": []
///     }]
/// })).unwrap();
///
/// let importer = ImageImporter::new(ImportOptions::default());
/// importer.transform(&mut tree, &FileContext::new("docs/index.md")).unwrap();
/// // tree now starts with <script>;import __img_0 from "./img1.png";</script>
/// // and the image src is "{__img_0}"
/// ```
#[derive(Debug, Default)]
pub struct ImageImporter {
    options: ImportOptions,
}

/// One image scheduled for import
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedImport {
    image: NodePath,
    id: String,
    import_path: String,
}

/// Everything the apply phase needs, gathered without touching the tree
#[derive(Debug, Default)]
struct ImportPlan {
    instance_script: Option<NodePath>,
    imports: Vec<PlannedImport>,
}

impl ImageImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Rewrite the image sources of `tree` into script imports
    ///
    /// # Arguments
    /// * `tree` - The document root, mutated in place
    /// * `file` - Context carrying the document path
    ///
    /// # Returns
    /// * `Ok(())` - The tree was transformed (or left alone when the file
    ///   context has no filename)
    /// * `Err(ImportError)` - If a resolver or the filesystem failed; the
    ///   tree is not modified in that case
    pub fn transform(&self, tree: &mut Node, file: &FileContext) -> Result<()> {
        let Some(document_path) = file.filename() else {
            warn!("file has no filename, image imports skipped");
            return Ok(());
        };

        let plan = self.plan(tree, document_path)?;
        if plan.imports.is_empty() {
            return Ok(());
        }

        apply(tree, plan)
    }

    /// Scan the tree and resolve every image, without mutating anything
    fn plan(&self, tree: &Node, document_path: &Path) -> Result<ImportPlan> {
        // The last container of each kind wins
        let instance_script = collect_paths(tree, is_instance_script).pop();
        let module_script = collect_paths(tree, is_module_script)
            .pop()
            .and_then(|path| node_at(tree, &path))
            .and_then(Node::raw_value);
        let images = collect_paths(tree, is_image_reference);

        // Custom resolver first, built-in last
        let mut resolvers: Vec<&dyn ImageResolver> = Vec::with_capacity(2);
        if let Some(custom) = &self.options.resolve {
            resolvers.push(&**custom);
        }
        resolvers.push(&DefaultResolver);

        let mut imports = Vec::new();

        for image in images {
            let Some(src) = node_at(tree, &image).and_then(|node| node.property("src")) else {
                continue;
            };

            let source = effective_source(src, module_script)?;
            if is_remote(&source) {
                debug!(src = %source, "remote image left untouched");
                continue;
            }

            let Some(import_path) = resolve_image(&source, document_path, &resolvers)? else {
                debug!(src = %source, "no resolver accepted image");
                continue;
            };

            if self.options.check_existence && !import_target_exists(&import_path, document_path)? {
                debug!(src = %source, import = %import_path, "resolved image does not exist");
                continue;
            }

            let id = self.options.id.allocate_id(imports.len());
            debug!(%id, import = %import_path, "importing image");

            imports.push(PlannedImport {
                image,
                id,
                import_path,
            });
        }

        Ok(ImportPlan {
            instance_script,
            imports,
        })
    }
}

/// Rewrite the planned images, then splice their imports into the script
///
/// Image paths are only valid until the script container is inserted, so
/// sources are rewritten first.
fn apply(tree: &mut Node, plan: ImportPlan) -> Result<()> {
    for import in &plan.imports {
        if let Some(node) = node_at_mut(tree, &import.image) {
            node.set_property("src", binding_reference(&import.id));
        }
    }

    let script = get_or_create_instance_script(tree, plan.instance_script)?;
    if let Some(node) = node_at_mut(tree, &script) {
        for import in &plan.imports {
            add_import(node, &import.id, &import.import_path);
        }
    }

    Ok(())
}

/// Image path to resolve, following `{identifier}` tokens into the module script
fn effective_source(src: &str, module_script: Option<&str>) -> Result<String> {
    if let (Some(key), Some(payload)) = (indirection_token(src), module_script) {
        if let Some(value) = lookup_module_entry(payload, key)? {
            return Ok(value);
        }
    }
    Ok(src.to_string())
}

fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// `{id}`: read the script binding `id` at render time
fn binding_reference(id: &str) -> String {
    format!("{{{}}}", id)
}

/// Transform a JSON-serialized tree
///
/// # Arguments
/// * `tree` - hast tree as JSON
/// * `file` - Context carrying the document path
/// * `importer` - The configured transform
///
/// # Returns
/// * `Ok(JsonValue)` - The transformed tree
/// * `Err(ImportError)` - If the JSON is not a valid tree or the transform failed
pub fn transform_json(tree: JsonValue, file: &FileContext, importer: &ImageImporter) -> Result<JsonValue> {
    let mut root = Node::try_from(tree)?;
    importer.transform(&mut root, file)?;
    Ok(JsonValue::from(root))
}
