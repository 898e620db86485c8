use anyhow::{Context, Result};
use clap::Parser;
use hast_img_import::{transform_json, FileContext, ImageImporter, ImportOptions, PrefixIds};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "hast-img-import")]
#[command(version, about = "Turn local image sources in a hast tree into script imports")]
#[command(long_about = "Turn local image sources in a hast tree into script imports\n\n\
    Reads a JSON-serialized hast tree, rewrites every local image source into\n\
    a `{binding}` reference and adds the matching import to the document's\n\
    instance script. JSON output is pretty-printed by default.\n\n  \
    hast-img-import tree.json --document docs/index.md [-o out.json] [--compact] [-v]")]
struct Cli {
    /// Input JSON tree path (`-` for stdin)
    input: PathBuf,

    /// Markdown document the tree was compiled from (import paths are relative to it)
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// Output JSON file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prefix for generated identifiers
    #[arg(long, default_value = hast_img_import::transform::DEFAULT_ID_PREFIX)]
    id_prefix: String,

    /// Drop imports whose resolved file does not exist
    #[arg(long)]
    check_existence: bool,

    /// Compact JSON output (default is pretty-printed with indentation)
    #[arg(long)]
    compact: bool,

    /// Verbose output for debugging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    debug!(input = %cli.input.display(), "reading tree");

    let text = read_input(&cli.input)?;
    let tree: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON tree: {}", cli.input.display()))?;

    let options = ImportOptions::new()
        .with_id(PrefixIds::new(cli.id_prefix.clone()))
        .check_existence(cli.check_existence);
    let importer = ImageImporter::new(options);

    let file = FileContext {
        filename: cli.document.clone(),
    };

    let json = transform_json(tree, &file, &importer).context("Failed to transform tree")?;

    // Format output (pretty by default, compact if flag is set)
    let output = if cli.compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };

    match cli.output.as_ref() {
        Some(path) => {
            debug!(output = %path.display(), "writing tree");
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

/// Read the input tree from a file or stdin
fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read tree from stdin")?;
        return Ok(text);
    }

    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
}
