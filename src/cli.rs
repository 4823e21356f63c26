use crate::extractor::DEFAULT_TAG;
use crate::output::emit;
use crate::{check, generate, GenerateOptions};
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// jsondoc-md - Generate a Markdown API reference from JSON descriptors in source comments
#[derive(Parser, Debug)]
#[command(name = "jsondoc-md")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Source file containing descriptor comments
    #[arg(value_name = "SOURCE_FILE")]
    pub source_path: PathBuf,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Tag word that follows the comment opener of a descriptor
    #[arg(short = 't', long = "tag", value_name = "WORD", default_value = DEFAULT_TAG)]
    pub tag: String,

    /// Only validate the descriptors; write no Markdown
    #[arg(long = "check")]
    pub check: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.source_path.exists() {
        anyhow::bail!(
            "Source file does not exist: {}",
            args.source_path.display()
        );
    }

    if !args.source_path.is_file() {
        anyhow::bail!("Source path is not a file: {}", args.source_path.display());
    }

    if args.tag.is_empty() || args.tag.contains(char::is_whitespace) {
        anyhow::bail!("Tag must be a single non-empty word, got {:?}", args.tag);
    }

    info!("Source file: {}", args.source_path.display());
    info!("Tag: {}", args.tag);
    if args.check {
        info!("Output: none (check only)");
    } else if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let source = fs::read_to_string(&args.source_path)
        .with_context(|| format!("Failed to read source file: {}", args.source_path.display()))?;
    debug!("Read {} bytes from {}", source.len(), args.source_path.display());

    let options = GenerateOptions { tag: args.tag };

    if args.check {
        let summary = check(&source, &options)?;
        info!(
            "{}: {} descriptors OK ({} functions, class descriptor: {})",
            args.source_path.display(),
            summary.regions,
            summary.functions,
            summary.has_class
        );
        return Ok(());
    }

    // Render everything before writing so a bad descriptor produces no output
    let markdown = generate(&source, &options)?;
    emit(&markdown, args.output_path.as_deref())?;

    info!("Documentation generated for {}", args.source_path.display());
    Ok(())
}
