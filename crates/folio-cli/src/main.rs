//! Folio CLI - normalize, count, truncate and embed images in stored documents.

use clap::{Parser, Subcommand};
use folio::editor::{ConfigError, Editor, EditorConfig, StepResult};
use folio::media_node::MediaAttrsPatch;
use folio::transforms::{MergeText, Pipeline, StripEmpty, WordLimit, count_node_words};
use folio::{
    Alignment, Document, EmitError, EmitOptions, Length, MediaAttrs, ParseError, Resource,
    TransformError, Transformer, WrapStyle, html, plaintext,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Rich-text document tools", long_about = None)]
struct Cli {
    /// Editor config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse stored HTML and write it back in canonical form
    Normalize {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Output file (omit for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        to: Format,

        /// Put each top-level block on its own line
        #[arg(long)]
        pretty: bool,

        /// Wrap HTML output in a standalone page
        #[arg(long, conflicts_with = "pretty")]
        full: bool,

        /// Drop empty paragraphs and whitespace-only text
        #[arg(long)]
        strip_empty: bool,
    },

    /// Count the words in a document
    Count {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// List the media elements of a document as JSON
    Media {
        /// Input file (use - for stdin)
        input: PathBuf,
    },

    /// Cut a document down to its first N words
    Truncate {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Word limit (defaults to the config's word_limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output file (omit for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an image as a media element with an embedded data URI
    Embed {
        /// Image file to embed
        image: PathBuf,

        /// Append the element to this document instead (use - for stdin)
        #[arg(long)]
        into: Option<PathBuf>,

        #[arg(long, value_parser = parse_alignment)]
        align: Option<Alignment>,

        #[arg(long, value_parser = parse_wrap)]
        wrap: Option<WrapStyle>,

        #[arg(long, value_parser = parse_length)]
        wrap_margin: Option<Length>,

        #[arg(long, value_parser = parse_length)]
        width: Option<Length>,

        #[arg(long, value_parser = parse_length)]
        height: Option<Length>,

        /// Alternative text
        #[arg(long)]
        alt: Option<String>,

        /// Output file (omit for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Html,
    Plaintext,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no word limit given; pass --limit or set word_limit in the config file")]
    NoLimit,

    #[error("unrecognized image type: {}", .0.display())]
    UnknownImage(PathBuf),

    #[error("the document has no place to insert the image")]
    NotInserted,
}

#[derive(Debug, Serialize)]
struct CountReport {
    words: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => EditorConfig::from_path(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::Normalize {
            input,
            output,
            to,
            pretty,
            full,
            strip_empty,
        } => {
            let doc = tidy(parse(&read_input(&input)?)?, strip_empty)?;
            let bytes = match to {
                Format::Html if full => html::emit_full_document(&doc)?.value,
                Format::Html => html::emit_with_options(&doc, &EmitOptions { pretty })?.value,
                Format::Plaintext => plaintext::emit(&doc)?.value,
            };
            write_output(output.as_deref(), &bytes)?;
        }
        Commands::Count { input, json } => {
            let doc = parse(&read_input(&input)?)?;
            let words = count_node_words(&doc.content);
            let limit = config.word_limit;
            let report = CountReport {
                words,
                limit,
                remaining: limit.map(|limit| limit.saturating_sub(words)),
            };
            print_report(&report, json)?;
        }
        Commands::Media { input } => {
            let doc = parse(&read_input(&input)?)?;
            let mut stdout = io::stdout();
            serde_json::to_writer_pretty(&mut stdout, &media_list(&doc))?;
            writeln!(stdout)?;
        }
        Commands::Truncate {
            input,
            limit,
            output,
        } => {
            let limit = limit.or(config.word_limit).ok_or(CliError::NoLimit)?;
            let mut doc = parse(&read_input(&input)?)?;
            match WordLimit::new(limit).apply(&doc.content) {
                Some(content) => {
                    info!(limit, "document truncated");
                    doc.content = content;
                }
                None => debug!(limit, "document within limit"),
            }
            write_output(output.as_deref(), &html::emit(&doc)?.value)?;
        }
        Commands::Embed {
            image,
            into,
            align,
            wrap,
            wrap_margin,
            width,
            height,
            alt,
            output,
        } => {
            let patch = MediaAttrsPatch {
                alignment: align,
                wrap_style: wrap,
                wrap_margin,
                width,
                height,
                alt,
                title: None,
            };

            let document = match &into {
                Some(path) => read_input(path)?,
                None => String::new(),
            };
            let html = embed(&document, &image, patch, config)?;
            write_output(output.as_deref(), html.as_bytes())?;
        }
    }

    Ok(())
}

/// Run the cleanup passes requested for `normalize`.
fn tidy(doc: Document, strip_empty: bool) -> Result<Document, CliError> {
    let mut pipeline = Pipeline::new();
    if strip_empty {
        pipeline = pipeline.then(StripEmpty);
    }
    // Stripping can leave text runs adjacent
    let doc = pipeline.then(MergeText).transform(doc)?;
    Ok(doc)
}

fn embed(
    input: &str,
    image: &Path,
    patch: MediaAttrsPatch,
    config: EditorConfig,
) -> Result<String, CliError> {
    let mime = image
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Resource::image_mime_for_extension)
        .ok_or_else(|| CliError::UnknownImage(image.to_path_buf()))?;
    let data = fs::read(image).map_err(|source| CliError::Read {
        path: image.to_path_buf(),
        source,
    })?;
    let resource = Resource::new(mime, data).with_name(image.display().to_string());

    let mut editor = Editor::new(config.with_initial_content(input));
    // An empty document keeps its caret so the image replaces the empty paragraph
    if !editor.is_empty() {
        let end = editor.document_size() as i64;
        editor.set_selection(end, end);
    }
    if editor.insert_media_bytes(&resource, patch) == StepResult::NotApplicable {
        return Err(CliError::NotInserted);
    }
    Ok(editor.get_content())
}

fn media_list(doc: &Document) -> Vec<&MediaAttrs> {
    doc.descendants().filter_map(|node| node.as_media()).collect()
}

fn print_report(report: &CountReport, json: bool) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    if json {
        serde_json::to_writer(&mut stdout, report)?;
        writeln!(stdout)?;
        return Ok(());
    }
    match (report.limit, report.remaining) {
        (Some(limit), Some(remaining)) => {
            writeln!(stdout, "{} words ({remaining} of {limit} remaining)", report.words)?
        }
        _ => writeln!(stdout, "{} words", report.words)?,
    }
    Ok(())
}

fn parse(input: &str) -> Result<Document, CliError> {
    let result = html::parse(input)?;

    // Report warnings to stderr
    for warning in &result.warnings {
        warn!("{}", warning.message);
    }

    Ok(result.value)
}

fn read_input(input: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::Read {
        path: input.to_path_buf(),
        source,
    };
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        Ok(buf)
    } else {
        fs::read_to_string(input).map_err(read_err)
    }
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<(), CliError> {
    match output {
        Some(path) if path.as_os_str() != "-" => fs::write(path, bytes)?,
        _ => io::stdout().write_all(bytes)?,
    }
    Ok(())
}

fn parse_alignment(value: &str) -> Result<Alignment, String> {
    Alignment::parse(value).ok_or_else(|| format!("expected left, center or right, got {value:?}"))
}

fn parse_wrap(value: &str) -> Result<WrapStyle, String> {
    WrapStyle::parse(value).ok_or_else(|| {
        let known: Vec<_> = WrapStyle::ALL.iter().map(|w| w.as_str()).collect();
        format!("expected one of {}, got {value:?}", known.join(", "))
    })
}

fn parse_length(value: &str) -> Result<Length, String> {
    Length::parse(value).ok_or_else(|| format!("invalid length {value:?}"))
}
