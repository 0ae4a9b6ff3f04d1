//! ahk-docs CLI - AutoHotkey documentation lookup.
//!
//! # Usage
//!
//! ```bash
//! # Documentation URL for a symbol
//! ahk-docs url WinSet
//!
//! # Documentation fragment, loaded from a local copy of the docs
//! ahk-docs --docs-root ./docs doc A_LineNumber
//!
//! # Follow a link found inside the WinSet page
//! ahk-docs --docs-root ./docs link WinTitle --context WinSet
//!
//! # Documentation for the symbol at line 3, column 5 (stdin works with -)
//! ahk-docs hover script.ahk 3 5
//!
//! # Parts of a string literal
//! ahk-docs literal '"abc"'
//! ```

use ahk_docs::{
    can_fetch, is_internal_link, literal_offsets, symbol_at, DocsConfig, DocumentationProvider,
    TextRange,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ahk-docs")]
#[command(about = "AutoHotkey documentation lookup")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ahk-docs.yaml in the current directory)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Documentation root: local directory or base URL
    #[arg(long, global = true)]
    docs_root: Option<String>,

    /// Base for printed URLs, when different from the docs root
    #[arg(long, global = true)]
    browse_root: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print documentation URLs for a symbol
    Url {
        /// Command or variable name (e.g., WinSet, A_LineNumber)
        symbol: String,
    },

    /// Print the documentation fragment for a symbol
    Doc {
        /// Command or variable name
        symbol: String,
    },

    /// Print the page a documentation link points to
    Link {
        /// Link target as found in a page (e.g., WinTitle, ../misc/WinTitle.htm)
        href: String,

        /// Symbol whose page contains the link
        #[arg(long)]
        context: String,
    },

    /// Classify a documentation link
    CheckLink {
        /// Link target
        href: String,
    },

    /// Print documentation for the symbol at a position
    Hover {
        /// AutoHotkey file (or - for stdin)
        file: String,

        /// Line number (1-based)
        line: u32,

        /// Column number (1-based)
        column: u32,
    },

    /// Print the parts of a literal token
    Literal {
        /// Token text (e.g., "abc" including quotes)
        token: String,
    },
}

#[derive(Serialize)]
struct LinkReport<'a> {
    href: &'a str,
    internal: bool,
    fetchable: bool,
}

#[derive(Serialize)]
struct LiteralSlot<'a> {
    slot: &'static str,
    range: TextRange,
    text: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> ahk_docs::Result<DocsConfig> {
    let mut config = match &cli.config {
        Some(path) => DocsConfig::load(path)?,
        None => DocsConfig::load_default(&std::env::current_dir()?),
    };
    if let Some(root) = &cli.docs_root {
        config = config.with_docs_root(root.clone());
    }
    if let Some(root) = &cli.browse_root {
        config = config.with_browse_root(root.clone());
    }
    Ok(config)
}

/// Run a command. `Ok(false)` means nothing was found.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    tracing::debug!("Documentation root: {}", config.docs_root);

    match &cli.command {
        Commands::Url { symbol } => {
            let provider = DocumentationProvider::from_config(&config)?;
            let urls = provider.url_for(symbol);
            if urls.is_empty() {
                eprintln!("No documentation for: {}", symbol);
                return Ok(false);
            }
            match cli.format {
                OutputFormat::Text => urls.iter().for_each(|url| println!("{}", url)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&urls)?),
            }
        }

        Commands::Doc { symbol } => {
            let provider = DocumentationProvider::from_config(&config)?;
            let fragment = provider.load_documentation(symbol)?;
            match cli.format {
                OutputFormat::Text => println!("{}", fragment.render()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fragment)?),
            }
        }

        Commands::Link { href, context } => {
            let provider = DocumentationProvider::from_config(&config)?;
            if !provider.can_fetch(Some(href.as_str())) {
                eprintln!("Not a documentation page link: {}", href);
                return Ok(false);
            }
            let fragment = provider.load_external(href, context)?;
            match cli.format {
                OutputFormat::Text => println!("{}", fragment.render()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fragment)?),
            }
        }

        Commands::CheckLink { href } => {
            let report = LinkReport {
                href,
                internal: is_internal_link(Some(href.as_str())),
                fetchable: can_fetch(Some(href.as_str())),
            };
            match cli.format {
                OutputFormat::Text => {
                    println!("internal: {}", report.internal);
                    println!("fetchable: {}", report.fetchable);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }

        Commands::Hover { file, line, column } => {
            let source = if file == "-" {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(file)?
            };

            let Some(symbol) = symbol_at(&source, *line, *column) else {
                if cli.verbose {
                    eprintln!("No symbol at line {}, column {}", line, column);
                }
                return Ok(true);
            };
            tracing::debug!("Symbol at caret: {}", symbol.name);

            let provider = DocumentationProvider::from_config(&config)?;
            match provider.generate_doc(&symbol.name) {
                Some(html) => match cli.format {
                    OutputFormat::Text => println!("{}", html),
                    OutputFormat::Json => {
                        let value = serde_json::json!({
                            "symbol": symbol.name,
                            "range": symbol.range,
                            "urls": provider.url_for(&symbol.name),
                            "contents": html,
                        });
                        println!("{}", serde_json::to_string_pretty(&value)?);
                    }
                },
                None => {
                    if cli.verbose {
                        eprintln!("No documentation available for {}", symbol.name);
                    }
                }
            }
        }

        Commands::Literal { token } => {
            let Some(offsets) = literal_offsets(token) else {
                eprintln!("Not a literal: {}", token);
                return Ok(false);
            };
            let names = ["prefix", "open_delim", "value", "close_delim", "suffix"];
            let slots: Vec<LiteralSlot> = names
                .iter()
                .zip(offsets.slots())
                .filter_map(|(&slot, range)| {
                    let range = range?;
                    Some(LiteralSlot {
                        slot,
                        range,
                        text: range.slice(token).unwrap_or_default(),
                    })
                })
                .collect();
            match cli.format {
                OutputFormat::Text => {
                    for slot in &slots {
                        println!("{:<12} {:<8} {:?}", slot.slot, slot.range.to_string(), slot.text);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&slots)?),
            }
        }
    }

    Ok(true)
}
