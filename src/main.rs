//! Command-line interface for xsdparse

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use xsdparse::{Limits, NodeRef, ParserOptions, SchemaParser};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdparse")]
#[command(author, version, about = "XML Schema 1.0 document parser", long_about = None)]
struct Cli {
    /// Apply strict resource limits
    #[arg(long, global = true)]
    strict: bool,

    /// Reject attributes from foreign namespaces
    #[arg(long, global = true)]
    no_foreign_attributes: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that schema documents parse
    Check {
        /// Paths to the XSD files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the parsed component tree of a schema document
    Tree {
        /// Path to the XSD file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let limits = if cli.strict {
        Limits::strict()
    } else {
        Limits::default()
    };
    let options = ParserOptions::new()
        .with_limits(limits)
        .with_foreign_attributes(!cli.no_foreign_attributes);

    let result = match cli.command {
        Commands::Check { files } => cmd_check(&files, options),
        Commands::Tree { file, json } => cmd_tree(file, json, options),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse every file; report each failure and keep going
#[cfg(feature = "cli")]
fn cmd_check(files: &[PathBuf], options: ParserOptions) -> Result<bool, Box<dyn std::error::Error>> {
    let parser = SchemaParser::new()?.with_options(options);
    let mut all_ok = true;

    for file in files {
        match parser.parse_file(file) {
            Ok(document) => println!(
                "{}: ok ({} components)",
                file.display(),
                document.node_count()
            ),
            Err(e) => {
                all_ok = false;
                eprintln!("{}: {}", file.display(), e);
            }
        }
    }
    Ok(all_ok)
}

#[cfg(feature = "cli")]
fn cmd_tree(file: PathBuf, json: bool, options: ParserOptions) -> Result<bool, Box<dyn std::error::Error>> {
    let parser = SchemaParser::new()?.with_options(options);
    let document = parser.parse_file(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document.to_json())?);
    } else {
        print_node(document.root(), 0);
    }
    Ok(true)
}

#[cfg(feature = "cli")]
fn print_node(node: NodeRef<'_>, depth: usize) {
    let mut line = format!("{}{}", "  ".repeat(depth), node.kind());
    if let Some(name) = node.name() {
        line.push_str(&format!(" name={}", name));
    }
    if let Some(reference) = node.properties().reference() {
        line.push_str(&format!(" ref={}", reference));
    }
    if let Some(occurs) = node.occurs() {
        if occurs != xsdparse::values::Occurs::once() {
            let max = occurs
                .max
                .map_or_else(|| "unbounded".to_string(), |m| m.to_string());
            line.push_str(&format!(" [{}..{}]", occurs.min, max));
        }
    }
    println!("{}", line);

    for child in node.children() {
        print_node(child, depth + 1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
