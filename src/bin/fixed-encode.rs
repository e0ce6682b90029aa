//! CLI tool to encode delimited rows as fixed-width records.
//!
//! Usage:
//!   fixed-encode <layout.schema> <input.txt>
//!   fixed-encode <layout.schema> <input.txt> -o <output.dat> --crlf
//!
//! Each non-empty input line is one row, with one cell per schema field
//! separated by the delimiter (default `|`). If no output file is
//! specified, writes to stdout.

use clap::Parser;
use fixedwidth::{Encoder, Schema, Value};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Encode delimited rows as fixed-width records described by a schema file.
#[derive(Parser)]
#[command(name = "fixed-encode", version)]
struct Cli {
    /// Schema file: one `NAME KIND POSITION` field per line
    schema: PathBuf,

    /// Input file with one delimited row per line (or /dev/stdin)
    input: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cell delimiter in the input rows
    #[arg(short, long, default_value_t = '|')]
    delimiter: char,

    /// Terminate lines with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Show paths and record counts on stderr, and debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_file(path: &Path, what: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {what} file '{}': {e}", path.display());
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let schema = match Schema::parse(&read_file(&cli.schema, "schema")) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Schema error in '{}': {e}", cli.schema.display());
            process::exit(1);
        }
    };

    let input_text = read_file(&cli.input, "input");
    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (line_num, line) in input_text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match schema.parse_row(line, cli.delimiter) {
            Ok(values) => rows.push(values),
            Err(e) => {
                eprintln!("Input error at line {}: {e}", line_num + 1);
                process::exit(1);
            }
        }
    }

    if cli.verbose {
        eprintln!("Schema: {} ({} fields)", cli.schema.display(), schema.len());
        eprintln!("Input:  {}", cli.input.display());
        eprintln!(
            "Output: {}",
            cli.output
                .as_ref()
                .map_or("(stdout)".to_string(), |p| p.display().to_string())
        );
    }

    let records: Vec<_> = rows.iter().map(|values| schema.row(values)).collect();
    let line_end: &[u8] = if cli.crlf { b"\r\n" } else { b"\n" };

    let result = if let Some(out_path) = &cli.output {
        if let Some(parent) = out_path.parent()
            && !parent.as_os_str().is_empty()
            && fs::create_dir_all(parent).is_err()
        {
            eprintln!("Error creating output directory for '{}'", out_path.display());
            process::exit(1);
        }
        let file = match File::create(out_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error creating output file '{}': {e}", out_path.display());
                process::exit(1);
            }
        };
        Encoder::new(file).with_line_end(line_end).encode(&records)
    } else {
        let stdout = io::stdout();
        let result = Encoder::new(stdout.lock())
            .with_line_end(line_end)
            .encode(&records);
        if result.is_ok()
            && !records.is_empty()
            && let Err(e) = stdout.lock().write_all(line_end)
        {
            eprintln!("Error writing output: {e}");
            process::exit(1);
        }
        result
    };

    if let Err(e) = result {
        eprintln!("Encoding error: {e}");
        process::exit(1);
    }

    if cli.verbose {
        eprintln!("Records: {} encoded, {} bytes per line", records.len(), schema.line_len());
    }
}
