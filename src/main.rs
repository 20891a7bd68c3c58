//! CLI entry point for dirtree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use dirtree::{
    Attribute, ConfigError, OutputConfig, Pattern, TreeFormatter, TreeOptions, TreeWalker,
    print_json,
};
use tracing::debug;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Verbosity of diagnostics written to stderr
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogLevel {
    #[default]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "Print a directory as a tree, with filters and computed attributes")]
#[command(version)]
struct Args {
    /// Directory (or file) to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Only include files whose name matches this regex (e.g. '\.txt$')
    #[arg(short = 'e', long = "extensions", value_name = "REGEX")]
    extensions: Option<String>,

    /// Exclude entries whose path matches this regex (can be used multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "REGEX")]
    exclude: Vec<String>,

    /// Exclude entries whose name or path matches this glob (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "depth", value_name = "N")]
    depth: Option<usize>,

    /// Attributes to compute: size, type, extension, mtime, ctime (comma separated)
    #[arg(short = 'a', long = "attributes", value_name = "LIST", value_delimiter = ',')]
    attributes: Vec<Attribute>,

    /// Do not follow symbolic links
    #[arg(long = "no-follow-symlinks")]
    no_follow_symlinks: bool,

    /// Use '/' as the path separator in output
    #[arg(long = "normalize-path")]
    normalize_path: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Diagnostics written to stderr: off, error, warn, info, debug, trace
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "off")]
    log_level: LogLevel,
}

fn setup_tracing(level: LogLevel) {
    if let Some(level) = level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

/// Translate command line arguments into tree options.
fn build_options(args: &Args) -> Result<TreeOptions, ConfigError> {
    let mut options = TreeOptions::new()
        .with_attributes(args.attributes.iter().copied())
        .follow_symlinks(!args.no_follow_symlinks)
        .normalize_path(args.normalize_path);

    if let Some(ref ext) = args.extensions {
        options = options.with_extensions(Pattern::regex(ext)?);
    }
    for pattern in &args.exclude {
        options = options.exclude(Pattern::regex(pattern)?);
    }
    for pattern in &args.ignore {
        options = options.exclude(Pattern::glob(pattern)?);
    }
    if let Some(depth) = args.depth {
        options = options.with_depth(depth);
    }
    Ok(options)
}

fn main() {
    let args = Args::parse();
    setup_tracing(args.log_level);
    debug!("Parsed CLI arguments: {args:?}");

    let walker = match build_options(&args).and_then(TreeWalker::new) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("dirtree: {}", e);
            process::exit(1);
        }
    };

    let tree = match walker.walk(&args.path) {
        Some(t) => t,
        None => {
            eprintln!("dirtree: cannot access '{}'", args.path.display());
            process::exit(1);
        }
    };

    let result = if args.json {
        print_json(&tree)
    } else {
        let formatter = TreeFormatter::new(OutputConfig {
            use_color: should_use_color(args.color),
            ..OutputConfig::default()
        });
        formatter.print(&tree)
    };

    if let Err(e) = result {
        eprintln!("dirtree: error writing output: {}", e);
        process::exit(1);
    }
}
