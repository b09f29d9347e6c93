/*!
 * recentmost CLI
 *
 * Usage: `find . -type f | recentmost 10`
 */

use clap::{Parser, ValueEnum};
use recentmost::{
    config::{Delimiter, LogLevel, OutputFormat, OutputOrder, Precision, SelectConfig, TimeZoneMode},
    error::{RecentError, Result, EXIT_FATAL, EXIT_SUCCESS},
    logging, select, LocalTimestamps, Presenter,
};
use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recentmost")]
#[command(version, about = "Pick the N most recently modified files from a list of paths on stdin", long_about = None)]
struct Cli {
    /// Number of files to keep (non-zero)
    #[arg(value_name = "FILECOUNT", value_parser = parse_count)]
    count: usize,

    /// Do not print the modification time (legacy spelling: -noTime)
    #[arg(long = "no-time")]
    no_time: bool,

    /// NUL-separated input and output, without timestamps (legacy spelling: -0)
    #[arg(short = 'z', long = "null")]
    null: bool,

    /// Output order
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Print timestamps in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Compare modification times at whole-second precision
    #[arg(long)]
    seconds: bool,

    /// Emit one JSON object per selected file
    #[arg(long)]
    json: bool,

    /// Print selection statistics to stderr
    #[arg(long)]
    stat: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevelArg>,

    /// Write logs to a file (JSON) instead of stderr
    #[arg(long = "log", value_name = "FILE")]
    log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    NewestFirst,
    OldestFirst,
}

impl From<OrderArg> for OutputOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::NewestFirst => OutputOrder::NewestFirst,
            OrderArg::OldestFirst => OutputOrder::OldestFirst,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

fn parse_count(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(RecentError::Usage(format!(
            "need numeric non zero value ({}) for filecount",
            s
        ))),
        Ok(n) => Ok(n),
    }
}

/// Rewrite the historical single-dash flags into their clap spellings
fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-noTime") => OsString::from("--no-time"),
            Some("-0") => OsString::from("--null"),
            _ => arg,
        })
        .collect()
}

impl Cli {
    /// Apply command line flags on top of a loaded configuration
    fn apply(&self, config: &mut SelectConfig) {
        if self.no_time {
            config.show_time = false;
        }
        if self.null {
            config.delimiter = Delimiter::Nul;
        }
        if let Some(order) = self.order {
            config.order = order.into();
        }
        if self.utc {
            config.time_zone = TimeZoneMode::Utc;
        }
        if self.seconds {
            config.precision = Precision::Seconds;
        }
        if self.json {
            config.format = OutputFormat::Json;
        }
        if self.stat {
            config.show_stats = true;
        }
        if let Some(level) = self.log_level {
            config.log_level = level.into();
        }
        if self.log.is_some() {
            config.log_file = self.log.clone();
        }
        if self.verbose {
            config.verbose = true;
        }
    }
}

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        // Downstream closed early, e.g. `| head -1`
        Err(e) if e.is_broken_pipe() => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));

    let mut config = match cli.config {
        Some(ref path) => SelectConfig::from_file(path)?,
        None => SelectConfig::default(),
    };
    cli.apply(&mut config);

    if let Err(e) = logging::init_logging(&config) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let stdin = io::stdin();
    let selection = select(stdin.lock(), LocalTimestamps, cli.count, &config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    Presenter::from_config(&config).write_all(&mut out, &selection.entries)?;

    if config.show_stats {
        selection.stats.print_summary()?;
    }

    Ok(())
}
