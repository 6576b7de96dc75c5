// unlongify: rewrite `long` declarations in a C source tree to `int`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use unlongify::driver::{self, DriverConfig, ScanErrorPolicy};

const LONG_ABOUT: &str = "\
Recursively scans a directory tree for C source files and headers (.c, .h,
.cpp, .hpp) and modifies them to change \"long\" type declarations to \"int\".
Care is taken to avoid false positives in comments and string literals.
printf/scanf format options are also updated to use \"int\".

This tool is aimed at updating 32-bit x86 C code to dual 32/64-bit
(x86/x86_64) code. GCC on x86 compiles both \"int\" and \"long\" to 32-bit
integers, whereas on x86_64 \"int\" is 32-bit and \"long\" is 64-bit.
\"long long\" and \"unsigned long long\" are 64-bit on both and are left alone.
The tool doesn't really understand C and should be treated as a blunt object
to get the code close to correct.

Modern code should consider fixed width integers from \"stdint.h\" instead.

Note: not all longs are bad. Some system calls explicitly require \"long\"
arguments; notably the \"mtype\" field of the struct passed to \"msgrcv\" must
be a \"long\". THIS TOOL WILL BLINDLY CONVERT THESE TO \"int\"!

Check your code after running this tool; modern GCC will warn in at least
some cases.

WARNING: files are edited in place and no backups are made.";

/// Environment variable holding the log filter; falls back to `RUST_LOG`.
const LOG_ENV: &str = "UNLONGIFY_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "unlongify",
    version,
    about = "Rewrite C sources to replace `long` declarations with `int`",
    long_about = LONG_ABOUT
)]
struct CliArgs {
    /// Root of the source tree (or a single file) to rewrite in place.
    path: PathBuf,

    /// Regex of directory paths not to descend into. May be repeated.
    #[arg(long = "skip-dir", value_name = "REGEX")]
    skip_dirs: Vec<String>,

    /// Leave files that fail to scan untouched and continue the walk.
    #[arg(long)]
    keep_going: bool,

    /// Report files that would change without writing them.
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialise the global tracing subscriber, writing to stderr.
///
/// `UNLONGIFY_LOG` (or `RUST_LOG`) takes precedence over `-v` flags.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .map(|val| EnvFilter::builder().parse_lossy(val))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: CliArgs) -> anyhow::Result<bool> {
    let policy = if args.keep_going {
        ScanErrorPolicy::Skip
    } else {
        ScanErrorPolicy::Abort
    };
    let config = DriverConfig::new(&args.path)
        .with_skip_dirs(&args.skip_dirs)?
        .with_policy(policy)
        .with_dry_run(args.dry_run);

    let summary = driver::run(&config)
        .with_context(|| format!("error walking the path {}", args.path.display()))?;

    let verb = if args.dry_run { "would rewrite" } else { "rewrote" };
    eprintln!(
        "{} {} of {} files",
        verb, summary.files_rewritten, summary.files_scanned
    );
    for (path, err) in &summary.skipped {
        eprintln!("skipped {}: {}", path.display(), err);
    }
    Ok(summary.is_clean())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
