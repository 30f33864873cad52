use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use crate::api::errors::{exit_code_for, ErrorId};
use crate::api::VDataset;
use crate::constants::{REFUSED_EXIT_CODE, TMP_PREFIX_ENV};
use crate::logging::{AuditSink, FactsEmitter, LogSink};
use crate::policy::Policy;
use crate::scan::ScanOptions;
use crate::types::errors::Result;
use crate::types::plan::TeardownMode;
use crate::types::report::UnmountReport;

/// Mount scattered files as one symlink tree, or tear such a tree down.
#[derive(Parser, Debug)]
#[command(name = "vdataset", author, version, about, long_about = None)]
pub struct Cli {
    /// Unmount location
    #[arg(short = 'u', long = "umount", value_name = "LOCATION")]
    pub umount: Option<PathBuf>,
    /// Mount from an index file [yaml, json]
    #[arg(short = 'i', long = "mount-from-index", value_name = "FILE")]
    pub mount_from_index: Option<PathBuf>,
    /// Mount from a directory
    #[arg(short = 'd', long = "mount-from-dir", value_name = "DIR")]
    pub mount_from_dir: Option<PathBuf>,
    /// Delete the mount even if it holds real files
    #[arg(long = "unsafe")]
    pub unsafe_unmount: bool,
    /// Sub-item to mount from the index, delimited by dots (ex: key1.item3)
    #[arg(short = 'k', long = "index-key", value_name = "KEY")]
    pub index_key: Option<String>,
    /// Create the mount point under this directory
    #[arg(short = 't', long = "tmp-prefix", value_name = "DIR", env = TMP_PREFIX_ENV)]
    pub tmp_prefix: Option<PathBuf>,
    /// Keep directory structure when mounting from a directory
    #[arg(short = 's', long = "keep-structure")]
    pub keep_structure: bool,
    /// Pattern to match when mounting from a directory (repeatable)
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pub pattern: Vec<String>,
}

/// What a CLI invocation produced, before anything is printed.
#[derive(Debug)]
pub enum Outcome {
    /// A line for stdout.
    Printed(String),
    /// Safe mode left the mount in place.
    Refused(UnmountReport),
    /// No action flag was given.
    Help,
}

/// Carry out the action selected by `cli`: unmount, then index, then directory.
///
/// # Errors
///
/// Whatever the selected operation returns.
pub fn execute<E: FactsEmitter, A: AuditSink>(api: &VDataset<E, A>, cli: &Cli) -> Result<Outcome> {
    let tmp_prefix = cli.tmp_prefix.as_deref();
    if let Some(loc) = &cli.umount {
        let report = api.unmount(loc, TeardownMode::from_safe(!cli.unsafe_unmount))?;
        return Ok(if report.refused() {
            Outcome::Refused(report)
        } else {
            Outcome::Printed(report.summary())
        });
    }
    if let Some(index) = &cli.mount_from_index {
        let root = api.mount_from_index_file(index, cli.index_key.as_deref(), tmp_prefix)?;
        return Ok(Outcome::Printed(root.display().to_string()));
    }
    if let Some(dir) = &cli.mount_from_dir {
        let options = ScanOptions {
            patterns: cli.pattern.clone(),
            keep_structure: cli.keep_structure,
        };
        let root = api.mount_from_location(dir, &options, tmp_prefix)?;
        return Ok(Outcome::Printed(root.display().to_string()));
    }
    Ok(Outcome::Help)
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

/// Entry point of the `vdataset` binary.
pub fn run() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let api = VDataset::new(LogSink, LogSink, Policy::default());
    match execute(&api, &cli) {
        Ok(Outcome::Printed(line)) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Refused(report)) => {
            eprintln!("vdataset: {}", report.summary());
            for p in &report.offending {
                eprintln!("  {}", p.display());
            }
            eprintln!("vdataset: remove these files or rerun with --unsafe");
            ExitCode::from(REFUSED_EXIT_CODE)
        }
        Ok(Outcome::Help) => {
            let _ = Cli::command().print_help();
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("vdataset: {e}");
            ExitCode::from(exit_code_for(ErrorId::from(&e)))
        }
    }
}
