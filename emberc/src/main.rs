//! emberc - command-line entry point (§4.6, §6).
//!
//! A thin `clap` dispatcher over [`emberc_drv::compile`]: parses the
//! single positional input file plus the output/action/verbosity
//! flags, initializes `tracing`, and maps a driver error to exit code
//! 1. There is no subcommand here - a single-file, single-action
//! compiler has exactly one thing to do per invocation.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use emberc_drv::{compile, Action, CompileRequest};

/// Ember - compiler for the Ember language.
#[derive(Parser, Debug)]
#[command(name = "emberc")]
#[command(author = "Ember Language Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles a single Ember source file", long_about = None)]
struct Cli {
    /// Input source file.
    input: PathBuf,

    /// Output path. `-` means standard output for textual actions.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What artifact to produce.
    #[arg(long, value_enum, default_value_t = ActionArg::EmitExecutable)]
    action: ActionArg,

    /// Raise the tracing filter to `debug`.
    #[arg(short, long)]
    verbose: bool,
}

/// Mirrors [`emberc_drv::Action`] as a `clap`-friendly enum (§6:
/// `dump-parse | dump-ast | emit-ir | emit-object | emit-executable`).
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
enum ActionArg {
    DumpParse,
    DumpAst,
    EmitIr,
    EmitObject,
    EmitExecutable,
}

impl From<ActionArg> for Action {
    fn from(value: ActionArg) -> Self {
        match value {
            ActionArg::DumpParse => Action::DumpParse,
            ActionArg::DumpAst => Action::DumpAst,
            ActionArg::EmitIr => Action::EmitIr,
            ActionArg::EmitObject => Action::EmitObject,
            ActionArg::EmitExecutable => Action::EmitExecutable,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let request = CompileRequest { input: cli.input, output: cli.output, action: cli.action.into() };

    if let Err(e) = compile(&request) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let _ = tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_input_and_defaults_to_emit_executable() {
        let cli = Cli::parse_from(["emberc", "main.ember"]);
        assert_eq!(cli.input, PathBuf::from("main.ember"));
        assert_eq!(cli.action, ActionArg::EmitExecutable);
        assert!(!cli.verbose);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn parses_output_and_action_flags() {
        let cli = Cli::parse_from(["emberc", "main.ember", "-o", "out.ll", "--action", "emit-ir"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.ll")));
        assert_eq!(cli.action, ActionArg::EmitIr);
    }

    #[test]
    fn parses_verbose_flag() {
        let cli = Cli::parse_from(["emberc", "main.ember", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn action_arg_maps_onto_driver_action() {
        assert_eq!(Action::from(ActionArg::DumpParse), Action::DumpParse);
        assert_eq!(Action::from(ActionArg::DumpAst), Action::DumpAst);
        assert_eq!(Action::from(ActionArg::EmitIr), Action::EmitIr);
        assert_eq!(Action::from(ActionArg::EmitObject), Action::EmitObject);
        assert_eq!(Action::from(ActionArg::EmitExecutable), Action::EmitExecutable);
    }
}
