use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use clojo::diagnostics::{render_error, CompileError};
use clojo::driver::{self, DriverConfig, FileOutcome};
use clojo::{manifest, CompileOptions};

#[derive(Parser)]
#[command(name = "clojoc", version, about = "Compile Funcgo sources (.go, .gos) to Clojure (.clj, .cljs)")]
struct Cli {
    /// Files or directories to compile (defaults to the source root, or `.`)
    paths: Vec<PathBuf>,

    /// Recompile files whose output is already up to date
    #[arg(long)]
    force: bool,

    /// Log the parse tree of each file
    #[arg(long)]
    nodes: bool,

    /// Use the cooperative channel operations everywhere
    #[arg(long)]
    cooperative: bool,

    /// Log the result of every start rule that accepts each file
    #[arg(long)]
    ambiguity: bool,

    /// Emit each file as a single line
    #[arg(long)]
    no_pretty: bool,

    /// Print generated code instead of writing output files
    #[arg(long)]
    stdout: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8, wants_dumps: bool) {
    let default = match verbose {
        0 if wants_dumps => "warn,clojo::ast=info,clojo::ambiguity=info",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.nodes || cli.ambiguity);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            render_error("", ".", &CompileError::io(".", e));
            std::process::exit(1);
        }
    };
    let loaded = match manifest::discover(&cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            render_error("", manifest::MANIFEST_FILE, &e);
            std::process::exit(1);
        }
    };
    let settings = loaded.as_ref().map(|l| l.manifest.compile.clone()).unwrap_or_default();
    let source_root = loaded.as_ref().and_then(|l| l.source_root());

    let config = DriverConfig {
        force: cli.force || settings.force,
        to_stdout: cli.stdout,
        min_size_ratio: settings.min_size_ratio,
        options: CompileOptions {
            emit_parse_tree: cli.nodes,
            cooperative_mode: cli.cooperative || settings.cooperative,
            dump_ambiguity: cli.ambiguity,
            pretty: !cli.no_pretty,
            source_root: Some(source_root.clone().unwrap_or_else(|| cwd.clone())),
        },
    };

    let roots = if cli.paths.is_empty() { vec![source_root.unwrap_or(cwd)] } else { cli.paths };
    let files = driver::discover(&roots);
    if files.is_empty() {
        eprintln!("No .go or .gos files found");
        return;
    }

    let (outcomes, summary) = driver::compile_batch(&files, &config);
    for outcome in outcomes {
        match outcome {
            FileOutcome::Compiled { text: Some(text), .. } => println!("{text}"),
            FileOutcome::Failed { source, text, error } => {
                render_error(text.as_deref().unwrap_or(""), &source.display().to_string(), &error);
            }
            FileOutcome::Compiled { .. } | FileOutcome::UpToDate { .. } => {}
        }
    }

    eprintln!(
        "{} compiled, {} up to date, {} failed ({} lines in {:.2}s)",
        summary.compiled,
        summary.up_to_date,
        summary.failed,
        summary.lines,
        summary.elapsed.as_secs_f64()
    );
    if summary.failed > 0 {
        std::process::exit(1);
    }
}
