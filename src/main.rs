// adaptcc: Adaptive Error-Recovery Compiler Front-End

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use adaptcc::analysis::history_store::HistoryStore;
use adaptcc::analysis::AdaptiveAnalyzer;
use adaptcc::config::{Config, DEFAULT_HISTORY_PATH, DEFAULT_LOG_PATH, FREQUENT_THRESHOLD};
use adaptcc::diagnostics::log_file::LogFile;
use adaptcc::fixes::external::{load_external, ExternalDiagnostic};
use adaptcc::fixes::suggest_fixes;
use adaptcc::pipeline::{self, Pipeline};
use adaptcc::ui;

/// Tokenize and check a small C program, suggest fixes, and learn which
/// mistakes keep coming back
#[derive(Parser, Debug)]
#[command(name = "adaptcc", version)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct Settings {
    /// diagnostic log file
    #[arg(long, global = true, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// diagnostic history file
    #[arg(long, global = true, default_value = DEFAULT_HISTORY_PATH)]
    history: PathBuf,

    /// a message seen more than this many times is frequent
    #[arg(long, global = true, default_value_t = FREQUENT_THRESHOLD)]
    threshold: usize,

    /// disable colored output
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check a source file, log its diagnostics and add them to the history
    Check { file: PathBuf },
    /// print the diagnostic log of the last check
    Log,
    /// print the adaptive analysis of the accumulated history
    Analyze,
    /// print fix suggestions for a source file as JSON
    Fix {
        #[command(flatten)]
        args: FixArgs,

        /// print a colored listing instead of JSON
        #[arg(long, default_value_t = false)]
        text: bool,
    },
    /// check a source file and print the full report as JSON
    Compile(FixArgs),
    /// clear the diagnostic log and the history
    Reset,
}

#[derive(Args, Debug)]
struct FixArgs {
    file: PathBuf,

    /// JSON diagnostics from a real compiler (native or clang format)
    #[arg(long)]
    diagnostics: Option<PathBuf>,
}

impl Settings {
    fn config(&self) -> Config {
        Config::new()
            .with_log_path(&self.log)
            .with_history_path(&self.history)
            .with_threshold(self.threshold)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.settings.config();
    let color = !cli.settings.no_color;
    let log_file = LogFile::new(&config.log_path);
    let history = HistoryStore::new(&config.history_path);
    let mut stdout = io::stdout();

    match &cli.cmd {
        Command::Check { file } => {
            let source = read_source(file);

            eprintln!("Adaptive Error Recovery Compiler Starting...");
            log_file.clear()?;
            eprintln!("[System] Cleared old error log for fresh analysis.");

            let lines: Vec<&str> = source.lines().collect();
            let outcome = Pipeline::new().verbose(true).run(&lines);

            log_file.append(&outcome.diagnostics)?;
            history.record_run(&outcome.diagnostics)?;

            ui::print_header(&mut stdout, "Displaying Logged Errors", color)?;
            ui::print_log(&mut stdout, &outcome.diagnostics, color)?;

            if !outcome.is_clean() {
                std::process::exit(2);
            }
        }
        Command::Log => match log_file.read()? {
            Some(diagnostics) => ui::print_log(&mut stdout, &diagnostics, color)?,
            None => println!("No error log found."),
        },
        Command::Analyze => {
            eprintln!("Generating Adaptive Analysis...");
            let report = AdaptiveAnalyzer::new(config.frequent_threshold).analyze(&history.load());
            ui::print_header(&mut stdout, "Adaptive Learning Summary", color)?;
            ui::print_analysis(&mut stdout, &report, color)?;
        }
        Command::Fix { args, text } => {
            let source = read_source(&args.file);
            let external = args.diagnostics.as_deref().and_then(load_external);
            let lines: Vec<&str> = source.lines().collect();
            let fixes = suggest_fixes(&lines, external.as_deref());
            if *text {
                ui::print_header(&mut stdout, "Suggested Fixes", color)?;
                ui::print_fixes(&mut stdout, &fixes, color)?;
            } else {
                println!("{}", serde_json::to_string_pretty(&fixes)?);
            }
        }
        Command::Compile(args) => {
            let source = read_source(&args.file);
            let external: Option<Vec<ExternalDiagnostic>> =
                args.diagnostics.as_deref().and_then(load_external);
            let report = pipeline::compile(&source, external.as_deref());
            println!("{}", report.to_json());
        }
        Command::Reset => {
            log_file.clear()?;
            history.reset()?;
            eprintln!("Cleared '{}' and '{}'.", config.log_path.display(), config.history_path.display());
        }
    }

    Ok(())
}

/// Read a source file, exiting before the core runs if it does not exist.
fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: could not read '{}': {}", path.display(), e);
            eprintln!("Usage: adaptcc check <file.c>");
            std::process::exit(1);
        }
    }
}
