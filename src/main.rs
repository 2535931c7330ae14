use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use patchflow::config::{load_from_path, Inputs};
use patchflow::source::read_source;
use patchflow::steps::{
    ExtractCodeContexts, ExtractCodeMethodForCommentContexts, ModifyCode, ModifyCodeOnce,
    ReadFile, Step,
};
use patchflow::StepStatus;
use serde_json::{Map, Value};
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patchflow")]
#[command(about = "Extract source code contexts and splice patches back into files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Step inputs file (JSON, or TOML when the extension is .toml)
    #[arg(short, long)]
    inputs: Option<PathBuf>,
}

#[derive(Args)]
struct ExtractArgs {
    #[command(flatten)]
    input: InputArgs,

    /// File or directory to scan
    #[arg(short, long)]
    base_path: Option<PathBuf>,

    /// Widen regions over their doc comments instead of dropping documented ones
    #[arg(long)]
    force_code_contexts: bool,

    /// Drop regions overlapping an earlier one
    #[arg(long)]
    no_overlap: bool,

    /// Maximum directory depth (-1 for unlimited)
    #[arg(long, allow_hyphen_values = true)]
    max_depth: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract code contexts as files to patch
    Extract {
        #[command(flatten)]
        args: ExtractArgs,

        /// ALL, CLASS, FUNCTION, BLOCK or FULL_FILE
        #[arg(short = 'g', long)]
        grouping: Option<String>,
    },

    /// Extract functions with the location of their doc comment
    CommentContexts {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Apply extracted responses to files
    Modify {
        #[command(flatten)]
        input: InputArgs,

        /// Show unified diff of changes (on stderr)
        #[arg(short, long)]
        diff: bool,
    },

    /// Apply a single edit
    ModifyOnce {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long)]
        file_path: Option<PathBuf>,

        #[arg(long)]
        start_line: Option<usize>,

        #[arg(long)]
        end_line: Option<usize>,

        /// Replacement text
        #[arg(long)]
        new_code: Option<String>,

        /// Show unified diff of changes (on stderr)
        #[arg(short, long)]
        diff: bool,
    },

    /// Print a file's decoded contents
    ReadFile {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long)]
        file_path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { args, grouping } => {
            let mut inputs = extract_inputs(&args)?;
            set(&mut inputs, "context_grouping", grouping);
            run_step(ExtractCodeContexts::new(&inputs)?)
        }

        Commands::CommentContexts { args } => {
            let inputs = extract_inputs(&args)?;
            run_step(ExtractCodeMethodForCommentContexts::new(&inputs)?)
        }

        Commands::Modify { input, diff } => {
            let inputs = load_inputs(&input)?;
            let files = touched_files(&inputs);
            with_diff(diff, &files, || run_step(ModifyCode::new(&inputs)?))
        }

        Commands::ModifyOnce {
            input,
            file_path,
            start_line,
            end_line,
            new_code,
            diff,
        } => {
            let mut inputs = load_inputs(&input)?;
            set(&mut inputs, "file_path", file_path.as_deref().map(path_value));
            set(&mut inputs, "start_line", start_line);
            set(&mut inputs, "end_line", end_line);
            set(&mut inputs, "new_code", new_code);
            let files: Vec<PathBuf> = inputs
                .get("file_path")
                .and_then(Value::as_str)
                .map(PathBuf::from)
                .into_iter()
                .collect();
            with_diff(diff, &files, || run_step(ModifyCodeOnce::new(&inputs)?))
        }

        Commands::ReadFile { input, file_path } => {
            let mut inputs = load_inputs(&input)?;
            set(&mut inputs, "file_path", file_path.as_deref().map(path_value));
            run_step(ReadFile::new(&inputs)?)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_inputs(args: &InputArgs) -> Result<Inputs> {
    match &args.inputs {
        Some(path) => load_from_path(path).map_err(Into::into),
        None => Ok(Map::new()),
    }
}

fn extract_inputs(args: &ExtractArgs) -> Result<Inputs> {
    let mut inputs = load_inputs(&args.input)?;
    set(&mut inputs, "base_path", args.base_path.as_deref().map(path_value));
    if args.force_code_contexts {
        set(&mut inputs, "force_code_contexts", Some(true));
    }
    if args.no_overlap {
        set(&mut inputs, "allow_overlap_contexts", Some(false));
    }
    set(&mut inputs, "max_depth", args.max_depth);
    Ok(inputs)
}

fn path_value(path: &Path) -> String {
    path.display().to_string()
}

/// Command-line flags override keys from the inputs file.
fn set<T: Into<Value>>(inputs: &mut Inputs, key: &str, value: Option<T>) {
    if let Some(value) = value {
        inputs.insert(key.to_string(), value.into());
    }
}

fn run_step<S: Step>(mut step: S) -> Result<()> {
    let output = step.run().with_context(|| format!("{} failed", S::NAME))?;

    if let StepStatus::Skipped { reason } = step.status() {
        eprintln!("{} {}: Skipped ({})", "⊘".cyan(), S::NAME, reason);
    }
    println!("{}", serde_json::to_string_pretty(&Value::Object(output))?);
    Ok(())
}

/// Files named by the `uri` of every entry in `files_to_patch`.
fn touched_files(inputs: &Inputs) -> Vec<PathBuf> {
    inputs
        .get("files_to_patch")
        .and_then(Value::as_array)
        .map(|records| {
            records
                .iter()
                .filter_map(|r| r.get("uri").and_then(Value::as_str))
                .map(PathBuf::from)
                .collect()
        })
        .unwrap_or_default()
}

fn with_diff(show: bool, files: &[PathBuf], run: impl FnOnce() -> Result<()>) -> Result<()> {
    if !show {
        return run();
    }

    let before: BTreeMap<&Path, String> = files
        .iter()
        .map(|f| (f.as_path(), read_source(f).unwrap_or_default()))
        .collect();
    run()?;
    for (file, original) in &before {
        let modified = read_source(file).unwrap_or_default();
        if &modified != original {
            display_diff(file, original, &modified);
        }
    }
    Ok(())
}

/// Print a unified diff of one touched file to stderr. Stdout carries only
/// the step's JSON output.
fn display_diff(file: &Path, original: &str, modified: &str) {
    let diff = TextDiff::from_lines(original, modified);
    eprintln!("\n{}", format!("--- {} (before)", file.display()).dimmed());
    eprintln!("{}", format!("+++ {} (after)", file.display()).dimmed());

    let mut unified = diff.unified_diff();
    unified.context_radius(2);
    for hunk in unified.iter_hunks() {
        eprintln!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let line = match change.tag() {
                ChangeTag::Delete => format!("-{change}").red(),
                ChangeTag::Insert => format!("+{change}").green(),
                ChangeTag::Equal => format!(" {change}").normal(),
            };
            eprint!("{line}");
            if change.missing_newline() {
                eprintln!();
            }
        }
    }
}
