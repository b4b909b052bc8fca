use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use devdocs::config::{self, DocsConfig};
use devdocs::observability::init_logging;
use devdocs::report::generate_documentation;

#[derive(Debug, Parser)]
#[command(
    name = "devdocs",
    version,
    about = "Collect docstrings and asset contents of a project into one Markdown file"
)]
struct Cli {
    /// Directory to document (defaults to the current directory)
    root: Option<PathBuf>,

    /// Report path, relative to the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file (defaults to `.devdocs.yaml` in the root, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sort directory listings by name for reproducible output
    #[arg(long)]
    sorted: bool,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    exclude_dirs: Vec<String>,

    /// Additional file extension or file name to ignore (repeatable)
    #[arg(long = "ignore-ext", value_name = "EXT")]
    ignore_exts: Vec<String>,

    /// Print run statistics as JSON on stdout
    #[arg(long)]
    summary_json: bool,

    /// Log every visited file
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> devdocs::Result<()> {
    let cwd = std::env::current_dir()?;
    let root = cli.root.unwrap_or_else(|| cwd.clone());

    let mut config: DocsConfig = config::load_config(&root, cli.config.as_deref())?;
    for dir in cli.exclude_dirs {
        config.exclusions.exclude_dir(dir);
    }
    for ext in &cli.ignore_exts {
        config.exclusions.ignore_extension(ext);
    }
    if cli.sorted {
        config.sort_entries = true;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    let output = config.output_path(&cwd);
    let stats = generate_documentation(&root, &output, &config)?;

    if cli.summary_json {
        println!("{}", stats.to_json());
    }
    Ok(())
}
