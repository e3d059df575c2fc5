//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use tracing::{debug, info};

use quizmark_core::{process, ProcessReport, QuizConfig};
use quizmark_tree::html::{parse_fragment, render_fragment};
use quizmark_tree::RawStore;

use crate::assets::{inject_assets, install_assets};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "quizmark.toml";

/// Suffix inserted before the extension of processed files
pub const OUTPUT_SUFFIX: &str = "quiz";

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "quizmark")]
#[command(author, version, long_about = None)]
#[command(about = "Interactive quizzes from exercise admonitions")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite exercises in rendered HTML files into quiz widgets
    Process {
        /// Input HTML files or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output directory (defaults to next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Locale for captions, overriding the configuration
        #[arg(short, long)]
        locale: Option<String>,

        /// Inline the quiz stylesheet and script into pages with quizzes
        #[arg(long)]
        inject_assets: bool,
    },

    /// Report problems with the exercises of an HTML file
    Check {
        /// Input HTML file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Copy the quiz stylesheet and script into a built site
    InstallAssets {
        /// Site output directory
        #[arg(short, long)]
        site_dir: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process {
            inputs,
            output,
            config,
            locale,
            inject_assets,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(locale) = locale {
                config = config.with_locale(locale);
            }
            process_command(&inputs, output.as_deref(), &config, inject_assets)?;
        }
        Commands::Check {
            input,
            format,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let report = check_command(&input, format, &config)?;
            if report.has_errors() {
                std::process::exit(1);
            }
        }
        Commands::InstallAssets { site_dir, config } => {
            let config = load_config(config.as_deref())?;
            install_assets_command(&site_dir, &config)?;
        }
    }

    Ok(())
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the default level.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the configuration
///
/// Uses `path` when given, otherwise `quizmark.toml` in the working
/// directory if present, otherwise the defaults. Relative asset paths are
/// resolved against the directory of the configuration file.
pub fn load_config(path: Option<&Path>) -> Result<QuizConfig> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(QuizConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config = QuizConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    if let Some(dir) = path.parent() {
        config.assets.resolve_against(dir);
    }
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Execute the process command
///
/// Returns the written files.
pub fn process_command(
    inputs: &[String],
    output_dir: Option<&Path>,
    config: &QuizConfig,
    inject: bool,
) -> Result<Vec<PathBuf>> {
    let files = expand_inputs(inputs)?;
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut written = Vec::with_capacity(files.len());
    for input in files {
        let (html, report) = process_file(&input, config)?;
        let html = if inject {
            inject_assets(&html, &config.assets, &config.client)?
        } else {
            html
        };

        let output = output_path(&input, output_dir);
        fs::write(&output, html)
            .with_context(|| format!("Failed to write output file: {}", output.display()))?;

        println!(
            "{} -> {} ({} exercise(s))",
            input.display(),
            output.display(),
            report.processed
        );
        for diag in report.diagnostics.iter() {
            eprintln!("{}", diag);
        }
        written.push(output);
    }

    info!("Processed {} file(s)", written.len());
    Ok(written)
}

/// Execute the check command
pub fn check_command(
    input: &Path,
    format: OutputFormat,
    config: &QuizConfig,
) -> Result<ProcessReport> {
    let (_, mut report) = process_file(input, config)?;
    report.diagnostics = report
        .diagnostics
        .into_iter()
        .map(|d| d.with_file(input.display().to_string()))
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if report.diagnostics.is_empty() {
                println!(
                    "✓ {} exercise(s), no issues found in {}",
                    report.processed,
                    input.display()
                );
            } else {
                for diag in report.diagnostics.iter() {
                    println!("{}", diag);
                    println!();
                }
                println!(
                    "Found {} error(s) and {} warning(s)",
                    report.diagnostics.error_count(),
                    report.diagnostics.warning_count()
                );
            }
        }
    }

    Ok(report)
}

/// Execute the install-assets command
pub fn install_assets_command(site_dir: &Path, config: &QuizConfig) -> Result<Vec<PathBuf>> {
    if config.assets.stylesheet.is_none() && config.assets.script.is_none() {
        anyhow::bail!("No assets configured; set [assets] in {}", DEFAULT_CONFIG_FILE);
    }

    let written = install_assets(&config.assets, site_dir)?;
    for path in &written {
        println!("Installed {}", path.display());
    }
    Ok(written)
}

/// Read, transform and render one HTML file
fn process_file(input: &Path, config: &QuizConfig) -> Result<(String, ProcessReport)> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let mut tree = parse_fragment(&content)
        .with_context(|| format!("Failed to parse HTML: {}", input.display()))?;

    let mut store = RawStore::new();
    let report = process(&mut tree, &mut store, config);
    let html = render_fragment(&tree, &store)
        .with_context(|| format!("Failed to render HTML: {}", input.display()))?;

    Ok((html, report))
}

/// Expand glob patterns; plain paths are kept as given
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            files.push(PathBuf::from(input));
            continue;
        }

        let before = files.len();
        for entry in glob(input).with_context(|| format!("Invalid glob pattern: {}", input))? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Warning: Could not read {}", e);
                }
            }
        }
        if files.len() == before {
            anyhow::bail!("No files match pattern: {}", input);
        }
    }
    Ok(files)
}

/// `page.html` becomes `page.quiz.html`, placed in `output_dir` if given
fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{}.{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}.{}.html", stem, OUTPUT_SUFFIX),
    };

    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_process() {
        let args = vec![
            "quizmark",
            "process",
            "a.html",
            "docs/*.html",
            "--output",
            "site",
            "--locale",
            "pt",
            "--inject-assets",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Process {
                inputs,
                output,
                locale,
                inject_assets,
                config,
            } => {
                assert_eq!(inputs, vec!["a.html", "docs/*.html"]);
                assert_eq!(output, Some(PathBuf::from("site")));
                assert_eq!(locale.as_deref(), Some("pt"));
                assert!(inject_assets);
                assert!(config.is_none());
            }
            _ => panic!("Expected Process command"),
        }
    }

    #[test]
    fn test_cli_parse_process_requires_input() {
        assert!(Cli::try_parse_from(vec!["quizmark", "process"]).is_err());
    }

    #[test]
    fn test_cli_parse_check_json() {
        let args = vec!["quizmark", "-v", "check", "page.html", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Check { input, format, .. } => {
                assert_eq!(input, PathBuf::from("page.html"));
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_install_assets() {
        let args = vec!["quizmark", "install-assets", "--site-dir", "site"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::InstallAssets { site_dir, .. } => {
                assert_eq!(site_dir, PathBuf::from("site"));
            }
            _ => panic!("Expected InstallAssets command"),
        }
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("docs/page.html"), None),
            PathBuf::from("docs/page.quiz.html")
        );
        assert_eq!(
            output_path(Path::new("docs/page.htm"), Some(Path::new("out"))),
            PathBuf::from("out/page.quiz.htm")
        );
        assert_eq!(
            output_path(Path::new("fragment"), None),
            PathBuf::from("fragment.quiz.html")
        );
    }
}
