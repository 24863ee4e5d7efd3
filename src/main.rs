use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ccfilter::cli::{Cli, Commands, ConfigAction};
use ccfilter::config::Config;
use ccfilter::filtering::{classify, display_color, LineProcessor};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    // Handle commands
    match cli.command {
        Commands::Filter { input, json, stats } => {
            cmd_filter(cli.config, input, json, stats)?;
        }
        Commands::Classify { lines } => {
            cmd_classify(cli.config, &lines)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "ccfilter=debug" } else { "ccfilter=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries filtered lines only
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_filter(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    json: bool,
    show_stats: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut processor = LineProcessor::from_config(&config);

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {:?}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    tracing::debug!(
        input = ?input,
        windows = ?processor.window_sizes(),
        "Filtering log lines"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for chunk in reader.split(b'\n') {
        let chunk = chunk.context("Failed to read input")?;
        let raw = String::from_utf8_lossy(&chunk);
        let line = raw.strip_suffix('\r').unwrap_or(&*raw);

        let processed = processor.process_line(line);

        if json {
            let record = serde_json::to_string(&processed)
                .context("Failed to serialize processed line")?;
            write_line(&mut out, &record)?;
        } else if let Some(text) = &processed.text {
            write_line(&mut out, text)?;
        }
    }

    out.flush().context("Failed to flush output")?;

    let stats = processor.stats();
    tracing::info!(
        lines = stats.lines,
        passed = stats.passed,
        summarized = stats.summarized,
        suppressed = stats.suppressed,
        "Filtering complete"
    );

    if show_stats {
        eprintln!("Lines:       {}", stats.lines);
        eprintln!("Passed:      {}", stats.passed);
        eprintln!("Summarized:  {}", stats.summarized);
        eprintln!(
            "Suppressed:  {} ({:.1}%)",
            stats.suppressed,
            stats.suppression_ratio() * 100.0
        );
    }

    Ok(())
}

fn cmd_classify(config_path: Option<PathBuf>, lines: &[String]) -> Result<()> {
    let config = load_config(config_path)?;

    for line in lines {
        let category = classify(line);
        let color = display_color(category, &config.display);
        println!("{:<16} {}  {}", category, color, line);
    }

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json =
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)
                .with_context(|| format!("Invalid configuration: {}", path.display()))?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            create_parent_dir(&path)?;

            Config::default()
                .save(&path)
                .with_context(|| format!("Failed to initialize {}", path.display()))?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    Config::load_or_default(&path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    Ok(())
}

fn write_line(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", text).context("Failed to write output")
}
