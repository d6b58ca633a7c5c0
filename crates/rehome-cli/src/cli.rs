//! Argument parsing, run orchestration, and progress reporting.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rehome_bencode::Value;
use rehome_config::{
    LabelStore, MigrationConfig, Platform, PlatformDefaults, ReplacementRule, validate_layout,
};
use rehome_engine::{EngineContext, labels::escape_non_ascii};
use rehome_model::ItemId;
use rehome_telemetry::{LogFormat, LoggingConfig, init_logging};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "rehome",
    about = "Migrate per-item fast-resume state between BitTorrent clients"
)]
struct Cli {
    /// Source client configuration directory (contains the state subdirectory).
    #[arg(short = 's', long, env = "REHOME_SOURCE")]
    source: Option<PathBuf>,
    /// Destination session-state directory of the target client.
    #[arg(short = 'd', long, env = "REHOME_DESTINATION")]
    destination: Option<PathBuf>,
    /// Save-path replacements as `from,to` pairs separated by `;`.
    #[arg(short = 'r', long, env = "REHOME_REPLACE", default_value = "")]
    replace: String,
    /// Do not turn source labels into target tags.
    #[arg(long, env = "REHOME_WITHOUT_TAGS")]
    without_tags: bool,
    /// Maximum number of concurrently admitted translation tasks.
    #[arg(long, env = "REHOME_CONCURRENCY")]
    concurrency: Option<usize>,
    /// Skip the interactive confirmation prompt.
    #[arg(short = 'y', long)]
    yes: bool,
    /// Log level when `RUST_LOG` is not set.
    #[arg(
        long,
        env = "REHOME_LOG_LEVEL",
        default_value = rehome_telemetry::DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    /// Log output format; inferred from the build profile when omitted.
    #[arg(long, env = "REHOME_LOG_FORMAT", value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => Self::Json,
            LogFormatArg::Pretty => Self::Pretty,
        }
    }
}

/// Parses CLI arguments, runs the migration, and reports progress.
/// Returns the process exit code.
///
/// Per-item translation failures are reported in the summary but do not
/// fail the process; only configuration and layout problems do.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let format = cli.log_format.map_or_else(LogFormat::infer, LogFormat::from);
    let logging = LoggingConfig {
        level: &cli.log_level,
        format,
    };
    if let Err(error) = init_logging(&logging) {
        eprintln!("error: {error:#}");
        return 1;
    }
    match execute(cli).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let (source_dir, dest_dir) = resolve_directories(cli.source, cli.destination)?;
    let rules = ReplacementRule::parse_list(&cli.replace)
        .context("invalid --replace value")?;
    let mut config = MigrationConfig {
        source_dir,
        dest_dir,
        rules,
        tags_enabled: !cli.without_tags,
        admission_limit: cli.concurrency,
    };
    validate_layout(&config).context("migration layout check failed")?;

    let container_path = config.container_path();
    let container = fs::read(&container_path)
        .with_context(|| format!("can't read container {}", container_path.display()))?;
    let items = decode_container(&container)?;
    let total = items.len();
    info!(
        items = total,
        source = %config.source_dir.display(),
        destination = %config.dest_dir.display(),
        "migration starting"
    );

    let labels = load_label_store(&mut config);
    if !cli.yes {
        confirm(&config)?;
    }

    let context = Arc::new(EngineContext {
        state_dir: config.state_dir(),
        dest_dir: config.dest_dir.clone(),
        rules: config.rules.clone(),
        labels,
        tags_enabled: config.tags_enabled,
        admission_limit: config.admission_limit,
    });
    let mut streams = rehome_engine::run(context, items);

    let mut processed = 0_usize;
    let mut tag_registry = BTreeSet::new();
    while let Some(success) = streams.successes.recv().await {
        processed += 1;
        println!("{processed}/{total} {}", success.message);
        if let Some(label) = &success.label {
            tag_registry.insert(escape_non_ascii(label));
        }
    }
    let mut failed = 0_usize;
    while let Some(failure) = streams.failures.recv().await {
        failed += 1;
        warn!(item_id = %failure.item_id, message = %failure.message, "item failed");
    }

    info!(processed, failed, "migration finished");
    println!("Processed {processed} of {total} items, {failed} failed.");
    if !tag_registry.is_empty() {
        let registry = tag_registry.into_iter().collect::<Vec<_>>().join(", ");
        println!("Labels to register as tags: {registry}");
    }
    Ok(())
}

fn resolve_directories(
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    if let (Some(source), Some(destination)) = (&source, &destination) {
        return Ok((source.clone(), destination.clone()));
    }
    let defaults = PlatformDefaults::resolve(Platform::current(), &|name| env::var(name).ok())
        .context("can't resolve platform default directories")?;
    Ok((
        source.unwrap_or(defaults.source_dir),
        destination.unwrap_or(defaults.dest_dir),
    ))
}

fn decode_container(bytes: &[u8]) -> Result<Vec<(ItemId, Vec<u8>)>> {
    let tree = Value::decode(bytes).context("container decode failed")?;
    let Value::Dict(entries) = tree else {
        anyhow::bail!("container root is not a dictionary");
    };
    let mut items = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let text = std::str::from_utf8(&key).context("container key is not valid UTF-8")?;
        let item_id = ItemId::new(text)
            .with_context(|| format!("container key '{text}' is not an item identifier"))?;
        let embedded = value
            .as_bytes()
            .with_context(|| format!("container entry '{item_id}' is not an embedded record"))?;
        items.push((item_id, embedded.to_vec()));
    }
    Ok(items)
}

fn load_label_store(config: &mut MigrationConfig) -> LabelStore {
    if !config.tags_enabled {
        return LabelStore::empty();
    }
    let path = config.label_path();
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "can't read label store, continuing without tags");
            config.tags_enabled = false;
            return LabelStore::empty();
        }
    };
    match LabelStore::parse(&bytes) {
        Some(store) => store,
        None => {
            config.tags_enabled = false;
            LabelStore::empty()
        }
    }
}

fn confirm(config: &MigrationConfig) -> Result<()> {
    println!(
        "Will migrate from {} to {}.",
        config.source_dir.display(),
        config.dest_dir.display()
    );
    println!("Make sure the target client is stopped and the destination is backed up.");
    print!("Press Enter to start: ");
    io::stdout().flush().context("can't flush prompt")?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("can't read confirmation")?;
    Ok(())
}
