use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use wayfarer_common::{Config, PersonaProfile, RawLink, RawScreen, RunParams};
use wayfarer_graph::ScreenGraph;
use wayfarer_sim::narrate::{Narrator, NoopNarrator, TemplateNarrator};
use wayfarer_sim::run_log::RunLog;
use wayfarer_sim::runner::{BatchRunner, SessionJob};

/// Simulate personas navigating a screen flow toward a goal.
#[derive(Parser, Debug)]
#[command(name = "wayfarer", version, about)]
struct Args {
    /// Screen list JSON exported by the design-tool extractor.
    #[arg(long)]
    screens: PathBuf,

    /// Link list JSON.
    #[arg(long)]
    links: PathBuf,

    /// Persona profiles JSON (array).
    #[arg(long)]
    personas: PathBuf,

    /// Optional alias map JSON (opaque screen id -> integer id).
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Goal text driving edge scoring.
    #[arg(long)]
    goal: String,

    /// Starting screen id.
    #[arg(long)]
    source: i64,

    /// Target screen id.
    #[arg(long)]
    target: i64,

    /// Per-session step budget (default from WAYFARER_MAX_STEPS).
    #[arg(long)]
    max_steps: Option<u32>,

    /// Per-session simulated-time budget in seconds.
    #[arg(long)]
    max_seconds: Option<f64>,

    /// Base rng seed; session i runs with seed + i.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Fill per-step thoughts with the deterministic template narrator.
    #[arg(long)]
    narrate: bool,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {what}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wayfarer=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    config.log();

    let screens: Vec<RawScreen> = read_json(&args.screens, "screen list")?;
    let links: Vec<RawLink> = read_json(&args.links, "link list")?;
    let personas: Vec<PersonaProfile> = read_json(&args.personas, "personas")?;
    let aliases: HashMap<String, i64> = match &args.aliases {
        Some(path) => read_json(path, "alias map")?,
        None => HashMap::new(),
    };

    let graph = ScreenGraph::build(screens, links, &aliases);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dropped = graph.dropped_links(),
        "Screen graph built"
    );

    let jobs: Vec<SessionJob> = personas
        .into_iter()
        .enumerate()
        .map(|(i, persona)| SessionJob {
            persona: persona.normalized(),
            params: RunParams::builder()
                .goal(args.goal.clone())
                .source_id(args.source)
                .target_id(args.target)
                .max_steps(args.max_steps.unwrap_or(config.max_steps))
                .max_seconds(args.max_seconds.unwrap_or(config.max_seconds))
                .seed(args.seed + i as u64)
                .build(),
        })
        .collect();

    let narrator: &dyn Narrator = if args.narrate {
        &TemplateNarrator
    } else {
        &NoopNarrator
    };
    let runner = BatchRunner::new(Arc::new(graph), config.workers);
    let (traces, stats) = runner.run(jobs, narrator).await;

    let run_id = Uuid::new_v4().to_string();
    let data_dir = Path::new(&config.data_dir);
    let mut log = RunLog::create(data_dir, &run_id)?;
    for trace in &traces {
        log.append_trace(trace)?;
    }
    let log_path = log.finish()?;

    let summary_path = data_dir
        .join("session-logs")
        .join(format!("{run_id}.summary.json"));
    fs::write(&summary_path, serde_json::to_string_pretty(&traces)?)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;
    info!(
        log = %log_path.display(),
        summary = %summary_path.display(),
        "Run artifacts written"
    );

    println!("{stats}");
    Ok(())
}
