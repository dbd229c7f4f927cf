use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "montage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a seconds-based montage plan from approved shots.
    Plan(PlanArgs),
    /// Resolve a montage plan into a frame-exact render schedule.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input shots JSON (array of shots).
    #[arg(long)]
    shots: PathBuf,

    /// Narration length in seconds.
    #[arg(long)]
    voiceover_sec: f64,

    /// Project name used for the intro and outro cards.
    #[arg(long)]
    project: String,

    /// Optional planner config JSON; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output plan JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input montage plan JSON.
    #[arg(long)]
    plan: PathBuf,

    /// Project root that clip and audio paths are relative to.
    #[arg(long)]
    project_root: PathBuf,

    /// Override the plan's frame rate (integer fps).
    #[arg(long)]
    fps: Option<u32>,

    /// Output resolved plan JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => montage::MontageConfig::from_path(path)?,
        None => montage::MontageConfig::default(),
    };
    let planner = montage::MontagePlanner::new(config)?;
    let shots = montage::Shot::list_from_path(&args.shots)?;

    let plan = planner.plan(&args.project, &shots, args.voiceover_sec)?;
    write_output(&args.out, &plan.to_json_pretty()?)?;

    eprintln!(
        "wrote {} ({} clips, {:.2}s)",
        args.out.display(),
        plan.timeline.len(),
        plan.span_sec()
    );
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let plan = montage::MontagePlan::from_path(&args.plan)?;
    let resolved = match args.fps {
        Some(fps) => {
            montage::resolve_plan_at(&plan, montage::Fps::new(fps, 1)?, &args.project_root)?
        }
        None => montage::resolve_plan(&plan, &args.project_root)?,
    };
    write_output(&args.out, &resolved.to_json_pretty()?)?;

    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        resolved.total_duration_frames
    );
    Ok(())
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))
}
