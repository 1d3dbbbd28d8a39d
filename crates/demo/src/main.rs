// File: crates/demo/src/main.rs
// Summary: Reconstructs a star history from a CSV export, reports growth spikes, and writes
// a PNG poster plus optional WebM/GIF animations.

mod config;
mod source;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use star_core::format::{counter_label, thousands};
use star_core::growth::spikes;
use star_core::{analyze, fetch_history, theme, ChartMode, FrameRenderer, Profile, RepoMeta, Series};
use star_export::{
    artifact_file_name, BatchGifExport, ExportKind, ExportTask, FfmpegSink, StreamingVideoExport,
};

use config::AppConfig;
use source::{resolve_path, CsvStarSource};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Date,
    Timeline,
}

impl From<ModeArg> for ChartMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Date => ChartMode::Date,
            ModeArg::Timeline => ChartMode::Timeline,
        }
    }
}

/// Star history sampler and animator
#[derive(Parser, Debug)]
#[command(name = "star-history")]
#[command(about = "Reconstruct a repository's star history and render it as a poster, video, or GIF")]
struct Args {
    /// CSV export with one row per star (`starred_at` column)
    input: PathBuf,

    /// Repository identifier, `owner/name`
    #[arg(short, long)]
    repo: String,

    /// TOML config file ([history], [video], [gif], [render])
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Maximum page requests per reconstruction
    #[arg(long)]
    budget: Option<u32>,

    /// Spike threshold as a multiple of the mean growth rate
    #[arg(long)]
    spike_multiplier: Option<f64>,

    /// Horizontal axis
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Theme preset (light, dark)
    #[arg(long)]
    theme: Option<String>,

    /// Repository description, kept in the export metadata
    #[arg(long, default_value = "")]
    description: String,

    /// Primary language for the info line
    #[arg(long, default_value = "")]
    language: String,

    /// Repository creation date (YYYY-MM-DD) for the info line
    #[arg(long)]
    created: Option<NaiveDate>,

    /// Reference "today" (YYYY-MM-DD); defaults to the current UTC date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Also export a WebM video (requires ffmpeg)
    #[arg(long)]
    video: bool,

    /// Also export an animated GIF
    #[arg(long)]
    gif: bool,

    /// ffmpeg binary used for the video export
    #[arg(long)]
    ffmpeg: Option<String>,

    /// Skip the PNG poster
    #[arg(long)]
    no_poster: bool,
}

fn main() -> Result<()> {
    // RUST_LOG takes precedence, fallback to info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = effective_config(&args)?;
    tracing::info!(
        repo = %args.repo,
        budget = cfg.history.budget,
        mode = ?cfg.render.mode,
        theme = %cfg.render.theme,
        video = args.video,
        gif = args.gif,
        "starting star-history"
    );

    let (path, used_alt) = resolve_path(&args.input)?;
    if used_alt {
        tracing::info!(path = %path.display(), "extension swapped between .csv/.cvs");
    }
    let mut source = CsvStarSource::from_path(args.repo.clone(), &path)?;
    tracing::info!(events = source.len(), "loaded star events");

    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let history = fetch_history(&mut source, &cfg.history, today).context("reconstructing star history")?;
    if history.is_estimated() {
        tracing::warn!("series counts are estimated from page offsets");
    }
    print_report(&history.series, cfg.history.spike_multiplier, history.is_estimated());

    let meta = RepoMeta {
        repo: args.repo.clone(),
        description: args.description.clone(),
        language: args.language.clone(),
        created_at: args.created,
    };
    let mut renderer = FrameRenderer::new(meta, theme::find(&cfg.render.theme));
    if let Some(subtitle) = &cfg.render.subtitle {
        renderer.subtitle = subtitle.clone();
    }

    std::fs::create_dir_all(&args.out_dir).with_context(|| format!("creating {}", args.out_dir.display()))?;
    let series = Arc::new(history.series);

    if !args.no_poster {
        let out = poster_path(&args.out_dir, &args.repo);
        let frame = renderer.render(&series, 1.0, cfg.render.mode, Profile::Video.canvas(), Profile::Video);
        let png = star_render_skia::render_png(&frame)?;
        std::fs::write(&out, png).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }

    let mut tasks = Vec::new();
    if args.video {
        let (s, r, mode, video) = (series.clone(), renderer.clone(), cfg.render.mode, cfg.video.clone());
        let task = ExportTask::spawn(
            move || {
                let sink = FfmpegSink::new(video.ffmpeg_bin.clone());
                StreamingVideoExport::new(s, r, mode, video, Box::new(sink))
            },
            8,
        );
        tasks.push((ExportKind::Video, task));
    }
    if args.gif {
        let (s, r, mode, gif) = (series.clone(), renderer.clone(), cfg.render.mode, cfg.gif.clone());
        tasks.push((ExportKind::Gif, ExportTask::spawn(move || BatchGifExport::new(s, r, mode, gif), 8)));
    }

    watch_progress(&tasks);

    let mut failed = 0;
    for (kind, task) in tasks {
        let out = args.out_dir.join(artifact_file_name(&args.repo, kind));
        match task.join() {
            Ok(bytes) => {
                std::fs::write(&out, &bytes).with_context(|| format!("writing {}", out.display()))?;
                println!("Wrote {} ({} bytes)", out.display(), thousands(bytes.len() as u64));
            }
            Err(e) => {
                tracing::error!(kind = ?kind, error = %e, "export failed");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} export(s) failed");
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn effective_config(args: &Args) -> Result<AppConfig> {
    let mut cfg = match &args.config {
        Some(p) => AppConfig::load(p)?,
        None => AppConfig::default(),
    };
    if let Some(b) = args.budget {
        cfg.history = cfg.history.with_budget(b);
    }
    if let Some(m) = args.spike_multiplier {
        cfg.history.spike_multiplier = m;
    }
    if let Some(m) = args.mode {
        cfg.render.mode = m.into();
    }
    if let Some(t) = &args.theme {
        cfg.render.theme = t.clone();
    }
    if let Some(bin) = &args.ffmpeg {
        cfg.video.ffmpeg_bin = bin.clone();
    }
    Ok(cfg)
}

fn print_report(series: &Series, multiplier: f64, estimated: bool) {
    let first = series.first();
    let last = series.last();
    println!(
        "{} samples from {} to {}; {}{}",
        series.len(),
        first.date,
        last.date,
        counter_label(last.count),
        if estimated { " (estimated)" } else { "" }
    );

    let points = analyze(series, multiplier);
    let mut any = false;
    for p in spikes(&points) {
        any = true;
        println!("  spike on {}: {:.1} stars/day (total {})", p.date, p.growth_rate, thousands(p.count));
    }
    if !any {
        println!("  no growth spikes above {multiplier}x the mean rate");
    }
}

fn poster_path(dir: &Path, repo: &str) -> PathBuf {
    dir.join(artifact_file_name(repo, ExportKind::Gif)).with_extension("png")
}

/// Log progress every ten percent until every task has finished.
fn watch_progress(tasks: &[(ExportKind, ExportTask)]) {
    let mut logged = vec![0u8; tasks.len()];
    loop {
        for (i, (kind, task)) in tasks.iter().enumerate() {
            for pct in task.progress().try_iter() {
                if pct >= logged[i].saturating_add(10) || (pct == 100 && logged[i] < 100) {
                    tracing::info!(kind = ?kind, pct, "export progress");
                    logged[i] = pct;
                }
            }
        }
        if tasks.iter().all(|(_, t)| t.is_finished()) {
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }
}
