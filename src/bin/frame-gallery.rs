use std::{
    io::{BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use frame_gallery::{
    ContentPass, FrameConfig, FrameOutputs, GalleryConfig, GalleryDirector, GalleryResult,
    GlowFalloff, MediaStream, Phase, PortalMedia, StencilPass, StillImage, TrailBackend,
    TrailState, WallBackend, WallPass,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "frame-gallery", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a transition headlessly and print what each frame produced.
    Simulate(SimulateArgs),
    /// Print the phase table and each phase's share of global progress.
    Phases(PhasesArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Gallery JSON. Defaults to the built-in two-portal demo.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Portal to start immersed in (overrides the config's `initial_portal`).
    #[arg(long)]
    from: Option<usize>,

    /// Target portal. Defaults to the next portal in order.
    #[arg(long)]
    to: Option<usize>,

    /// Simulation rate in frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Extra settled frames to run after the transition completes.
    #[arg(long, default_value_t = 0)]
    tail_frames: u64,

    /// Print one line per phase change instead of one JSON object per frame.
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Log every draw call through a recording backend.
    #[arg(long, default_value_t = false)]
    draws: bool,
}

#[derive(Parser, Debug)]
struct PhasesArgs {
    /// Gallery JSON. Defaults to the built-in two-portal demo.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Phases(args) => cmd_phases(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GalleryConfig> {
    match path {
        Some(p) => GalleryConfig::from_path(p)
            .with_context(|| format!("load gallery '{}'", p.display())),
        None => Ok(GalleryConfig::two_portal_demo()),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number, got {}", args.fps);
    }
    let mut config = load_config(args.in_path.as_ref())?;
    if let Some(from) = args.from {
        config.initial_portal = from;
    }

    let mut director = GalleryDirector::new(config, open_headless)?;
    let started = match args.to {
        Some(to) => director.request_transition(to)?,
        None => director.advance()?,
    };
    if !started {
        tracing::warn!("no transition started; simulating a settled gallery");
    }

    let dt = 1.0 / args.fps;
    let mut backend = args.draws.then(DrawLog::default);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut frame_idx: u64 = 0;
    let mut tail = 0;
    let mut last_phase = None;
    loop {
        let frame = director.step(dt);
        if let Some(backend) = backend.as_mut() {
            director.render(backend, &frame)?;
        }

        if args.summary {
            if last_phase != Some(frame.state.phase) {
                write_summary_line(&mut out, frame_idx, &frame)?;
                last_phase = Some(frame.state.phase);
            }
        } else {
            serde_json::to_writer(&mut out, &frame).context("serialize frame")?;
            writeln!(out)?;
        }

        frame_idx += 1;
        if !director.is_running() {
            if tail >= args.tail_frames {
                break;
            }
            tail += 1;
        }
    }
    out.flush()?;

    if let Some(backend) = backend {
        tracing::info!(calls = backend.calls, "draw calls issued");
    }
    director.teardown();
    tracing::info!(frames = frame_idx, "simulation finished");
    Ok(())
}

fn write_summary_line(
    out: &mut impl std::io::Write,
    frame_idx: u64,
    frame: &FrameOutputs,
) -> anyhow::Result<()> {
    let c = frame.camera_position;
    let blends: Vec<String> = frame
        .media
        .iter()
        .map(|m| format!("{:.2}", m.blend_factor))
        .collect();
    writeln!(
        out,
        "frame {frame_idx:>5}  t={:>6.3}s  {:<8}  global={:.3}  camera=({:.2}, {:.2}, {:.2})  blend=[{}]",
        frame.time,
        frame.state.phase.label(),
        frame.global_progress,
        c.x,
        c.y,
        c.z,
        blends.join(", "),
    )?;
    Ok(())
}

fn cmd_phases(args: PhasesArgs) -> anyhow::Result<()> {
    let config = load_config(args.in_path.as_ref())?;
    let durations = config.durations;
    for phase in Phase::TIMED {
        let (start, end) = durations.share(phase);
        println!(
            "{:<8} {:>6.2}s  global [{start:.3}, {end:.3}]",
            phase.label(),
            durations.duration(phase),
        );
    }
    println!("{:<8} {:>6.2}s", "total", durations.total());
    Ok(())
}

/// Media handles for a headless run: always ready, playback is only logged.
struct HeadlessStream {
    source: String,
}

impl MediaStream for HeadlessStream {
    fn play(&mut self) -> GalleryResult<()> {
        tracing::debug!(source = %self.source, "play");
        Ok(())
    }

    fn pause(&mut self) -> GalleryResult<()> {
        tracing::debug!(source = %self.source, "pause");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn release(&mut self) -> GalleryResult<()> {
        tracing::debug!(source = %self.source, "release");
        Ok(())
    }
}

struct HeadlessStill;

impl StillImage for HeadlessStill {
    fn is_ready(&self) -> bool {
        true
    }

    fn release(&mut self) -> GalleryResult<()> {
        Ok(())
    }
}

fn open_headless(portal: &FrameConfig) -> GalleryResult<PortalMedia> {
    Ok(PortalMedia {
        stream: Box::new(HeadlessStream {
            source: portal.stream_source.clone(),
        }),
        still: Box::new(HeadlessStill),
    })
}

#[derive(Default)]
struct DrawLog {
    calls: u64,
}

impl WallBackend for DrawLog {
    fn draw_content(&mut self, pass: &ContentPass) -> GalleryResult<()> {
        self.calls += 1;
        tracing::trace!(planes = pass.planes.len(), "content pass");
        Ok(())
    }

    fn write_stencil(&mut self, pass: &StencilPass) -> GalleryResult<()> {
        self.calls += 1;
        tracing::trace!(holes = pass.holes.len(), "stencil pass");
        Ok(())
    }

    fn draw_wall(&mut self, pass: &WallPass) -> GalleryResult<()> {
        self.calls += 1;
        tracing::trace!(rings = pass.rings.len(), "wall pass");
        Ok(())
    }
}

impl TrailBackend for DrawLog {
    fn draw_trail(&mut self, state: &TrailState, glow: &GlowFalloff) -> GalleryResult<()> {
        self.calls += 1;
        tracing::trace!(
            revealed = state.revealed,
            points = state.revealed_points.len(),
            core = glow.core_width,
            "trail"
        );
        Ok(())
    }
}
