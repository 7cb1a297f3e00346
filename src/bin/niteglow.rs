use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use niteglow::{InputSample, MountSet, PageManifest, Stage, Viewport, core::Vec2, presets};

#[derive(Parser, Debug)]
#[command(name = "niteglow", version)]
struct Cli {
    /// Page manifest JSON; defaults to the built-in NITE page.
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one scene at one frame as a PNG.
    Frame(FrameArgs),
    /// Render every mounted scene as a numbered PNG sequence.
    Sequence(SequenceArgs),
    /// Print the simulated dashboard stream.
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Mount id, e.g. hero-canvas.
    #[arg(long)]
    mount: String,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Fixed scroll progress in 0..1.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Sweep scroll 0..1 across the rendered frames instead.
    #[arg(long)]
    scroll_sweep: bool,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Frames to render per scene.
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Output directory; one subdirectory per mount.
    #[arg(long)]
    out_dir: PathBuf,

    /// Sweep scroll 0..1 across the sequence.
    #[arg(long)]
    scroll_sweep: bool,

    /// Orbit the pointer around the page center.
    #[arg(long)]
    pointer_orbit: bool,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Simulated seconds to run.
    #[arg(long, default_value_t = 20.0)]
    seconds: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let page = load_page(cli.manifest.as_deref())?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(&page, args),
        Command::Sequence(args) => cmd_sequence(&page, args),
        Command::Stats(args) => cmd_stats(&page, args),
    }
}

fn load_page(path: Option<&Path>) -> anyhow::Result<PageManifest> {
    let page = match path {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open manifest '{}'", path.display()))?;
            let r = BufReader::new(f);
            serde_json::from_reader(r).with_context(|| "parse manifest JSON")?
        }
        None => presets::nite_page(),
    };
    Ok(page)
}

/// Scripted, reproducible input: an optional scroll sweep and an optional
/// pointer orbit, both pure functions of the frame index.
fn input_at(frame: u64, total: u64, scroll_sweep: bool, fixed_scroll: f64, orbit: bool) -> InputSample {
    let scroll_progress = if scroll_sweep && total > 1 {
        frame as f64 / (total - 1) as f64
    } else {
        fixed_scroll
    };

    let pointer = if orbit {
        let t = frame as f64 * 0.02;
        Vec2::new(0.5 + 0.35 * t.cos(), 0.5 + 0.35 * t.sin())
    } else {
        Vec2::new(0.5, 0.5)
    };

    InputSample {
        scroll_progress,
        pointer,
    }
}

fn write_png(surface: &niteglow::PixelSurface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        surface.data(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(page: &PageManifest, args: FrameArgs) -> anyhow::Result<()> {
    let mounts = presets::nite_mounts();
    let mut stage = Stage::build(page, &mounts)?;

    if stage.scene_frame(&args.mount).is_none() {
        anyhow::bail!("unknown mount '{}'", args.mount);
    }

    let total = args.frame + 1;
    for f in 0..total {
        let input = input_at(f, total, args.scroll_sweep, args.scroll, false);
        stage.advance(input);
    }

    let surface = stage
        .scene_frame(&args.mount)
        .ok_or_else(|| anyhow::anyhow!("mount '{}' vanished", args.mount))?;
    write_png(surface, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(page: &PageManifest, args: SequenceArgs) -> anyhow::Result<()> {
    let mounts = presets::nite_mounts();
    let mounted: Vec<(String, Viewport)> = page
        .scenes
        .iter()
        .filter_map(|entry| mounts.get(&entry.mount).map(|v| (entry.mount.clone(), v)))
        .collect();

    // Scenes are independent; render each sequence on its own core. Frames
    // within a scene stay sequential because scene state is cumulative.
    mounted
        .par_iter()
        .try_for_each(|(mount, viewport)| -> anyhow::Result<()> {
            let single = MountSet::new().with(mount.clone(), *viewport);
            let mut stage = Stage::build(page, &single)?;

            for f in 0..args.frames {
                let input = input_at(f, args.frames, args.scroll_sweep, 0.0, args.pointer_orbit);
                stage.advance(input);

                let surface = stage
                    .scene_frame(mount)
                    .ok_or_else(|| anyhow::anyhow!("mount '{mount}' vanished"))?;
                let out = args.out_dir.join(mount).join(format!("{f:05}.png"));
                write_png(surface, &out)?;
            }

            eprintln!("wrote {} frames for {}", args.frames, mount);
            Ok(())
        })?;

    Ok(())
}

fn cmd_stats(page: &PageManifest, args: StatsArgs) -> anyhow::Result<()> {
    let mut stage = Stage::build(page, &MountSet::new())?;

    let step = 0.5;
    let mut t = 0.0;
    let dt = 1.0 / page.fps.as_f64().max(1.0);
    while t < args.seconds {
        // Advance a half second of frames, then print one line.
        let mut acc = 0.0;
        while acc < step && t + acc < args.seconds {
            stage.advance(InputSample::default());
            acc += dt;
        }
        t += acc;

        let line: Vec<String> = stage
            .stat_ids()
            .map(|id| {
                let text = stage.stat_text(id).unwrap_or("-");
                format!("{id}={text}")
            })
            .collect();
        println!("t={t:5.1}s  {}", line.join("  "));

        if acc == 0.0 {
            break;
        }
    }

    Ok(())
}
