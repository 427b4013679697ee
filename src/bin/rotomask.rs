use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rotomask", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one roto item from a job file into a PNG.
    Render(RenderArgs),
    /// Print the default render options as JSON.
    PrintDefaultOpts,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input render job JSON.
    #[arg(long)]
    job: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the job's sample time.
    #[arg(long)]
    time: Option<f64>,

    /// Override the job's mip level.
    #[arg(long)]
    mip: Option<u32>,
}

fn default_components() -> usize {
    1
}

fn default_depth() -> rotomask::BitDepth {
    rotomask::BitDepth::Float
}

/// One render request: the item plus everything `render_mask` needs besides the destination.
#[derive(Debug, serde::Deserialize)]
struct RenderJob {
    item: rotomask::RotoItem,
    roi: rotomask::RectI,
    #[serde(default = "default_components")]
    components: usize,
    #[serde(default = "default_depth")]
    depth: rotomask::BitDepth,
    #[serde(default)]
    mip_level: u32,
    #[serde(default)]
    time: f64,
    #[serde(default)]
    motion_blur: Option<rotomask::MotionBlurRange>,
    #[serde(default)]
    opts: rotomask::RenderOpts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::PrintDefaultOpts => {
            let json = serde_json::to_string_pretty(&rotomask::RenderOpts::default())?;
            println!("{json}");
            Ok(())
        }
    }
}

fn read_job_json(path: &Path) -> anyhow::Result<RenderJob> {
    let f = File::open(path).with_context(|| format!("open render job '{}'", path.display()))?;
    let r = BufReader::new(f);
    let job: RenderJob = serde_json::from_reader(r).with_context(|| "parse render job JSON")?;
    Ok(job)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut job = read_job_json(&args.job)?;
    if let Some(time) = args.time {
        job.time = time;
    }
    if let Some(mip) = args.mip {
        job.mip_level = mip;
    }

    let mut dest = rotomask::Image::new(job.roi, job.components, job.depth)?;
    let range = job
        .motion_blur
        .unwrap_or_else(|| rotomask::MotionBlurRange::single(job.time));
    rotomask::render_mask(
        &job.item,
        job.roi,
        job.components,
        range,
        job.time,
        job.depth,
        job.mip_level,
        false,
        rotomask::StrokeCarry::default(),
        None,
        &mut dest,
        &job.opts,
    )
    .with_context(|| format!("render {} item", job.item.kind_name()))?;

    let (pixels, color) = to_png_pixels(&dest);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &pixels,
        job.roi.width(),
        job.roi.height(),
        color,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// 8-bit PNG samples for `img`: gray for one channel, RGB for two or three (missing channels
/// are zero), RGBA for four.
fn to_png_pixels(img: &rotomask::Image) -> (Vec<u8>, image::ColorType) {
    let bounds = img.bounds();
    let comps = img.components();
    let max = img.depth().max_value();
    let (out_comps, color) = match comps {
        1 => (1, image::ColorType::L8),
        4 => (4, image::ColorType::Rgba8),
        _ => (3, image::ColorType::Rgb8),
    };
    let mut out = Vec::with_capacity(bounds.width() as usize * bounds.height() as usize * out_comps);
    for y in bounds.y1..bounds.y2 {
        for x in bounds.x1..bounds.x2 {
            for c in 0..out_comps {
                let v = if c < comps {
                    img.get(x, y, c).unwrap_or(0.0) / max
                } else {
                    0.0
                };
                out.push((v * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
    }
    (out, color)
}
