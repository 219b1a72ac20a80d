use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aisaidso", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tint, crop and watermark a photo, then write PNG or JPEG.
    Render(RenderArgs),
    /// List built-in logo presets and aspect ratios.
    Presets,
    /// Forget everything stored in a session file.
    Reset(ResetArgs),
}

#[derive(Parser, Debug)]
struct ResetArgs {
    /// Session JSON file to clear.
    #[arg(long)]
    session: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input photo (JPG, PNG or WEBP). Optional when `--session` already holds one.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Logo image file.
    #[arg(long, conflicts_with = "preset")]
    logo: Option<PathBuf>,

    /// Built-in logo preset id (see `aisaidso presets`).
    #[arg(long)]
    preset: Option<String>,

    /// Directory holding `images/logos/` for presets.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Tint intensity in [0, 1].
    #[arg(long)]
    intensity: Option<f64>,

    /// Resolution scale in [0.1, 1].
    #[arg(long)]
    scale: Option<f64>,

    /// Aspect ratio tag, e.g. `original`, `1:1`, `16:9`.
    #[arg(long)]
    aspect: Option<String>,

    /// Logo x position in output pixels.
    #[arg(long, requires = "logo_y")]
    logo_x: Option<f64>,

    /// Logo y position in output pixels.
    #[arg(long, requires = "logo_x")]
    logo_y: Option<f64>,

    /// Logo scale in [0.2, 3].
    #[arg(long)]
    logo_scale: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Output path. Defaults to `ai-said-so.<ext>` in the working directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON file the session is restored from and saved to.
    #[arg(long)]
    session: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl From<FormatChoice> for aisaidso::ExportFormat {
    fn from(v: FormatChoice) -> Self {
        match v {
            FormatChoice::Png => aisaidso::ExportFormat::Png,
            FormatChoice::Jpeg => aisaidso::ExportFormat::Jpeg,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Presets => cmd_presets(),
        Command::Reset(args) => cmd_reset(args),
    }
}

fn cmd_presets() -> anyhow::Result<()> {
    println!("logos:");
    for p in aisaidso::LogoCatalog::presets() {
        println!("  {:<18} {}", p.id, p.name);
    }
    println!("aspect ratios:");
    for a in aisaidso::AspectRatio::PRESETS {
        println!("  {a}");
    }
    Ok(())
}

fn cmd_reset(args: ResetArgs) -> anyhow::Result<()> {
    let mut editor = aisaidso::Editor::open(
        aisaidso::FileRepository::open(&args.session),
        Default::default(),
    );
    editor.reset();
    eprintln!("cleared {}", args.session.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    match args.session.clone() {
        Some(path) => run_render(
            aisaidso::Editor::open(aisaidso::FileRepository::open(path), Default::default()),
            args,
        ),
        None => run_render(
            aisaidso::Editor::open(aisaidso::MemoryRepository::new(), Default::default()),
            args,
        ),
    }
}

fn read_upload(path: &Path) -> anyhow::Result<(Vec<u8>, &'static str)> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let mime = aisaidso::ImageKind::from_extension(ext)
        .with_context(|| format!("'{}'", path.display()))?
        .mime();
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    Ok((bytes, mime))
}

fn run_render<R: aisaidso::Repository>(
    mut editor: aisaidso::Editor<R>,
    args: RenderArgs,
) -> anyhow::Result<()> {
    if let Some(path) = &args.image {
        let (bytes, mime) = read_upload(path)?;
        if !editor.load_source(&bytes, mime)? {
            anyhow::bail!("could not decode image '{}'", path.display());
        }
    }
    if editor.session().source.is_none() {
        anyhow::bail!("no image: pass --image or a --session that holds one");
    }

    if let Some(path) = &args.logo {
        let (bytes, mime) = read_upload(path)?;
        if !editor.load_logo(&bytes, mime)? {
            anyhow::bail!("could not decode logo '{}'", path.display());
        }
    } else if let Some(id) = &args.preset {
        match aisaidso::LogoCatalog::load(&args.assets, id)? {
            Some(logo) => editor.set_logo(Some(logo)),
            None => editor.clear_logo(),
        }
    }

    let mut effects = editor.session().effects;
    if let Some(v) = args.intensity {
        effects = effects.with_filter_intensity(v);
    }
    if let Some(v) = args.scale {
        effects = effects.with_resolution_scale(v);
    }
    if let Some(tag) = &args.aspect {
        effects = effects.with_aspect_ratio(aisaidso::AspectRatio::parse(tag));
    }
    editor.set_effects(effects);

    if let Some(s) = args.logo_scale {
        editor.set_logo_scale(s);
    }
    if let (Some(x), Some(y)) = (args.logo_x, args.logo_y)
        && editor
            .set_logo_position(aisaidso::Point::new(x, y))
            .is_none()
    {
        tracing::warn!("logo position ignored: no logo selected");
    }

    let export = editor.export(args.format.into())?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&export.file_name));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &export.bytes).with_context(|| format!("write '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
