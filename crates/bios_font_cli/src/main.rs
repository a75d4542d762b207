use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bios_font::{ColorChoice, GlyphFormat, Preset, RenderConfig, Session, SourceKind};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "View BIOS/ROM bitmap fonts and render text with them")]
struct Cli {
    /// TOML file with render defaults
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every glyph of a font into a table image
    Grid(GridArgs),
    /// Render text with a font, optionally coloring individual words
    Text(TextArgs),
    /// Print a font file as `0xXX, ...` hex text
    Dump(DumpArgs),
    /// Render the glyph table of every ROM file in a directory
    Batch(BatchArgs),
    /// List the preset colors
    Presets,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct FontSource {
    /// Font file (.bin/.rom/.bios read as raw bytes, anything else as hex text)
    input: Option<PathBuf>,
    /// Hex bytes given inline, e.g. "0x00, 0x7E, 0x81"
    #[arg(long, value_name = "HEX")]
    hex: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct RenderSettings {
    /// Glyph format as WxH
    #[arg(long)]
    format: Option<GlyphFormat>,
    /// Integer upscale factor
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    scale: Option<u32>,
    /// Output width bound of the glyph table in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Output height bound of the glyph table in pixels
    #[arg(long)]
    height: Option<u32>,
    /// Text color: a preset name or #RRGGBB
    #[arg(long)]
    color: Option<ColorChoice>,
}

#[derive(Parser, Debug)]
struct GridArgs {
    #[command(flatten)]
    source: FontSource,
    /// Output image path (.png or .bmp)
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct TextArgs {
    #[command(flatten)]
    source: FontSource,
    /// Text to render
    #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
    text: Option<String>,
    /// File holding the text to render
    #[arg(long, value_name = "FILE")]
    text_file: Option<PathBuf>,
    /// Color assignment KEY=COLOR where KEY is WORD or WORD[N]; repeatable
    #[arg(short, long = "assign", value_name = "KEY=COLOR", value_parser = parse_assignment)]
    assignments: Vec<(String, ColorChoice)>,
    /// Output image path (.png or .bmp)
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Font file
    input: PathBuf,
    /// Write the hex text here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory searched recursively for .bin/.rom/.bios files
    input: PathBuf,
    /// Output directory for the glyph table images
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Image format of the written files
    #[arg(long, value_enum, default_value = "png")]
    image_format: ImageKind,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ImageKind {
    Png,
    Bmp,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("failed to load config {:?}", path))?,
        None => RenderConfig::default(),
    };

    match cli.command {
        Commands::Grid(args) => grid(args, config),
        Commands::Text(args) => text(args, config),
        Commands::Dump(args) => dump(args),
        Commands::Batch(args) => batch(args, config),
        Commands::Presets => presets(),
    }
}

fn grid(args: GridArgs, config: RenderConfig) -> Result<()> {
    let config = args.settings.apply(config);
    let mut session = Session::new();
    args.source.load_into(&mut session)?;
    session.set_text_color(config.text_color);

    let output =
        session.render_grid(&config.grid_options()).context("failed to render glyph table")?;
    info!("drew {} of {} glyphs", output.drawn, output.available);

    session
        .save_image(&args.output)
        .with_context(|| format!("failed to save {:?}", args.output))?;
    Ok(())
}

fn text(args: TextArgs, config: RenderConfig) -> Result<()> {
    let config = args.settings.apply(config);
    let mut session = Session::new();
    args.source.load_into(&mut session)?;
    session.set_text_color(config.text_color);

    for (key, choice) in &args.assignments {
        session
            .assign_color(key, *choice)
            .with_context(|| format!("failed to assign color to {:?}", key))?;
    }

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?
        },
        (None, None) => anyhow::bail!("no text given"),
    };

    let output =
        session.render_text(&text, &config.text_options()).context("failed to render text")?;
    if output.skipped > 0 {
        debug!("{} characters have no glyph in this font", output.skipped);
    }

    session
        .save_image(&args.output)
        .with_context(|| format!("failed to save {:?}", args.output))?;
    Ok(())
}

fn dump(args: DumpArgs) -> Result<()> {
    let mut session = Session::new();
    session.load_file(&args.input).with_context(|| format!("failed to read {:?}", args.input))?;
    let hex = session.hex_text();

    match &args.output {
        Some(path) => {
            fs::write(path, hex + "\n").with_context(|| format!("failed to write {:?}", path))?
        },
        None => println!("{}", hex),
    }
    Ok(())
}

fn batch(args: BatchArgs, config: RenderConfig) -> Result<()> {
    let config = args.settings.apply(config);
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let fonts = find_fonts(&args.input)?;
    let images = image_paths(&args.input, &fonts, &args.out_dir, args.image_format.extension())?;
    let progress = ProgressBar::new(fonts.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} fonts",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    for (font, image_path) in fonts.iter().zip(&images) {
        let mut session = Session::new();
        session.load_file(font).with_context(|| format!("failed to read {:?}", font))?;
        session.set_text_color(config.text_color);
        session
            .render_grid(&config.grid_options())
            .with_context(|| format!("failed to render {:?}", font))?;

        if let Some(parent) = image_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {:?}", parent))?;
        }
        session
            .save_image(&image_path)
            .with_context(|| format!("failed to save {:?}", image_path))?;
        progress.inc(1);
    }

    progress.finish_with_message(format!("Glyph tables written to {:?}", args.out_dir));
    Ok(())
}

fn find_fonts(path: &Path) -> Result<Vec<PathBuf>> {
    let mut fonts: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| SourceKind::for_path(path) == SourceKind::Binary)
        .collect();
    fonts.sort();
    if fonts.is_empty() {
        anyhow::bail!("no .bin/.rom/.bios files found in {:?}", path);
    }
    Ok(fonts)
}

/// Mirrors each font's path below `input` into `out_dir`, swapping in the
/// image extension. Two fonts mapping to the same image is an error.
fn image_paths(
    input: &Path,
    fonts: &[PathBuf],
    out_dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut images = Vec::with_capacity(fonts.len());
    for font in fonts {
        let relative = font.strip_prefix(input).unwrap_or(font.as_path());
        // A single file given as the input has no relative part left.
        let relative = match relative.file_name() {
            Some(_) => relative,
            None => font.file_name().map_or(Path::new("font"), Path::new),
        };
        let image = out_dir.join(relative).with_extension(extension);
        if !seen.insert(image.clone()) {
            anyhow::bail!("{:?} would overwrite the image of another font at {:?}", font, image);
        }
        images.push(image);
    }
    Ok(images)
}

fn presets() -> Result<()> {
    for preset in Preset::ALL {
        let color = preset.color();
        println!("{:<10} {} (rgb565 0x{:04X})", preset.name(), color, color.rgb565());
    }
    Ok(())
}

fn parse_assignment(value: &str) -> Result<(String, ColorChoice), String> {
    let (key, color) =
        value.rsplit_once('=').ok_or_else(|| format!("expected KEY=COLOR, got {:?}", value))?;
    let color = color.parse::<ColorChoice>().map_err(|err| err.to_string())?;
    Ok((key.to_owned(), color))
}

impl FontSource {
    fn load_into(&self, session: &mut Session) -> Result<()> {
        match (&self.input, &self.hex) {
            (Some(path), _) => {
                session.load_file(path).with_context(|| format!("failed to read {:?}", path))?;
            },
            (None, Some(hex)) => {
                session.load_hex_text(hex);
            },
            (None, None) => anyhow::bail!("no font given"),
        }
        Ok(())
    }
}

impl RenderSettings {
    fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(color) = self.color {
            config.text_color = color;
        }
        config
    }
}

impl ImageKind {
    fn extension(self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Bmp => "bmp",
        }
    }
}
