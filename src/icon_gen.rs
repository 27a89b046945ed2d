use crate::badge::render_badge;
use crate::error::RenderError;
use crate::manifest::{write_manifest, IconManifest, MANIFEST_FILE};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Sizes generated when none are requested.
pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];

/// Options for a generation run, filled in by the CLI.
#[derive(Debug, Clone)]
pub struct Args {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub create_dir: bool,
    pub manifest: bool,
}

impl Args {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            sizes: DEFAULT_SIZES.to_vec(),
            create_dir: false,
            manifest: false,
        }
    }
}

/// `icons/` next to the running executable.
pub fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Can't locate the running executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.join("icons"))
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

/// Render the badge at `size` and write it as a PNG to `output_path`,
/// replacing any existing file.
pub fn render_icon(size: u32, output_path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = output_path.as_ref();
    let image = render_badge(size)?;
    let png = encode_png(&image)?;

    let file = File::create(path).map_err(|err| RenderError::io(path, err))?;
    let mut out_file = BufWriter::new(file);
    out_file
        .write_all(&png)
        .map_err(|err| RenderError::io(path, err))?;
    out_file.flush().map_err(|err| RenderError::io(path, err))?;

    log::debug!("wrote {} bytes to {}", png.len(), path.display());
    Ok(())
}

/// Encode an RGBA image as PNG with fixed settings, so identical pixels
/// always produce identical bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buf, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)?;
    Ok(buf)
}

pub fn generate_icons(args: &Args) -> Result<Vec<PathBuf>> {
    prepare_output_dir(&args.output, args.create_dir)?;

    println!("Generating badge icons in {}...", args.output.display());
    let mut written = Vec::with_capacity(args.sizes.len());
    let mut manifest = IconManifest::new(manifest_prefix(&args.output));

    for &size in &args.sizes {
        let filename = icon_file_name(size);
        let output_path = args.output.join(&filename);
        render_icon(size, &output_path)
            .with_context(|| format!("Failed to generate {filename}"))?;
        println!("  ✓ Generated {}", output_path.display());

        manifest.add_icon(size, &filename);
        written.push(output_path);
    }

    if args.manifest && !manifest.is_empty() {
        write_manifest(&args.output, &manifest)?;
        println!("  ✓ Generated {}", args.output.join(MANIFEST_FILE).display());
    }

    println!("All icons generated.");
    Ok(written)
}

fn prepare_output_dir(dir: &Path, create: bool) -> Result<()> {
    if create {
        std::fs::create_dir_all(dir).context("Can't create output directory")?;
    } else if !dir.is_dir() {
        anyhow::bail!(
            "Output directory {} does not exist (pass --create-dir to create it)",
            dir.display()
        );
    }
    Ok(())
}

/// Last component of the output directory, used as the manifest path prefix.
fn manifest_prefix(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
