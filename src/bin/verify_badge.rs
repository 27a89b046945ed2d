use anyhow::{Context, Result};
use badge_icon_gen::badge::{bar_runs, expected_bar_runs, BadgeGeometry};
use image::io::Reader as ImageReader;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "icons/icon128.png".to_string());

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .decode()
        .with_context(|| format!("Failed to decode {path}"))?;

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    println!("Checking badge in: {}", path);
    println!("Image dimensions: {}x{}", width, height);

    if width != height {
        anyhow::bail!("Badge icons are square, got {width}x{height}");
    }
    let geometry = BadgeGeometry::new(width)?;

    let corner = rgba_img.get_pixel(0, 0);
    println!("Corner pixel alpha: {}", corner[3]);
    if corner[3] != 0 {
        anyhow::bail!("Corner pixel should be transparent, alpha is {}", corner[3]);
    }

    let column = width / 2;
    let runs = bar_runs(&rgba_img, column);
    let expected = expected_bar_runs(&geometry);

    println!("\nBar analysis (column x={}):", column);
    for (from, to) in &runs {
        println!("  rows {}..={} ({} px)", from, to, to - from + 1);
    }

    if runs != expected {
        anyhow::bail!("Expected bar rows {expected:?}, found {runs:?}");
    }

    match expected.len() {
        0 => println!("✓ Bars collapse at this size, only the badge is drawn"),
        3 => println!("✓ Badge looks right!"),
        _ => println!("✓ Badge looks right! (bars touch and form one band at this size)"),
    }

    Ok(())
}
