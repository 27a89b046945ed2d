//! The gradient badge: a rounded square fading from indigo to orange with
//! three white bars across the middle.

use crate::error::RenderError;
use crate::raster::{fill_rounded_rect, fill_rounded_rect_mask, paste_with_mask, PixelRect};
use image::{GrayImage, Rgba, RgbaImage};

/// Smallest edge length that still leaves an inset around the badge.
pub const MIN_SIZE: u32 = 8;

/// Largest edge length accepted; bigger canvases are refused before allocating.
pub const MAX_SIZE: u32 = 4096;

/// Top of the gradient.
pub const GRADIENT_START: [u8; 3] = [102, 126, 234];

/// Bottom of the gradient.
pub const GRADIENT_END: [u8; 3] = [255, 152, 0];

/// Fill of the three bars, slightly translucent.
pub const BAR_COLOR: Rgba<u8> = Rgba([255, 255, 255, 220]);

/// Integer measurements of a badge of a given edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeGeometry {
    pub size: u32,
    pub margin: u32,
    pub rect_size: u32,
    pub corner_radius: u32,
    pub icon_margin: u32,
    pub icon_size: u32,
    pub line_height: u32,
    pub line_spacing: u32,
}

impl BadgeGeometry {
    pub fn new(size: u32) -> Result<Self, RenderError> {
        if size < MIN_SIZE {
            return Err(RenderError::invalid(format!(
                "icon size {size} is below the minimum of {MIN_SIZE}"
            )));
        }
        if size > MAX_SIZE {
            return Err(RenderError::invalid(format!(
                "icon size {size} is above the maximum of {MAX_SIZE}"
            )));
        }

        let margin = size / 8;
        let icon_margin = size / 3;
        let icon_size = size - 2 * icon_margin;

        Ok(Self {
            size,
            margin,
            rect_size: size - 2 * margin,
            corner_radius: size / 5,
            icon_margin,
            icon_size,
            line_height: icon_size / 8,
            line_spacing: icon_size / 4,
        })
    }

    /// Bounds of the badge, shared by the gradient and the mask.
    pub fn badge_rect(&self) -> PixelRect {
        let far = self.margin + self.rect_size;
        PixelRect {
            x0: self.margin,
            y0: self.margin,
            x1: far,
            y1: far,
        }
    }

    pub fn bar_radius(&self) -> u32 {
        self.line_height / 2
    }

    /// Bounds of the three bars, top to bottom. Empty when the bars
    /// collapse to zero height.
    pub fn bar_rects(&self) -> Vec<PixelRect> {
        if self.line_height == 0 {
            return Vec::new();
        }

        let x0 = self.icon_margin + self.line_height;
        let x1 = self.size - self.icon_margin - self.line_height;
        (0..3)
            .map(|i| {
                let y = self.icon_margin + i * self.line_spacing + self.line_height;
                PixelRect {
                    x0,
                    y0: y,
                    x1,
                    y1: y + self.line_height,
                }
            })
            .collect()
    }
}

/// Colour of gradient row `i` out of `rect_size`.
pub fn gradient_color(i: u32, rect_size: u32) -> Rgba<u8> {
    let progress = i as f32 / rect_size as f32;
    let channel = |from: u8, to: u8| {
        let value = from as f32 + (to as f32 - from as f32) * progress;
        value.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(GRADIENT_START[0], GRADIENT_END[0]),
        channel(GRADIENT_START[1], GRADIENT_END[1]),
        channel(GRADIENT_START[2], GRADIENT_END[2]),
        255,
    ])
}

/// Transparent canvas with the square, unmasked gradient painted in.
pub fn draw_gradient(geometry: &BadgeGeometry) -> RgbaImage {
    let mut canvas = RgbaImage::new(geometry.size, geometry.size);
    let rect = geometry.badge_rect();

    for y in rect.y0..=rect.y1 {
        // The closing row repeats the last colour so the badge has no seam.
        let i = (y - rect.y0).min(geometry.rect_size - 1);
        let color = gradient_color(i, geometry.rect_size);
        for x in rect.x0..=rect.x1 {
            canvas.put_pixel(x, y, color);
        }
    }

    canvas
}

/// Opacity stencil of the rounded badge outline.
pub fn rounded_mask(geometry: &BadgeGeometry) -> GrayImage {
    let mut mask = GrayImage::new(geometry.size, geometry.size);
    fill_rounded_rect_mask(
        &mut mask,
        geometry.badge_rect(),
        geometry.corner_radius,
        255,
    );
    mask
}

/// Cut the gradient to the rounded outline on a fresh transparent canvas.
pub fn composite_badge(gradient: &RgbaImage, mask: &GrayImage) -> Result<RgbaImage, RenderError> {
    let (width, height) = gradient.dimensions();
    let mut output = RgbaImage::new(width, height);
    paste_with_mask(&mut output, gradient, mask)?;
    Ok(output)
}

/// Paint the three bars directly onto `canvas`.
pub fn draw_bars(canvas: &mut RgbaImage, geometry: &BadgeGeometry) {
    for rect in geometry.bar_rects() {
        fill_rounded_rect(canvas, rect, geometry.bar_radius(), BAR_COLOR);
    }
}

/// The badge before the bars are drawn.
pub fn render_background(geometry: &BadgeGeometry) -> Result<RgbaImage, RenderError> {
    let gradient = draw_gradient(geometry);
    let mask = rounded_mask(geometry);
    composite_badge(&gradient, &mask)
}

/// Render the complete icon at `size × size`.
pub fn render_badge(size: u32) -> Result<RgbaImage, RenderError> {
    let geometry = BadgeGeometry::new(size)?;
    log::debug!("rendering {size}px badge: {geometry:?}");

    let mut output = render_background(&geometry)?;
    draw_bars(&mut output, &geometry);
    Ok(output)
}

/// Row spans [`bar_runs`] should find in the centre column of a correct
/// render. Bars whose rows touch merge into a single band.
pub fn expected_bar_runs(geometry: &BadgeGeometry) -> Vec<(u32, u32)> {
    let mut runs: Vec<(u32, u32)> = Vec::new();
    for rect in geometry.bar_rects() {
        if let Some(last) = runs.last_mut() {
            if rect.y0 <= last.1 + 1 {
                last.1 = last.1.max(rect.y1);
                continue;
            }
        }
        runs.push((rect.y0, rect.y1));
    }
    runs
}

/// Inclusive row spans in column `x` whose pixels are exactly [`BAR_COLOR`].
///
/// Used to check a rendered icon: anti-aliased bar edges do not count.
pub fn bar_runs(image: &RgbaImage, x: u32) -> Vec<(u32, u32)> {
    let mut runs = Vec::new();
    let mut start = None;

    for y in 0..image.height() {
        let is_bar = *image.get_pixel(x, y) == BAR_COLOR;
        match (is_bar, start) {
            (true, None) => start = Some(y),
            (false, Some(from)) => {
                runs.push((from, y - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(from) = start {
        runs.push((from, image.height() - 1));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_for_the_default_sizes() {
        let g = BadgeGeometry::new(128).unwrap();
        assert_eq!((g.margin, g.rect_size, g.corner_radius), (16, 96, 25));
        assert_eq!((g.icon_margin, g.icon_size), (42, 44));
        assert_eq!((g.line_height, g.line_spacing, g.bar_radius()), (5, 11, 2));

        let g = BadgeGeometry::new(48).unwrap();
        assert_eq!((g.margin, g.rect_size, g.corner_radius), (6, 36, 9));
        assert_eq!((g.line_height, g.line_spacing), (2, 4));

        let g = BadgeGeometry::new(16).unwrap();
        assert_eq!((g.margin, g.rect_size, g.corner_radius), (2, 12, 3));
        assert_eq!(g.line_height, 0);
    }

    #[test]
    fn rejects_sizes_below_minimum() {
        for size in [0, 1, 7] {
            assert!(matches!(
                BadgeGeometry::new(size),
                Err(RenderError::InvalidArgument(_))
            ));
        }
        assert!(BadgeGeometry::new(MIN_SIZE).is_ok());
    }

    #[test]
    fn rejects_sizes_above_maximum() {
        assert!(BadgeGeometry::new(MAX_SIZE).is_ok());
        for size in [MAX_SIZE + 1, 100_000] {
            assert!(matches!(
                BadgeGeometry::new(size),
                Err(RenderError::InvalidArgument(_))
            ));
        }
        assert!(render_badge(100_000).is_err());
    }

    #[test]
    fn line_height_collapses_below_twenty_two_except_twenty() {
        for size in (MIN_SIZE..=19).chain([21]) {
            assert_eq!(BadgeGeometry::new(size).unwrap().line_height, 0, "size {size}");
        }
        assert_eq!(BadgeGeometry::new(20).unwrap().line_height, 1);
    }

    #[test]
    fn expected_runs_merge_touching_bars() {
        let g = BadgeGeometry::new(24).unwrap();
        assert_eq!(expected_bar_runs(&g), vec![(9, 14)]);

        let g = BadgeGeometry::new(128).unwrap();
        assert_eq!(expected_bar_runs(&g), vec![(47, 52), (58, 63), (69, 74)]);

        let g = BadgeGeometry::new(16).unwrap();
        assert!(expected_bar_runs(&g).is_empty());
    }

    #[test]
    fn rendered_bars_match_expected_runs_for_every_size() {
        for size in MIN_SIZE..=160 {
            let g = BadgeGeometry::new(size).unwrap();
            let image = render_badge(size).unwrap();
            assert_eq!(
                bar_runs(&image, size / 2),
                expected_bar_runs(&g),
                "size {size}"
            );
        }
    }

    #[test]
    fn gradient_endpoints() {
        assert_eq!(gradient_color(0, 96), Rgba([102, 126, 234, 255]));

        // Halfway: 102 + 76.5, 126 + 13, 234 - 117.
        assert_eq!(gradient_color(48, 96), Rgba([179, 139, 117, 255]));

        let last = gradient_color(95, 96);
        assert!(last[0] > 250 && last[2] < 5, "last row was {last:?}");
    }

    #[test]
    fn gradient_fills_the_badge_rect_only() {
        let g = BadgeGeometry::new(48).unwrap();
        let gradient = draw_gradient(&g);
        let rect = g.badge_rect();

        for (x, y, pixel) in gradient.enumerate_pixels() {
            if rect.contains(x, y) {
                assert_eq!(pixel[3], 255);
            } else {
                assert_eq!(*pixel, Rgba([0, 0, 0, 0]));
            }
        }

        // Closing row repeats the colour above it.
        assert_eq!(
            gradient.get_pixel(24, rect.y1),
            gradient.get_pixel(24, rect.y1 - 1)
        );
    }

    #[test]
    fn bars_are_evenly_spaced() {
        let g = BadgeGeometry::new(128).unwrap();
        let bars = g.bar_rects();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0], PixelRect { x0: 47, y0: 47, x1: 81, y1: 52 });
        assert_eq!(bars[1].y0 - bars[0].y0, g.line_spacing);
        assert_eq!(bars[2].y0 - bars[1].y0, g.line_spacing);
    }

    #[test]
    fn bars_collapse_at_sixteen() {
        let g = BadgeGeometry::new(16).unwrap();
        assert!(g.bar_rects().is_empty());

        let mut canvas = render_background(&g).unwrap();
        let before = canvas.clone();
        draw_bars(&mut canvas, &g);
        assert_eq!(canvas, before);
    }

    #[test]
    fn background_corners_are_transparent() {
        let g = BadgeGeometry::new(128).unwrap();
        let background = render_background(&g).unwrap();
        let rect = g.badge_rect();

        assert_eq!(background.get_pixel(rect.x0, rect.y0)[3], 0);
        assert_eq!(background.get_pixel(64, rect.y0)[3], 255);
    }

    #[test]
    fn bar_runs_in_the_centre_column() {
        let image = render_badge(128).unwrap();
        assert_eq!(bar_runs(&image, 64), vec![(47, 52), (58, 63), (69, 74)]);

        let image = render_badge(48).unwrap();
        assert_eq!(bar_runs(&image, 24), vec![(18, 20), (22, 24), (26, 28)]);
    }

    #[test]
    fn bars_merge_into_one_band_at_twenty_four() {
        let image = render_badge(24).unwrap();
        assert_eq!(bar_runs(&image, 12), vec![(9, 14)]);
    }
}
