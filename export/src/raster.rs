//! Cell-grid rasterizer.
//!
//! Every cell becomes a `cell_width x cell_height` block, multiplied by the
//! upscale factor. The canvas starts opaque white and every write is opaque,
//! so the output never carries transparency.

use font8x8::{BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};

use limitless_types::Rgb;

use crate::ExportError;
use crate::region::{CapturedCell, CapturedRegion};

pub const DEFAULT_SCALE: u32 = 3;
pub const BASE_CELL_WIDTH: u32 = 8;
pub const BASE_CELL_HEIGHT: u32 = 16;

/// Largest edge, in pixels, the rasterizer will allocate.
pub const MAX_CANVAS_EDGE: u32 = 16_384;

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([17, 24, 39, 255]);

/// Bitmap glyphs are 8x8.
const GLYPH_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    pub scale: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            cell_width: BASE_CELL_WIDTH,
            cell_height: BASE_CELL_HEIGHT,
        }
    }
}

impl RasterOptions {
    #[must_use]
    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            ..Self::default()
        }
    }

    fn block_width(self) -> u32 {
        self.cell_width * self.scale
    }

    fn block_height(self) -> u32 {
        self.cell_height * self.scale
    }
}

fn opaque(color: Rgb) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

fn canvas_edge(cells: u16, block: u32) -> Result<u32, ExportError> {
    u32::from(cells)
        .checked_mul(block)
        .filter(|edge| *edge <= MAX_CANVAS_EDGE)
        .ok_or(ExportError::CanvasTooLarge {
            cells,
            max_pixels: MAX_CANVAS_EDGE,
        })
}

/// Rasterize `region` onto a white, fully opaque canvas.
pub fn rasterize(region: &CapturedRegion, options: RasterOptions) -> Result<RgbaImage, ExportError> {
    if !region.has_visible_area() {
        return Err(ExportError::EmptyRegion);
    }
    let options = RasterOptions {
        scale: options.scale.max(1),
        cell_width: options.cell_width.max(1),
        cell_height: options.cell_height.max(1),
    };

    let width = canvas_edge(region.width(), options.block_width())?;
    let height = canvas_edge(region.height(), options.block_height())?;
    let mut canvas = RgbaImage::from_pixel(width, height, PAPER);

    for (x, y, cell) in region.cells() {
        let origin_x = u32::from(x) * options.block_width();
        let origin_y = u32::from(y) * options.block_height();
        if let Some(bg) = cell.bg {
            fill_rect(
                &mut canvas,
                origin_x,
                origin_y,
                options.block_width(),
                options.block_height(),
                opaque(bg),
            );
        }
        draw_glyph(&mut canvas, origin_x, origin_y, cell, options);
    }

    Ok(canvas)
}

fn glyph_bitmap(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
}

fn draw_glyph(
    canvas: &mut RgbaImage,
    origin_x: u32,
    origin_y: u32,
    cell: &CapturedCell,
    options: RasterOptions,
) {
    if cell.is_blank() {
        return;
    }
    let Some(ch) = cell.symbol.chars().next() else {
        return;
    };
    let ink = cell.fg.map_or(INK, opaque);
    let block_width = options.block_width();
    let block_height = options.block_height();

    let Some(bitmap) = glyph_bitmap(ch) else {
        // No bitmap: a centered ink block keeps the glyph's footprint visible.
        let inset_x = block_width / 6;
        let inset_y = block_height / 4;
        fill_rect(
            canvas,
            origin_x + inset_x,
            origin_y + inset_y,
            block_width - 2 * inset_x,
            block_height - 2 * inset_y,
            ink,
        );
        return;
    };

    let dot_width = (block_width / GLYPH_SIZE).max(1);
    let dot_height = (block_height / GLYPH_SIZE).max(1);
    for (row, bits) in bitmap.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            if bits & (1 << col) == 0 {
                continue;
            }
            let px = origin_x + col * dot_width;
            let py = origin_y + row as u32 * dot_height;
            fill_rect(canvas, px, py, dot_width, dot_height, ink);
            if cell.bold {
                fill_rect(canvas, px + dot_width / 2, py, dot_width, dot_height, ink);
            }
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(width).min(canvas.width());
    let y_end = y.saturating_add(height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}
