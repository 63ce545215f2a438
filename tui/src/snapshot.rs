//! Capture a rendered buffer region for export.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};

use limitless_engine::{CapturedCell, CapturedRegion, Rgb};

/// Resolve a terminal color to RGB. `Reset` means "no color".
///
/// Named colors use the xterm defaults; indexed colors map through the
/// 6x6x6 cube and grayscale ramp.
#[must_use]
pub fn color_to_rgb(color: Color) -> Option<Rgb> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => Rgb::new(r, g, b),
        Color::Black => Rgb::new(0, 0, 0),
        Color::Red => Rgb::new(205, 0, 0),
        Color::Green => Rgb::new(0, 205, 0),
        Color::Yellow => Rgb::new(205, 205, 0),
        Color::Blue => Rgb::new(0, 0, 238),
        Color::Magenta => Rgb::new(205, 0, 205),
        Color::Cyan => Rgb::new(0, 205, 205),
        Color::Gray => Rgb::new(229, 229, 229),
        Color::DarkGray => Rgb::new(127, 127, 127),
        Color::LightRed => Rgb::new(255, 0, 0),
        Color::LightGreen => Rgb::new(0, 255, 0),
        Color::LightYellow => Rgb::new(255, 255, 0),
        Color::LightBlue => Rgb::new(92, 92, 255),
        Color::LightMagenta => Rgb::new(255, 0, 255),
        Color::LightCyan => Rgb::new(0, 255, 255),
        Color::White => Rgb::new(255, 255, 255),
        Color::Indexed(index) => indexed_to_rgb(index),
    };
    Some(rgb)
}

fn indexed_to_rgb(index: u8) -> Rgb {
    const BASIC: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match index {
        0..=15 => color_to_rgb(BASIC[usize::from(index)]).unwrap_or(Rgb::new(0, 0, 0)),
        16..=231 => {
            let cube = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            Rgb::new(level(cube / 36), level((cube / 6) % 6), level(cube % 6))
        }
        232..=255 => {
            let gray = 8 + (index - 232) * 10;
            Rgb::new(gray, gray, gray)
        }
    }
}

/// Copy `area` of `buffer` into a [`CapturedRegion`].
///
/// Returns `None` when `area` is not fully inside the buffer.
#[must_use]
pub fn capture_region(buffer: &Buffer, area: Rect) -> Option<CapturedRegion> {
    if area.intersection(buffer.area) != area {
        return None;
    }
    let mut cells = Vec::with_capacity(usize::from(area.width) * usize::from(area.height));
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = buffer.cell((x, y))?;
            cells.push(CapturedCell {
                symbol: cell.symbol().to_string(),
                fg: color_to_rgb(cell.fg),
                bg: color_to_rgb(cell.bg),
                bold: cell.modifier.contains(Modifier::BOLD),
            });
        }
    }
    CapturedRegion::new(area.width, area.height, cells)
}
