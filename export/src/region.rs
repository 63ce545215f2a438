//! A captured, renderer-independent copy of an on-screen region.

use limitless_types::Rgb;

/// One terminal cell of the captured region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedCell {
    /// Grapheme drawn in the cell. Empty for the trailing half of a wide glyph.
    pub symbol: String,
    /// `None` means the default foreground (drawn as ink on paper).
    pub fg: Option<Rgb>,
    /// `None` means transparent; exported as the white page background.
    pub bg: Option<Rgb>,
    pub bold: bool,
}

impl CapturedCell {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.symbol.chars().all(char::is_whitespace)
    }
}

/// Row-major grid of captured cells.
///
/// Taken by value at request time, so later redraws of the screen cannot
/// change what an in-flight export writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRegion {
    width: u16,
    height: u16,
    cells: Vec<CapturedCell>,
}

impl CapturedRegion {
    /// Build a region from row-major cells.
    ///
    /// Returns `None` when `cells.len()` does not match `width * height`.
    #[must_use]
    pub fn new(width: u16, height: u16, cells: Vec<CapturedCell>) -> Option<Self> {
        let expected = usize::from(width) * usize::from(height);
        (cells.len() == expected).then_some(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn has_visible_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn cell(&self, x: u16, y: u16) -> Option<&CapturedCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// `(x, y, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16, &CapturedCell)> {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % usize::from(width)) as u16;
            let y = (i / usize::from(width)) as u16;
            (x, y, cell)
        })
    }

    /// Text content of each row, trailing whitespace trimmed.
    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let line: String = (0..self.width)
                    .filter_map(|x| self.cell(x, y))
                    .map(|cell| cell.symbol.as_str())
                    .collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}
