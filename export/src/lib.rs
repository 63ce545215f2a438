//! Declaration card export.
//!
//! Turns a captured screen region into a PNG file:
//!
//! ```text
//! CapturedRegion -> rasterize (scale x, white page) -> PNG bytes -> atomic write
//! ```
//!
//! The pipeline is synchronous; callers run it off the UI task and decide how
//! to present failures.

mod atomic_write;
mod file_name;
mod raster;
mod region;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

pub use atomic_write::atomic_write;
pub use file_name::{DEFAULT_FILE_SUFFIX, card_file_name};
pub use raster::{
    BASE_CELL_HEIGHT, BASE_CELL_WIDTH, DEFAULT_SCALE, MAX_CANVAS_EDGE, RasterOptions, rasterize,
};
pub use region::{CapturedCell, CapturedRegion};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("the card has no visible area")]
    EmptyRegion,
    #[error("card is too large to export ({cells} cells exceed {max_pixels}px)")]
    CanvasTooLarge { cells: u16, max_pixels: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where and how to write an exported card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub directory: PathBuf,
    pub file_name: String,
    pub raster: RasterOptions,
}

impl ExportRequest {
    /// Request for `{user_name}_{suffix}.png` inside `directory`.
    #[must_use]
    pub fn for_user(directory: impl Into<PathBuf>, user_name: &str, suffix: &str, scale: u32) -> Self {
        Self {
            directory: directory.into(),
            file_name: card_file_name(user_name, suffix),
            raster: RasterOptions::with_scale(scale),
        }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// No region was mounted; nothing was attempted.
    Skipped,
}

/// Encode `region` as PNG bytes.
pub fn encode_png(region: &CapturedRegion, options: RasterOptions) -> Result<Vec<u8>, ExportError> {
    let image = rasterize(region, options)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Export the card region described by `region`.
///
/// `None` (the card is not mounted) is a no-op. A mounted region with zero
/// area is an error. Either the whole file is written or nothing is.
pub fn export_card(
    region: Option<&CapturedRegion>,
    request: &ExportRequest,
) -> Result<ExportOutcome, ExportError> {
    let Some(region) = region else {
        tracing::debug!("Card export skipped: no region mounted");
        return Ok(ExportOutcome::Skipped);
    };

    let bytes = encode_png(region, request.raster)?;
    let path = request.path();
    write_png(&path, &bytes)?;

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        width = region.width(),
        height = region.height(),
        "Exported declaration card"
    );
    Ok(ExportOutcome::Saved(path))
}

fn write_png(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    atomic_write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
