//! Renderer-owned state that survives between frames.
//!
//! Groups everything the renderer needs that is not session data, so
//! `reset()` on the session never has to know about scroll offsets.

use std::time::Instant;

use super::ModalEffect;

/// Display preferences from the `[display]` config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

/// Scroll position of the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultScroll {
    #[default]
    Top,
    /// Manual offset from the top of the rendered result document.
    Manual { offset_from_top: u16 },
    /// Bring the declaration card into view on the next frame.
    FocusCard,
}

#[derive(Debug)]
pub struct ViewState {
    pub result_scroll: ResultScroll,
    /// Maximum scroll offset (content length - viewport), written by the renderer.
    pub result_scroll_max: u16,
    pub modal_effect: Option<ModalEffect>,
    pub ui_options: UiOptions,
    /// When the previous frame was drawn; effects advance by the gap.
    pub last_frame: Instant,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            result_scroll: ResultScroll::default(),
            result_scroll_max: 0,
            modal_effect: None,
            ui_options: UiOptions::default(),
            last_frame: Instant::now(),
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn new(ui_options: UiOptions) -> Self {
        Self {
            ui_options,
            ..Self::default()
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.result_scroll = ResultScroll::Top;
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let current = match self.result_scroll {
            ResultScroll::Top => 0,
            ResultScroll::Manual { offset_from_top } => offset_from_top,
            ResultScroll::FocusCard => self.result_scroll_max,
        };
        let next = (i32::from(current) + delta).clamp(0, i32::from(self.result_scroll_max));
        self.result_scroll = if next == 0 {
            ResultScroll::Top
        } else {
            ResultScroll::Manual {
                offset_from_top: next as u16,
            }
        };
    }
}
