//! Color theme and glyphs for the Limitless TUI.
//!
//! Indigo-on-ink palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use limitless_engine::{Rgb, UiOptions};

/// Palette color constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(17, 24, 39); // gray-900
    pub const BG_PANEL: Color = Color::Rgb(31, 41, 55); // gray-800
    pub const BG_HIGHLIGHT: Color = Color::Rgb(55, 48, 163); // indigo-800
    pub const BG_BORDER: Color = Color::Rgb(75, 85, 99); // gray-600

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(243, 244, 246); // gray-100
    pub const TEXT_SECONDARY: Color = Color::Rgb(209, 213, 219); // gray-300
    pub const TEXT_MUTED: Color = Color::Rgb(156, 163, 175); // gray-400
    pub const TEXT_DISABLED: Color = Color::Rgb(107, 114, 128); // gray-500

    // === Primary/Brand ===
    pub const PRIMARY: Color = Color::Rgb(99, 102, 241); // indigo-500
    pub const PRIMARY_DIM: Color = Color::Rgb(129, 140, 248); // indigo-400

    // === Accent Colors ===
    pub const PINK: Color = Color::Rgb(236, 72, 153);
    pub const AMBER: Color = Color::Rgb(245, 158, 11);
    pub const ORANGE: Color = Color::Rgb(249, 115, 22);
    pub const BLUE: Color = Color::Rgb(59, 130, 246);
    pub const GREEN: Color = Color::Rgb(34, 197, 94);
    pub const RED: Color = Color::Rgb(239, 68, 68);

    // === Declaration card (exported on white paper) ===
    pub const CARD_PAPER: Color = Color::Rgb(255, 255, 255);
    pub const CARD_INK: Color = Color::Rgb(17, 24, 39);
    pub const CARD_MUTED: Color = Color::Rgb(107, 114, 128);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub success: Color,
    pub error: Color,
    pub partner: Color,
    pub blind_spot: Color,
    pub reading: Color,
    pub memory: Color,
    pub card_paper: Color,
    pub card_ink: Color,
    pub card_muted: Color,
    /// Whether category colors from content are used as-is.
    pub category_colors: bool,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            primary: colors::PRIMARY,
            primary_dim: colors::PRIMARY_DIM,
            success: colors::GREEN,
            error: colors::RED,
            partner: colors::PINK,
            blind_spot: colors::AMBER,
            reading: colors::ORANGE,
            memory: colors::BLUE,
            card_paper: colors::CARD_PAPER,
            card_ink: colors::CARD_INK,
            card_muted: colors::CARD_MUTED,
            category_colors: true,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            text_disabled: Color::DarkGray,
            primary: Color::White,
            primary_dim: Color::Gray,
            success: Color::Green,
            error: Color::Red,
            partner: Color::Magenta,
            blind_spot: Color::Yellow,
            reading: Color::Yellow,
            memory: Color::Cyan,
            card_paper: Color::White,
            card_ink: Color::Black,
            card_muted: Color::Black,
            category_colors: false,
        }
    }

    /// Color for a category accent (bars, headers).
    #[must_use]
    pub fn category(&self, color: Rgb) -> Color {
        if self.category_colors {
            Color::Rgb(color.r, color.g, color.b)
        } else {
            self.primary
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for icons, bars, and spinners.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub brain: &'static str,
    pub selected: &'static str,
    pub bullet: &'static str,
    pub back: &'static str,
    pub next: &'static str,
    pub bar_full: &'static str,
    pub bar_empty: &'static str,
    pub caret: &'static str,
    pub sparkle: &'static str,
    pub partner: &'static str,
    pub blind_spot: &'static str,
    pub rule: &'static str,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
    pub track: &'static str,
    pub thumb: &'static str,
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            brain: "(@)",
            selected: ">",
            bullet: "-",
            back: "<",
            next: ">",
            bar_full: "#",
            bar_empty: ".",
            caret: "_",
            sparkle: "*",
            partner: "&",
            blind_spot: "!",
            rule: "-",
            arrow_up: "^",
            arrow_down: "v",
            track: "|",
            thumb: "#",
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            brain: "◉",
            selected: "▸",
            bullet: "•",
            back: "‹",
            next: "›",
            bar_full: "█",
            bar_empty: "░",
            caret: "▏",
            sparkle: "✦",
            partner: "♥",
            blind_spot: "◌",
            rule: "─",
            arrow_up: "↑",
            arrow_down: "↓",
            track: "│",
            thumb: "█",
            spinner_frames: SPINNER_FRAMES,
        }
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[(tick / 8) % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn accent(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary_dim)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn body(palette: &Palette) -> Style {
        Style::default().fg(palette.text_secondary)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn option_selected(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn option_cursor(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
    }

    #[must_use]
    pub fn button(palette: &Palette, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(palette.text_primary)
                .bg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_disabled)
        }
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary_dim)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn notice(palette: &Palette, is_error: bool) -> Style {
        Style::default()
            .fg(if is_error {
                palette.error
            } else {
                palette.success
            })
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use limitless_engine::{Rgb, UiOptions};
    use ratatui::style::Color;

    use super::{Palette, glyphs, spinner_frame};

    #[test]
    fn spinner_frame_cycles_without_reduced_motion() {
        let options = UiOptions::default();
        let frame0 = spinner_frame(0, options);
        let frame1 = spinner_frame(8, options);
        assert_ne!(frame0, frame1, "spinner should cycle through frames");
    }

    #[test]
    fn spinner_frame_static_with_reduced_motion() {
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        assert_eq!(spinner_frame(0, options), spinner_frame(8, options));
        assert_eq!(spinner_frame(0, options), spinner_frame(800, options));
    }

    #[test]
    fn ascii_glyphs_are_ascii() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let g = glyphs(options);
        for glyph in [g.brain, g.selected, g.bar_full, g.bar_empty, g.caret, g.rule] {
            assert!(glyph.is_ascii(), "{glyph:?} is not ascii");
        }
        assert!(g.spinner_frames.iter().all(|frame| frame.is_ascii()));
    }

    #[test]
    fn high_contrast_ignores_category_colors() {
        let teal = Rgb::new(6, 182, 212);
        assert_eq!(Palette::standard().category(teal), Color::Rgb(6, 182, 212));
        assert_eq!(Palette::high_contrast().category(teal), Color::White);
    }
}
