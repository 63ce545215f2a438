//! The declaration card: the one piece of the UI that gets exported.
//!
//! The card is laid out as fixed-width lines with explicit foreground and
//! background colors on every cell, so the exported image matches what the
//! terminal shows regardless of the terminal's own defaults.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use limitless_engine::{CapturedRegion, CategoryProfile};

use crate::format::{center, pad_right, wrap_text};
use crate::snapshot::capture_region;
use crate::theme::{Glyphs, Palette};

/// Total card width in cells, borders included.
pub const CARD_WIDTH: u16 = 44;
const PADDING: usize = 2;
const INNER_WIDTH: usize = CARD_WIDTH as usize - 2 - 2 * PADDING;

struct Frame {
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
    horizontal: &'static str,
    vertical: &'static str,
    tee_left: &'static str,
    tee_right: &'static str,
}

const ROUNDED: Frame = Frame {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    horizontal: "─",
    vertical: "│",
    tee_left: "├",
    tee_right: "┤",
};

const ASCII: Frame = Frame {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    horizontal: "-",
    vertical: "|",
    tee_left: "+",
    tee_right: "+",
};

/// Data printed on the card.
#[derive(Debug, Clone, Copy)]
pub struct CardContent<'a> {
    pub user_name: &'a str,
    pub profile: &'a CategoryProfile,
    pub commitment: &'a str,
}

struct CardStyles {
    border: Style,
    band: Style,
    band_title: Style,
    body: Style,
    label: Style,
    emphasis: Style,
}

impl CardStyles {
    fn new(palette: &Palette, profile: &CategoryProfile) -> Self {
        let accent = palette.category(profile.color);
        let paper = Style::default().bg(palette.card_paper);
        Self {
            border: paper.fg(accent),
            band: Style::default().bg(accent).fg(palette.card_paper),
            band_title: Style::default()
                .bg(accent)
                .fg(palette.card_paper)
                .add_modifier(Modifier::BOLD),
            body: paper.fg(palette.card_ink),
            label: paper.fg(palette.card_muted),
            emphasis: paper.fg(palette.card_ink).add_modifier(Modifier::BOLD),
        }
    }
}

/// Build the card as exactly-`CARD_WIDTH`-wide lines.
#[must_use]
pub fn card_lines(
    content: CardContent<'_>,
    palette: &Palette,
    glyphs: &Glyphs,
    ascii_only: bool,
) -> Vec<Line<'static>> {
    let frame = if ascii_only { &ASCII } else { &ROUNDED };
    let styles = CardStyles::new(palette, content.profile);
    let profile = content.profile;
    let mut lines = Vec::new();

    let rule = frame.horizontal.repeat(CARD_WIDTH as usize - 2);
    lines.push(Line::from(Span::styled(
        format!("{}{rule}{}", frame.top_left, frame.top_right),
        styles.border,
    )));

    // Header band in the profile color.
    let band = |text: &str, style: Style| {
        row(frame, &styles, &center(text, INNER_WIDTH), style, styles.band)
    };
    lines.push(band("", styles.band));
    lines.push(band(
        &format!("{} LIMITLESS BRAIN DECLARATION {}", glyphs.sparkle, glyphs.sparkle),
        styles.band_title,
    ));
    lines.push(band(&profile.english_name, styles.band));
    lines.push(band("", styles.band));

    lines.push(Line::from(Span::styled(
        format!("{}{rule}{}", frame.tee_left, frame.tee_right),
        styles.border,
    )));

    let body = |text: &str, style: Style| row(frame, &styles, text, style, styles.body);
    lines.push(body("", styles.body));
    for text in wrap_text(
        &format!("I, {}, am a {}.", content.user_name, profile.name),
        INNER_WIDTH,
    ) {
        lines.push(body(&text, styles.emphasis));
    }
    lines.push(body("", styles.body));
    lines.push(body("MY COMMITMENT", styles.label));
    for text in wrap_text(&format!("\"{}\"", content.commitment.trim()), INNER_WIDTH) {
        lines.push(body(&text, styles.emphasis));
    }
    lines.push(body("", styles.body));

    if let Some(strategy) = profile.reading_strategy.first() {
        lines.push(body("HOW I READ", styles.label));
        for text in wrap_text(strategy, INNER_WIDTH) {
            lines.push(body(&text, styles.body));
        }
    }
    if let Some(strategy) = profile.memory_strategy.first() {
        lines.push(body("HOW I REMEMBER", styles.label));
        for text in wrap_text(strategy, INNER_WIDTH) {
            lines.push(body(&text, styles.body));
        }
    }
    lines.push(body("", styles.body));
    lines.push(row(
        frame,
        &styles,
        &center("My brain is limitless.", INNER_WIDTH),
        styles.emphasis,
        styles.body,
    ));
    lines.push(body("", styles.body));

    lines.push(Line::from(Span::styled(
        format!("{}{rule}{}", frame.bottom_left, frame.bottom_right),
        styles.border,
    )));
    lines
}

/// One framed row: border, padding, text padded to the inner width.
fn row(
    frame: &Frame,
    styles: &CardStyles,
    text: &str,
    text_style: Style,
    fill: Style,
) -> Line<'static> {
    let padding = " ".repeat(PADDING);
    Line::from(vec![
        Span::styled(frame.vertical, styles.border),
        Span::styled(padding.clone(), fill),
        Span::styled(pad_right(text, INNER_WIDTH), text_style),
        Span::styled(padding, fill),
        Span::styled(frame.vertical, styles.border),
    ])
}

/// Render `lines` off-screen and capture them cell by cell.
#[must_use]
pub fn capture_card(lines: &[Line<'static>]) -> Option<CapturedRegion> {
    let height = u16::try_from(lines.len()).ok()?;
    let area = Rect::new(0, 0, CARD_WIDTH, height);
    let mut buffer = Buffer::empty(area);
    Paragraph::new(lines.to_vec()).render(area, &mut buffer);
    capture_region(&buffer, area)
}

#[cfg(test)]
mod tests {
    use limitless_engine::{Category, CategoryProfile, Rgb, UiOptions};
    use unicode_width::UnicodeWidthStr;

    use super::{CARD_WIDTH, CardContent, capture_card, card_lines};
    use crate::theme::{glyphs, palette};

    fn profile() -> CategoryProfile {
        CategoryProfile {
            category: Category::Owl,
            name: "Owl".to_string(),
            english_name: "THE DEEP THINKER".to_string(),
            color: Rgb::new(99, 102, 241),
            description: "Deep.".to_string(),
            partner: "Cheetah".to_string(),
            blind_spot: "Slow starts.".to_string(),
            reading_strategy: vec!["Annotate every chapter in the margins.".to_string()],
            memory_strategy: vec!["Teach it back.".to_string()],
        }
    }

    fn lines(commitment: &str, ascii_only: bool) -> Vec<ratatui::text::Line<'static>> {
        let options = UiOptions {
            ascii_only,
            ..UiOptions::default()
        };
        let profile = profile();
        card_lines(
            CardContent {
                user_name: "Ada",
                profile: &profile,
                commitment,
            },
            &palette(options),
            &glyphs(options),
            ascii_only,
        )
    }

    #[test]
    fn every_line_has_card_width() {
        let long = "I will read twenty pages every single morning before work, no matter what.";
        for line in lines(long, false) {
            assert_eq!(line.width(), usize::from(CARD_WIDTH));
        }
    }

    #[test]
    fn card_text_mentions_name_profile_and_commitment() {
        let text = lines("Read daily", false)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("I, Ada, am a Owl."));
        assert!(text.contains("\"Read daily\""));
        assert!(text.contains("THE DEEP THINKER"));
        assert!(text.contains("Teach it back."));
    }

    #[test]
    fn ascii_card_has_no_box_drawing() {
        for line in lines("Read daily", true) {
            let text = line.to_string();
            assert!(!text.contains('╭') && !text.contains('│'), "{text}");
            assert!(text.width() == usize::from(CARD_WIDTH));
        }
    }

    #[test]
    fn capture_keeps_every_row_and_colors() {
        let lines = lines("Read daily", false);
        let region = capture_card(&lines).unwrap();

        assert_eq!(region.width(), CARD_WIDTH);
        assert_eq!(usize::from(region.height()), lines.len());
        // Every cell carries an explicit background.
        assert!(region.cells().all(|(_, _, cell)| cell.bg.is_some()));
        // Header band uses the profile color.
        assert_eq!(region.cell(5, 1).unwrap().bg, Some(Rgb::new(99, 102, 241)));
        assert!(region.text_lines().iter().any(|l| l.contains("MY COMMITMENT")));
    }
}
