//! TUI rendering for Limitless using ratatui.

mod card;
mod effects;
mod format;
mod input;
mod snapshot;
mod theme;

#[cfg(test)]
mod test_support;

pub use card::{CARD_WIDTH, CardContent, capture_card, card_lines};
pub use effects::apply_modal_effect;
pub use input::{InputPump, handle_events, handle_key};
pub use snapshot::{capture_region, color_to_rgb};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use limitless_engine::{AnimPhase, App, Category, Step, option_letter};

use self::format::{bar_fill, pad_right, wrap_text};

const PANEL_MAX_WIDTH: u16 = 72;
const TALLY_BAR_MAX: usize = 20;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Step panel
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());
    let body = chunks[0];

    let base_area = panel_area(app.step(), body);
    let elapsed = app.frame_elapsed();
    let (area, effect_done) = if let Some(effect) = app.modal_effect_mut() {
        effect.advance(elapsed);
        (
            apply_modal_effect(effect, base_area, body),
            effect.phase() == AnimPhase::Completed,
        )
    } else {
        (base_area, false)
    };
    if effect_done {
        app.clear_modal_effect();
    }

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(2))
        .title(Line::from(vec![Span::styled(
            format!(" {} LIMITLESS ", glyphs.brain),
            styles::accent(&palette),
        )]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.step() {
        Step::Intro => draw_intro(frame, app, inner, &palette, &glyphs),
        Step::Identify => draw_identify(frame, app, inner, &palette),
        Step::Quiz => draw_quiz(frame, app, inner, &palette, &glyphs),
        Step::Analyzing => draw_analyzing(frame, app, inner, &palette),
        Step::Result => draw_result(frame, app, inner, &palette, &glyphs),
    }

    draw_status_bar(frame, app, chunks[1], &palette);
}

/// Centered panel for `step`. Quiz and Result use the full height.
fn panel_area(step: Step, body: Rect) -> Rect {
    let width = body.width.min(PANEL_MAX_WIDTH);
    let height = match step {
        Step::Intro => 14,
        Step::Identify => 13,
        Step::Analyzing => 11,
        Step::Quiz | Step::Result => body.height,
    }
    .min(body.height);
    Rect {
        x: body.x + (body.width - width) / 2,
        y: body.y + (body.height - height) / 2,
        width,
        height,
    }
}

fn draw_intro(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let count = app.content().question_count();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{0}  LIMITLESS  {0}", glyphs.sparkle),
            styles::accent(palette),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled("The Last-Focus Brain Type Test", styles::title(palette)))
            .centered(),
        Line::from(Span::styled(
            "Find out how your brain reads, remembers, and stays in flow.",
            styles::body(palette),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            format!("{count} questions {} about 3 minutes", glyphs.bullet),
            styles::muted(palette),
        ))
        .centered(),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "  Start the test  ",
            styles::button(palette, true),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_identify(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Prompt
            Constraint::Length(3), // Input
            Constraint::Length(1),
            Constraint::Length(1), // Button
            Constraint::Min(0),
        ])
        .split(area);

    let prompt = vec![
        Line::from(""),
        Line::from(Span::styled("Before we start", styles::accent(palette))).centered(),
        Line::from(""),
        Line::from(Span::styled("What should we call you?", styles::title(palette))).centered(),
        Line::from(Span::styled(
            "Your name goes on your declaration card.",
            styles::muted(palette),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(prompt), chunks[0]);

    let draft = app.name_draft();
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .padding(Padding::horizontal(1));
    let input_inner = input_block.inner(chunks[1]);

    let cursor_display_pos = u16::try_from(draft.before_cursor().width()).unwrap_or(u16::MAX);
    let horizontal_scroll = cursor_display_pos.saturating_sub(input_inner.width.saturating_sub(1));
    let text = if draft.text().is_empty() {
        Line::from(Span::styled("Your name", Style::default().fg(palette.text_disabled)))
    } else {
        Line::from(Span::styled(
            draft.text().to_string(),
            Style::default().fg(palette.text_primary),
        ))
    };
    frame.render_widget(
        Paragraph::new(text)
            .block(input_block)
            .scroll((0, horizontal_scroll)),
        chunks[1],
    );
    frame.set_cursor_position((
        input_inner
            .x
            .saturating_add(cursor_display_pos)
            .saturating_sub(horizontal_scroll),
        input_inner.y,
    ));

    let ready = !draft.text().trim().is_empty();
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled("  Continue  ", styles::button(palette, ready))).centered(),
        ),
        chunks[3],
    );
}

fn draw_quiz(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let Some(question) = app.current_question() else {
        return;
    };
    let session = app.session();
    let index = session.current_question();
    let total = session.question_count();
    let answer = session.current_answer();
    let width = usize::from(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let mut lines = Vec::new();
    lines.push(Line::from(""));

    let label = format!("QUESTION {}", index + 1);
    let counter = format!("{} / {total}", index + 1);
    let gap = width.saturating_sub(label.width() + counter.width());
    lines.push(Line::from(vec![
        Span::styled(label, styles::accent(palette)),
        Span::raw(" ".repeat(gap)),
        Span::styled(counter, styles::muted(palette)),
    ]));

    let filled = bar_fill(count_u32(index + 1), count_u32(total), width);
    lines.push(Line::from(vec![
        Span::styled(
            glyphs.bar_full.repeat(filled),
            Style::default().fg(palette.primary),
        ),
        Span::styled(
            glyphs.bar_empty.repeat(width - filled),
            Style::default().fg(palette.bg_border),
        ),
    ]));
    lines.push(Line::from(""));

    for text in wrap_text(&question.prompt, width) {
        lines.push(Line::from(Span::styled(text, styles::title(palette))));
    }
    lines.push(Line::from(""));

    for (position, option) in question.options.iter().enumerate() {
        let is_answer = answer == Some(option.category);
        let is_cursor = position == app.option_cursor();
        let style = if is_answer {
            styles::option_selected(palette)
        } else if is_cursor {
            styles::option_cursor(palette)
        } else {
            styles::body(palette)
        };
        let marker = if is_cursor { glyphs.selected } else { " " };
        let prefix = format!("{marker} [{}] ", option_letter(position));
        let indent = " ".repeat(prefix.width());
        let label_width = width.saturating_sub(prefix.width());
        for (i, text) in wrap_text(&option.label, label_width).into_iter().enumerate() {
            let lead = if i == 0 { prefix.clone() } else { indent.clone() };
            lines.push(Line::from(Span::styled(
                pad_right(&format!("{lead}{text}"), width),
                style,
            )));
        }
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let can_back = index > 0;
    let can_next = answer.is_some();
    let next_label = if session.is_last_question() {
        "See my result"
    } else {
        "Next"
    };
    let back = format!(" {} Back ", glyphs.back);
    let next = format!(" {next_label} {} ", glyphs.next);
    let gap = width.saturating_sub(back.width() + next.width());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(back, styles::button(palette, can_back)),
            Span::raw(" ".repeat(gap)),
            Span::styled(next, styles::button(palette, can_next)),
        ])),
        chunks[1],
    );
}

fn draw_analyzing(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let spinner = spinner_frame(app.tick_count(), app.ui_options());
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{spinner}  Analyzing {}'s brain...", app.session().user_name()),
            styles::accent(palette),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            "Balancing your C.O.D.E scores",
            styles::muted(palette),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            "\"Your brain is not fixed. It is limitless.\"",
            styles::body(palette).add_modifier(Modifier::ITALIC),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

/// The result screen as pre-wrapped lines.
struct ResultDocument {
    lines: Vec<Line<'static>>,
    /// Row of the first card line, once the card is revealed.
    card_offset: Option<u16>,
    /// The card itself, uncentered, for capture.
    card: Option<Vec<Line<'static>>>,
}

fn result_document(
    app: &App,
    palette: &Palette,
    glyphs: &Glyphs,
    width: usize,
) -> Option<ResultDocument> {
    let session = app.session();
    let result = session.result()?;
    let primary = &result.primary;
    let secondary = &result.secondary;
    let accent = Style::default()
        .fg(palette.category(primary.color))
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let push_wrapped = |lines: &mut Vec<Line<'static>>, text: &str, style: Style| {
        for line in wrap_text(text, width) {
            lines.push(Line::from(Span::styled(line, style)));
        }
    };

    lines.push(Line::from(""));
    push_wrapped(
        &mut lines,
        &format!("{}'s brain type is", session.user_name()),
        styles::muted(palette),
    );
    push_wrapped(&mut lines, &primary.name, accent);
    push_wrapped(&mut lines, &primary.english_name, styles::muted(palette));
    lines.push(Line::from(""));
    push_wrapped(&mut lines, &primary.description, styles::body(palette));
    lines.push(Line::from(""));
    push_wrapped(
        &mut lines,
        &format!("Secondary type: {}", secondary.name),
        styles::body(palette),
    );
    lines.push(Line::from(""));

    // C.O.D.E balance
    lines.push(Line::from(Span::styled(
        "C.O.D.E BALANCE",
        styles::accent(palette),
    )));
    let total = app.content().question_count();
    let names: Vec<(Category, &str)> = Category::ALL
        .into_iter()
        .map(|category| (category, app.content().profile(category).name.as_str()))
        .collect();
    let name_width = names.iter().map(|(_, name)| name.width()).max().unwrap_or(0);
    let count_width = format!("{total} / {total}").width();
    let bar_width = width
        .saturating_sub(name_width + count_width + 2)
        .min(TALLY_BAR_MAX);
    for (category, name) in names {
        let value = result.scores.get(category);
        let filled = bar_fill(value, count_u32(total), bar_width);
        let color = palette.category(app.content().profile(category).color);
        lines.push(Line::from(vec![
            Span::styled(pad_right(name, name_width), styles::body(palette)),
            Span::raw(" "),
            Span::styled(glyphs.bar_full.repeat(filled), Style::default().fg(color)),
            Span::styled(
                glyphs.bar_empty.repeat(bar_width - filled),
                Style::default().fg(palette.bg_border),
            ),
            Span::raw(" "),
            Span::styled(format!("{value} / {total}"), styles::muted(palette)),
        ]));
    }
    lines.push(Line::from(""));

    let section = |glyph: &str, title: &str, color: Color| {
        Line::from(Span::styled(
            format!("{glyph} {title}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    };
    lines.push(section(glyphs.partner, "BEST PARTNER", palette.partner));
    push_wrapped(&mut lines, &primary.partner, styles::body(palette));
    lines.push(Line::from(""));
    lines.push(section(glyphs.blind_spot, "BLIND SPOT", palette.blind_spot));
    push_wrapped(&mut lines, &primary.blind_spot, styles::body(palette));
    lines.push(Line::from(""));
    lines.push(section(glyphs.bullet, "READING STRATEGY", palette.reading));
    for strategy in &primary.reading_strategy {
        push_wrapped(
            &mut lines,
            &format!("{} {strategy}", glyphs.bullet),
            styles::body(palette),
        );
    }
    lines.push(Line::from(""));
    lines.push(section(glyphs.bullet, "MEMORY STRATEGY", palette.memory));
    for strategy in &primary.memory_strategy {
        push_wrapped(
            &mut lines,
            &format!("{} {strategy}", glyphs.bullet),
            styles::body(palette),
        );
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        glyphs.rule.repeat(width),
        Style::default().fg(palette.bg_border),
    )));
    lines.push(Line::from(""));

    let min = app.settings().quiz.min_commitment_chars;
    if !session.card_revealed() {
        lines.push(Line::from(Span::styled(
            "YOUR COMMITMENT",
            styles::accent(palette),
        )));
        push_wrapped(
            &mut lines,
            "What will you do differently, starting this week?",
            styles::muted(palette),
        );
        lines.push(Line::from(""));

        let draft = app.commitment_draft();
        let field = Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight);
        if draft.text().is_empty() {
            let placeholder = format!("{}Read ten pages every morning", glyphs.caret);
            lines.push(Line::from(Span::styled(
                pad_right(&placeholder, width),
                field.fg(palette.text_muted),
            )));
        } else {
            let with_caret = format!(
                "{}{}{}",
                draft.before_cursor(),
                glyphs.caret,
                draft.after_cursor()
            );
            for line in wrap_text(&with_caret, width) {
                lines.push(Line::from(Span::styled(pad_right(&line, width), field)));
            }
        }
        lines.push(Line::from(""));
        let written = session.commitment().trim().chars().count();
        lines.push(Line::from(vec![
            Span::styled("Enter", styles::key_highlight(palette)),
            Span::styled(" issue declaration card  ", styles::key_hint(palette)),
            Span::styled(
                format!("({written}/{min} characters)"),
                styles::muted(palette),
            ),
        ]));
        lines.push(Line::from(""));
        return Some(ResultDocument {
            lines,
            card_offset: None,
            card: None,
        });
    }

    let card = card_lines(
        CardContent {
            user_name: session.user_name(),
            profile: primary,
            commitment: session.commitment(),
        },
        palette,
        glyphs,
        app.ui_options().ascii_only,
    );
    let card_offset = u16::try_from(lines.len()).ok();
    let indent = " ".repeat(width.saturating_sub(usize::from(CARD_WIDTH)) / 2);
    for line in &card {
        let mut spans = vec![Span::raw(indent.clone())];
        spans.extend(line.spans.iter().cloned());
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(
        Line::from(vec![
            Span::styled("s", styles::key_highlight(palette)),
            Span::styled(" save card as PNG   ", styles::key_hint(palette)),
            Span::styled("r", styles::key_highlight(palette)),
            Span::styled(" take the test again", styles::key_hint(palette)),
        ])
        .centered(),
    );
    lines.push(Line::from(""));
    Some(ResultDocument {
        lines,
        card_offset,
        card: Some(card),
    })
}

fn draw_result(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    // Leave a column for the scrollbar.
    let text_area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    let Some(document) = result_document(app, palette, glyphs, usize::from(text_area.width))
    else {
        return;
    };

    if let Some(card) = &document.card
        && app.card_region().is_none()
        && let Some(region) = capture_card(card)
    {
        tracing::debug!(
            width = region.width(),
            height = region.height(),
            "Mounted declaration card"
        );
        app.mount_card_region(region);
    }

    let total_lines = u16::try_from(document.lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(text_area.height);
    app.update_result_scroll(max_scroll, document.card_offset);
    let scroll_offset = app.result_scroll_offset();

    frame.render_widget(
        Paragraph::new(document.lines).scroll((scroll_offset, 0)),
        text_area,
    );

    // Scrollbar only when the document overflows.
    if max_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some(glyphs.arrow_up))
            .end_symbol(Some(glyphs.arrow_down))
            .track_symbol(Some(glyphs.track))
            .thumb_symbol(glyphs.thumb)
            .style(Style::default().fg(palette.text_muted));

        // content_length = scrollable range, so the thumb reaches the bottom at max_scroll
        let mut scrollbar_state =
            ScrollbarState::new(usize::from(max_scroll)).position(usize::from(scroll_offset));

        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let line = if let Some(notice) = app.notice() {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(notice.message(), styles::notice(palette, notice.is_error())),
        ])
    } else if app.is_exporting() {
        let spinner = spinner_frame(app.tick_count(), app.ui_options());
        Line::from(Span::styled(
            format!(" {spinner} Saving card..."),
            Style::default().fg(palette.primary),
        ))
    } else {
        key_hints(app, palette)
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn key_hints(app: &App, palette: &Palette) -> Line<'static> {
    let hints: &[(&'static str, &'static str)] = match app.step() {
        Step::Intro => &[("Enter", "start"), ("q", "quit")],
        Step::Identify => &[("Enter", "continue"), ("Esc", "quit")],
        Step::Quiz => &[
            ("a-d", "answer"),
            ("↑↓", "move"),
            ("→", "next"),
            ("←", "back"),
            ("Esc", "quit"),
        ],
        Step::Analyzing => &[("q", "quit")],
        Step::Result if app.session().card_revealed() => &[
            ("s", "save card"),
            ("r", "restart"),
            ("PgUp/PgDn", "scroll"),
            ("q", "quit"),
        ],
        Step::Result => &[
            ("Enter", "issue card"),
            ("PgUp/PgDn", "scroll"),
            ("Ctrl+R", "restart"),
            ("Esc", "quit"),
        ],
    };
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}  "), styles::key_hint(palette)));
    }
    Line::from(spans)
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
