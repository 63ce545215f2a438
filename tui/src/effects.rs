//! Panel animation effects.

use ratatui::layout::Rect;

use limitless_engine::{ModalEffect, ModalEffectKind};

/// Shift or shrink `base` according to the running effect.
///
/// The returned rect always lies inside `viewport`.
#[must_use]
pub fn apply_modal_effect(effect: &ModalEffect, base: Rect, viewport: Rect) -> Rect {
    let t = effect.progress().clamp(0.0, 1.0);
    let rect = match effect.kind() {
        ModalEffectKind::CardReveal => pop(base, ease_out_back(t)),
        ModalEffectKind::ResultEntry => slide_up(base, viewport, ease_out_cubic(t)),
        ModalEffectKind::Reject => shake(base, viewport, t),
    };
    rect.intersection(viewport)
}

fn pop(base: Rect, t: f32) -> Rect {
    let scale = (0.7 + 0.3 * t).min(1.0);
    let width = ((f32::from(base.width) * scale).round() as u16).clamp(1, base.width.max(1));
    let height = ((f32::from(base.height) * scale).round() as u16).clamp(1, base.height.max(1));
    Rect {
        x: base.x + base.width.saturating_sub(width) / 2,
        y: base.y + base.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn slide_up(base: Rect, viewport: Rect, t: f32) -> Rect {
    let room = viewport.bottom().saturating_sub(base.bottom());
    let travel = room.min(base.height / 2).min(4);
    let offset = ((1.0 - t) * f32::from(travel)).round() as u16;
    Rect {
        y: base.y.saturating_add(offset),
        ..base
    }
}

fn shake(base: Rect, viewport: Rect, t: f32) -> Rect {
    const SWINGS: f32 = 3.0;
    const AMPLITUDE: f32 = 2.0;
    let offset = (f32::sin(t * std::f32::consts::TAU * SWINGS) * AMPLITUDE * (1.0 - t)).round()
        as i32;
    let left = i32::from(viewport.x);
    let right = (i32::from(viewport.right()) - i32::from(base.width)).max(left);
    let x = (i32::from(base.x) + offset).clamp(left, right) as u16;
    Rect { x, ..base }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Slight overshoot, clamped by `pop` so the panel never exceeds its base.
fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.2;
    const C3: f32 = C1 + 1.0;
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}
