//! Presentation state shared by the controller and the renderer.
//!
//! Plain data: no IO, no async, and no ratatui types, so the engine can own
//! it while the tui crate reads and animates it.

mod animation;
mod draft;
mod modal;
mod view_state;

pub use animation::AnimPhase;
pub use draft::DraftInput;
pub use modal::{ModalEffect, ModalEffectKind};
pub use view_state::{ResultScroll, UiOptions, ViewState};
