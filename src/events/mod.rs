//! Battle events.
//!
//! Combat math never touches presentation. Instead every placement, hit,
//! defeat, combo and draw is recorded as a `BattleEvent`, and a rendering
//! layer subscribes to those.

pub mod event;

pub use event::{BattleEvent, DamageSource, GameOutcome, SkipReason};
pub use crate::combat::ComboKind;
