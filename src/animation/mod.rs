//! Animation timing helpers
//!
//! A smoothstep curve for fades and a frame-driven timeline that replaces
//! browser timers for delayed and periodic events.

mod easing;
mod timeline;

pub use easing::smoothstep;
pub use timeline::Timeline;
