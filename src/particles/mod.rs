//! Free-floating particles that are not part of any plant

mod rain;
mod bubbles;

pub use rain::{RainFlower, RainSystem};
pub use bubbles::{Bubble, BubblePool};
