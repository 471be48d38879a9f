//! Procedural plant growth
//!
//! Stems grow a little every tick, branch once when they reach full length,
//! and a plant is finished when every tip has stopped growing.

mod stem;
mod engine;
mod bed;

pub use stem::Stem;
pub use engine::GrowthEngine;
pub use bed::{Plant, PlantBed};
