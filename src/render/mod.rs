pub mod surface;
pub mod color;
pub mod canvas;
pub mod recording;
pub mod flower;
pub mod plant;

pub use surface::{Fill, Layers, Shadow, Stroke, Surface};
pub use color::Color;
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use flower::FlowerRenderer;
pub use plant::PlantRenderer;
