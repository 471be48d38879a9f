pub mod pointer;

pub use pointer::{ClientRect, PointerState, to_surface_point};
