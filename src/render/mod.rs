//! Rendering: the pixel surface the simulation paints into, and the terminal
//! presentation that blits it.

pub mod renderer;
pub mod surface;

pub use renderer::Renderer;
pub use surface::{PixelBuffer, Rgb, Surface};
