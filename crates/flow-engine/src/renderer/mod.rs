pub mod particle_buffer;
pub mod traits;

pub use traits::{FrameData, RenderBridge};
