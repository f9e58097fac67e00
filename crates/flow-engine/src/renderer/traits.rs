//! Contract for the GPU side of the sketch.
//!
//! The engine never touches a graphics API. A host-side renderer (WebGL in
//! the browser, or a native backend) implements [`RenderBridge`] and is
//! handed a [`FrameData`] view of the particle buffer once per frame.

use super::particle_buffer::ParticleBuffer;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    /// Flat `[x, y, z]` positions, 3 floats per particle.
    pub positions: &'a [f32],
    /// One opacity per particle.
    pub opacities: &'a [f32],
    /// Value of the `time` uniform.
    pub time: f32,
    /// Write-pass counter of the buffer contents.
    pub generation: u64,
    /// Contents changed since the last upload.
    pub dirty: bool,
}

impl<'a> FrameData<'a> {
    /// View of `buffer` for a frame at `time`.
    pub fn from_buffer(buffer: &'a ParticleBuffer, time: f32) -> Self {
        Self {
            positions: buffer.positions_f32(),
            opacities: buffer.opacities(),
            time,
            generation: buffer.generation(),
            dirty: buffer.is_dirty(),
        }
    }

    /// Number of particles described by this frame.
    pub fn particle_count(&self) -> usize {
        self.opacities.len()
    }
}

/// GPU backend that draws the particle buffer as additively blended point
/// sprites, so overlapping particles brighten.
pub trait RenderBridge {
    /// Backend identifier (e.g., "webgl", "wgpu").
    fn backend(&self) -> &'static str;

    /// Copy buffer contents to the GPU. Only called when the frame is dirty.
    fn upload(&mut self, frame: &FrameData);

    /// Issue the draw call for the most recently uploaded contents.
    fn draw(&mut self, frame: &FrameData);
}
