/// Flat float buffer layout read by the JavaScript renderer.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Positions: capacity × 3 floats]
/// [Opacities: capacity × 1 float]
/// ```
///
/// The header carries the capacities, so the reader computes offsets from it.

use crate::error::{FlowError, Result};
use crate::renderer::traits::FrameData;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_DIRTY: usize = 0;
pub const HEADER_GENERATION: usize = 1;
pub const HEADER_CAPACITY: usize = 2;
pub const HEADER_WINDOW_SIZE: usize = 3;
pub const HEADER_TRACK_COUNT: usize = 4;
pub const HEADER_TIME: usize = 5;
pub const HEADER_PROTOCOL_VERSION: usize = 6;
pub const HEADER_RESERVED: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per particle position: x, y, z (wire format — never changes).
pub const POSITION_FLOATS: usize = 3;

/// Floats per particle opacity (wire format — never changes).
pub const OPACITY_FLOATS: usize = 1;

/// Section sizes and offsets for a given particle capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferLayout {
    /// Total particles (`track_count × window_size`).
    pub capacity: usize,
    pub window_size: usize,
    pub track_count: usize,

    /// Size of the position section in floats.
    pub position_floats: usize,
    /// Size of the opacity section in floats.
    pub opacity_floats: usize,

    /// Offset (in floats) where positions begin.
    pub position_offset: usize,
    /// Offset (in floats) where opacities begin.
    pub opacity_offset: usize,

    /// Total buffer size in floats.
    pub total_floats: usize,
    /// Total buffer size in bytes.
    pub total_bytes: usize,
}

impl BufferLayout {
    pub fn new(track_count: usize, window_size: usize) -> Self {
        let capacity = track_count * window_size;
        let position_floats = capacity * POSITION_FLOATS;
        let opacity_floats = capacity * OPACITY_FLOATS;

        let position_offset = HEADER_FLOATS;
        let opacity_offset = position_offset + position_floats;
        let total_floats = opacity_offset + opacity_floats;

        Self {
            capacity,
            window_size,
            track_count,
            position_floats,
            opacity_floats,
            position_offset,
            opacity_offset,
            total_floats,
            total_bytes: total_floats * 4,
        }
    }

    /// Serialize `frame` into `out`, which must be exactly `total_floats` long.
    pub fn write(&self, frame: &FrameData, out: &mut [f32]) -> Result<()> {
        if out.len() != self.total_floats
            || frame.positions.len() != self.position_floats
            || frame.opacities.len() != self.opacity_floats
        {
            return Err(FlowError::InvalidConfig(format!(
                "wire buffer of {} floats does not match layout of {} floats",
                out.len(),
                self.total_floats
            )));
        }

        out[HEADER_DIRTY] = if frame.dirty { 1.0 } else { 0.0 };
        out[HEADER_GENERATION] = frame.generation as f32;
        out[HEADER_CAPACITY] = self.capacity as f32;
        out[HEADER_WINDOW_SIZE] = self.window_size as f32;
        out[HEADER_TRACK_COUNT] = self.track_count as f32;
        out[HEADER_TIME] = frame.time;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_RESERVED] = 0.0;

        out[self.position_offset..self.opacity_offset].copy_from_slice(frame.positions);
        out[self.opacity_offset..self.total_floats].copy_from_slice(frame.opacities);
        Ok(())
    }
}
