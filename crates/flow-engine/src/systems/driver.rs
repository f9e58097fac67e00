//! Per-frame animation pass over every track.

use crate::api::config::FlowConfig;
use crate::components::track::{LineTrack, TrackId};
use crate::error::{FlowError, Result};
use crate::renderer::particle_buffer::ParticleBuffer;
use crate::systems::sampler::SampledPoint;

/// Linear fade from 0 at the cursor towards the tail of the window.
fn ramp_opacity(k: usize, divisor: f32) -> f32 {
    k as f32 / divisor
}

/// Advances all tracks and rewrites their particle slices.
///
/// Tracks are processed in registration order, so track `i` always writes
/// slice `i` of the buffer.
pub struct AnimationDriver {
    tracks: Vec<LineTrack>,
    window_size: usize,
    opacity_divisor: f32,
}

impl AnimationDriver {
    pub fn new(window_size: usize, opacity_divisor: f32) -> Self {
        Self {
            tracks: Vec::new(),
            window_size,
            opacity_divisor,
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(config.window_size, config.opacity_divisor)
    }

    /// Add a track for a sampled path. Its slice index is the returned id.
    pub fn register(&mut self, points: Vec<SampledPoint>, speed: f32) -> TrackId {
        let id = TrackId(self.tracks.len() as u32);
        self.tracks.push(LineTrack::new(id, points, speed));
        id
    }

    pub fn tracks(&self) -> &[LineTrack] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&LineTrack> {
        self.tracks.get(id.index())
    }

    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut LineTrack> {
        self.tracks.get_mut(id.index())
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Opacity drawn at window offset `k`.
    pub fn opacity(&self, k: usize) -> f32 {
        ramp_opacity(k, self.opacity_divisor)
    }

    /// A buffer sized for the registered tracks.
    pub fn create_buffer(&self) -> ParticleBuffer {
        ParticleBuffer::new(self.tracks.len(), self.window_size)
    }

    /// Run one frame: advance every track, rewrite its slice, then commit.
    ///
    /// Tracks without points are skipped and keep a zero-opacity slice.
    /// The buffer shape is checked before anything is written, so a failed
    /// step leaves the previous frame intact.
    pub fn step(&mut self, buffer: &mut ParticleBuffer) -> Result<()> {
        if buffer.window_size() != self.window_size || buffer.track_count() < self.tracks.len() {
            return Err(FlowError::InvalidConfig(format!(
                "buffer holds {} tracks × {} particles, driver needs {} × {}",
                buffer.track_count(),
                buffer.window_size(),
                self.tracks.len(),
                self.window_size
            )));
        }

        let window_size = self.window_size;
        let divisor = self.opacity_divisor;
        for (slot, track) in self.tracks.iter_mut().enumerate() {
            track.advance();
            if track.is_empty() {
                continue;
            }
            let points = track.points();
            let particles = track
                .window_indices(window_size)
                .enumerate()
                .map(|(k, idx)| (points[idx], ramp_opacity(k, divisor)));
            buffer.write_slice(slot, particles)?;
        }

        buffer.commit();
        Ok(())
    }
}
