use glam::Vec3;

use crate::error::{FlowError, Result};

/// Fixed-capacity particle storage shared by every track.
///
/// Holds two parallel arrays, positions and opacities, of
/// `track_count × window_size` particles. Track `i` owns the slice
/// `[i × window_size, (i + 1) × window_size)`. Storage is allocated once in
/// [`ParticleBuffer::new`] and only overwritten afterwards.
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    opacities: Vec<f32>,
    window_size: usize,
    track_count: usize,
    /// Contents changed since the renderer last uploaded them.
    dirty: bool,
    /// Number of completed write passes.
    generation: u64,
}

impl ParticleBuffer {
    /// Allocate room for `track_count` slices of `window_size` particles.
    /// Opacities start at zero so nothing is drawn before the first pass.
    pub fn new(track_count: usize, window_size: usize) -> Self {
        let capacity = track_count * window_size;
        Self {
            positions: vec![Vec3::ZERO; capacity],
            opacities: vec![0.0; capacity],
            window_size,
            track_count,
            dirty: false,
            generation: 0,
        }
    }

    /// Total particle count (`track_count × window_size`).
    pub fn capacity(&self) -> usize {
        self.opacities.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// Particle range owned by `track`.
    pub fn slice_range(&self, track: usize) -> std::ops::Range<usize> {
        let start = track * self.window_size;
        start..start + self.window_size
    }

    /// Overwrite the `window_size` particles of `track` from `particles`.
    ///
    /// `particles` must yield exactly `window_size` `(position, opacity)`
    /// pairs; any other count is rejected before anything is written.
    /// Raises the dirty flag.
    pub fn write_slice<I>(&mut self, track: usize, particles: I) -> Result<()>
    where
        I: IntoIterator<Item = (Vec3, f32)>,
        I::IntoIter: ExactSizeIterator,
    {
        if track >= self.track_count {
            return Err(FlowError::SliceOutOfRange {
                track,
                tracks: self.track_count,
            });
        }
        let particles = particles.into_iter();
        if particles.len() != self.window_size {
            return Err(FlowError::SliceLength {
                expected: self.window_size,
                got: particles.len(),
            });
        }
        let range = self.slice_range(track);
        let positions = &mut self.positions[range.clone()];
        let opacities = &mut self.opacities[range];
        for ((pos, opacity), (dst_pos, dst_opacity)) in
            particles.zip(positions.iter_mut().zip(opacities.iter_mut()))
        {
            *dst_pos = pos;
            *dst_opacity = opacity;
        }
        self.dirty = true;
        Ok(())
    }

    /// Positions of one track's slice.
    pub fn track_positions(&self, track: usize) -> &[Vec3] {
        &self.positions[self.slice_range(track)]
    }

    /// Opacities of one track's slice.
    pub fn track_opacities(&self, track: usize) -> &[f32] {
        &self.opacities[self.slice_range(track)]
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` array.
    pub fn positions_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag a completed write pass: raises the dirty flag and bumps the generation.
    pub fn commit(&mut self) {
        self.dirty = true;
        self.generation += 1;
    }

    /// Read and clear the dirty flag. The renderer calls this before uploading.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Raw pointer to position data for wasm memory reads.
    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr() as *const f32
    }

    /// Raw pointer to opacity data for wasm memory reads.
    pub fn opacities_ptr(&self) -> *const f32 {
        self.opacities.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(value: f32, n: usize) -> impl ExactSizeIterator<Item = (Vec3, f32)> {
        (0..n).map(move |k| (Vec3::splat(value), k as f32))
    }

    #[test]
    fn capacity_is_tracks_times_window() {
        let buf = ParticleBuffer::new(3, 100);
        assert_eq!(buf.capacity(), 300);
        assert_eq!(buf.positions_f32().len(), 900);
        assert_eq!(buf.opacities().len(), 300);
        assert!(buf.opacities().iter().all(|&o| o == 0.0));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn slices_are_disjoint() {
        let mut buf = ParticleBuffer::new(3, 100);
        assert_eq!(buf.slice_range(2), 200..300);

        buf.write_slice(2, window(7.0, 100)).unwrap();
        buf.write_slice(0, window(1.0, 100)).unwrap();
        buf.write_slice(1, window(2.0, 100)).unwrap();

        assert!(buf.track_positions(2).iter().all(|p| *p == Vec3::splat(7.0)));
        assert!(buf.track_positions(0).iter().all(|p| *p == Vec3::splat(1.0)));
        assert_eq!(buf.track_opacities(2)[99], 99.0);
        assert_eq!(buf.opacities()[200], 0.0);
    }

    #[test]
    fn write_raises_dirty_flag() {
        let mut buf = ParticleBuffer::new(1, 4);
        buf.write_slice(0, window(1.0, 4)).unwrap();
        assert!(buf.is_dirty());
        assert!(buf.take_dirty());
        assert!(!buf.take_dirty());
    }

    #[test]
    fn write_out_of_range_fails() {
        let mut buf = ParticleBuffer::new(2, 4);
        let err = buf.write_slice(2, window(1.0, 4)).unwrap_err();
        assert!(matches!(err, FlowError::SliceOutOfRange { track: 2, tracks: 2 }));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn short_write_is_rejected_and_keeps_old_frame() {
        let mut buf = ParticleBuffer::new(1, 4);
        buf.write_slice(0, window(9.0, 4)).unwrap();
        buf.take_dirty();

        let err = buf.write_slice(0, [(Vec3::splat(1.0), 0.5)]).unwrap_err();

        assert!(matches!(err, FlowError::SliceLength { expected: 4, got: 1 }));
        assert_eq!(buf.track_opacities(0), &[0.0, 1.0, 2.0, 3.0]);
        assert!(buf.track_positions(0).iter().all(|p| *p == Vec3::splat(9.0)));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn long_write_is_rejected() {
        let mut buf = ParticleBuffer::new(2, 4);
        let err = buf.write_slice(1, window(5.0, 6)).unwrap_err();
        assert!(matches!(err, FlowError::SliceLength { expected: 4, got: 6 }));
        assert!(buf.track_positions(1).iter().all(|p| *p == Vec3::ZERO));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn writes_never_reallocate() {
        let mut buf = ParticleBuffer::new(2, 8);
        let pos_ptr = buf.positions_ptr();
        let op_ptr = buf.opacities_ptr();
        for _ in 0..10 {
            buf.write_slice(1, window(3.0, 8)).unwrap();
        }
        assert_eq!(buf.positions_ptr(), pos_ptr);
        assert_eq!(buf.opacities_ptr(), op_ptr);
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn flat_positions_interleave_xyz() {
        let mut buf = ParticleBuffer::new(1, 2);
        buf.write_slice(0, [(Vec3::new(1.0, 2.0, 3.0), 0.5), (Vec3::new(4.0, 5.0, 6.0), 0.25)])
            .unwrap();
        assert_eq!(buf.positions_f32(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn commit_bumps_generation() {
        let mut buf = ParticleBuffer::new(1, 1);
        buf.commit();
        buf.commit();
        assert_eq!(buf.generation(), 2);
        assert!(buf.take_dirty());
    }
}
