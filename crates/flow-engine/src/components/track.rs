use crate::systems::sampler::SampledPoint;

/// Identifier of a track, equal to its registration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(pub u32);

impl TrackId {
    /// Position of this track's slice in the particle buffer.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One sampled path plus the cursor that flows along it.
///
/// The cursor is the only per-frame state: the particles drawn for a track
/// are always the `window_size` points starting at the cursor, so no
/// per-particle history is stored.
#[derive(Debug, Clone)]
pub struct LineTrack {
    id: TrackId,
    points: Vec<SampledPoint>,
    /// Always in `[0, points.len())`, or 0 for an empty track.
    cursor: f32,
    /// Points advanced per frame.
    speed: f32,
}

impl LineTrack {
    pub fn new(id: TrackId, points: Vec<SampledPoint>, speed: f32) -> Self {
        Self {
            id,
            points,
            cursor: 0.0,
            speed,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Number of sampled points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// A track with no points never draws.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SampledPoint] {
        &self.points
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change the flow speed. Negative and non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed >= 0.0 {
            self.speed = speed;
        }
    }

    /// Move the cursor forward by `speed`, wrapping at the end of the path.
    pub fn advance(&mut self) {
        let count = self.points.len();
        if count == 0 {
            return;
        }
        let next = (self.cursor + self.speed).rem_euclid(count as f32);
        // rem_euclid can round up to `count` for values just below it.
        self.cursor = if next >= count as f32 { 0.0 } else { next };
    }

    /// The `window_size` point indices starting at the cursor, wrapping
    /// around the path (repeating when the path is shorter than the window).
    /// Empty for a track without points.
    pub fn window_indices(&self, window_size: usize) -> impl ExactSizeIterator<Item = usize> {
        let count = self.points.len();
        let start = self.cursor as usize;
        let len = if count == 0 { 0 } else { window_size };
        (0..len).map(move |k| (start + k) % count)
    }
}
