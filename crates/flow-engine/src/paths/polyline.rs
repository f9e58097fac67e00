use glam::Vec2;

use super::FlowPath;

/// A piecewise-linear path, open or closed.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Vec2>,
    /// Cumulative arc length at each vertex (same length as the vertex
    /// list, plus one entry for the closing segment when closed).
    cumulative: Vec<f32>,
}

impl Polyline {
    /// Open polyline through `points` in order.
    pub fn new(points: Vec<Vec2>) -> Self {
        Self::build(points, false)
    }

    /// Closed polyline; the last point connects back to the first.
    pub fn closed(points: Vec<Vec2>) -> Self {
        Self::build(points, true)
    }

    fn build(points: Vec<Vec2>, closed: bool) -> Self {
        let mut cumulative = Vec::with_capacity(points.len() + 1);
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            cumulative.push(total);
        }
        if closed && points.len() > 1 {
            total += points[0].distance(points[points.len() - 1]);
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    /// Straight segment from `a` to `b`.
    pub fn segment(a: Vec2, b: Vec2) -> Self {
        Self::new(vec![a, b])
    }

    /// Vertex `i`, where index `points.len()` is the closing vertex.
    fn vertex(&self, i: usize) -> Vec2 {
        self.points[i % self.points.len()]
    }
}

impl FlowPath for Polyline {
    fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn point_at(&self, offset: f32) -> Vec2 {
        match self.points.len() {
            0 => return Vec2::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let offset = offset.clamp(0.0, self.length());
        // First vertex whose cumulative length exceeds the offset ends the segment.
        let end = self
            .cumulative
            .partition_point(|&d| d <= offset)
            .clamp(1, self.cumulative.len() - 1);
        let start = end - 1;

        let seg_len = self.cumulative[end] - self.cumulative[start];
        if seg_len <= f32::EPSILON {
            return self.vertex(start);
        }
        let t = (offset - self.cumulative[start]) / seg_len;
        self.vertex(start).lerp(self.vertex(end), t)
    }
}
