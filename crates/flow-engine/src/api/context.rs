use crate::api::config::FlowConfig;
use crate::bridge::protocol::BufferLayout;
use crate::core::rng::Rng;
use crate::core::time::FrameClock;
use crate::error::{FlowError, Result};
use crate::paths::FlowPath;
use crate::renderer::particle_buffer::ParticleBuffer;
use crate::renderer::traits::{FrameData, RenderBridge};
use crate::systems::driver::AnimationDriver;
use crate::systems::sampler::PathSampler;

/// Offset applied to the seed for the speed stream, so speeds and jitter
/// do not share a sequence.
const SPEED_SEED_OFFSET: u64 = 7919;

/// Everything one running sketch owns: tracks, particle buffer and clock.
///
/// Built once from a config and a path list, then stepped by the host once
/// per frame.
pub struct FlowContext {
    pub driver: AnimationDriver,
    pub buffer: ParticleBuffer,
    pub clock: FrameClock,
    config: FlowConfig,
    layout: BufferLayout,
}

impl FlowContext {
    /// Sample every path and allocate the shared buffer.
    ///
    /// All paths are checked before any track is created: an empty list or
    /// an unusable length fails the whole build.
    pub fn build<P: FlowPath>(config: FlowConfig, paths: &[P]) -> Result<Self> {
        config.validate()?;
        if paths.is_empty() {
            return Err(FlowError::NoPaths);
        }
        let lengths = paths
            .iter()
            .enumerate()
            .map(|(i, p)| PathSampler::check_length(i, p.length()))
            .collect::<Result<Vec<f32>>>()?;

        let sampler = PathSampler::from_config(&config);
        let mut jitter_rng = Rng::new(config.seed);
        let mut speed_rng = Rng::new(config.seed.wrapping_add(SPEED_SEED_OFFSET));
        let mut driver = AnimationDriver::from_config(&config);

        for (i, (path, length)) in paths.iter().zip(&lengths).enumerate() {
            let points = sampler.sample(path, &mut jitter_rng);
            if points.is_empty() {
                log::warn!(
                    "path {} is shorter than the stride ({:.2} < {}), its track stays dark",
                    i,
                    length,
                    config.stride
                );
            } else {
                log::debug!("path {}: length {:.1}, {} points", i, length, points.len());
            }
            let speed = if config.speed_variance > 0.0 {
                config.base_speed + speed_rng.symmetric(config.speed_variance)
            } else {
                config.base_speed
            };
            driver.register(points, speed.max(0.0));
        }

        let buffer = driver.create_buffer();
        let layout = BufferLayout::new(driver.track_count(), driver.window_size());
        log::info!(
            "flow field ready: {} tracks, {} particles",
            driver.track_count(),
            buffer.capacity()
        );

        Ok(Self {
            driver,
            buffer,
            clock: FrameClock::new(config.time_step),
            config,
            layout,
        })
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    /// Advance one frame: rewrite the buffer, then tick the clock.
    pub fn step(&mut self) -> Result<()> {
        self.driver.step(&mut self.buffer)?;
        self.clock.tick();
        Ok(())
    }

    /// Read-only view of the current frame.
    pub fn frame(&self) -> FrameData<'_> {
        FrameData::from_buffer(&self.buffer, self.clock.time())
    }

    /// Serialize the current frame in wire format into `out`.
    pub fn write_wire(&self, out: &mut [f32]) -> Result<()> {
        self.layout.write(&self.frame(), out)
    }

    /// Hand the current frame to `bridge`: upload if dirty, then draw.
    pub fn present<R: RenderBridge + ?Sized>(&mut self, bridge: &mut R) {
        let dirty = self.buffer.take_dirty();
        let frame = FrameData {
            dirty,
            ..FrameData::from_buffer(&self.buffer, self.clock.time())
        };
        if dirty {
            bridge.upload(&frame);
        }
        bridge.draw(&frame);
    }
}
