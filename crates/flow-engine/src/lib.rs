pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod paths;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::FlowConfig;
pub use api::context::FlowContext;
pub use api::sketch::Sketch;
pub use error::{FlowError, Result};
pub use components::track::{LineTrack, TrackId};
pub use core::rng::Rng;
pub use core::time::FrameClock;
pub use renderer::particle_buffer::ParticleBuffer;
pub use renderer::traits::{FrameData, RenderBridge};
pub use systems::sampler::{PathSampler, SampledPoint};
pub use systems::driver::AnimationDriver;
pub use bridge::protocol::BufferLayout;
pub use paths::{FlowPath, Polyline, PathDocument, PathElement};

#[cfg(feature = "vectors")]
pub use paths::VectorPath;
