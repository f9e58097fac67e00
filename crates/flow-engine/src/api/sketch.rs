use crate::api::config::FlowConfig;
use crate::api::context::FlowContext;
use crate::error::Result;
use crate::paths::FlowPath;

/// The contract every sketch fulfills.
pub trait Sketch {
    /// Return the flow configuration. Called once before paths are loaded.
    fn config(&self) -> FlowConfig {
        FlowConfig::default()
    }

    /// Produce the paths to animate, in track order. An error here aborts
    /// startup before any track exists.
    fn load_paths(&mut self, config: &FlowConfig) -> Result<Vec<Box<dyn FlowPath>>>;

    /// Adjust the freshly built context (speeds, cursors).
    fn init(&mut self, _ctx: &mut FlowContext) {}

    /// Per-frame hook, run before the buffer is rewritten.
    fn update(&mut self, _ctx: &mut FlowContext) {}
}
