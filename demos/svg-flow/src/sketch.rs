use flow_engine::{FlowConfig, FlowContext, FlowPath, PathDocument, Result, Sketch};

/// Embedded drawing: a 2048 × 1024 document whose `cls-1` paths carry the flow.
const DRAWING: &str = include_str!("../assets/drawing.json");

pub struct SvgFlow {
    document: &'static str,
}

impl SvgFlow {
    pub fn new() -> Self {
        Self { document: DRAWING }
    }
}

impl Default for SvgFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch for SvgFlow {
    fn config(&self) -> FlowConfig {
        FlowConfig {
            speed_variance: 0.5,
            ..FlowConfig::default()
        }
    }

    fn load_paths(&mut self, config: &FlowConfig) -> Result<Vec<Box<dyn FlowPath>>> {
        let document = PathDocument::from_json(self.document)?;
        if document.center_offset() != config.center_offset {
            log::warn!(
                "drawing is {}x{} but the flow is centered on {:?}",
                document.width,
                document.height,
                config.center_offset
            );
        }
        document.build_paths(config.path_class.as_deref())
    }

    fn init(&mut self, ctx: &mut FlowContext) {
        for track in ctx.driver.tracks() {
            log::info!(
                "track {}: {} points at speed {:.2}",
                track.id().0,
                track.point_count(),
                track.speed()
            );
        }
    }
}
