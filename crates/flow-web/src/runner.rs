use flow_engine::{FlowContext, Result, Sketch};

/// Generic sketch runner that wires up the frame loop.
///
/// Each concrete sketch creates a `thread_local!` SketchRunner and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly. The browser's animation callback calls
/// [`SketchRunner::tick`] once per frame.
pub struct SketchRunner<S: Sketch> {
    sketch: S,
    ctx: Option<FlowContext>,
    /// Flat header + positions + opacities copy, laid out per `BufferLayout`.
    wire: Vec<f32>,
}

impl<S: Sketch> SketchRunner<S> {
    pub fn new(sketch: S) -> Self {
        Self {
            sketch,
            ctx: None,
            wire: Vec::new(),
        }
    }

    /// Load paths and build the flow field. Call once after construction.
    pub fn init(&mut self) -> Result<()> {
        let config = self.sketch.config();
        let paths = self.sketch.load_paths(&config)?;
        let mut ctx = FlowContext::build(config, &paths)?;
        self.sketch.init(&mut ctx);
        self.wire = vec![0.0; ctx.layout().total_floats];
        ctx.write_wire(&mut self.wire)?;
        self.ctx = Some(ctx);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.ctx.is_some()
    }

    /// Run one frame and refresh the wire buffer. `dt` is accepted for the
    /// host's convenience; the flow advances by a fixed amount per frame.
    pub fn tick(&mut self, _dt: f32) -> Result<()> {
        let Some(ctx) = self.ctx.as_mut() else {
            return Ok(());
        };
        self.sketch.update(ctx);
        ctx.step()?;
        ctx.write_wire(&mut self.wire)
    }

    // ---- Pointer accessors for wasm memory reads ----

    pub fn positions_ptr(&self) -> *const f32 {
        self.ctx.as_ref().map_or(std::ptr::null(), |c| c.buffer.positions_ptr())
    }

    pub fn opacities_ptr(&self) -> *const f32 {
        self.ctx.as_ref().map_or(std::ptr::null(), |c| c.buffer.opacities_ptr())
    }

    pub fn particle_capacity(&self) -> u32 {
        self.ctx.as_ref().map_or(0, |c| c.buffer.capacity() as u32)
    }

    pub fn window_size(&self) -> u32 {
        self.ctx.as_ref().map_or(0, |c| c.buffer.window_size() as u32)
    }

    pub fn track_count(&self) -> u32 {
        self.ctx.as_ref().map_or(0, |c| c.buffer.track_count() as u32)
    }

    pub fn time(&self) -> f32 {
        self.ctx.as_ref().map_or(0.0, |c| c.clock.time())
    }

    pub fn generation(&self) -> f64 {
        self.ctx.as_ref().map_or(0.0, |c| c.buffer.generation() as f64)
    }

    /// Wire buffer for a single bulk read; null before init.
    pub fn buffer_ptr(&self) -> *const f32 {
        if self.wire.is_empty() {
            std::ptr::null()
        } else {
            self.wire.as_ptr()
        }
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.ctx.as_ref().map_or(0, |c| c.layout().total_floats as u32)
    }

    /// Read and clear the dirty flag; the renderer re-uploads when true.
    pub fn take_dirty(&mut self) -> bool {
        self.ctx.as_mut().is_some_and(|c| c.buffer.take_dirty())
    }
}
