pub mod runner;

pub use runner::SketchRunner;

/// Generate all `#[wasm_bindgen]` exports for a sketch.
///
/// Generates:
/// - `thread_local!` storage for the SketchRunner
/// - `with_runner()` helper function
/// - wasm-bindgen exports (sketch_init, sketch_tick, buffer accessors)
///
/// The JavaScript side calls `sketch_init()` once, then `sketch_tick()`
/// followed by a draw from its `requestAnimationFrame` callback. It reads
/// positions and opacities straight out of wasm memory, either per array or
/// as one `BufferLayout` block via `get_buffer_ptr()`.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod sketch;
/// use sketch::MySketch;
///
/// flow_web::export_sketch!(MySketch, "my-sketch");
/// ```
///
/// # Arguments
///
/// - `$sketch_type`: The sketch struct type that implements `flow_engine::Sketch`
/// - `$sketch_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_sketch {
    ($sketch_type:ty, $sketch_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SketchRunner<$sketch_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SketchRunner<$sketch_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Sketch not initialized. Call sketch_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn sketch_init() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let sketch = <$sketch_type>::new();
            let runner = $crate::SketchRunner::new(sketch);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init()).map_err(|e| {
                log::error!("{}: {}", $sketch_name, e);
                JsValue::from_str(&e.to_string())
            })?;
            log::info!("{}: initialized", $sketch_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn sketch_tick(dt: f32) -> Result<(), JsValue> {
            with_runner(|r| r.tick(dt)).map_err(|e| {
                log::error!("{}: frame aborted: {}", $sketch_name, e);
                JsValue::from_str(&e.to_string())
            })
        }

        // ---- Buffer accessors ----

        #[wasm_bindgen]
        pub fn get_positions_ptr() -> *const f32 {
            with_runner(|r| r.positions_ptr())
        }

        #[wasm_bindgen]
        pub fn get_opacities_ptr() -> *const f32 {
            with_runner(|r| r.opacities_ptr())
        }

        #[wasm_bindgen]
        pub fn get_particle_capacity() -> u32 {
            with_runner(|r| r.particle_capacity())
        }

        #[wasm_bindgen]
        pub fn get_window_size() -> u32 {
            with_runner(|r| r.window_size())
        }

        #[wasm_bindgen]
        pub fn get_track_count() -> u32 {
            with_runner(|r| r.track_count())
        }

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        // ---- Frame state ----

        #[wasm_bindgen]
        pub fn get_time() -> f32 {
            with_runner(|r| r.time())
        }

        #[wasm_bindgen]
        pub fn get_generation() -> f64 {
            with_runner(|r| r.generation())
        }

        #[wasm_bindgen]
        pub fn take_dirty() -> bool {
            with_runner(|r| r.take_dirty())
        }
    };
}
