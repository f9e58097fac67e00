use wasm_bindgen::prelude::*;

mod sketch;
use sketch::SvgFlow;

flow_web::export_sketch!(SvgFlow, "svg-flow");
