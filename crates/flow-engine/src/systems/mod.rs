pub mod sampler;
pub mod driver;
