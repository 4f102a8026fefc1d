//! Core processing building blocks: the pixel grid model, pipeline
//! parameters, and the filters and analyses that run over grids. These are
//! the primitives consumed by the high-level `api` module.
pub mod grid;
pub mod params;
pub mod processing;
