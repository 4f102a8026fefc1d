//! Pixel-grid filters and analyses: resampling, blur/sepia, region fill,
//! contour extraction and line tracing, plus the resample-and-filter pipeline.
pub mod contour;
pub mod filters;
pub mod flood_fill;
pub mod lines;
pub mod pipeline;
pub mod resample;
