// THEORY:
// This file is the main entry point for the `unshredder` library crate.
//
// The library reconstructs an image that was cut into equal-width vertical
// strips and shuffled. The public API is the pair of pipelines
// (`UnshredPipeline` for the synchronous reference run, `ParallelPipeline` for
// the multi-worker run) plus the `Report` they return. The individual stages
// live in `core_modules` and stay public so they can be driven and tested one
// at a time; file I/O and argument parsing belong to the `unshred` binary.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::compositor::compose;
pub use core_modules::frame::{Frame, PixelSource};
pub use core_modules::scan_control::ScanControl;
pub use core_modules::strip::StripSpan;
pub use error::{Result, UnshredError};
pub use parallel_pipeline::ParallelPipeline;
pub use pipeline::{Confidence, CoveragePolicy, PipelineConfig, Report, UnshredPipeline};
