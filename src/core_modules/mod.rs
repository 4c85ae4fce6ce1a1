pub mod adjacency_ranker;
pub mod chain_resolver;
pub mod column_scanner;
pub mod compositor;
pub mod frame;
pub mod pixel;
pub mod scan_control;
pub mod sequencer;
pub mod smart_pixel;
pub mod strip;
pub mod utils;
pub mod width_estimator;
