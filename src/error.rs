use enough::StopReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnshredError {
    #[error("column {index} is out of range for an image {width} pixels wide")]
    ColumnOutOfRange { index: u32, width: u32 },

    #[error("row {index} is out of range for an image {height} pixels tall")]
    RowOutOfRange { index: u32, height: u32 },

    #[error("strip {index} does not exist; there are {strips} strips")]
    StripOutOfRange { index: usize, strips: usize },

    #[error("image is {width} pixel(s) wide; at least 2 columns are needed to find a strip boundary")]
    InsufficientWidth { width: u32 },

    #[error("strip width {strip_width} is not usable for an image {width} pixels wide")]
    InvalidStripWidth { strip_width: u32, width: u32 },

    #[error(
        "{uncovered} trailing column(s) of a {width} pixel wide image are not covered by {strip_width} pixel strips"
    )]
    PartialCoverage {
        uncovered: u32,
        width: u32,
        strip_width: u32,
    },

    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("scan stopped before completion: {0:?}")]
    Stopped(StopReason),

    #[error("scan worker failed: {0}")]
    Worker(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for UnshredError {
    fn from(reason: StopReason) -> Self {
        UnshredError::Stopped(reason)
    }
}

pub type Result<T> = std::result::Result<T, UnshredError>;
