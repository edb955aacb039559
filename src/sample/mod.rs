pub mod preview;
pub mod sample;

pub use preview::{SamplePreview, DEFAULT_PREVIEW_SCALE};
pub use sample::{Sample, SampleError, SAMPLE_HEIGHT, SAMPLE_LEN, SAMPLE_WIDTH};
