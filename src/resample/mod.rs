pub mod resampler;

pub use resampler::{contrast_curve, resample};
