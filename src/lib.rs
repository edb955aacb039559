pub mod activation;
pub mod canvas;
pub mod config;
pub mod inference;
pub mod layers;
pub mod logging;
pub mod math;
pub mod network;
pub mod resample;
pub mod sample;
pub mod session;
pub mod store;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use canvas::{Point, StrokeCanvas, StrokeState};
pub use config::{ConfigError, SketchConfig};
pub use inference::{classify, Classifier, InferenceError, Scores, TensorView};
pub use layers::dense::Layer;
pub use math::matrix::Matrix;
pub use network::{ModelError, Network, NetworkParams, NetworkSpec};
pub use resample::resample;
pub use sample::{Sample, SampleError, SamplePreview, SAMPLE_LEN};
pub use session::{Session, SessionError};
pub use store::{DirStore, MemoryStore, SampleStore, StoreError};
