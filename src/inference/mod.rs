pub mod classifier;
pub mod dense;
pub mod tensor;

pub use classifier::{classify, Classifier, InferenceError, Scores, NUM_CLASSES};
pub use tensor::{TensorView, INPUT_SHAPE};
