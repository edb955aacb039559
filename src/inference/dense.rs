use crate::inference::classifier::{Classifier, InferenceError};
use crate::inference::tensor::TensorView;
use crate::network::Network;

/// A loaded dense network answers with a single output blob: the activations
/// of its last layer.
impl Classifier for Network {
    fn run(&mut self, input: &TensorView) -> Result<Vec<Vec<f32>>, InferenceError> {
        if input.len() != self.input_size() {
            return Err(InferenceError::Failed(format!(
                "model '{}' takes {} inputs, tensor has {}",
                self.name,
                self.input_size(),
                input.len()
            )));
        }
        Ok(vec![self.forward(input.as_slice())])
    }
}
