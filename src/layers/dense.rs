use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

/// Fully connected layer: `activation(input · weights + biases)`.
///
/// `weights` is `input_size × size`, `biases` has `size` entries.
#[derive(Debug, Clone)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Vec<f32>,
    pub activator: ActivationFunction,
}

impl Layer {
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut z = self.weights.row_mul(input);
        for (v, b) in z.iter_mut().zip(self.biases.iter()) {
            *v += b;
        }
        self.activator.apply(&mut z);
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_bias_then_activates() {
        let layer = Layer {
            weights: Matrix::from_rows(vec![vec![1.0, -1.0], vec![2.0, 1.0]]).unwrap(),
            biases: vec![0.5, -10.0],
            activator: ActivationFunction::ReLU,
        };
        assert_eq!(layer.input_size(), 2);
        assert_eq!(layer.size(), 2);
        assert_eq!(layer.forward(&[1.0, 1.0]), vec![3.5, 0.0]);
    }
}
