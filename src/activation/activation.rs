use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
    /// Vector-valued; normalizes the whole layer output at once.
    Softmax,
    Tanh,
    LeakyReLU { alpha: f32 },
    Elu { alpha: f32 },
    Gelu,
    Swish,
}

impl ActivationFunction {
    fn scalar(&self, x: f32) -> f32 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Identity | ActivationFunction::Softmax => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => if x > 0.0 { x } else { alpha * (x.exp() - 1.0) },
            ActivationFunction::Gelu => {
                let c = (2.0 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x / (1.0 + (-x).exp()),
        }
    }

    /// Applies the activation in place to a layer's pre-activation values.
    pub fn apply(&self, values: &mut [f32]) {
        if *self == ActivationFunction::Softmax {
            softmax(values);
            return;
        }
        for v in values.iter_mut() {
            *v = self.scalar(*v);
        }
    }
}

/// Numerically stable softmax (shifts by the max before exponentiating).
fn softmax(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        for v in values.iter_mut() {
            *v /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one_and_keeps_order() {
        let mut v = vec![1.0, 3.0, 2.0, 6.0];
        ActivationFunction::Softmax.apply(&mut v);
        assert!((v.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!(v[3] > v[1] && v[1] > v[2] && v[2] > v[0]);
    }

    #[test]
    fn softmax_survives_large_inputs() {
        let mut v = vec![1000.0, 1001.0];
        ActivationFunction::Softmax.apply(&mut v);
        assert!(v.iter().all(|x| x.is_finite()));
        assert!((v.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!(v[1] > v[0]);
    }

    #[test]
    fn elementwise_functions() {
        let mut v = vec![-2.0, 0.0, 2.0];
        ActivationFunction::ReLU.apply(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 2.0]);

        let mut v = vec![-2.0, 2.0];
        ActivationFunction::LeakyReLU { alpha: 0.1 }.apply(&mut v);
        assert_eq!(v, vec![-0.2, 2.0]);

        let mut v = vec![0.0];
        ActivationFunction::Sigmoid.apply(&mut v);
        assert_eq!(v, vec![0.5]);
    }

    #[test]
    fn deserializes_from_model_json() {
        let a: ActivationFunction = serde_json::from_str("\"ReLU\"").unwrap();
        assert_eq!(a, ActivationFunction::ReLU);
        let a: ActivationFunction = serde_json::from_str(r#"{"LeakyReLU":{"alpha":0.01}}"#).unwrap();
        assert_eq!(a, ActivationFunction::LeakyReLU { alpha: 0.01 });
    }
}
