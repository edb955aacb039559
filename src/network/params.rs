use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// Trained parameters for one dense layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerParams {
    /// `input_size × size`
    pub weights: Matrix,
    /// `1 × size`
    pub biases: Matrix,
}

/// The init net: every layer's parameter blobs, in predict-net order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkParams {
    pub layers: Vec<LayerParams>,
}
