use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::network::metadata::ModelMetadata;

/// Describes one layer of the predict net.
///
/// - `size`:       number of neurons in this layer
/// - `input_size`: output size of the previous layer, or the raw input
///               dimension for the first layer
/// - `activation`: applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// The predict net: the layer graph of a model, without its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    /// Ordered input → output.
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}
