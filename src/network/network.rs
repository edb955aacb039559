use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::metadata::ModelMetadata;
use crate::network::params::{LayerParams, NetworkParams};
use crate::network::spec::{LayerSpec, NetworkSpec};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not open model file '{path}': {source}")]
    Missing { path: String, source: std::io::Error },
    #[error("could not parse model file '{path}': {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("could not write model file '{path}': {source}")]
    Write { path: String, source: std::io::Error },
    #[error("model files disagree: {0}")]
    Inconsistent(String),
}

/// A dense feed-forward network assembled from a predict net and an init net.
#[derive(Debug, Clone)]
pub struct Network {
    pub name: String,
    pub layers: Vec<Layer>,
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    /// Pairs each layer description with its parameters, checking every shape.
    pub fn from_parts(spec: NetworkSpec, params: NetworkParams) -> Result<Network, ModelError> {
        if spec.layers.is_empty() {
            return Err(ModelError::Inconsistent("predict net has no layers".into()));
        }
        if spec.layers.len() != params.layers.len() {
            return Err(ModelError::Inconsistent(format!(
                "predict net has {} layers but init net has {}",
                spec.layers.len(),
                params.layers.len()
            )));
        }

        let mut layers = Vec::with_capacity(spec.layers.len());
        let mut prev_size: Option<usize> = None;
        for (i, (ls, lp)) in spec.layers.into_iter().zip(params.layers).enumerate() {
            if let Some(prev) = prev_size {
                if ls.input_size != prev {
                    return Err(ModelError::Inconsistent(format!(
                        "layer {} expects {} inputs but the previous layer has {} neurons",
                        i, ls.input_size, prev
                    )));
                }
            }
            layers.push(build_layer(i, ls, lp)?);
            prev_size = layers.last().map(Layer::size);
        }

        Ok(Network { name: spec.name, layers, metadata: spec.metadata })
    }

    /// Loads the predict net (layer graph) and the init net (parameters).
    pub fn load(predict_path: impl AsRef<Path>, init_path: impl AsRef<Path>) -> Result<Network, ModelError> {
        let spec: NetworkSpec = read_json(predict_path.as_ref())?;
        let params: NetworkParams = read_json(init_path.as_ref())?;
        let network = Network::from_parts(spec, params)?;
        info!(
            name = %network.name,
            layers = network.layers.len(),
            inputs = network.input_size(),
            outputs = network.output_size(),
            "loaded model"
        );
        Ok(network)
    }

    /// Writes the network back out as a predict net and an init net.
    pub fn save(&self, predict_path: impl AsRef<Path>, init_path: impl AsRef<Path>) -> Result<(), ModelError> {
        let spec = NetworkSpec {
            name: self.name.clone(),
            layers: self
                .layers
                .iter()
                .map(|l| LayerSpec { size: l.size(), input_size: l.input_size(), activation: l.activator.clone() })
                .collect(),
            metadata: self.metadata.clone(),
        };
        let params = NetworkParams {
            layers: self
                .layers
                .iter()
                .map(|l| LayerParams {
                    weights: l.weights.clone(),
                    biases: Matrix { rows: 1, cols: l.biases.len(), data: vec![l.biases.clone()] },
                })
                .collect(),
        };
        write_json(predict_path.as_ref(), &spec)?;
        write_json(init_path.as_ref(), &params)
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::size)
    }

    /// Output class names from the model metadata, when there is one per
    /// output neuron.
    pub fn class_labels(&self) -> Option<&[String]> {
        let labels = self.metadata.as_ref()?.output_labels.as_deref()?;
        (labels.len() == self.output_size()).then_some(labels)
    }

    /// Forward pass.
    ///
    /// # Panics
    /// If `input.len() != self.input_size()`.
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        current
    }
}

fn build_layer(index: usize, spec: LayerSpec, params: LayerParams) -> Result<Layer, ModelError> {
    let LayerParams { weights, biases } = params;
    if !weights.is_well_formed() || weights.rows != spec.input_size || weights.cols != spec.size {
        return Err(ModelError::Inconsistent(format!(
            "layer {} weights are {}x{}, expected {}x{}",
            index, weights.rows, weights.cols, spec.input_size, spec.size
        )));
    }
    if !biases.is_well_formed() || biases.rows != 1 || biases.cols != spec.size {
        return Err(ModelError::Inconsistent(format!(
            "layer {} biases are {}x{}, expected 1x{}",
            index, biases.rows, biases.cols, spec.size
        )));
    }
    let biases = biases.data.into_iter().next().unwrap_or_default();
    Ok(Layer { weights, biases, activator: spec.activation })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let file = File::open(path).map_err(|source| ModelError::Missing { path: path.display().to_string(), source })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| ModelError::Parse { path: path.display().to_string(), source })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ModelError> {
    let to_err = |source| ModelError::Write { path: path.display().to_string(), source };
    let file = File::create(path).map_err(to_err)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .map_err(|e| to_err(std::io::Error::new(std::io::ErrorKind::Other, e)))
}
