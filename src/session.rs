use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::canvas::StrokeCanvas;
use crate::config::SketchConfig;
use crate::inference::{classify, Classifier, InferenceError, Scores};
use crate::network::Network;
use crate::resample::resample;
use crate::sample::{Sample, SampleError, SamplePreview};
use crate::store::{lookup_sample, SampleStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no sample to work with; draw and convert, import, or load one first")]
    NoSample,
    #[error("no sample store is open")]
    NoStore,
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Everything one user session works with.
///
/// - the classifier is installed once and never replaced
/// - the store handle is replaced wholesale when another store is opened
/// - the active sample is replaced wholesale by convert, import and load,
///   and only after the new one has been validated
pub struct Session {
    canvas: StrokeCanvas,
    preview: SamplePreview,
    classifier: Option<Box<dyn Classifier>>,
    model_error: Option<String>,
    class_labels: Option<Vec<String>>,
    store: Option<Box<dyn SampleStore>>,
    sample: Option<Sample>,
    label: Option<i32>,
    scores: Option<Scores>,
}

impl Session {
    pub fn new(canvas_size: u32, preview_scale: u32) -> Session {
        Session {
            canvas: StrokeCanvas::new(canvas_size, canvas_size),
            preview: SamplePreview::new(preview_scale),
            classifier: None,
            model_error: None,
            class_labels: None,
            store: None,
            sample: None,
            label: None,
            scores: None,
        }
    }

    /// Builds a session and loads the model named by `config`.
    ///
    /// A model that fails to load is remembered as an error message and
    /// inference stays disabled for the rest of the session.
    pub fn from_config(config: &SketchConfig) -> Session {
        let mut session = Session::new(config.canvas_size, config.preview_scale);
        match Network::load(config.predict_net_path(), config.init_net_path()) {
            Ok(network) => session.install_network(network),
            Err(e) => {
                warn!("model unavailable: {}", e);
                session.model_error = Some(e.to_string());
            }
        }
        session
    }

    /// Installs the classifier. Only the first call has an effect.
    pub fn install_classifier(&mut self, classifier: Box<dyn Classifier>) {
        if self.classifier.is_some() {
            warn!("classifier already installed; ignoring replacement");
            return;
        }
        self.classifier = Some(classifier);
        self.model_error = None;
    }

    /// Installs a loaded network, keeping its class names for display.
    pub fn install_network(&mut self, network: Network) {
        if self.classifier.is_none() {
            self.class_labels = network.class_labels().map(<[String]>::to_vec);
        }
        self.install_classifier(Box::new(network));
    }

    pub fn canvas(&self) -> &StrokeCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut StrokeCanvas {
        &mut self.canvas
    }

    pub fn preview(&self) -> &SamplePreview {
        &self.preview
    }

    pub fn sample(&self) -> Option<&Sample> {
        self.sample.as_ref()
    }

    /// Ground-truth label of a sample loaded from a store.
    pub fn label(&self) -> Option<i32> {
        self.label
    }

    pub fn scores(&self) -> Option<&Scores> {
        self.scores.as_ref()
    }

    /// Display names for the output classes, if the model supplies them.
    pub fn class_labels(&self) -> Option<&[String]> {
        self.class_labels.as_deref()
    }

    pub fn model_error(&self) -> Option<&str> {
        self.model_error.as_deref()
    }

    pub fn classifier_ready(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn can_test(&self) -> bool {
        self.sample.is_some() && self.classifier.is_some()
    }

    pub fn can_load(&self) -> bool {
        self.store.is_some()
    }

    fn adopt(&mut self, sample: Sample, label: Option<i32>) -> &Sample {
        self.preview.show(&sample);
        self.label = label;
        self.scores = None;
        self.sample.insert(sample)
    }

    /// Resamples the canvas into the active sample.
    pub fn convert(&mut self) -> &Sample {
        let sample = resample(self.canvas.bitmap());
        self.adopt(sample, None)
    }

    /// Wipes the canvas and the preview and forgets the active sample.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.preview.clear();
        self.sample = None;
        self.label = None;
        self.scores = None;
    }

    /// Replaces the open store, releasing the previous one.
    pub fn open_store(&mut self, store: Box<dyn SampleStore>) {
        if self.store.replace(store).is_some() {
            info!("replaced previously open store");
        }
    }

    pub fn load_from_store(&mut self, index: u32) -> Result<(), SessionError> {
        let store = self.store.as_deref().ok_or(SessionError::NoStore)?;
        let found = lookup_sample(store, index)?;
        info!(index, label = ?found.label, "loaded store sample");
        self.adopt(found.sample, found.label);
        Ok(())
    }

    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let sample = Sample::from_bytes(bytes)?;
        self.adopt(sample, None);
        Ok(())
    }

    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let sample = Sample::import(path)?;
        self.adopt(sample, None);
        Ok(())
    }

    pub fn export_file(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let sample = self.sample.as_ref().ok_or(SessionError::NoSample)?;
        sample.export(path)?;
        Ok(())
    }

    /// Classifies the active sample and keeps the scores for display.
    pub fn test(&mut self) -> Result<Scores, SessionError> {
        let sample = self.sample.as_ref().ok_or(SessionError::NoSample)?;
        let classifier = self.classifier.as_deref_mut().ok_or(InferenceError::NotReady)?;
        let scores = classify(classifier, sample)?;
        self.scores = Some(scores);
        Ok(scores)
    }
}
