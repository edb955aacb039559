pub mod metadata;
pub mod network;
pub mod params;
pub mod spec;

pub use network::{ModelError, Network};
pub use params::{LayerParams, NetworkParams};
pub use spec::{LayerSpec, NetworkSpec};
