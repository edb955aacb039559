//! Tensor-protos records stored in MNIST sample stores.
//!
//! The message types are generated from `protos/sample_record.proto`. The
//! first tensor carries the image bytes, the second (when present) the label
//! in `int32_data`.

use protobuf::Message;

use crate::store::protos::sample_record::{TensorProto, TensorProtos};
use crate::store::StoreError;

/// Image payload and optional label pulled out of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub pixels: Vec<u8>,
    pub label: Option<i32>,
}

/// Extracts the image payload (first tensor's `byte_data`) and the label.
///
/// The payload length is not checked here; the caller decides what a valid
/// image is.
pub fn decode_record(record: &[u8]) -> Result<StoreRecord, StoreError> {
    let tensors = TensorProtos::parse_from_bytes(record).map_err(StoreError::Decode)?;
    let image = tensors
        .protos
        .first()
        .ok_or_else(|| StoreError::Malformed("record holds no tensors".into()))?;
    if !image.has_byte_data() {
        return Err(StoreError::Malformed("first tensor has no byte payload".into()));
    }
    let label = tensors.protos.get(1).and_then(|t| t.int32_data.first().copied());
    Ok(StoreRecord {
        pixels: image.byte_data().to_vec(),
        label,
    })
}

/// Encodes an image (and optional label) in the same record format.
pub fn encode_record(pixels: &[u8], label: Option<i32>) -> Result<Vec<u8>, StoreError> {
    let mut image = TensorProto::new();
    image.set_byte_data(pixels.to_vec());

    let mut tensors = TensorProtos::new();
    tensors.protos.push(image);
    if let Some(label) = label {
        let mut tensor = TensorProto::new();
        tensor.int32_data.push(label);
        tensors.protos.push(tensor);
    }
    tensors.write_to_bytes().map_err(StoreError::Encode)
}
