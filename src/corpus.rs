//! Fixed corpus seed documents.
//!
//! The minimal file, hand-picked valid edge cases, and the full malformed
//! catalogue, under the stable file names a corpus directory uses. The
//! valid entries all go through [`DocumentBuilder`] and therefore satisfy
//! its layout guarantees.

use crate::builder::{DocumentBuilder, build_minimal_document};
use crate::error::Error;
use crate::malformed::{MalformedKind, build_malformed_document};
use crate::models::{MetaType, TensorType, Value};

/// One tensor whose single dimension is zero: a descriptor is present but
/// the data section holds no bytes for it.
pub fn build_empty_tensor_document() -> Result<Vec<u8>, Error> {
    let mut builder = DocumentBuilder::new(1);
    builder.add_tensor("empty_tensor", &[0], TensorType::F32, Vec::new())?;
    Ok(builder.finish())
}

/// Three metadata entries carrying kilobyte-scale string values.
pub fn build_large_metadata_document() -> Result<Vec<u8>, Error> {
    let mut builder = DocumentBuilder::new(0);
    let large_string = "A".repeat(1000);
    for i in 0..3 {
        builder.add_kv(
            &format!("large_string_{i}"),
            &Value::String(large_string.clone()),
        )?;
    }
    Ok(builder.finish())
}

/// A single tensor using all four dimension slots (2x3x4x5).
pub fn build_max_dimensions_document() -> Result<Vec<u8>, Error> {
    let mut builder = DocumentBuilder::new(1);
    let n_elements: u64 = 2 * 3 * 4 * 5;
    let payload = vec![0u8; TensorType::F32.data_size(n_elements) as usize];
    builder.add_tensor("max_dims", &[2, 3, 4, 5], TensorType::F32, payload)?;
    Ok(builder.finish())
}

/// Integer and float array metadata, no tensors.
pub fn build_array_metadata_document() -> Result<Vec<u8>, Error> {
    let mut builder = DocumentBuilder::new(0);
    let ints: Vec<Value> = (0..5).map(|i| Value::Int32(i * 10)).collect();
    builder.add_kv("int_array", &Value::Array(MetaType::Int32, ints))?;
    let floats: Vec<Value> = (0..3).map(|i| Value::Float32(i as f32 * 3.14)).collect();
    builder.add_kv("float_array", &Value::Array(MetaType::Float32, floats))?;
    Ok(builder.finish())
}

/// Assembles the named seed set: the minimal document, the valid edge
/// cases, and every malformed variant.
///
/// `seed` feeds malformed payload randomness only; the set's composition
/// and file names are fixed.
pub fn seed_corpus(seed: u64) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut corpus = vec![
        ("minimal.gguf".to_string(), build_minimal_document()),
        ("empty_tensor.gguf".to_string(), build_empty_tensor_document()?),
        (
            "large_metadata.gguf".to_string(),
            build_large_metadata_document()?,
        ),
        (
            "max_dimensions.gguf".to_string(),
            build_max_dimensions_document()?,
        ),
        (
            "array_metadata.gguf".to_string(),
            build_array_metadata_document()?,
        ),
    ];
    for kind in MalformedKind::ALL {
        corpus.push((
            format!("malformed_{}.gguf", kind.index()),
            build_malformed_document(kind.index(), seed)?,
        ));
    }
    Ok(corpus)
}
