//! Document assembly: header, KV section, tensor descriptors, aligned data.
//!
//! The builder makes one forward pass over a growable buffer plus an
//! explicit patch pass. Counts and offsets that are unknown while earlier
//! sections are written (the KV count, each tensor's data offset) are
//! reserved as fixed-width placeholders whose byte positions are recorded,
//! then overwritten in place once the value is known.

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::codec::{pad_to_alignment, put_str, put_tensor_descriptor, put_value};
use crate::error::Error;
use crate::models::{DEFAULT_ALIGNMENT, GGUF_MAGIC, GGUF_VERSION, MAX_DIMS, TensorType, Value};

/// Size in bytes of the fixed header: magic, version, two counts.
pub const HEADER_LEN: usize = 24;

/// A tensor whose descriptor has been written but whose payload is still
/// waiting for the data pass.
struct PendingTensor {
    /// Byte position of the reserved 8-byte offset slot.
    offset_pos: usize,
    data: Vec<u8>,
}

/// Assembles one complete, internally consistent container document.
///
/// KV entries and tensor descriptors are appended in declaration order; the
/// data section is laid out by [`finish`](DocumentBuilder::finish), which
/// patches each descriptor's reserved offset slot as payload placement
/// becomes known. The returned buffer is final; nothing mutates it
/// afterwards.
///
/// The caller must add exactly `tensor_count` tensors before `finish`.
///
/// # Examples
///
/// ```
/// use gguf_forge::{DocumentBuilder, TensorType, Value};
///
/// let mut builder = DocumentBuilder::new(1);
/// builder.add_kv("general.architecture", &Value::String("llama".into()))?;
/// builder.add_tensor("output.weight", &[4, 2], TensorType::F32, vec![0u8; 32])?;
/// let doc = builder.finish();
/// assert!(doc.starts_with(b"GGUF"));
/// # Ok::<(), gguf_forge::Error>(())
/// ```
pub struct DocumentBuilder {
    buf: Vec<u8>,
    kv_count_pos: usize,
    kv_count: u64,
    tensor_count: u64,
    pending: Vec<PendingTensor>,
}

impl DocumentBuilder {
    /// Starts a document: magic, version, tensor count, reserved KV count.
    ///
    /// The tensor count is known up front and written immediately; the KV
    /// count is reserved and patched in `finish`, since optional fields can
    /// make the final entry count vary.
    pub fn new(tensor_count: u64) -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(GGUF_MAGIC);
        buf.extend_from_slice(&GGUF_VERSION.to_le_bytes());
        buf.extend_from_slice(&(tensor_count as i64).to_le_bytes());
        let kv_count_pos = buf.len();
        buf.extend_from_slice(&0i64.to_le_bytes());
        Self {
            buf,
            kv_count_pos,
            kv_count: 0,
            tensor_count,
            pending: Vec::new(),
        }
    }

    /// Bytes written so far (descriptor sections only; queued payloads are
    /// laid out by `finish`).
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Always false: the header is written on construction.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends one metadata entry: key string, value tag, encoded value.
    pub fn add_kv(&mut self, key: &str, value: &Value) -> Result<(), Error> {
        put_str(&mut self.buf, key);
        self.buf
            .extend_from_slice(&(value.meta_type().tag() as i32).to_le_bytes());
        put_value(&mut self.buf, value)?;
        self.kv_count += 1;
        Ok(())
    }

    /// Appends one tensor descriptor and queues its payload for the data
    /// pass.
    ///
    /// `shape` holds 1 to 4 dimension sizes; slots past `shape.len()` are
    /// written as 1. The payload length must match the element type's
    /// sizing rule for the shape's element count. A zero dimension is
    /// allowed and yields an empty payload.
    pub fn add_tensor(
        &mut self,
        name: &str,
        shape: &[u64],
        ttype: TensorType,
        data: Vec<u8>,
    ) -> Result<(), Error> {
        // Validate everything before writing so a rejected tensor leaves
        // the buffer untouched.
        let n_dims = shape.len() as u32;
        if n_dims == 0 || n_dims > MAX_DIMS {
            return Err(Error::InvalidDimensions { n_dims });
        }
        let n_elements: u64 = shape.iter().product();
        let expected = ttype.data_size(n_elements);
        if data.len() as u64 != expected {
            return Err(Error::PayloadSizeMismatch {
                expected,
                found: data.len() as u64,
            });
        }

        let offset_pos = put_tensor_descriptor(&mut self.buf, name, shape, ttype)?;
        self.pending.push(PendingTensor { offset_pos, data });
        Ok(())
    }

    /// Finalizes the document and returns the buffer.
    ///
    /// Patches the reserved KV count, pads to the 32-byte data-section
    /// boundary, then lays out each payload in declaration order, patching
    /// its descriptor's offset slot (relative to the data-section start)
    /// and padding so the next payload starts aligned. A document with no
    /// tensors has no data section and no trailing padding.
    pub fn finish(mut self) -> Vec<u8> {
        debug_assert_eq!(
            self.pending.len() as u64,
            self.tensor_count,
            "declared tensor count does not match tensors added"
        );
        LittleEndian::write_i64(
            &mut self.buf[self.kv_count_pos..self.kv_count_pos + 8],
            self.kv_count as i64,
        );

        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return self.buf;
        }

        pad_to_alignment(&mut self.buf, DEFAULT_ALIGNMENT);
        let data_section_start = self.buf.len();
        for tensor in pending {
            let offset = (self.buf.len() - data_section_start) as u64;
            LittleEndian::write_u64(
                &mut self.buf[tensor.offset_pos..tensor.offset_pos + 8],
                offset,
            );
            self.buf.extend_from_slice(&tensor.data);
            pad_to_alignment(&mut self.buf, DEFAULT_ALIGNMENT);
        }
        debug!(
            bytes = self.buf.len(),
            tensors = self.tensor_count,
            kvs = self.kv_count,
            "document assembled"
        );
        self.buf
    }
}

/// Builds the 24-byte empty document: zero tensors, zero metadata entries.
pub fn build_minimal_document() -> Vec<u8> {
    DocumentBuilder::new(0).finish()
}
