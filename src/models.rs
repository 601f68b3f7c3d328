//! Core data model: container constants, metadata value types, and tensor
//! element types with their payload sizing rules.

/// Four-byte magic every well-formed document starts with.
pub const GGUF_MAGIC: &[u8; 4] = b"GGUF";

/// Container format version this crate emits.
pub const GGUF_VERSION: u32 = 3;

/// Alignment granularity of the data section and of every tensor payload.
pub const DEFAULT_ALIGNMENT: u64 = 32;

/// Maximum number of dimensions a tensor descriptor carries.
pub const MAX_DIMS: u32 = 4;

// ---- Metadata value types ----

/// Discriminant tag for metadata values.
///
/// Numeric values are the stable on-disk tags and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MetaType {
    Uint8 = 0,
    Int8 = 1,
    Uint16 = 2,
    Int16 = 3,
    Uint32 = 4,
    Int32 = 5,
    Float32 = 6,
    Bool = 7,
    String = 8,
    Array = 9,
    Uint64 = 10,
    Int64 = 11,
    Float64 = 12,
}

impl MetaType {
    /// Every scalar tag, in tag order. Excludes `Array`.
    pub const SCALARS: [MetaType; 12] = [
        MetaType::Uint8,
        MetaType::Int8,
        MetaType::Uint16,
        MetaType::Int16,
        MetaType::Uint32,
        MetaType::Int32,
        MetaType::Float32,
        MetaType::Bool,
        MetaType::String,
        MetaType::Uint64,
        MetaType::Int64,
        MetaType::Float64,
    ];

    /// Converts from the raw u32 tag.
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Uint8),
            1 => Some(Self::Int8),
            2 => Some(Self::Uint16),
            3 => Some(Self::Int16),
            4 => Some(Self::Uint32),
            5 => Some(Self::Int32),
            6 => Some(Self::Float32),
            7 => Some(Self::Bool),
            8 => Some(Self::String),
            9 => Some(Self::Array),
            10 => Some(Self::Uint64),
            11 => Some(Self::Int64),
            12 => Some(Self::Float64),
            _ => None,
        }
    }

    /// The raw on-disk tag.
    pub const fn tag(self) -> u32 {
        self as u32
    }
}

// ---- Metadata values ----

/// A typed metadata value.
///
/// The closed set of kinds a KV entry can carry. Arrays hold their declared
/// element type alongside the elements; arrays of arrays are not
/// representable on disk and are rejected at encode time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Uint8(u8),
    Int8(i8),
    Uint16(u16),
    Int16(i16),
    Uint32(u32),
    Int32(i32),
    Float32(f32),
    Bool(bool),
    String(String),
    Array(MetaType, Vec<Value>),
    Uint64(u64),
    Int64(i64),
    Float64(f64),
}

impl Value {
    /// The tag this value encodes under.
    pub fn meta_type(&self) -> MetaType {
        match self {
            Value::Uint8(_) => MetaType::Uint8,
            Value::Int8(_) => MetaType::Int8,
            Value::Uint16(_) => MetaType::Uint16,
            Value::Int16(_) => MetaType::Int16,
            Value::Uint32(_) => MetaType::Uint32,
            Value::Int32(_) => MetaType::Int32,
            Value::Float32(_) => MetaType::Float32,
            Value::Bool(_) => MetaType::Bool,
            Value::String(_) => MetaType::String,
            Value::Array(..) => MetaType::Array,
            Value::Uint64(_) => MetaType::Uint64,
            Value::Int64(_) => MetaType::Int64,
            Value::Float64(_) => MetaType::Float64,
        }
    }
}

// ---- Tensor element types ----

/// Tensor element type tags.
///
/// A separate, smaller numeric space than [`MetaType`]. Dense kinds store
/// one element per `bytes_per_block`; block-quantized kinds pack a fixed
/// element count per block. The per-type block sizes are an explicit lookup
/// table matching the consumer format, not derived here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TensorType {
    F32 = 0,
    F16 = 1,
    Q4_0 = 2,
    Q4_1 = 3,
    Q5_0 = 6,
    Q5_1 = 7,
    Q8_0 = 8,
    Q8_1 = 9,
    I8 = 16,
    I16 = 17,
    I32 = 18,
}

impl TensorType {
    /// Dense kinds the synthesizer draws payloads from.
    pub const DENSE: [TensorType; 5] = [
        TensorType::F32,
        TensorType::F16,
        TensorType::I8,
        TensorType::I16,
        TensorType::I32,
    ];

    /// Converts from the raw u32 tag.
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::F32),
            1 => Some(Self::F16),
            2 => Some(Self::Q4_0),
            3 => Some(Self::Q4_1),
            6 => Some(Self::Q5_0),
            7 => Some(Self::Q5_1),
            8 => Some(Self::Q8_0),
            9 => Some(Self::Q8_1),
            16 => Some(Self::I8),
            17 => Some(Self::I16),
            18 => Some(Self::I32),
            _ => None,
        }
    }

    /// The raw on-disk tag.
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Returns `(block_size_elements, bytes_per_block)`.
    ///
    /// Dense types have block size 1 and `bytes_per_block` equal to the
    /// element width.
    pub const fn block_info(self) -> (u64, u64) {
        match self {
            TensorType::F32 => (1, 4),
            TensorType::F16 => (1, 2),
            TensorType::Q4_0 => (32, 18),
            TensorType::Q4_1 => (32, 20),
            TensorType::Q5_0 => (32, 22),
            TensorType::Q5_1 => (32, 24),
            TensorType::Q8_0 => (32, 34),
            TensorType::Q8_1 => (32, 40),
            TensorType::I8 => (1, 1),
            TensorType::I16 => (1, 2),
            TensorType::I32 => (1, 4),
        }
    }

    /// Total payload bytes for a tensor of `n_elements` elements.
    ///
    /// Quantized kinds round the element count up to whole blocks.
    pub const fn data_size(self, n_elements: u64) -> u64 {
        let (block_size, bytes_per_block) = self.block_info();
        if block_size == 1 {
            n_elements * bytes_per_block
        } else {
            n_elements.div_ceil(block_size) * bytes_per_block
        }
    }

    /// Lowercase type name, for logs and labels.
    pub const fn name(self) -> &'static str {
        match self {
            TensorType::F32 => "f32",
            TensorType::F16 => "f16",
            TensorType::Q4_0 => "q4_0",
            TensorType::Q4_1 => "q4_1",
            TensorType::Q5_0 => "q5_0",
            TensorType::Q5_1 => "q5_1",
            TensorType::Q8_0 => "q8_0",
            TensorType::Q8_1 => "q8_1",
            TensorType::I8 => "i8",
            TensorType::I16 => "i16",
            TensorType::I32 => "i32",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_type_tags_stable() {
        assert_eq!(MetaType::Uint8.tag(), 0);
        assert_eq!(MetaType::Float32.tag(), 6);
        assert_eq!(MetaType::Array.tag(), 9);
        assert_eq!(MetaType::Float64.tag(), 12);
        for t in MetaType::SCALARS {
            assert_eq!(MetaType::from_u32(t.tag()), Some(t));
        }
        assert_eq!(MetaType::from_u32(13), None);
    }

    #[test]
    fn test_tensor_type_block_info() {
        assert_eq!(TensorType::F32.block_info(), (1, 4));
        assert_eq!(TensorType::F16.block_info(), (1, 2));
        assert_eq!(TensorType::Q4_0.block_info(), (32, 18));
        assert_eq!(TensorType::Q8_0.block_info(), (32, 34));
        assert_eq!(TensorType::from_u32(255), None);
    }

    #[test]
    fn test_tensor_data_size() {
        // F32: 1024 elements x 4 bytes
        assert_eq!(TensorType::F32.data_size(1024), 4096);

        // F16: 1024 elements x 2 bytes
        assert_eq!(TensorType::F16.data_size(1024), 2048);

        // Q4_0: 1024 elements / 32 block_size x 18 bytes_per_block
        assert_eq!(TensorType::Q4_0.data_size(1024), 576);

        // Q8_0: 1024 elements / 32 block_size x 34 bytes_per_block
        assert_eq!(TensorType::Q8_0.data_size(1024), 1088);

        // Partial blocks round up
        assert_eq!(TensorType::Q4_0.data_size(33), 2 * 18);
        assert_eq!(TensorType::Q4_0.data_size(0), 0);
    }

    #[test]
    fn test_value_meta_type() {
        assert_eq!(Value::Bool(true).meta_type(), MetaType::Bool);
        assert_eq!(Value::String("x".into()).meta_type(), MetaType::String);
        assert_eq!(
            Value::Array(MetaType::Int32, vec![]).meta_type(),
            MetaType::Array
        );
    }
}
