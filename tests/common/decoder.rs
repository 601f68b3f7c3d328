//! Reference decoder used to validate built documents.
//!
//! Implements just enough of the container format to read back what the
//! library emits: header, typed KV section, tensor descriptor table, and
//! the data-section geometry. Panics on anything it cannot decode; tests
//! only feed it documents the builder produced.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use gguf_forge::{GGUF_MAGIC, MetaType, Value};

#[derive(Debug)]
pub struct DecodedTensor {
    pub name: String,
    pub n_dims: u32,
    pub dims: [i64; 4],
    pub type_tag: u32,
    pub offset: u64,
}

impl DecodedTensor {
    /// Element count over the declared dimensions only.
    pub fn n_elements(&self) -> u64 {
        self.dims[..self.n_dims as usize]
            .iter()
            .map(|&d| d as u64)
            .product()
    }
}

#[derive(Debug)]
pub struct DecodedDocument {
    pub version: u32,
    pub tensor_count: i64,
    pub kv_count: i64,
    pub kvs: Vec<(String, Value)>,
    pub tensors: Vec<DecodedTensor>,
    /// Byte position where the aligned data section begins. Equals the end
    /// of the descriptor table when the document has no tensors.
    pub data_section_start: u64,
    pub data_section_len: u64,
}

impl DecodedDocument {
    pub fn kv(&self, key: &str) -> Option<&Value> {
        self.kvs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

pub fn read_string(cur: &mut Cursor<&[u8]>) -> String {
    let len = cur.read_u64::<LittleEndian>().unwrap() as usize;
    let mut bytes = vec![0u8; len];
    cur.read_exact(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

pub fn read_value(cur: &mut Cursor<&[u8]>, meta_type: MetaType) -> Value {
    match meta_type {
        MetaType::Uint8 => Value::Uint8(cur.read_u8().unwrap()),
        MetaType::Int8 => Value::Int8(cur.read_i8().unwrap()),
        MetaType::Uint16 => Value::Uint16(cur.read_u16::<LittleEndian>().unwrap()),
        MetaType::Int16 => Value::Int16(cur.read_i16::<LittleEndian>().unwrap()),
        MetaType::Uint32 => Value::Uint32(cur.read_u32::<LittleEndian>().unwrap()),
        MetaType::Int32 => Value::Int32(cur.read_i32::<LittleEndian>().unwrap()),
        MetaType::Float32 => Value::Float32(cur.read_f32::<LittleEndian>().unwrap()),
        MetaType::Bool => {
            let b = cur.read_u8().unwrap();
            assert!(b <= 1, "bool byte out of range: {b}");
            Value::Bool(b == 1)
        }
        MetaType::String => Value::String(read_string(cur)),
        MetaType::Array => {
            let elem_tag = cur.read_u32::<LittleEndian>().unwrap();
            let elem_type = MetaType::from_u32(elem_tag).expect("unknown array element tag");
            assert_ne!(elem_type, MetaType::Array, "nested array on the wire");
            let count = cur.read_u64::<LittleEndian>().unwrap();
            let items = (0..count).map(|_| read_value(cur, elem_type)).collect();
            Value::Array(elem_type, items)
        }
        MetaType::Uint64 => Value::Uint64(cur.read_u64::<LittleEndian>().unwrap()),
        MetaType::Int64 => Value::Int64(cur.read_i64::<LittleEndian>().unwrap()),
        MetaType::Float64 => Value::Float64(cur.read_f64::<LittleEndian>().unwrap()),
    }
}

/// Decodes a single value occupying the whole of `data`.
pub fn decode_value(data: &[u8], meta_type: MetaType) -> Value {
    let mut cur = Cursor::new(data);
    let value = read_value(&mut cur, meta_type);
    assert_eq!(cur.position() as usize, data.len(), "trailing bytes");
    value
}

/// Decodes a complete document.
pub fn decode_document(data: &[u8]) -> DecodedDocument {
    let mut cur = Cursor::new(data);

    let mut magic = [0u8; 4];
    cur.read_exact(&mut magic).unwrap();
    assert_eq!(&magic, GGUF_MAGIC, "bad magic");
    let version = cur.read_u32::<LittleEndian>().unwrap();
    let tensor_count = cur.read_i64::<LittleEndian>().unwrap();
    let kv_count = cur.read_i64::<LittleEndian>().unwrap();
    assert!(tensor_count >= 0, "negative tensor count");
    assert!(kv_count >= 0, "negative KV count");

    let kvs = (0..kv_count)
        .map(|_| {
            let key = read_string(&mut cur);
            let tag = cur.read_u32::<LittleEndian>().unwrap();
            let meta_type = MetaType::from_u32(tag).expect("unknown value tag");
            let value = read_value(&mut cur, meta_type);
            (key, value)
        })
        .collect();

    let tensors: Vec<DecodedTensor> = (0..tensor_count)
        .map(|_| {
            let name = read_string(&mut cur);
            let n_dims = cur.read_u32::<LittleEndian>().unwrap();
            let mut dims = [0i64; 4];
            for dim in &mut dims {
                *dim = cur.read_i64::<LittleEndian>().unwrap();
            }
            let type_tag = cur.read_u32::<LittleEndian>().unwrap();
            let offset = cur.read_u64::<LittleEndian>().unwrap();
            DecodedTensor {
                name,
                n_dims,
                dims,
                type_tag,
                offset,
            }
        })
        .collect();

    let descriptor_end = cur.position();
    let data_section_start = if tensors.is_empty() {
        descriptor_end
    } else {
        descriptor_end.next_multiple_of(32)
    };
    assert!(
        data_section_start <= data.len() as u64,
        "data section starts past the end of the buffer"
    );

    DecodedDocument {
        version,
        tensor_count,
        kv_count,
        kvs,
        tensors,
        data_section_start,
        data_section_len: data.len() as u64 - data_section_start,
    }
}
