//! Plausible-but-random document synthesis.
//!
//! Produces valid, internally consistent model containers whose metadata
//! and tensor tables look like real model files without being
//! hand-authored. One seeded generator drives every decision in a fixed
//! order: the seed fully determines the output bytes.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::builder::{DocumentBuilder, HEADER_LEN};
use crate::error::Error;
use crate::models::{DEFAULT_ALIGNMENT, MetaType, TensorType, Value};

// ---- Fixed catalogues ----

/// Architecture names drawn for `general.architecture`.
const ARCHITECTURES: &[&str] = &[
    "llama", "mpt", "gptneox", "gptj", "gpt2", "bloom", "falcon", "mamba", "rwkv",
];

/// `general.file_type` values seen in real model files.
const FILE_TYPES: &[u32] = &[0, 1, 2, 3, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18];

const CONTEXT_LENGTHS: &[u64] = &[2048, 4096, 8192, 16384, 32768];
const EMBEDDING_LENGTHS: &[u64] = &[2048, 4096, 5120, 6656];
const BLOCK_COUNTS: &[u64] = &[24, 32, 40, 48, 60, 80];
const HEAD_COUNTS: &[u64] = &[32, 40, 52, 64];

const TOKENIZER_MODELS: &[&str] = &["llama", "replit", "gpt2", "rwkv"];

/// Prefix pool for synthetic top-up keys.
const KEY_PREFIXES: &[&str] = &[
    "model.",
    "tokenizer.",
    "general.",
    "training.",
    "custom.",
    "llama.",
    "mpt.",
    "gptneox.",
    "bloom.",
    "falcon.",
    "llama.rope.",
    "llama.attention.",
    "tokenizer.ggml.",
    "general.source.",
    "general.base_model.",
];

/// Common key suffixes, preferred over fully random ones.
const KEY_SUFFIXES: &[&str] = &[
    "version",
    "count",
    "length",
    "size",
    "type",
    "weight",
    "epsilon",
    "factor",
    "scale",
    "dimension",
    "layer",
    "head_count",
    "vocab_size",
    "hidden_size",
    "intermediate_size",
];

/// Non-block tensor names; the first tensor usually takes one of these.
const BASE_TENSOR_NAMES: &[&str] = &["token_embd", "pos_embd", "output_norm", "output"];

/// Per-block tensor name components.
const BLOCK_TENSOR_NAMES: &[&str] = &[
    "attn_norm",
    "attn_q",
    "attn_k",
    "attn_v",
    "attn_output",
    "ffn_norm",
    "ffn_up",
    "ffn_gate",
    "ffn_down",
    "attn_norm_2",
    "attn_qkv",
];

/// Element types array KVs draw from (strings handled like any element).
const ARRAY_ELEM_TYPES: &[MetaType] = &[
    MetaType::Uint8,
    MetaType::Int32,
    MetaType::Float32,
    MetaType::Bool,
    MetaType::String,
];

const KEY_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_.-";

// ---- Inclusion probabilities ----
//
// Named so the field table below reads as (field, probability, encoder).

const P_NAME: f64 = 0.8;
const P_AUTHOR: f64 = 0.5;
const P_VERSION: f64 = 0.5;
const P_DESCRIPTION: f64 = 0.3;
const P_FILE_TYPE: f64 = 0.7;
const P_TOKENIZER: f64 = 0.5;
const P_ARRAY_KV: f64 = 0.3;
const P_COMMON_SUFFIX: f64 = 0.7;
const P_BASE_TENSOR: f64 = 0.8;
const P_BLOCK_TENSOR: f64 = 0.7;
const P_WEIGHT_SUFFIX: f64 = 0.9;

/// Optional descriptive fields, evaluated in this order with one Bernoulli
/// draw each. Evaluation order is part of the determinism contract.
const OPTIONAL_FIELDS: [(&str, f64, fn(&mut ChaCha8Rng) -> Value); 5] = [
    ("general.name", P_NAME, |rng| {
        Value::String(format!("test-model-{}", rng.gen_range(1..=100)))
    }),
    ("general.author", P_AUTHOR, |_| {
        Value::String("gguf-forge".to_string())
    }),
    ("general.version", P_VERSION, |rng| {
        Value::String(format!("{}.{}", rng.gen_range(1..=3), rng.gen_range(0..=9)))
    }),
    ("general.description", P_DESCRIPTION, |_| {
        Value::String("A randomly generated model file for fuzzing purposes".to_string())
    }),
    ("general.file_type", P_FILE_TYPE, |rng| {
        Value::Uint32(*pick(rng, FILE_TYPES))
    }),
];

/// Slice choice that never fails; every catalogue here is non-empty.
fn pick<'a, T>(rng: &mut ChaCha8Rng, slice: &'a [T]) -> &'a T {
    slice.choose(rng).expect("catalogue slices are non-empty")
}

// ---- Synthesizer ----

/// Synthesizes one valid document per instance.
///
/// Field inclusion, key names, tensor shapes, and payload bytes all come
/// from the one seeded generator, drawn in a fixed documented order:
/// architecture, tensor count, optional fields, architecture-conditional
/// fields, tokenizer fields, top-up KVs, then per-tensor name / shape /
/// type / payload.
pub struct Synthesizer {
    rng: ChaCha8Rng,
    max_size: u64,
}

impl Synthesizer {
    /// Creates a synthesizer for documents up to `max_size_bytes`.
    ///
    /// The budget bounds tensor payload volume; it must at least fit an
    /// empty document.
    pub fn new(max_size_bytes: u64, seed: u64) -> Result<Self, Error> {
        if max_size_bytes < HEADER_LEN as u64 {
            return Err(Error::BudgetTooSmall {
                budget: max_size_bytes,
                minimum: HEADER_LEN as u64,
            });
        }
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_size: max_size_bytes,
        })
    }

    /// Builds the document.
    pub fn synthesize(mut self) -> Result<Vec<u8>, Error> {
        let n_tensors: u64 = self.rng.gen_range(1..=5);
        let arch = *pick(&mut self.rng, ARCHITECTURES);
        debug!(arch, n_tensors, "synthesizing document");

        let mut builder = DocumentBuilder::new(n_tensors);
        let mut kv_count: u64 = 0;

        // Required fields first.
        builder.add_kv("general.architecture", &Value::String(arch.to_string()))?;
        builder.add_kv("general.alignment", &Value::Uint32(DEFAULT_ALIGNMENT as u32))?;
        kv_count += 2;

        for (key, probability, make_value) in OPTIONAL_FIELDS {
            if self.rng.gen_bool(probability) {
                builder.add_kv(key, &make_value(&mut self.rng))?;
                kv_count += 1;
            }
        }

        if arch == "llama" {
            builder.add_kv(
                "llama.context_length",
                &Value::Uint64(*pick(&mut self.rng, CONTEXT_LENGTHS)),
            )?;
            builder.add_kv(
                "llama.embedding_length",
                &Value::Uint64(*pick(&mut self.rng, EMBEDDING_LENGTHS)),
            )?;
            builder.add_kv(
                "llama.block_count",
                &Value::Uint64(*pick(&mut self.rng, BLOCK_COUNTS)),
            )?;
            builder.add_kv(
                "llama.attention.head_count",
                &Value::Uint64(*pick(&mut self.rng, HEAD_COUNTS)),
            )?;
            kv_count += 4;
        }

        if self.rng.gen_bool(P_TOKENIZER) {
            let model = *pick(&mut self.rng, TOKENIZER_MODELS);
            builder.add_kv("tokenizer.ggml.model", &Value::String(model.to_string()))?;
            builder.add_kv(
                "tokenizer.ggml.bos_token_id",
                &Value::Uint32(self.rng.gen_range(1..=10)),
            )?;
            builder.add_kv(
                "tokenizer.ggml.eos_token_id",
                &Value::Uint32(self.rng.gen_range(1..=10)),
            )?;
            kv_count += 3;
        }

        // Top up to the entry target with synthetic keys.
        let target_kv: u64 = self.rng.gen_range(10..=25);
        while kv_count < target_kv {
            let key = random_key(&mut self.rng);
            let value = random_value(&mut self.rng);
            builder.add_kv(&key, &value)?;
            kv_count += 1;
        }

        // Tensor table, then payloads sized against the remaining budget.
        let mut payload_total: u64 = 0;
        for i in 0..n_tensors {
            let name = self.tensor_name(i);
            let budget_left = self
                .max_size
                .saturating_sub(builder.len() as u64 + payload_total);
            let share = budget_left / n_tensors;
            // Cap the element count assuming the widest dense element.
            let max_elements = (share / 4).clamp(1, 1000);

            let n_dims = self.rng.gen_range(1..=4usize);
            let mut shape = Vec::with_capacity(n_dims);
            let mut elements: u64 = 1;
            for d in 0..n_dims {
                let cap = if d == 0 { 64 } else { 16 };
                let cap = cap.min(max_elements / elements).max(1);
                let dim = self.rng.gen_range(1..=cap);
                elements *= dim;
                shape.push(dim);
            }

            let ttype = *pick(&mut self.rng, &TensorType::DENSE);
            let size = ttype.data_size(elements);
            let mut data = vec![0u8; size as usize];
            self.rng.fill_bytes(&mut data);
            builder.add_tensor(&name, &shape, ttype, data)?;
            payload_total += size;
        }

        let doc = builder.finish();
        debug!(bytes = doc.len(), kvs = kv_count, "document synthesized");
        Ok(doc)
    }

    fn tensor_name(&mut self, index: u64) -> String {
        if index == 0 && self.rng.gen_bool(P_BASE_TENSOR) {
            format!("{}.weight", pick(&mut self.rng, BASE_TENSOR_NAMES))
        } else if self.rng.gen_bool(P_BLOCK_TENSOR) {
            let block = self.rng.gen_range(0..=31u32);
            let component = *pick(&mut self.rng, BLOCK_TENSOR_NAMES);
            let suffix = if self.rng.gen_bool(P_WEIGHT_SUFFIX) {
                "weight"
            } else {
                "bias"
            };
            format!("blk.{block}.{component}.{suffix}")
        } else {
            format!("tensor_{index}")
        }
    }
}

/// Synthesizes one valid document of at most `max_size_bytes` bytes of
/// tensor payload budget, deterministically from `seed`.
pub fn build_random_document(max_size_bytes: u64, seed: u64) -> Result<Vec<u8>, Error> {
    Synthesizer::new(max_size_bytes, seed)?.synthesize()
}

// ---- Random draws ----

fn random_string(rng: &mut ChaCha8Rng, min_len: usize, max_len: usize) -> String {
    let len = rng.gen_range(min_len..=max_len);
    (0..len)
        .map(|_| *pick(rng, KEY_CHARSET) as char)
        .collect()
}

fn random_key(rng: &mut ChaCha8Rng) -> String {
    let prefix = *pick(rng, KEY_PREFIXES);
    let suffix = if rng.gen_bool(P_COMMON_SUFFIX) {
        (*pick(rng, KEY_SUFFIXES)).to_string()
    } else {
        random_string(rng, 5, 15)
    };
    format!("{prefix}{suffix}")
}

/// Draws a scalar of the given type, full-range for the integer kinds and
/// bounded for floats and the "reasonable" u64 range.
fn random_scalar(rng: &mut ChaCha8Rng, meta_type: MetaType) -> Value {
    match meta_type {
        MetaType::Uint8 => Value::Uint8(rng.gen_range(0..=u8::MAX)),
        MetaType::Int8 => Value::Int8(rng.gen_range(i8::MIN..=i8::MAX)),
        MetaType::Uint16 => Value::Uint16(rng.gen_range(0..=u16::MAX)),
        MetaType::Int16 => Value::Int16(rng.gen_range(i16::MIN..=i16::MAX)),
        MetaType::Uint32 => Value::Uint32(rng.gen_range(0..=u32::MAX)),
        MetaType::Int32 => Value::Int32(rng.gen_range(i32::MIN..=i32::MAX)),
        MetaType::Float32 => Value::Float32(rng.gen_range(-1000.0..1000.0)),
        MetaType::Bool => Value::Bool(rng.gen_bool(0.5)),
        MetaType::String => Value::String(random_string(rng, 1, 20)),
        MetaType::Uint64 => Value::Uint64(rng.gen_range(0..=i64::MAX as u64)),
        MetaType::Int64 => Value::Int64(rng.gen_range(i64::MIN..=i64::MAX)),
        MetaType::Float64 => Value::Float64(rng.gen_range(-1000.0..1000.0)),
        MetaType::Array => unreachable!("arrays are drawn in random_value"),
    }
}

/// Draws a top-up value: 30% arrays, otherwise any scalar kind.
fn random_value(rng: &mut ChaCha8Rng) -> Value {
    if rng.gen_bool(P_ARRAY_KV) {
        let elem_type = *pick(rng, ARRAY_ELEM_TYPES);
        let len = rng.gen_range(1..=10);
        let items = match elem_type {
            MetaType::String => (0..len)
                .map(|j| Value::String(format!("array_str_{j}")))
                .collect(),
            _ => (0..len).map(|_| random_scalar(rng, elem_type)).collect(),
        };
        Value::Array(elem_type, items)
    } else {
        let scalar_type = *pick(rng, &MetaType::SCALARS);
        random_scalar(rng, scalar_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_floor() {
        let err = build_random_document(10, 0).unwrap_err();
        assert!(matches!(err, Error::BudgetTooSmall { budget: 10, .. }));
    }

    #[test]
    fn test_seed_determinism() {
        let a = build_random_document(64 * 1024, 42).unwrap();
        let b = build_random_document(64 * 1024, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_key_has_known_prefix() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let key = random_key(&mut rng);
            assert!(
                KEY_PREFIXES.iter().any(|p| key.starts_with(p)),
                "unexpected key: {key}"
            );
        }
    }

    #[test]
    fn test_random_value_never_nests_arrays() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            if let Value::Array(elem_type, items) = random_value(&mut rng) {
                assert_ne!(elem_type, MetaType::Array);
                for item in items {
                    assert_eq!(item.meta_type(), elem_type);
                }
            }
        }
    }
}
