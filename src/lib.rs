//! GGUF corpus synthesis for parser fuzzing.
//!
//! Builds three families of container byte streams:
//!
//! - realistic, internally consistent model files from a seeded generator
//!   ([`build_random_document`]),
//! - hand-picked valid edge cases plus the 24-byte minimal file
//!   ([`corpus`], [`build_minimal_document`]),
//! - a fixed catalogue of structurally invalid documents
//!   ([`build_malformed_document`]).
//!
//! The crate only produces buffers. Writing files and feeding a parser is
//! the caller's job (see the `gguf-forge` CLI), and the crate never decodes
//! documents it did not build.
//!
//! # Examples
//!
//! ```
//! use gguf_forge::{build_minimal_document, build_random_document};
//!
//! let minimal = build_minimal_document();
//! assert_eq!(minimal.len(), 24);
//!
//! let doc = build_random_document(100 * 1024, 0xC0FFEE)?;
//! assert!(doc.starts_with(b"GGUF"));
//! // Same seed, same bytes.
//! assert_eq!(doc, build_random_document(100 * 1024, 0xC0FFEE)?);
//! # Ok::<(), gguf_forge::Error>(())
//! ```

pub mod builder;
pub mod codec;
pub mod corpus;
pub mod error;
pub mod malformed;
pub mod models;
pub mod synth;
pub mod utils;

pub use builder::{DocumentBuilder, HEADER_LEN, build_minimal_document};
pub use corpus::seed_corpus;
pub use error::Error;
pub use malformed::{MalformedKind, build_malformed_document};
pub use models::{
    DEFAULT_ALIGNMENT, GGUF_MAGIC, GGUF_VERSION, MAX_DIMS, MetaType, TensorType, Value,
};
pub use synth::{Synthesizer, build_random_document};
