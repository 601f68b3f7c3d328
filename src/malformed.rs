//! Deliberately malformed documents for parser stress.
//!
//! A fixed, indexed catalogue of byte streams that each violate exactly one
//! structural rule of the container format. The constructors write their
//! bytes directly and share no code with [`DocumentBuilder`]
//! (`crate::builder`), so a defect in one cannot mask a defect in the
//! other. Each entry is a pure function of its index: the *shape* of the
//! violation is deterministic, and only the `RandomGarbage` payload
//! consumes randomness.

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::Error;
use crate::models::{GGUF_MAGIC, GGUF_VERSION};

/// One structurally invalid document shape, indexed 0..=7.
///
/// Indices are stable: regression tests and corpus file names depend on
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MalformedKind {
    /// First four bytes are not the magic tag.
    WrongMagic = 0,
    /// Version field far outside anything a parser supports.
    UnsupportedVersion = 1,
    /// Magic and version only; both count fields missing.
    TruncatedHeader = 2,
    /// Both counts are -1.
    NegativeCounts = 3,
    /// Counts of 2^60, rejectable before any allocation.
    ImplausibleCounts = 4,
    /// A KV key length claiming 2^62 bytes with none present.
    OversizedStringLength = 5,
    /// A tensor data offset that is not a multiple of 32.
    MisalignedOffset = 6,
    /// Uniform random bytes with no structural relationship to the format.
    RandomGarbage = 7,
}

impl MalformedKind {
    /// Number of catalogue entries.
    pub const COUNT: u32 = 8;

    /// Every entry, in index order.
    pub const ALL: [MalformedKind; 8] = [
        MalformedKind::WrongMagic,
        MalformedKind::UnsupportedVersion,
        MalformedKind::TruncatedHeader,
        MalformedKind::NegativeCounts,
        MalformedKind::ImplausibleCounts,
        MalformedKind::OversizedStringLength,
        MalformedKind::MisalignedOffset,
        MalformedKind::RandomGarbage,
    ];

    /// Converts from a catalogue index.
    pub const fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::WrongMagic),
            1 => Some(Self::UnsupportedVersion),
            2 => Some(Self::TruncatedHeader),
            3 => Some(Self::NegativeCounts),
            4 => Some(Self::ImplausibleCounts),
            5 => Some(Self::OversizedStringLength),
            6 => Some(Self::MisalignedOffset),
            7 => Some(Self::RandomGarbage),
            _ => None,
        }
    }

    /// The catalogue index.
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Stable label, usable as a corpus file stem.
    pub const fn label(self) -> &'static str {
        match self {
            MalformedKind::WrongMagic => "wrong_magic",
            MalformedKind::UnsupportedVersion => "unsupported_version",
            MalformedKind::TruncatedHeader => "truncated_header",
            MalformedKind::NegativeCounts => "negative_counts",
            MalformedKind::ImplausibleCounts => "implausible_counts",
            MalformedKind::OversizedStringLength => "oversized_string_length",
            MalformedKind::MisalignedOffset => "misaligned_offset",
            MalformedKind::RandomGarbage => "random_garbage",
        }
    }

    /// Renders the variant's byte stream.
    pub fn render(self, rng: &mut impl RngCore) -> Vec<u8> {
        let mut data = Vec::new();
        match self {
            MalformedKind::WrongMagic => {
                data.extend_from_slice(b"XXXX");
                data.extend_from_slice(&GGUF_VERSION.to_le_bytes());
                data.extend_from_slice(&[0u8; 16]);
            }
            MalformedKind::UnsupportedVersion => {
                data.extend_from_slice(GGUF_MAGIC);
                data.extend_from_slice(&999u32.to_le_bytes());
                data.extend_from_slice(&[0u8; 16]);
            }
            MalformedKind::TruncatedHeader => {
                data.extend_from_slice(GGUF_MAGIC);
                data.extend_from_slice(&GGUF_VERSION.to_le_bytes());
            }
            MalformedKind::NegativeCounts => {
                data.extend_from_slice(GGUF_MAGIC);
                data.extend_from_slice(&GGUF_VERSION.to_le_bytes());
                data.extend_from_slice(&(-1i64).to_le_bytes());
                data.extend_from_slice(&(-1i64).to_le_bytes());
            }
            MalformedKind::ImplausibleCounts => {
                data.extend_from_slice(GGUF_MAGIC);
                data.extend_from_slice(&GGUF_VERSION.to_le_bytes());
                data.extend_from_slice(&(1i64 << 60).to_le_bytes());
                data.extend_from_slice(&(1i64 << 60).to_le_bytes());
            }
            MalformedKind::OversizedStringLength => {
                data.extend_from_slice(GGUF_MAGIC);
                data.extend_from_slice(&GGUF_VERSION.to_le_bytes());
                data.extend_from_slice(&0i64.to_le_bytes());
                data.extend_from_slice(&1i64.to_le_bytes());
                // One KV entry whose key claims 2^62 bytes; the stream ends
                // here.
                data.extend_from_slice(&(1u64 << 62).to_le_bytes());
            }
            MalformedKind::MisalignedOffset => {
                data.extend_from_slice(GGUF_MAGIC);
                data.extend_from_slice(&GGUF_VERSION.to_le_bytes());
                data.extend_from_slice(&1i64.to_le_bytes());
                data.extend_from_slice(&0i64.to_le_bytes());
                let name = b"misaligned";
                data.extend_from_slice(&(name.len() as u64).to_le_bytes());
                data.extend_from_slice(name);
                data.extend_from_slice(&1u32.to_le_bytes());
                data.extend_from_slice(&10i64.to_le_bytes());
                data.extend_from_slice(&1i64.to_le_bytes());
                data.extend_from_slice(&1i64.to_le_bytes());
                data.extend_from_slice(&1i64.to_le_bytes());
                data.extend_from_slice(&0i32.to_le_bytes());
                data.extend_from_slice(&17u64.to_le_bytes());
                // Deliberately unpadded filler followed by "data".
                data.extend_from_slice(&[0u8; 17]);
                data.extend_from_slice(&[0x41u8; 40]);
            }
            MalformedKind::RandomGarbage => {
                data.resize(100, 0);
                rng.fill_bytes(&mut data);
            }
        }
        data
    }
}

/// Builds the catalogue entry at `variant_index`.
///
/// `seed` feeds payload randomness only (the `RandomGarbage` variant); the
/// violated invariant is fixed by the index alone. The only failure is an
/// out-of-range index.
pub fn build_malformed_document(variant_index: u32, seed: u64) -> Result<Vec<u8>, Error> {
    let kind = MalformedKind::from_index(variant_index).ok_or(Error::UnknownVariant {
        index: variant_index,
        count: MalformedKind::COUNT,
    })?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(kind.render(&mut rng))
}
