use std::io;
use thiserror::Error;

/// Four-byte ASCII chunk code, formatted as text in diagnostics.
pub fn tag_str(tag: &[u8; 4]) -> String {
    tag.iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '?' })
        .collect()
}

#[derive(Error, Debug)]
pub enum Error {
    /// The stream ended before a required read.
    #[error("truncated input at offset {offset:#x} (need {need} bytes, have {have})")]
    TruncatedInput {
        offset: usize,
        need: usize,
        have: usize,
    },

    /// A value the schema declares constant did not match.  Almost always a
    /// wrong format version rather than corruption.
    #[error("unexpected constant at offset {offset:#x}: expected {expected:#x}, found {found:#x}")]
    UnexpectedConstant {
        offset: usize,
        expected: u64,
        found: u64,
    },

    /// A bit-field word had a nonzero bit above the declared sub-fields.
    #[error("reserved bit set at offset {offset:#x} (word {word:#x}, first reserved bit {first_reserved})")]
    ReservedBitSet {
        offset: usize,
        word: u64,
        first_reserved: u32,
    },

    /// A common-property wire tag with no case in the attribute table.
    #[error("unknown property type {tag:#x} at offset {offset:#x}")]
    UnknownPropertyType { offset: usize, tag: u8 },

    /// An unrecognized type or sub-type tag at a point where no fallback is
    /// permitted (e.g. an event-action sub-type).
    #[error("unknown {context} variant {tag} at offset {offset:#x}")]
    UnknownVariant {
        context: &'static str,
        offset: usize,
        tag: u32,
    },

    /// BKHD never appeared before end of stream.
    #[error("missing mandatory chunk {}", tag_str(.tag))]
    MissingMandatoryChunk { tag: [u8; 4] },

    /// A chunk repeated, appeared outside its allowed window, or is not part
    /// of the container's chunk set.
    #[error("unexpected chunk {} at offset {offset:#x}", tag_str(.tag))]
    UnexpectedChunkOrder { tag: [u8; 4], offset: usize },

    /// A chunk or object decoder left payload bytes unconsumed.  Fatal:
    /// signals a version mismatch or a schema bug, never recoverable.
    #[error("{context} payload not fully consumed: {remaining} bytes left")]
    TrailingData {
        context: &'static str,
        remaining: usize,
    },

    /// A value does not fit the width the schema assigns it on encode.
    #[error("encoding overflow: {what} {value} exceeds {bits}-bit field")]
    EncodingOverflow {
        what: &'static str,
        value: u64,
        bits: u32,
    },

    /// A decoded string is not valid UTF-8.
    #[error("string at offset {offset:#x} is not valid UTF-8")]
    InvalidString { offset: usize },

    /// Version number outside the reverse-engineered window.
    #[error("unsupported format version {0} (supported range 72..156)")]
    UnsupportedVersion(u32),

    /// The DIDX id-zero sentinel must carry offset=1, size=0.
    #[error("invalid media sentinel record: offset {offset}, size {size}")]
    InvalidMediaSentinel { offset: u32, size: u32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
