//! # Layout Constants
//!
//! This module centralizes the fixed numeric parameters of the record wire
//! format. Every codec and every schema check reads its limits from here so
//! that interdependent values cannot drift apart.
//!
//! ## Dependency Graph
//!
//! ```text
//! FLAG_WORD_BYTES (2)
//!       │
//!       └─> FLAG_WORD_BITS (derived: FLAG_WORD_BYTES * 8)
//!             Bit indices in a flag mapping must be < FLAG_WORD_BITS.
//!             Bit 0 is the most significant bit of the word.
//!
//! SCALED_DECIMAL_BYTES (8)
//!       │
//!       └─> MAX_SCALED_DECIMAL_SCALE (18)
//!             10^scale must fit in the signed 64-bit storage word,
//!             otherwise even the value 1 could not be stored.
//!
//! MAX_DECIMAL_SCALE (38)
//!       └─> 10^scale must fit in the i128 digits of an in-memory Decimal.
//! ```
//!
//! ## Critical Invariants
//!
//! Enforced by compile-time assertions below:
//!
//! 1. `FLAG_WORD_BITS == FLAG_WORD_BYTES * 8`
//! 2. `10^MAX_SCALED_DECIMAL_SCALE <= i64::MAX`
//! 3. `MAX_SCALED_DECIMAL_SCALE <= MAX_DECIMAL_SCALE`

// ============================================================================
// TEXT FIELDS
// ============================================================================

/// Byte written into unused trailing positions of a padded text field and
/// stripped from the end on read.
pub const PAD_BYTE: u8 = b' ';

/// Text fields hold one byte per character (Latin-1); characters above this
/// code point are written as `UNMAPPABLE_TEXT_BYTE`.
pub const MAX_TEXT_CODE_POINT: u32 = 0xFF;

/// Replacement byte for characters outside Latin-1.
pub const UNMAPPABLE_TEXT_BYTE: u8 = b'?';

// ============================================================================
// INTEGER FIELDS
// ============================================================================

/// Widths accepted for `FieldKind::FixedInt`.
pub const SUPPORTED_INT_WIDTHS: [usize; 3] = [2, 4, 8];

// ============================================================================
// BIT-FLAG WORDS
// ============================================================================

/// Size in bytes of a bit-flag word.
pub const FLAG_WORD_BYTES: usize = 2;

/// Number of addressable bits in a flag word.
pub const FLAG_WORD_BITS: usize = FLAG_WORD_BYTES * 8;

/// Upper bound on named flags per word; sizes the inline flag table.
pub const MAX_FLAGS_PER_WORD: usize = FLAG_WORD_BITS;

const _: () = assert!(
    FLAG_WORD_BITS == FLAG_WORD_BYTES * 8,
    "FLAG_WORD_BITS derivation mismatch"
);

// ============================================================================
// DECIMALS
// ============================================================================

/// Storage size of a scaled decimal field.
pub const SCALED_DECIMAL_BYTES: usize = 8;

/// Largest scale a scaled decimal field may declare.
pub const MAX_SCALED_DECIMAL_SCALE: u8 = 18;

/// Largest scale an in-memory `Decimal` may carry.
pub const MAX_DECIMAL_SCALE: u8 = 38;

const _: () = assert!(
    10i64.checked_pow(MAX_SCALED_DECIMAL_SCALE as u32).is_some(),
    "10^MAX_SCALED_DECIMAL_SCALE must fit in the i64 storage word"
);

const _: () = assert!(
    MAX_SCALED_DECIMAL_SCALE <= MAX_DECIMAL_SCALE,
    "scaled decimal fields must decode into an in-memory Decimal"
);

const _: () = assert!(
    10i128.checked_pow(MAX_DECIMAL_SCALE as u32).is_some(),
    "10^MAX_DECIMAL_SCALE must fit in i128 digits"
);
