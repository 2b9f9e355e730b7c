//! # fixrec - Fixed-Layout Binary Records
//!
//! fixrec reads and writes structured records whose fields sit at exact byte
//! offsets inside a flat memory region, the way legacy programs lay out
//! structures in memory and on disk. This implementation prioritizes:
//!
//! - **Zero-copy access**: records are views over byte spans, never decoded
//!   copies
//! - **Zero allocation per record**: arrays of records are slots of one arena
//! - **Byte-exact layouts**: what the schema says is what lands in memory
//!
//! ## Quick Start
//!
//! ```ignore
//! use fixrec::{FieldDescriptor, Record, RecordArena, RecordSchema};
//!
//! let schema = RecordSchema::build_disjoint("item", 20, vec![
//!     FieldDescriptor::int16("id", 0),
//!     FieldDescriptor::text("name", 2, 10),
//!     FieldDescriptor::decimal("price", 12, 2),
//! ])?;
//!
//! let mut item = Record::new(&schema);
//! item.set_int("id", 1001)?;
//! item.set_text("name", "Widget A")?;
//! item.set_decimal("price", "19.99".parse()?)?;
//!
//! let mut arena = RecordArena::create(&schema, 100)?;
//! arena.store(0, &item)?;
//! arena.copy_record(0, 2, 10)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   layouts (legacy schemas, typed    │
//! │   wrappers via record_accessors!)   │
//! ├─────────────────────────────────────┤
//! │   RecordArena / SharedArena         │
//! ├─────────────────────────────────────┤
//! │   Record (schema + span)            │
//! ├──────────────────┬──────────────────┤
//! │   RecordSchema   │   codec          │
//! │   FieldDescriptor│   int/text/      │
//! │   SchemaBuilder  │   decimal/flags  │
//! ├──────────────────┴──────────────────┤
//! │   ByteSpan (bounds-checked window)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//!
//! | Kind | Bytes |
//! |------|-------|
//! | FixedInt | 2, 4 or 8, little-endian two's complement |
//! | PaddedText | `length`, Latin-1, right-padded with 0x20 |
//! | ScaledDecimal | 8, little-endian `round(value * 10^scale)` |
//! | BitFlags | 2, little-endian word, bit 0 is the most significant |
//! | RawBytes | `length`, opaque |
//!
//! ## Module Overview
//!
//! - [`span`]: bounds-checked byte windows
//! - [`codec`]: per-kind encode/decode
//! - [`schema`]: field descriptors, schemas, builder
//! - [`record`]: typed access to one record
//! - [`arena`]: contiguous arrays of records
//! - [`layouts`]: legacy record layouts
//! - [`error`]: the error taxonomy

#[macro_use]
mod macros;

pub mod arena;
pub mod codec;
pub mod config;
pub mod decimal;
pub mod error;
pub mod layouts;
pub mod record;
pub mod schema;
pub mod span;
pub mod value;

pub use arena::{RecordArena, SharedArena};
pub use decimal::Decimal;
pub use error::{MarshalError, Result};
pub use record::Record;
pub use schema::{FieldDescriptor, FieldKind, FlagSet, RecordSchema, SchemaBuilder};
pub use span::ByteSpan;
pub use value::FieldValue;
