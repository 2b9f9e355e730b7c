//! Fuzz testing for schema construction and field writes.
//!
//! Builds arbitrary schemas, applies arbitrary set operations to a record and
//! checks that nothing panics, that every rejected write leaves the record
//! bytes exactly as they were, and that every field decodes from any bytes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use fixrec::{Decimal, FieldDescriptor, FieldValue, FlagSet, Record, RecordSchema};

#[derive(Debug, Arbitrary)]
struct RecordInput {
    total_length: u8,
    fields: Vec<FuzzField>,
    disjoint: bool,
    operations: Vec<SetOperation>,
    image: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
struct FuzzField {
    offset: u8,
    kind: FuzzKind,
    occurs: u8,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzKind {
    Int { width: u8, signed: bool },
    Text { length: u8 },
    Decimal { scale: u8 },
    Flags { bits: u16 },
    Raw { length: u8 },
}

#[derive(Debug, Arbitrary)]
enum SetOperation {
    Int(u8, i64),
    Text(u8, String),
    Decimal(u8, i64, u8),
    FlagsWord(u8, u16),
    Flag(u8, u8, bool),
    Bytes(u8, Vec<u8>),
    Element(u8, u8, i64),
}

fn descriptor(idx: usize, field: &FuzzField) -> Option<FieldDescriptor> {
    let name = format!("f{}", idx);
    let offset = field.offset as usize;
    let desc = match field.kind {
        FuzzKind::Int { width, signed } => FieldDescriptor::int(name, offset, width as usize, signed),
        FuzzKind::Text { length } => FieldDescriptor::text(name, offset, length as usize),
        FuzzKind::Decimal { scale } => FieldDescriptor::decimal(name, offset, scale),
        FuzzKind::Flags { bits } => {
            let flags = FlagSet::new(
                (0u8..16)
                    .filter(|bit| bits & (1 << bit) != 0)
                    .map(|bit| (format!("b{}", bit), bit)),
            )
            .ok()?;
            FieldDescriptor::flags(name, offset, flags)
        }
        FuzzKind::Raw { length } => FieldDescriptor::raw(name, offset, length as usize),
    };
    Some(desc.occurs((field.occurs % 4) as usize))
}

fn apply(record: &mut Record<'_, Vec<u8>>, op: &SetOperation) -> fixrec::Result<()> {
    let name = |idx: &u8| format!("f{}", idx);
    match op {
        SetOperation::Int(f, v) => record.set_int(&name(f), *v),
        SetOperation::Text(f, s) => record.set_text(&name(f), s),
        SetOperation::Decimal(f, digits, scale) => {
            let value = Decimal::new(i128::from(*digits), *scale)?;
            record.set_decimal(&name(f), value)
        }
        SetOperation::FlagsWord(f, w) => record.set_flags_word(&name(f), *w),
        SetOperation::Flag(f, bit, on) => record.set_flag(&name(f), &format!("b{}", bit), *on),
        SetOperation::Bytes(f, bytes) => record.set_bytes(&name(f), bytes),
        SetOperation::Element(f, idx, v) => {
            record.set_element(&name(f), *idx as usize, FieldValue::Int(*v))
        }
    }
}

fuzz_target!(|input: RecordInput| {
    let fields: Vec<FieldDescriptor> = input
        .fields
        .iter()
        .take(16)
        .enumerate()
        .filter_map(|(idx, field)| descriptor(idx, field))
        .collect();

    let total = input.total_length as usize;
    let built = if input.disjoint {
        RecordSchema::build_disjoint("fuzz", total, fields)
    } else {
        RecordSchema::build("fuzz", total, fields)
    };
    let Ok(schema) = built else {
        return;
    };

    let mut record = Record::new(&schema);
    for op in input.operations.iter().take(64) {
        let before = record.as_bytes().to_vec();
        if apply(&mut record, op).is_err() {
            assert_eq!(record.as_bytes(), &before[..], "rejected write modified bytes");
        }
    }

    for field in schema.fields() {
        assert!(record.get(field.name()).is_ok(), "decode failed for {}", field.name());
    }

    let mut image = input.image;
    image.resize(schema.total_length(), 0);
    let view = Record::wrap(&schema, image.as_slice()).expect("image sized to the schema");
    for field in schema.fields() {
        assert!(view.get(field.name()).is_ok(), "decode failed for {}", field.name());
    }
});
