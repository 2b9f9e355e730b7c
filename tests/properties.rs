//! Property tests for the codec and arena guarantees.

use fixrec::layouts;
use fixrec::{Decimal, FieldDescriptor, FlagSet, Record, RecordArena, RecordSchema};
use proptest::collection::vec;
use proptest::prelude::*;

fn scalar_schema() -> RecordSchema {
    RecordSchema::build_disjoint(
        "scalars",
        30,
        vec![
            FieldDescriptor::int16("i16", 0),
            FieldDescriptor::int("u16", 2, 2, false),
            FieldDescriptor::int32("i32", 4),
            FieldDescriptor::text("text", 8, 10),
            FieldDescriptor::decimal("amount", 18, 2),
        ],
    )
    .unwrap()
}

fn full_flag_schema() -> RecordSchema {
    let flags = FlagSet::new((0u8..16).map(|bit| (format!("f{}", bit), bit))).unwrap();
    RecordSchema::build("word", 2, vec![FieldDescriptor::flags("w", 0, flags)]).unwrap()
}

proptest! {
    #[test]
    fn integers_round_trip(a in any::<i16>(), b in any::<u16>(), c in any::<i32>()) {
        let schema = scalar_schema();
        let mut record = Record::new(&schema);
        record.set_int("i16", a.into()).unwrap();
        record.set_int("u16", b.into()).unwrap();
        record.set_int("i32", c.into()).unwrap();
        prop_assert_eq!(record.get_int("i16").unwrap(), i64::from(a));
        prop_assert_eq!(record.get_int("u16").unwrap(), i64::from(b));
        prop_assert_eq!(record.get_int("i32").unwrap(), i64::from(c));
    }

    #[test]
    fn short_text_round_trips_exactly(text in "[a-zA-Z0-9]([a-zA-Z0-9 ]{0,8}[a-zA-Z0-9])?") {
        let schema = scalar_schema();
        let mut record = Record::new(&schema);
        record.set_text("text", &text).unwrap();
        prop_assert_eq!(record.get_text("text").unwrap(), text);
    }

    #[test]
    fn long_text_truncates_to_field_length(text in "[a-zA-Z0-9]{11,40}") {
        let schema = scalar_schema();
        let mut record = Record::new(&schema);
        record.set_text("text", &text).unwrap();
        prop_assert_eq!(record.get_text("text").unwrap(), &text[..10]);
    }

    #[test]
    fn decimals_round_trip_at_declared_scale(digits in -1_000_000_000_000_000i128..1_000_000_000_000_000i128) {
        let schema = scalar_schema();
        let mut record = Record::new(&schema);
        let value = Decimal::new(digits, 2).unwrap();
        record.set_decimal("amount", value).unwrap();
        prop_assert_eq!(record.get_decimal("amount").unwrap(), value);
        prop_assert_eq!(&record.as_bytes()[18..26], &(digits as i64).to_le_bytes()[..]);
    }

    #[test]
    fn oversized_integers_never_touch_the_record(value in prop_oneof![
        i64::MIN..i64::from(i16::MIN),
        i64::from(i16::MAX) + 1..i64::MAX,
    ]) {
        let schema = scalar_schema();
        let mut record = Record::new(&schema);
        record.set_int("i16", 77).unwrap();
        let before = record.as_bytes().to_vec();
        prop_assert!(record.set_int("i16", value).is_err());
        prop_assert_eq!(record.as_bytes(), &before[..]);
    }

    #[test]
    fn setting_one_flag_leaves_other_bits_alone(word in any::<u16>(), bit in 0u8..16, on in any::<bool>()) {
        let schema = full_flag_schema();
        let mut record = Record::new(&schema);
        record.set_flags_word("w", word).unwrap();
        record.set_flag("w", &format!("f{}", bit), on).unwrap();

        let mask = 1u16 << (15 - bit);
        let after = record.flags_word("w").unwrap();
        prop_assert_eq!(after & !mask, word & !mask);
        prop_assert_eq!(after & mask != 0, on);
    }

    #[test]
    fn arena_slots_never_alias(capacity in 2usize..16, pick in any::<(usize, usize)>(), value in any::<i16>()) {
        let schema = scalar_schema();
        let mut arena = RecordArena::create(&schema, capacity).unwrap();
        let i = pick.0 % capacity;
        let j = (i + 1 + pick.1 % (capacity - 1)) % capacity;
        prop_assume!(i != j);

        arena.record_at_mut(i).unwrap().set_int("i16", value.into()).unwrap();
        arena.record_at_mut(i).unwrap().set_text("text", "occupied").unwrap();
        prop_assert!(arena.record_at(j).unwrap().as_bytes().iter().all(|&b| b == 0));
        for (idx, slot) in arena.iter().enumerate() {
            if idx != i {
                prop_assert!(slot.as_bytes().iter().all(|&b| b == 0));
            }
        }
    }

    #[test]
    fn any_customer_image_decodes_every_field(image in vec(any::<u8>(), layouts::CUSTOMER_LEN)) {
        let schema = layouts::customer_schema().unwrap();
        let record = Record::wrap(&schema, image.as_slice()).unwrap();
        for field in schema.fields() {
            prop_assert!(record.get(field.name()).is_ok(), "{} failed to decode", field.name());
        }
        for flag in ["is_active", "has_credit", "tax_exempt"] {
            prop_assert!(record.get_flag("flags", flag).is_ok());
        }
        prop_assert!(record.reserved_bits("flags").is_ok());
    }

    #[test]
    fn any_redefinition_image_decodes_both_views(image in any::<[u8; 12]>()) {
        let schema = layouts::redefinition_schema().unwrap();
        let overlay = layouts::redefinition_overlay(&schema).unwrap();
        let record = Record::wrap(&schema, &image[..]).unwrap();
        for field in schema.fields() {
            prop_assert!(record.get(field.name()).is_ok(), "{} failed to decode", field.name());
        }
        for idx in 0..3 {
            prop_assert!(record.get_element("a", idx).is_ok());
        }
        let c = record.view_as(&overlay).unwrap().get_int("c").unwrap();
        prop_assert_eq!(c, i64::from(i32::from_le_bytes([image[0], image[1], image[2], image[3]])));
    }
}
