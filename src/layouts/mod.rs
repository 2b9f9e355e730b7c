//! # Legacy Layouts
//!
//! Ready-made schemas for the record layouts of the legacy inventory and
//! personnel programs, plus typed wrappers over them. Nothing here is special
//! to the core: every layout is an ordinary [`RecordSchema`] value and callers
//! with a different padding convention build their own.
//!
//! | Schema | Bytes | Notes |
//! |--------|-------|-------|
//! | `item` | 60 | price is FIXED(2) |
//! | `customer` | 162 | 2 filler bytes, flag word at 160 |
//! | `address` | 42 | embedded in `employee` at 50 |
//! | `employee` | 92 | |
//! | `s` | 12 | `c` redefines `a` |
//! | `s_as_c` | 12 | overlay of `s` holding only `c` |

use crate::error::Result;
use crate::schema::{FieldDescriptor, FlagSet, RecordSchema};

pub const ITEM: &str = "item";
pub const CUSTOMER: &str = "customer";
pub const ADDRESS: &str = "address";
pub const EMPLOYEE: &str = "employee";
pub const REDEFINITION: &str = "s";
pub const REDEFINITION_OVERLAY: &str = "s_as_c";

pub const ITEM_LEN: usize = 60;
pub const CUSTOMER_LEN: usize = 162;
pub const ADDRESS_LEN: usize = 42;
pub const EMPLOYEE_LEN: usize = 92;
pub const REDEFINITION_LEN: usize = 12;

pub fn item_schema() -> Result<RecordSchema> {
    RecordSchema::build_disjoint(
        ITEM,
        ITEM_LEN,
        vec![
            FieldDescriptor::int16("item_id", 0),
            FieldDescriptor::text("item_name", 2, 31),
            FieldDescriptor::decimal("item_price", 34, 2),
            FieldDescriptor::int16("quantity_on_hand", 42),
            FieldDescriptor::int16("reorder_level", 44),
            FieldDescriptor::int16("supplier_id", 46),
            FieldDescriptor::text("last_updated", 48, 11),
        ],
    )
}

pub fn customer_schema() -> Result<RecordSchema> {
    let flags = FlagSet::new([("is_active", 0), ("has_credit", 1), ("tax_exempt", 2)])?;
    RecordSchema::build_disjoint(
        CUSTOMER,
        CUSTOMER_LEN,
        vec![
            FieldDescriptor::int16("customer_id", 0),
            FieldDescriptor::text("customer_name", 2, 51),
            FieldDescriptor::text("address_line1", 53, 31),
            FieldDescriptor::text("address_line2", 84, 31),
            FieldDescriptor::text("city", 115, 21),
            FieldDescriptor::text("state", 136, 3),
            FieldDescriptor::text("zip_code", 139, 10),
            FieldDescriptor::decimal("account_balance", 150, 2),
            FieldDescriptor::raw("filler", 158, 2),
            FieldDescriptor::flags("flags", 160, flags),
        ],
    )
}

pub fn address_schema() -> Result<RecordSchema> {
    RecordSchema::builder(ADDRESS, ADDRESS_LEN)
        .field(FieldDescriptor::text("street", 0, 20))
        .field(FieldDescriptor::text("city", 20, 15))
        .field(FieldDescriptor::text("state", 35, 2))
        .field(FieldDescriptor::text("zip", 37, 5))
        .build_disjoint()
}

pub fn employee_schema() -> Result<RecordSchema> {
    let address = address_schema()?;
    RecordSchema::builder(EMPLOYEE, EMPLOYEE_LEN)
        .field(FieldDescriptor::int16("emp_id", 0))
        .field(FieldDescriptor::text("name", 2, 30))
        .field(FieldDescriptor::text("dept", 32, 10))
        .field(FieldDescriptor::decimal("salary", 42, 2))
        .embed("address", 50, &address)
        .build_disjoint()
}

pub fn redefinition_schema() -> Result<RecordSchema> {
    RecordSchema::build_disjoint(
        REDEFINITION,
        REDEFINITION_LEN,
        vec![
            FieldDescriptor::int16("a", 0).occurs(3),
            FieldDescriptor::text("b", 6, 6),
            FieldDescriptor::int32("c", 0).redefines("a"),
        ],
    )
}

/// `s` seen only through `c`, for binding with `Record::view_as`.
pub fn redefinition_overlay(base: &RecordSchema) -> Result<RecordSchema> {
    base.redefine(REDEFINITION_OVERLAY, vec![FieldDescriptor::int32("c", 0)])
}

record_accessors! {
    /// Typed view of an `item` record.
    pub struct ItemRecord = "item" {
        item_id: int,
        item_name: text,
        item_price: decimal,
        quantity_on_hand: int,
        reorder_level: int,
        supplier_id: int,
        last_updated: text,
    }
}

record_accessors! {
    /// Typed view of a `customer` record.
    pub struct CustomerRecord = "customer" {
        customer_id: int,
        customer_name: text,
        address_line1: text,
        address_line2: text,
        city: text,
        state: text,
        zip_code: text,
        account_balance: decimal,
        filler: bytes,
        is_active: flag("flags"),
        has_credit: flag("flags"),
        tax_exempt: flag("flags"),
    }
}

record_accessors! {
    /// Typed view of an `employee` record, address fields included.
    pub struct EmployeeRecord = "employee" {
        emp_id: int,
        name: text,
        dept: text,
        salary: decimal,
        street: text @ "address.street",
        city: text @ "address.city",
        state: text @ "address.state",
        zip: text @ "address.zip",
    }
}
