//! # Structure Demo
//!
//! Replays the legacy structure walkthrough against the `employee` and `s`
//! layouts: a standalone person record copied into an employee database,
//! a salary update through a slot view, reads and writes through a
//! redefined field, and a half-record move between slots.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug structure_demo
//! ```

use eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fixrec::layouts::{self, EmployeeRecord};
use fixrec::{Decimal, Record, RecordArena};

const MAX_EMPLOYEES: usize = 100;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let employee = layouts::employee_schema().wrap_err("building employee layout")?;

    let mut person = EmployeeRecord::new(&employee)?;
    person.set_emp_id(1001)?;
    person.set_name("John Smith")?;
    person.set_dept("Engineering")?;
    person.set_salary("5000.00".parse()?)?;
    person.set_street("123 Main St")?;
    person.set_city("Anytown")?;
    person.set_state("CA")?;
    person.set_zip("94086")?;
    info!(?person, "initialized person");

    let mut employee_db = RecordArena::create(&employee, MAX_EMPLOYEES)?;
    employee_db.store(0, person.record())?;
    info!("copied person to employee_db[0]");

    {
        let mut emp1 = EmployeeRecord::from_record(employee_db.record_at_mut(1)?)?;
        emp1.set_emp_id(1002)?;
        emp1.set_name("Jane Doe")?;
        emp1.set_salary("6000.00".parse()?)?;
        info!(emp = ?emp1, "initialized employee_db[1]");
    }

    // Pointer-style update: a view of slot 0, not a copy.
    employee_db
        .record_at_mut(0)?
        .set_decimal("salary", Decimal::new(525_000, 2)?)?;
    info!(emp = ?employee_db.record_at(0)?, "employee_db[0] after update through view");

    let s_schema = layouts::redefinition_schema()?;
    let mut s = Record::new(&s_schema);
    for (idx, value) in [1, 2, 3].into_iter().enumerate() {
        s.set_element("a", idx, value)?;
    }
    s.set_text("b", "XYZ")?;
    info!(a = %s.get("a")?, b = %s.get_text("b")?, "initialized s");

    let c = s.get_int("c")?;
    info!(c = %word32(c), "s.c read over a[0..2]");

    s.set_int("c", i64::from(0xABCD_1234u32 as i32))?;
    info!(a = %s.get("a")?, b = %s.get_text("b")?, "s after write through c");

    let overlay = layouts::redefinition_overlay(&s_schema)?;
    let as_c = s.view_as(&overlay)?;
    info!(c = %word32(as_c.get_int("c")?), "s seen through overlay");

    let half = employee_db.record_len() / 2;
    employee_db.copy_record(0, 2, half)?;
    info!(
        bytes = half,
        emp = ?employee_db.record_at(2)?,
        "employee_db[2] after partial move"
    );

    info!("structure demo finished");
    Ok(())
}

/// A 32-bit field value as its hex word, whatever its sign.
fn word32(value: i64) -> String {
    format!("{:#010x}", value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_words_print_as_32_bits() {
        assert_eq!(word32(i64::from(0xABCD_1234u32 as i32)), "0xabcd1234");
        assert_eq!(word32(0x0002_0001), "0x00020001");
    }
}
