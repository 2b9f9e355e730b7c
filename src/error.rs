//! # Marshaling Errors
//!
//! Every failure the record layer can report is a variant of [`MarshalError`].
//! All of them are local, recoverable conditions: nothing in this crate logs an
//! error, retries, or aborts the process. Callers decide.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `OutOfBounds` | span access or slice beyond the span length |
//! | `Schema` | malformed schema, or a field used with the wrong kind |
//! | `UnknownField` | field or flag name absent from the schema |
//! | `Range` | value not representable in the field's width or scale |
//! | `IndexOutOfRange` | arena slot or array element index past the end |
//! | `Io` | byte source/sink failure while loading or saving spans |
//!
//! Encode paths validate before touching any byte, so an `Err` always means the
//! destination bytes are unchanged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarshalError {
    /// Access of `len` bytes at `offset` does not fit in a span of `span_len`.
    #[error("access of {len} bytes at offset {offset} exceeds span of {span_len} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        span_len: usize,
    },

    #[error("schema error: {detail}")]
    Schema { detail: String },

    #[error("unknown field: {name}")]
    UnknownField { name: String },

    #[error("value out of range: {detail}")]
    Range { detail: String },

    #[error("index {index} out of range for {capacity} slots")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarshalError {
    pub(crate) fn schema(detail: impl Into<String>) -> Self {
        Self::Schema {
            detail: detail.into(),
        }
    }

    pub(crate) fn range(detail: impl Into<String>) -> Self {
        Self::Range {
            detail: detail.into(),
        }
    }

    pub(crate) fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, MarshalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_offset_and_span() {
        let err = MarshalError::OutOfBounds {
            offset: 12,
            len: 8,
            span_len: 16,
        };
        assert_eq!(
            err.to_string(),
            "access of 8 bytes at offset 12 exceeds span of 16 bytes"
        );
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(MarshalError::Io(_))));
    }

    #[test]
    fn marshal_errors_lift_into_eyre_reports() {
        fn app() -> eyre::Result<()> {
            Err(MarshalError::unknown_field("price"))?;
            Ok(())
        }
        let report = app().unwrap_err();
        assert!(report.to_string().contains("price"));
        assert!(report.downcast_ref::<MarshalError>().is_some());
    }
}
