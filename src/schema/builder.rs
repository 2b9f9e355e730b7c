//! # SchemaBuilder - Incremental Schema Construction
//!
//! ```ignore
//! let address = RecordSchema::builder("address", 42)
//!     .field(FieldDescriptor::text("street", 0, 20))
//!     .field(FieldDescriptor::text("city", 20, 15))
//!     .build_disjoint()?;
//!
//! let employee = RecordSchema::builder("employee", 92)
//!     .field(FieldDescriptor::int16("emp_id", 0))
//!     .embed("address", 50, &address)     // adds address.street @50, address.city @70
//!     .build_disjoint()?;
//! ```
//!
//! Embedding copies the sub-schema's fields shifted by the embedding offset and
//! prefixes their names (and any `redefines` targets) with `prefix.`. The
//! sub-schema's own length must fit at that offset, which `build` checks along
//! with everything else.

use crate::error::{MarshalError, Result};
use crate::schema::{FieldDescriptor, RecordSchema};

#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    total_length: usize,
    fields: Vec<FieldDescriptor>,
    embedded: Vec<(String, usize, usize)>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>, total_length: usize) -> Self {
        Self {
            name: name.into(),
            total_length,
            fields: Vec::new(),
            embedded: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Places every field of `schema` at `offset`, named `prefix.field`.
    pub fn embed(mut self, prefix: &str, offset: usize, schema: &RecordSchema) -> Self {
        self.fields
            .extend(schema.fields().iter().map(|f| f.shifted(prefix, offset)));
        self.embedded
            .push((prefix.to_string(), offset, schema.total_length()));
        self
    }

    fn check_embeddings(&self) -> Result<()> {
        for (prefix, offset, len) in &self.embedded {
            if offset.checked_add(*len).map_or(true, |end| end > self.total_length) {
                return Err(MarshalError::schema(format!(
                    "embedded '{}' ({} bytes at offset {}) exceeds record length {} of '{}'",
                    prefix, len, offset, self.total_length, self.name
                )));
            }
        }
        Ok(())
    }

    pub fn build(self) -> Result<RecordSchema> {
        self.check_embeddings()?;
        RecordSchema::build(self.name, self.total_length, self.fields)
    }

    pub fn build_disjoint(self) -> Result<RecordSchema> {
        self.check_embeddings()?;
        RecordSchema::build_disjoint(self.name, self.total_length, self.fields)
    }
}
