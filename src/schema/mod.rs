//! # Record Schemas
//!
//! A `RecordSchema` is the static description of one fixed-layout record: an
//! ordered list of named fields, each at a fixed byte offset, plus the record's
//! total byte length. Schemas are built once, validated at construction and
//! immutable afterwards; any number of records may share one by reference.
//!
//! ## Validation
//!
//! | Check | `build` | `build_disjoint` |
//! |-------|---------|------------------|
//! | total length > 0 | yes | yes |
//! | unique, non-empty field names | yes | yes |
//! | kind parameters supported (int width, decimal scale, flag bits) | yes | yes |
//! | `offset + length <= total_length` for every field | yes | yes |
//! | `redefines` targets exist, no cycles | yes | yes |
//! | no two fields overlap unless related by `redefines` | no | yes |
//!
//! `build` deliberately allows arbitrary overlap: overlay schemas describe the
//! same bytes a second way. Ordinary record layouts should use
//! `build_disjoint` so a mistyped offset is caught when the schema is built.
//!
//! ## Redefinition
//!
//! Two ways to reinterpret bytes are supported:
//!
//! - **In-schema**: a field declared with `.redefines("a")` may overlap `a`
//!   (legacy `INT(32) c = a`). Both are addressed through the same record.
//! - **Overlay schema**: `base.redefine(name, fields)` builds a second schema
//!   over the same byte length; a record is bound to it with
//!   `Record::view_as`, without copying.
//!
//! ```text
//!  offset   0    2    4    6                12
//!  base     | a0 | a1 | a2 |   b (text 6)    |
//!  overlay  |   c (int32)  |
//! ```

mod builder;
mod field;

pub use builder::SchemaBuilder;
pub use field::{FieldDescriptor, FieldKind, FlagSet};

use hashbrown::HashMap;

use crate::error::{MarshalError, Result};

#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    by_name: HashMap<String, usize>,
    total_length: usize,
    redefines: Option<String>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>, total_length: usize) -> SchemaBuilder {
        SchemaBuilder::new(name, total_length)
    }

    /// Builds a schema without checking field overlap.
    pub fn build(
        name: impl Into<String>,
        total_length: usize,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self> {
        Self::validated(name.into(), total_length, fields, None, false)
    }

    /// Builds a schema whose fields may only overlap through declared
    /// redefinitions.
    pub fn build_disjoint(
        name: impl Into<String>,
        total_length: usize,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self> {
        Self::validated(name.into(), total_length, fields, None, true)
    }

    /// Builds an overlay schema reinterpreting this schema's bytes.
    pub fn redefine(&self, name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self> {
        Self::validated(
            name.into(),
            self.total_length,
            fields,
            Some(self.name.clone()),
            false,
        )
    }

    pub(crate) fn validated(
        name: String,
        total_length: usize,
        fields: Vec<FieldDescriptor>,
        redefines: Option<String>,
        disjoint: bool,
    ) -> Result<Self> {
        if total_length == 0 {
            return Err(MarshalError::schema(format!(
                "schema '{}' has zero total length",
                name
            )));
        }

        let mut by_name = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            if field.name().is_empty() {
                return Err(MarshalError::schema(format!(
                    "schema '{}' has a field with an empty name",
                    name
                )));
            }
            if by_name.insert(field.name().to_string(), idx).is_some() {
                return Err(MarshalError::schema(format!(
                    "schema '{}' declares field '{}' twice",
                    name,
                    field.name()
                )));
            }
            field.kind().validate().map_err(|e| match e {
                MarshalError::Schema { detail } => MarshalError::schema(format!(
                    "field '{}' of '{}': {}",
                    field.name(),
                    name,
                    detail
                )),
                other => other,
            })?;
            if field.occurs_count() == 0 {
                return Err(MarshalError::schema(format!(
                    "field '{}' of '{}' occurs zero times",
                    field.name(),
                    name
                )));
            }
            if field.end() > total_length {
                return Err(MarshalError::schema(format!(
                    "field '{}' ({} bytes at offset {}) exceeds record length {} of '{}'",
                    field.name(),
                    field.length(),
                    field.offset(),
                    total_length,
                    name
                )));
            }
        }

        let schema = Self {
            name,
            fields,
            by_name,
            total_length,
            redefines,
        };

        for field in &schema.fields {
            schema.redefinition_root(field)?;
        }
        if disjoint {
            schema.check_disjoint()?;
        }

        tracing::debug!(
            schema = %schema.name,
            fields = schema.fields.len(),
            total_length = schema.total_length,
            overlay_of = schema.redefines.as_deref().unwrap_or("-"),
            "built record schema"
        );
        Ok(schema)
    }

    /// Follows `redefines` links to the field that owns the bytes.
    fn redefinition_root<'a>(&'a self, field: &'a FieldDescriptor) -> Result<&'a str> {
        let mut current = field;
        for _ in 0..=self.fields.len() {
            let Some(base) = current.redefined_field() else {
                return Ok(current.name());
            };
            current = self.find(base).ok_or_else(|| {
                MarshalError::schema(format!(
                    "field '{}' of '{}' redefines unknown field '{}'",
                    current.name(),
                    self.name,
                    base
                ))
            })?;
        }
        Err(MarshalError::schema(format!(
            "redefinition cycle through field '{}' of '{}'",
            field.name(),
            self.name
        )))
    }

    fn check_disjoint(&self) -> Result<()> {
        for (i, a) in self.fields.iter().enumerate() {
            for b in &self.fields[i + 1..] {
                if !a.overlaps(b) {
                    continue;
                }
                if self.redefinition_root(a)? == self.redefinition_root(b)? {
                    continue;
                }
                return Err(MarshalError::schema(format!(
                    "fields '{}' [{}..{}) and '{}' [{}..{}) of '{}' overlap",
                    a.name(),
                    a.offset(),
                    a.end(),
                    b.name(),
                    b.offset(),
                    b.end(),
                    self.name
                )));
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_length(&self) -> usize {
        self.total_length
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn find(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn field(&self, name: &str) -> Result<&FieldDescriptor> {
        self.find(name)
            .ok_or_else(|| MarshalError::unknown_field(name))
    }

    /// Name of the schema this one overlays, if it was built by `redefine`.
    pub fn redefines(&self) -> Option<&str> {
        self.redefines.as_deref()
    }
}
