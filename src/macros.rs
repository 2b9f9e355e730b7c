//! # Internal Macros
//!
//! This module provides macros for reducing accessor boilerplate over
//! name-addressed records.
//!
//! ## record_accessors!
//!
//! Generates a thin typed wrapper around a [`Record`](crate::record::Record)
//! bound to one named schema, with a getter and a `set_` setter per listed
//! field. Every accessor still goes through the schema by name, so the wrapper
//! adds no layout knowledge of its own.
//!
//! ### Usage
//!
//! ```ignore
//! record_accessors! {
//!     pub struct CustomerRecord = "customer" {
//!         id: int,
//!         name: text,
//!         account_balance: decimal,
//!         is_active: flag("flags"),
//!         street: text @ "address.street",
//!     }
//! }
//!
//! // Generates, among others:
//! // pub fn id(&self) -> Result<i64>
//! // pub fn set_id(&mut self, val: i64) -> Result<()>
//! // pub fn is_active(&self) -> Result<bool>            // flag "is_active" of word "flags"
//! // pub fn set_is_active(&mut self, val: bool) -> Result<()>
//! // pub fn street(&self) -> Result<String>             // field "address.street"
//! ```
//!
//! Supported kinds: `int` (`i64`), `text` (`String` / `&str`), `decimal`
//! (`Decimal`), `bytes` (`Vec<u8>` / `&[u8]`) and `flag(word)` (`bool`).

/// Generates a typed wrapper with per-field getters and setters.
#[macro_export]
macro_rules! record_accessors {
    (@key $field:ident) => { stringify!($field) };
    (@key $field:ident $key:literal) => { $key };

    (@get $field:ident, int, [], $key:expr) => {
        #[inline]
        pub fn $field(&self) -> $crate::error::Result<i64> {
            self.record.get_int($key)
        }
    };
    (@get $field:ident, text, [], $key:expr) => {
        #[inline]
        pub fn $field(&self) -> $crate::error::Result<String> {
            self.record.get_text($key)
        }
    };
    (@get $field:ident, decimal, [], $key:expr) => {
        #[inline]
        pub fn $field(&self) -> $crate::error::Result<$crate::decimal::Decimal> {
            self.record.get_decimal($key)
        }
    };
    (@get $field:ident, bytes, [], $key:expr) => {
        #[inline]
        pub fn $field(&self) -> $crate::error::Result<Vec<u8>> {
            self.record.get_bytes($key)
        }
    };
    (@get $field:ident, flag, [$word:literal], $key:expr) => {
        #[inline]
        pub fn $field(&self) -> $crate::error::Result<bool> {
            self.record.get_flag($word, $key)
        }
    };

    (@set $field:ident, int, [], $key:expr) => {
        ::paste::paste! {
            #[inline]
            pub fn [<set_ $field>](&mut self, val: i64) -> $crate::error::Result<()> {
                self.record.set_int($key, val)
            }
        }
    };
    (@set $field:ident, text, [], $key:expr) => {
        ::paste::paste! {
            #[inline]
            pub fn [<set_ $field>](&mut self, val: &str) -> $crate::error::Result<()> {
                self.record.set_text($key, val)
            }
        }
    };
    (@set $field:ident, decimal, [], $key:expr) => {
        ::paste::paste! {
            #[inline]
            pub fn [<set_ $field>](
                &mut self,
                val: $crate::decimal::Decimal,
            ) -> $crate::error::Result<()> {
                self.record.set_decimal($key, val)
            }
        }
    };
    (@set $field:ident, bytes, [], $key:expr) => {
        ::paste::paste! {
            #[inline]
            pub fn [<set_ $field>](&mut self, val: &[u8]) -> $crate::error::Result<()> {
                self.record.set_bytes($key, val)
            }
        }
    };
    (@set $field:ident, flag, [$word:literal], $key:expr) => {
        ::paste::paste! {
            #[inline]
            pub fn [<set_ $field>](&mut self, val: bool) -> $crate::error::Result<()> {
                self.record.set_flag($word, $key, val)
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $schema:literal {
            $( $field:ident : $kind:ident $( ( $word:literal ) )? $( @ $key:literal )? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name<'s, B = Vec<u8>> {
            record: $crate::record::Record<'s, B>,
        }

        impl<'s, B: AsRef<[u8]>> $name<'s, B> {
            pub const SCHEMA_NAME: &'static str = $schema;

            /// Wraps `record`, which must be bound to the schema named
            /// `SCHEMA_NAME`.
            pub fn from_record(record: $crate::record::Record<'s, B>) -> $crate::error::Result<Self> {
                if record.schema().name() != $schema {
                    return Err($crate::error::MarshalError::Schema {
                        detail: format!(
                            "{} expects a '{}' record, got '{}'",
                            stringify!($name),
                            $schema,
                            record.schema().name()
                        ),
                    });
                }
                Ok(Self { record })
            }

            pub fn record(&self) -> &$crate::record::Record<'s, B> {
                &self.record
            }

            pub fn into_record(self) -> $crate::record::Record<'s, B> {
                self.record
            }

            $(
                $crate::record_accessors!(
                    @get $field, $kind, [$($word)?],
                    $crate::record_accessors!(@key $field $($key)?)
                );
            )*
        }

        impl<'s, B: AsRef<[u8]> + AsMut<[u8]>> $name<'s, B> {
            pub fn record_mut(&mut self) -> &mut $crate::record::Record<'s, B> {
                &mut self.record
            }

            $(
                $crate::record_accessors!(
                    @set $field, $kind, [$($word)?],
                    $crate::record_accessors!(@key $field $($key)?)
                );
            )*
        }

        impl<'s> $name<'s, Vec<u8>> {
            /// A zero-filled standalone record.
            pub fn new(schema: &'s $crate::schema::RecordSchema) -> $crate::error::Result<Self> {
                Self::from_record($crate::record::Record::new(schema))
            }
        }

        impl<B: AsRef<[u8]>> ::std::fmt::Debug for $name<'_, B> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.record, f)
            }
        }
    };
}
