//! Typed response records.
//!
//! Every record is declared through `schema!`, which derives the struct and its
//! [`Schema`](crate::populate::Schema) field table from the field types: `i64`
//! fields are integer-coerced, `f64` float-coerced, optional dates parsed in
//! the reference timezone, and `Option<String>` / `Value` fields passed through.

/// Resolves the JSON key of a schema field.
macro_rules! field_key {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $key:literal) => {
        $key
    };
}

/// Declares a response record together with its field table.
///
/// A field whose JSON key is not a valid Rust identifier takes an
/// `as "key"` suffix.
macro_rules! schema {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty $(as $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::populate::Schema for $name {
            const NAME: &'static str = stringify!($name);

            const FIELDS: &'static [$crate::populate::FieldSpec] = &[
                $(
                    $crate::populate::FieldSpec {
                        key: field_key!($field $(, $key)?),
                        coercion: <$ty as $crate::populate::FieldType>::COERCION,
                    },
                )*
            ];

            fn assign(&mut self, key: &str, value: $crate::populate::Coerced) {
                $(
                    if key == field_key!($field $(, $key)?) {
                        if let Some(v) = <$ty as $crate::populate::FieldType>::from_coerced(value) {
                            self.$field = v;
                        }
                        return;
                    }
                )*
            }
        }
    };
}

/// Implements [`Cleanable`] and a `quality()` accessor for cleaning records.
macro_rules! cleanable {
    ($($name:ident => $target:ident),* $(,)?) => {
        $(
            impl Cleanable for $name {
                const TARGET: CleanTarget = CleanTarget::$target;
            }

            impl $name {
                /// Interprets the `qc` code.
                pub fn quality(&self) -> QualityCode {
                    QualityCode::from(self.qc)
                }
            }
        )*
    };
}

mod address;
mod cdek;
mod person;
mod statistics;
mod vehicle;

pub use address::Address;
pub use cdek::Cdek;
pub use person::{Birthdate, Email, Name, Passport, Phone};
pub use statistics::{StatisticServices, Statistics};
pub use vehicle::Vehicle;

use crate::catalog::CleanTarget;
use crate::populate::Schema;

/// A record returned by one of the cleaning endpoints.
pub trait Cleanable: Schema {
    /// The endpoint that produces this record.
    const TARGET: CleanTarget;
}

cleanable! {
    Address => Address,
    Phone => Phone,
    Passport => Passport,
    Name => Name,
    Email => Email,
    Birthdate => Birthdate,
    Vehicle => Vehicle,
}

/// Confidence of a cleaning result, from the `qc` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityCode {
    /// Recognized with confidence, no manual check needed.
    Ok,
    /// Recognized with assumptions or not at all, check manually.
    Unsure,
    /// The input was empty or garbage.
    Invalid,
    /// A code this crate does not know about.
    Other(i64),
}

impl From<i64> for QualityCode {
    fn from(code: i64) -> Self {
        match code {
            0 => QualityCode::Ok,
            1 => QualityCode::Unsure,
            2 => QualityCode::Invalid,
            other => QualityCode::Other(other),
        }
    }
}
