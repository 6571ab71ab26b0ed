//! Field metadata: directives, static descriptors, value conversion and
//! ancestor-aware field resolution.

mod descriptor;
mod directive;
mod resolver;
mod value;

pub use descriptor::{FieldDescriptor, FieldId, TypeDescriptor};
pub use directive::TranslationDirective;
pub use resolver::{resolve_fields_uncached, FieldResolver, ResolvedFields, UNBOUNDED_DEPTH};
pub use value::{code_string, store_value, value_type, FieldValue, ValueMismatch};

/// Dynamic field value exchanged with [`Translatable`](crate::Translatable) types.
pub use serde_json::Value;
