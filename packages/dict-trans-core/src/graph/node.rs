//! The translatable object contract.

use serde_json::Value;

use super::ChildVisitor;
use crate::error::{DictError, Result};
use crate::meta::{FieldId, TypeDescriptor};

/// A type whose fields the engine can read, rewrite and descend through.
///
/// Usually implemented with `#[derive(Translatable)]`. Manual
/// implementations register a static [`TypeDescriptor`] and route
/// field access by [`FieldId`]; fields owned by an ancestor type are
/// delegated to the embedded ancestor value.
pub trait Translatable {
    /// Static descriptor of the implementing type.
    fn type_descriptor() -> &'static TypeDescriptor
    where
        Self: Sized;

    /// Descriptor of this value's type.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Reads a field. `Ok(None)` means the field currently holds nothing.
    ///
    /// # Errors
    /// `DictError::FieldNotFound` if the identity is not addressable.
    fn read_field(&self, field: &FieldId) -> Result<Option<Value>>;

    /// Writes a field.
    ///
    /// # Errors
    /// `DictError::FieldNotFound` or `DictError::TypeMismatch`.
    fn write_field(&mut self, field: &FieldId, value: Value) -> Result<()>;

    /// Hands every nested user-type child to `visitor`.
    fn visit_children(&mut self, _visitor: &mut dyn ChildVisitor) {}
}

/// Error for an identity a type does not expose.
pub fn field_not_found(field: &FieldId) -> DictError {
    DictError::FieldNotFound {
        owner: field.owner.to_string(),
        field: field.name.to_string(),
    }
}

// An absent value reads as empty everywhere, so translating `None` is a no-op.
impl<T: Translatable> Translatable for Option<T> {
    fn type_descriptor() -> &'static TypeDescriptor {
        T::type_descriptor()
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        T::type_descriptor()
    }

    fn read_field(&self, field: &FieldId) -> Result<Option<Value>> {
        match self {
            Some(inner) => inner.read_field(field),
            None => Ok(None),
        }
    }

    fn write_field(&mut self, field: &FieldId, value: Value) -> Result<()> {
        match self {
            Some(inner) => inner.write_field(field, value),
            None => Err(field_not_found(field)),
        }
    }

    fn visit_children(&mut self, visitor: &mut dyn ChildVisitor) {
        if let Some(inner) = self {
            inner.visit_children(visitor);
        }
    }
}

impl<T: Translatable> Translatable for Box<T> {
    fn type_descriptor() -> &'static TypeDescriptor {
        T::type_descriptor()
    }

    fn descriptor(&self) -> &'static TypeDescriptor {
        (**self).descriptor()
    }

    fn read_field(&self, field: &FieldId) -> Result<Option<Value>> {
        (**self).read_field(field)
    }

    fn write_field(&mut self, field: &FieldId, value: Value) -> Result<()> {
        (**self).write_field(field, value)
    }

    fn visit_children(&mut self, visitor: &mut dyn ChildVisitor) {
        (**self).visit_children(visitor);
    }
}
