//! Static type and field descriptors.

use std::fmt;

use super::directive::TranslationDirective;

/// Field identity qualified by its declaring type.
///
/// Same-named fields declared at different ancestor levels have different
/// owners and stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    /// Declaring type name
    pub owner: &'static str,
    /// Field name
    pub name: &'static str,
}

impl FieldId {
    /// Creates a field identity.
    pub const fn new(owner: &'static str, name: &'static str) -> Self {
        Self { owner, name }
    }

    /// Another field declared on the same type.
    pub const fn sibling(&self, name: &'static str) -> Self {
        Self {
            owner: self.owner,
            name,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.owner, self.name)
    }
}

/// A field visible to the translation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declaring type name
    pub owner: &'static str,
    /// Field name
    pub name: &'static str,
    /// Declarative directive, if any
    pub directive: Option<TranslationDirective>,
}

impl FieldDescriptor {
    /// Plain field without a directive.
    pub const fn plain(owner: &'static str, name: &'static str) -> Self {
        Self {
            owner,
            name,
            directive: None,
        }
    }

    /// Field carrying a directive.
    pub const fn with_directive(
        owner: &'static str,
        name: &'static str,
        directive: TranslationDirective,
    ) -> Self {
        Self {
            owner,
            name,
            directive: Some(directive),
        }
    }

    /// Qualified identity of this field.
    pub const fn id(&self) -> FieldId {
        FieldId::new(self.owner, self.name)
    }
}

/// Static description of a translatable type.
///
/// `base` links to the embedded ancestor type, if the type has one.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Fully qualified type name
    pub type_name: &'static str,
    /// Fields declared directly on this type
    pub fields: &'static [FieldDescriptor],
    /// Ancestor descriptor accessor
    pub base: Option<fn() -> &'static TypeDescriptor>,
}

impl TypeDescriptor {
    /// Returns the ancestor descriptor.
    pub fn base(&self) -> Option<&'static TypeDescriptor> {
        self.base.map(|f| f())
    }

    /// Returns a directly declared field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        let fields: &'static [FieldDescriptor] = self.fields;
        fields.iter().find(|f| f.name == name)
    }
}
