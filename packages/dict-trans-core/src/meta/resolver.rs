//! Field resolution across a type and its ancestors.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::descriptor::{FieldDescriptor, FieldId, TypeDescriptor};

/// Ancestor depth meaning "climb until there is no ancestor".
pub const UNBOUNDED_DEPTH: i32 = -1;

/// Fields of a type keyed by qualified identity, in declaration order.
///
/// Own fields come first, followed by each ancestor level in turn.
#[derive(Debug, Clone, Default)]
pub struct ResolvedFields {
    fields: Vec<&'static FieldDescriptor>,
    index: HashMap<FieldId, usize>,
}

impl ResolvedFields {
    fn push(&mut self, field: &'static FieldDescriptor) {
        let id = field.id();
        if self.index.contains_key(&id) {
            return;
        }
        self.index.insert(id, self.fields.len());
        self.fields.push(field);
    }

    /// Returns the field with the given identity.
    pub fn get(&self, id: &FieldId) -> Option<&'static FieldDescriptor> {
        self.index.get(id).map(|&i| self.fields[i])
    }

    /// Returns `true` if the identity is addressable.
    pub fn contains(&self, id: &FieldId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates fields in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        self.fields.iter().copied()
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields were resolved.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects the fields of `descriptor` and up to `max_depth` ancestor levels.
///
/// `-1` climbs without limit, `0` keeps declared fields only.
pub fn resolve_fields_uncached(descriptor: &'static TypeDescriptor, max_depth: i32) -> ResolvedFields {
    let mut resolved = ResolvedFields::default();
    let mut current = Some(descriptor);
    let mut depth = max_depth;

    while let Some(desc) = current {
        for field in desc.fields {
            resolved.push(field);
        }
        if depth == 0 {
            break;
        }
        if depth > 0 {
            depth -= 1;
        }
        current = desc.base();
    }

    resolved
}

/// Memoising field resolver.
///
/// Resolution is a pure function of `(type, depth)`, so results are cached
/// for the lifetime of the resolver and shared between threads. Types are
/// keyed by descriptor address; names are not required to be unique.
#[derive(Debug, Default)]
pub struct FieldResolver {
    cache: RwLock<HashMap<(usize, i32), Arc<ResolvedFields>>>,
}

impl FieldResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves fields, reusing an earlier result for the same key.
    pub fn resolve_fields(
        &self,
        descriptor: &'static TypeDescriptor,
        max_depth: i32,
    ) -> Arc<ResolvedFields> {
        let key = (
            std::ptr::from_ref(descriptor) as usize,
            max_depth.max(UNBOUNDED_DEPTH),
        );
        if let Some(found) = self.cache.read().get(&key) {
            return Arc::clone(found);
        }

        let resolved = Arc::new(resolve_fields_uncached(descriptor, key.1));
        let mut cache = self.cache.write();
        Arc::clone(cache.entry(key).or_insert(resolved))
    }

    /// Number of memoised resolutions.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }
}
