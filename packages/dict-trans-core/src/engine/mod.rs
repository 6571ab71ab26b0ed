//! Translation engine: resolves coded field values through a dictionary
//! lookup and rewrites them in place.
//!
//! Translation is best-effort. Each field is handled by a fallible step
//! returning `Result`; the per-object loop in [`TranslationEngine`] is the
//! one place where field failures are logged and discarded, leaving the
//! field with its original value.

mod overrides;
mod walk;

use std::sync::Arc;

use serde_json::Value;

use crate::batch::{TaskHandle, WorkerPool};
use crate::cache::DictionaryLookup;
use crate::error::Result;
use crate::graph::{field_not_found, Shared, SharedNode, Translatable};
use crate::meta::{
    code_string, FieldDescriptor, FieldResolver, ResolvedFields, TranslationDirective,
    UNBOUNDED_DEPTH,
};

pub use overrides::FieldOverrides;
use walk::GraphWalk;

/// Counters reported by a translation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Objects whose fields were processed
    pub objects: usize,
    /// Fields rewritten
    pub translated: usize,
    /// Fields left untouched because of a lookup or access failure
    pub failed: usize,
}

impl TranslationStats {
    fn absorb(&mut self, other: TranslationStats) {
        self.objects += other.objects;
        self.translated += other.translated;
        self.failed += other.failed;
    }
}

enum FieldOutcome {
    Translated,
    Skipped,
}

/// Metadata-driven translator bound to a dictionary lookup.
///
/// Cheap to clone; clones share the lookup and the field resolver.
#[derive(Clone)]
pub struct TranslationEngine {
    lookup: Arc<dyn DictionaryLookup>,
    resolver: Arc<FieldResolver>,
    ancestor_depth: i32,
}

impl std::fmt::Debug for TranslationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationEngine")
            .field("ancestor_depth", &self.ancestor_depth)
            .field("resolved_types", &self.resolver.cached_len())
            .finish()
    }
}

impl TranslationEngine {
    /// Creates an engine with its own field resolver.
    pub fn new(lookup: Arc<dyn DictionaryLookup>) -> Self {
        Self::with_resolver(lookup, Arc::new(FieldResolver::new()))
    }

    /// Creates an engine sharing an existing field resolver.
    pub fn with_resolver(lookup: Arc<dyn DictionaryLookup>, resolver: Arc<FieldResolver>) -> Self {
        Self {
            lookup,
            resolver,
            ancestor_depth: UNBOUNDED_DEPTH,
        }
    }

    /// Limits how many ancestor levels contribute fields (-1 = unbounded).
    pub fn with_ancestor_depth(mut self, depth: i32) -> Self {
        self.ancestor_depth = depth;
        self
    }

    /// Ancestor depth used for field resolution.
    pub fn ancestor_depth(&self) -> i32 {
        self.ancestor_depth
    }

    /// Translates the fields of one object. Nested objects are not visited.
    pub fn translate<T>(&self, target: &mut T, overrides: Option<&FieldOverrides>) -> TranslationStats
    where
        T: Translatable + ?Sized,
    {
        self.translate_fields(target, overrides)
    }

    /// Translates an object and every nested user-type object reachable from it.
    ///
    /// Each object is processed at most once per call, so cyclic graphs
    /// terminate.
    pub fn translate_graph<T>(
        &self,
        target: &mut T,
        overrides: Option<&FieldOverrides>,
    ) -> TranslationStats
    where
        T: Translatable,
    {
        let mut walk = GraphWalk::new(self, overrides);
        walk.run_owned(target);
        walk.stats
    }

    /// Translates the fields of a shared object.
    pub fn translate_shared<T>(
        &self,
        node: &Shared<T>,
        overrides: Option<&FieldOverrides>,
    ) -> TranslationStats
    where
        T: Translatable,
    {
        let mut guard = node.write();
        self.translate_fields(&mut *guard, overrides)
    }

    /// Graph translation starting at a shared object.
    ///
    /// The root counts as visited, so children referring back to it are
    /// skipped instead of re-locking it.
    pub fn translate_graph_shared<T>(
        &self,
        node: &Shared<T>,
        overrides: Option<&FieldOverrides>,
    ) -> TranslationStats
    where
        T: Translatable + Send + Sync + 'static,
    {
        let root: SharedNode = node.clone();
        let mut walk = GraphWalk::new(self, overrides);
        walk.run_shared(root);
        walk.stats
    }

    /// Translates each element in order, without descending into children.
    pub fn translate_list<T>(&self, items: &mut [T], overrides: Option<&FieldOverrides>) -> TranslationStats
    where
        T: Translatable,
    {
        let mut stats = TranslationStats::default();
        for item in items.iter_mut() {
            stats.absorb(self.translate(item, overrides));
        }
        stats
    }

    /// Graph-translates each element in order, each with a fresh visited set.
    pub fn translate_graph_list<T>(
        &self,
        items: &mut [T],
        overrides: Option<&FieldOverrides>,
    ) -> TranslationStats
    where
        T: Translatable,
    {
        let mut stats = TranslationStats::default();
        for item in items.iter_mut() {
            stats.absorb(self.translate_graph(item, overrides));
        }
        stats
    }

    /// Submits one graph translation task per element to `pool`.
    ///
    /// With `block`, waits for every task before returning; a failed or
    /// cancelled task is logged and waiting continues with the rest. The
    /// handles are returned either way so callers can inspect outcomes.
    pub fn translate_list_parallel<T>(
        &self,
        items: &[Shared<T>],
        overrides: Option<&FieldOverrides>,
        pool: &dyn WorkerPool,
        block: bool,
    ) -> Vec<TaskHandle>
    where
        T: Translatable + Send + Sync + 'static,
    {
        let overrides = overrides.cloned().map(Arc::new);

        let handles: Vec<TaskHandle> = items
            .iter()
            .map(|item| {
                let engine = self.clone();
                let item = Arc::clone(item);
                let overrides = overrides.clone();
                pool.submit(Box::new(move || {
                    engine.translate_graph_shared(&item, overrides.as_deref());
                }))
            })
            .collect();

        tracing::debug!("Submitted {} translation tasks (block={})", handles.len(), block);

        if block {
            crate::batch::wait_all(&handles);
        }
        handles
    }

    /// Translates every resolved field of `target`, discarding field failures.
    fn translate_fields<T>(&self, target: &mut T, overrides: Option<&FieldOverrides>) -> TranslationStats
    where
        T: Translatable + ?Sized,
    {
        let fields = self
            .resolver
            .resolve_fields(target.descriptor(), self.ancestor_depth);
        let mut stats = TranslationStats {
            objects: 1,
            ..Default::default()
        };

        for field in fields.iter() {
            match self.translate_field(target, &fields, field, overrides) {
                Ok(FieldOutcome::Translated) => stats.translated += 1,
                Ok(FieldOutcome::Skipped) => {}
                Err(e) => {
                    tracing::debug!("Field {} left untranslated: {}", field.id(), e);
                    stats.failed += 1;
                }
            }
        }
        stats
    }

    fn translate_field<T>(
        &self,
        target: &mut T,
        fields: &ResolvedFields,
        field: &'static FieldDescriptor,
        overrides: Option<&FieldOverrides>,
    ) -> Result<FieldOutcome>
    where
        T: Translatable + ?Sized,
    {
        let directive = field.directive.unwrap_or_default();
        let dict = match overrides
            .and_then(|o| o.get(field.name))
            .or(directive.dict_code())
        {
            Some(dict) => dict,
            None => return Ok(FieldOutcome::Skipped),
        };

        let id = field.id();
        let Some(raw) = target.read_field(&id)? else {
            return Ok(FieldOutcome::Skipped);
        };
        let Some(code) = code_string(&raw) else {
            return Ok(FieldOutcome::Skipped);
        };

        let meaning = self.resolve_meaning(dict, &code, &directive)?;

        match directive.redirect_targets(field.name) {
            None => target.write_field(&id, Value::String(meaning))?,
            Some((before, over)) => {
                let before = id.sibling(before);
                let over = id.sibling(over);
                for target_id in [&before, &over] {
                    if !fields.contains(target_id) {
                        return Err(field_not_found(target_id));
                    }
                }
                // Raw code first, meaning second: when both targets are the
                // same field the meaning must be what remains.
                target.write_field(&before, raw)?;
                target.write_field(&over, Value::String(meaning))?;
            }
        }
        Ok(FieldOutcome::Translated)
    }

    fn resolve_meaning(
        &self,
        dict: &str,
        code: &str,
        directive: &TranslationDirective,
    ) -> Result<String> {
        match directive.split_symbol() {
            Some(split) => {
                let meanings = code
                    .split(split)
                    .map(|sub| self.lookup.lookup_meaning(dict, sub))
                    .collect::<Result<Vec<String>>>()?;
                Ok(meanings.join(directive.join_symbol()))
            }
            None => self.lookup.lookup_meaning(dict, code),
        }
    }
}
