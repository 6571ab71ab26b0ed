//! Object graph contract: translatable values, nested children and shared
//! (possibly cyclic) nodes.
//!
//! Owned children (`T`, `Option<T>`, `Box<T>`, `Vec<T>`) form a tree and are
//! visited in place. Shared children (`Arc<RwLock<T>>`) may alias and form
//! cycles; the engine queues them and identifies them by address.

mod node;

use std::sync::Arc;

use parking_lot::RwLock;

pub use node::{field_not_found, Translatable};

/// Shared, lockable graph node.
pub type Shared<T> = Arc<RwLock<T>>;

/// Type-erased shared node handed to a [`ChildVisitor`].
pub type SharedNode = Arc<dyn GraphNode>;

/// Wraps a value as a shared graph node.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// Object identity used by the visited set.
///
/// Owned values are keyed by address and type name so that a child stored
/// at offset zero of its parent does not collide with the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Value reached by exclusive borrow
    Owned { addr: usize, type_name: &'static str },
    /// Value behind a shared node
    Shared { addr: usize },
}

impl NodeId {
    /// Identity of an owned value.
    pub fn owned(value: &dyn Translatable) -> Self {
        NodeId::Owned {
            addr: std::ptr::from_ref(value).cast::<()>() as usize,
            type_name: value.descriptor().type_name,
        }
    }
}

/// Receives the nested children of a value.
pub trait ChildVisitor {
    /// Called for a child owned by the parent.
    fn visit_owned(&mut self, child: &mut dyn Translatable);

    /// Called for a child behind a shared node.
    fn visit_shared(&mut self, child: SharedNode);
}

/// A shared node that can be locked for translation.
pub trait GraphNode: Send + Sync {
    /// Address identity of the node.
    fn node_id(&self) -> NodeId;

    /// Locks the node for writing and runs `f` on its value.
    fn with_value(&self, f: &mut dyn FnMut(&mut dyn Translatable));
}

impl<T> GraphNode for RwLock<T>
where
    T: Translatable + Send + Sync,
{
    fn node_id(&self) -> NodeId {
        NodeId::Shared {
            addr: self as *const Self as *const () as usize,
        }
    }

    fn with_value(&self, f: &mut dyn FnMut(&mut dyn Translatable)) {
        let mut guard = self.write();
        f(&mut *guard);
    }
}

/// A field type the graph walk can descend into.
///
/// `#[derive(Translatable)]` implements this for the derived type; the
/// container impls below let `#[dict(nested)]` fields wrap it.
pub trait Descend {
    /// Reports the children held by this field to `visitor`.
    fn descend(&mut self, visitor: &mut dyn ChildVisitor);
}

impl<T: Descend> Descend for Option<T> {
    fn descend(&mut self, visitor: &mut dyn ChildVisitor) {
        if let Some(inner) = self {
            inner.descend(visitor);
        }
    }
}

impl<T: Descend> Descend for Box<T> {
    fn descend(&mut self, visitor: &mut dyn ChildVisitor) {
        (**self).descend(visitor);
    }
}

impl<T: Descend> Descend for Vec<T> {
    fn descend(&mut self, visitor: &mut dyn ChildVisitor) {
        for item in self.iter_mut() {
            item.descend(visitor);
        }
    }
}

impl<T> Descend for Arc<RwLock<T>>
where
    T: Translatable + Send + Sync + 'static,
{
    fn descend(&mut self, visitor: &mut dyn ChildVisitor) {
        let node: SharedNode = self.clone();
        visitor.visit_shared(node);
    }
}
