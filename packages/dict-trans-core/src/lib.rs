//! Dictionary cache and metadata-driven translation engine.
//!
//! Resolves coded field values (`"1"`, `"M"`) into human-readable meanings
//! using named dictionaries held in an immutable, hot-swappable cache.
//! Fields are marked for translation with `#[derive(Translatable)]` and
//! `#[dict(...)]` attributes, or with a per-call [`FieldOverrides`] map.
//!
//! ```
//! use std::sync::Arc;
//! use dict_trans_core::{DictCache, DictEntry, Translatable, TranslationEngine};
//!
//! #[derive(Translatable)]
//! struct User {
//!     #[dict(code = "gender")]
//!     gender: String,
//! }
//!
//! let cache = DictCache::build(vec![DictEntry::new("gender", "M", "Male")]);
//! let engine = TranslationEngine::new(Arc::new(cache));
//!
//! let mut user = User { gender: "M".to_string() };
//! engine.translate(&mut user, None);
//! assert_eq!(user.gender, "Male");
//! ```

extern crate self as dict_trans_core;

pub mod batch;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod meta;
pub mod session;

pub use batch::{TaskHandle, WorkerPool};
pub use cache::{CacheHandle, DictCache, DictEntry, DictionaryLookup};
pub use config::SessionConfig;
pub use engine::{FieldOverrides, TranslationEngine, TranslationStats};
pub use error::{DictError, Result};
pub use graph::{shared, Shared, Translatable};
pub use session::DictSession;

#[cfg(feature = "derive")]
pub use dict_trans_derive::Translatable;
