//! Integration test suite.
//!
//! Covers the public surface end to end with derived types:
//! 1. Cache build, merge and loading
//! 2. Field translation through `#[derive(Translatable)]`
//! 3. Graph translation over shared and cyclic objects
//! 4. Parallel batches and sessions

pub mod cache_tests;
pub mod graph_tests;
pub mod helpers;
pub mod parallel_tests;
pub mod translation_tests;
