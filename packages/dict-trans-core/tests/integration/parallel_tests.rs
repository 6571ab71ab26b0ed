//! Parallel batches and sessions.

use std::sync::Arc;

use ntest::timeout;

use dict_trans_core::batch::{snapshot, wait_all, InlinePool, RayonPool};
use dict_trans_core::{shared, DictCache, DictSession, FieldOverrides, SessionConfig, Shared};

use super::helpers::{sample_cache, sample_entries, User};

fn users(n: usize) -> Vec<Shared<User>> {
    (0..n)
        .map(|i| shared(User::new(if i % 2 == 0 { "M" } else { "F" })))
        .collect()
}

#[timeout(10000)]
#[test]
fn test_session_parallel_batch_blocks() -> anyhow::Result<()> {
    let config = SessionConfig {
        worker_threads: 4,
        ..Default::default()
    };
    let session = DictSession::new(config, sample_entries())?;
    let items = users(200);

    let handles = session.translate_list_parallel(&items, None);

    assert_eq!(handles.len(), 200);
    assert!(handles.iter().all(|h| h.is_finished()));
    for (i, item) in items.iter().enumerate() {
        let expected = if i % 2 == 0 { "Male" } else { "Female" };
        assert_eq!(item.read().gender, expected);
    }
    Ok(())
}

#[timeout(10000)]
#[test]
fn test_non_blocking_batch_with_overrides() -> anyhow::Result<()> {
    let config = SessionConfig {
        worker_threads: 2,
        block_parallel_batches: false,
        ..Default::default()
    };
    let session = DictSession::new(config, sample_entries())?;
    let items = users(50);
    let overrides = FieldOverrides::new().with("gender", "gender_short");

    let handles = session.translate_list_parallel(&items, Some(&overrides));

    assert_eq!(wait_all(&handles), 0);
    for (i, item) in items.iter().enumerate() {
        // Only "M" exists in the short dictionary
        let expected = if i % 2 == 0 { "m" } else { "F" };
        assert_eq!(item.read().gender, expected);
    }
    Ok(())
}

#[timeout(10000)]
#[test]
fn test_snapshots_translate_independently() -> anyhow::Result<()> {
    let pool = RayonPool::new(2, "snapshot-test")?;
    let session = DictSession::with_pool(SessionConfig::default(), sample_cache(), Arc::new(pool))?;
    let original = shared(User::new("M"));
    let items = vec![snapshot(&original), snapshot(&original)];

    session.translate_list_parallel(&items, None);

    assert_eq!(original.read().gender, "M");
    assert!(items.iter().all(|u| u.read().gender == "Male"));
    Ok(())
}

#[test]
fn test_inline_session_after_reload() -> anyhow::Result<()> {
    let session = DictSession::with_pool(
        SessionConfig::default(),
        DictCache::new(),
        Arc::new(InlinePool),
    )?;
    let items = users(2);

    session.translate_list_parallel(&items, None);
    assert_eq!(items[0].read().gender, "M");

    session.reload(sample_entries());
    session.translate_list_parallel(&items, None);
    assert_eq!(items[0].read().gender, "Male");
    assert_eq!(items[1].read().gender, "Female");
    Ok(())
}
