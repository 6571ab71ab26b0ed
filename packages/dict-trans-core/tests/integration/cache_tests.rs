//! Cache build, merge, lookup and loading.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use ntest::timeout;
use tempfile::NamedTempFile;

use dict_trans_core::{CacheHandle, DictCache, DictEntry, DictError, DictionaryLookup};

use super::helpers::sample_cache;

#[test]
fn test_build_groups_by_dictionary() {
    let cache = sample_cache();
    assert_eq!(cache.len(), 7);
    assert_eq!(cache.dictionary("hobby").unwrap().len(), 3);
    assert_eq!(
        cache.dict_names(),
        vec!["category", "city", "gender", "gender_short", "hobby", "level", "status"]
    );
}

#[test]
fn test_merge_earlier_cache_wins() {
    let a = DictCache::build(vec![DictEntry::new("d", "1", "X")]);
    let b = DictCache::build(vec![
        DictEntry::new("d", "1", "Y"),
        DictEntry::new("e", "1", "Z"),
    ]);

    let ab = DictCache::merge([&a, &b]);
    assert_eq!(ab.lookup("d", "1").unwrap(), "X");
    assert_eq!(ab.lookup("e", "1").unwrap(), "Z");

    let ba = DictCache::merge([&b, &a]);
    assert_eq!(ba.lookup("d", "1").unwrap(), "Y");
}

#[test]
fn test_merge_replaces_whole_dictionaries() {
    let high = DictCache::build(vec![DictEntry::new("d", "1", "X")]);
    let low = DictCache::build(vec![
        DictEntry::new("d", "1", "Y"),
        DictEntry::new("d", "2", "W"),
    ]);

    let merged = DictCache::merge([&high, &low]);

    // Dictionaries are the unit of precedence, not individual codes
    assert!(matches!(
        merged.lookup("d", "2"),
        Err(DictError::UnknownCode { .. })
    ));
}

#[test]
fn test_load_from_json_file() -> anyhow::Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"[
            {{"dictCode": "gender", "code": "M", "meaning": "Male", "sortNum": 2}},
            {{"dictCode": "gender", "code": "F", "meaning": "Female", "sortNum": 1}},
            {{"dictCode": "status", "code": "A", "meaning": "Active"}}
        ]"#
    )?;

    let cache = DictCache::from_json_reader(std::fs::File::open(file.path())?)?;

    assert_eq!(cache.lookup("gender", "M")?, "Male");
    let ordered: Vec<&str> = cache
        .dictionary("gender")
        .unwrap()
        .sorted_entries()
        .into_iter()
        .map(|e| e.code.as_str())
        .collect();
    assert_eq!(ordered, vec!["F", "M"]);
    Ok(())
}

#[test]
fn test_lookup_is_deterministic() {
    let cache = sample_cache();
    for _ in 0..100 {
        assert_eq!(cache.lookup_meaning("status", "D").unwrap(), "Disabled");
    }
}

#[timeout(10000)]
#[test]
fn test_lookups_during_reload() {
    let handle = Arc::new(CacheHandle::new(sample_cache()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let meaning = handle.lookup_meaning("gender", "M").unwrap();
                    assert!(meaning == "Male" || meaning == "Man");
                }
            })
        })
        .collect();

    for i in 0..50 {
        let meaning = if i % 2 == 0 { "Man" } else { "Male" };
        handle.reload(vec![DictEntry::new("gender", "M", meaning)]);
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
