//! Shared fixtures for the integration tests.

use dict_trans_core::{DictCache, DictEntry, Shared, Translatable};

#[derive(Debug, Clone, Default, Translatable)]
pub struct Address {
    #[dict(code = "city")]
    pub city: String,
    pub street: String,
}

/// Common audit fields embedded by [`User`].
#[derive(Debug, Clone, Default, Translatable)]
pub struct Record {
    #[dict(code = "status", before_copy_to = "status_code", over_copy_to = "status_name")]
    pub status: Option<String>,
    pub status_code: Option<String>,
    pub status_name: String,
}

#[derive(Debug, Clone, Default, Translatable)]
pub struct User {
    #[dict(base)]
    pub record: Record,
    #[dict(code = "gender")]
    pub gender: String,
    #[dict(code = "hobby", split = ",", join = "|")]
    pub hobbies: String,
    pub nickname: String,
    pub level: i32,
    #[dict(nested)]
    pub address: Option<Address>,
    #[dict(nested)]
    pub friends: Vec<Shared<User>>,
    #[dict(skip)]
    pub password_hash: Vec<u8>,
}

impl User {
    pub fn new(gender: &str) -> Self {
        Self {
            gender: gender.to_string(),
            hobbies: "1".to_string(),
            ..Default::default()
        }
    }
}

/// Keyword field names go through `r#` identifiers.
#[derive(Debug, Clone, Default, Translatable)]
pub struct Category {
    #[dict(code = "category")]
    pub r#type: String,
}

pub fn sample_entries() -> Vec<DictEntry> {
    vec![
        DictEntry::new("gender", "M", "Male"),
        DictEntry::new("gender", "F", "Female"),
        DictEntry::new("gender_short", "M", "m"),
        DictEntry::new("hobby", "1", "Alpha"),
        DictEntry::new("hobby", "2", "Beta"),
        DictEntry::new("hobby", "3", "Gamma"),
        DictEntry::new("status", "A", "Active"),
        DictEntry::new("status", "D", "Disabled"),
        DictEntry::new("city", "BJ", "Beijing"),
        DictEntry::new("city", "SH", "Shanghai"),
        DictEntry::new("level", "3", "Gold"),
        DictEntry::new("category", "b", "Book"),
    ]
}

pub fn sample_cache() -> DictCache {
    DictCache::build(sample_entries())
}
