//! Bulk-load input record.

use serde::{Deserialize, Serialize};

/// Sort number assigned to entries loaded without one.
pub const DEFAULT_SORT_NUM: i32 = -1;

/// One dictionary record as delivered by an external dictionary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictEntry {
    /// Dictionary name (entries with an empty name are dropped at build)
    #[serde(default)]
    pub dict_code: String,
    /// Code stored in data records
    pub code: String,
    /// Human-readable meaning
    pub meaning: String,
    /// Presentation order within the dictionary
    #[serde(default)]
    pub sort_num: Option<i32>,
}

impl DictEntry {
    /// Creates an entry without a sort number.
    pub fn new(
        dict_code: impl Into<String>,
        code: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            dict_code: dict_code.into(),
            code: code.into(),
            meaning: meaning.into(),
            sort_num: None,
        }
    }

    /// Sets the sort number.
    pub fn with_sort_num(mut self, sort_num: i32) -> Self {
        self.sort_num = Some(sort_num);
        self
    }

    /// Sort number with the ingestion default applied.
    pub fn sort_num_or_default(&self) -> i32 {
        self.sort_num.unwrap_or(DEFAULT_SORT_NUM)
    }
}
