use std::collections::HashMap;
use std::string::ToString;

use crate::post::{ContentType, Sector};
use crate::post_filter::FilterSelection;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString { items }
    }

    /// Reads the listing selection from `?sector=`, `?type=` and `?q=`.
    /// Missing, empty or unrecognized sector/type values fall back to the
    /// "all" choice rather than erroring.
    pub fn get_selection(&self) -> FilterSelection {
        let sector = self
            .items
            .get("sector")
            .and_then(|value| Sector::parse(value));
        let content_type = self
            .items
            .get("type")
            .and_then(|value| ContentType::parse(value));
        let query = self.items.get("q").cloned().unwrap_or_default();

        FilterSelection {
            sector,
            content_type,
            query,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|value| value.as_str())
    }
}
