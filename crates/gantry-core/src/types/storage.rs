//! Object-storage records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A single bucket as reported by the object-storage listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket name.
    pub name: String,
    /// Creation time, serialized as ISO-8601.
    pub creation_date: Option<Timestamp>,
}

impl Bucket {
    /// Creates a new bucket record.
    pub fn new(name: impl Into<String>, creation_date: Option<Timestamp>) -> Self {
        Self {
            name: name.into(),
            creation_date,
        }
    }
}

/// Response body of the bucket listing endpoint.
///
/// Built only from a bucket sequence so `count` always equals `buckets.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketList {
    /// Number of buckets.
    pub count: usize,
    /// All buckets, in the order the storage API returned them.
    pub buckets: Vec<Bucket>,
}

impl From<Vec<Bucket>> for BucketList {
    fn from(buckets: Vec<Bucket>) -> Self {
        Self {
            count: buckets.len(),
            buckets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_has_zero_count() {
        let list = BucketList::from(Vec::new());
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, serde_json::json!({ "count": 0, "buckets": [] }));
    }

    #[test]
    fn creation_date_is_iso8601() {
        let created: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        let list = BucketList::from(vec![
            Bucket::new("a", Some(created)),
            Bucket::new("b", None),
        ]);

        assert_eq!(list.count, 2);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["buckets"][0]["creation_date"], "2024-01-01T00:00:00Z");
        assert!(json["buckets"][1]["creation_date"].is_null());
    }
}
