use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::sector::SectorRef;

/// One user's filled-out form as persisted by the backend.
///
/// `id` is absent until the backend assigns one on first creation. The same
/// type is used as the request body, where the id is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub selected_sectors: Vec<SectorRef>,
    #[serde(default)]
    pub agree_to_terms: bool,
}

impl Submission {
    /// Returns the selected sector ids as a set.
    pub fn sector_ids(&self) -> BTreeSet<i64> {
        self.selected_sectors.iter().map(|s| s.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_omits_missing_id() {
        let body = Submission {
            id: None,
            name: "Alice".into(),
            selected_sectors: vec![SectorRef { id: 1 }],
            agree_to_terms: true,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "name": "Alice",
                "selectedSectors": [{"id": 1}],
                "agreeToTerms": true
            })
        );
    }

    #[test]
    fn response_with_full_sector_objects_is_accepted() {
        let json = r#"{
            "id": 42,
            "name": "Alice",
            "selectedSectors": [
                {"id": 2, "name": "B", "parentId": 1, "level": 1},
                {"id": 1, "name": "A", "parentId": null, "level": 0}
            ],
            "agreeToTerms": true
        }"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.id, Some(42));
        assert_eq!(submission.sector_ids(), BTreeSet::from([1, 2]));
    }

    #[test]
    fn sector_ids_deduplicates() {
        let submission = Submission {
            id: Some(1),
            name: "x".into(),
            selected_sectors: vec![SectorRef { id: 3 }, SectorRef { id: 3 }],
            agree_to_terms: false,
        };
        assert_eq!(submission.sector_ids(), BTreeSet::from([3]));
    }
}
