//! Tag model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, Syncable};

/// A tag for organizing snippets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Identity, provisional until the remote acknowledges creation
    pub id: EntityId,
    /// Tag name
    pub name: String,
    /// Owning user
    pub user_id: i64,
    /// Hidden tags are excluded from default listings
    pub is_hidden: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a tag (no identity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDraft {
    pub name: String,
    #[serde(default)]
    pub is_hidden: bool,
}

impl Syncable for Tag {
    type Draft = TagDraft;

    const KIND: &'static str = "tags";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: &TagDraft, id: EntityId, user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            user_id,
            is_hidden: draft.is_hidden,
            created_at: now,
        }
    }

    fn matches_draft(&self, draft: &TagDraft) -> bool {
        self.name == draft.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_defaults_visible() {
        let draft = TagDraft {
            name: "rust".to_string(),
            is_hidden: false,
        };
        let tag = Tag::from_draft(&draft, EntityId::new(9), 4, Utc::now());
        assert_eq!(tag.name, "rust");
        assert_eq!(tag.user_id, 4);
        assert!(!tag.is_hidden);
    }

    #[test]
    fn test_matches_draft_on_name() {
        let draft = TagDraft {
            name: "rust".to_string(),
            is_hidden: true,
        };
        let tag = Tag::from_draft(&draft, EntityId::new(9), 4, Utc::now());
        assert!(tag.matches_draft(&TagDraft {
            name: "rust".to_string(),
            is_hidden: false,
        }));
        assert!(!tag.matches_draft(&TagDraft {
            name: "go".to_string(),
            is_hidden: true,
        }));
    }
}
