//! Snippet model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, Syncable};

/// A code snippet
///
/// Field names follow the API wire format (camelCase, ISO timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Identity, provisional until the remote acknowledges creation
    pub id: EntityId,
    /// Snippet title
    pub title: String,
    /// Snippet body
    pub content: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Language the snippet is written in
    pub language: String,
    /// Owning user
    pub user_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Attached tag identities
    #[serde(default)]
    pub tag_ids: Vec<EntityId>,
}

/// Creation payload for a snippet (no identity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetDraft {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub language: String,
    #[serde(default)]
    pub tag_ids: Vec<EntityId>,
}

impl Syncable for Snippet {
    type Draft = SnippetDraft;

    const KIND: &'static str = "snippets";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: &SnippetDraft, id: EntityId, user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            description: draft.description.clone(),
            language: draft.language.clone(),
            user_id,
            created_at: now,
            updated_at: now,
            tag_ids: draft.tag_ids.clone(),
        }
    }

    fn matches_draft(&self, draft: &SnippetDraft) -> bool {
        self.title == draft.title && self.content == draft.content
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn draft() -> SnippetDraft {
        SnippetDraft {
            title: "binary search".to_string(),
            content: "fn bsearch() {}".to_string(),
            description: None,
            language: "rust".to_string(),
            tag_ids: vec![EntityId::new(7)],
        }
    }

    #[test]
    fn test_from_draft_copies_fields() {
        let now = Utc::now();
        let snippet = Snippet::from_draft(&draft(), EntityId::new(42), 3, now);
        assert_eq!(snippet.id, EntityId::new(42));
        assert_eq!(snippet.title, "binary search");
        assert_eq!(snippet.user_id, 3);
        assert_eq!(snippet.created_at, now);
        assert_eq!(snippet.created_at, snippet.updated_at);
        assert_eq!(snippet.tag_ids, vec![EntityId::new(7)]);
    }

    #[test]
    fn test_matches_draft_on_title_and_content() {
        let snippet = Snippet::from_draft(&draft(), EntityId::new(1), 0, Utc::now());
        assert!(snippet.matches_draft(&draft()));

        let mut other = draft();
        other.content = "fn linear() {}".to_string();
        assert!(!snippet.matches_draft(&other));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let snippet = Snippet::from_draft(&draft(), EntityId::new(1), 2, Utc::now());
        let json = serde_json::to_string(&snippet).unwrap();
        assert!(json.contains("\"userId\":2"));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"tagIds\""));
    }
}
