//! Journal entry aggregate and its validated draft form.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::UserId;

/// Maximum title length, mirroring the storage column width.
pub const TITLE_MAX_LEN: usize = 200;
/// Maximum length of the raw comma-separated tags string.
pub const TAGS_MAX_LEN: usize = 300;

/// Integer identifier assigned to an entry by the persistence layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wrap a raw store-assigned identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value for persistence adapters.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`EntryDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Title was empty once trimmed.
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX_LEN`] characters.
    TitleTooLong,
    /// Content was empty once trimmed.
    EmptyContent,
    /// Tags string exceeded [`TAGS_MAX_LEN`] characters.
    TagsTooLong,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong => write!(f, "title must be at most {TITLE_MAX_LEN} characters"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::TagsTooLong => write!(f, "tags must be at most {TAGS_MAX_LEN} characters"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

/// Validated mutable fields of an entry, shared by the add and edit flows.
///
/// ## Invariants
/// - `title` is trimmed, non-empty, and at most [`TITLE_MAX_LEN`] characters.
/// - `content` is trimmed and non-empty.
/// - `tags` holds the raw comma-separated string, at most [`TAGS_MAX_LEN`]
///   characters; an absent field normalises to the empty string.
///
/// # Examples
/// ```
/// use journal_backend::domain::EntryDraft;
///
/// let draft = EntryDraft::try_from_parts("Day 1", "Went hiking", Some("outdoors, hiking")).unwrap();
/// assert_eq!(draft.title(), "Day 1");
/// assert_eq!(draft.tags(), "outdoors, hiking");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    title: String,
    content: String,
    tags: String,
}

impl EntryDraft {
    /// Construct a draft from raw form fields.
    pub fn try_from_parts(
        title: &str,
        content: &str,
        tags: Option<&str>,
    ) -> Result<Self, EntryValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EntryValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(EntryValidationError::TitleTooLong);
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(EntryValidationError::EmptyContent);
        }

        let tags = tags.unwrap_or_default().trim();
        if tags.chars().count() > TAGS_MAX_LEN {
            return Err(EntryValidationError::TagsTooLong);
        }

        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
            tags: tags.to_owned(),
        })
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Entry body text.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Raw comma-separated tags string.
    pub fn tags(&self) -> &str {
        self.tags.as_str()
    }
}

/// A single journal entry owned by at most one user.
///
/// Timestamps are assigned explicitly by the journal service at create and
/// update call sites; the store applies no defaults or on-update hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    title: String,
    content: String,
    tags: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: Option<UserId>,
}

impl Entry {
    /// Rehydrate an entry from stored parts.
    pub const fn from_parts(
        id: EntryId,
        title: String,
        content: String,
        tags: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            tags,
            created_at,
            updated_at,
            user_id,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Entry body text.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Raw comma-separated tags string as stored.
    pub fn tags(&self) -> &str {
        self.tags.as_str()
    }

    /// Creation timestamp, immutable after creation.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent mutation.
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Owning user, if any. Normal flow always sets this; orphaned rows are
    /// tolerated at the schema level.
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Ordered sequence of trimmed, non-empty tag tokens.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use journal_backend::domain::{Entry, EntryId, UserId};
    ///
    /// let now = Utc::now();
    /// let entry = Entry::from_parts(
    ///     EntryId::new(1),
    ///     "Day 1".into(),
    ///     "Went hiking".into(),
    ///     "outdoors, hiking,  ,".into(),
    ///     now,
    ///     now,
    ///     Some(UserId::new(1)),
    /// );
    /// assert_eq!(entry.tag_list(), vec!["outdoors", "hiking"]);
    /// ```
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn entry_with_tags(tags: &str) -> Entry {
        let now = Utc::now();
        Entry::from_parts(
            EntryId::new(1),
            "Day 1".to_owned(),
            "Went hiking".to_owned(),
            tags.to_owned(),
            now,
            now,
            Some(UserId::new(1)),
        )
    }

    #[rstest]
    #[case("outdoors, hiking", vec!["outdoors", "hiking"])]
    #[case("outdoors,hiking", vec!["outdoors", "hiking"])]
    #[case("  spaced  ,  tags  ", vec!["spaced", "tags"])]
    #[case("trailing,,", vec!["trailing"])]
    #[case("", vec![])]
    #[case("   ", vec![])]
    fn tag_list_trims_and_drops_empty_tokens(#[case] tags: &str, #[case] expected: Vec<&str>) {
        assert_eq!(entry_with_tags(tags).tag_list(), expected);
    }

    #[rstest]
    #[case("", "content", None, EntryValidationError::EmptyTitle)]
    #[case("   ", "content", None, EntryValidationError::EmptyTitle)]
    #[case("title", "", None, EntryValidationError::EmptyContent)]
    #[case("title", "  ", None, EntryValidationError::EmptyContent)]
    fn draft_rejects_missing_required_fields(
        #[case] title: &str,
        #[case] content: &str,
        #[case] tags: Option<&str>,
        #[case] expected: EntryValidationError,
    ) {
        let err = EntryDraft::try_from_parts(title, content, tags).expect_err("invalid draft");
        assert_eq!(err, expected);
    }

    #[test]
    fn draft_rejects_oversized_title() {
        let title = "x".repeat(TITLE_MAX_LEN + 1);
        let err = EntryDraft::try_from_parts(&title, "content", None).expect_err("too long");
        assert_eq!(err, EntryValidationError::TitleTooLong);
    }

    #[test]
    fn draft_rejects_oversized_tags() {
        let tags = "t".repeat(TAGS_MAX_LEN + 1);
        let err =
            EntryDraft::try_from_parts("title", "content", Some(&tags)).expect_err("too long");
        assert_eq!(err, EntryValidationError::TagsTooLong);
    }

    #[test]
    fn draft_defaults_absent_tags_to_empty() {
        let draft = EntryDraft::try_from_parts("title", "content", None).expect("valid draft");
        assert_eq!(draft.tags(), "");
    }

    #[test]
    fn draft_accepts_boundary_lengths() {
        let title = "x".repeat(TITLE_MAX_LEN);
        let tags = "t".repeat(TAGS_MAX_LEN);
        let draft =
            EntryDraft::try_from_parts(&title, "content", Some(&tags)).expect("boundary draft");
        assert_eq!(draft.title().chars().count(), TITLE_MAX_LEN);
    }
}
