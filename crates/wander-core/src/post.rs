//! Social feed content model
//!
//! Mirrors the backend `posts`, `post_likes`, and `post_comments` rows.
//! Engagement counters are owned server-side: the client displays them
//! and optimistically predicts them during like/unlike, nothing more.

use crate::identifiers::{CommentId, PostId, PropertyId, UserId};
use crate::profile::Role;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Kind of post in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// Ordinary feed post
    Standard,
    /// Property showcase
    Showcase,
    /// Host/creator collaboration announcement
    Collaboration,
}

/// Moderation status; only approved posts appear in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting moderation
    Pending,
    /// Visible in the feed
    Approved,
    /// Hidden
    Rejected,
}

/// Audience a post is visible to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Everyone
    Public,
    /// Followers only
    Followers,
    /// Author only
    Private,
}

/// Media attachment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip
    Video,
}

/// A media attachment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMedia {
    /// Attachment kind
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Storage URL
    pub url: String,
    /// Preview image for videos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Pixel width, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Denormalized author snapshot joined onto feed rows.
///
/// A subset of `Profile` captured at query time; it can lag the live
/// profile row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAuthor {
    /// Author's user id
    pub id: UserId,
    /// Display name
    pub full_name: Option<String>,
    /// Handle
    pub username: Option<String>,
    /// Avatar reference
    pub avatar_url: Option<String>,
    /// Author's role badge
    pub role: Option<Role>,
    /// Verified badge
    pub is_verified: bool,
}

/// A feed post row with denormalized author and viewer-interaction flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Row id
    pub id: PostId,
    /// Authoring user
    pub author_id: UserId,

    // Content
    /// Body text
    pub content: String,
    /// Attached media, in display order
    pub media: Vec<PostMedia>,
    /// Post kind
    #[serde(rename = "type")]
    pub post_type: PostType,

    // Property/Collaboration link
    /// Linked property listing, for showcases
    pub property_id: Option<PropertyId>,
    /// Linked collaboration, when the post announces one
    pub collaboration_id: Option<Uuid>,

    // Engagement (server-owned; client only displays and predicts)
    /// Like count
    pub likes_count: i64,
    /// Comment count
    pub comments_count: i64,
    /// Repost count
    pub reposts_count: i64,
    /// View count
    pub views_count: i64,

    // Status
    /// Moderation status
    pub approval_status: ApprovalStatus,
    /// Pinned to the author's profile
    pub is_pinned: bool,
    /// Audience
    pub visibility: Visibility,

    // Timestamps
    /// Row creation time; feed ordering key
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last row update time
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,

    // Relations (populated by the feed query)
    /// Author snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<PostAuthor>,

    // Viewer interaction state
    /// Whether the current viewer liked this post
    #[serde(default)]
    pub is_liked: bool,
    /// Whether the current viewer reposted this post
    #[serde(default)]
    pub is_reposted: bool,
    /// Whether the current viewer bookmarked this post
    #[serde(default)]
    pub is_bookmarked: bool,
}

/// Fields required to create a post; everything else is server-assigned.
///
/// New posts enter moderation as `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    /// Authoring user
    pub author_id: UserId,
    /// Body text
    pub content: String,
    /// Attached media
    pub media: Vec<PostMedia>,
    /// Post kind
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// Audience
    pub visibility: Visibility,
    /// Linked property, for showcases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
}

/// Denormalized commenter snapshot joined onto comment rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    /// Commenter's user id
    pub id: UserId,
    /// Display name
    pub full_name: Option<String>,
    /// Handle
    pub username: Option<String>,
    /// Avatar reference
    pub avatar_url: Option<String>,
    /// Verified badge
    pub is_verified: bool,
}

/// A comment row, optionally threaded under a parent comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Row id
    pub id: CommentId,
    /// The post commented on
    pub post_id: PostId,
    /// Commenting user
    pub user_id: UserId,
    /// Parent comment for replies; `None` for top-level comments
    pub parent_comment_id: Option<CommentId>,

    /// Body text
    pub content: String,
    /// Like count
    pub likes_count: i64,
    /// Reply count
    pub replies_count: i64,

    /// Row creation time
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last row update time
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,

    /// Commenter snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CommentAuthor>,
    /// Whether the current viewer liked this comment
    #[serde(default)]
    pub is_liked: bool,
}

/// Fields required to create a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    /// The post to comment on
    pub post_id: PostId,
    /// Commenting user
    pub user_id: UserId,
    /// Body text
    pub content: String,
    /// Parent comment for replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
}

/// One page of the feed, newest first, with the exact total row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    /// Posts in this page
    pub posts: Vec<Post>,
    /// Total approved posts matching the query, across all pages
    pub total: u64,
}

impl FeedPage {
    /// An empty page. Empty is a valid result, not an error.
    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let now = OffsetDateTime::now_utc();
        Post {
            id: PostId::new_v4(),
            author_id: UserId::new_v4(),
            content: "hello".to_string(),
            media: vec![PostMedia {
                kind: MediaKind::Image,
                url: "https://cdn.example.com/a.jpg".to_string(),
                thumbnail_url: None,
                width: Some(1080),
                height: Some(720),
            }],
            post_type: PostType::Standard,
            property_id: None,
            collaboration_id: None,
            likes_count: 3,
            comments_count: 1,
            reposts_count: 0,
            views_count: 12,
            approval_status: ApprovalStatus::Approved,
            is_pinned: false,
            visibility: Visibility::Public,
            created_at: now,
            updated_at: now,
            author: None,
            is_liked: false,
            is_reposted: false,
            is_bookmarked: false,
        }
    }

    #[test]
    fn test_status_tags_match_backend() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&Visibility::Followers).unwrap(),
            "\"followers\""
        );
        assert_eq!(serde_json::to_string(&MediaKind::Video).unwrap(), "\"video\"");
    }

    #[test]
    fn test_post_serde_round_trip() {
        let post = sample_post();
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(post, back);
    }

    #[test]
    fn test_media_kind_uses_type_key() {
        let post = sample_post();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["media"][0]["type"], "image");
        assert_eq!(json["type"], "standard");
    }

    #[test]
    fn test_viewer_flags_default_false() {
        // Rows fetched without interaction joins omit the flags entirely.
        let mut value = serde_json::to_value(sample_post()).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("is_liked");
        obj.remove("is_reposted");
        obj.remove("is_bookmarked");
        let post: Post = serde_json::from_value(value).unwrap();
        assert!(!post.is_liked);
        assert!(!post.is_bookmarked);
    }
}
