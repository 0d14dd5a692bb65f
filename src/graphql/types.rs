//! Typed results and inputs, one per operation.
//!
//! Each operation's response deserializes into an explicit data envelope
//! instead of an untyped payload. Entity field names follow the backend's
//! wire casing (`postID` included).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-authored content item with title, body, optional image, and vote
/// counters. `owner` is assigned by the backend from the authenticated
/// identity at creation time and is immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub contents: String,
    #[serde(default)]
    pub image: Option<String>,
    pub upvotes: i64,
    pub downvotes: i64,
    #[serde(default)]
    pub votes: Option<VoteConnection>,
    #[serde(default)]
    pub comments: Option<CommentConnection>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(rename = "postID")]
    pub post_id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    #[serde(rename = "postID")]
    pub post_id: String,
    pub vote: VoteDirection,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// Signed vote direction, stored as a string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Upvote,
    Downvote,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConnection {
    #[serde(default)]
    pub items: Vec<Post>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConnection {
    #[serde(default)]
    pub items: Vec<Comment>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteConnection {
    #[serde(default)]
    pub items: Vec<Vote>,
    #[serde(default)]
    pub next_token: Option<String>,
}

// ---------------------------------------------------------------------
// Mutation inputs
// ---------------------------------------------------------------------

/// Input for `createPost`. Counters are client-initialised to zero; the
/// `image` key is omitted from the wire entirely when no image was
/// uploaded.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostInput {
    pub title: String,
    pub contents: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub upvotes: i64,
    pub downvotes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentInput {
    #[serde(rename = "postID")]
    pub post_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVoteInput {
    #[serde(rename = "postID")]
    pub post_id: String,
    pub vote: VoteDirection,
}

// ---------------------------------------------------------------------
// Per-operation data envelopes
// ---------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GetPostData {
    #[serde(rename = "getPost")]
    pub get_post: Option<Post>,
}

#[derive(Debug, Deserialize)]
pub struct ListPostsData {
    #[serde(rename = "listPosts")]
    pub list_posts: PostConnection,
}

#[derive(Debug, Deserialize)]
pub struct GetCommentData {
    #[serde(rename = "getComment")]
    pub get_comment: Option<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct ListCommentsData {
    #[serde(rename = "listComments")]
    pub list_comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
pub struct GetVoteData {
    #[serde(rename = "getVote")]
    pub get_vote: Option<Vote>,
}

#[derive(Debug, Deserialize)]
pub struct ListVotesData {
    #[serde(rename = "listVotes")]
    pub list_votes: VoteConnection,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostData {
    #[serde(rename = "createPost")]
    pub create_post: Post,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentData {
    #[serde(rename = "createComment")]
    pub create_comment: Comment,
}

#[derive(Debug, Deserialize)]
pub struct CreateVoteData {
    #[serde(rename = "createVote")]
    pub create_vote: Vote,
}
