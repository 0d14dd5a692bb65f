/// Business logic driving the GraphQL and storage calls
///
/// - `posts`: the create-post flow and single-post fetch
/// - `feed`: the home feed load
/// - `comments`: comment creation
/// - `votes`: vote creation
pub mod comments;
pub mod feed;
pub mod posts;
pub mod votes;

pub use posts::{FieldError, ImageUpload, NewPost, PostComposer};
