//! Home feed load.
//!
//! One `listPosts` query with no pagination cursor; the page renders
//! whatever the backend's default page size returns, in response order.
use serde_json::json;

use crate::error::Result;
use crate::graphql::documents;
use crate::graphql::types::{ListPostsData, Post};
use crate::graphql::GraphApi;

pub async fn load_feed(api: &dyn GraphApi) -> Result<Vec<Post>> {
    let data = api.query(documents::LIST_POSTS, json!({})).await?;
    let data: ListPostsData = serde_json::from_value(data)?;
    Ok(data.list_posts.items)
}
