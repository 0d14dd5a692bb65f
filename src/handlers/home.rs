//! The home feed.
use actix_web::{web, HttpResponse};
use tracing::error;

use crate::auth::MaybeUser;
use crate::graphql::GraphApi;
use crate::render::{self, Notice};
use crate::services::feed;
use crate::storage::ObjectStore;

use super::html;

/// GET `/`. A failed feed load renders the page anyway with an error
/// notice and an empty list, so the header and navigation stay usable.
pub async fn index(
    user: MaybeUser,
    api: web::Data<dyn GraphApi>,
    store: web::Data<dyn ObjectStore>,
) -> HttpResponse {
    let (posts, notice) = match feed::load_feed(api.get_ref()).await {
        Ok(posts) => (posts, None),
        Err(err) => {
            error!(error = %err, "Failed to load the feed");
            (Vec::new(), Some(Notice::error(err.to_string())))
        }
    };

    html(render::home_page(
        user.0.as_ref(),
        &posts,
        store.get_ref(),
        notice.as_ref(),
    ))
}
