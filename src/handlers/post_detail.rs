//! Single post page, comment submission, and voting.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::error;

use crate::auth::MaybeUser;
use crate::error::{AppError, Result};
use crate::graphql::types::Post;
use crate::graphql::GraphApi;
use crate::render::{self, Notice};
use crate::services::{comments, posts, votes};
use crate::storage::ObjectStore;

use super::{html, see_other};

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Set by the create flow's redirect to show the success notice once.
    #[serde(default)]
    pub created: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub direction: String,
}

async fn fetch_post(api: &dyn GraphApi, id: &str) -> Result<Post> {
    posts::get_post(api, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with id {id}")))
}

/// GET `/post/{id}`.
pub async fn show(
    user: MaybeUser,
    path: web::Path<String>,
    query: web::Query<DetailQuery>,
    api: web::Data<dyn GraphApi>,
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let post = fetch_post(api.get_ref(), &id).await?;

    let notice = query
        .created
        .is_some()
        .then(|| Notice::success("Post created"));

    Ok(html(render::post_page(
        user.0.as_ref(),
        &post,
        store.get_ref(),
        notice.as_ref(),
    )))
}

/// POST `/post/{id}/comment`. Failures re-render the post page with an
/// error notice instead of navigating away.
pub async fn comment(
    user: MaybeUser,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
    api: web::Data<dyn GraphApi>,
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(see_other("/login"));
    };
    let id = path.into_inner();

    if let Err(message) = comments::validate_comment(&form.content) {
        let post = fetch_post(api.get_ref(), &id).await?;
        return Ok(html(render::post_page(
            Some(&user),
            &post,
            store.get_ref(),
            Some(&Notice::error(message)),
        )));
    }

    match comments::create_comment(api.get_ref(), &user.access_token, &id, &form.content).await {
        Ok(_) => Ok(see_other(&format!("/post/{id}"))),
        Err(err) => {
            error!(error = %err, post_id = %id, "Failed to create comment");
            let post = fetch_post(api.get_ref(), &id).await?;
            Ok(html(render::post_page(
                Some(&user),
                &post,
                store.get_ref(),
                Some(&Notice::error(err.to_string())),
            )))
        }
    }
}

/// POST `/post/{id}/vote`.
pub async fn vote(
    user: MaybeUser,
    path: web::Path<String>,
    form: web::Form<VoteForm>,
    api: web::Data<dyn GraphApi>,
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(see_other("/login"));
    };
    let id = path.into_inner();
    let direction = votes::parse_direction(&form.direction)?;

    match votes::cast_vote(api.get_ref(), &user.access_token, &id, direction).await {
        Ok(_) => Ok(see_other(&format!("/post/{id}"))),
        Err(err) => {
            error!(error = %err, post_id = %id, "Failed to cast vote");
            let post = fetch_post(api.get_ref(), &id).await?;
            Ok(html(render::post_page(
                Some(&user),
                &post,
                store.get_ref(),
                Some(&Notice::error(err.to_string())),
            )))
        }
    }
}
