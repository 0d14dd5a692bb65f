//! The compose form and its multipart submission.
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use tracing::error;

use crate::auth::MaybeUser;
use crate::error::{AppError, Result};
use crate::graphql::GraphApi;
use crate::render::{self, Notice};
use crate::services::{ImageUpload, NewPost, PostComposer};
use crate::storage::ObjectStore;

use super::{html, see_other};

// Size limits for multipart parts; `Multipart` itself applies none.
pub const MAX_IMAGE_BYTES: usize = 10_485_760; // 10MB
const MAX_TEXT_BYTES: usize = 16_384; // 16KB

/// GET `/create`. Guests are sent to the login page.
pub async fn form(user: MaybeUser) -> HttpResponse {
    match user.0 {
        Some(user) => html(render::create_page(&user, "", "", &[], None)),
        None => see_other("/login"),
    }
}

/// POST `/create`.
///
/// A rejected form re-renders with inline field errors; an upload or
/// mutation failure re-renders with an error notice. Both keep the
/// submitted values and stay on the compose page. Only a fully successful
/// submission navigates, to the new post.
pub async fn submit(
    user: MaybeUser,
    payload: Multipart,
    api: web::Data<dyn GraphApi>,
    store: web::Data<dyn ObjectStore>,
) -> Result<HttpResponse> {
    let Some(user) = user.0 else {
        return Ok(see_other("/login"));
    };

    let form = read_post_form(payload).await?;

    if let Err(errors) = form.validate() {
        return Ok(html(render::create_page(
            &user,
            &form.title,
            &form.contents,
            &errors,
            None,
        )));
    }

    let composer = PostComposer::new(api.get_ref(), store.get_ref());
    match composer.create(&user.access_token, &form).await {
        Ok(post) => Ok(see_other(&format!("/post/{}?created=1", post.id))),
        Err(err) => {
            error!(error = %err, "Failed to create post");
            Ok(html(render::create_page(
                &user,
                &form.title,
                &form.contents,
                &[],
                Some(&Notice::error(err.to_string())),
            )))
        }
    }
}

/// Collect the multipart fields into a [`NewPost`]. An image part with an
/// empty body means no file was chosen. Unknown parts are drained and
/// ignored.
async fn read_post_form(mut payload: Multipart) -> Result<NewPost> {
    let mut form = NewPost::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form upload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => form.title = read_text(&mut field).await?,
            Some("contents") => form.contents = read_text(&mut field).await?,
            Some("image") => {
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

                let bytes = read_bytes(&mut field, MAX_IMAGE_BYTES).await?;
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        bytes,
                        content_type,
                    });
                }
            }
            _ => {
                read_bytes(&mut field, MAX_IMAGE_BYTES).await?;
            }
        }
    }

    Ok(form)
}

/// Accumulate a part's chunks, bailing out as soon as the running total
/// passes `limit` rather than buffering the remainder.
async fn read_bytes(field: &mut actix_multipart::Field, limit: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form upload: {e}")))?
    {
        if buf.len() + chunk.len() > limit {
            return Err(AppError::Validation(format!(
                "Form part exceeds its size limit ({limit} bytes)"
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

async fn read_text(field: &mut actix_multipart::Field) -> Result<String> {
    let bytes = read_bytes(field, MAX_TEXT_BYTES).await?;
    String::from_utf8(bytes).map_err(|_| AppError::Validation("Form text must be UTF-8".into()))
}
