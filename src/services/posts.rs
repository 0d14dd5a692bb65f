//! The create-post flow and single-post fetch.
//!
//! A submission moves Idle -> Submitting -> Success/Failure: validate
//! first, then upload the image (when one was selected) to completion,
//! then issue the `createPost` mutation referencing the uploaded key. The
//! mutation is never issued before the upload resolves, so the `image` key
//! on the Post record is always valid.
use serde_json::json;
use uuid::Uuid;

use crate::error::Result;
use crate::graphql::documents;
use crate::graphql::types::{CreatePostData, CreatePostInput, GetPostData, Post};
use crate::graphql::{AuthMode, GraphApi};
use crate::storage::ObjectStore;

pub const MAX_TITLE_CHARS: usize = 120;
pub const MAX_CONTENTS_CHARS: usize = 1000;

pub const TITLE_REQUIRED: &str = "Please enter a title.";
pub const TITLE_TOO_LONG: &str = "Please enter a title that is 120 characters or less.";
pub const CONTENTS_REQUIRED: &str = "Please enter some content for your post.";
pub const CONTENTS_TOO_LONG: &str = "Please make sure your content is 1000 characters or less.";

/// An image file selected on the compose form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// The compose form's submitted values.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub contents: String,
    pub image: Option<ImageUpload>,
}

/// A form constraint violation, shown inline next to its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl NewPost {
    /// Client-side validation, applied before anything touches the network.
    pub fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError {
                field: "title",
                message: TITLE_REQUIRED,
            });
        } else if self.title.chars().count() > MAX_TITLE_CHARS {
            errors.push(FieldError {
                field: "title",
                message: TITLE_TOO_LONG,
            });
        }

        if self.contents.trim().is_empty() {
            errors.push(FieldError {
                field: "contents",
                message: CONTENTS_REQUIRED,
            });
        } else if self.contents.chars().count() > MAX_CONTENTS_CHARS {
            errors.push(FieldError {
                field: "contents",
                message: CONTENTS_TOO_LONG,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Drives one post submission against the API and the object store.
pub struct PostComposer<'a> {
    api: &'a dyn GraphApi,
    store: &'a dyn ObjectStore,
}

impl<'a> PostComposer<'a> {
    pub fn new(api: &'a dyn GraphApi, store: &'a dyn ObjectStore) -> Self {
        Self { api, store }
    }

    /// Create a post for the signed-in user, uploading the image first when
    /// one was selected. Callers validate the form before calling; either
    /// failure leg (upload or mutation) surfaces unchanged.
    pub async fn create(&self, access_token: &str, post: &NewPost) -> Result<Post> {
        let image_key = match &post.image {
            Some(upload) => {
                // Collision-resistant key, one per upload
                let key = Uuid::new_v4().to_string();
                self.store
                    .put_object(&key, &upload.bytes, &upload.content_type)
                    .await?;
                Some(key)
            }
            None => None,
        };

        let input = CreatePostInput {
            title: post.title.clone(),
            contents: post.contents.clone(),
            image: image_key,
            upvotes: 0,
            downvotes: 0,
        };

        let data = self
            .api
            .mutate(
                documents::CREATE_POST,
                json!({ "input": input }),
                AuthMode::UserPool(access_token.to_string()),
            )
            .await?;

        let data: CreatePostData = serde_json::from_value(data)?;
        Ok(data.create_post)
    }
}

/// Fetch one post with its embedded comment and vote pages.
pub async fn get_post(api: &dyn GraphApi, id: &str) -> Result<Option<Post>> {
    let data = api
        .query(documents::GET_POST, json!({ "id": id }))
        .await?;

    let data: GetPostData = serde_json::from_value(data)?;
    Ok(data.get_post)
}
