//! Comment creation.
use serde_json::json;

use crate::error::Result;
use crate::graphql::documents;
use crate::graphql::types::{Comment, CreateCommentData, CreateCommentInput};
use crate::graphql::{AuthMode, GraphApi};

pub const MAX_COMMENT_CHARS: usize = 1000;

pub const COMMENT_REQUIRED: &str = "Please enter a comment.";
pub const COMMENT_TOO_LONG: &str = "Please keep comments to 1000 characters or less.";

pub fn validate_comment(content: &str) -> std::result::Result<(), &'static str> {
    if content.trim().is_empty() {
        Err(COMMENT_REQUIRED)
    } else if content.chars().count() > MAX_COMMENT_CHARS {
        Err(COMMENT_TOO_LONG)
    } else {
        Ok(())
    }
}

pub async fn create_comment(
    api: &dyn GraphApi,
    access_token: &str,
    post_id: &str,
    content: &str,
) -> Result<Comment> {
    let input = CreateCommentInput {
        post_id: post_id.to_string(),
        content: content.to_string(),
    };

    let data = api
        .mutate(
            documents::CREATE_COMMENT,
            json!({ "input": input }),
            AuthMode::UserPool(access_token.to_string()),
        )
        .await?;

    let data: CreateCommentData = serde_json::from_value(data)?;
    Ok(data.create_comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::client::MockGraphApi;

    #[test]
    fn comment_content_constraints() {
        assert_eq!(validate_comment("   "), Err(COMMENT_REQUIRED));
        assert_eq!(
            validate_comment(&"z".repeat(1001)),
            Err(COMMENT_TOO_LONG)
        );
        assert!(validate_comment("nice shot").is_ok());
    }

    #[tokio::test]
    async fn comment_mutation_references_its_post() {
        let mut api = MockGraphApi::new();
        api.expect_mutate()
            .times(1)
            .returning(|document, variables, auth| {
                assert!(document.contains("mutation CreateComment"));
                assert_eq!(variables["input"]["postID"], "p-7");
                assert_eq!(variables["input"]["content"], "nice shot");
                assert_eq!(auth, AuthMode::UserPool("token-1".into()));
                Ok(json!({
                    "createComment": {
                        "id": "c-1",
                        "postID": "p-7",
                        "content": "nice shot",
                        "owner": "bob"
                    }
                }))
            });

        let comment = create_comment(&api, "token-1", "p-7", "nice shot")
            .await
            .unwrap();
        assert_eq!(comment.post_id, "p-7");
    }
}
