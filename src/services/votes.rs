//! Vote creation.
//!
//! Creating a vote only records the Vote entity; the post's counters are
//! not touched from here. Counter maintenance belongs to the backend.
use serde_json::json;

use crate::error::{AppError, Result};
use crate::graphql::documents;
use crate::graphql::types::{CreateVoteData, CreateVoteInput, Vote, VoteDirection};
use crate::graphql::{AuthMode, GraphApi};

/// Parse the form's `direction` field.
pub fn parse_direction(raw: &str) -> Result<VoteDirection> {
    match raw {
        "up" => Ok(VoteDirection::Upvote),
        "down" => Ok(VoteDirection::Downvote),
        other => Err(AppError::Validation(format!(
            "Unknown vote direction: {other}"
        ))),
    }
}

pub async fn cast_vote(
    api: &dyn GraphApi,
    access_token: &str,
    post_id: &str,
    direction: VoteDirection,
) -> Result<Vote> {
    let input = CreateVoteInput {
        post_id: post_id.to_string(),
        vote: direction,
    };

    let data = api
        .mutate(
            documents::CREATE_VOTE,
            json!({ "input": input }),
            AuthMode::UserPool(access_token.to_string()),
        )
        .await?;

    let data: CreateVoteData = serde_json::from_value(data)?;
    Ok(data.create_vote)
}
