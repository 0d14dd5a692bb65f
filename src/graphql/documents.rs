//! Static GraphQL documents mirroring the managed schema.
//!
//! These are schema-derived texts, kept in sync with the backend's
//! generated operations; they are not hand-authored logic. List operations
//! paginate with an opaque `nextToken` cursor and an optional `limit`.

pub const GET_POST: &str = r#"
  query GetPost($id: ID!) {
    getPost(id: $id) {
      id
      title
      contents
      upvotes
      downvotes
      image
      votes {
        items {
          id
          vote
          postID
          createdAt
          updatedAt
          owner
        }
        nextToken
      }
      comments {
        items {
          id
          postID
          content
          createdAt
          updatedAt
          owner
        }
        nextToken
      }
      createdAt
      updatedAt
      owner
    }
  }
"#;

pub const LIST_POSTS: &str = r#"
  query ListPosts(
    $filter: ModelPostFilterInput
    $limit: Int
    $nextToken: String
  ) {
    listPosts(filter: $filter, limit: $limit, nextToken: $nextToken) {
      items {
        id
        title
        contents
        upvotes
        downvotes
        image
        votes {
          items {
            id
            vote
            postID
            createdAt
            updatedAt
            owner
          }
          nextToken
        }
        comments {
          items {
            id
            postID
            content
            createdAt
            updatedAt
            owner
          }
          nextToken
        }
        createdAt
        updatedAt
        owner
      }
      nextToken
    }
  }
"#;

pub const GET_COMMENT: &str = r#"
  query GetComment($id: ID!) {
    getComment(id: $id) {
      id
      postID
      content
      createdAt
      updatedAt
      owner
    }
  }
"#;

pub const LIST_COMMENTS: &str = r#"
  query ListComments(
    $filter: ModelCommentFilterInput
    $limit: Int
    $nextToken: String
  ) {
    listComments(filter: $filter, limit: $limit, nextToken: $nextToken) {
      items {
        id
        postID
        content
        createdAt
        updatedAt
        owner
      }
      nextToken
    }
  }
"#;

pub const GET_VOTE: &str = r#"
  query GetVote($id: ID!) {
    getVote(id: $id) {
      id
      vote
      postID
      createdAt
      updatedAt
      owner
    }
  }
"#;

pub const LIST_VOTES: &str = r#"
  query ListVotes(
    $filter: ModelVoteFilterInput
    $limit: Int
    $nextToken: String
  ) {
    listVotes(filter: $filter, limit: $limit, nextToken: $nextToken) {
      items {
        id
        vote
        postID
        createdAt
        updatedAt
        owner
      }
      nextToken
    }
  }
"#;

pub const CREATE_POST: &str = r#"
  mutation CreatePost(
    $input: CreatePostInput!
    $condition: ModelPostConditionInput
  ) {
    createPost(input: $input, condition: $condition) {
      id
      title
      contents
      upvotes
      downvotes
      image
      votes {
        items {
          id
          vote
          postID
          createdAt
          updatedAt
          owner
        }
        nextToken
      }
      comments {
        items {
          id
          postID
          content
          createdAt
          updatedAt
          owner
        }
        nextToken
      }
      createdAt
      updatedAt
      owner
    }
  }
"#;

pub const CREATE_COMMENT: &str = r#"
  mutation CreateComment(
    $input: CreateCommentInput!
    $condition: ModelCommentConditionInput
  ) {
    createComment(input: $input, condition: $condition) {
      id
      postID
      content
      createdAt
      updatedAt
      owner
    }
  }
"#;

pub const CREATE_VOTE: &str = r#"
  mutation CreateVote(
    $input: CreateVoteInput!
    $condition: ModelVoteConditionInput
  ) {
    createVote(input: $input, condition: $condition) {
      id
      vote
      postID
      createdAt
      updatedAt
      owner
    }
  }
"#;
