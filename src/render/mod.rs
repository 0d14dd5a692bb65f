//! Server-side HTML rendering.
//!
//! Templates are embedded at compile time and filled in with plain
//! placeholder substitution. All user-sourced text passes through
//! [`esc`] before it reaches the page.
use actix_web::http::StatusCode;

use crate::auth::SessionUser;
use crate::graphql::types::{Comment, Post};
use crate::services::FieldError;
use crate::storage::ObjectStore;

const LAYOUT: &str = include_str!("templates/layout.html");
const STYLE: &str = include_str!("templates/style.css");
const HEADER_USER: &str = include_str!("templates/header_user.html");
const HEADER_GUEST: &str = include_str!("templates/header_guest.html");
const NOTIFICATION: &str = include_str!("templates/notification.html");
const HOME: &str = include_str!("templates/home.html");
const PREVIEW: &str = include_str!("templates/preview.html");
const POST: &str = include_str!("templates/post.html");
const VOTE_CONTROLS: &str = include_str!("templates/vote_controls.html");
const COMMENT: &str = include_str!("templates/comment.html");
const COMMENT_FORM: &str = include_str!("templates/comment_form.html");
const CREATE: &str = include_str!("templates/create.html");
const LOGIN: &str = include_str!("templates/login.html");
const SIGNUP: &str = include_str!("templates/signup.html");

/// Visual flavour of a page notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissable banner shown above the page content.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

fn esc(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn esc_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

fn header(user: Option<&SessionUser>) -> String {
    match user {
        Some(user) => HEADER_USER.replace("<!--username-->", &esc(&user.username)),
        None => HEADER_GUEST.to_string(),
    }
}

fn notification(notice: &Notice) -> String {
    let kind = match notice.kind {
        NoticeKind::Success => "success",
        NoticeKind::Error => "error",
    };
    NOTIFICATION
        .replace("<!--kind-->", kind)
        .replace("<!--message-->", &esc(&notice.message))
}

fn page(title: &str, user: Option<&SessionUser>, notice: Option<&Notice>, content: &str) -> String {
    LAYOUT
        .replace("<!--title-->", &esc(title))
        .replace("/*style*/", STYLE)
        .replace("<!--header-->", &header(user))
        .replace(
            "<!--notice-->",
            &notice.map(notification).unwrap_or_default(),
        )
        .replace("<!--content-->", content)
}

fn image_tag(post: &Post, store: &dyn ObjectStore) -> String {
    match &post.image {
        Some(key) => format!(
            r#"<img src="{}" alt="{}">"#,
            esc_attr(&store.object_url(key)),
            esc_attr(&post.title)
        ),
        None => String::new(),
    }
}

fn owner_label(owner: Option<&str>) -> String {
    esc(owner.unwrap_or("unknown"))
}

fn post_preview(post: &Post, store: &dyn ObjectStore) -> String {
    PREVIEW
        .replace("<!--id-->", &esc_attr(&post.id))
        .replace("<!--post-title-->", &esc(&post.title))
        .replace("<!--image-->", &image_tag(post, store))
        .replace("<!--contents-->", &esc(&post.contents))
        .replace("<!--upvotes-->", &post.upvotes.to_string())
        .replace("<!--downvotes-->", &post.downvotes.to_string())
        .replace("<!--owner-->", &owner_label(post.owner.as_deref()))
}

fn comment_block(comment: &Comment) -> String {
    COMMENT
        .replace("<!--content-->", &esc(&comment.content))
        .replace("<!--owner-->", &owner_label(comment.owner.as_deref()))
}

/// The feed, one preview per post in response order.
pub fn home_page(
    user: Option<&SessionUser>,
    posts: &[Post],
    store: &dyn ObjectStore,
    notice: Option<&Notice>,
) -> String {
    let previews: String = posts.iter().map(|p| post_preview(p, store)).collect();
    let content = HOME.replace("<!--posts-->", &previews);
    page("Latest Posts", user, notice, &content)
}

/// A single post with its comments. Vote controls and the comment form
/// only render for a signed-in user.
pub fn post_page(
    user: Option<&SessionUser>,
    post: &Post,
    store: &dyn ObjectStore,
    notice: Option<&Notice>,
) -> String {
    let comments: String = post
        .comments
        .as_ref()
        .map(|c| c.items.iter().map(comment_block).collect())
        .unwrap_or_default();

    let (vote_controls, comment_form) = if user.is_some() {
        (
            VOTE_CONTROLS.replace("<!--id-->", &esc_attr(&post.id)),
            COMMENT_FORM.replace("<!--id-->", &esc_attr(&post.id)),
        )
    } else {
        (
            String::new(),
            r#"<p><a href="/login">Login</a> to comment or vote.</p>"#.to_string(),
        )
    };

    let content = POST
        .replace("<!--post-title-->", &esc(&post.title))
        .replace("<!--image-->", &image_tag(post, store))
        .replace("<!--contents-->", &esc(&post.contents))
        .replace("<!--upvotes-->", &post.upvotes.to_string())
        .replace("<!--downvotes-->", &post.downvotes.to_string())
        .replace("<!--owner-->", &owner_label(post.owner.as_deref()))
        .replace("<!--vote-controls-->", &vote_controls)
        .replace("<!--comments-->", &comments)
        .replace("<!--comment-form-->", &comment_form);

    page(&post.title, user, notice, &content)
}

fn field_error_block(errors: &[FieldError], field: &str) -> String {
    errors
        .iter()
        .filter(|e| e.field == field)
        .map(|e| format!(r#"<p class="field-error">{}</p>"#, esc(e.message)))
        .collect()
}

/// The compose form, re-rendered with submitted values and inline errors
/// after a rejected submission.
pub fn create_page(
    user: &SessionUser,
    title_value: &str,
    contents_value: &str,
    errors: &[FieldError],
    notice: Option<&Notice>,
) -> String {
    let content = CREATE
        .replace("<!--title-value-->", &esc_attr(title_value))
        .replace("<!--contents-value-->", &esc(contents_value))
        .replace("<!--title-error-->", &field_error_block(errors, "title"))
        .replace(
            "<!--contents-error-->",
            &field_error_block(errors, "contents"),
        );
    page("Create Post", Some(user), notice, &content)
}

pub fn login_page(username_value: &str, notice: Option<&Notice>) -> String {
    let content = LOGIN.replace("<!--username-value-->", &esc_attr(username_value));
    page("Login", None, notice, &content)
}

pub fn signup_page(username_value: &str, email_value: &str, notice: Option<&Notice>) -> String {
    let content = SIGNUP
        .replace("<!--username-value-->", &esc_attr(username_value))
        .replace("<!--email-value-->", &esc_attr(email_value));
    page("Sign Up", None, notice, &content)
}

/// Fallback page for errors that escape a handler.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        "<h1>{}</h1><p>{}</p>",
        esc(&status.to_string()),
        esc(message)
    );
    page("Error", None, None, &content)
}
