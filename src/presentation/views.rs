use askama::{Error as AskamaError, Template};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::application::{
    helpers::{BlogHelpers, TagError, TagOptions},
    render::RenderError,
};
use crate::domain::types::BlogTagType;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("content formatting failed")]
    Render(#[from] RenderError),
    #[error("blog tag rejected")]
    Tag(#[from] TagError),
    #[error("{public_message}")]
    Template {
        public_message: &'static str,
        #[source]
        error: AskamaError,
    },
}

impl ViewError {
    fn template(public_message: &'static str, error: AskamaError) -> Self {
        Self::Template {
            public_message,
            error,
        }
    }
}

/// A stored post as handed to the view layer.
#[derive(Debug, Clone)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: u64,
    pub author: String,
    pub body: String,
}

#[derive(Template)]
#[template(path = "blog/post.html")]
struct PostTemplate<'a> {
    title: &'a str,
    author: &'a str,
    permalink: Option<String>,
    body_html: String,
    edit_href: Option<String>,
}

#[derive(Template)]
#[template(path = "blog/comment.html")]
struct CommentTemplate<'a> {
    author: &'a str,
    body_html: String,
}

/// Render a post as `<article class="blog_post_article">`.
///
/// The title links to the host's `post_path` and an edit action is offered
/// when the host exposes `edit_post_path`; both quietly disappear when named
/// routes are not inlined.
pub fn render_post(helpers: &BlogHelpers, post: &PostView) -> Result<String, ViewError> {
    let slug = json!(post.slug);
    let permalink = optional_route(helpers, "post_path", &slug);
    let edit_href = optional_route(helpers, "edit_post_path", &slug);

    let template = PostTemplate {
        title: &post.title,
        author: &post.author,
        permalink,
        body_html: helpers.format_content(&post.body)?,
        edit_href,
    };
    let inner = template
        .render()
        .map_err(|err| ViewError::template("Post template rendering failed", err))?;

    let options = TagOptions::new().attr("id", format!("post-{}", post.slug));
    Ok(helpers.blog_tag("article", &inner, &options)?)
}

/// Render a comment as `<li class="blog_comment_li">`.
pub fn render_comment(helpers: &BlogHelpers, comment: &CommentView) -> Result<String, ViewError> {
    let template = CommentTemplate {
        author: &comment.author,
        body_html: helpers.format_content(&comment.body)?,
    };
    let inner = template
        .render()
        .map_err(|err| ViewError::template("Comment template rendering failed", err))?;

    let options = TagOptions::new()
        .kind(BlogTagType::Comment)
        .attr("id", format!("comment-{}", comment.id));
    Ok(helpers.blog_tag("li", &inner, &options)?)
}

fn optional_route(helpers: &BlogHelpers, name: &str, arg: &serde_json::Value) -> Option<String> {
    if !helpers.responds_to(name) {
        return None;
    }
    helpers
        .route(name, std::slice::from_ref(arg))
        .inspect_err(|err| {
            warn!(
                target = "presentation::views",
                route = name,
                error = %err,
                "route helper disappeared between lookup and call"
            );
        })
        .ok()
}
