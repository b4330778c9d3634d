//! Behaviour of the helpers when driven through the process-wide configuration.

use std::sync::Arc;

use blogkit::{
    BlogHelpers, Parser,
    application::helpers::{RouteError, RouteTable, TagOptions, actions, blog_tag},
    configure,
};
use serial_test::serial;

fn main_app() -> Arc<RouteTable> {
    Arc::new(
        RouteTable::new()
            .register("dummy_thing_path", |_| "/dummy_thing".to_string())
            .register("dummy_thing_url", |_| "http://host/dummy_thing".to_string())
            .register("secret", |_| String::new()),
    )
}

fn helpers() -> BlogHelpers {
    BlogHelpers::global().with_main_app(main_app())
}

fn not_found(name: &str) -> Result<String, RouteError> {
    Err(RouteError::MethodNotFound {
        name: name.to_string(),
    })
}

#[test]
fn blog_tag_prefixes_class_with_post_type() {
    let div = TagOptions::new().attr("id", "blog_div").class("other_class");
    assert_eq!(
        blog_tag("div", "hello", &div).unwrap(),
        r#"<div class="other_class blog_post_div" id="blog_div">hello</div>"#
    );

    let li = TagOptions::new().attr("id", "blog_li");
    assert_eq!(
        blog_tag("li", "hello", &li).unwrap(),
        r#"<li class="blog_post_li" id="blog_li">hello</li>"#
    );
}

#[test]
fn blog_tag_honours_comment_and_status_types() {
    let comment = TagOptions::from_pairs([
        ("id", "blog_div"),
        ("type", "comment"),
        ("class", "other_class"),
    ])
    .unwrap();
    assert_eq!(
        blog_tag("div", "hello", &comment).unwrap(),
        r#"<div class="other_class blog_comment_div" id="blog_div">hello</div>"#
    );

    let status = TagOptions::from_pairs([("id", "blog_li"), ("type", "status")]).unwrap();
    assert_eq!(
        blog_tag("li", "hello", &status).unwrap(),
        r#"<li class="blog_status_li" id="blog_li">hello</li>"#
    );
}

#[test]
fn actions_wraps_block_in_actions_div() {
    assert_eq!(actions(|| "hello"), r#"<div class="actions">hello</div>"#);
}

#[test]
#[serial]
fn markdown_is_converted_when_configured() {
    configure(|c| c.default_parser = Parser::Markdown);
    let html = helpers().format_content("## Hello\n\nWorld").unwrap();
    assert!(html.contains("<h2>Hello</h2>\n<p>World</p>"), "{html}");
}

#[test]
#[serial]
fn textile_is_converted_when_configured() {
    configure(|c| c.default_parser = Parser::Textile);
    assert_eq!(
        helpers().format_content("h1. Hello\n\nWorld").unwrap(),
        "<h1>Hello</h1>\n<p>World</p>"
    );
}

#[test]
#[serial]
fn html_is_passed_through_when_configured() {
    configure(|c| c.default_parser = Parser::Html);
    for input in [
        "<h1>Hello</h1>\n\n<p>World</p>",
        "",
        "plain text & <unclosed",
        "## not markdown",
    ] {
        assert_eq!(helpers().format_content(input).unwrap(), input);
    }
}

#[test]
#[serial]
fn main_app_routes_are_hidden_unless_configured() {
    configure(|c| c.inline_main_app_named_routes = false);
    let helpers = helpers();

    assert_eq!(helpers.route("dummy_thing_path", &[]), not_found("dummy_thing_path"));
    assert_eq!(helpers.route("dummy_thing_url", &[]), not_found("dummy_thing_url"));
}

#[test]
#[serial]
fn main_app_routes_are_forwarded_when_configured() {
    configure(|c| c.inline_main_app_named_routes = true);
    let helpers = helpers();

    assert_eq!(helpers.route("dummy_thing_path", &[]).unwrap(), "/dummy_thing");
    assert_eq!(
        helpers.route("dummy_thing_url", &[]).unwrap(),
        "http://host/dummy_thing"
    );
}

#[test]
#[serial]
fn only_named_routes_of_the_main_app_are_known() {
    for enabled in [false, true] {
        configure(|c| c.inline_main_app_named_routes = enabled);
        assert_eq!(helpers().route("secret", &[]), not_found("secret"));
    }
}

#[test]
#[serial]
fn unknown_routes_are_not_found() {
    configure(|c| c.inline_main_app_named_routes = true);
    let helpers = helpers();

    assert_eq!(helpers.route("junk_path", &[]), not_found("junk_path"));
    assert_eq!(helpers.route("junk_url", &[]), not_found("junk_url"));
}
