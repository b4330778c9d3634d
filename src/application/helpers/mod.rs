//! View helpers handed to templates rendering blog pages.

pub mod routes;
pub mod tag;

use std::sync::Arc;

use crate::application::{
    configuration::ConfigHandle,
    render::{ContentFormatter, RenderError},
};

pub use routes::{MainAppRoutes, RouteArg, RouteError, RouteHelpers, RouteTable, is_route_name};
pub use tag::{TagError, TagOptions, actions, blog_tag};

/// Everything a blog template needs: content formatting, blog tags and the
/// host application's named routes.
#[derive(Debug, Clone)]
pub struct BlogHelpers {
    formatter: ContentFormatter,
    main_app: Option<MainAppRoutes>,
}

impl BlogHelpers {
    pub fn new(config: ConfigHandle) -> Self {
        Self {
            formatter: ContentFormatter::new(config),
            main_app: None,
        }
    }

    /// Helpers reading the process-wide configuration.
    pub fn global() -> Self {
        Self::new(ConfigHandle::global())
    }

    pub fn with_formatter(formatter: ContentFormatter) -> Self {
        Self {
            formatter,
            main_app: None,
        }
    }

    /// Attach the host application's helper object.
    pub fn with_main_app(mut self, host: Arc<dyn RouteHelpers>) -> Self {
        let config = self.formatter.config().clone();
        self.main_app = Some(MainAppRoutes::new(host, config));
        self
    }

    pub fn config(&self) -> &ConfigHandle {
        self.formatter.config()
    }

    pub fn format_content(&self, raw_text: &str) -> Result<String, RenderError> {
        self.formatter.format_content(raw_text)
    }

    pub fn blog_tag(
        &self,
        tag_name: &str,
        content: &str,
        options: &TagOptions,
    ) -> Result<String, TagError> {
        blog_tag(tag_name, content, options)
    }

    pub fn actions<F, S>(&self, content: F) -> String
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        actions(content)
    }

    /// Call a host route helper such as `post_path`.
    pub fn route(&self, name: &str, args: &[RouteArg]) -> Result<String, RouteError> {
        match &self.main_app {
            Some(main_app) => main_app.call(name, args),
            None => Err(RouteError::MethodNotFound {
                name: name.to_string(),
            }),
        }
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.main_app
            .as_ref()
            .is_some_and(|main_app| main_app.responds_to(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::configuration::BlogConfig;
    use crate::application::render::{RenderOutput, RenderRequest, RenderService};
    use crate::domain::types::Parser;

    #[test]
    fn routes_fail_without_host() {
        let helpers = BlogHelpers::new(ConfigHandle::new(BlogConfig {
            inline_main_app_named_routes: true,
            ..BlogConfig::default()
        }));
        assert_eq!(
            helpers.route("root_path", &[]),
            Err(RouteError::MethodNotFound {
                name: "root_path".into()
            })
        );
        assert!(!helpers.responds_to("root_path"));
    }

    #[test]
    fn attached_host_shares_the_formatter_config() {
        let config = ConfigHandle::new(BlogConfig::default());
        let helpers = BlogHelpers::new(config.clone()).with_main_app(Arc::new(
            RouteTable::new().register("root_path", |_| "/".to_string()),
        ));
        assert!(helpers.route("root_path", &[]).is_err());

        config.configure(|c| {
            c.inline_main_app_named_routes = true;
            c.default_parser = Parser::Html;
        });
        assert_eq!(helpers.route("root_path", &[]).unwrap(), "/");
        assert_eq!(helpers.format_content("<b>x</b>").unwrap(), "<b>x</b>");
    }

    struct UpperRenderer;

    impl RenderService for UpperRenderer {
        fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
            Ok(RenderOutput::plain(request.source.to_uppercase()))
        }
    }

    #[test]
    fn custom_formatter_is_used_for_content() {
        let formatter = ContentFormatter::with_renderer(
            ConfigHandle::new(BlogConfig::default()),
            Arc::new(UpperRenderer),
        );
        let helpers = BlogHelpers::with_formatter(formatter);
        assert_eq!(helpers.format_content("hello").unwrap(), "HELLO");
    }

    #[test]
    fn tag_helpers_compose() {
        let helpers = BlogHelpers::new(ConfigHandle::new(BlogConfig::default()));
        let inner = helpers.actions(|| "Edit");
        let html = helpers
            .blog_tag("section", &inner, &TagOptions::new().attr("id", "post-1"))
            .unwrap();
        assert_eq!(
            html,
            r#"<section class="blog_post_section" id="post-1"><div class="actions">Edit</div></section>"#
        );
    }
}
