//! Restricted access to the host application's named route helpers.
//!
//! Templates rendered by the blog can call the host's `*_path` and `*_url`
//! helpers through [`MainAppRoutes`], but only while
//! `inline_main_app_named_routes` is enabled. Anything else the host exposes
//! stays unreachable.

use std::{collections::HashMap, fmt, sync::Arc};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::application::configuration::ConfigHandle;

/// Argument passed through to a route helper (ids, slugs, query maps, ...).
pub type RouteArg = Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The facade does not know the helper. Returned alike for non-route
    /// names, disabled forwarding and helpers the host lacks.
    #[error("undefined method `{name}` for blog helpers")]
    MethodNotFound { name: String },
}

impl RouteError {
    fn not_found(name: &str) -> Self {
        Self::MethodNotFound {
            name: name.to_string(),
        }
    }
}

/// Implemented by the host application's helper object.
pub trait RouteHelpers: Send + Sync {
    /// Invoke helper `name`, or return `None` when the host has no such helper.
    fn call(&self, name: &str, args: &[RouteArg]) -> Option<String>;

    /// Whether the host defines helper `name`. Must be a lookup only; the
    /// helper body is not run.
    fn has_helper(&self, name: &str) -> bool;
}

type HelperFn = dyn Fn(&[RouteArg]) -> String + Send + Sync;

/// Host helper object assembled by registering named closures at attachment time.
#[derive(Clone, Default)]
pub struct RouteTable {
    helpers: HashMap<String, Arc<HelperFn>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(mut self, name: impl Into<String>, helper: F) -> Self
    where
        F: Fn(&[RouteArg]) -> String + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Arc::new(helper));
        self
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

impl RouteHelpers for RouteTable {
    fn call(&self, name: &str, args: &[RouteArg]) -> Option<String> {
        self.helpers.get(name).map(|helper| helper(args))
    }

    fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.helpers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RouteTable").field("helpers", &names).finish()
    }
}

/// True for `<stem>_path` and `<stem>_url` with a non-empty stem.
pub fn is_route_name(name: &str) -> bool {
    ["_path", "_url"].iter().any(|suffix| {
        name.strip_suffix(suffix)
            .is_some_and(|stem| !stem.is_empty())
    })
}

/// Allowlisting proxy in front of the host's [`RouteHelpers`].
#[derive(Clone)]
pub struct MainAppRoutes {
    host: Arc<dyn RouteHelpers>,
    config: ConfigHandle,
}

impl MainAppRoutes {
    pub fn new(host: Arc<dyn RouteHelpers>, config: ConfigHandle) -> Self {
        Self { host, config }
    }

    /// Forward `name` to the host when it is a route helper and forwarding is
    /// enabled at call time.
    pub fn call(&self, name: &str, args: &[RouteArg]) -> Result<String, RouteError> {
        if !self.forwards(name) {
            return Err(RouteError::not_found(name));
        }

        self.host.call(name, args).ok_or_else(|| {
            debug!(
                target = "application::helpers::routes",
                name, "host application has no such route helper"
            );
            RouteError::not_found(name)
        })
    }

    /// Whether `name` would be forwarded right now.
    pub fn responds_to(&self, name: &str) -> bool {
        self.forwards(name) && self.host.has_helper(name)
    }

    fn forwards(&self, name: &str) -> bool {
        if !is_route_name(name) {
            debug!(
                target = "application::helpers::routes",
                name, "rejected non-route helper"
            );
            return false;
        }
        if !self.config.snapshot().inline_main_app_named_routes {
            debug!(
                target = "application::helpers::routes",
                name, "named route forwarding disabled"
            );
            return false;
        }
        true
    }
}

impl fmt::Debug for MainAppRoutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainAppRoutes")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::application::configuration::BlogConfig;
    use serde_json::json;

    fn host() -> Arc<RouteTable> {
        Arc::new(
            RouteTable::new()
                .register("dummy_thing_path", |_| "/dummy_thing".to_string())
                .register("dummy_thing_url", |_| "http://host/dummy_thing".to_string())
                .register("post_path", |args| match args.first() {
                    Some(Value::Number(id)) => format!("/posts/{id}"),
                    Some(Value::String(slug)) => format!("/posts/{slug}"),
                    _ => "/posts".to_string(),
                })
                .register("secret", |_| "hunter2".to_string()),
        )
    }

    fn routes(enabled: bool) -> MainAppRoutes {
        let config = ConfigHandle::new(BlogConfig {
            inline_main_app_named_routes: enabled,
            ..BlogConfig::default()
        });
        MainAppRoutes::new(host(), config)
    }

    fn not_found(name: &str) -> Result<String, RouteError> {
        Err(RouteError::MethodNotFound {
            name: name.to_string(),
        })
    }

    #[test]
    fn route_names_need_suffix_and_stem() {
        assert!(is_route_name("dummy_thing_path"));
        assert!(is_route_name("root_url"));
        assert!(!is_route_name("_path"));
        assert!(!is_route_name("_url"));
        assert!(!is_route_name("secret"));
        assert!(!is_route_name("path_helper"));
    }

    #[test]
    fn disabled_forwarding_hides_routes() {
        let routes = routes(false);
        assert_eq!(routes.call("dummy_thing_path", &[]), not_found("dummy_thing_path"));
        assert_eq!(routes.call("dummy_thing_url", &[]), not_found("dummy_thing_url"));
        assert!(!routes.responds_to("dummy_thing_path"));
    }

    #[test]
    fn enabled_forwarding_returns_host_results() {
        let routes = routes(true);
        assert_eq!(routes.call("dummy_thing_path", &[]).unwrap(), "/dummy_thing");
        assert_eq!(
            routes.call("dummy_thing_url", &[]).unwrap(),
            "http://host/dummy_thing"
        );
        assert!(routes.responds_to("dummy_thing_url"));
    }

    #[test]
    fn arguments_are_forwarded() {
        let routes = routes(true);
        assert_eq!(routes.call("post_path", &[json!(42)]).unwrap(), "/posts/42");
        assert_eq!(
            routes.call("post_path", &[json!("hello-world")]).unwrap(),
            "/posts/hello-world"
        );
    }

    #[test]
    fn non_route_helpers_are_never_reachable() {
        for enabled in [false, true] {
            let routes = routes(enabled);
            assert_eq!(routes.call("secret", &[]), not_found("secret"));
            assert!(!routes.responds_to("secret"));
        }
    }

    #[test]
    fn unknown_routes_are_not_found() {
        let routes = routes(true);
        assert_eq!(routes.call("junk_path", &[]), not_found("junk_path"));
        assert_eq!(routes.call("junk_url", &[]), not_found("junk_url"));
    }

    /// Host whose helpers index into their arguments.
    struct StrictHost {
        calls: AtomicUsize,
    }

    impl RouteHelpers for StrictHost {
        fn call(&self, name: &str, args: &[RouteArg]) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (name == "post_path").then(|| format!("/posts/{}", args[0]))
        }

        fn has_helper(&self, name: &str) -> bool {
            name == "post_path"
        }
    }

    #[test]
    fn responds_to_does_not_run_host_helpers() {
        let host = Arc::new(StrictHost {
            calls: AtomicUsize::new(0),
        });
        let config = ConfigHandle::new(BlogConfig {
            inline_main_app_named_routes: true,
            ..BlogConfig::default()
        });
        let routes = MainAppRoutes::new(host.clone(), config);

        assert!(routes.responds_to("post_path"));
        assert!(!routes.responds_to("edit_post_path"));
        assert_eq!(host.calls.load(Ordering::SeqCst), 0);

        assert_eq!(routes.call("post_path", &[json!(7)]).unwrap(), "/posts/7");
        assert_eq!(host.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn gate_is_checked_at_call_time() {
        let config = ConfigHandle::new(BlogConfig::default());
        let routes = MainAppRoutes::new(host(), config.clone());
        assert!(routes.call("dummy_thing_path", &[]).is_err());

        config.configure(|c| c.inline_main_app_named_routes = true);
        assert_eq!(routes.call("dummy_thing_path", &[]).unwrap(), "/dummy_thing");
    }
}
