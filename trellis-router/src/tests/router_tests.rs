//! Router tests - navigation protocol, outlets, links and history
//!
//! Scenario tests drive a router over a `MemoryHistory` and inspect the
//! connected outlet and link handles.

use crate::{
    Component, History, MemoryHistory, MiddlewareOutcome, Module, NavigationContext, RouteProps,
    RouteRecord, RouteTree, Router, RouterConfig, RouterError, RouterErrorCode, View,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

// =============================================================================
// Test Helpers
// =============================================================================

fn page(name: &'static str) -> Component {
    Component::new(name, move |_| View::text(name))
}

fn user_page() -> Component {
    Component::new("User", |props: &RouteProps| {
        View::text(format!("User {}", props.param("id").unwrap_or("?")))
    })
}

fn app_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("/").redirect("/home"),
        RouteRecord::new("/home").title("Home").component(page("H")),
        RouteRecord::new("/about").title("About").component(page("About")),
        RouteRecord::new("/admin")
            .title("Admin")
            .component(page("A"))
            .children(vec![
                RouteRecord::new("users").title("Users").component(page("U")),
                RouteRecord::new("settings").component(page("S")),
            ]),
        RouteRecord::new("/users/:id").name("user").component(user_page()),
    ]
}

fn router_with(routes: Vec<RouteRecord>) -> (Router, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let router = Router::builder()
        .routes(routes)
        .history(history.clone())
        .build()
        .unwrap();
    (router, history)
}

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test]
async fn test_root_redirects_to_home() {
    let (router, history) = router_with(app_routes());
    let outlet = router.connect_outlet().await;

    let loaded = router.start().await.unwrap();

    assert!(!loaded, "the redirected load reports false");
    assert_eq!(outlet.view().await, View::text("H"));
    assert_eq!(history.pathname(), "/home");
    assert_eq!(history.entries(), vec!["/", "/home"]);
    assert_eq!(history.title().as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_route_redirect_to_current_path_adds_no_entry() {
    let mut routes = app_routes();
    routes.push(RouteRecord::new("/go-home").redirect("/home"));
    let (router, history) = router_with(routes);
    let outlet = router.connect_outlet().await;

    assert!(router.navigate("/home").await.unwrap());
    assert!(!router.navigate("/go-home").await.unwrap());

    assert_eq!(outlet.view().await, View::text("H"));
    assert_eq!(history.entries(), vec!["/", "/home"]);
}

#[tokio::test]
async fn test_middleware_redirect_to_current_path_adds_no_entry() {
    let history = Arc::new(MemoryHistory::default());
    let router = Router::builder()
        .routes(app_routes())
        .history(history.clone())
        .middleware(|ctx: NavigationContext| async move {
            if ctx.to.path.starts_with("/admin") {
                return Ok(MiddlewareOutcome::Redirect("/about".into()));
            }
            Ok(MiddlewareOutcome::Continue)
        })
        .build()
        .unwrap();
    let outlet = router.connect_outlet().await;

    assert!(router.navigate("/about").await.unwrap());
    assert!(!router.navigate("/admin/users").await.unwrap());

    assert_eq!(outlet.view().await, View::text("About"));
    assert_eq!(history.entries(), vec!["/", "/about"]);
    assert_eq!(router.current_route().await.unwrap().path, "/about");
}

#[tokio::test]
async fn test_nested_outlets_render_chain() {
    let (router, history) = router_with(app_routes());
    let top = router.connect_outlet().await;
    let nested = router.connect_outlet().await;

    assert!(router.navigate("/admin/users").await.unwrap());

    assert_eq!(top.view().await, View::text("A"));
    assert_eq!(nested.view().await, View::text("U"));
    assert_eq!(top.rendered_path().await.as_deref(), Some("/admin"));
    assert_eq!(nested.rendered_path().await.as_deref(), Some("/admin/users"));
    assert_eq!(history.pathname(), "/admin/users");
    assert_eq!(history.title().as_deref(), Some("Users"));
}

#[tokio::test]
async fn test_shallower_route_clears_deeper_outlets() {
    let (router, _history) = router_with(app_routes());
    let top = router.connect_outlet().await;
    let nested = router.connect_outlet().await;

    router.navigate("/admin/users").await.unwrap();
    router.navigate("/home").await.unwrap();

    assert_eq!(top.view().await, View::text("H"));
    assert!(nested.view().await.is_empty());
    assert_eq!(nested.rendered_path().await, None);
}

#[tokio::test]
async fn test_sibling_navigation_keeps_parent() {
    let (router, _history) = router_with(app_routes());
    let top = router.connect_outlet().await;
    let nested = router.connect_outlet().await;

    router.navigate("/admin/users").await.unwrap();
    let before = top.rendered().await;
    router.navigate("/admin/settings").await.unwrap();

    assert_eq!(top.rendered().await, before);
    assert_eq!(nested.view().await, View::text("S"));
}

#[tokio::test]
async fn test_params_change_rerenders() {
    let (router, _history) = router_with(app_routes());
    let outlet = router.connect_outlet().await;

    router.navigate("/users/1").await.unwrap();
    assert_eq!(outlet.view().await, View::text("User 1"));

    router.navigate("/users/2").await.unwrap();
    assert_eq!(outlet.view().await, View::text("User 2"));
    assert_eq!(
        router.current_params().await.get("id").map(String::as_str),
        Some("2")
    );
    assert_eq!(
        router.current_route().await.unwrap().name.as_deref(),
        Some("user")
    );
}

#[tokio::test]
async fn test_query_reaches_component() {
    let search = Component::new("Search", |props: &RouteProps| {
        let q = props
            .query
            .iter()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        View::text(format!("Results for {}", q))
    });
    let (router, history) = router_with(vec![RouteRecord::new("/search").component(search)]);
    let outlet = router.connect_outlet().await;
    let link = router.connect_link("/search").await;

    router.navigate("/search?q=rust").await.unwrap();

    assert_eq!(outlet.view().await, View::text("Results for rust"));
    assert_eq!(history.location(), "/search?q=rust");
    assert!(link.is_active());
}

#[tokio::test]
async fn test_navigate_to_current_path_is_noop() {
    let (router, history) = router_with(app_routes());
    router.connect_outlet().await;

    assert!(router.navigate("/about").await.unwrap());
    assert!(!router.navigate("/about").await.unwrap());
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn test_not_found_renders_placeholder() {
    let (router, history) = router_with(app_routes());
    let top = router.connect_outlet().await;
    let nested = router.connect_outlet().await;
    router.navigate("/admin/users").await.unwrap();

    assert!(router.navigate("/missing").await.unwrap());

    assert_eq!(top.view().await, View::text("404 - Not Found"));
    assert!(nested.view().await.is_empty());
    assert_eq!(top.rendered_path().await, None);
    assert_eq!(history.pathname(), "/missing");
    assert_eq!(router.current_route().await.unwrap().path, "/missing");
}

#[tokio::test]
async fn test_not_found_text_is_configurable() {
    let router = Router::builder()
        .config(RouterConfig::new().with_not_found_text("Nothing here"))
        .build()
        .unwrap();
    let outlet = router.connect_outlet().await;

    router.navigate("/anything").await.unwrap();
    assert_eq!(outlet.view().await, View::text("Nothing here"));
}

#[tokio::test]
async fn test_missing_outlet_is_silent() {
    let (router, history) = router_with(app_routes());
    let top = router.connect_outlet().await;

    assert!(router.navigate("/admin/users").await.unwrap());
    assert_eq!(top.view().await, View::text("A"));
    assert_eq!(history.pathname(), "/admin/users");
}

#[tokio::test]
async fn test_disconnected_outlet_is_not_written() {
    let (router, _history) = router_with(app_routes());
    let first = router.connect_outlet().await;
    let second = router.connect_outlet().await;
    router.disconnect_outlet(&first).await;

    router.navigate("/admin/users").await.unwrap();

    assert!(first.view().await.is_empty());
    assert!(!first.is_connected().await);
    assert_eq!(second.view().await, View::text("A"));
    assert_eq!(router.outlet_count().await, 1);
}

#[tokio::test]
async fn test_outlet_render_wraps_view() {
    let (router, _history) = router_with(app_routes());
    let outlet = router.connect_outlet().await;
    router.navigate("/about").await.unwrap();

    assert_eq!(
        outlet.render().await.render_to_string(),
        format!(r#"<div data-router-outlet="{}">About</div>"#, outlet.id())
    );
}

// =============================================================================
// Lazy components
// =============================================================================

#[tokio::test]
async fn test_lazy_component_loads_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let lazy = RouteRecord::new("/lazy").lazy({
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Module { default: page("L") }) }
        }
    });
    let (router, _history) = router_with(vec![lazy, RouteRecord::new("/home").component(page("H"))]);
    let outlet = router.connect_outlet().await;

    router.navigate("/lazy").await.unwrap();
    router.navigate("/home").await.unwrap();
    router.navigate("/lazy").await.unwrap();

    assert_eq!(outlet.view().await, View::text("L"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_loader_failure_keeps_previous_content() {
    let calls = Arc::new(AtomicUsize::new(0));
    let broken = RouteRecord::new("/broken").lazy({
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<Component, _>(RouterError::internal("chunk missing")) }
        }
    });
    let (router, history) = router_with(vec![broken, RouteRecord::new("/home").component(page("H"))]);
    let outlet = router.connect_outlet().await;
    router.navigate("/home").await.unwrap();

    let err = router.navigate("/broken").await.unwrap_err();

    assert_eq!(err.code, RouterErrorCode::LoaderFailed);
    assert!(err.cause.as_deref().unwrap_or_default().contains("chunk missing"));
    assert_eq!(outlet.view().await, View::text("H"));
    assert_eq!(outlet.pending().await, None);
    assert_eq!(history.pathname(), "/home");

    // Failures are not cached
    assert!(router.navigate("/broken").await.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_racing_navigations_keep_latest() {
    let started = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let slow = RouteRecord::new("/slow").lazy({
        let started = started.clone();
        let gate = gate.clone();
        move || {
            let started = started.clone();
            let gate = gate.clone();
            async move {
                started.notify_one();
                gate.notified().await;
                Ok(page("Slow"))
            }
        }
    });
    let (router, history) =
        router_with(vec![slow, RouteRecord::new("/fast").component(page("Fast"))]);
    let outlet = router.connect_outlet().await;

    let pending = tokio::spawn({
        let router = router.clone();
        async move { router.navigate("/slow").await }
    });
    started.notified().await;

    assert!(router.navigate("/fast").await.unwrap());
    gate.notify_one();
    let slow_loaded = pending.await.unwrap().unwrap();

    assert!(!slow_loaded, "the overtaken load reports false");
    assert_eq!(outlet.view().await, View::text("Fast"));
    assert_eq!(outlet.rendered_path().await.as_deref(), Some("/fast"));
    assert_eq!(history.entries(), vec!["/", "/fast"]);
}

// =============================================================================
// Links
// =============================================================================

#[tokio::test]
async fn test_links_track_current_path() {
    let (router, _history) = router_with(app_routes());
    router.connect_outlet().await;
    let home = router.connect_link("/home").await;
    let about = router.connect_link("/about").await;

    router.navigate("/home").await.unwrap();
    assert!(home.is_active());
    assert!(!about.is_active());

    router.follow(&about).await.unwrap();
    assert!(!home.is_active());
    assert!(about.is_active());

    router.navigate("/missing").await.unwrap();
    assert!(!home.is_active());
    assert!(!about.is_active());
}

#[tokio::test]
async fn test_link_connected_after_navigation_starts_active() {
    let (router, _history) = router_with(app_routes());
    router.navigate("/about").await.unwrap();

    let about = router.connect_link("/about").await;
    assert!(about.is_active());
    assert_eq!(
        about.render("About").render_to_string(),
        r#"<a href="/about" data-link="" class="active">About</a>"#
    );
}

#[tokio::test]
async fn test_disconnected_link_stops_tracking() {
    let (router, _history) = router_with(app_routes());
    let home = router.connect_link("/home").await;
    router.disconnect_link(&home).await;

    router.navigate("/home").await.unwrap();
    assert!(!home.is_active());
    assert_eq!(router.link_count().await, 0);
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn test_back_then_popstate_restores_previous_route() {
    let (router, history) = router_with(app_routes());
    let outlet = router.connect_outlet().await;
    router.navigate("/home").await.unwrap();
    router.navigate("/about").await.unwrap();

    router.back();
    assert!(router.handle_popstate().await.unwrap());

    assert_eq!(history.pathname(), "/home");
    assert_eq!(outlet.view().await, View::text("H"));
    assert_eq!(history.entries(), vec!["/", "/home", "/about"]);
}

#[tokio::test]
async fn test_reverse_and_navigate() {
    let (router, _history) = router_with(app_routes());
    let outlet = router.connect_outlet().await;
    let params = std::collections::HashMap::from([("id".to_string(), "5".to_string())]);

    let path = router.reverse("user", &params).unwrap();
    router.navigate(&path).await.unwrap();
    assert_eq!(outlet.view().await, View::text("User 5"));
}

#[tokio::test]
async fn test_build_rejects_invalid_configuration() {
    let err = Router::builder()
        .config(RouterConfig::new().with_base_url("nope"))
        .build()
        .unwrap_err();
    assert_eq!(err.code, RouterErrorCode::InvalidPath);

    let err = RouteTree::with_base_url(Vec::new(), "nope").unwrap_err();
    assert_eq!(err.code, RouterErrorCode::InvalidPath);

    let err = Router::new(vec![RouteRecord::new("/*/x")]).unwrap_err();
    assert_eq!(err.code, RouterErrorCode::InvalidRoute);
}
