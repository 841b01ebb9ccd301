//! Demo application routes, components and middleware

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use trellis_router::prelude::*;

/// Shared application state
#[derive(Debug, Default)]
pub struct Session {
    signed_in: AtomicBool,
}

impl Session {
    /// Mark the session as signed in
    pub fn sign_in(&self) {
        self.signed_in.store(true, Ordering::SeqCst);
    }

    /// Returns true once signed in
    pub fn is_signed_in(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }
}

fn page(title: &'static str) -> Component {
    Component::new(title, move |_| {
        ElementView::new("section")
            .child(ElementView::new("h1").child(title))
            .into()
    })
}

fn user_page() -> Component {
    Component::new("User", |props: &RouteProps| {
        let id = props.param("id").unwrap_or("unknown").to_string();
        ElementView::new("article")
            .attr("data-user", id.clone())
            .child(format!("Profile of user {}", id))
            .into()
    })
}

fn docs_page() -> Component {
    Component::new("Docs", |props: &RouteProps| {
        View::text(format!("Docs page: {}", props.param("page").unwrap_or("index")))
    })
}

/// All routes of the demo application
pub fn create_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("/").redirect("/home"),
        RouteRecord::new("/home").title("Home").component(page("Home")),
        RouteRecord::new("/login").title("Sign in").component(page("Sign in")),
        RouteRecord::new("/users/:id")
            .name("user")
            .title("User")
            .component(user_page()),
        RouteRecord::new("/docs/*page").name("docs").component(docs_page()),
        RouteRecord::new("/admin")
            .title("Admin")
            .component(page("Admin"))
            .children(vec![
                RouteRecord::new("users").title("Admin users").component(page("Users")),
                RouteRecord::new("reports")
                    .title("Reports")
                    .lazy(|| async {
                        // Simulates fetching a code chunk
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(Module {
                            default: page("Reports"),
                        })
                    }),
            ]),
    ]
}

/// Build the router with logging and auth middleware
pub fn create_router(session: Arc<Session>) -> RouterResult<Router> {
    Router::builder()
        .config(RouterConfig::new().with_debug_logging(true))
        .routes(create_routes())
        .middleware(|ctx: NavigationContext| async move {
            tracing::info!(
                from = ?ctx.from.as_ref().map(|route| route.path.as_str()),
                to = %ctx.to.path,
                "Navigating"
            );
            Ok(MiddlewareOutcome::Continue)
        })
        .middleware(move |ctx: NavigationContext| {
            let session = session.clone();
            async move {
                if ctx.to.path.starts_with("/admin") && !session.is_signed_in() {
                    tracing::warn!(to = %ctx.to.path, "Not signed in, redirecting to login");
                    return Ok(MiddlewareOutcome::Redirect("/login".into()));
                }
                Ok(MiddlewareOutcome::Continue)
            }
        })
        .build()
}
