//! Headless walkthrough of the trellis router.
//!
//! Connects two nested outlets and a few links to a router over an in-memory
//! history, then drives it through redirects, guarded routes, lazy routes and
//! history traversal while logging what each outlet shows.

mod routes;

use routes::{Session, create_router};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trellis_router::prelude::*;

async fn show(ctx: &AppContext<Session>, outlets: &[OutletHandle], links: &[LinkHandle]) {
    let router = ctx.router();
    let location = router
        .current_route()
        .await
        .map(|route| route.path)
        .unwrap_or_default();

    tracing::info!(location = %location, history = %router.history().pathname(), "Current state");
    for (level, outlet) in outlets.iter().enumerate() {
        tracing::info!(level = level, html = %outlet.render().await.render_to_string(), "Outlet");
    }
    for link in links {
        tracing::info!(html = %link.render(link.to().to_string()).render_to_string(), "Link");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trellis_demo=info,trellis_router=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let session = Arc::new(Session::default());
    let router = create_router(session.clone())?;
    let ctx = AppContext::with_shared_state(router, session);
    let router = ctx.router();

    tracing::info!(routes = ?router.tree().paths(), "Routes compiled");

    let outlets = vec![router.connect_outlet().await, router.connect_outlet().await];
    let links = vec![
        router.connect_link("/home").await,
        router.connect_link("/admin/users").await,
    ];

    // Initial load of "/" redirects to /home
    router.start().await?;
    show(&ctx, &outlets, &links).await;

    let user = router.reverse("user", &HashMap::from([("id".to_string(), "42".to_string())]))?;
    router.navigate(&user).await?;
    show(&ctx, &outlets, &links).await;

    router.navigate("/docs/guide/routing").await?;
    show(&ctx, &outlets, &links).await;

    // Guarded until signed in
    router.follow(&links[1]).await?;
    show(&ctx, &outlets, &links).await;

    ctx.sign_in();
    router.follow(&links[1]).await?;
    show(&ctx, &outlets, &links).await;

    router.navigate("/admin/reports").await?;
    show(&ctx, &outlets, &links).await;

    router.navigate("/missing").await?;
    show(&ctx, &outlets, &links).await;

    router.back();
    router.handle_popstate().await?;
    show(&ctx, &outlets, &links).await;

    Ok(())
}
