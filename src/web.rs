use std::any::Any;

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    extract::OriginalUri,
    http::{Response, StatusCode, header},
    response::{Html, IntoResponse, Redirect},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::{self, AppState};
use crate::views::{self, Resolution, View};

const RECOVERY_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Something went wrong</title></head>
<body>
<h1>Something went wrong</h1>
<p>The page failed to render.</p>
<p><a href="/">Back to the dashboard</a></p>
</body>
</html>
"#;

fn recovery_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        RECOVERY_PAGE,
    )
        .into_response()
}

fn shell(view: View) -> Html<String> {
    let nav: String = View::ALL
        .iter()
        .map(|v| format!(r#"<a href="{}">{}</a>"#, v.path(), v.title()))
        .collect::<Vec<_>>()
        .join(" ");
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Peakcision - {title}</title></head>
<body>
<nav>{nav}</nav>
<main id="app" data-view="{path}"><h1>{title}</h1></main>
</body>
</html>
"#,
        title = view.title(),
        path = view.path(),
    ))
}

async fn render_view(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    match views::resolve(uri.path()) {
        Resolution::Render(view) => shell(view).into_response(),
        Resolution::Redirect(view) => Redirect::to(view.path()).into_response(),
    }
}

/// Adds tracing, CORS and panic recovery to a router
pub fn with_layers(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(recovery_response))
}

/// The full service: catalog and planner API under `/api`, view routes at
/// the root, unknown paths redirected to the dashboard.
pub fn app(state: AppState) -> Router {
    let pages = View::ALL
        .into_iter()
        .fold(Router::new(), |router, view| router.route(view.path(), get(render_view)));

    with_layers(
        pages
            .nest("/api", api::router(state))
            .fallback(|| async { Redirect::to(View::DEFAULT.path()) }),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down web server");
}

pub async fn run(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::preferences::{PreferencesContext, UserPreferences};
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState {
            catalog: Arc::new(StaticCatalog::seeded()),
            preferences: PreferencesContext::in_memory(UserPreferences::default()),
            default_limit: 50,
        }
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_known_view_renders() {
        let response = app(state())
            .oneshot(Request::get("/roi").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"data-view="/roi""#));
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_to_dashboard() {
        let response = app(state())
            .oneshot(Request::get("/trail-map").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_panic_renders_recovery_page() {
        async fn boom() -> &'static str {
            panic!("render failure")
        }

        let router = with_layers(Router::new().route("/boom", get(boom)));
        let response = router
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.contains(r#"<a href="/">"#));
    }
}
