//! HTTP layer.
//! Routes:
//! - `GET <config_endpoint>?config=<id>` configuration JSON
//! - `GET /demo?<snippet params>` a page embedding one snippet
//! - `GET /` redirect to `/demo`
//! - `<static_prefix>/*` static assets (the particles.js script)

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::Settings;
use crate::service::ParticlesService;
use crate::snippet::{CONFIG_KEY, ELEMENT_ID_KEY, is_safe_identifier};

pub const DEMO_PATH: &str = "/demo";

/// Builds the application router around a shared service.
pub fn router(service: Arc<ParticlesService>, settings: &Settings) -> Router {
    let static_files = ServeDir::new(settings.static_root());

    let app = Router::new()
        .route(service.config_endpoint(), get(particles_config))
        .route(DEMO_PATH, get(demo_page))
        .route("/", get(|| async { Redirect::temporary(DEMO_PATH) }));

    // Nesting at "/" isn't allowed; an empty prefix serves assets as the fallback.
    let prefix = settings.static_prefix.trim_end_matches('/');
    let app = if prefix.is_empty() {
        app.fallback_service(static_files)
    } else {
        app.nest_service(prefix, static_files)
    };

    app.with_state(service)
}

/// Binds `settings.bind` and serves until the process is stopped.
pub async fn serve(settings: Settings) -> Result<()> {
    check_routes(&settings)?;

    let service = Arc::new(ParticlesService::from_settings(&settings));
    info!("Default configuration id: {}", service.default_id());

    let app = router(Arc::clone(&service), &settings);

    let listener = TcpListener::bind(&settings.bind)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    info!("Serving configurations at http://{}{}", addr, service.config_endpoint());
    info!(
        "Serving static files from {} at {}",
        settings.static_root().display(),
        settings.static_prefix
    );

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}

/// Rejects route settings that axum would panic on or that shadow each other.
fn check_routes(settings: &Settings) -> Result<()> {
    let endpoint = settings.config_endpoint.as_str();
    let prefix = settings.static_prefix.trim_end_matches('/');

    if !endpoint.starts_with('/') {
        anyhow::bail!("config endpoint must start with '/', got {:?}", endpoint);
    }
    if endpoint == "/" || endpoint == DEMO_PATH {
        anyhow::bail!("config endpoint {:?} collides with a built-in route", endpoint);
    }
    if !prefix.is_empty() && !prefix.starts_with('/') {
        anyhow::bail!(
            "static prefix must start with '/' or be empty, got {:?}",
            settings.static_prefix
        );
    }
    for (name, path) in [("config endpoint", endpoint), ("static prefix", prefix)] {
        if path.contains(['{', '}', '*']) {
            anyhow::bail!("{} must not contain route captures, got {:?}", name, path);
        }
    }
    if !prefix.is_empty() {
        let shadowed = |route: &str| route == prefix || route.starts_with(&format!("{}/", prefix));
        if shadowed(endpoint) {
            anyhow::bail!(
                "config endpoint {:?} lies under static prefix {:?}",
                endpoint,
                prefix
            );
        }
        if shadowed(DEMO_PATH) {
            anyhow::bail!("static prefix {:?} collides with {}", prefix, DEMO_PATH);
        }
    }
    Ok(())
}

// *************** Handlers ***************

async fn particles_config(
    State(service): State<Arc<ParticlesService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    // First value wins when `config` is repeated.
    let id = pairs
        .iter()
        .find(|(key, _)| key == CONFIG_KEY)
        .map(|(_, value)| value.as_str());
    json_response(service.config_json(id))
}

async fn demo_page(
    State(service): State<Arc<ParticlesService>>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Html<String> {
    // Ids are written into the page verbatim; unsafe ones are dropped and synthesized.
    for key in [ELEMENT_ID_KEY, CONFIG_KEY] {
        if params.get(key).is_some_and(|v| !is_safe_identifier(v)) {
            debug!("Dropping unsafe {} parameter from demo request", key);
            params.remove(key);
        }
    }
    let snippet = service.shortcode(&params);
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>particles</title>\n</head>\n<body style=\"background: #111;\">{}</body>\n</html>\n",
        snippet
    ))
}

fn json_response(result: crate::error::Result<String>) -> Response {
    match result {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => {
            error!("Failed to encode configuration: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error generating JSON").into_response()
        }
    }
}

// *************** Tests ***************

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Config;
    use crate::presets::preset;
    use crate::random::ConfigRandomizer;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    struct TestServer {
        addr: SocketAddr,
        service: Arc<ParticlesService>,
    }

    impl TestServer {
        fn url(&self, path: &str) -> String {
            format!("http://{}{}", self.addr, path)
        }
    }

    async fn start(settings: Settings) -> TestServer {
        let service = Arc::new(ParticlesService::with_randomizer(
            &settings.config_endpoint,
            &settings.js_path,
            ConfigRandomizer::with_seed(99),
        ));
        let app = router(Arc::clone(&service), &settings);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        TestServer { addr, service }
    }

    #[tokio::test]
    async fn test_default_request_is_idempotent() {
        let server = start(Settings::default()).await;
        let client = reqwest::Client::new();

        let first = client.get(server.url("/api/particles-config")).send().await.unwrap();
        assert_eq!(first.status(), 200);
        assert_eq!(first.headers()["content-type"], "application/json");
        let first_body = first.text().await.unwrap();

        let second_body = client
            .get(server.url("/api/particles-config"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert_eq!(first_body, second_body);
        let decoded: Config = serde_json::from_str(&first_body).unwrap();
        assert_eq!(decoded, Config::default());
        assert_eq!(server.service.registry().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_creates_one_entry() {
        let server = start(Settings::default()).await;
        let client = reqwest::Client::new();
        assert!(!server.service.registry().contains("xyz"));

        let first = client
            .get(server.url("/api/particles-config?config=xyz"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(server.service.registry().len(), 2);

        let second = client
            .get(server.url("/api/particles-config?config=xyz"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(server.service.registry().len(), 2);

        let stored = server.service.registry().get("xyz").unwrap();
        assert_eq!(first, stored.to_json().unwrap());
    }

    #[tokio::test]
    async fn test_demo_page_registers_snippet_config() {
        let server = start(Settings::default()).await;
        let html = reqwest::get(server.url("/demo?preset=snow&id=demoEl&config=demo1"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains(r#"<div id="demoEl""#));
        assert!(html.contains("/api/particles-config?config=demo1"));
        assert_eq!(*server.service.registry().get("demo1").unwrap(), preset("snow"));
    }

    #[tokio::test]
    async fn test_root_redirects_to_demo() {
        let server = start(Settings::default()).await;
        let response = reqwest::get(server.url("/")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.url().path(), DEMO_PATH);
    }

    #[tokio::test]
    async fn test_static_script_is_served() {
        let dir = std::env::temp_dir().join(format!("particles-static-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("js")).unwrap();
        std::fs::write(dir.join("js").join("particles.min.js"), "window.particlesJS = {};").unwrap();

        let settings = Settings {
            static_dir: PathBuf::from(&dir),
            ..Settings::default()
        };
        let server = start(settings).await;
        let response = reqwest::get(server.url("/js/particles.min.js")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "window.particlesJS = {};");

        let missing = reqwest::get(server.url("/js/nope.js")).await.unwrap();
        assert_eq!(missing.status(), 404);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_custom_endpoint_path() {
        let settings = Settings {
            config_endpoint: "/particles.json".to_string(),
            ..Settings::default()
        };
        let server = start(settings).await;
        let response = reqwest::get(server.url("/particles.json?config=abc")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert!(server.service.registry().contains("abc"));
    }

    #[tokio::test]
    async fn test_encoding_failure_returns_plain_500() {
        let cause = serde_json::from_str::<Config>("not json").unwrap_err();
        let response = json_response(Err(crate::error::Error::Serialization(cause)));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Error generating JSON");
    }

    #[tokio::test]
    async fn test_repeated_config_param_uses_first_value() {
        let server = start(Settings::default()).await;
        let response = reqwest::get(server.url("/api/particles-config?config=a&config=b"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();

        assert!(server.service.registry().contains("a"));
        assert!(!server.service.registry().contains("b"));
        assert_eq!(body, server.service.registry().get("a").unwrap().to_json().unwrap());
    }

    #[tokio::test]
    async fn test_demo_page_drops_unsafe_ids() {
        let server = start(Settings::default()).await;
        let html = reqwest::get(server.url(
            "/demo?id=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E&config=x%27%29%3Balert(2)%2F%2F",
        ))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

        assert!(!html.contains("alert(1)"));
        assert!(!html.contains("alert(2)"));
        assert!(html.contains(r#"<div id="particles-particles-"#));
        // default id + one synthesized snippet id
        assert_eq!(server.service.registry().len(), 2);
    }

    fn settings_with(endpoint: &str, prefix: &str) -> Settings {
        Settings {
            config_endpoint: endpoint.to_string(),
            static_prefix: prefix.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_check_routes_accepts_defaults() {
        assert!(check_routes(&Settings::default()).is_ok());
        assert!(check_routes(&settings_with("/particles.json", "")).is_ok());
        assert!(check_routes(&settings_with("/particles.json", "/")).is_ok());
        assert!(check_routes(&settings_with("/jsconfig", "/js")).is_ok());
    }

    #[test]
    fn test_check_routes_rejects_bad_endpoints() {
        for endpoint in ["api/particles-config", "/", DEMO_PATH, "/js", "/js/config", "/{id}"] {
            assert!(
                check_routes(&settings_with(endpoint, "/js")).is_err(),
                "endpoint {:?} accepted",
                endpoint
            );
        }
    }

    #[test]
    fn test_check_routes_rejects_bad_prefixes() {
        for prefix in ["js", DEMO_PATH, "/demo/", "/*rest"] {
            assert!(
                check_routes(&settings_with("/api/particles-config", prefix)).is_err(),
                "prefix {:?} accepted",
                prefix
            );
        }
    }

    #[tokio::test]
    async fn test_serve_reports_bad_routes_instead_of_panicking() {
        for settings in [
            settings_with("api/particles-config", "/js"),
            settings_with(DEMO_PATH, "/js"),
            settings_with("/api/particles-config", "js"),
        ] {
            assert!(serve(settings).await.is_err());
        }
    }
}
