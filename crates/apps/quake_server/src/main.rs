use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use http::StatusCode;
use scene::{MapConfig, MapDocument};
use serde_json::{json, Value};
use streaming::{DataLoader, HttpFetcher, LoadError};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod page;

use config::{Cli, Command};

#[derive(Clone)]
struct AppState {
    loader: Arc<DataLoader<HttpFetcher>>,
    map: Arc<MapConfig>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main(Cli::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main(cli: Cli) -> Result<(), String> {
    let map = cli.map.map_config();
    if map.access_token.is_none() {
        warn!("no tile access token configured; basemap tiles will not load");
    }

    let state = AppState {
        loader: Arc::new(DataLoader::new(
            cli.map.loader_config(),
            HttpFetcher::default(),
        )),
        map: Arc::new(map),
    };

    match cli.command {
        Command::Serve { addr } => serve(state, addr).await,
        Command::Render { out } => render_to_file(&state, &out).await,
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/map", get(map_document))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve(state: AppState, addr: SocketAddr) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind {addr}: {e}"))?;
    info!("quake map listening on http://{addr}");
    axum::serve(listener, app(state))
        .await
        .map_err(|e| format!("server: {e}"))
}

async fn render_to_file(state: &AppState, out: &Path) -> Result<(), String> {
    let doc = render_document(state).await.map_err(|e| e.to_string())?;
    let html = page::render_page(&doc).map_err(|e| format!("json: {e}"))?;
    tokio::fs::write(out, html)
        .await
        .map_err(|e| format!("write {}: {e}", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

async fn render_document(state: &AppState) -> Result<MapDocument, LoadError> {
    let view = state.loader.render(&state.map).await?;
    Ok(view.to_document())
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn index(State(state): State<AppState>) -> Response {
    match render_document(&state).await {
        Ok(doc) => match page::render_page(&doc) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                error!("map document serialization failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "render failed").into_response()
            }
        },
        Err(err) => {
            error!("render pass failed: {err}");
            let body = page::render_error_page(err.stage(), &err.to_string());
            (StatusCode::BAD_GATEWAY, Html(body)).into_response()
        }
    }
}

async fn map_document(
    State(state): State<AppState>,
) -> Result<Json<MapDocument>, (StatusCode, Json<Value>)> {
    render_document(&state).await.map(Json).map_err(|err| {
        error!("render pass failed: {err}");
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": err.to_string(), "stage": err.stage() })),
        )
    })
}
