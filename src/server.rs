use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::items::ItemStore;
use crate::proxy::LlmProxy;
use crate::Error;

/// Shared state for the HTTP server.
pub struct AppState {
    pub proxy: LlmProxy,
    pub items: ItemStore,
}

impl AppState {
    pub fn new(proxy: LlmProxy) -> Self {
        Self {
            proxy,
            items: ItemStore::new(),
        }
    }
}

/// Build the axum `Router`.
///
/// - `GET /`: item list page
/// - `POST /add`: add an item from a form, then redirect to `/`
/// - `GET /api/items`: items as a JSON array
/// - `POST /api/llm`: relay a prompt to the chat-completion provider
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/add", post(add_item_handler))
        .route("/api/items", get(list_items_handler))
        .route("/api/llm", post(llm_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

// ============================================================================
// ITEM HANDLERS
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct AddItemForm {
    #[serde(default)]
    text: String,
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index(&state.items.list()))
}

/// Parses the body as a url-encoded form whatever the content type says, and
/// always redirects back to the index page.
async fn add_item_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Redirect {
    let form: AddItemForm = serde_urlencoded::from_bytes(&body).unwrap_or_default();
    state.items.add(&form.text);
    // 303 so browsers follow up with a GET.
    Redirect::to("/")
}

async fn list_items_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.items.list())
}

// ============================================================================
// LLM HANDLER
// ============================================================================

async fn llm_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.proxy.handle(&body).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            if e.status_code().is_server_error() {
                warn!("LLM relay failed: {}", e);
            }
            e.into_response()
        }
    }
}

// ============================================================================
// PAGE RENDERING
// ============================================================================

fn render_index(items: &[String]) -> String {
    let list = if items.is_empty() {
        "    <p>No items yet.</p>\n".to_string()
    } else {
        let entries: String = items
            .iter()
            .map(|item| format!("      <li>{}</li>\n", escape_html(item)))
            .collect();
        format!("    <ul>\n{entries}    </ul>\n")
    };

    format!(
        "<!doctype html>\n\
         <html>\n\
         <head>\n\
         \x20   <meta charset=\"utf-8\">\n\
         \x20   <title>Items</title>\n\
         </head>\n\
         <body>\n\
         \x20   <h1>Items</h1>\n\
         \x20   <form method=\"post\" action=\"/add\">\n\
         \x20     <input type=\"text\" name=\"text\" placeholder=\"New item\" autofocus>\n\
         \x20     <button type=\"submit\">Add</button>\n\
         \x20   </form>\n\
         {list}\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
