//! HTTP server rendering the site from the content directory on each request

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::content::{ContentStore, StoreError};
use crate::forms::{simulate_submission, ContactForm, CreatePostForm};
use crate::helpers::{root_prefix, url_for};
use crate::templates::{ContactPage, CreatePage, Pages, STYLESHEET};
use crate::Site;

/// Shared, read-only server state
pub struct AppState {
    pub site: Site,
    pub pages: Pages,
}

impl AppState {
    pub fn new(site: Site) -> Result<Self> {
        let pages = Pages::new(&site.config)?;
        Ok(Self { site, pages })
    }

    fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.site.config.submit_delay_ms)
    }

    fn html(&self, status: StatusCode, page: Result<String>) -> Response {
        match page {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render page: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }

    fn store_error(&self, e: StoreError) -> Response {
        tracing::error!("{}", e);
        self.html(StatusCode::INTERNAL_SERVER_ERROR, self.pages.error())
    }

    /// Run a content store read on the blocking pool
    async fn read_store<T, F>(&self, read: F) -> Result<T, Response>
    where
        F: FnOnce(&ContentStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.site.store();
        match tokio::task::spawn_blocking(move || read(&store)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(self.store_error(e)),
            Err(e) => {
                tracing::error!("Content read task failed: {}", e);
                Err(self.html(StatusCode::INTERNAL_SERVER_ERROR, self.pages.error()))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Build the application router, nested under the configured root
pub fn router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(home))
        .route("/blog", get(blog_index))
        .route("/blog/", get(blog_index))
        .route("/blog/:slug", get(blog_post))
        .route("/blog/:slug/", get(blog_post))
        .route("/contact", get(contact_form).post(contact_submit))
        .route("/contact/", get(contact_form).post(contact_submit))
        .route("/create", get(create_form).post(create_submit))
        .route("/create/", get(create_form).post(create_submit))
        .route("/assets/style.css", get(stylesheet));

    let prefix = root_prefix(&state.site.config);
    let app = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&prefix, routes)
    };

    app.fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let url = format!("http://{}:{}{}", ip, port, url_for(&site.config, "/"));
    let state = Arc::new(AppState::new(site)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    match state.read_store(ContentStore::list_all).await {
        Ok(posts) => state.html(StatusCode::OK, state.pages.home(&posts)),
        Err(response) => response,
    }
}

async fn blog_index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.read_store(ContentStore::list_all).await {
        Ok(posts) => state.html(StatusCode::OK, state.pages.blog(&posts, &params.q)),
        Err(response) => response,
    }
}

async fn blog_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let lookup = slug.clone();
    match state
        .read_store(move |store| store.get_by_slug(&lookup))
        .await
    {
        Ok(Some(post)) => state.html(StatusCode::OK, state.pages.post(&post)),
        Ok(None) => {
            tracing::debug!("Post {:?} not found", slug);
            state.html(StatusCode::NOT_FOUND, state.pages.post_not_found())
        }
        Err(response) => response,
    }
}

async fn contact_form(State(state): State<Arc<AppState>>) -> Response {
    state.html(StatusCode::OK, state.pages.contact(&ContactPage::default()))
}

async fn contact_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Response {
    match form.validate() {
        Ok(()) => {
            simulate_submission("contact", &form, state.submit_delay()).await;
            let page = ContactPage {
                success: true,
                ..Default::default()
            };
            state.html(StatusCode::OK, state.pages.contact(&page))
        }
        Err(errors) => {
            let page = ContactPage {
                form,
                errors,
                success: false,
            };
            state.html(StatusCode::UNPROCESSABLE_ENTITY, state.pages.contact(&page))
        }
    }
}

async fn create_form(State(state): State<Arc<AppState>>) -> Response {
    state.html(StatusCode::OK, state.pages.create(&CreatePage::default()))
}

async fn create_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreatePostForm>,
) -> Response {
    match form.validate() {
        Ok(()) => {
            simulate_submission("post", &form, state.submit_delay()).await;
            let page = CreatePage {
                draft: Some(form.to_draft(&state.site.config.author)),
                ..Default::default()
            };
            state.html(StatusCode::OK, state.pages.create(&page))
        }
        Err(errors) => {
            let page = CreatePage {
                form,
                errors,
                draft: None,
            };
            state.html(StatusCode::UNPROCESSABLE_ENTITY, state.pages.create(&page))
        }
    }
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    state.html(StatusCode::NOT_FOUND, state.pages.page_not_found())
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
