use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use gitwiki::{LogOptions, PageStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use crate::templates;

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub wiki: PageStore,
}

impl AppState {
    pub fn new(wiki: PageStore) -> Self {
        Self { wiki }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub body: String,
}

/// Build the router for all wiki endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/pages", get(list_pages))
        .route("/{page}/edit", get(edit_page))
        .route("/{page}/history", get(page_history))
        .route("/{page}", get(show_page).post(update_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run a blocking storage call off the async runtime.
async fn blocking<F, T>(f: F) -> AppResult<T>
where
    F: FnOnce() -> gitwiki::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Join(e.to_string()))?
        .map_err(AppError::from)
}

async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!(
        "/{}",
        templates::encode_segment(state.wiki.homepage())
    ))
}

async fn list_pages(State(state): State<AppState>) -> AppResult<Html<String>> {
    let wiki = state.wiki.clone();
    let names = blocking(move || {
        Ok(wiki
            .find_all()?
            .iter()
            .map(|p| p.name().to_string())
            .collect::<Vec<_>>())
    })
    .await?;
    Ok(Html(templates::list(state.wiki.homepage(), &names)))
}

async fn show_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let wiki = state.wiki.clone();
    let (name, body) = blocking(move || {
        let page = wiki.find(&name)?.into_result()?;
        let body = page.render_to_html()?;
        Ok((page.name().to_string(), body))
    })
    .await?;
    Ok(Html(templates::show(state.wiki.homepage(), &name, &body)))
}

async fn edit_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let wiki = state.wiki.clone();
    let (name, content) = blocking(move || {
        let page = wiki.find_or_create(&name)?;
        let content = String::from_utf8_lossy(&page.content()?).into_owned();
        Ok((page.name().to_string(), content))
    })
    .await?;
    Ok(Html(templates::edit(state.wiki.homepage(), &name, &content)))
}

async fn page_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let wiki = state.wiki.clone();
    let lookup_name = name.clone();
    let commits = blocking(move || {
        wiki.find(&lookup_name)?.into_result()?;
        wiki.log(LogOptions {
            page: Some(lookup_name),
            ..Default::default()
        })
    })
    .await?;
    Ok(Html(templates::history(state.wiki.homepage(), &name, &commits)))
}

async fn update_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<EditForm>,
) -> AppResult<Redirect> {
    let wiki = state.wiki.clone();
    let name = blocking(move || {
        let mut page = wiki.find_or_create(&name)?;
        if let Some(oid) = page.update_content(form.body.as_bytes())? {
            tracing::info!(page = %page.name(), blob = %oid, "page saved");
        }
        Ok(page.name().to_string())
    })
    .await?;
    Ok(Redirect::to(&format!("/{}", templates::encode_segment(&name))))
}
