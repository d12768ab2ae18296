#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use log::{error, info};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::chart::ChartKind;
use crate::config::Config;
use crate::controller::{ControlEvent, Controller, Update};
use crate::dataset::Dataset;
use crate::error::DashboardError;
use crate::export;
use crate::filter::filter;
use crate::layout::{self, Layout};
use crate::loader;
use crate::render::{self, PngOptions};
use crate::selection::{Selection, SelectionPatch};
use crate::session::{SESSION_COOKIE, SessionStore};

pub struct AppState {
    layout: Layout,
    page: String,
    sessions: SessionStore,
    png: PngOptions,
}

impl AppState {
    /// Build the layout once and set up an empty session store
    pub fn new(dataset: Dataset, session_ttl: Duration) -> Result<Self, DashboardError> {
        let layout = layout::build_layout(&dataset)?;
        let page = layout::render_html(&layout);
        let sessions = SessionStore::new(dataset, layout.initial.clone(), session_ttl);

        Ok(AppState {
            layout,
            page,
            sessions,
            png: PngOptions::default(),
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
    selection: Option<Selection>,
}

/// Error surfaced to the browser, with the selection still in effect
struct ApiError {
    error: DashboardError,
    selection: Option<Selection>,
}

impl From<DashboardError> for ApiError {
    fn from(error: DashboardError) -> Self {
        ApiError { error, selection: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.error.is_recoverable() {
            StatusCode::BAD_REQUEST
        } else {
            error!("Request failed: {}", self.error);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(ErrorResponse {
                status: "error".to_string(),
                message: self.error.to_string(),
                selection: self.selection,
            }),
        )
            .into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/layout", get(get_layout))
        .route("/api/update", post(update_selection))
        .route("/api/chart/:kind", get(chart_png))
        .route("/api/export", get(export_records))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // a bad dataset stops us before the listener binds
    let dataset = loader::load(&config.data_path)?;
    let state = Arc::new(AppState::new(dataset, config.session_ttl)?);
    let app = router(state);

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on http://{}", config.bind_address());
    axum::serve(listener, app).await?;

    Ok(())
}

/// Session controller for the request, issuing a cookie for new sessions
fn session_controller(
    state: &AppState,
    jar: CookieJar,
) -> Result<(CookieJar, Arc<Mutex<Controller>>), DashboardError> {
    let existing = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());
    let (session_id, controller, created) = state.sessions.get_or_create(existing.as_deref())?;

    let jar = if created {
        jar.add(Cookie::build((SESSION_COOKIE, session_id)).path("/").http_only(true))
    } else {
        jar
    };
    Ok((jar, controller))
}

fn lock(controller: &Mutex<Controller>) -> MutexGuard<'_, Controller> {
    controller.lock().unwrap_or_else(|e| e.into_inner())
}

async fn serve_dashboard(State(state): State<Arc<AppState>>, jar: CookieJar) -> Result<Response, ApiError> {
    let (jar, _) = session_controller(&state, jar)?;
    Ok((jar, Html(state.page.clone())).into_response())
}

async fn get_layout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.layout.clone())
}

async fn update_selection(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<SelectionPatch>, JsonRejection>,
) -> Result<(CookieJar, Json<Update>), ApiError> {
    let (jar, controller) = session_controller(&state, jar)?;
    let mut controller = lock(&controller);

    // an unparseable body (e.g. a cleared date field) is a rejected selection
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            return Err(ApiError {
                error: DashboardError::InvalidSelection(rejection.body_text()),
                selection: Some(controller.selection().clone()),
            });
        }
    };

    match controller.dispatch(ControlEvent::Patch(patch)) {
        Ok(update) => Ok((jar, Json(update))),
        Err(error) => Err(ApiError {
            error,
            selection: Some(controller.selection().clone()),
        }),
    }
}

async fn chart_png(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let Some(kind) = ChartKind::from_name(&kind) else {
        return Ok((StatusCode::NOT_FOUND, "unknown chart").into_response());
    };

    let (jar, controller) = session_controller(&state, jar)?;
    let spec = {
        let controller = lock(&controller);
        let current = controller.current();
        match kind {
            ChartKind::Price => current.price_chart.clone(),
            ChartKind::Volume => current.volume_chart.clone(),
        }
    };

    let png = render::render_png(&spec, &state.png)?;
    Ok((
        jar,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    )
        .into_response())
}

async fn export_records(State(state): State<Arc<AppState>>, jar: CookieJar) -> Result<Response, ApiError> {
    let (jar, controller) = session_controller(&state, jar)?;
    let csv = {
        let controller = lock(&controller);
        export::to_csv(filter(controller.dataset(), controller.selection()))?
    };

    Ok((
        jar,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"avocado_selection.csv\""),
        ],
        csv,
    )
        .into_response())
}
