use crate::errors::AppError;
use crate::models::{
    Catalog, GuardCompletion, MasteryStatus, PageQuery, ProgressRecord, ProgressSummary,
    ResetForm, ResetRequest, SearchLinkQuery, SearchLinkResponse, SetStatusRequest, StatusQuery,
    StatusResponse, ToggleForm, technique_id,
};
use crate::search::technique_search_url;
use crate::state::AppState;
use crate::stats::{build_summary, guard_completion};
use crate::ui::{PageView, Section, render_index};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use tracing::info;

pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let record = state.progress.lock().await.load().await;
    Html(render_index(&PageView {
        catalog: &state.catalog,
        record: &record,
        section: Section::parse(query.section.as_deref()),
        selected_guard: query.guard,
        notice: state.catalog_notice.as_deref(),
    }))
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(Catalog::clone(&state.catalog))
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressRecord> {
    Json(state.progress.lock().await.load().await)
}

pub async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Json<StatusResponse> {
    let status = state
        .progress
        .lock()
        .await
        .get_status(&query.technique_id)
        .await;
    Json(StatusResponse {
        technique_id: query.technique_id,
        status,
    })
}

/// Sets the status literally; `none` clears it. The id is stored exactly as
/// sent, orphans included.
pub async fn set_status(
    State(state): State<AppState>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let status: MasteryStatus = payload.status.parse()?;

    let progress = state.progress.lock().await;
    progress.set_status(&payload.technique_id, status).await?;
    let status = progress.get_status(&payload.technique_id).await;

    Ok(Json(StatusResponse {
        technique_id: payload.technique_id,
        status,
    }))
}

pub async fn reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<ProgressSummary>, AppError> {
    if !payload.confirm {
        return Err(AppError::bad_request("reset requires confirm: true"));
    }

    let progress = state.progress.lock().await;
    progress.reset().await?;
    info!("progress reset");
    Ok(Json(build_summary(&state.catalog, &progress.load().await)))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<ProgressSummary> {
    let record = state.progress.lock().await.load().await;
    Json(build_summary(&state.catalog, &record))
}

pub async fn get_guard_completion(
    State(state): State<AppState>,
    Path(guard_id): Path<u32>,
) -> Result<Json<GuardCompletion>, AppError> {
    let guard = state
        .catalog
        .guard(guard_id)
        .ok_or_else(|| AppError::not_found(format!("no guard with id {guard_id}")))?;
    let record = state.progress.lock().await.load().await;

    Ok(Json(GuardCompletion {
        guard_id: guard.id,
        guard_name: guard.name.clone(),
        completion: guard_completion(guard, &record),
    }))
}

pub async fn search_link(Query(query): Query<SearchLinkQuery>) -> Json<SearchLinkResponse> {
    Json(SearchLinkResponse {
        url: technique_search_url(&query.technique, &query.guard),
    })
}

/// Status button click: clicking the active status clears it, any other
/// status replaces it.
pub async fn toggle_status(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    let clicked: MasteryStatus = form.status.parse()?;
    let id = technique_id(form.guard_id, &form.technique);

    let progress = state.progress.lock().await;
    let next = progress.get_status(&id).await.toggled(clicked);
    progress.set_status(&id, next).await?;

    Ok(Redirect::to(&format!("/?guard={}", form.guard_id)))
}

pub async fn reset_form(
    State(state): State<AppState>,
    Form(form): Form<ResetForm>,
) -> Result<Redirect, AppError> {
    if form.confirm != "yes" {
        return Err(AppError::bad_request("reset was not confirmed"));
    }

    state.progress.lock().await.reset().await?;
    info!("progress reset");
    Ok(Redirect::to("/?section=progress"))
}
