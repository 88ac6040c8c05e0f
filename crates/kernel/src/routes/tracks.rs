//! Track collection API routes.
//!
//! `GET /api/tracks` lists the collection with filters, sort, and
//! pagination; `GET /api/tracks/{id}` serves a single resource.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use crate::api::document::{JsonApi, TrackCollectionDocument, TrackDocument, TrackResource};
use crate::api::pagination::{PaginationMeta, build_links};
use crate::api::params::TrackListParams;
use crate::api::query::QueryDescriptor;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Track;
use crate::state::AppState;

/// Collection path for the track resource.
pub const TRACKS_PATH: &str = "/api/tracks";

/// Create the tracks router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tracks", get(list_tracks))
        .route("/api/tracks/{id}", get(get_track))
}

/// Absolute collection URL used as the base for pagination links.
fn collection_url(config: &Config) -> String {
    format!("{}{TRACKS_PATH}", config.site_url.trim_end_matches('/'))
}

async fn list_tracks(
    State(state): State<AppState>,
    params: TrackListParams,
) -> AppResult<Response> {
    let descriptor = QueryDescriptor::from_params(&params, state.config().default_page_limit)?;

    let tracks = Track::list(state.db(), &descriptor).await?;
    let total = Track::count(state.db(), &descriptor).await?;

    let meta = PaginationMeta::new(total, descriptor.limit, descriptor.offset);
    let base = collection_url(state.config());
    let links = build_links(&params, &meta, &base, descriptor.limit);

    let data: Vec<TrackResource> = tracks.into_iter().map(TrackResource::from).collect();

    Ok(JsonApi(TrackCollectionDocument { data, links, meta }).into_response())
}

async fn get_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::bad_request(format!("invalid track id '{id}'")))?;

    let track = Track::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(JsonApi(TrackDocument {
        data: TrackResource::from(track),
    })
    .into_response())
}
