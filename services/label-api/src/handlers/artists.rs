//! Artist handlers (admin only)

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use bodybell_db::ArtistRepository;
use bodybell_types::{Artist, ArtistId, ArtistPatch, ArtistWithAlbums, NewArtist};

use super::{record_mutation, SuccessResponse};
use crate::error::{ApiError, ApiResult, DbResultExt};
use crate::extractors::{AdminUser, ValidJson};
use crate::state::AppState;

const ENTITY: &str = "Artist";

/// GET /api/artists
pub async fn list_artists(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<Artist>>> {
    let artists = state.repos.artists.list().await?;
    Ok(Json(artists))
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidJson(input): ValidJson<NewArtist>,
) -> ApiResult<Json<Artist>> {
    let artist = state.repos.artists.create(input).await?;
    tracing::info!(artist_id = %artist.id, by = %admin.email, "Artist created");
    record_mutation("artist", "create");
    Ok(Json(artist))
}

/// GET /api/artists/{id}
pub async fn get_artist(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ArtistId>,
) -> ApiResult<Json<Artist>> {
    let artist = state.repos.artists.get(&id).await.or_not_found(ENTITY)?;
    Ok(Json(artist))
}

/// PUT /api/artists/{id}
pub async fn update_artist(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<ArtistId>,
    body: Bytes,
) -> ApiResult<Json<Artist>> {
    // A missing record wins over a bad body
    if state.repos.artists.find(&id).await?.is_none() {
        return Err(ApiError::NotFound(ENTITY));
    }
    let ValidJson(patch) = ValidJson::<ArtistPatch>::from_bytes(&body)?;

    let artist = state
        .repos
        .artists
        .update(&id, patch)
        .await
        .or_not_found(ENTITY)?;
    tracing::info!(artist_id = %artist.id, by = %admin.email, "Artist updated");
    record_mutation("artist", "update");
    Ok(Json(artist))
}

/// DELETE /api/artists/{id}
pub async fn delete_artist(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<ArtistId>,
) -> ApiResult<Json<SuccessResponse>> {
    state.repos.artists.delete(&id).await.or_not_found(ENTITY)?;
    tracing::info!(artist_id = %id, by = %admin.email, "Artist deleted");
    record_mutation("artist", "delete");
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/artists/{id}/albums
pub async fn get_artist_albums(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ArtistId>,
) -> ApiResult<Json<ArtistWithAlbums>> {
    let catalog = state.repos.artist_with_albums(&id).await.or_not_found(ENTITY)?;
    Ok(Json(catalog))
}
