//! Album handlers (admin only)

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use bodybell_db::AlbumRepository;
use bodybell_types::{Album, AlbumId, AlbumPatch, AlbumWithArtist, NewAlbum};

use super::{record_mutation, SuccessResponse};
use crate::error::{ApiError, ApiResult, DbResultExt};
use crate::extractors::{AdminUser, ValidJson};
use crate::state::AppState;

const ENTITY: &str = "Album";

/// GET /api/albums
///
/// Albums whose artist no longer exists are left out.
pub async fn list_albums(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<AlbumWithArtist>>> {
    let albums = state.repos.albums_with_artists().await?;
    Ok(Json(albums))
}

/// POST /api/albums
pub async fn create_album(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidJson(input): ValidJson<NewAlbum>,
) -> ApiResult<Json<Album>> {
    let album = state.repos.albums.create(input).await?;
    tracing::info!(album_id = %album.id, artist_id = %album.artist_id, by = %admin.email, "Album created");
    record_mutation("album", "create");
    Ok(Json(album))
}

/// GET /api/albums/{id}
pub async fn get_album(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<AlbumId>,
) -> ApiResult<Json<AlbumWithArtist>> {
    let album = state.repos.album_with_artist(&id).await.or_not_found(ENTITY)?;
    Ok(Json(album))
}

/// PUT /api/albums/{id}
pub async fn update_album(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<AlbumId>,
    body: Bytes,
) -> ApiResult<Json<Album>> {
    // A missing record wins over a bad body
    if state.repos.albums.find(&id).await?.is_none() {
        return Err(ApiError::NotFound(ENTITY));
    }
    let ValidJson(patch) = ValidJson::<AlbumPatch>::from_bytes(&body)?;

    let album = state
        .repos
        .albums
        .update(&id, patch)
        .await
        .or_not_found(ENTITY)?;
    tracing::info!(album_id = %album.id, by = %admin.email, "Album updated");
    record_mutation("album", "update");
    Ok(Json(album))
}

/// DELETE /api/albums/{id}
pub async fn delete_album(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<AlbumId>,
) -> ApiResult<Json<SuccessResponse>> {
    state.repos.albums.delete(&id).await.or_not_found(ENTITY)?;
    tracing::info!(album_id = %id, by = %admin.email, "Album deleted");
    record_mutation("album", "delete");
    Ok(Json(SuccessResponse { success: true }))
}
