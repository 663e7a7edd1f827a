//! In-memory repository implementations
//!
//! Back the service when no database is configured, and the integration
//! tests. Lists are ordered like the PostgreSQL queries (created_at, id).

use std::sync::Arc;

use async_trait::async_trait;
use bodybell_types::{
    clock, Album, AlbumId, AlbumPatch, Artist, ArtistId, ArtistPatch, NewAlbum, NewArtist,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repo::{AlbumRepository, ArtistRepository};

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// In-memory artist repository
#[derive(Default, Clone)]
pub struct InMemoryArtistRepository {
    artists: Arc<DashMap<ArtistId, Artist>>,
}

impl InMemoryArtistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtistRepository for InMemoryArtistRepository {
    async fn create(&self, input: NewArtist) -> DbResult<Artist> {
        input.validate()?;
        let artist = input.into_artist(ArtistId(generate_id()), clock::now());
        self.artists.insert(artist.id.clone(), artist.clone());
        Ok(artist)
    }

    async fn insert_with_id(&self, id: &ArtistId, input: NewArtist) -> DbResult<Option<Artist>> {
        input.validate()?;
        match self.artists.entry(id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let artist = input.into_artist(id.clone(), clock::now());
                slot.insert(artist.clone());
                Ok(Some(artist))
            }
        }
    }

    async fn find(&self, id: &ArtistId) -> DbResult<Option<Artist>> {
        Ok(self.artists.get(id).map(|r| r.value().clone()))
    }

    async fn update(&self, id: &ArtistId, patch: ArtistPatch) -> DbResult<Artist> {
        let mut entry = self.artists.get_mut(id).ok_or(DbError::NotFound)?;
        patch.validate()?;
        patch.apply(entry.value_mut(), clock::now());
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &ArtistId) -> DbResult<()> {
        self.artists
            .remove(id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }

    async fn list(&self) -> DbResult<Vec<Artist>> {
        let mut artists: Vec<Artist> = self.artists.iter().map(|r| r.value().clone()).collect();
        artists.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(artists)
    }
}

/// In-memory album repository
#[derive(Default, Clone)]
pub struct InMemoryAlbumRepository {
    albums: Arc<DashMap<AlbumId, Album>>,
}

impl InMemoryAlbumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut albums: Vec<Album>) -> Vec<Album> {
        albums.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        albums
    }
}

#[async_trait]
impl AlbumRepository for InMemoryAlbumRepository {
    async fn create(&self, input: NewAlbum) -> DbResult<Album> {
        input.validate()?;
        let album = input.into_album(AlbumId(generate_id()), clock::now());
        self.albums.insert(album.id.clone(), album.clone());
        Ok(album)
    }

    async fn insert_with_id(&self, id: &AlbumId, input: NewAlbum) -> DbResult<Option<Album>> {
        input.validate()?;
        match self.albums.entry(id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let album = input.into_album(id.clone(), clock::now());
                slot.insert(album.clone());
                Ok(Some(album))
            }
        }
    }

    async fn find(&self, id: &AlbumId) -> DbResult<Option<Album>> {
        Ok(self.albums.get(id).map(|r| r.value().clone()))
    }

    async fn update(&self, id: &AlbumId, patch: AlbumPatch) -> DbResult<Album> {
        let mut entry = self.albums.get_mut(id).ok_or(DbError::NotFound)?;
        patch.validate()?;
        patch.apply(entry.value_mut(), clock::now());
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &AlbumId) -> DbResult<()> {
        self.albums
            .remove(id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }

    async fn list(&self) -> DbResult<Vec<Album>> {
        Ok(Self::sorted(
            self.albums.iter().map(|r| r.value().clone()).collect(),
        ))
    }

    async fn list_by_artist(&self, artist_id: &ArtistId) -> DbResult<Vec<Album>> {
        Ok(Self::sorted(
            self.albums
                .iter()
                .filter(|r| &r.value().artist_id == artist_id)
                .map(|r| r.value().clone())
                .collect(),
        ))
    }
}
