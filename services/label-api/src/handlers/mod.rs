//! HTTP handlers

mod albums;
mod artists;
mod auth;
mod health;

use serde::Serialize;

pub use albums::{create_album, delete_album, get_album, list_albums, update_album};
pub use artists::{
    create_artist, delete_artist, get_artist, get_artist_albums, list_artists, update_artist,
};
pub use auth::{auth_action, callback, is_admin, me};
pub use health::{health, ready};

/// Body returned by successful deletes
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Count a catalog write
fn record_mutation(entity: &'static str, operation: &'static str) {
    metrics::counter!(
        "label_catalog_mutations_total",
        "entity" => entity,
        "operation" => operation
    )
    .increment(1);
}
