//! Track model and collection queries.
//!
//! Tracks are the core records of the music collection. Listing executes a
//! [`QueryDescriptor`] compiled from request parameters; the descriptor is
//! rendered to SQL here and nowhere else.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::query::QueryDescriptor;

/// Table backing the track collection.
pub const TRACK_TABLE: &str = "track";

/// Track record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Track {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Track title.
    pub title: String,

    /// Album name.
    pub album: String,

    /// Track artist name.
    pub artist: String,

    /// Album artist name.
    pub album_artist: String,

    /// Album this track belongs to.
    pub album_id: Uuid,

    /// Track artist, when known.
    pub artist_id: Option<Uuid>,

    /// Album artist, when known.
    pub album_artist_id: Option<Uuid>,

    /// Position within the disc.
    pub track_number: i32,

    /// Disc number for multi-disc albums.
    pub disc_number: Option<i32>,

    /// Release year.
    pub year: Option<i32>,

    /// Duration in seconds.
    pub duration: f32,

    /// Bit rate in kbps.
    pub bit_rate: i32,

    /// Audio channel count.
    pub channels: i32,

    pub genre: Option<String>,

    pub comment: Option<String>,

    pub bpm: Option<i32>,

    /// File size in bytes.
    pub size: i64,

    /// Content type of the underlying file.
    pub mime_type: String,

    /// MusicBrainz recording id.
    pub mbz_recording_id: Option<String>,

    /// MusicBrainz release-track id.
    pub mbz_release_track_id: Option<String>,
}

impl Track {
    /// Fetch one page of tracks matching the descriptor.
    pub async fn list(pool: &PgPool, descriptor: &QueryDescriptor) -> Result<Vec<Track>> {
        sqlx::query_as::<_, Track>(&descriptor.select_sql(TRACK_TABLE))
            .fetch_all(pool)
            .await
            .context("failed to list tracks")
    }

    /// Count all tracks matching the descriptor, ignoring the page window.
    pub async fn count(pool: &PgPool, descriptor: &QueryDescriptor) -> Result<u64> {
        let total: i64 = sqlx::query_scalar(&descriptor.count_sql(TRACK_TABLE))
            .fetch_one(pool)
            .await
            .context("failed to count tracks")?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    /// Find a track by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Track>> {
        sqlx::query_as::<_, Track>("SELECT * FROM track WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to load track")
    }
}
