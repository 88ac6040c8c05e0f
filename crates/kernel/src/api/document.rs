//! JSON:API document types and track resource mapping.
//!
//! Maps [`Track`] rows to typed resource objects (`type`/`id`/`attributes`/
//! `relationships`) and wraps them in collection or single-resource
//! documents. Zero-valued optional attributes are omitted from the wire
//! form.

use axum::Json;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::api::pagination::{PaginationLinks, PaginationMeta};
use crate::error::JSON_API_CONTENT_TYPE;
use crate::models::Track;

/// Resource types served by this API.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Track,
    Album,
    Artist,
}

/// Bare resource identifier used inside relationships.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub id: Uuid,
}

/// Role an artist plays on a track.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ArtistRole {
    Artist,
    AlbumArtist,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumRelationship {
    pub data: ResourceIdentifier,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistRelationship {
    pub data: ResourceIdentifier,
    pub meta: ArtistRelationshipMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistRelationshipMeta {
    pub role: ArtistRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackRelationships {
    pub albums: Vec<AlbumRelationship>,
    pub artists: Vec<ArtistRelationship>,
}

/// Track attributes in wire form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAttributes {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub albumartist: String,
    pub bitrate: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<i32>,
    pub channels: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc: Option<i32>,
    pub duration: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub mimetype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_mbid: Option<String>,
    pub size: i64,
    pub track: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_mbid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Full track resource object.
#[derive(Debug, Clone, Serialize)]
pub struct TrackResource {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub id: Uuid,
    pub attributes: TrackAttributes,
    pub relationships: TrackRelationships,
}

impl From<Track> for TrackResource {
    fn from(track: Track) -> Self {
        let albums = vec![AlbumRelationship {
            data: ResourceIdentifier {
                resource_type: ResourceType::Album,
                id: track.album_id,
            },
        }];

        let mut artists = Vec::new();
        if let Some(album_artist_id) = track.album_artist_id {
            artists.push(artist_relationship(album_artist_id, ArtistRole::AlbumArtist));
        }
        if let Some(artist_id) = track.artist_id {
            artists.push(artist_relationship(artist_id, ArtistRole::Artist));
        }

        Self {
            resource_type: ResourceType::Track,
            id: track.id,
            attributes: TrackAttributes {
                title: track.title,
                album: track.album,
                artist: track.artist,
                albumartist: track.album_artist,
                bitrate: track.bit_rate,
                bpm: non_zero(track.bpm),
                channels: track.channels,
                comments: non_empty(track.comment),
                disc: non_zero(track.disc_number),
                duration: track.duration,
                genre: non_empty(track.genre),
                mimetype: track.mime_type,
                recording_mbid: non_empty(track.mbz_recording_id),
                size: track.size,
                track: track.track_number,
                track_mbid: non_empty(track.mbz_release_track_id),
                year: non_zero(track.year),
            },
            relationships: TrackRelationships { albums, artists },
        }
    }
}

fn artist_relationship(id: Uuid, role: ArtistRole) -> ArtistRelationship {
    ArtistRelationship {
        data: ResourceIdentifier {
            resource_type: ResourceType::Artist,
            id,
        },
        meta: ArtistRelationshipMeta { role },
    }
}

fn non_zero(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Collection document: resources plus pagination links and metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TrackCollectionDocument {
    pub data: Vec<TrackResource>,
    pub links: PaginationLinks,
    pub meta: PaginationMeta,
}

/// Single-resource document.
#[derive(Debug, Clone, Serialize)]
pub struct TrackDocument {
    pub data: TrackResource,
}

/// Response wrapper that serializes its body as JSON while setting the
/// JSON:API content type.
pub struct JsonApi<T>(pub T);

impl<T: Serialize> IntoResponse for JsonApi<T> {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, JSON_API_CONTENT_TYPE)], Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> Track {
        Track {
            id: Uuid::nil(),
            title: "Innuendo".to_string(),
            album: "Innuendo".to_string(),
            artist: "Queen".to_string(),
            album_artist: "Queen".to_string(),
            album_id: Uuid::nil(),
            artist_id: Some(Uuid::nil()),
            album_artist_id: Some(Uuid::nil()),
            track_number: 1,
            disc_number: Some(1),
            year: Some(1991),
            duration: 392.4,
            bit_rate: 320,
            channels: 2,
            genre: Some("Rock".to_string()),
            comment: None,
            bpm: None,
            size: 15_000_000,
            mime_type: "audio/mpeg".to_string(),
            mbz_recording_id: None,
            mbz_release_track_id: None,
        }
    }

    #[test]
    fn track_maps_to_typed_resource() {
        let resource = TrackResource::from(sample_track());
        assert_eq!(resource.resource_type, ResourceType::Track);
        assert_eq!(resource.attributes.title, "Innuendo");
        assert_eq!(resource.attributes.year, Some(1991));
        assert_eq!(resource.relationships.albums.len(), 1);
    }

    #[test]
    fn album_artist_relationship_precedes_artist() {
        let resource = TrackResource::from(sample_track());
        let roles: Vec<ArtistRole> = resource
            .relationships
            .artists
            .iter()
            .map(|r| r.meta.role)
            .collect();
        assert_eq!(roles, vec![ArtistRole::AlbumArtist, ArtistRole::Artist]);
    }

    #[test]
    fn missing_artist_ids_produce_no_relationships() {
        let mut track = sample_track();
        track.artist_id = None;
        track.album_artist_id = None;
        let resource = TrackResource::from(track);
        assert!(resource.relationships.artists.is_empty());
    }

    #[test]
    fn zero_valued_attributes_are_omitted() {
        let mut track = sample_track();
        track.year = Some(0);
        track.genre = Some(String::new());
        let json = serde_json::to_value(TrackResource::from(track)).unwrap();

        let attributes = &json["attributes"];
        assert!(attributes.get("year").is_none());
        assert!(attributes.get("genre").is_none());
        assert!(attributes.get("bpm").is_none());
        assert_eq!(attributes["bitrate"], 320);
    }

    #[test]
    fn resource_type_serializes_lowercase() {
        let json = serde_json::to_value(TrackResource::from(sample_track())).unwrap();
        assert_eq!(json["type"], "track");
        assert_eq!(json["relationships"]["albums"][0]["data"]["type"], "album");
        assert_eq!(
            json["relationships"]["artists"][0]["meta"]["role"],
            "albumArtist"
        );
    }
}
