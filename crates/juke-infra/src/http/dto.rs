//! Wire DTOs and their mapping onto domain models.
//!
//! Every field is optional on the wire; mapping fills the gaps with the
//! defaults the apps display (empty strings, zero, `ALBUM`).

use serde::{Deserialize, Serialize};

use juke_core::catalog::{
    Album, Artist, FeaturedArtist, FeaturedGenre, Track, DEFAULT_ALBUM_TYPE,
};
use juke_core::profile::{display_name_or_username, MusicProfile, ProfileSummary};
use juke_core::world::OnlineUsersPage;

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// `{detail?: string}` answers from the account endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DetailResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyRequest<'a> {
    pub user_id: &'a str,
    pub timestamp: &'a str,
    pub signature: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VerifyResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// First page of a paginated listing.
#[derive(Debug, Deserialize)]
pub(crate) struct Paginated<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Listings that some deployments paginate and others return bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybePaginated<T> {
    Page(Paginated<T>),
    List(Vec<T>),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MusicProfileDto {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    #[serde(default)]
    pub favorite_artists: Vec<String>,
    #[serde(default)]
    pub favorite_albums: Vec<String>,
    #[serde(default)]
    pub favorite_tracks: Vec<String>,
    #[serde(default)]
    pub onboarding_completed_at: Option<String>,
    #[serde(default)]
    pub is_owner: Option<bool>,
}

impl From<MusicProfileDto> for MusicProfile {
    fn from(dto: MusicProfileDto) -> Self {
        let username = dto.username.unwrap_or_default();
        MusicProfile {
            display_name: display_name_or_username(dto.display_name.as_deref(), &username),
            username,
            name: dto.name.unwrap_or_default(),
            tagline: dto.tagline.unwrap_or_default(),
            bio: dto.bio.unwrap_or_default(),
            location: dto.location.unwrap_or_default(),
            avatar_url: dto.avatar_url.unwrap_or_default(),
            favorite_genres: dto.favorite_genres,
            favorite_artists: dto.favorite_artists,
            favorite_albums: dto.favorite_albums,
            favorite_tracks: dto.favorite_tracks,
            onboarding_completed_at: dto.onboarding_completed_at,
            is_owner: dto.is_owner.unwrap_or(false),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileSearchEntry {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<ProfileSearchEntry> for ProfileSummary {
    fn from(entry: ProfileSearchEntry) -> Self {
        ProfileSummary {
            display_name: display_name_or_username(entry.display_name.as_deref(), &entry.username),
            username: entry.username,
            tagline: entry.tagline.unwrap_or_default(),
            avatar_url: entry.avatar_url.unwrap_or_default(),
        }
    }
}

impl From<MaybePaginated<MusicProfileDto>> for OnlineUsersPage {
    fn from(payload: MaybePaginated<MusicProfileDto>) -> Self {
        match payload {
            MaybePaginated::Page(page) => {
                let results: Vec<MusicProfile> =
                    page.results.into_iter().map(MusicProfile::from).collect();
                OnlineUsersPage {
                    count: page.count.unwrap_or(results.len() as u64),
                    next: page.next,
                    previous: page.previous,
                    results,
                }
            }
            MaybePaginated::List(items) => {
                OnlineUsersPage::from_list(items.into_iter().map(MusicProfile::from).collect())
            }
        }
    }
}

// ===== Catalog =====

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SpotifyDataDto {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl SpotifyDataDto {
    fn first_image(&self) -> String {
        self.images.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spotify_data: Option<SpotifyDataDto>,
}

impl From<ArtistDto> for Artist {
    fn from(dto: ArtistDto) -> Self {
        let spotify = dto.spotify_data.unwrap_or_default();
        Artist {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            image_url: spotify.first_image(),
            followers: spotify.followers.unwrap_or(0),
            popularity: spotify.popularity.unwrap_or(0),
            spotify_uri: spotify.uri.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub spotify_data: Option<SpotifyDataDto>,
}

impl From<AlbumDto> for Album {
    fn from(dto: AlbumDto) -> Self {
        let spotify = dto.spotify_data.unwrap_or_default();
        let album_type = dto
            .album_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALBUM_TYPE.to_string());
        Album {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            album_type,
            release_date: dto.release_date.unwrap_or_default(),
            total_tracks: dto.total_tracks.unwrap_or(0),
            image_url: spotify.first_image(),
            spotify_uri: spotify.uri.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub spotify_data: Option<SpotifyDataDto>,
}

impl From<TrackDto> for Track {
    fn from(dto: TrackDto) -> Self {
        Track {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            duration_ms: dto.duration_ms.unwrap_or(0),
            track_number: dto.track_number.unwrap_or(0),
            explicit: dto.explicit.unwrap_or(false),
            spotify_uri: dto.spotify_data.and_then(|s| s.uri).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeaturedArtistDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<FeaturedArtistDto> for FeaturedArtist {
    fn from(dto: FeaturedArtistDto) -> Self {
        FeaturedArtist {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            image_url: dto.image_url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeaturedGenreDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spotify_id: Option<String>,
    #[serde(default)]
    pub top_artists: Vec<FeaturedArtistDto>,
}

impl From<FeaturedGenreDto> for FeaturedGenre {
    fn from(dto: FeaturedGenreDto) -> Self {
        FeaturedGenre {
            id: dto.id.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            spotify_id: dto.spotify_id.unwrap_or_default(),
            top_artists: dto.top_artists.into_iter().map(FeaturedArtist::from).collect(),
        }
    }
}
