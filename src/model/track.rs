use lazy_static::lazy_static;
use regex::Regex;
use serde::{
    Serialize,
    Deserialize
};

lazy_static!(
    static ref URL_REGEX: Regex = Regex::new(r"https?://(?:www\.)?.+").unwrap();
);

/// Result of asking the resolver to load tracks for an identifier.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoadedTracks {
    pub playlist_info: PlaylistInfo,
    pub load_type: String,
    pub tracks: Vec<Track>,
    pub exception: Option<Exception>
}

impl LoadedTracks {
    /// Whether the whole load is a playlist and should be enqueued in bulk,
    /// skipping per-track disambiguation.
    pub fn is_playlist(&self) -> bool {
        self.load_type == "PLAYLIST_LOADED"
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Track {
    pub track: String,
    pub info: Option<TrackInfo>
}

impl Track {
    pub fn title(&self) -> &str {
        self.info.as_ref().map(|i| i.title.as_str()).unwrap_or("Unknown track")
    }

    pub fn author(&self) -> &str {
        self.info.as_ref().map(|i| i.author.as_str()).unwrap_or("Unknown author")
    }

    /// Track length in milliseconds, used for formatting and seek math only.
    pub fn length(&self) -> u64 {
        self.info.as_ref().map(|i| i.length).unwrap_or(0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub identifier: String,
    pub is_seekable: bool,
    pub author: String,
    pub length: u64,
    pub is_stream: bool,
    pub position: u64,
    pub title: String,
    pub uri: String
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Exception {
    pub message: String,
    pub severity: String
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PlaylistInfo {
    pub name: Option<String>,
    #[serde(rename = "selectedTrack")]
    pub selected_track: Option<i64>
}

/// Search identifier handed to the resolver. Direct media URLs are passed
/// through untouched, anything else becomes a youtube keyword search.
#[derive(Debug, Clone)]
pub enum TrackSearch<'a> {
    Youtube(&'a str),
    Url(&'a str)
}

impl<'a> TrackSearch<'a> {
    /// Classifies a raw play query. Surrounding `<>` (the no-embed marker
    /// some chat clients use around links) is stripped before matching.
    pub fn auto(query: &'a str) -> Self {
        let query = query.trim_start_matches('<').trim_end_matches('>');

        if URL_REGEX.is_match(query) {
            Self::Url(query)
        } else {
            Self::Youtube(query)
        }
    }
}

impl std::fmt::Display for TrackSearch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Youtube(query) => write!(f, "ytsearch:{}", query),
            Self::Url(url) => write!(f, "{}", url)
        }
    }
}
