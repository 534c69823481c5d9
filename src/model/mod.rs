pub mod track;

pub use track::{Exception, LoadedTracks, PlaylistInfo, Track, TrackInfo, TrackSearch};
