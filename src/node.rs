use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use std::time::Duration;

use crate::{
    equalizer::Band,
    error::NodeResult,
    model::track::{LoadedTracks, Track},
};

/// Directive surface of the remote audio node.
///
/// Everything here is fire-and-forget from the session's point of view:
/// directives carry no data the core depends on, delivery failures are the
/// implementor's concern and are never retried. The returned result only
/// exists so benign races (a destroy hitting an already destroyed player)
/// stay visible to the caller that wants to tolerate them.
///
/// `is_playing`/`is_paused` are the one piece of state the node owns and the
/// core asks back for; the session never tracks play/pause itself.
#[async_trait]
pub trait AudioNode: Send + Sync + 'static {
    /// Joins the given voice channel for the guild.
    async fn connect(&self, guild: GuildId, channel: ChannelId) -> NodeResult<()>;
    /// Destroys the guild's player on the node.
    async fn destroy(&self, guild: GuildId) -> NodeResult<()>;
    /// Starts playing a track, replacing whatever is currently playing.
    async fn play(&self, guild: GuildId, track: &Track) -> NodeResult<()>;
    /// Stops the current track without touching the queue.
    async fn stop(&self, guild: GuildId) -> NodeResult<()>;
    /// Sets the pause status.
    async fn set_pause(&self, guild: GuildId, pause: bool) -> NodeResult<()>;
    /// Jumps to a specific time in the currently playing track.
    async fn seek(&self, guild: GuildId, position: Duration) -> NodeResult<()>;
    /// Sets the player volume, in percent.
    async fn set_volume(&self, guild: GuildId, volume: u16) -> NodeResult<()>;
    /// Applies the given equalizer band gains.
    async fn equalize(&self, guild: GuildId, bands: Vec<Band>) -> NodeResult<()>;

    /// Resolves an identifier (direct URL or `ytsearch:` query) to candidate
    /// tracks. Implementations map their own failures to an empty load,
    /// which the session reports as `NoTracksFound`.
    async fn load_tracks(&self, identifier: &str) -> LoadedTracks;

    /// Whether something is currently playing for the guild.
    async fn is_playing(&self, guild: GuildId) -> bool;
    /// Whether playback for the guild is paused.
    async fn is_paused(&self, guild: GuildId) -> bool;
}
