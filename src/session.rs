use serenity::model::id::{ChannelId, GuildId, UserId};
use std::{sync::Arc, time::Duration};
use tokio::time;
use tracing::{debug, warn};

use crate::{
    equalizer,
    error::{PlaylinkError, PlaylinkResult},
    model::track::{LoadedTracks, Track, TrackSearch},
    node::AudioNode,
    prompt::{Interactions, SELECTORS},
    queue::Queue,
    util,
};

/// One playback session for one guild.
///
/// Owns the queue and the user-facing playback state (bound channel, volume,
/// equalizer levels) and turns commands plus node callbacks into directives.
/// Whether audio is actually playing or paused belongs to the node; the
/// session only asks, it never tracks.
///
/// A session is always driven through the registry's per-guild mutex, so its
/// operations may freely take `&mut self` without further locking.
pub struct Session {
    guild: GuildId,
    node: Arc<dyn AudioNode>,
    pub queue: Queue,
    channel: Option<ChannelId>,
    volume: u16,
    eq_levels: [f64; 15],
    choice_timeout: Duration,
}

impl Session {
    pub fn new(guild: GuildId, node: Arc<dyn AudioNode>, volume: u16, choice_timeout: Duration) -> Self {
        Self {
            guild,
            node,
            queue: Queue::new(),
            channel: None,
            volume,
            eq_levels: [0.0; 15],
            choice_timeout,
        }
    }

    pub fn guild(&self) -> GuildId {
        self.guild
    }

    pub fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_some()
    }

    pub fn volume(&self) -> u16 {
        self.volume
    }

    pub fn eq_levels(&self) -> &[f64; 15] {
        &self.eq_levels
    }

    /// Binds the session to a voice channel and asks the node to join it.
    ///
    /// The caller's current voice channel wins over an explicitly requested
    /// one; with neither resolved there is nothing to join.
    pub async fn connect(
        &mut self,
        caller_channel: Option<ChannelId>,
        requested: Option<ChannelId>,
    ) -> PlaylinkResult<ChannelId> {
        if self.channel.is_some() {
            return Err(PlaylinkError::AlreadyConnected);
        }

        let channel = caller_channel.or(requested).ok_or(PlaylinkError::NoVoiceChannel)?;

        if let Err(why) = self.node.connect(self.guild, channel).await {
            warn!("Connect directive failed for guild {}: {}", self.guild, why);
        }

        self.channel = Some(channel);

        Ok(channel)
    }

    /// Destroys the node-side player. Idempotent: a destroy racing an
    /// occupancy-triggered teardown is a benign condition, not an error.
    pub async fn teardown(&mut self) {
        if let Err(why) = self.node.destroy(self.guild).await {
            debug!("Ignoring destroy failure for guild {}: {}", self.guild, why);
        }

        self.channel = None;
    }

    /// Enqueues the outcome of a track load: playlists in bulk, a single
    /// match directly, an ambiguous result via [`Self::choose_track`]. Starts
    /// playback afterwards if the player is idle and the queue has content.
    pub async fn add_tracks(
        &mut self,
        ui: &dyn Interactions,
        requester: UserId,
        loaded: LoadedTracks,
    ) -> PlaylinkResult<()> {
        if loaded.tracks.is_empty() {
            return Err(PlaylinkError::NoTracksFound);
        }

        if loaded.is_playlist() {
            self.queue.add(loaded.tracks);
        } else if loaded.tracks.len() == 1 {
            if let Some(track) = loaded.tracks.into_iter().next() {
                ui.notify_enqueued(&track).await;
                self.queue.add(std::iter::once(track));
            }
        } else if let Some(track) = self.choose_track(ui, requester, &loaded.tracks).await {
            ui.notify_enqueued(&track).await;
            self.queue.add(std::iter::once(track));
        }

        if !self.node.is_playing(self.guild).await && !self.queue.is_empty() {
            self.start_playback().await;
        }

        Ok(())
    }

    /// Lets the requester pick one of up to five candidates by reaction.
    ///
    /// The wait is bounded by the configured deadline. A timeout retracts
    /// both the prompt and the originating request and yields `None` — an
    /// abandoned choice, not an error.
    pub async fn choose_track(
        &self,
        ui: &dyn Interactions,
        requester: UserId,
        candidates: &[Track],
    ) -> Option<Track> {
        let shown = &candidates[..candidates.len().min(SELECTORS.len())];
        let symbols = &SELECTORS[..shown.len()];

        let message = ui.present_choices(shown).await;

        match time::timeout(self.choice_timeout, ui.wait_reaction(message, symbols, requester)).await {
            Ok(symbol) => {
                ui.retract_prompt(message).await;

                SELECTORS
                    .iter()
                    .position(|s| *s == symbol.as_str())
                    .and_then(|index| shown.get(index))
                    .cloned()
            }
            Err(_) => {
                ui.retract_prompt(message).await;
                ui.retract_request().await;

                None
            }
        }
    }

    /// Issues a play directive for the track under the cursor.
    pub async fn start_playback(&self) {
        if let Ok(Some(track)) = self.queue.current_track() {
            if let Err(why) = self.node.play(self.guild, track).await {
                warn!("Play directive failed for guild {}: {}", self.guild, why);
            }
        }
    }

    /// Moves the cursor forward and plays the next track, if any. Running
    /// off the end of the playlist is a silent terminal state.
    pub async fn advance(&mut self) {
        match self.queue.next_track() {
            Ok(Some(track)) => {
                if let Err(why) = self.node.play(self.guild, &track).await {
                    warn!("Play directive failed for guild {}: {}", self.guild, why);
                }
            }
            Ok(None) | Err(_) => (),
        }
    }

    /// Replays the track under the cursor, used when repeat mode is `One`.
    pub async fn repeat_track(&self) {
        self.start_playback().await;
    }

    /// The `play` command: with a query, resolve and enqueue; without one,
    /// resume paused playback. Connects first when not connected yet.
    pub async fn play(
        &mut self,
        ui: &dyn Interactions,
        requester: UserId,
        caller_channel: Option<ChannelId>,
        query: Option<&str>,
    ) -> PlaylinkResult<()> {
        if !self.is_connected() {
            self.connect(caller_channel, None).await?;
        }

        match query {
            None => {
                if self.queue.is_empty() {
                    return Err(PlaylinkError::QueueIsEmpty);
                }

                if let Err(why) = self.node.set_pause(self.guild, false).await {
                    warn!("Resume directive failed for guild {}: {}", self.guild, why);
                }

                Ok(())
            }
            Some(query) => {
                let identifier = TrackSearch::auto(query).to_string();
                let loaded = self.node.load_tracks(&identifier).await;

                self.add_tracks(ui, requester, loaded).await
            }
        }
    }

    pub async fn pause(&self) -> PlaylinkResult<()> {
        if self.node.is_paused(self.guild).await {
            return Err(PlaylinkError::AlreadyPaused);
        }

        if let Err(why) = self.node.set_pause(self.guild, true).await {
            warn!("Pause directive failed for guild {}: {}", self.guild, why);
        }

        Ok(())
    }

    /// Clears the queue and stops whatever is playing.
    pub async fn stop(&mut self) {
        self.queue.clear();

        if let Err(why) = self.node.stop(self.guild).await {
            warn!("Stop directive failed for guild {}: {}", self.guild, why);
        }
    }

    /// Skips to the next track by stopping the current one; the node's
    /// end-of-track callback performs the actual advance.
    pub async fn skip(&self) -> PlaylinkResult<()> {
        if self.queue.upcoming()?.is_empty() {
            return Err(PlaylinkError::NoMoreTracks);
        }

        if let Err(why) = self.node.stop(self.guild).await {
            warn!("Stop directive failed for guild {}: {}", self.guild, why);
        }

        Ok(())
    }

    /// Rewinds to the previous track. The cursor goes back two positions so
    /// that the advance following the stop lands one track back.
    pub async fn previous(&mut self) -> PlaylinkResult<()> {
        if self.queue.history()?.is_empty() {
            return Err(PlaylinkError::NoPreviousTracks);
        }

        self.queue.position -= 2;

        if let Err(why) = self.node.stop(self.guild).await {
            warn!("Stop directive failed for guild {}: {}", self.guild, why);
        }

        Ok(())
    }

    pub fn shuffle(&mut self) -> PlaylinkResult<()> {
        self.queue.shuffle()
    }

    pub fn set_repeat(&mut self, mode: &str) -> PlaylinkResult<()> {
        if !matches!(mode, "none" | "one" | "all") {
            return Err(PlaylinkError::InvalidRepeatMode);
        }

        self.queue.set_repeat_mode(mode);

        Ok(())
    }

    /// Jumps to the 1-based `index`: the cursor is parked two before it and
    /// the advance triggered by the stop lands exactly on the entry.
    pub async fn skip_to(&mut self, index: i64) -> PlaylinkResult<()> {
        if self.queue.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        if index < 0 || index as usize > self.queue.length() {
            return Err(PlaylinkError::NoMoreTracks);
        }

        self.queue.position = index as isize - 2;

        if let Err(why) = self.node.stop(self.guild).await {
            warn!("Stop directive failed for guild {}: {}", self.guild, why);
        }

        Ok(())
    }

    /// Seeks the current track back to its beginning.
    pub async fn restart(&self) -> PlaylinkResult<()> {
        if self.queue.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        if let Err(why) = self.node.seek(self.guild, Duration::from_millis(0)).await {
            warn!("Seek directive failed for guild {}: {}", self.guild, why);
        }

        Ok(())
    }

    /// Seeks to a user-supplied position like `1:30` or `90s`.
    pub async fn seek(&self, position: &str) -> PlaylinkResult<()> {
        if self.queue.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        let millis = util::parse_position(position)?;

        if let Err(why) = self.node.seek(self.guild, Duration::from_millis(millis)).await {
            warn!("Seek directive failed for guild {}: {}", self.guild, why);
        }

        Ok(())
    }

    /// Sets the volume to an absolute percentage, 0 to 150.
    pub async fn set_volume(&mut self, volume: i64) -> PlaylinkResult<u16> {
        if volume < 0 {
            return Err(PlaylinkError::VolumeTooLow);
        }

        if volume > 150 {
            return Err(PlaylinkError::VolumeTooHigh);
        }

        self.apply_volume(volume as u16).await;

        Ok(self.volume)
    }

    /// Raises the volume by 10%, capped at 150%.
    pub async fn volume_up(&mut self) -> PlaylinkResult<u16> {
        if self.volume == 150 {
            return Err(PlaylinkError::MaxVolume);
        }

        let volume = (self.volume + 10).min(150);
        self.apply_volume(volume).await;

        Ok(self.volume)
    }

    /// Lowers the volume by 10%, floored at 0%.
    pub async fn volume_down(&mut self) -> PlaylinkResult<u16> {
        if self.volume == 0 {
            return Err(PlaylinkError::MinVolume);
        }

        let volume = self.volume.saturating_sub(10);
        self.apply_volume(volume).await;

        Ok(self.volume)
    }

    async fn apply_volume(&mut self, volume: u16) {
        if let Err(why) = self.node.set_volume(self.guild, volume).await {
            warn!("Volume directive failed for guild {}: {}", self.guild, why);
        }

        self.volume = volume;
    }

    /// Applies a named equalizer preset to all 15 bands.
    pub async fn eq_preset(&mut self, name: &str) -> PlaylinkResult<()> {
        self.eq_levels = equalizer::preset(name)?;
        self.send_eq().await;

        Ok(())
    }

    /// Adjusts a single band, addressed by number (1-15) or center
    /// frequency. `gain` is the user scale, -10 to 10.
    pub async fn eq_adjust(&mut self, band: u32, gain: f64) -> PlaylinkResult<()> {
        let index = equalizer::resolve_band(band)?;
        self.eq_levels[index] = equalizer::scale_gain(gain)?;
        self.send_eq().await;

        Ok(())
    }

    /// Restores the flat equalizer state.
    pub async fn eq_reset(&mut self) {
        self.eq_levels = [0.0; 15];
        self.send_eq().await;
    }

    async fn send_eq(&self) {
        let bands = equalizer::bands_from_levels(&self.eq_levels);

        if let Err(why) = self.node.equalize(self.guild, bands).await {
            warn!("Equalize directive failed for guild {}: {}", self.guild, why);
        }
    }
}
