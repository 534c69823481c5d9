use dashmap::DashMap;
use serenity::model::id::GuildId;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    builder::RegistryBuilder,
    node::AudioNode,
    queue::RepeatMode,
    session::Session,
};

/// Owns one [`Session`] per guild.
///
/// Sessions are created lazily on first lookup and torn down when their
/// voice channel empties of humans or on an explicit disconnect. Each
/// session sits behind its own mutex, so commands for one guild run strictly
/// one at a time (a suspended track choice holds the lock and queues later
/// commands behind it) while different guilds stay fully independent.
///
/// The `on_*` methods are the inbound entry points an adapter calls when the
/// node or the voice gateway reports an event; there is no subscription
/// machinery in the core.
pub struct SessionRegistry {
    sessions: DashMap<GuildId, Arc<Mutex<Session>>>,
    node: Arc<dyn AudioNode>,
    default_volume: u16,
    choice_timeout: Duration,
}

impl SessionRegistry {
    pub fn builder(node: Arc<dyn AudioNode>) -> RegistryBuilder {
        RegistryBuilder::new(node)
    }

    pub(crate) fn new(builder: RegistryBuilder) -> Self {
        Self {
            sessions: DashMap::new(),
            node: builder.node,
            default_volume: builder.default_volume,
            choice_timeout: builder.choice_timeout,
        }
    }

    /// Returns the guild's session, creating it on first use.
    pub fn get_or_create(&self, guild: GuildId) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(guild)
            .or_insert_with(|| {
                debug!("Creating session for guild {}", guild);

                Arc::new(Mutex::new(Session::new(
                    guild,
                    Arc::clone(&self.node),
                    self.default_volume,
                    self.choice_timeout,
                )))
            })
            .clone()
    }

    /// Returns the guild's session only if one already exists. Event entry
    /// points use this so a stray callback never creates a session.
    pub fn existing(&self, guild: GuildId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(&guild).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Tears the guild's session down and drops it from the registry. Safe
    /// to call when no session exists.
    pub async fn disconnect(&self, guild: GuildId) {
        if let Some((_, session)) = self.sessions.remove(&guild) {
            info!("Tearing down session for guild {}", guild);

            session.lock().await.teardown().await;
        }
    }

    /// The node finished the current track.
    pub async fn on_track_end(&self, guild: GuildId) {
        self.on_player_stop(guild).await;
    }

    /// The node gave up on a stuck track. Treated like a finished one.
    pub async fn on_track_stuck(&self, guild: GuildId) {
        self.on_player_stop(guild).await;
    }

    /// The node failed to play the current track. Treated like a finished
    /// one: the session moves on rather than retrying.
    pub async fn on_track_exception(&self, guild: GuildId) {
        self.on_player_stop(guild).await;
    }

    async fn on_player_stop(&self, guild: GuildId) {
        if let Some(session) = self.existing(guild) {
            let mut session = session.lock().await;

            if session.queue.repeat_mode() == RepeatMode::One {
                session.repeat_track().await;
            } else {
                session.advance().await;
            }
        }
    }

    /// The human occupancy of the session's voice channel changed. An empty
    /// channel tears the session down; this may race an explicit disconnect,
    /// which `teardown` tolerates.
    pub async fn on_voice_occupancy_changed(&self, guild: GuildId, remaining_humans: usize) {
        if remaining_humans == 0 {
            self.disconnect(guild).await;
        }
    }
}
