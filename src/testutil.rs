use async_trait::async_trait;
use parking_lot::Mutex;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use crate::{
    equalizer::Band,
    error::{NodeError, NodeResult},
    model::track::{LoadedTracks, Track, TrackInfo},
    node::AudioNode,
    prompt::Interactions,
};

pub(crate) fn track(title: &str) -> Track {
    Track {
        track: format!("encoded:{}", title),
        info: Some(TrackInfo {
            identifier: title.to_string(),
            is_seekable: true,
            author: "author".to_string(),
            length: 180_000,
            is_stream: false,
            position: 0,
            title: title.to_string(),
            uri: format!("https://youtu.be/{}", title),
        }),
    }
}

pub(crate) fn loaded(load_type: &str, titles: &[&str]) -> LoadedTracks {
    LoadedTracks {
        load_type: load_type.to_string(),
        tracks: titles.iter().map(|t| track(t)).collect(),
        ..Default::default()
    }
}

/// Everything a session asked the node to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive {
    Connect(ChannelId),
    Destroy,
    Play(String),
    Stop,
    Pause(bool),
    Seek(u64),
    Volume(u16),
    Equalize(Vec<Band>),
    Load(String),
}

#[derive(Default)]
pub(crate) struct MockNode {
    pub directives: Mutex<Vec<Directive>>,
    pub playing: AtomicBool,
    pub paused: AtomicBool,
    pub loaded: Mutex<Option<LoadedTracks>>,
    pub destroy_fails: AtomicBool,
}

impl MockNode {
    fn record(&self, directive: Directive) {
        self.directives.lock().push(directive);
    }

    pub fn directives(&self) -> Vec<Directive> {
        self.directives.lock().clone()
    }
}

#[async_trait]
impl AudioNode for MockNode {
    async fn connect(&self, _guild: GuildId, channel: ChannelId) -> NodeResult<()> {
        self.record(Directive::Connect(channel));
        Ok(())
    }

    async fn destroy(&self, _guild: GuildId) -> NodeResult<()> {
        self.record(Directive::Destroy);

        if self.destroy_fails.load(Ordering::SeqCst) {
            Err(NodeError::new("player already destroyed"))
        } else {
            Ok(())
        }
    }

    async fn play(&self, _guild: GuildId, track: &Track) -> NodeResult<()> {
        self.record(Directive::Play(track.title().to_string()));
        Ok(())
    }

    async fn stop(&self, _guild: GuildId) -> NodeResult<()> {
        self.record(Directive::Stop);
        Ok(())
    }

    async fn set_pause(&self, _guild: GuildId, pause: bool) -> NodeResult<()> {
        self.record(Directive::Pause(pause));
        Ok(())
    }

    async fn seek(&self, _guild: GuildId, position: Duration) -> NodeResult<()> {
        self.record(Directive::Seek(position.as_millis() as u64));
        Ok(())
    }

    async fn set_volume(&self, _guild: GuildId, volume: u16) -> NodeResult<()> {
        self.record(Directive::Volume(volume));
        Ok(())
    }

    async fn equalize(&self, _guild: GuildId, bands: Vec<Band>) -> NodeResult<()> {
        self.record(Directive::Equalize(bands));
        Ok(())
    }

    async fn load_tracks(&self, identifier: &str) -> LoadedTracks {
        self.record(Directive::Load(identifier.to_string()));
        self.loaded.lock().clone().unwrap_or_default()
    }

    async fn is_playing(&self, _guild: GuildId) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    async fn is_paused(&self, _guild: GuildId) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UiEvent {
    Prompted(usize),
    PromptRetracted,
    RequestRetracted,
    Enqueued(String),
}

#[derive(Default)]
pub(crate) struct MockInteractions {
    /// Reaction the simulated requester answers with; `None` never resolves.
    pub reaction: Option<String>,
    pub events: Mutex<Vec<UiEvent>>,
}

impl MockInteractions {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl Interactions for MockInteractions {
    async fn present_choices(&self, candidates: &[Track]) -> MessageId {
        self.events.lock().push(UiEvent::Prompted(candidates.len()));
        MessageId(1)
    }

    async fn wait_reaction(&self, _message: MessageId, _symbols: &[&str], _user: UserId) -> String {
        match &self.reaction {
            Some(symbol) => symbol.clone(),
            None => futures::future::pending().await,
        }
    }

    async fn retract_prompt(&self, _message: MessageId) {
        self.events.lock().push(UiEvent::PromptRetracted);
    }

    async fn retract_request(&self) {
        self.events.lock().push(UiEvent::RequestRetracted);
    }

    async fn notify_enqueued(&self, track: &Track) {
        self.events.lock().push(UiEvent::Enqueued(track.title().to_string()));
    }
}
