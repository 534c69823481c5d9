use std::{
    error::Error,
    fmt::{
        Display,
        Formatter,
        Result,
    },
};

pub type PlaylinkResult<T> = ::std::result::Result<T, PlaylinkError>;

/// Closed set of precondition violations raised by queue, session and
/// registry operations. All of them are synchronous, and all of them are
/// meant to be translated into a user-facing message at the command boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaylinkError {
    AlreadyConnected,
    NoVoiceChannel,
    QueueIsEmpty,
    NoTracksFound,
    AlreadyPaused,
    NoMoreTracks,
    NoPreviousTracks,
    InvalidRepeatMode,
    VolumeTooLow,
    VolumeTooHigh,
    MaxVolume,
    MinVolume,
    InvalidEqPreset,
    NonExistentEqBand,
    EqGainOutOfBounds,
    InvalidTimeString,
}

impl Error for PlaylinkError {}

pub type NodeResult<T> = ::std::result::Result<T, NodeError>;

/// Opaque failure reported by an [`AudioNode`](crate::node::AudioNode)
/// implementation. The core never inspects it beyond logging; directives are
/// fire-and-forget and are not retried.
#[derive(Debug)]
pub struct NodeError(Box<dyn Error + Send + Sync>);

impl NodeError {
    pub fn new<E: Into<Box<dyn Error + Send + Sync>>>(source: E) -> Self {
        Self(source.into())
    }
}

impl Display for NodeError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "Audio node error: {}", self.0)
    }
}

impl Error for NodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.0.as_ref())
    }
}

impl Display for PlaylinkError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PlaylinkError::AlreadyConnected => write!(f, "The session is already connected to a voice channel."),
            PlaylinkError::NoVoiceChannel => write!(f, "No voice channel to connect to could be resolved."),
            PlaylinkError::QueueIsEmpty => write!(f, "The queue is empty."),
            PlaylinkError::NoTracksFound => write!(f, "The search returned no tracks."),
            PlaylinkError::AlreadyPaused => write!(f, "Playback is already paused."),
            PlaylinkError::NoMoreTracks => write!(f, "There are no more tracks in the queue."),
            PlaylinkError::NoPreviousTracks => write!(f, "There are no previous tracks in the queue."),
            PlaylinkError::InvalidRepeatMode => write!(f, "Unknown repeat mode, expected `none`, `one` or `all`."),
            PlaylinkError::VolumeTooLow => write!(f, "Volume must be 0% or higher."),
            PlaylinkError::VolumeTooHigh => write!(f, "Volume must be 150% or lower."),
            PlaylinkError::MaxVolume => write!(f, "Volume is already at its maximum."),
            PlaylinkError::MinVolume => write!(f, "Volume is already at its minimum."),
            PlaylinkError::InvalidEqPreset => write!(f, "Unknown equalizer preset."),
            PlaylinkError::NonExistentEqBand => write!(f, "Equalizer band must be 1-15 or one of the known band frequencies."),
            PlaylinkError::EqGainOutOfBounds => write!(f, "Equalizer gain must be between -10 and 10."),
            PlaylinkError::InvalidTimeString => write!(f, "Position must look like `1:30`, `90s` or `2m`."),
        }
    }
}
