use std::{sync::Arc, time::Duration};

use crate::{node::AudioNode, registry::SessionRegistry};

/// Configuration for a [`SessionRegistry`].
pub struct RegistryBuilder {
    pub(crate) node: Arc<dyn AudioNode>,
    pub(crate) default_volume: u16,
    pub(crate) choice_timeout: Duration,
}

impl RegistryBuilder {
    pub fn new(node: Arc<dyn AudioNode>) -> Self {
        Self {
            node,
            default_volume: 100,
            choice_timeout: Duration::from_secs(60),
        }
    }

    /// Starting volume for newly created sessions, in percent.
    pub fn set_default_volume(&mut self, volume: u16) -> &mut Self {
        self.default_volume = volume;
        self
    }

    /// How long a track-selection prompt waits for the requester's reaction.
    pub fn set_choice_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.choice_timeout = timeout;
        self
    }

    pub fn build(self) -> SessionRegistry {
        SessionRegistry::new(self)
    }
}
