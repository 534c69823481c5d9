use async_trait::async_trait;
use serenity::model::id::{MessageId, UserId};

use crate::model::track::Track;

/// Reaction symbols mapped positionally to the first five candidates of an
/// ambiguous search. A selection prompt never shows more than five tracks.
pub const SELECTORS: [&str; 5] = ["1\u{fe0f}\u{20e3}", "2\u{fe0f}\u{20e3}", "3\u{fe0f}\u{20e3}", "4\u{fe0f}\u{20e3}", "5\u{fe0f}\u{20e3}"];

/// Chat-side collaborator used while disambiguating a search result.
///
/// Implemented by the front-end for a single originating request: it knows
/// which message asked for the tracks and where the prompt should go. The
/// session drives the whole exchange and owns the deadline; `wait_reaction`
/// must simply never resolve for reactions that are not one of `symbols`
/// from `user` on `message`.
#[async_trait]
pub trait Interactions: Send + Sync {
    /// Posts the numbered selection prompt and returns its message id.
    async fn present_choices(&self, candidates: &[Track]) -> MessageId;

    /// Resolves once `user` reacts on `message` with one of `symbols`,
    /// yielding the symbol. The wait is unbounded; cancellation comes from
    /// the session dropping the future when the deadline fires.
    async fn wait_reaction(&self, message: MessageId, symbols: &[&str], user: UserId) -> String;

    /// Removes the selection prompt.
    async fn retract_prompt(&self, message: MessageId);

    /// Removes the originating request message after an abandoned choice.
    async fn retract_request(&self);

    /// Confirmation side effect after a track has been enqueued.
    async fn notify_enqueued(&self, track: &Track);
}
