use rand::seq::SliceRandom;

use crate::{
    error::{PlaylinkError, PlaylinkResult},
    model::track::Track,
};

/// Policy applied when the cursor runs off the end of the queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepeatMode {
    None,
    One,
    All,
}

/// Ordered playlist with a movable cursor.
///
/// `items` is append-only except for shuffle and clear; insertion order is
/// playback order. The track at `position` is the current one. The cursor is
/// deliberately public: `previous` and `skip_to` rewind it directly and rely
/// on the next `next_track()` call (triggered by the node's end-of-track
/// callback) to land on the wanted entry.
#[derive(Debug)]
pub struct Queue {
    items: Vec<Track>,
    pub position: isize,
    repeat_mode: RepeatMode,
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Queue {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            position: 0,
            repeat_mode: RepeatMode::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn length(&self) -> usize {
        self.items.len()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// The track under the cursor. `Ok(None)` means the queue has finished:
    /// the cursor sits past the last entry and nothing is playing, which is a
    /// valid terminal state rather than an error.
    pub fn current_track(&self) -> PlaylinkResult<Option<&Track>> {
        if self.items.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        if self.position >= 0 && (self.position as usize) < self.items.len() {
            Ok(self.items.get(self.position as usize))
        } else {
            Ok(None)
        }
    }

    /// Everything strictly after the cursor.
    pub fn upcoming(&self) -> PlaylinkResult<&[Track]> {
        if self.items.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        let start = (self.position + 1).max(0) as usize;

        Ok(self.items.get(start..).unwrap_or(&[]))
    }

    /// Everything strictly before the cursor.
    pub fn history(&self) -> PlaylinkResult<&[Track]> {
        if self.items.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        let end = (self.position.max(0) as usize).min(self.items.len());

        Ok(&self.items[..end])
    }

    /// Appends tracks in the given order. The cursor is left untouched, so
    /// adding to a finished queue makes the entry at the old past-the-end
    /// cursor current again.
    pub fn add<I: IntoIterator<Item = Track>>(&mut self, tracks: I) {
        self.items.extend(tracks);
    }

    /// Moves the cursor forward and returns the new current track.
    ///
    /// Runs off the end: with `RepeatMode::All` the cursor wraps to 0,
    /// otherwise `None` is returned and the cursor stays one past the last
    /// index — the queue is finished, not erased.
    pub fn next_track(&mut self) -> PlaylinkResult<Option<Track>> {
        if self.items.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        self.position += 1;

        if self.position < 0 {
            return Ok(None);
        } else if self.position as usize > self.items.len() - 1 {
            if self.repeat_mode() == RepeatMode::All {
                self.position = 0;
            } else {
                return Ok(None);
            }
        }

        Ok(self.items.get(self.position as usize).cloned())
    }

    /// Randomly permutes the upcoming tracks. History and the current track
    /// stay in place.
    pub fn shuffle(&mut self) -> PlaylinkResult<()> {
        if self.items.is_empty() {
            return Err(PlaylinkError::QueueIsEmpty);
        }

        let start = ((self.position + 1).max(0) as usize).min(self.items.len());

        self.items[start..].shuffle(&mut rand::thread_rng());

        Ok(())
    }

    /// Sets the repeat mode from a user token. Unrecognised tokens are
    /// silently ignored; the command layer validates them first.
    pub fn set_repeat_mode(&mut self, mode: &str) {
        match mode {
            "none" => self.repeat_mode = RepeatMode::None,
            "one" => self.repeat_mode = RepeatMode::One,
            "all" => self.repeat_mode = RepeatMode::All,
            _ => (),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::track;

    fn queue_of(titles: &[&str]) -> Queue {
        let mut queue = Queue::new();
        queue.add(titles.iter().map(|t| track(t)));
        queue
    }

    #[test]
    fn empty_queue_operations_fail() {
        let mut queue = Queue::new();

        assert_eq!(queue.current_track().unwrap_err(), PlaylinkError::QueueIsEmpty);
        assert_eq!(queue.upcoming().unwrap_err(), PlaylinkError::QueueIsEmpty);
        assert_eq!(queue.history().unwrap_err(), PlaylinkError::QueueIsEmpty);
        assert_eq!(queue.next_track().unwrap_err(), PlaylinkError::QueueIsEmpty);
        assert_eq!(queue.shuffle().unwrap_err(), PlaylinkError::QueueIsEmpty);
    }

    #[test]
    fn cursor_splits_history_current_and_upcoming() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.position = 1;

        assert_eq!(queue.current_track().unwrap().unwrap().title(), "b");
        assert_eq!(queue.history().unwrap().len(), 1);
        assert_eq!(queue.history().unwrap()[0].title(), "a");
        assert_eq!(queue.upcoming().unwrap().len(), 1);
        assert_eq!(queue.upcoming().unwrap()[0].title(), "c");
    }

    #[test]
    fn advance_without_repeat_reaches_terminal_state() {
        let mut queue = queue_of(&["a", "b", "c"]);

        assert_eq!(queue.next_track().unwrap().unwrap().title(), "b");
        assert_eq!(queue.next_track().unwrap().unwrap().title(), "c");
        assert_eq!(queue.next_track().unwrap(), None);
        assert_eq!(queue.position, 3);

        // Terminal state sticks until more tracks arrive.
        assert_eq!(queue.next_track().unwrap(), None);
        assert_eq!(queue.current_track().unwrap(), None);

        queue.add(vec![track("d")]);
        queue.position = 3;
        assert_eq!(queue.current_track().unwrap().unwrap().title(), "d");
    }

    #[test]
    fn advance_with_repeat_all_wraps_forever() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.set_repeat_mode("all");
        queue.position = 2;

        assert_eq!(queue.next_track().unwrap().unwrap().title(), "a");
        assert_eq!(queue.position, 0);
        assert_eq!(queue.next_track().unwrap().unwrap().title(), "b");
        assert_eq!(queue.next_track().unwrap().unwrap().title(), "c");
        assert_eq!(queue.next_track().unwrap().unwrap().title(), "a");
    }

    #[test]
    fn advance_from_below_zero_yields_nothing() {
        let mut queue = queue_of(&["a", "b"]);
        queue.position = -3;

        assert_eq!(queue.next_track().unwrap(), None);
        assert_eq!(queue.position, -2);
    }

    #[test]
    fn shuffle_leaves_history_and_current_untouched() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e", "f"]);
        queue.position = 1;

        let mut upcoming_before: Vec<String> = queue
            .upcoming()
            .unwrap()
            .iter()
            .map(|t| t.title().to_string())
            .collect();

        queue.shuffle().unwrap();

        assert_eq!(queue.current_track().unwrap().unwrap().title(), "b");
        assert_eq!(queue.history().unwrap()[0].title(), "a");

        let mut upcoming_after: Vec<String> = queue
            .upcoming()
            .unwrap()
            .iter()
            .map(|t| t.title().to_string())
            .collect();

        upcoming_before.sort();
        upcoming_after.sort();
        assert_eq!(upcoming_before, upcoming_after);
    }

    #[test]
    fn unknown_repeat_token_is_a_no_op() {
        let mut queue = queue_of(&["a"]);
        queue.set_repeat_mode("one");
        queue.set_repeat_mode("forever");

        assert_eq!(queue.repeat_mode(), RepeatMode::One);
    }

    #[test]
    fn skip_to_cursor_contract_lands_on_requested_index() {
        // skip_to(index) sets the cursor to index - 2 and lets the next
        // advance land on the 1-based index.
        let mut queue = queue_of(&["a", "b", "c", "d"]);

        for index in 1..=4i64 {
            queue.position = index as isize - 2;
            let landed = queue.next_track().unwrap().unwrap();
            assert_eq!(landed.title(), [ "a", "b", "c", "d" ][index as usize - 1]);
        }
    }

    #[test]
    fn previous_cursor_contract_lands_one_back() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.position = 2;

        // previous: position -= 2, then the end-of-track advance plays b.
        queue.position -= 2;
        assert_eq!(queue.next_track().unwrap().unwrap().title(), "b");
    }

    #[test]
    fn clear_resets_items_and_cursor() {
        let mut queue = queue_of(&["a", "b"]);
        queue.position = 1;
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.position, 0);
        assert_eq!(queue.length(), 0);
    }
}
