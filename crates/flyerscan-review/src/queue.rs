//! Review queue state machine
//!
//! Two states: Empty (no drafts) and Active (drafts present, cursor valid).
//! The cursor is anchored to a draft id, not an array index, so removals
//! never shift it onto the wrong draft. Navigation clamps at both ends;
//! walking past a bound is a no-op, not an error.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use flyerscan_core::models::EventDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("Review queue is empty")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Typed in-place edit of the draft under the cursor.
#[derive(Debug, Clone)]
pub enum DraftEdit {
    Title(String),
    Date(Option<NaiveDate>),
    StartTime(Option<NaiveTime>),
    EndTime(Option<NaiveTime>),
    Location(Option<String>),
    Description(String),
    TicketLink(Option<String>),
}

/// Ordered drafts awaiting operator review.
///
/// Owned by exactly one review session; all operations are synchronous and
/// atomic with respect to that single caller.
#[derive(Debug, Default)]
pub struct ReviewQueue {
    order: Vec<Uuid>,
    drafts: HashMap<Uuid, EventDraft>,
    cursor: Option<Uuid>,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue contents. The cursor lands on the first draft; an
    /// empty load yields the Empty state.
    pub fn load(&mut self, drafts: Vec<EventDraft>) {
        self.order = drafts.iter().map(|d| d.id).collect();
        self.drafts = drafts.into_iter().map(|d| (d.id, d)).collect();
        self.cursor = self.order.first().copied();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Draft currently under the cursor, if any.
    pub fn current(&self) -> Option<&EventDraft> {
        self.cursor.and_then(|id| self.drafts.get(&id))
    }

    /// Zero-based position of the cursor within the queue.
    pub fn position(&self) -> Option<usize> {
        let id = self.cursor?;
        self.order.iter().position(|candidate| *candidate == id)
    }

    /// Move the cursor one step, clamped to the queue bounds.
    pub fn navigate(&mut self, direction: Direction) -> Result<&EventDraft, ReviewError> {
        let position = self.position().ok_or(ReviewError::Empty)?;
        let target = match direction {
            Direction::Prev => position.saturating_sub(1),
            Direction::Next => (position + 1).min(self.order.len() - 1),
        };
        self.cursor = Some(self.order[target]);
        Ok(self.current().expect("cursor anchored to a present draft"))
    }

    /// Apply one field edit to the draft under the cursor.
    pub fn edit(&mut self, edit: DraftEdit) -> Result<(), ReviewError> {
        let id = self.cursor.ok_or(ReviewError::Empty)?;
        let draft = self.drafts.get_mut(&id).ok_or(ReviewError::Empty)?;
        match edit {
            DraftEdit::Title(title) => draft.title = title,
            DraftEdit::Date(date) => draft.date = date,
            DraftEdit::StartTime(time) => draft.start_time = time,
            DraftEdit::EndTime(time) => draft.end_time = time,
            DraftEdit::Location(location) => draft.location = location,
            DraftEdit::Description(description) => draft.description = description,
            DraftEdit::TicketLink(link) => draft.ticket_link = link,
        }
        Ok(())
    }

    /// Remove and return the draft under the cursor for hand-off, along with
    /// whether the queue drained (review session complete).
    pub fn approve(&mut self) -> Result<(EventDraft, bool), ReviewError> {
        let draft = self.take_current()?;
        Ok((draft, self.is_empty()))
    }

    /// Remove and discard the draft under the cursor. Returns whether the
    /// queue drained. Rejected drafts are never emitted anywhere.
    pub fn reject(&mut self) -> Result<bool, ReviewError> {
        self.take_current()?;
        Ok(self.is_empty())
    }

    /// Put a draft back at a given position and anchor the cursor on it.
    /// Used by the session to undo a removal when the downstream hand-off
    /// fails.
    pub(crate) fn restore(&mut self, position: usize, draft: EventDraft) {
        let position = position.min(self.order.len());
        self.order.insert(position, draft.id);
        self.cursor = Some(draft.id);
        self.drafts.insert(draft.id, draft);
    }

    fn take_current(&mut self) -> Result<EventDraft, ReviewError> {
        let position = self.position().ok_or(ReviewError::Empty)?;
        let id = self.order.remove(position);
        let draft = self
            .drafts
            .remove(&id)
            .expect("ordered id present in arena");
        // Re-anchor on whichever draft now occupies the removed slot, or the
        // new last draft when the tail was removed.
        self.cursor = self
            .order
            .get(position.min(self.order.len().saturating_sub(1)))
            .copied();
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use flyerscan_core::models::ImageRef;

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            id: Uuid::new_v4(),
            title: title.to_string(),
            date: None,
            start_time: None,
            end_time: None,
            location: None,
            description: String::new(),
            ticket_link: None,
            image: ImageRef::new(format!("{title}.jpg")),
            extracted_at: Utc::now(),
        }
    }

    fn loaded(titles: &[&str]) -> ReviewQueue {
        let mut queue = ReviewQueue::new();
        queue.load(titles.iter().map(|t| draft(t)).collect());
        queue
    }

    #[test]
    fn test_load_anchors_cursor_on_first() {
        let queue = loaded(&["a", "b", "c"]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.current().unwrap().title, "a");
        assert_eq!(queue.position(), Some(0));
    }

    #[test]
    fn test_empty_load_is_empty_state() {
        let mut queue = ReviewQueue::new();
        queue.load(Vec::new());
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
        assert_eq!(queue.navigate(Direction::Next), Err(ReviewError::Empty));
        assert_eq!(
            queue.edit(DraftEdit::Title("x".to_string())),
            Err(ReviewError::Empty)
        );
    }

    #[test]
    fn test_navigation_clamps_at_bounds() {
        let mut queue = loaded(&["a", "b"]);
        // Prev at the head is a no-op.
        assert_eq!(queue.navigate(Direction::Prev).unwrap().title, "a");
        assert_eq!(queue.navigate(Direction::Next).unwrap().title, "b");
        // Next at the tail is a no-op.
        assert_eq!(queue.navigate(Direction::Next).unwrap().title, "b");
    }

    #[test]
    fn test_edit_mutates_current_draft() {
        let mut queue = loaded(&["a", "b"]);
        queue.navigate(Direction::Next).unwrap();
        queue
            .edit(DraftEdit::Location(Some("Echo Lounge".to_string())))
            .unwrap();
        queue.edit(DraftEdit::Title("B Side".to_string())).unwrap();
        let current = queue.current().unwrap();
        assert_eq!(current.title, "B Side");
        assert_eq!(current.location.as_deref(), Some("Echo Lounge"));
    }

    #[test]
    fn test_approve_single_item_drains_queue() {
        let mut queue = loaded(&["only"]);
        let (draft, complete) = queue.approve().unwrap();
        assert_eq!(draft.title, "only");
        assert!(complete);
        assert!(queue.is_empty());
        assert_eq!(queue.approve().unwrap_err(), ReviewError::Empty);
    }

    #[test]
    fn test_removal_keeps_cursor_on_neighbor() {
        let mut queue = loaded(&["a", "b", "c"]);
        queue.navigate(Direction::Next).unwrap();
        let (removed, complete) = queue.approve().unwrap();
        assert_eq!(removed.title, "b");
        assert!(!complete);
        // The draft that slid into the removed slot is now current.
        assert_eq!(queue.current().unwrap().title, "c");

        // Removing the tail re-anchors backwards.
        let (removed, _) = queue.approve().unwrap();
        assert_eq!(removed.title, "c");
        assert_eq!(queue.current().unwrap().title, "a");
    }

    #[test]
    fn test_reject_discards_without_returning() {
        let mut queue = loaded(&["a", "b"]);
        assert!(!queue.reject().unwrap());
        assert_eq!(queue.len(), 1);
        assert!(queue.reject().unwrap());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_restore_puts_draft_back_under_cursor() {
        let mut queue = loaded(&["a", "b"]);
        let position = queue.position().unwrap();
        let (removed, _) = queue.approve().unwrap();
        let removed_title = removed.title.clone();
        queue.restore(position, removed);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().title, removed_title);
        assert_eq!(queue.position(), Some(0));
    }

    #[test]
    fn test_reload_replaces_items() {
        let mut queue = loaded(&["a", "b"]);
        queue.navigate(Direction::Next).unwrap();
        queue.load(vec![draft("x")]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current().unwrap().title, "x");
    }
}
