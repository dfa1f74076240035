//! Per-session interaction state.
//!
//! Each interactive session owns one [`SessionState`], kept in a
//! [`SessionStore`] keyed by [`SessionId`]. The store is an ordinary value
//! passed to whoever handles a session's interactions; it does no locking and
//! relies on the host serialising interactions per session. Nothing here is
//! persisted.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{KindFilter, SystemFilter};

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Navigation pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    Questions,
    StudyNotes,
    Progress,
    About,
}

/// Where an answer is selected: a whole choice question, or one EMQ case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerSlot {
    Choice(String),
    /// Question id and zero-based case index.
    Case(String, usize),
}

/// A selected answer as the presentation layer surfaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Zero-based option index (SBA/MCQ).
    Option(usize),
    /// Option text (EMQ).
    Text(String),
}

impl From<usize> for Selection {
    fn from(index: usize) -> Self {
        Selection::Option(index)
    }
}

impl From<String> for Selection {
    fn from(text: String) -> Self {
        Selection::Text(text)
    }
}

/// Mutable state of one interactive session.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: SessionId,
    page: Page,
    kind_filter: KindFilter,
    system_filter: SystemFilter,
    note_filter: SystemFilter,
    selections: HashMap<AnswerSlot, Selection>,
    revealed: HashSet<AnswerSlot>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl SessionState {
    fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            page: Page::default(),
            kind_filter: KindFilter::All,
            system_filter: SystemFilter::All,
            note_filter: SystemFilter::All,
            selections: HashMap::new(),
            revealed: HashSet::new(),
            created_at: now,
            last_active: now,
        }
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn kind_filter(&self) -> KindFilter {
        self.kind_filter
    }

    pub fn system_filter(&self) -> SystemFilter {
        self.system_filter
    }

    pub fn note_filter(&self) -> SystemFilter {
        self.note_filter
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
        self.touch();
    }

    pub fn set_filter(&mut self, kind: KindFilter, system: SystemFilter) {
        self.kind_filter = kind;
        self.system_filter = system;
        self.touch();
    }

    pub fn set_note_filter(&mut self, system: SystemFilter) {
        self.note_filter = system;
        self.touch();
    }

    /// Record a selection. Changing the selection hides any explanation
    /// already shown for that slot.
    pub fn select_answer(&mut self, slot: AnswerSlot, value: Selection) {
        if self.selections.get(&slot) != Some(&value) {
            self.revealed.remove(&slot);
        }
        self.selections.insert(slot, value);
        self.touch();
    }

    pub fn selection(&self, slot: &AnswerSlot) -> Option<&Selection> {
        self.selections.get(slot)
    }

    /// Mark the slot's explanation as shown.
    pub fn reveal(&mut self, slot: AnswerSlot) {
        self.revealed.insert(slot);
        self.touch();
    }

    pub fn is_revealed(&self, slot: &AnswerSlot) -> bool {
        self.revealed.contains(slot)
    }

    pub fn answered(&self) -> usize {
        self.selections.len()
    }
}

/// All live sessions of one process.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session's state, creating it on first access.
    pub fn get_or_create(&mut self, id: SessionId) -> &mut SessionState {
        self.sessions.entry(id).or_insert_with(|| {
            tracing::debug!(session = %id, "created session");
            SessionState::new(id)
        })
    }

    pub fn get(&self, id: SessionId) -> Option<&SessionState> {
        self.sessions.get(&id)
    }

    /// Discard a session's state. Returns it if the session existed.
    pub fn end(&mut self, id: SessionId) -> Option<SessionState> {
        let ended = self.sessions.remove(&id);
        if ended.is_some() {
            tracing::debug!(session = %id, "ended session");
        }
        ended
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::System;

    #[test]
    fn created_lazily_with_defaults() {
        let mut store = SessionStore::new();
        let id = SessionId::new();
        assert!(store.get(id).is_none());

        let state = store.get_or_create(id);
        assert_eq!(state.id(), id);
        assert_eq!(state.page(), Page::Home);
        assert_eq!(state.kind_filter(), KindFilter::All);
        assert_eq!(state.system_filter(), SystemFilter::All);
        assert_eq!(state.answered(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_or_create_returns_existing_state() {
        let mut store = SessionStore::new();
        let id = SessionId::new();
        store.get_or_create(id).set_page(Page::Questions);
        assert_eq!(store.get_or_create(id).page(), Page::Questions);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_are_isolated() {
        let mut store = SessionStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        store
            .get_or_create(a)
            .set_filter(KindFilter::Emq, SystemFilter::Only(System::Renal));
        store
            .get_or_create(a)
            .select_answer(AnswerSlot::Choice("1".into()), Selection::Option(2));

        let other = store.get_or_create(b);
        assert_eq!(other.kind_filter(), KindFilter::All);
        assert_eq!(other.selection(&AnswerSlot::Choice("1".into())), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn changing_selection_hides_explanation() {
        let mut store = SessionStore::new();
        let state = store.get_or_create(SessionId::new());
        let slot = AnswerSlot::Case("emq-1".into(), 0);

        state.select_answer(slot.clone(), Selection::Text("Asthma".into()));
        state.reveal(slot.clone());
        assert!(state.is_revealed(&slot));

        state.select_answer(slot.clone(), Selection::Text("Asthma".into()));
        assert!(state.is_revealed(&slot));

        state.select_answer(slot.clone(), Selection::Text("COPD".into()));
        assert!(!state.is_revealed(&slot));
        assert_eq!(state.selection(&slot), Some(&Selection::Text("COPD".into())));
    }

    #[test]
    fn mutations_update_last_active() {
        let mut store = SessionStore::new();
        let state = store.get_or_create(SessionId::new());
        let created = state.created_at();
        state.set_note_filter(SystemFilter::Only(System::Cns));
        assert!(state.last_active() >= created);
        assert_eq!(state.note_filter(), SystemFilter::Only(System::Cns));
    }

    #[test]
    fn end_discards_state() {
        let mut store = SessionStore::new();
        let id = SessionId::new();
        store.get_or_create(id).set_page(Page::About);

        let ended = store.end(id).unwrap();
        assert_eq!(ended.page(), Page::About);
        assert!(store.is_empty());
        assert!(store.end(id).is_none());
        assert_eq!(store.get_or_create(id).page(), Page::Home);
    }
}
