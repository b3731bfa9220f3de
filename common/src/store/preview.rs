//! Single owner of the current preview result.
//!
//! Every view that shows or replaces the preview goes through one
//! [`PreviewStore`]: it loads the stored value once, writes changes through
//! to storage before updating memory, and then tells its subscribers. Writes
//! made by other browsing contexts are fed in through
//! [`PreviewStore::handle_storage_change`], so open tabs converge.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::StorageError;
use crate::model::preview::PreviewData;
use crate::storage::{KeyValueStore, Persistence, StorageChange, StorageKey};

pub type SubscriptionId = usize;

type Subscriber = Rc<dyn Fn(&PreviewState)>;

/// What subscribers see.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    pub data: Option<PreviewData>,
    /// True until the first load attempt has finished.
    pub loading: bool,
}

pub struct PreviewStore<S> {
    persistence: Persistence<S>,
    state: RefCell<PreviewState>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: Cell<SubscriptionId>,
}

impl<S: KeyValueStore> PreviewStore<S> {
    pub fn new(persistence: Persistence<S>) -> Self {
        Self {
            persistence,
            state: RefCell::new(PreviewState {
                data: None,
                loading: true,
            }),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    /// Reads the stored preview the first time it is called; later calls do
    /// nothing. A corrupt stored value counts as an attempt and loads as none.
    pub fn load(&self) {
        if !self.state.borrow().loading {
            return;
        }
        let data = self.persistence.try_load(StorageKey::PreviewData);
        self.replace(data);
    }

    /// Current state, without triggering a load.
    pub fn state(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// The current preview, loading it first if nothing has been read yet.
    pub fn preview_data(&self) -> Option<PreviewData> {
        self.load();
        self.state.borrow().data.clone()
    }

    /// Stores `data` (or removes the stored preview for `None`) and then
    /// updates memory. Memory is left untouched when the write fails.
    pub fn set_preview_data(&self, data: Option<PreviewData>) -> Result<(), StorageError> {
        match &data {
            Some(preview) => self.persistence.save(StorageKey::PreviewData, preview)?,
            None => self.persistence.clear(StorageKey::PreviewData)?,
        }
        self.replace(data);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.set_preview_data(None)
    }

    /// Mirrors a write made by another context. Changes to other keys and
    /// unparsable values are ignored.
    pub fn handle_storage_change(&self, change: &StorageChange) {
        if !change.is_for(StorageKey::PreviewData) {
            return;
        }
        let data = match &change.new_value {
            None => None,
            Some(text) => match serde_json::from_str::<PreviewData>(text) {
                Ok(preview) => Some(preview),
                Err(err) => {
                    log::warn!("ignoring unparsable preview update: {err}");
                    return;
                }
            },
        };
        self.replace(data);
    }

    pub fn subscribe(&self, subscriber: impl Fn(&PreviewState) + 'static) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers
            .borrow_mut()
            .retain(|(subscription, _)| *subscription != id);
    }

    fn replace(&self, data: Option<PreviewData>) {
        {
            let mut state = self.state.borrow_mut();
            state.data = data;
            state.loading = false;
        }
        self.notify();
    }

    fn notify(&self) {
        let state = self.state();
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn preview(value: serde_json::Value) -> PreviewData {
        PreviewData::new(value)
    }

    fn recorder(store: &PreviewStore<MemoryStore>) -> Rc<RefCell<Vec<PreviewState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        seen
    }

    #[test]
    fn loading_flag_flips_exactly_once() {
        let memory = MemoryStore::new();
        Persistence::new(memory.clone())
            .save(StorageKey::PreviewData, &json!({"a": 1}))
            .unwrap();
        let store = PreviewStore::new(Persistence::new(memory));
        let seen = recorder(&store);

        assert!(store.is_loading());
        store.load();
        store.load();
        let _ = store.preview_data();

        assert!(!store.is_loading());
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].data, Some(preview(json!({"a": 1}))));
    }

    #[test]
    fn corrupt_stored_preview_finishes_loading_with_nothing() {
        let memory = MemoryStore::new();
        memory
            .set_item(StorageKey::PreviewData.as_str(), "```json {")
            .unwrap();
        let store = PreviewStore::new(Persistence::new(memory));

        assert_eq!(store.preview_data(), None);
        assert!(!store.is_loading());
    }

    #[test]
    fn set_writes_through_before_notifying() {
        let memory = MemoryStore::new();
        let store = Rc::new(PreviewStore::new(Persistence::new(memory.clone())));
        let stored_at_notify = Rc::new(RefCell::new(None));
        {
            let memory = memory.clone();
            let stored = Rc::clone(&stored_at_notify);
            store.subscribe(move |_| {
                *stored.borrow_mut() = memory
                    .get_item(StorageKey::PreviewData.as_str())
                    .unwrap();
            });
        }

        store
            .set_preview_data(Some(preview(json!({"total": 3}))))
            .unwrap();

        assert_eq!(
            stored_at_notify.borrow().as_deref(),
            Some(r#"{"total":3}"#)
        );
        assert_eq!(store.preview_data(), Some(preview(json!({"total": 3}))));
    }

    #[test]
    fn clearing_removes_the_stored_value() {
        let memory = MemoryStore::new();
        let store = PreviewStore::new(Persistence::new(memory.clone()));
        store.set_preview_data(Some(preview(json!([1])))).unwrap();

        store.clear().unwrap();

        assert_eq!(store.preview_data(), None);
        assert_eq!(
            memory.get_item(StorageKey::PreviewData.as_str()).unwrap(),
            None
        );
    }

    #[test]
    fn two_contexts_converge_through_storage_changes() {
        let first_memory = MemoryStore::new();
        let second_memory = first_memory.open_context();
        let first = Rc::new(PreviewStore::new(Persistence::new(first_memory.clone())));
        let second = Rc::new(PreviewStore::new(Persistence::new(second_memory.clone())));
        for (memory, store) in [(&first_memory, &first), (&second_memory, &second)] {
            let store = Rc::clone(store);
            memory.listen(move |change| store.handle_storage_change(change));
        }
        first.load();
        second.load();
        let seen_by_second = recorder(&second);

        first
            .set_preview_data(Some(preview(json!({"from": "first"}))))
            .unwrap();
        assert_eq!(
            second.preview_data(),
            Some(preview(json!({"from": "first"})))
        );

        first.clear().unwrap();
        assert_eq!(second.preview_data(), None);
        assert_eq!(seen_by_second.borrow().len(), 2);
    }

    #[test]
    fn unrelated_and_unparsable_changes_are_ignored() {
        let store = PreviewStore::new(Persistence::new(MemoryStore::new()));
        store.set_preview_data(Some(preview(json!({"keep": true})))).unwrap();

        store.handle_storage_change(&StorageChange {
            key: StorageKey::Schemas.as_str().into(),
            new_value: None,
        });
        store.handle_storage_change(&StorageChange {
            key: StorageKey::PreviewData.as_str().into(),
            new_value: Some("{broken".into()),
        });

        assert_eq!(store.preview_data(), Some(preview(json!({"keep": true}))));
    }

    #[test]
    fn unsubscribed_callbacks_are_not_called() {
        let store = PreviewStore::new(Persistence::new(MemoryStore::new()));
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.unsubscribe(id);
        store.load();

        assert_eq!(calls.get(), 0);
    }
}
