use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{KeyValueStore, StorageChange};
use crate::error::StorageError;

type Listener = Rc<dyn Fn(&StorageChange)>;

#[derive(Default)]
struct Shared {
    items: BTreeMap<String, String>,
    listeners: Vec<(usize, Listener)>,
    next_context: usize,
}

/// In-memory [`KeyValueStore`] with Web Storage change semantics.
///
/// Every handle is one browsing context. Handles created with
/// [`open_context`](Self::open_context) share the same items, and a write made
/// through one handle is reported to the listeners of every *other* handle,
/// the way a `storage` event never fires in the tab that made the change.
/// Clones of a handle are the same context.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Rc<RefCell<Shared>>,
    context: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        let shared = Rc::new(RefCell::new(Shared {
            next_context: 1,
            ..Shared::default()
        }));
        Self { shared, context: 0 }
    }

    /// A new context over the same storage area.
    pub fn open_context(&self) -> Self {
        let mut shared = self.shared.borrow_mut();
        let context = shared.next_context;
        shared.next_context += 1;
        Self {
            shared: Rc::clone(&self.shared),
            context,
        }
    }

    /// Registers `listener` for changes made by other contexts.
    pub fn listen(&self, listener: impl Fn(&StorageChange) + 'static) {
        self.shared
            .borrow_mut()
            .listeners
            .push((self.context, Rc::new(listener)));
    }

    fn broadcast(&self, change: StorageChange) {
        // Collected first so listeners may read the store.
        let targets: Vec<Listener> = self
            .shared
            .borrow()
            .listeners
            .iter()
            .filter(|(context, _)| *context != self.context)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in targets {
            listener(&change);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.shared.borrow().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.shared
            .borrow_mut()
            .items
            .insert(key.to_string(), value.to_string());
        self.broadcast(StorageChange {
            key: key.to_string(),
            new_value: Some(value.to_string()),
        });
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.shared.borrow_mut().items.remove(key);
        if removed.is_some() {
            self.broadcast(StorageChange {
                key: key.to_string(),
                new_value: None,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_share_items() {
        let first = MemoryStore::new();
        let second = first.open_context();

        first.set_item("k", "v").unwrap();

        assert_eq!(second.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn changes_are_reported_to_other_contexts_only() {
        let first = MemoryStore::new();
        let second = first.open_context();
        let seen_by_first = Rc::new(RefCell::new(Vec::new()));
        let seen_by_second = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen_by_first);
            first.listen(move |change| seen.borrow_mut().push(change.clone()));
            let seen = Rc::clone(&seen_by_second);
            second.listen(move |change| seen.borrow_mut().push(change.clone()));
        }

        first.set_item("k", "v").unwrap();
        first.remove_item("k").unwrap();
        first.remove_item("k").unwrap();

        assert!(seen_by_first.borrow().is_empty());
        assert_eq!(
            *seen_by_second.borrow(),
            vec![
                StorageChange {
                    key: "k".into(),
                    new_value: Some("v".into())
                },
                StorageChange {
                    key: "k".into(),
                    new_value: None
                },
            ]
        );
    }
}
