//! `window.localStorage` as a [`KeyValueStore`], plus a listener for the
//! `storage` events other tabs raise when they write to it.

use common::error::StorageError;
use common::storage::{KeyValueStore, StorageChange, StorageKey};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Storage, StorageEvent};

const STORAGE_EVENT: &str = "storage";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorage;

impl LocalStorage {
    fn area() -> Result<Storage, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(js_message(&err)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::area()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(js_message(&err)))
    }

    // Quota errors surface here.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::area()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: js_message(&err),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::area()?
            .remove_item(key)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: js_message(&err),
            })
    }
}

/// Forwards `storage` events of the window as [`StorageChange`]s until dropped.
pub struct StorageEventListener {
    callback: Closure<dyn FnMut(StorageEvent)>,
}

impl StorageEventListener {
    pub fn new(on_change: impl Fn(StorageChange) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
            match event.key() {
                Some(key) => on_change(StorageChange {
                    key,
                    new_value: event.new_value(),
                }),
                // Another tab called `localStorage.clear()`.
                None => {
                    for key in StorageKey::ALL {
                        on_change(StorageChange {
                            key: key.as_str().to_string(),
                            new_value: None,
                        });
                    }
                }
            }
        });
        window
            .add_event_listener_with_callback(STORAGE_EVENT, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { callback })
    }
}

impl Drop for StorageEventListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                STORAGE_EVENT,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
