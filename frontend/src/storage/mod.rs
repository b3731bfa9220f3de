mod local;

pub use local::{LocalStorage, StorageEventListener};

use common::storage::Persistence;
use common::store::{PreviewStore, SchemaRepository};

pub fn persistence() -> Persistence<LocalStorage> {
    Persistence::new(LocalStorage)
}

pub fn preview_store() -> PreviewStore<LocalStorage> {
    PreviewStore::new(persistence())
}

pub fn schema_repository() -> SchemaRepository<LocalStorage> {
    SchemaRepository::new(persistence())
}
