use crate::error::StoreError;
use crate::model::schema::{ColumnList, Schema, SchemaDraft};
use crate::storage::{KeyValueStore, Persistence, StorageChange, StorageKey};

/// The list of saved schemas, in the order they were first saved.
///
/// The list is read from storage on first access and every mutation is
/// written straight back; there is no buffered state to flush.
pub struct SchemaRepository<S> {
    persistence: Persistence<S>,
    schemas: Option<Vec<Schema>>,
}

impl<S: KeyValueStore> SchemaRepository<S> {
    pub fn new(persistence: Persistence<S>) -> Self {
        Self {
            persistence,
            schemas: None,
        }
    }

    pub fn schemas(&mut self) -> &[Schema] {
        self.loaded()
    }

    /// Persists `draft`.
    ///
    /// A draft without an id gets a fresh one, bound back onto the draft, and
    /// is appended. A draft with an id replaces the entry with that id in
    /// place; if no such entry exists any more it is appended. Column orders
    /// are renumbered from list position before storing.
    pub fn save(&mut self, draft: &mut SchemaDraft) -> Result<Schema, StoreError> {
        draft.validate()?;

        let id = draft
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        let mut columns = draft.columns.clone();
        columns.renumber();
        let schema = Schema {
            id,
            name: draft.name.trim().to_string(),
            columns,
        };

        let mut schemas = self.loaded().to_vec();
        match schemas.iter_mut().find(|existing| existing.id == schema.id) {
            Some(existing) => *existing = schema.clone(),
            None => schemas.push(schema.clone()),
        }
        self.persistence.save(StorageKey::Schemas, &schemas)?;
        self.schemas = Some(schemas);

        log::info!("saved schema {} ({})", schema.name, schema.id);
        Ok(schema)
    }

    /// Removes the schema with `id`. Returns whether anything was removed;
    /// an unknown id is not an error.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut schemas = self.loaded().to_vec();
        let before = schemas.len();
        schemas.retain(|schema| schema.id != id);
        if schemas.len() == before {
            return Ok(false);
        }
        self.persistence.save(StorageKey::Schemas, &schemas)?;
        self.schemas = Some(schemas);

        log::info!("deleted schema {id}");
        Ok(true)
    }

    /// Mirrors a change to the schema list made by another context.
    pub fn handle_storage_change(&mut self, change: &StorageChange) -> bool {
        if !change.is_for(StorageKey::Schemas) {
            return false;
        }
        let schemas = match &change.new_value {
            None => Vec::new(),
            Some(text) => match serde_json::from_str(text) {
                Ok(schemas) => schemas,
                Err(err) => {
                    log::warn!("ignoring unparsable schema list update: {err}");
                    return false;
                }
            },
        };
        self.schemas = Some(schemas);
        true
    }

    fn loaded(&mut self) -> &Vec<Schema> {
        let persistence = &self.persistence;
        self.schemas
            .get_or_insert_with(|| persistence.load(StorageKey::Schemas, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::model::schema::{DataType, SchemaColumn};
    use crate::storage::MemoryStore;

    fn repository(memory: &MemoryStore) -> SchemaRepository<MemoryStore> {
        SchemaRepository::new(Persistence::new(memory.clone()))
    }

    fn draft(name: &str) -> SchemaDraft {
        let mut draft = SchemaDraft::new();
        draft.name = name.to_string();
        draft.add_column("total", DataType::Number);
        draft
    }

    fn stored(memory: &MemoryStore) -> Vec<Schema> {
        Persistence::new(memory.clone()).load(StorageKey::Schemas, Vec::new())
    }

    #[test]
    fn saving_twice_keeps_a_single_entry() {
        let memory = MemoryStore::new();
        let mut repository = repository(&memory);
        let mut draft = draft("Invoice");

        let first = repository.save(&mut draft).unwrap();
        assert_eq!(draft.id.as_deref(), Some(first.id.as_str()));

        draft.name = "Invoice v2".into();
        let second = repository.save(&mut draft).unwrap();

        assert_eq!(first.id, second.id);
        let persisted = stored(&memory);
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].name, "Invoice v2");
    }

    #[test]
    fn update_keeps_position_and_new_schemas_append() {
        let memory = MemoryStore::new();
        let mut repository = repository(&memory);
        let mut a = draft("a");
        let mut b = draft("b");
        let mut c = draft("c");
        repository.save(&mut a).unwrap();
        repository.save(&mut b).unwrap();
        repository.save(&mut c).unwrap();

        b.name = "b2".into();
        repository.save(&mut b).unwrap();

        let names: Vec<String> = stored(&memory).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["a", "b2", "c"]);
    }

    #[test]
    fn ids_are_unique() {
        let memory = MemoryStore::new();
        let mut repository = repository(&memory);
        let first = repository.save(&mut draft("x")).unwrap();
        let second = repository.save(&mut draft("x")).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn save_renumbers_column_orders() {
        let memory = MemoryStore::new();
        let mut repository = repository(&memory);
        let mut draft = draft("orders");
        draft.add_column("lines", DataType::Object);
        draft
            .set_nested_columns(
                1,
                vec![
                    SchemaColumn::new("sku", 5, DataType::String),
                    SchemaColumn::new("qty", 5, DataType::Number),
                ],
            )
            .unwrap();
        draft.reorder_column(1, 0).unwrap();

        let saved = repository.save(&mut draft).unwrap();

        assert_eq!(saved.columns[0].title, "lines");
        assert_eq!(saved.columns[0].order, 0);
        assert_eq!(saved.columns[1].order, 1);
        let nested: Vec<usize> = saved.columns[0]
            .children()
            .unwrap()
            .iter()
            .map(|c| c.order)
            .collect();
        assert_eq!(nested, [0, 1]);
    }

    #[test]
    fn invalid_drafts_are_rejected_without_binding_an_id() {
        let memory = MemoryStore::new();
        let mut repository = repository(&memory);
        let mut empty = SchemaDraft::new();
        empty.name = "no columns".into();

        let err = repository.save(&mut empty).unwrap_err();

        assert!(matches!(err, StoreError::Schema(SchemaError::NoColumns)));
        assert!(empty.id.is_none());
        assert!(stored(&memory).is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let memory = MemoryStore::new();
        let mut repository = repository(&memory);
        let saved = repository.save(&mut draft("gone")).unwrap();
        repository.save(&mut draft("kept")).unwrap();

        assert!(repository.delete(&saved.id).unwrap());
        assert!(!repository.delete(&saved.id).unwrap());
        assert!(!repository.delete("never-existed").unwrap());

        let names: Vec<String> = stored(&memory).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["kept"]);
    }

    #[test]
    fn loads_lazily_from_storage() {
        let memory = MemoryStore::new();
        repository(&memory).save(&mut draft("persisted")).unwrap();

        let mut fresh = repository(&memory);
        assert_eq!(fresh.schemas().len(), 1);
        assert_eq!(fresh.schemas()[0].name, "persisted");
    }

    #[test]
    fn corrupt_schema_list_reads_as_empty() {
        let memory = MemoryStore::new();
        memory
            .set_item(StorageKey::Schemas.as_str(), "[{\"id\": 1")
            .unwrap();
        assert!(repository(&memory).schemas().is_empty());
    }

    #[test]
    fn mirrors_changes_from_other_contexts() {
        let memory = MemoryStore::new();
        let other = memory.open_context();
        let mut mine = repository(&memory);
        assert!(mine.schemas().is_empty());

        let changes = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let changes = std::rc::Rc::clone(&changes);
            memory.listen(move |change| changes.borrow_mut().push(change.clone()));
        }
        repository(&other).save(&mut draft("remote")).unwrap();

        for change in changes.borrow().iter() {
            assert!(mine.handle_storage_change(change));
        }
        assert_eq!(mine.schemas()[0].name, "remote");
    }
}
