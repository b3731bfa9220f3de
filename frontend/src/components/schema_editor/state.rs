//! State of the schema editor.
//!
//! The draft being edited is separate from the saved list: edits touch only
//! `draft` until the user saves, and the saved list is refreshed from the
//! repository after every repository call.

use common::model::row_keys::RowKeys;
use common::model::schema::{DataType, Schema, SchemaColumn, SchemaDraft};
use common::store::SchemaRepository;

use crate::storage::{schema_repository, LocalStorage, StorageEventListener};

/// Inputs of the add-column dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewColumn {
    pub title: String,
    pub data_type: DataType,
}

/// The nested-column dialog, open on the object column at `index`.
///
/// Edits stay local to `columns` until saved back onto the column.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedEdit {
    pub index: usize,
    pub parent_title: String,
    pub columns: Vec<SchemaColumn>,
    pub new_column: NewColumn,
}

pub struct SchemaEditor {
    pub draft: SchemaDraft,
    /// One render key per draft column, moved along with the columns.
    pub row_keys: RowKeys,
    pub repository: SchemaRepository<LocalStorage>,
    /// Copy of the repository list for rendering.
    pub saved: Vec<Schema>,

    pub dragged: Option<usize>,
    /// Column whose title is being edited inline, with the pending text.
    pub renaming: Option<(usize, String)>,
    pub new_column: Option<NewColumn>,
    pub nested: Option<NestedEdit>,

    pub listener: Option<StorageEventListener>,
}

impl SchemaEditor {
    pub fn new() -> Self {
        let mut repository = schema_repository();
        let saved = repository.schemas().to_vec();
        let draft = SchemaDraft::new();
        Self {
            row_keys: RowKeys::with_len(draft.columns.len()),
            draft,
            repository,
            saved,
            dragged: None,
            renaming: None,
            new_column: None,
            nested: None,
            listener: None,
        }
    }

    pub fn refresh_saved(&mut self) {
        self.saved = self.repository.schemas().to_vec();
    }

    /// Replaces the draft and drops every in-progress edit.
    pub fn reset_draft(&mut self, draft: SchemaDraft) {
        self.row_keys.reset(draft.columns.len());
        self.draft = draft;
        self.dragged = None;
        self.renaming = None;
        self.new_column = None;
        self.nested = None;
    }

    /// The persisted version of the draft, if it has been saved.
    pub fn saved_schema(&self) -> Option<&Schema> {
        let id = self.draft.id.as_deref()?;
        self.saved.iter().find(|schema| schema.id == id)
    }

    pub fn can_save(&self) -> bool {
        !self.draft.name.trim().is_empty() && !self.draft.columns.is_empty()
    }

    /// True when the draft has edits that are not in storage yet.
    pub fn is_dirty(&self) -> bool {
        match self.saved_schema() {
            Some(saved) => self.draft.differs_from(saved),
            None => !self.draft.columns.is_empty() || !self.draft.name.is_empty(),
        }
    }
}
