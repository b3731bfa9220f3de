//! Update function of the schema editor.
//!
//! Column edits go straight to the draft through the `common` model
//! operations. Repository calls (save, delete) write through to local
//! storage and then refresh the rendered list. Remote calls are spawned and
//! report back to the owner through `on_result`, not to this component.

use std::fmt::Display;

use common::model::schema::{ColumnList, DataType, SchemaDraft};
use log::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::show_toast;

use super::messages::Msg;
use super::state::{NestedEdit, NewColumn, SchemaEditor};

pub fn update(editor: &mut SchemaEditor, ctx: &Context<SchemaEditor>, msg: Msg) -> bool {
    match msg {
        Msg::SetName(name) => {
            editor.draft.name = name;
            true
        }

        Msg::OpenAddColumn => {
            editor.new_column = Some(NewColumn::default());
            true
        }
        Msg::CloseAddColumn => {
            editor.new_column = None;
            true
        }
        Msg::SetNewColumnTitle(title) => {
            if let Some(new_column) = &mut editor.new_column {
                new_column.title = title;
            }
            true
        }
        Msg::SetNewColumnType(data_type) => {
            if let Some(new_column) = &mut editor.new_column {
                new_column.data_type = data_type;
            }
            true
        }
        Msg::AddColumn => {
            let Some(new_column) = editor.new_column.take() else {
                return false;
            };
            let title = new_column.title.trim();
            if title.is_empty() {
                editor.new_column = Some(new_column);
                return false;
            }
            editor.draft.add_column(title, new_column.data_type);
            editor.row_keys.push();
            // A new object column goes straight to defining its fields.
            if new_column.data_type == DataType::Object {
                let index = editor.draft.columns.len() - 1;
                open_nested(editor, index);
            }
            true
        }

        Msg::RemoveColumn(index) => {
            match editor.draft.remove_column(index) {
                Ok(_) => editor.row_keys.remove(index),
                Err(err) => report(ctx, err),
            }
            editor.renaming = None;
            true
        }
        Msg::SetColumnType(index, data_type) => {
            if let Err(err) = editor.draft.set_column_type(index, data_type) {
                report(ctx, err);
            }
            true
        }
        Msg::DragStart(index) => {
            editor.dragged = Some(index);
            true
        }
        Msg::DragOver(index) => match editor.dragged {
            Some(from) if from != index => {
                if editor.draft.reorder_column(from, index).is_ok() {
                    editor.row_keys.reorder(from, index);
                    editor.dragged = Some(index);
                }
                true
            }
            _ => false,
        },
        Msg::DragEnd => {
            editor.dragged = None;
            true
        }
        Msg::StartRename(index) => {
            editor.renaming = editor
                .draft
                .columns
                .get(index)
                .map(|column| (index, column.title.clone()));
            true
        }
        Msg::EditTitle(text) => {
            if let Some((_, pending)) = &mut editor.renaming {
                *pending = text;
            }
            false
        }
        Msg::CommitRename => {
            if let Some((index, title)) = editor.renaming.take() {
                if let Err(err) = editor.draft.rename_column(index, &title) {
                    report(ctx, err);
                }
            }
            true
        }
        Msg::CancelRename => {
            editor.renaming = None;
            true
        }

        Msg::OpenNested(index) => {
            open_nested(editor, index);
            true
        }
        Msg::SetNestedTitle(title) => {
            if let Some(nested) = &mut editor.nested {
                nested.new_column.title = title;
            }
            true
        }
        Msg::SetNestedType(data_type) => {
            if let Some(nested) = &mut editor.nested {
                nested.new_column.data_type = data_type;
            }
            true
        }
        Msg::AddNested => {
            if let Some(nested) = &mut editor.nested {
                let title = nested.new_column.title.trim().to_string();
                if !title.is_empty() {
                    nested.columns.add_column(title, nested.new_column.data_type);
                    nested.new_column = NewColumn::default();
                }
            }
            true
        }
        Msg::RemoveNested(index) => {
            if let Some(nested) = &mut editor.nested {
                if let Err(err) = nested.columns.remove_column(index) {
                    report(ctx, err);
                }
            }
            true
        }
        Msg::SaveNested => {
            if let Some(nested) = editor.nested.take() {
                if let Err(err) = editor.draft.set_nested_columns(nested.index, nested.columns) {
                    report(ctx, err);
                }
            }
            true
        }
        Msg::CloseNested => {
            editor.nested = None;
            true
        }

        Msg::Save => {
            match editor.repository.save(&mut editor.draft) {
                Ok(schema) => {
                    editor.draft = SchemaDraft::from(&schema);
                    editor.refresh_saved();
                    show_toast(&format!("Schema \"{}\" saved", schema.name));
                }
                Err(err) => report(ctx, err),
            }
            true
        }
        Msg::NewSchema => {
            editor.reset_draft(SchemaDraft::new());
            true
        }
        Msg::SelectSchema(id) => {
            let draft = editor
                .saved
                .iter()
                .find(|schema| schema.id == id)
                .map(SchemaDraft::from);
            match draft {
                Some(draft) => {
                    editor.reset_draft(draft);
                    true
                }
                None => false,
            }
        }
        Msg::DeleteSchema(id) => {
            match editor.repository.delete(&id) {
                Ok(removed) => {
                    if editor.draft.id.as_deref() == Some(id.as_str()) {
                        editor.reset_draft(SchemaDraft::new());
                    }
                    editor.refresh_saved();
                    if removed {
                        show_toast("Schema deleted");
                    }
                }
                Err(err) => report(ctx, err),
            }
            true
        }

        Msg::SendSchema => {
            let props = ctx.props();
            if props.busy {
                return false;
            }
            // The persisted version is what gets sent, not unsaved edits.
            let Some(schema) = editor.saved_schema().cloned() else {
                report(ctx, "Save the schema before sending it");
                return false;
            };
            props.on_request_start.emit(());

            let config = props.config.clone();
            let data = props.data.clone();
            let on_result = props.on_result.clone();
            spawn_local(async move {
                let result = api::map_schema(&config, &schema, &data).await;
                if let Err(err) = &result {
                    warn!("mapping with schema {} failed: {err:?}", schema.id);
                }
                on_result.emit(result);
            });
            false
        }
        Msg::AiGenerate => {
            let props = ctx.props();
            if props.busy {
                return false;
            }
            props.on_request_start.emit(());

            let config = props.config.clone();
            let data = props.data.clone();
            let on_result = props.on_result.clone();
            spawn_local(async move {
                let result = api::generate(&config, &data).await;
                if let Err(err) = &result {
                    warn!("AI generation failed: {err:?}");
                }
                on_result.emit(result);
            });
            false
        }

        Msg::StorageChanged(change) => {
            if editor.repository.handle_storage_change(&change) {
                editor.refresh_saved();
                true
            } else {
                false
            }
        }
    }
}

/// Opens the nested-column dialog on the object column at `index`, seeded
/// with that column's current children.
fn open_nested(editor: &mut SchemaEditor, index: usize) {
    if let Some(column) = editor.draft.columns.get(index) {
        if let Some(children) = column.children() {
            editor.nested = Some(NestedEdit {
                index,
                parent_title: column.title.clone(),
                columns: children.to_vec(),
                new_column: NewColumn::default(),
            });
        }
    }
}

fn report(ctx: &Context<SchemaEditor>, err: impl Display) {
    ctx.props().on_error.emit(err.to_string());
}
