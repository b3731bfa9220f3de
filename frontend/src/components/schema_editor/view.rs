//! View of the schema editor: header and toolbar, the column table, the
//! add-column dialog, the nested-column dialog and the saved-schema list.

use common::model::schema::{DataType, SchemaColumn};
use web_sys::{DragEvent, HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::modal_sheet::ModalSheet;

use super::messages::Msg;
use super::nested_dialog::nested_dialog;
use super::saved_schemas::saved_schemas;
use super::state::SchemaEditor;

pub fn view(editor: &SchemaEditor, ctx: &Context<SchemaEditor>) -> Html {
    let link = ctx.link();

    html! {
        <div class="schema-editor">
            { build_header(editor, ctx) }
            { build_column_table(editor, link) }
            { add_column_dialog(editor, link) }
            { nested_dialog(editor, link) }
            { saved_schemas(editor, link) }
        </div>
    }
}

fn build_header(editor: &SchemaEditor, ctx: &Context<SchemaEditor>) -> Html {
    let link = ctx.link();
    let busy = ctx.props().busy;
    let saved = editor.saved_schema();

    let heading = match saved {
        Some(schema) => format!("Edit Schema: {}", schema.name),
        None => "Create New Schema".to_string(),
    };
    let save_label = if saved.is_some() { "Update Schema" } else { "Save Schema" };

    html! {
        <>
            <h3>
                { heading }
                if editor.is_dirty() {
                    <span class="badge-dot" title="Unsaved changes" />
                }
            </h3>
            <div class="schema-toolbar">
                <input
                    class="text-field"
                    placeholder="Schema Name"
                    value={editor.draft.name.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
                <button
                    class="btn primary"
                    disabled={!editor.can_save()}
                    onclick={link.callback(|_| Msg::Save)}
                >
                    <i class="material-icons">{ "save" }</i>{ save_label }
                </button>
                if saved.is_some() {
                    <button
                        class="btn secondary"
                        disabled={busy}
                        onclick={link.callback(|_| Msg::SendSchema)}
                    >
                        <i class="material-icons">{ "send" }</i>{ "Send Schema" }
                    </button>
                }
                <button class="btn info" disabled={busy} onclick={link.callback(|_| Msg::AiGenerate)}>
                    <i class="material-icons">{ "auto_awesome" }</i>{ "AI Generate" }
                </button>
                <button class="btn" onclick={link.callback(|_| Msg::OpenAddColumn)}>
                    <i class="material-icons">{ "add" }</i>{ "Add Column" }
                </button>
            </div>
        </>
    }
}

fn build_column_table(editor: &SchemaEditor, link: &Scope<SchemaEditor>) -> Html {
    if editor.draft.columns.is_empty() {
        return html! { <p class="muted">{ "No columns yet. Use Add Column to define the output." }</p> };
    }

    html! {
        <table class="schema-table">
            <thead>
                <tr>
                    <th class="narrow"></th>
                    <th>{ "Column Title" }</th>
                    <th>{ "Data Type" }</th>
                    <th class="narrow">{ "Actions" }</th>
                </tr>
            </thead>
            <tbody>
                { for editor.draft.columns.iter().enumerate().map(|(index, column)| build_column_rows(editor, link, index, column)) }
            </tbody>
        </table>
    }
}

fn build_column_rows(
    editor: &SchemaEditor,
    link: &Scope<SchemaEditor>,
    index: usize,
    column: &SchemaColumn,
) -> Html {
    let dragging = editor.dragged == Some(index);

    html! {
        <key={editor.row_keys.key(index)}>
            <tr
                draggable="true"
                class={classes!("column-row", dragging.then_some("dragging"))}
                ondragstart={link.callback(move |_: DragEvent| Msg::DragStart(index))}
                ondragend={link.callback(|_: DragEvent| Msg::DragEnd)}
                ondragover={link.callback(move |e: DragEvent| {
                    e.prevent_default();
                    Msg::DragOver(index)
                })}
            >
                <td><i class="material-icons drag-handle">{ "drag_indicator" }</i></td>
                <td ondblclick={link.callback(move |_| Msg::StartRename(index))}>
                    { title_cell(editor, link, index, column) }
                </td>
                <td>
                    { type_select(
                        column.data_type(),
                        true,
                        link.callback(move |data_type| Msg::SetColumnType(index, data_type)),
                    ) }
                </td>
                <td>
                    <button
                        class="icon-btn danger"
                        title="Delete Column"
                        onclick={link.callback(move |_| Msg::RemoveColumn(index))}
                    >
                        <i class="material-icons">{ "delete" }</i>
                    </button>
                </td>
            </tr>
            if let Some(children) = column.children() {
                <tr class="object-fields">
                    <td></td>
                    <td colspan="3">
                        <span class="muted">{ format!("Object Fields ({})", children.len()) }</span>
                        { for children.iter().map(|child| html! {
                            <span class="chip">{ format!("{}: {}", child.title, child.data_type()) }</span>
                        }) }
                        <button class="btn small" onclick={link.callback(move |_| Msg::OpenNested(index))}>
                            { "Edit Fields" }
                        </button>
                    </td>
                </tr>
            }
        </>
    }
}

fn title_cell(
    editor: &SchemaEditor,
    link: &Scope<SchemaEditor>,
    index: usize,
    column: &SchemaColumn,
) -> Html {
    match &editor.renaming {
        Some((editing, pending)) if *editing == index => html! {
            <input
                class="text-field small"
                value={pending.clone()}
                autofocus={true}
                oninput={link.callback(|e: InputEvent| {
                    Msg::EditTitle(e.target_unchecked_into::<HtmlInputElement>().value())
                })}
                onblur={link.callback(|_: FocusEvent| Msg::CommitRename)}
                onkeydown={link.batch_callback(|e: KeyboardEvent| match e.key().as_str() {
                    "Enter" => vec![Msg::CommitRename],
                    "Escape" => vec![Msg::CancelRename],
                    _ => vec![],
                })}
            />
        },
        _ => html! { <span title="Double-click to rename">{ column.title.clone() }</span> },
    }
}

/// A `<select>` over the data types. Nested fields cannot be objects
/// themselves, so `allow_object` is false inside the nested dialog.
pub fn type_select(current: DataType, allow_object: bool, on_change: Callback<DataType>) -> Html {
    let onchange = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        if let Some(data_type) = DataType::from_name(&select.value()) {
            on_change.emit(data_type);
        }
    });

    html! {
        <select class="type-select" {onchange}>
            { for DataType::ALL
                .into_iter()
                .filter(|data_type| allow_object || *data_type != DataType::Object)
                .map(|data_type| html! {
                    <option value={data_type.as_str()} selected={data_type == current}>
                        { data_type.as_str() }
                    </option>
                }) }
        </select>
    }
}

fn add_column_dialog(editor: &SchemaEditor, link: &Scope<SchemaEditor>) -> Html {
    let new_column = editor.new_column.clone().unwrap_or_default();
    let can_add = !new_column.title.trim().is_empty();

    let actions = html! {
        <>
            <button class="btn" onclick={link.callback(|_| Msg::CloseAddColumn)}>{ "Cancel" }</button>
            <button class="btn primary" disabled={!can_add} onclick={link.callback(|_| Msg::AddColumn)}>
                { "Add" }
            </button>
        </>
    };

    html! {
        <ModalSheet
            open={editor.new_column.is_some()}
            title="Add New Column"
            on_close={link.callback(|_| Msg::CloseAddColumn)}
            {actions}
        >
            <div class="form-column">
                <input
                    class="text-field"
                    placeholder="Column Title"
                    value={new_column.title.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetNewColumnTitle(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
                <label>
                    { "Data Type" }
                    { type_select(new_column.data_type, true, link.callback(Msg::SetNewColumnType)) }
                </label>
            </div>
        </ModalSheet>
    }
}
