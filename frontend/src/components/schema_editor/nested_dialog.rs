use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::modal_sheet::ModalSheet;

use super::messages::Msg;
use super::state::SchemaEditor;
use super::view::type_select;

/// Dialog editing the fields of one object column. Changes only reach the
/// draft on "Save Nested Schema".
pub fn nested_dialog(editor: &SchemaEditor, link: &Scope<SchemaEditor>) -> Html {
    let Some(nested) = &editor.nested else {
        return html! {};
    };
    let can_add = !nested.new_column.title.trim().is_empty();

    let actions = html! {
        <>
            <button class="btn" onclick={link.callback(|_| Msg::CloseNested)}>{ "Cancel" }</button>
            <button class="btn primary" onclick={link.callback(|_| Msg::SaveNested)}>
                { "Save Nested Schema" }
            </button>
        </>
    };

    html! {
        <ModalSheet
            open={true}
            title={format!("Define Nested Columns: {}", nested.parent_title)}
            on_close={link.callback(|_| Msg::CloseNested)}
            {actions}
        >
            <div class="form-row">
                <input
                    class="text-field small"
                    placeholder="Column Title"
                    value={nested.new_column.title.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetNestedTitle(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                    onkeydown={link.batch_callback(|e: KeyboardEvent| {
                        (e.key() == "Enter").then_some(Msg::AddNested)
                    })}
                />
                { type_select(nested.new_column.data_type, false, link.callback(Msg::SetNestedType)) }
                <button class="btn primary" disabled={!can_add} onclick={link.callback(|_| Msg::AddNested)}>
                    { "Add" }
                </button>
            </div>

            <ul class="nested-list">
                { for nested.columns.iter().enumerate().map(|(index, column)| html! {
                    <li>
                        <div>
                            <div>{ column.title.clone() }</div>
                            <div class="muted">{ column.data_type().as_str() }</div>
                        </div>
                        <button class="icon-btn danger" onclick={link.callback(move |_| Msg::RemoveNested(index))}>
                            <i class="material-icons">{ "delete" }</i>
                        </button>
                    </li>
                }) }
            </ul>
        </ModalSheet>
    }
}
