use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::SchemaEditor;

/// The persisted schemas. Clicking one loads it into the editor.
pub fn saved_schemas(editor: &SchemaEditor, link: &Scope<SchemaEditor>) -> Html {
    let selected = editor.draft.id.as_deref();

    html! {
        <div class="saved-schemas">
            <div class="saved-schemas-header">
                <h3>{ "Saved Schemas" }</h3>
                <button class="btn outlined small" onclick={link.callback(|_| Msg::NewSchema)}>
                    <i class="material-icons">{ "add" }</i>{ "New Schema" }
                </button>
            </div>

            if editor.saved.is_empty() {
                <p class="muted">{ "No saved schemas" }</p>
            }

            <ul class="schema-list">
                { for editor.saved.iter().map(|schema| {
                    let select_id = schema.id.clone();
                    let delete_id = schema.id.clone();
                    html! {
                        <li
                            key={schema.id.clone()}
                            class={classes!("schema-item", (selected == Some(schema.id.as_str())).then_some("selected"))}
                            onclick={link.callback(move |_| Msg::SelectSchema(select_id.clone()))}
                        >
                            <div>
                                <div>{ schema.name.clone() }</div>
                                <div class="muted">{ format!("{} columns", schema.columns.len()) }</div>
                            </div>
                            <button
                                class="icon-btn danger"
                                title="Delete Schema"
                                onclick={link.callback(move |e: MouseEvent| {
                                    e.stop_propagation();
                                    Msg::DeleteSchema(delete_id.clone())
                                })}
                            >
                                <i class="material-icons">{ "delete" }</i>
                            </button>
                        </li>
                    }
                }) }
            </ul>
        </div>
    }
}
