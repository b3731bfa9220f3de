//! Schema editor: builds a schema column by column, keeps the saved list in
//! local storage and sends a saved schema (or just the document, for AI
//! generation) to the remote service.
//!
//! Same layout as the other stateful components: `state` holds the data,
//! `update` applies messages, `view` renders, and the two dialogs plus the
//! saved list are plain render functions over the component state.

use yew::prelude::*;

mod messages;
mod nested_dialog;
mod props;
mod saved_schemas;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::SchemaEditorProps;
pub use state::SchemaEditor;

use crate::storage::StorageEventListener;

impl Component for SchemaEditor {
    type Message = Msg;
    type Properties = SchemaEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut editor = SchemaEditor::new();
        let link = ctx.link().clone();
        editor.listener =
            StorageEventListener::new(move |change| link.send_message(Msg::StorageChanged(change)));
        editor
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
