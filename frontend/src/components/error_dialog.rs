use yew::prelude::*;

use crate::tops_sheet::modal_sheet::ModalSheet;

#[derive(Properties, PartialEq)]
pub struct ErrorDialogProps {
    /// The dialog is shown while this is set.
    pub error: Option<AttrValue>,
    pub on_close: Callback<()>,
}

/// Blocking error message; stays until dismissed.
#[function_component(ErrorDialog)]
pub fn error_dialog(props: &ErrorDialogProps) -> Html {
    let on_close = props.on_close.clone();
    let close_button = html! {
        <button class="btn" onclick={Callback::from(move |_| on_close.emit(()))}>{ "Close" }</button>
    };

    html! {
        <ModalSheet
            open={props.error.is_some()}
            title="Error"
            on_close={props.on_close.clone()}
            actions={close_button}
        >
            <p class="error-message">{ props.error.clone().unwrap_or_default() }</p>
        </ModalSheet>
    }
}
