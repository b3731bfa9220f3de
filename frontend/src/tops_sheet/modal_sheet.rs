use uuid::Uuid;
use yew::prelude::*;

/// A dialog sliding in from the top over a dimmed page.
///
/// Clicking the backdrop or pressing Escape asks the owner to close it
/// through `on_close`; the owner decides by flipping `open`.
pub struct ModalSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
    /// Buttons rendered in the footer.
    #[prop_or_default]
    pub actions: Html,
}

impl Component for ModalSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        if !props.open {
            return html! {};
        }

        let title_id = format!("{}-title", self.id);
        let on_backdrop = {
            let on_close = props.on_close.clone();
            Callback::from(move |_: MouseEvent| on_close.emit(()))
        };
        let on_keydown = {
            let on_close = props.on_close.clone();
            Callback::from(move |e: KeyboardEvent| {
                if e.key() == "Escape" {
                    on_close.emit(());
                }
            })
        };

        html! {
            <div class="sheet-backdrop" onclick={on_backdrop} onkeydown={on_keydown} tabindex="-1">
                <div
                    class="top-sheet show"
                    id={self.id.clone()}
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby={title_id.clone()}
                    onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                >
                    <h2 class="sheet-title" id={title_id}>{ props.title.clone() }</h2>
                    <div class="sheet-content">{ props.children.clone() }</div>
                    <div class="sheet-actions">{ props.actions.clone() }</div>
                </div>
            </div>
        }
    }
}
