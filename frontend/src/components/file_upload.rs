//! Document picker: a drop zone that doubles as a click-to-browse button,
//! followed by the name of the chosen file and the button that uploads it.

use web_sys::{DragEvent, File, HtmlInputElement};
use yew::prelude::*;

pub enum Msg {
    OpenPicker,
    FileChosen(Option<File>),
    DragActive(bool),
    Upload,
}

#[derive(Properties, PartialEq)]
pub struct FileUploadProps {
    /// An upload is in flight; the button is disabled meanwhile.
    pub loading: bool,
    pub on_upload: Callback<File>,
}

pub struct FileUpload {
    selected: Option<File>,
    drag_active: bool,
    input_ref: NodeRef,
}

impl Component for FileUpload {
    type Message = Msg;
    type Properties = FileUploadProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            selected: None,
            drag_active: false,
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::OpenPicker => {
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
                false
            }
            Msg::FileChosen(file) => {
                self.drag_active = false;
                if file.is_some() {
                    self.selected = file;
                }
                true
            }
            Msg::DragActive(active) => {
                let changed = self.drag_active != active;
                self.drag_active = active;
                changed
            }
            Msg::Upload => {
                if let Some(file) = &self.selected {
                    if !ctx.props().loading {
                        ctx.props().on_upload.emit(file.clone());
                    }
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let zone_class = classes!("drop-zone", self.drag_active.then_some("active"));

        html! {
            <div class="file-upload">
                <div
                    class={zone_class}
                    onclick={link.callback(|_| Msg::OpenPicker)}
                    ondragover={link.callback(|e: DragEvent| {
                        e.prevent_default();
                        Msg::DragActive(true)
                    })}
                    ondragleave={link.callback(|_: DragEvent| Msg::DragActive(false))}
                    ondrop={link.callback(|e: DragEvent| {
                        e.prevent_default();
                        Msg::FileChosen(
                            e.data_transfer()
                                .and_then(|transfer| transfer.files())
                                .and_then(|files| files.get(0)),
                        )
                    })}
                >
                    <input
                        type="file"
                        ref={self.input_ref.clone()}
                        style="display:none"
                        onchange={link.callback(|e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::FileChosen(input.files().and_then(|files| files.get(0)))
                        })}
                    />
                    <i class="material-icons">{ "upload" }</i>
                    <p>
                        { if self.drag_active {
                            "Drop the file here"
                        } else {
                            "Drag and drop a file here, or click to select"
                        } }
                    </p>
                </div>

                if let Some(file) = &self.selected {
                    <div class="selected-file">
                        <span>
                            <i class="material-icons">{ "description" }</i>
                            { format!("Selected file: {}", file.name()) }
                        </span>
                        <button
                            class="btn primary"
                            disabled={ctx.props().loading}
                            onclick={link.callback(|_| Msg::Upload)}
                        >
                            { if ctx.props().loading { "Parsing..." } else { "Get Data" } }
                        </button>
                    </div>
                }
            </div>
        }
    }
}
