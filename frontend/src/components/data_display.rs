//! Tabbed view of a parsed document: form fields, raw text, the schema
//! editor and the preview produced by the remote service.
//!
//! The component owns the preview store for the page, the busy flag shared
//! by the schema editor's remote calls, and the modal error dialog.

use std::rc::Rc;

use common::config::AppConfig;
use common::error::RemoteError;
use common::model::parsed::ParsedData;
use common::model::preview::PreviewData;
use common::storage::StorageChange;
use common::store::{PreviewState, PreviewStore, SubscriptionId};
use log::info;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::error_dialog::ErrorDialog;
use crate::components::json_preview::JsonPreview;
use crate::components::loading_overlay::loading_overlay;
use crate::components::schema_editor::SchemaEditor;
use crate::storage::{preview_store, LocalStorage, StorageEventListener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    FormData,
    RawData,
    SchemaEditor,
    Preview,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::FormData, Tab::RawData, Tab::SchemaEditor, Tab::Preview];

    fn label(self) -> &'static str {
        match self {
            Tab::FormData => "Form Data",
            Tab::RawData => "Raw Data",
            Tab::SchemaEditor => "Schema Editor",
            Tab::Preview => "Preview",
        }
    }
}

pub enum Msg {
    SetTab(Tab),
    PreviewChanged(PreviewState),
    StorageChanged(StorageChange),
    RequestStarted,
    PreviewResult(Result<PreviewData, RemoteError>),
    ShowError(String),
    DismissError,
    ClearPreview,
}

#[derive(Properties, PartialEq)]
pub struct DataDisplayProps {
    pub data: Rc<ParsedData>,
    pub config: Rc<AppConfig>,
    /// A document upload is in flight.
    #[prop_or_default]
    pub uploading: bool,
}

pub struct DataDisplay {
    active_tab: Tab,
    busy: bool,
    error: Option<String>,
    store: Rc<PreviewStore<LocalStorage>>,
    preview: PreviewState,
    subscription: SubscriptionId,
    _listener: Option<StorageEventListener>,
}

impl Component for DataDisplay {
    type Message = Msg;
    type Properties = DataDisplayProps;

    fn create(ctx: &Context<Self>) -> Self {
        let store = Rc::new(preview_store());
        store.load();

        let subscription = {
            let link = ctx.link().clone();
            store.subscribe(move |state| link.send_message(Msg::PreviewChanged(state.clone())))
        };
        let listener = {
            let link = ctx.link().clone();
            StorageEventListener::new(move |change| link.send_message(Msg::StorageChanged(change)))
        };

        Self {
            active_tab: Tab::FormData,
            busy: false,
            error: None,
            preview: store.state(),
            store,
            subscription,
            _listener: listener,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetTab(tab) => {
                self.active_tab = tab;
                true
            }
            Msg::PreviewChanged(state) => {
                self.preview = state;
                true
            }
            Msg::StorageChanged(change) => {
                // The store notifies us through the subscription.
                self.store.handle_storage_change(&change);
                false
            }
            Msg::RequestStarted => {
                self.busy = true;
                true
            }
            Msg::PreviewResult(Ok(preview)) => {
                self.busy = false;
                match self.store.set_preview_data(Some(preview)) {
                    Ok(()) => {
                        info!("preview updated");
                        self.active_tab = Tab::Preview;
                    }
                    Err(err) => self.error = Some(format!("Could not store the preview: {err}")),
                }
                true
            }
            Msg::PreviewResult(Err(err)) => {
                self.busy = false;
                self.error = Some(err.to_string());
                true
            }
            Msg::ShowError(message) => {
                self.error = Some(message);
                true
            }
            Msg::DismissError => {
                self.error = None;
                true
            }
            Msg::ClearPreview => {
                if let Err(err) = self.store.clear() {
                    self.error = Some(format!("Could not clear the preview: {err}"));
                    return true;
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();

        html! {
            <>
                <ErrorDialog
                    error={self.error.clone().map(AttrValue::from)}
                    on_close={link.callback(|_| Msg::DismissError)}
                />
                <div class="data-display card">
                    if self.busy || props.uploading {
                        { loading_overlay("This may take a little while...") }
                    }

                    <div class="tab-bar">
                        { for Tab::ALL.into_iter().map(|tab| self.tab_button(link, tab)) }
                    </div>

                    <div class="tab-panels">
                        if self.active_tab == Tab::FormData {
                            { form_data_table(&props.data) }
                        }
                        if self.active_tab == Tab::RawData {
                            <pre class="raw-data">{ props.data.raw_data.clone() }</pre>
                        }
                        // Kept mounted so the draft survives tab switches.
                        <div class={classes!("tab-panel", (self.active_tab != Tab::SchemaEditor).then_some("hidden"))}>
                            <SchemaEditor
                                data={props.data.clone()}
                                config={props.config.clone()}
                                busy={self.busy}
                                on_request_start={link.callback(|_| Msg::RequestStarted)}
                                on_result={link.callback(Msg::PreviewResult)}
                                on_error={link.callback(Msg::ShowError)}
                            />
                        </div>
                        if self.active_tab == Tab::Preview {
                            { self.preview_panel(link, &props.data) }
                        }
                    </div>
                </div>
            </>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.store.unsubscribe(self.subscription);
    }
}

impl DataDisplay {
    fn tab_button(&self, link: &Scope<Self>, tab: Tab) -> Html {
        let has_preview = tab == Tab::Preview && self.preview.data.is_some();
        html! {
            <button
                class={classes!("tab-btn", (self.active_tab == tab).then_some("active"))}
                onclick={link.callback(move |_| Msg::SetTab(tab))}
            >
                { tab.label() }
                if has_preview {
                    <span class="badge-dot" title="Preview available" />
                }
            </button>
        }
    }

    fn preview_panel(&self, link: &Scope<Self>, data: &Rc<ParsedData>) -> Html {
        if self.preview.loading {
            return html! { <div class="centered"><div class="spin"></div></div> };
        }
        match &self.preview.data {
            None => html! {
                <div class="centered empty-preview">
                    <p class="muted">{ "No preview data available" }</p>
                    <button class="btn" onclick={link.callback(|_| Msg::SetTab(Tab::SchemaEditor))}>
                        { "Generate Preview Data" }
                    </button>
                </div>
            },
            Some(preview) => html! {
                <JsonPreview
                    preview={preview.clone()}
                    data={data.clone()}
                    on_clear={link.callback(|_| Msg::ClearPreview)}
                    on_error={link.callback(Msg::ShowError)}
                />
            },
        }
    }
}

fn form_data_table(data: &ParsedData) -> Html {
    if data.form_data.is_empty() {
        return html! { <p class="muted">{ "No form data in this document" }</p> };
    }
    html! {
        <table class="form-data">
            <thead>
                <tr><th>{ "Key" }</th><th>{ "Value" }</th></tr>
            </thead>
            <tbody>
                { for data.form_data.iter().map(|field| html! {
                    <tr>
                        <td>{ field.key.clone() }</td>
                        <td>{ field.value.clone() }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
