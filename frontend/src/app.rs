use std::rc::Rc;

use common::config::AppConfig;
use common::error::RemoteError;
use common::model::parsed::ParsedData;
use common::storage::{Persistence, StorageChange, StorageKey};
use log::{info, warn};
use web_sys::File;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::data_display::DataDisplay;
use crate::components::error_dialog::ErrorDialog;
use crate::components::file_upload::FileUpload;
use crate::config::load_app_config;
use crate::storage::{persistence, LocalStorage, StorageEventListener};

pub enum Msg {
    ConfigLoaded(AppConfig),
    Upload(File),
    Parsed(Result<ParsedData, RemoteError>),
    StorageChanged(StorageChange),
    DismissError,
}

/// Root component. Holds the last parsed document, which is persisted so a
/// reload shows the same data without uploading again.
pub struct App {
    config: Rc<AppConfig>,
    parsed: Option<Rc<ParsedData>>,
    uploading: bool,
    error: Option<String>,
    persistence: Persistence<LocalStorage>,
    _listener: Option<StorageEventListener>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let persistence = persistence();
        let parsed = persistence
            .try_load::<ParsedData>(StorageKey::LastParsedData)
            .map(Rc::new);

        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(load_app_config().await));
        });

        let link = ctx.link().clone();
        let listener =
            StorageEventListener::new(move |change| link.send_message(Msg::StorageChanged(change)));

        Self {
            config: Rc::new(AppConfig::default()),
            parsed,
            uploading: false,
            error: None,
            persistence,
            _listener: listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                self.config = Rc::new(config);
                true
            }
            Msg::Upload(file) => {
                if self.uploading {
                    return false;
                }
                self.uploading = true;
                info!("uploading {} ({} bytes)", file.name(), file.size());

                let config = self.config.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::parse_document(&config, &file).await;
                    link.send_message(Msg::Parsed(result));
                });
                true
            }
            Msg::Parsed(Ok(data)) => {
                self.uploading = false;
                if let Err(err) = self.persistence.save(StorageKey::LastParsedData, &data) {
                    warn!("parsed document not kept for the next visit: {err}");
                }
                self.parsed = Some(Rc::new(data));
                true
            }
            Msg::Parsed(Err(err)) => {
                self.uploading = false;
                self.error = Some(err.to_string());
                true
            }
            Msg::StorageChanged(change) => {
                if !change.is_for(StorageKey::LastParsedData) {
                    return false;
                }
                match change.new_value.as_deref().map(serde_json::from_str::<ParsedData>) {
                    None => self.parsed = None,
                    Some(Ok(data)) => self.parsed = Some(Rc::new(data)),
                    Some(Err(err)) => {
                        warn!("ignoring unparsable document update: {err}");
                        return false;
                    }
                }
                true
            }
            Msg::DismissError => {
                self.error = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <main class="container">
                <h1 class="app-title">{ "Data Helper" }</h1>
                <ErrorDialog
                    error={self.error.clone().map(AttrValue::from)}
                    on_close={link.callback(|_| Msg::DismissError)}
                />
                <FileUpload loading={self.uploading} on_upload={link.callback(Msg::Upload)} />
                if let Some(data) = &self.parsed {
                    <DataDisplay
                        data={data.clone()}
                        config={self.config.clone()}
                        uploading={self.uploading}
                    />
                }
            </main>
        }
    }
}
