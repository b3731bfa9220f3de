//! Properties of the `SchemaEditor`.

use std::rc::Rc;

use common::config::AppConfig;
use common::error::RemoteError;
use common::model::parsed::ParsedData;
use common::model::preview::PreviewData;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SchemaEditorProps {
    /// The parsed document sent along with every mapping request.
    pub data: Rc<ParsedData>,
    pub config: Rc<AppConfig>,

    /// A remote call is outstanding. Send and AI Generate are disabled
    /// until the owner clears it.
    #[prop_or_default]
    pub busy: bool,

    /// Emitted right before a remote call is issued.
    pub on_request_start: Callback<()>,

    /// Outcome of the remote call. Emitted exactly once per
    /// `on_request_start`, even if the editor is gone by then.
    pub on_result: Callback<Result<PreviewData, RemoteError>>,

    /// User-facing failures that do not come from the remote service, such
    /// as a schema that fails validation or a storage write error.
    pub on_error: Callback<String>,
}
