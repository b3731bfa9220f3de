//! Calls to the remote parsing service.
//!
//! Every endpoint takes a multipart body and answers with JSON. Status and
//! body interpretation lives in `common::remote`; this module only moves
//! bytes.

use common::config::AppConfig;
use common::error::RemoteError;
use common::model::parsed::ParsedData;
use common::model::preview::PreviewData;
use common::model::schema::Schema;
use common::remote::{resolve_parsed, resolve_response};
use common::requests::{GenerateRequest, MapSchemaRequest, FILE_FIELD, REQUEST_FIELD};
use gloo_net::http::Request;
use log::{debug, warn};
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

/// Uploads a document and returns what the parser extracted from it.
pub async fn parse_document(config: &AppConfig, file: &File) -> Result<ParsedData, RemoteError> {
    let form = FormData::new().map_err(request_error)?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(request_error)?;

    let (status, body) = post_form(&config.parse_url(), form).await?;
    resolve_parsed(status, &body)
}

/// Applies `schema` to the parsed document.
pub async fn map_schema(
    config: &AppConfig,
    schema: &Schema,
    data: &ParsedData,
) -> Result<PreviewData, RemoteError> {
    let form = request_form(&MapSchemaRequest { schema, data })?;
    let (status, body) = post_form(&config.map_schema_url(), form).await?;
    resolve_response(status, &body)
}

/// Lets the service decide the output shape on its own.
pub async fn generate(config: &AppConfig, data: &ParsedData) -> Result<PreviewData, RemoteError> {
    let form = request_form(&GenerateRequest { data })?;
    let (status, body) = post_form(&config.generate_url(), form).await?;
    resolve_response(status, &body)
}

fn request_form<T: Serialize>(payload: &T) -> Result<FormData, RemoteError> {
    let json =
        serde_json::to_string(payload).map_err(|err| RemoteError::Request(err.to_string()))?;
    let form = FormData::new().map_err(request_error)?;
    form.append_with_str(REQUEST_FIELD, &json)
        .map_err(request_error)?;
    Ok(form)
}

async fn post_form(url: &str, form: FormData) -> Result<(u16, String), RemoteError> {
    debug!("POST {url}");
    let response = Request::post(url)
        .body(form)
        .map_err(|err| RemoteError::Request(err.to_string()))?
        .send()
        .await
        .map_err(|err| {
            warn!("POST {url} failed: {err}");
            RemoteError::Transport(err.to_string())
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        warn!("reading the response of {url} failed: {err}");
        RemoteError::Transport(err.to_string())
    })?;
    debug!("POST {url} -> {status}, {} bytes", body.len());
    Ok((status, body))
}

fn request_error(err: JsValue) -> RemoteError {
    RemoteError::Request(format!("{err:?}"))
}
