use serde::Serialize;

use crate::model::parsed::ParsedData;
use crate::model::schema::Schema;

/// Name of the multipart field carrying the JSON request.
pub const REQUEST_FIELD: &str = "request";

/// Name of the multipart field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";

#[derive(Serialize)]
/// Payload of the schema mapping endpoint, sent as the `request` field.
pub struct MapSchemaRequest<'a> {
    pub schema: &'a Schema,
    pub data: &'a ParsedData,
}

#[derive(Serialize)]
/// Payload of the AI generation endpoint, sent as the `request` field.
pub struct GenerateRequest<'a> {
    pub data: &'a ParsedData,
}
