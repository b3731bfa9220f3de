pub mod parsed;
pub mod preview;
pub mod row_keys;
pub mod schema;
