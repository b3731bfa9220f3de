//! User-authored output schemas.
//!
//! A schema is a named, ordered list of typed columns. Columns typed `object`
//! carry their own ordered child list; this is modelled with [`ColumnKind`]
//! so a child list cannot exist on a scalar column. On the wire and in
//! storage a column keeps the flat shape the mapping service expects:
//!
//! ```json
//! {"title": "items", "order": 0, "dataType": "object", "objectSchema": [...]}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The closed set of column types understood by the mapping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Object,
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Any,
}

impl DataType {
    pub const ALL: [DataType; 6] = [
        DataType::Object,
        DataType::String,
        DataType::Number,
        DataType::Boolean,
        DataType::Date,
        DataType::Any,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Object => "object",
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Any => "any",
        }
    }

    /// Parses the lowercase name used in selects and on the wire.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn scalar(self) -> Option<ScalarType> {
        match self {
            DataType::Object => None,
            DataType::String => Some(ScalarType::String),
            DataType::Number => Some(ScalarType::Number),
            DataType::Boolean => Some(ScalarType::Boolean),
            DataType::Date => Some(ScalarType::Date),
            DataType::Any => Some(ScalarType::Any),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every [`DataType`] except `object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Number,
    Boolean,
    Date,
    Any,
}

impl ScalarType {
    pub fn data_type(self) -> DataType {
        match self {
            ScalarType::String => DataType::String,
            ScalarType::Number => DataType::Number,
            ScalarType::Boolean => DataType::Boolean,
            ScalarType::Date => DataType::Date,
            ScalarType::Any => DataType::Any,
        }
    }
}

/// What a column holds: a single typed value, or a nested list of columns.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    Scalar(ScalarType),
    Object(Vec<SchemaColumn>),
}

impl ColumnKind {
    /// A fresh kind for `data_type`; object kinds start without children.
    pub fn new(data_type: DataType) -> Self {
        match data_type.scalar() {
            Some(scalar) => ColumnKind::Scalar(scalar),
            None => ColumnKind::Object(Vec::new()),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnKind::Scalar(scalar) => scalar.data_type(),
            ColumnKind::Object(_) => DataType::Object,
        }
    }
}

/// One output field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColumnRecord", into = "ColumnRecord")]
pub struct SchemaColumn {
    pub title: String,
    /// Position among siblings. Only guaranteed dense after a save.
    pub order: usize,
    pub kind: ColumnKind,
}

impl SchemaColumn {
    pub fn new(title: impl Into<String>, order: usize, data_type: DataType) -> Self {
        Self {
            title: title.into(),
            order,
            kind: ColumnKind::new(data_type),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.kind.data_type()
    }

    /// Changes the column type.
    ///
    /// Leaving `object` drops the children. Entering `object` from a scalar
    /// type always starts with an empty child list; re-selecting `object`
    /// keeps the current children.
    pub fn set_data_type(&mut self, data_type: DataType) {
        if self.data_type() != data_type {
            self.kind = ColumnKind::new(data_type);
        }
    }

    pub fn children(&self) -> Option<&[SchemaColumn]> {
        match &self.kind {
            ColumnKind::Object(children) => Some(children),
            ColumnKind::Scalar(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<SchemaColumn>> {
        match &mut self.kind {
            ColumnKind::Object(children) => Some(children),
            ColumnKind::Scalar(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    order: usize,
    // Entries written before column types existed have no dataType.
    #[serde(default)]
    data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    object_schema: Option<Vec<SchemaColumn>>,
}

impl From<ColumnRecord> for SchemaColumn {
    fn from(record: ColumnRecord) -> Self {
        let kind = match record.data_type.scalar() {
            Some(scalar) => ColumnKind::Scalar(scalar),
            None => ColumnKind::Object(record.object_schema.unwrap_or_default()),
        };
        Self {
            title: record.title,
            order: record.order,
            kind,
        }
    }
}

impl From<SchemaColumn> for ColumnRecord {
    fn from(column: SchemaColumn) -> Self {
        let data_type = column.data_type();
        let object_schema = match column.kind {
            ColumnKind::Object(children) => Some(children),
            ColumnKind::Scalar(_) => None,
        };
        Self {
            title: column.title,
            order: column.order,
            data_type,
            object_schema,
        }
    }
}

/// Editing operations shared by top-level and nested column lists.
pub trait ColumnList {
    /// Appends a column with `order` equal to its position.
    fn add_column(&mut self, title: impl Into<String>, data_type: DataType);

    fn remove_column(&mut self, index: usize) -> Result<SchemaColumn, SchemaError>;

    /// Moves the column at `from` to `to`, shifting the ones in between.
    fn reorder_column(&mut self, from: usize, to: usize) -> Result<(), SchemaError>;

    /// Renames a column; a blank title becomes `Column {index + 1}`.
    fn rename_column(&mut self, index: usize, title: &str) -> Result<(), SchemaError>;

    fn set_column_type(&mut self, index: usize, data_type: DataType) -> Result<(), SchemaError>;

    /// Replaces the children of an object column wholesale.
    fn set_nested_columns(
        &mut self,
        index: usize,
        columns: Vec<SchemaColumn>,
    ) -> Result<(), SchemaError>;

    /// Rewrites every `order` from list position, recursively.
    fn renumber(&mut self);
}

impl ColumnList for Vec<SchemaColumn> {
    fn add_column(&mut self, title: impl Into<String>, data_type: DataType) {
        let order = self.len();
        self.push(SchemaColumn::new(title, order, data_type));
    }

    fn remove_column(&mut self, index: usize) -> Result<SchemaColumn, SchemaError> {
        check_index(self, index)?;
        Ok(self.remove(index))
    }

    fn reorder_column(&mut self, from: usize, to: usize) -> Result<(), SchemaError> {
        check_index(self, from)?;
        check_index(self, to)?;
        let column = self.remove(from);
        self.insert(to, column);
        Ok(())
    }

    fn rename_column(&mut self, index: usize, title: &str) -> Result<(), SchemaError> {
        check_index(self, index)?;
        let title = title.trim();
        self[index].title = if title.is_empty() {
            format!("Column {}", index + 1)
        } else {
            title.to_string()
        };
        Ok(())
    }

    fn set_column_type(&mut self, index: usize, data_type: DataType) -> Result<(), SchemaError> {
        check_index(self, index)?;
        self[index].set_data_type(data_type);
        Ok(())
    }

    fn set_nested_columns(
        &mut self,
        index: usize,
        columns: Vec<SchemaColumn>,
    ) -> Result<(), SchemaError> {
        check_index(self, index)?;
        match self[index].children_mut() {
            Some(children) => {
                *children = columns;
                Ok(())
            }
            None => Err(SchemaError::NotAnObject { index }),
        }
    }

    fn renumber(&mut self) {
        for (position, column) in self.iter_mut().enumerate() {
            column.order = position;
            if let Some(children) = column.children_mut() {
                children.renumber();
            }
        }
    }
}

fn check_index(columns: &[SchemaColumn], index: usize) -> Result<(), SchemaError> {
    if index < columns.len() {
        Ok(())
    } else {
        Err(SchemaError::IndexOutOfRange {
            index,
            len: columns.len(),
        })
    }
}

/// A saved schema, as persisted and as sent to the mapping service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<SchemaColumn>,
}

/// The schema being edited. It has no id until its first save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDraft {
    pub id: Option<String>,
    pub name: String,
    pub columns: Vec<SchemaColumn>,
}

impl SchemaDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, title: impl Into<String>, data_type: DataType) {
        self.columns.add_column(title, data_type);
    }

    pub fn remove_column(&mut self, index: usize) -> Result<SchemaColumn, SchemaError> {
        self.columns.remove_column(index)
    }

    pub fn reorder_column(&mut self, from: usize, to: usize) -> Result<(), SchemaError> {
        self.columns.reorder_column(from, to)
    }

    pub fn rename_column(&mut self, index: usize, title: &str) -> Result<(), SchemaError> {
        self.columns.rename_column(index, title)
    }

    pub fn set_column_type(&mut self, index: usize, data_type: DataType) -> Result<(), SchemaError> {
        self.columns.set_column_type(index, data_type)
    }

    pub fn set_nested_columns(
        &mut self,
        index: usize,
        columns: Vec<SchemaColumn>,
    ) -> Result<(), SchemaError> {
        self.columns.set_nested_columns(index, columns)
    }

    /// Checks the conditions a schema must meet before it is persisted.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }
        if !titles_present(&self.columns) {
            return Err(SchemaError::EmptyTitle);
        }
        Ok(())
    }

    /// True when the draft differs from the saved schema it was opened from.
    pub fn differs_from(&self, saved: &Schema) -> bool {
        self.id.as_deref() != Some(saved.id.as_str())
            || self.name != saved.name
            || self.columns != saved.columns
    }
}

impl From<&Schema> for SchemaDraft {
    fn from(schema: &Schema) -> Self {
        Self {
            id: Some(schema.id.clone()),
            name: schema.name.clone(),
            columns: schema.columns.clone(),
        }
    }
}

fn titles_present(columns: &[SchemaColumn]) -> bool {
    columns.iter().all(|column| {
        !column.title.trim().is_empty() && column.children().is_none_or(titles_present)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft_with(titles: &[&str]) -> SchemaDraft {
        let mut draft = SchemaDraft::new();
        draft.name = "invoice".into();
        for title in titles {
            draft.add_column(*title, DataType::String);
        }
        draft
    }

    fn titles(draft: &SchemaDraft) -> Vec<&str> {
        draft.columns.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn add_column_assigns_next_order_and_empty_children_for_objects() {
        let mut draft = draft_with(&["a", "b"]);
        draft.add_column("lines", DataType::Object);

        let added = &draft.columns[2];
        assert_eq!(added.order, 2);
        assert_eq!(added.children(), Some(&[][..]));
    }

    #[test]
    fn reorder_moves_forward_and_keeps_the_others_in_sequence() {
        let mut draft = draft_with(&["a", "b", "c", "d", "e"]);
        draft.reorder_column(1, 3).unwrap();
        assert_eq!(titles(&draft), ["a", "c", "d", "b", "e"]);
    }

    #[test]
    fn reorder_moves_backward_and_preserves_column_identity() {
        let mut draft = draft_with(&["a", "b", "c"]);
        draft.set_column_type(2, DataType::Object).unwrap();
        draft
            .set_nested_columns(2, vec![SchemaColumn::new("sku", 0, DataType::String)])
            .unwrap();

        draft.reorder_column(2, 0).unwrap();

        assert_eq!(titles(&draft), ["c", "a", "b"]);
        assert_eq!(draft.columns[0].data_type(), DataType::Object);
        assert_eq!(draft.columns[0].children().map(|c| c.len()), Some(1));
    }

    #[test]
    fn reorder_rejects_out_of_range_indices() {
        let mut draft = draft_with(&["a"]);
        assert_eq!(
            draft.reorder_column(0, 1),
            Err(SchemaError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn leaving_and_reentering_object_starts_from_an_empty_child_list() {
        let mut draft = draft_with(&["a"]);
        draft.set_column_type(0, DataType::Object).unwrap();
        draft
            .set_nested_columns(0, vec![SchemaColumn::new("x", 0, DataType::Number)])
            .unwrap();

        draft.set_column_type(0, DataType::String).unwrap();
        assert!(draft.columns[0].children().is_none());

        draft.set_column_type(0, DataType::Object).unwrap();
        assert_eq!(draft.columns[0].children(), Some(&[][..]));
    }

    #[test]
    fn reselecting_object_keeps_children() {
        let mut draft = draft_with(&["a"]);
        draft.set_column_type(0, DataType::Object).unwrap();
        draft
            .set_nested_columns(0, vec![SchemaColumn::new("x", 0, DataType::Number)])
            .unwrap();

        draft.set_column_type(0, DataType::Object).unwrap();
        assert_eq!(draft.columns[0].children().map(|c| c.len()), Some(1));
    }

    #[test]
    fn nested_columns_require_an_object_column() {
        let mut draft = draft_with(&["a"]);
        assert_eq!(
            draft.set_nested_columns(0, Vec::new()),
            Err(SchemaError::NotAnObject { index: 0 })
        );
    }

    #[test]
    fn blank_rename_falls_back_to_positional_title() {
        let mut draft = draft_with(&["a", "b"]);
        draft.rename_column(1, "   ").unwrap();
        assert_eq!(draft.columns[1].title, "Column 2");
    }

    #[test]
    fn renumber_is_recursive() {
        let mut draft = draft_with(&["a", "b", "c"]);
        draft.set_column_type(2, DataType::Object).unwrap();
        draft
            .set_nested_columns(
                2,
                vec![
                    SchemaColumn::new("y", 7, DataType::String),
                    SchemaColumn::new("z", 3, DataType::String),
                ],
            )
            .unwrap();
        draft.remove_column(0).unwrap();

        draft.columns.renumber();

        let orders: Vec<usize> = draft.columns.iter().map(|c| c.order).collect();
        assert_eq!(orders, [0, 1]);
        let nested: Vec<usize> = draft.columns[1]
            .children()
            .unwrap()
            .iter()
            .map(|c| c.order)
            .collect();
        assert_eq!(nested, [0, 1]);
    }

    #[test]
    fn validate_reports_missing_name_columns_and_titles() {
        let mut draft = SchemaDraft::new();
        assert_eq!(draft.validate(), Err(SchemaError::EmptyName));

        draft.name = "n".into();
        assert_eq!(draft.validate(), Err(SchemaError::NoColumns));

        draft.add_column("obj", DataType::Object);
        draft
            .set_nested_columns(0, vec![SchemaColumn::new("", 0, DataType::String)])
            .unwrap();
        assert_eq!(draft.validate(), Err(SchemaError::EmptyTitle));
    }

    #[test]
    fn columns_serialize_in_the_flat_wire_shape() {
        let mut draft = draft_with(&["total"]);
        draft.add_column("lines", DataType::Object);
        draft
            .set_nested_columns(1, vec![SchemaColumn::new("sku", 0, DataType::Any)])
            .unwrap();

        let value = serde_json::to_value(&draft.columns).unwrap();
        assert_eq!(
            value,
            json!([
                {"title": "total", "order": 0, "dataType": "string"},
                {"title": "lines", "order": 1, "dataType": "object",
                 "objectSchema": [{"title": "sku", "order": 0, "dataType": "any"}]}
            ])
        );
    }

    #[test]
    fn deserializing_enforces_the_object_schema_invariant() {
        let columns: Vec<SchemaColumn> = serde_json::from_value(json!([
            {"title": "a", "order": 0, "dataType": "number", "objectSchema": [
                {"title": "stray", "order": 0, "dataType": "string"}
            ]},
            {"title": "b", "order": 1, "dataType": "object"},
            {"title": "legacy", "order": 2}
        ]))
        .unwrap();

        assert!(columns[0].children().is_none());
        assert_eq!(columns[1].children(), Some(&[][..]));
        assert_eq!(columns[2].data_type(), DataType::String);
    }

    #[test]
    fn data_type_names_round_trip_through_from_name() {
        for data_type in DataType::ALL {
            assert_eq!(DataType::from_name(data_type.as_str()), Some(data_type));
        }
        assert_eq!(DataType::from_name("text"), None);
    }
}
