use common::model::schema::DataType;
use common::storage::StorageChange;

pub enum Msg {
    SetName(String),

    OpenAddColumn,
    CloseAddColumn,
    SetNewColumnTitle(String),
    SetNewColumnType(DataType),
    AddColumn,

    RemoveColumn(usize),
    SetColumnType(usize, DataType),
    DragStart(usize),
    DragOver(usize),
    DragEnd,
    StartRename(usize),
    EditTitle(String),
    CommitRename,
    CancelRename,

    OpenNested(usize),
    SetNestedTitle(String),
    SetNestedType(DataType),
    AddNested,
    RemoveNested(usize),
    SaveNested,
    CloseNested,

    Save,
    NewSchema,
    SelectSchema(String),
    DeleteSchema(String),

    SendSchema,
    AiGenerate,

    StorageChanged(StorageChange),
}
