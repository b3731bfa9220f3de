//! Export of the parsed form data as CSV or as an Excel workbook.
//!
//! Only `ParsedData::form_data` is exported, as two columns `key` and
//! `value`, each file starting with that header row.

use rust_xlsxwriter::{Format, Workbook};

use crate::error::ExportError;
use crate::model::parsed::ParsedData;

const HEADER: [&str; 2] = ["key", "value"];
const SHEET_NAME: &str = "Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "export.csv",
            ExportFormat::Xlsx => "export.xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn encode(self, data: &ParsedData) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportFormat::Csv => form_data_csv(data),
            ExportFormat::Xlsx => form_data_xlsx(data),
        }
    }
}

pub fn form_data_csv(data: &ParsedData) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for field in &data.form_data {
        writer.write_record([field.key.as_str(), field.value.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(bytes)
}

pub fn form_data_xlsx(data: &ParsedData) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }
    for (index, field) in data.form_data.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet.write_string(row, 0, field.key.as_str())?;
        worksheet.write_string(row, 1, field.value.as_str())?;
    }

    Ok(workbook.save_to_buffer()?)
}
