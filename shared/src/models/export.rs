//! Export file handed back by the statistics export endpoint

/// Content type of the spreadsheet produced by the backend
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// File name suggested when the backend does not send one
pub const DEFAULT_EXPORT_FILE_NAME: &str = "sales-statistics.xlsx";

/// Opaque export bytes plus the content type the backend declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub content_type: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Wrap downloaded bytes, picking a file name from the content type
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = content_type.into();
        let file_name = suggested_file_name(&content_type);
        Self {
            content_type,
            file_name,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// File name for a given content type; spreadsheets unless told otherwise
pub fn suggested_file_name(content_type: &str) -> String {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "text/csv" => "sales-statistics.csv".to_string(),
        "application/json" => "sales-statistics.json".to_string(),
        "application/xml" | "text/xml" => "sales-statistics.xml".to_string(),
        _ => DEFAULT_EXPORT_FILE_NAME.to_string(),
    }
}
