use std::path::Path;

use log::info;

use crate::reveal::config_reader::FileSource;
use crate::reveal::{io_csv, io_excel, RevealResult, UnknownInputTypeSnafu};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads the vote sheet into a grid of text cells, whatever its format.
pub fn read_contest_rows(source: &FileSource) -> RevealResult<Vec<Vec<String>>> {
    info!(
        "Attempting to read vote sheet {:?} ({})",
        source.file_path, source.provider
    );
    match source.provider.as_str() {
        "excel" | "xls" | "xlsx" | "ods" => io_excel::read_excel_rows(
            &source.file_path,
            source.excel_worksheet_name.as_deref(),
        ),
        "csv" => io_csv::read_csv_rows(&source.file_path),
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}
