use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::args::Args;
use crate::reveal::io_common::simplify_file_name;
use crate::reveal::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

/// The description of the contest written at the top of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    /// `excel` (xls, xlsx, xlsm, ods) or `csv`.
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "containsCountCol")]
    pub contains_count_col: Option<bool>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ContestConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub source: FileSource,
}

impl ContestConfig {
    /// Where the summary goes when no output is given on the command line.
    pub fn output_path(&self) -> Option<String> {
        self.output_settings.output_directory.as_ref().map(|dir| {
            Path::new(dir)
                .join(format!("{}_summary.json", self.output_settings.contest_name))
                .display()
                .to_string()
        })
    }
}

fn resolve_path(root: &Path, path: &str) -> String {
    root.join(path).display().to_string()
}

/// Reads a configuration file. The paths it contains are relative to the file itself.
pub fn read_config(path: &str) -> RevealResult<ContestConfig> {
    let config_str = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let mut config: ContestConfig =
        serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    let root_p = Path::new(path)
        .parent()
        .context(MissingParentDirSnafu { path })?;
    config.source.file_path = resolve_path(root_p, &config.source.file_path);
    if let Some(dir) = config.output_settings.output_directory.clone() {
        config.output_settings.output_directory = Some(resolve_path(root_p, &dir));
    }
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Combines the configuration file, if any, with the command line. The command line wins.
pub fn resolve_config(args: &Args) -> RevealResult<ContestConfig> {
    let mut config = match &args.config {
        Some(config_path) => read_config(config_path)?,
        None => {
            let input = args.input.clone().context(MissingInputSnafu {})?;
            ContestConfig {
                output_settings: OutputSettings {
                    contest_name: simplify_file_name(&input),
                    contest_date: None,
                    output_directory: None,
                },
                source: FileSource {
                    provider: "excel".to_string(),
                    file_path: input,
                    contains_count_col: None,
                    excel_worksheet_name: None,
                },
            }
        }
    };

    if let Some(input) = &args.input {
        config.source.file_path = input.clone();
    }
    if let Some(input_type) = &args.input_type {
        config.source.provider = input_type.clone();
    }
    if args.contains_count_col {
        config.source.contains_count_col = Some(true);
    }
    if let Some(worksheet) = &args.excel_worksheet_name {
        config.source.excel_worksheet_name = Some(worksheet.clone());
    }
    info!("config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> RevealResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: {} bytes from {}", contents.len(), path);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
