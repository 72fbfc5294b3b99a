// Primitives for reading CSV files.

use log::debug;
use snafu::prelude::*;

use crate::reveal::*;

/// Reads all the lines of a CSV file. There is no header handling: the first
/// line is the header of the vote sheet. Lines may have different lengths.
pub fn read_csv_rows(path: &str) -> RevealResult<Vec<Vec<String>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_rows: lineno: {:?} row: {:?}", lineno, line);
        res.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sample() {
        let path = format!("{}/tests/data/sample_contest.csv", env!("CARGO_MANIFEST_DIR"));
        let rows = read_csv_rows(&path).unwrap();
        assert_eq!(rows[0][6], "Jury A");
        assert_eq!(rows[1][1], "Sweden");
        assert_eq!(rows[4][7], "DQ");
    }

    #[test]
    fn missing_file() {
        let res = read_csv_rows("/nonexistent/votes.csv");
        assert!(matches!(res, Err(RevealError::CsvOpen { .. })));
    }
}
