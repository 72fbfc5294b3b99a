use calamine::{open_workbook_auto, DataType, Range, Reader};
use log::debug;
use snafu::prelude::*;

use crate::reveal::*;

pub fn read_excel_rows(path: &str, worksheet_name: Option<&str>) -> RevealResult<Vec<Vec<String>>> {
    debug!(
        "read_excel_rows: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    let wrange = match worksheet_name {
        // A worksheet name was provided, use it.
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    debug!(
        "read_excel_rows: size: {:?} start: {:?}",
        wrange.get_size(),
        wrange.start()
    );

    Ok(range_to_rows(&wrange))
}

/// Turns a worksheet range into a grid of text cells indexed from A1.
///
/// calamine only keeps the used part of the sheet, so the rows and columns before
/// the first used cell are put back as empty cells.
pub fn range_to_rows(wrange: &Range<DataType>) -> Vec<Vec<String>> {
    let (row0, col0) = match wrange.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return vec![],
    };
    let width = col0 + wrange.width();
    let mut rows: Vec<Vec<String>> = vec![vec![String::new(); width]; row0];
    rows.extend(wrange.rows().map(|row| {
        let mut cells = vec![String::new(); col0];
        cells.extend(row.iter().map(cell_to_string));
        cells
    }));
    rows
}

/// Renders a cell as the text a person would read in it.
pub fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        // Booleans count as numbers, like in the spreadsheet itself.
        DataType::Bool(b) => String::from(if *b { "1" } else { "0" }),
        DataType::DateTime(f) => f.to_string(),
        // Empty and error cells.
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_scoring::builder::contest_from_rows;
    use contest_scoring::TableLayout;

    #[test]
    fn cells_as_text() {
        assert_eq!(cell_to_string(&DataType::Float(12.0)), "12");
        assert_eq!(cell_to_string(&DataType::Float(7.5)), "7.5");
        assert_eq!(cell_to_string(&DataType::Int(10)), "10");
        assert_eq!(cell_to_string(&DataType::String(" DQ ".to_string())), "DQ");
        assert_eq!(cell_to_string(&DataType::Empty), "");
        assert_eq!(cell_to_string(&DataType::Bool(true)), "1");
        assert_eq!(cell_to_string(&DataType::Bool(false)), "0");
    }

    fn text(s: &str) -> DataType {
        DataType::String(s.to_string())
    }

    #[test]
    fn columns_keep_their_sheet_position() {
        // The table starts at B2: row 1 and column A are empty.
        let mut wrange = Range::new((1, 1), (2, 7));
        let header = ["Country", "Flag", "Artist", "Song", "Total", "Jury A", "Jury B"];
        for (idx, name) in header.iter().enumerate() {
            wrange.set_value((1, idx as u32 + 1), text(name));
        }
        let sweden = [text("Sweden"), text("se"), text("Loreen"), text("Tattoo")];
        for (idx, cell) in sweden.into_iter().enumerate() {
            wrange.set_value((2, idx as u32 + 1), cell);
        }
        wrange.set_value((2, 5), DataType::Float(22.0));
        wrange.set_value((2, 6), DataType::Float(12.0));
        wrange.set_value((2, 7), DataType::Bool(true));

        let rows = range_to_rows(&wrange);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![String::new(); 8]);
        assert_eq!(rows[1][0], "");
        assert_eq!(rows[1][1], "Country");
        assert_eq!(rows[2][1], "Sweden");
        assert_eq!(&rows[2][6..], &["12".to_string(), "1".to_string()]);

        // From the header row on, the grid reads like a sheet that starts at A1.
        let contest = contest_from_rows(&rows[1..], &TableLayout::DEFAULT_LAYOUT).unwrap();
        assert_eq!(contest.voters(), &["Jury A", "Jury B"]);
        assert_eq!(contest.entries()[0].country, "Sweden");
        assert_eq!(contest.entries()[0].display_pts(), vec![12, 13]);
    }

    #[test]
    fn empty_range() {
        assert!(range_to_rows(&Range::empty()).is_empty());
    }

    #[test]
    fn workbook_with_empty_first_column() {
        let _ = env_logger::builder().is_test(true).try_init();
        let path = format!("{}/tests/data/sample_contest.xlsx", env!("CARGO_MANIFEST_DIR"));
        let rows = read_excel_rows(&path, None).unwrap();
        assert_eq!(rows[0][0], "");
        assert_eq!(rows[0][1], "Country");

        let contest = contest_from_rows(&rows, &TableLayout::DEFAULT_LAYOUT).unwrap();
        assert_eq!(contest.voters(), &["Jury A", "Jury B"]);
        let countries: Vec<&str> = contest.entries().iter().map(|e| e.country.as_str()).collect();
        assert_eq!(countries, vec!["Sweden", "Finland", "Norway"]);
        let norway = &contest.entries()[2];
        assert_eq!(norway.votes, vec!["1".to_string(), String::new()]);
        assert_eq!(contest.entries()[1].votes, vec!["10".to_string(), "12".to_string()]);
    }

    #[test]
    fn worksheet_with_blank_first_row() {
        let path = format!("{}/tests/data/sample_contest.xlsx", env!("CARGO_MANIFEST_DIR"));
        let rows = read_excel_rows(&path, Some("Offset")).unwrap();
        assert!(rows[0].iter().all(|c| c.is_empty()));
        assert_eq!(rows[1][1], "Country");
        assert_eq!(rows[2][1], "Sweden");
        assert_eq!(rows[2][6], "12");

        assert!(matches!(
            read_excel_rows(&path, Some("Results")),
            Err(RevealError::MissingWorksheet { .. })
        ));
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_rows("/nonexistent/votes.xlsx", None);
        assert!(matches!(res, Err(RevealError::OpeningExcel { .. })));
    }
}
