use log::{debug, info, warn};

use contest_scoring::builder::contest_from_rows;
use contest_scoring::*;
use snafu::prelude::*;

use std::fs;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod views;

use config_reader::*;
use views::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RevealError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {name}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading or writing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not score the contest: {source}"))]
    Scoring { source: ScoringErrors },
    #[snafu(display("No vote sheet: use --input or --config"))]
    MissingInput {},
    #[snafu(display("Input type {input_type:?} is not supported (use excel or csv)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Missing parent directory for {path}"))]
    MissingParentDir { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RevealResult<T> = Result<T, RevealError>;

fn ranking_view(contest: &Contest, voter_num: usize, standings: &[Standing]) -> RankingView {
    let voter = contest
        .voters()
        .get(voter_num)
        .cloned()
        .unwrap_or_default();
    RankingView::from_standings(voter_num, &voter, standings)
}

/// Computes the leaderboards to report: after every voter, after the requested voter, or
/// after the last voter.
fn compute_results(
    contest: &Contest,
    voter: Option<i64>,
    all_voters: bool,
) -> RevealResult<Vec<RankingView>> {
    if all_voters {
        let boards = contest.all_standings().context(ScoringSnafu {})?;
        return Ok(boards
            .iter()
            .enumerate()
            .map(|(idx, board)| ranking_view(contest, idx, board))
            .collect());
    }

    let (voter_num, standings) = match voter {
        Some(n) => (n, contest.standings_after_voter(n).context(ScoringSnafu {})?),
        None => match contest.final_standings() {
            Some(standings) => (
                contest.num_voters() as i64 - 1,
                standings.context(ScoringSnafu {})?,
            ),
            None => {
                warn!("compute_results: the contest has no voters, no leaderboard to show");
                return Ok(vec![]);
            }
        },
    };
    debug!(
        "compute_results: leader after voter {}: {:?}",
        voter_num,
        standings.first().map(|s| s.entry.country.clone())
    );
    Ok(vec![ranking_view(contest, voter_num as usize, &standings)])
}

fn build_summary_js(config: &ContestConfig, contest: &Contest, results: &[RankingView]) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
    };
    json!({
        "config": c,
        "contest": ContestView::from_contest(contest),
        "results": results })
}

fn write_output(out: Option<String>, pretty_js: &str) -> RevealResult<()> {
    match out {
        Some(path) if path != "stdout" => {
            info!("Writing the summary to {:?}", path);
            fs::write(&path, pretty_js).context(WritingOutputSnafu { path })
        }
        _ => {
            println!("{}", pretty_js);
            Ok(())
        }
    }
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> RevealResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between computed summary and reference summary")
    }
    Ok(())
}

pub fn run_contest(args: &Args) -> RevealResult<()> {
    let config = resolve_config(args)?;

    let rows = io_common::read_contest_rows(&config.source)?;
    let layout = TableLayout {
        contains_count_col: config.source.contains_count_col.unwrap_or(false),
    };
    let contest = contest_from_rows(&rows, &layout).context(ScoringSnafu {})?;

    let results = compute_results(&contest, args.voter, args.all_voters)?;

    // Assemble the final json
    let result_js = build_summary_js(&config, &contest, &results);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    write_output(args.out.clone().or_else(|| config.output_path()), &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn temp_file(name: &str) -> String {
        std::env::temp_dir().join(name).display().to_string()
    }

    fn args_for_sample() -> Args {
        Args {
            config: Some(test_data("sample_contest_config.json")),
            reference: None,
            out: None,
            input: None,
            input_type: None,
            contains_count_col: false,
            excel_worksheet_name: None,
            voter: None,
            all_voters: false,
            verbose: false,
        }
    }

    fn sample_contest() -> Contest {
        let config = resolve_config(&args_for_sample()).unwrap();
        let rows = io_common::read_contest_rows(&config.source).unwrap();
        contest_from_rows(&rows, &TableLayout::DEFAULT_LAYOUT).unwrap()
    }

    fn countries(board: &RankingView) -> Vec<String> {
        board.standings.iter().map(|s| s.country.clone()).collect()
    }

    #[test]
    fn sample_contest_is_read() {
        let _ = env_logger::builder().is_test(true).try_init();
        let contest = sample_contest();
        assert_eq!(contest.num_entries(), 5);
        assert_eq!(contest.voters(), &["Jury A", "Jury B", "Jury C", "Jury D"]);
    }

    #[test]
    fn final_leaderboard_by_default() {
        let contest = sample_contest();
        let results = compute_results(&contest, None, false).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].voter, "Jury D");
        // Sweden and Finland tie on every count, Finland comes first alphabetically.
        assert_eq!(
            countries(&results[0]),
            vec!["Finland", "Sweden", "Israel", "Norway", "Italy"]
        );
        let italy = &results[0].standings[4];
        assert!(italy.dq);
        assert_eq!(italy.display_pts, 26);
        assert_eq!(italy.sorting_pts, DQ_SORTING_PTS);
    }

    #[test]
    fn leaderboard_after_given_voter() {
        let contest = sample_contest();
        let results = compute_results(&contest, Some(0), false).unwrap();
        assert_eq!(
            countries(&results[0]),
            vec!["Sweden", "Finland", "Israel", "Italy", "Norway"]
        );
        assert!(matches!(
            compute_results(&contest, Some(-1), false),
            Err(RevealError::Scoring { .. })
        ));
        assert!(matches!(
            compute_results(&contest, Some(4), false),
            Err(RevealError::Scoring { .. })
        ));
    }

    #[test]
    fn whole_reveal() {
        let contest = sample_contest();
        let results = compute_results(&contest, None, true).unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[1].voter_num, 1);
        assert_eq!(
            countries(&results[1]),
            vec!["Finland", "Sweden", "Israel", "Norway", "Italy"]
        );
    }

    #[test]
    fn summary_layout() {
        let config = resolve_config(&args_for_sample()).unwrap();
        let contest = sample_contest();
        let results = compute_results(&contest, None, false).unwrap();
        let js = build_summary_js(&config, &contest, &results);
        assert_eq!(js["config"]["contest"], json!("sample_contest"));
        assert_eq!(js["contest"]["num_entries"], json!(5));
        assert_eq!(js["contest"]["unique_pts"], json!([7, 8, 10, 12]));
        assert_eq!(js["results"][0]["standings"][0]["country"], json!("Finland"));
    }

    #[test]
    fn command_line_overrides_config() {
        let mut args = args_for_sample();
        args.config = None;
        args.input = Some(test_data("sample_contest.csv"));
        args.input_type = Some("csv".to_string());
        args.contains_count_col = true;
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.output_settings.contest_name, "sample_contest");
        assert_eq!(config.source.provider, "csv");
        assert_eq!(config.source.contains_count_col, Some(true));

        args.input = None;
        assert!(matches!(
            resolve_config(&args),
            Err(RevealError::MissingInput {})
        ));
    }

    #[test]
    fn workbook_through_the_reveal() {
        let mut args = args_for_sample();
        args.config = None;
        args.input = Some(test_data("sample_contest.xlsx"));
        args.input_type = Some("xlsx".to_string());
        let config = resolve_config(&args).unwrap();
        let rows = io_common::read_contest_rows(&config.source).unwrap();
        let contest = contest_from_rows(&rows, &TableLayout::DEFAULT_LAYOUT).unwrap();
        let results = compute_results(&contest, None, false).unwrap();
        assert_eq!(results[0].voter, "Jury B");
        assert_eq!(countries(&results[0]), vec!["Finland", "Sweden", "Norway"]);
        assert_eq!(results[0].standings[2].display_pts, 1);

        args.out = Some(temp_file("reveal_workbook.json"));
        run_contest(&args).unwrap();
    }

    #[test]
    fn no_voters_no_leaderboard() {
        let rows: Vec<Vec<String>> = vec![
            ["#", "Country", "Flag", "Artist", "Song", "Total", ""],
            ["1", "Sweden", "se", "Loreen", "Tattoo", "0", ""],
        ]
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect();
        let layout = TableLayout {
            contains_count_col: true,
        };
        let contest = contest_from_rows(&rows, &layout).unwrap();
        assert_eq!(contest.num_voters(), 0);
        assert!(compute_results(&contest, None, false).unwrap().is_empty());
        assert!(compute_results(&contest, None, true).unwrap().is_empty());
    }

    #[test]
    fn unknown_input_type() {
        let mut args = args_for_sample();
        args.input_type = Some("pdf".to_string());
        args.out = Some(temp_file("reveal_unknown_input.json"));
        assert!(matches!(
            run_contest(&args),
            Err(RevealError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn reference_check() {
        let out = temp_file("reveal_reference_check.json");
        let mut args = args_for_sample();
        args.out = Some(out.clone());
        run_contest(&args).unwrap();

        // The output is its own reference.
        args.reference = Some(out.clone());
        args.out = Some(temp_file("reveal_reference_check_2.json"));
        run_contest(&args).unwrap();

        // A different leaderboard does not match.
        args.voter = Some(0);
        assert!(matches!(
            run_contest(&args),
            Err(RevealError::Whatever { .. })
        ));
    }
}
