use clap::Parser;

/// Replays the scoreboard of a song contest, voter by voter.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the contest and where to find its votes.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided, reveal will
    /// check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The vote sheet. Setting this option overrides the file given in the configuration.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default excel) The type of the input: excel (xls, xlsx, xlsm, ods) or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// If passed, the sheet has an extra "Count" column before the first vote column.
    #[clap(long, takes_value = false)]
    pub contains_count_col: bool,

    /// When using an Excel file, indicates the name of the worksheet to use (default: the first one).
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (number, starting at 0) Shows the leaderboard right after this voter. Defaults to the last voter.
    #[clap(long, value_parser, allow_hyphen_values = true)]
    pub voter: Option<i64>,

    /// If passed, shows the leaderboard after every voter.
    #[clap(long, takes_value = false, conflicts_with = "voter")]
    pub all_voters: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
