// ********* Input data structures ***********

use std::collections::BTreeMap;

use snafu::Snafu;

/// The sorting score given to an entry once it has been disqualified.
///
/// It is low enough to place a disqualified entry below every entry with a
/// plausible score, while letting several disqualified entries tie with each other.
pub const DQ_SORTING_PTS: i64 = -1000;

/// The result of reading one vote cell.
///
/// Vote sheets routinely contain blank or stray cells. They are never an error:
/// they simply end up as `Ignored`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum VoteCell {
    /// A number of points, truncated towards zero.
    Numeric(i64),
    /// The `DQ` token. The entry is disqualified from this voter onwards.
    Disqualify,
    /// Anything else: no points, no change of status.
    Ignored,
}

/// One competing entry, with one raw vote cell per voter.
///
/// The cells are aligned by position with the voters of the contest.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Entry {
    pub country: String,
    pub flag: String,
    pub artist: String,
    pub song: String,
    pub votes: Vec<String>,
}

// ******** Output data structures *********

/// The state of one entry on the leaderboard, right after a given voter.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Standing<'a> {
    pub entry: &'a Entry,
    pub voter_num: usize,
    pub display_pts: i64,
    pub sorting_pts: i64,
    pub is_dq: bool,
    /// Number of voters who awarded non-zero points so far.
    pub voter_count: u32,
    /// How many times each point value was received so far.
    pub pts_counts: BTreeMap<i64, u32>,
}

impl<'a> Standing<'a> {
    pub fn pts_count(&self, points: i64) -> u32 {
        self.pts_counts.get(&points).cloned().unwrap_or(0)
    }
}

/// Errors that prevent a contest from being built or queried.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ScoringErrors {
    #[snafu(display("Voter number {voter_num} was invalid (the contest has {num_voters} voters)"))]
    VoterOutOfRange { voter_num: i64, num_voters: usize },

    #[snafu(display("The sheet does not have enough columns: found {found}, need at least {required}"))]
    NotEnoughColumns { found: usize, required: usize },

    #[snafu(display("The sheet does not have enough rows: found {found}, need at least {required}"))]
    NotEnoughRows { found: usize, required: usize },

    #[snafu(display("Entry {country} has {found} votes, but the contest has {expected} voters"))]
    MismatchedVotes {
        country: String,
        found: usize,
        expected: usize,
    },
}

// ********* Configuration **********

/// Describes where things are in the source sheet.
///
/// Column 0 is a running number and column 5 holds the total, neither is read.
/// Some sheets add a "Count" column after the total, which shifts the votes by one.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct TableLayout {
    pub contains_count_col: bool,
}

impl TableLayout {
    pub const COUNTRY_COL: usize = 1;
    pub const FLAG_COL: usize = 2;
    pub const ARTIST_COL: usize = 3;
    pub const SONG_COL: usize = 4;
    pub const MIN_COLUMNS: usize = 7;
    pub const MIN_ROWS: usize = 2;

    pub const DEFAULT_LAYOUT: TableLayout = TableLayout {
        contains_count_col: false,
    };

    pub fn first_vote_column(&self) -> usize {
        if self.contains_count_col {
            7
        } else {
            6
        }
    }
}
