// The shapes of the JSON summary.

use contest_scoring::{Contest, Entry, Standing};
use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct EntryView {
    pub country: String,
    pub flag: String,
    pub artist: String,
    pub song: String,
    pub votes: Vec<String>,
    pub display_pts: Vec<i64>,
    pub dq_statuses: Vec<bool>,
    pub sorting_pts: Vec<i64>,
    pub num_voters: u32,
    pub unique_pts: Vec<i64>,
}

impl EntryView {
    pub fn from_entry(e: &Entry) -> EntryView {
        EntryView {
            country: e.country.clone(),
            flag: e.flag.clone(),
            artist: e.artist.clone(),
            song: e.song.clone(),
            votes: e.votes.clone(),
            display_pts: e.display_pts(),
            dq_statuses: e.dq_statuses(),
            sorting_pts: e.sorting_pts(),
            num_voters: e.num_voters(),
            unique_pts: e.unique_pts().into_iter().collect(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ContestView {
    pub entries: Vec<EntryView>,
    pub voters: Vec<String>,
    pub num_entries: usize,
    pub num_voters: usize,
    pub unique_pts: Vec<i64>,
}

impl ContestView {
    pub fn from_contest(contest: &Contest) -> ContestView {
        ContestView {
            entries: contest.entries().iter().map(EntryView::from_entry).collect(),
            voters: contest.voters().to_vec(),
            num_entries: contest.num_entries(),
            num_voters: contest.num_voters(),
            unique_pts: contest.unique_pts().into_iter().collect(),
        }
    }
}

/// One line of the leaderboard.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StandingView {
    /// Starts at 1.
    pub position: usize,
    pub country: String,
    pub flag: String,
    pub artist: String,
    pub song: String,
    pub display_pts: i64,
    pub sorting_pts: i64,
    pub dq: bool,
    pub voter_count: u32,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankingView {
    pub voter_num: usize,
    pub voter: String,
    pub standings: Vec<StandingView>,
}

impl RankingView {
    pub fn from_standings(voter_num: usize, voter: &str, standings: &[Standing]) -> RankingView {
        RankingView {
            voter_num,
            voter: voter.to_string(),
            standings: standings
                .iter()
                .enumerate()
                .map(|(idx, s)| StandingView {
                    position: idx + 1,
                    country: s.entry.country.clone(),
                    flag: s.entry.flag.clone(),
                    artist: s.entry.artist.clone(),
                    song: s.entry.song.clone(),
                    display_pts: s.display_pts,
                    sorting_pts: s.sorting_pts,
                    dq: s.is_dq,
                    voter_count: s.voter_count,
                })
                .collect(),
        }
    }
}
