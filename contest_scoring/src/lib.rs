mod config;
mod entry;

pub mod builder;
pub mod manual;

use log::{debug, info};
use snafu::ensure;

use std::cmp::Ordering;
use std::collections::BTreeSet;

pub use crate::config::*;
pub use crate::entry::parse_vote_cell;
use crate::entry::check_voter_num;

/// One scoring session: the entries and the voters, in input order.
///
/// A contest never changes once built. Every "after voter N" view is computed
/// on demand from the raw votes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Contest {
    entries: Vec<Entry>,
    voters: Vec<String>,
}

/// One step of the comparison between two standings.
///
/// The steps are applied in order, the first one that separates two entries
/// decides. All the numeric steps put the higher value first.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RankingStage {
    /// Score, with disqualified entries pinned at `DQ_SORTING_PTS`.
    SortingPoints,
    /// Score, ignoring disqualification.
    DisplayPoints,
    /// Number of voters who gave non-zero points.
    VoterCount,
    /// Number of times the given point value was received.
    PointsCount(i64),
    Country,
    Artist,
    Song,
}

impl RankingStage {
    pub fn compare(&self, a: &Standing, b: &Standing) -> Ordering {
        match *self {
            RankingStage::SortingPoints => b.sorting_pts.cmp(&a.sorting_pts),
            RankingStage::DisplayPoints => b.display_pts.cmp(&a.display_pts),
            RankingStage::VoterCount => b.voter_count.cmp(&a.voter_count),
            RankingStage::PointsCount(pts) => b.pts_count(pts).cmp(&a.pts_count(pts)),
            RankingStage::Country => a.entry.country.cmp(&b.entry.country),
            RankingStage::Artist => a.entry.artist.cmp(&b.entry.artist),
            RankingStage::Song => a.entry.song.cmp(&b.entry.song),
        }
    }
}

/// Builds the list of ranking stages for a contest in which the given point values were awarded.
///
/// The cascading tie-break goes from the highest point value down to the lowest:
/// most 12s first, then most 10s, and so on.
pub fn ranking_stages(unique_pts: &BTreeSet<i64>) -> Vec<RankingStage> {
    let mut stages = vec![
        RankingStage::SortingPoints,
        RankingStage::DisplayPoints,
        RankingStage::VoterCount,
    ];
    stages.extend(unique_pts.iter().rev().map(|pts| RankingStage::PointsCount(*pts)));
    stages.extend([
        RankingStage::Country,
        RankingStage::Artist,
        RankingStage::Song,
    ]);
    stages
}

/// Compares two standings with the given stages. `Less` means that `a` ranks above `b`.
pub fn compare_standings(stages: &[RankingStage], a: &Standing, b: &Standing) -> Ordering {
    stages
        .iter()
        .map(|stage| stage.compare(a, b))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

impl Contest {
    /// Creates a contest. Every entry must have exactly one vote cell per voter.
    pub fn new(entries: Vec<Entry>, voters: Vec<String>) -> Result<Contest, ScoringErrors> {
        for e in entries.iter() {
            ensure!(
                e.votes.len() == voters.len(),
                MismatchedVotesSnafu {
                    country: e.country.clone(),
                    found: e.votes.len(),
                    expected: voters.len()
                }
            );
        }
        info!(
            "Contest with {} entries and {} voters",
            entries.len(),
            voters.len()
        );
        Ok(Contest { entries, voters })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn voters(&self) -> &[String] {
        &self.voters
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn num_voters(&self) -> usize {
        self.voters.len()
    }

    /// All the distinct point values cast by any voter to any entry.
    pub fn unique_pts(&self) -> BTreeSet<i64> {
        self.entries.iter().flat_map(|e| e.unique_pts()).collect()
    }

    /// The leaderboard right after `voter_num` has voted, best entry first.
    pub fn standings_after_voter(&self, voter_num: i64) -> Result<Vec<Standing<'_>>, ScoringErrors> {
        check_voter_num(voter_num, self.voters.len())?;
        let stages = ranking_stages(&self.unique_pts());
        debug!(
            "standings_after_voter: voter {}: stages {:?}",
            voter_num, stages
        );
        let mut standings: Vec<Standing> = self
            .entries
            .iter()
            .map(|e| e.standing_after_voter(voter_num))
            .collect::<Result<Vec<Standing>, ScoringErrors>>()?;
        standings.sort_by(|a, b| compare_standings(&stages, a, b));
        Ok(standings)
    }

    /// The entries in ranking order right after `voter_num` has voted.
    pub fn results_after_voter(&self, voter_num: i64) -> Result<Vec<&Entry>, ScoringErrors> {
        let standings = self.standings_after_voter(voter_num)?;
        Ok(standings.into_iter().map(|s| s.entry).collect())
    }

    /// The leaderboard once all the voters have voted, if there are any voters.
    pub fn final_standings(&self) -> Option<Result<Vec<Standing<'_>>, ScoringErrors>> {
        if self.voters.is_empty() {
            None
        } else {
            Some(self.standings_after_voter((self.voters.len() - 1) as i64))
        }
    }

    /// The whole reveal: one leaderboard per voter, in voting order.
    pub fn all_standings(&self) -> Result<Vec<Vec<Standing<'_>>>, ScoringErrors> {
        (0..self.voters.len())
            .map(|idx| self.standings_after_voter(idx as i64))
            .collect()
    }
}
