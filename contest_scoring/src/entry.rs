// Scoring of a single entry, independently of all the other entries.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use snafu::ensure;

use crate::config::*;

/// Reads a raw vote cell.
///
/// The DQ token is matched without regard to case. Numbers may be written as
/// integers or floats (`12`, `12.0`) and are truncated towards zero.
///
/// ```
/// use contest_scoring::{parse_vote_cell, VoteCell};
///
/// assert_eq!(parse_vote_cell("12.0"), VoteCell::Numeric(12));
/// assert_eq!(parse_vote_cell("Dq"), VoteCell::Disqualify);
/// assert_eq!(parse_vote_cell("n/a"), VoteCell::Ignored);
/// ```
pub fn parse_vote_cell(cell: &str) -> VoteCell {
    let s = cell.trim();
    if s.eq_ignore_ascii_case("dq") {
        return VoteCell::Disqualify;
    }
    match s.parse::<f64>() {
        // Infinities and NaN cannot be turned into points.
        Ok(x) if x.is_finite() => VoteCell::Numeric(x.trunc() as i64),
        _ => VoteCell::Ignored,
    }
}

pub(crate) fn check_voter_num(voter_num: i64, num_voters: usize) -> Result<usize, ScoringErrors> {
    ensure!(
        voter_num >= 0 && (voter_num as u64) < (num_voters as u64),
        VoterOutOfRangeSnafu {
            voter_num,
            num_voters
        }
    );
    Ok(voter_num as usize)
}

impl Entry {
    pub fn new(country: &str, flag: &str, artist: &str, song: &str, votes: &[String]) -> Entry {
        Entry {
            country: country.to_string(),
            flag: flag.to_string(),
            artist: artist.to_string(),
            song: song.to_string(),
            votes: votes.to_vec(),
        }
    }

    pub fn parsed_votes(&self) -> impl Iterator<Item = VoteCell> + '_ {
        self.votes.iter().map(|v| parse_vote_cell(v))
    }

    /// The running total of points, one value per voter.
    pub fn display_pts(&self) -> Vec<i64> {
        let mut total: i64 = 0;
        self.parsed_votes()
            .map(|cell| {
                if let VoteCell::Numeric(pts) = cell {
                    total = total.saturating_add(pts);
                }
                total
            })
            .collect()
    }

    /// The disqualification status after each voter. Once set, it stays set.
    pub fn dq_statuses(&self) -> Vec<bool> {
        let mut is_dq = false;
        self.parsed_votes()
            .map(|cell| {
                is_dq |= cell == VoteCell::Disqualify;
                is_dq
            })
            .collect()
    }

    /// The score used for ranking: the running total, or `DQ_SORTING_PTS` once disqualified.
    pub fn sorting_pts(&self) -> Vec<i64> {
        self.display_pts()
            .into_iter()
            .zip(self.dq_statuses())
            .map(|(pts, is_dq)| if is_dq { DQ_SORTING_PTS } else { pts })
            .collect()
    }

    fn cells_up_to(&self, voter_num: i64) -> Result<impl Iterator<Item = VoteCell> + '_, ScoringErrors> {
        let idx = check_voter_num(voter_num, self.votes.len())?;
        Ok(self.parsed_votes().take(idx + 1))
    }

    pub fn display_pts_after_voter(&self, voter_num: i64) -> Result<i64, ScoringErrors> {
        Ok(self.standing_after_voter(voter_num)?.display_pts)
    }

    pub fn sorting_pts_after_voter(&self, voter_num: i64) -> Result<i64, ScoringErrors> {
        Ok(self.standing_after_voter(voter_num)?.sorting_pts)
    }

    pub fn is_dq_after_voter(&self, voter_num: i64) -> Result<bool, ScoringErrors> {
        Ok(self.standing_after_voter(voter_num)?.is_dq)
    }

    /// The number of voters who gave non-zero points to this entry, up to and including `voter_num`.
    pub fn voter_count_after_voter(&self, voter_num: i64) -> Result<u32, ScoringErrors> {
        let count = self
            .cells_up_to(voter_num)?
            .filter(|cell| matches!(cell, VoteCell::Numeric(pts) if *pts != 0))
            .count();
        Ok(count as u32)
    }

    /// The number of times this entry received exactly `points`, up to and including `voter_num`.
    pub fn pts_count_after_voter(&self, points: i64, voter_num: i64) -> Result<u32, ScoringErrors> {
        let count = self
            .cells_up_to(voter_num)?
            .filter(|cell| *cell == VoteCell::Numeric(points))
            .count();
        Ok(count as u32)
    }

    /// The number of voters who gave non-zero points over the whole contest.
    pub fn num_voters(&self) -> u32 {
        if self.votes.is_empty() {
            return 0;
        }
        self.voter_count_after_voter((self.votes.len() - 1) as i64)
            .unwrap_or(0)
    }

    /// All the distinct point values received by this entry, zero included.
    pub fn unique_pts(&self) -> BTreeSet<i64> {
        self.parsed_votes()
            .filter_map(|cell| match cell {
                VoteCell::Numeric(pts) => Some(pts),
                _ => None,
            })
            .collect()
    }

    /// Computes in a single pass everything the ranking needs to know about
    /// this entry right after `voter_num` has voted.
    pub fn standing_after_voter(&self, voter_num: i64) -> Result<Standing<'_>, ScoringErrors> {
        let idx = check_voter_num(voter_num, self.votes.len())?;
        let mut display_pts: i64 = 0;
        let mut is_dq = false;
        let mut voter_count: u32 = 0;
        let mut pts_counts: BTreeMap<i64, u32> = BTreeMap::new();
        for cell in self.parsed_votes().take(idx + 1) {
            match cell {
                VoteCell::Numeric(pts) => {
                    display_pts = display_pts.saturating_add(pts);
                    if pts != 0 {
                        voter_count += 1;
                    }
                    *pts_counts.entry(pts).or_insert(0) += 1;
                }
                VoteCell::Disqualify => {
                    is_dq = true;
                }
                VoteCell::Ignored => {}
            }
        }
        let sorting_pts = if is_dq { DQ_SORTING_PTS } else { display_pts };
        debug!(
            "standing_after_voter: {} after voter {}: display {} sorting {} voters {}",
            self.country, idx, display_pts, sorting_pts, voter_count
        );
        Ok(Standing {
            entry: self,
            voter_num: idx,
            display_pts,
            sorting_pts,
            is_dq,
            voter_count,
            pts_counts,
        })
    }
}
