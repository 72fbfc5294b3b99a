use log::{debug, info};
use snafu::ensure;

use crate::config::*;
use crate::Contest;

/// A builder for assembling a contest entry by entry.
///
/// ```
/// use contest_scoring::builder::Builder;
/// # use contest_scoring::ScoringErrors;
///
/// let mut builder = Builder::new()
///     .voters(&["Albania".to_string(), "Armenia".to_string()])?;
///
/// builder.add_entry("Sweden", "se", "Loreen", "Tattoo", &["12".to_string(), "10".to_string()])?;
/// builder.add_entry("Finland", "fi", "Käärijä", "Cha Cha Cha", &["10".to_string(), "12".to_string()])?;
///
/// let contest = builder.build()?;
/// let leader = contest.results_after_voter(0)?[0];
/// assert_eq!(leader.country, "Sweden");
///
/// # Ok::<(), ScoringErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    voters: Vec<String>,
    entries: Vec<Entry>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Sets the voters. The entries already added must have one vote per voter.
    pub fn voters(self, voters: &[String]) -> Result<Builder, ScoringErrors> {
        for e in self.entries.iter() {
            ensure!(
                e.votes.len() == voters.len(),
                MismatchedVotesSnafu {
                    country: e.country.clone(),
                    found: e.votes.len(),
                    expected: voters.len()
                }
            );
        }
        Ok(Builder {
            voters: voters.to_vec(),
            entries: self.entries,
        })
    }

    /// Adds an entry. The votes are given in the same order as the voters.
    pub fn add_entry(
        &mut self,
        country: &str,
        flag: &str,
        artist: &str,
        song: &str,
        votes: &[String],
    ) -> Result<(), ScoringErrors> {
        ensure!(
            votes.len() == self.voters.len(),
            MismatchedVotesSnafu {
                country,
                found: votes.len(),
                expected: self.voters.len()
            }
        );
        self.entries
            .push(Entry::new(country, flag, artist, song, votes));
        Ok(())
    }

    pub fn build(self) -> Result<Contest, ScoringErrors> {
        Contest::new(self.entries, self.voters)
    }
}

fn cell_at(row: &[String], idx: usize) -> String {
    row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Builds a contest from a grid of text cells, as read from a spreadsheet.
///
/// The first row holds the names of the voters, starting at the first vote
/// column of the layout. Every following row is an entry. Reading stops at the
/// first row without a country, an artist or a song.
///
/// Rows shorter than the widest row are completed with empty cells.
pub fn contest_from_rows(rows: &[Vec<String>], layout: &TableLayout) -> Result<Contest, ScoringErrors> {
    let num_cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    ensure!(
        num_cols >= TableLayout::MIN_COLUMNS,
        NotEnoughColumnsSnafu {
            found: num_cols,
            required: TableLayout::MIN_COLUMNS
        }
    );
    ensure!(
        rows.len() >= TableLayout::MIN_ROWS,
        NotEnoughRowsSnafu {
            found: rows.len(),
            required: TableLayout::MIN_ROWS
        }
    );

    let start = layout.first_vote_column();
    debug!(
        "contest_from_rows: {} rows, {} columns, votes start at column {}",
        rows.len(),
        num_cols,
        start
    );

    let voters: Vec<String> = (start..num_cols).map(|idx| cell_at(&rows[0], idx)).collect();
    let mut builder = Builder::new().voters(&voters)?;

    for (lineno, row) in rows.iter().enumerate().skip(1) {
        let country = cell_at(row, TableLayout::COUNTRY_COL);
        let flag = cell_at(row, TableLayout::FLAG_COL);
        let artist = cell_at(row, TableLayout::ARTIST_COL);
        let song = cell_at(row, TableLayout::SONG_COL);

        if country.is_empty() || artist.is_empty() || song.is_empty() {
            debug!("contest_from_rows: end of entries at row {}", lineno);
            break;
        }

        let votes: Vec<String> = (start..num_cols).map(|idx| cell_at(row, idx)).collect();
        builder.add_entry(&country, &flag, &artist, &song, &votes)?;
    }

    let contest = builder.build()?;
    info!(
        "contest_from_rows: read {} entries and {} voters",
        contest.num_entries(),
        contest.num_voters()
    );
    Ok(contest)
}
