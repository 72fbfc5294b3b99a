/*!

This is the long-form manual for `contest_scoring` and `reveal`.

## Input sheet

The votes are read from the first worksheet of a spreadsheet (`xls`, `xlsx`, `xlsm`, `ods`)
or from a CSV file. The layout is fixed:

| column | content                                              |
|--------|------------------------------------------------------|
| 0      | running number (not read)                            |
| 1      | country                                              |
| 2      | flag                                                 |
| 3      | artist                                               |
| 4      | song                                                 |
| 5      | total (not read, it is recomputed)                   |
| 6      | optional "Count" column (see `--contains-count-col`) |
| 6 or 7 | first voter, then one column per voter               |

Columns and rows are counted from the top left corner of the sheet (cell `A1`), even when
the first column or the first rows are left empty.

The first row holds the voter names above the vote columns. Each following row is an entry.
Reading stops at the first row that does not have a country, an artist and a song, so notes
may be kept below the table.

A vote cell contains:
* a number of points, written as an integer or as a float (`12`, `12.0`). Fractions are
  truncated towards zero.
* `DQ` (in any case): the entry is disqualified from this voter onwards. A disqualification
  cannot be lifted by a later vote.
* a boolean cell of a spreadsheet: 1 point for `TRUE`, 0 for `FALSE`.
* anything else, including nothing: no points.

## Ranking

After each voter, the entries are ordered by:
1. the score, with disqualified entries fixed at -1000 so that they sink to the bottom
2. the score ignoring disqualifications
3. the number of voters who gave non-zero points
4. the number of times each point value was received, starting from the highest value
   awarded in the whole contest: most 12s, then most 10s, and so on
5. the country, the artist and the song, in alphabetical order

Higher is better for the first four criteria.

## Output

`reveal` prints a JSON summary with three sections:
* `config`: the name of the contest
* `contest`: the entries with their running totals, disqualification statuses and point values
* `results`: the leaderboard after the requested voter (by default the last one), or after
  every voter with `--all-voters`

*/
