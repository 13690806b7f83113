/*!

This is the long-form manual for `pairwise_ranking` and `aggrank`.

## Input table

The table has one row per subject and one column per poll:

| No.  | President          | Political party | Poll 1 | Poll 2   | ... | Aggr.    |
|------|--------------------|-----------------|--------|----------|-----|----------|
| 01   | George Washington  | None            | 1      | 2 (tie)  |     | 01       |
| 02   | John Adams         | Federalist      | 12 *   | —        |     | 14 (tie) |
| ...  |                    |                 |        |          |     |          |
|      | Total in survey    |                 | 40     | 39       |     | 45       |

- The first row is the header. Its first three cells must be or start with
  `No.`, `President` and `Political party`. Labels are matched as prefixes
  because tables copied from wikis often carry references (`Political party[3]`).
- The last row is the footer. Its second cell must be or start with
  `Total in survey`. The other footer cells of the poll columns are the declared
  number of subjects ranked in each poll.
- The last column is the aggregate if its header is or starts with `Aggr.`.
  It is optional, and it is never used to compute the new aggregate. When the
  header does not settle the question, `aggrank` asks whether the table has an
  aggregate (or reads the answer from `--has-aggregate`). Answering yes is an
  error: an aggregate column must be the last one.
- All the rows must have the same length.

### Rank cells

Each cell of a poll column is either:
- an integer, optionally followed by ` (tie)`, by ` *` (a note), or by both.
  The markers are informative only: two subjects are tied in a poll when they
  have the same number.
- a string that means 'not ranked'. Any string is accepted, but it must be the
  same everywhere in the table. Two different strings are an error, since
  one of them is most likely a typo in a rank.

The labels and markers can be changed in the configuration file.

## Scores and ranks

For each pair of subjects and each poll that ranks both of them, the subject
with the lower number gets a victory and the other one gets a defeat. Ties
give nothing to either side. Polls that do not rank one of the two subjects
are ignored for this pair.

The score of a subject is `victories / (victories + defeats)`. Scores are
compared exactly, by cross-multiplication, never through floating point
numbers. A subject that never takes part in a decided comparison has no score
and no rank, and it is listed last.

Ranks follow the competition convention: subjects with the same score share
the same rank, and the next ranks are skipped. Ranks have at least two digits
and tied ranks carry the ` (tie)` marker: `01`, `02 (tie)`, `02 (tie)`, `04`.

## Survey totals

The declared totals of the footer are checked against the number of subjects
that are actually ranked in each poll. Wrong or missing totals are reported,
with the right value. This is never an error.

## Quartiles

For each poll and for the aggregate, `aggrank` prints the lowest rank (the
highest number) in each quartile, using the 'median goes up' rule: the ranks
are split into a top and a bottom half, which are split again into the first
two and the last two quartiles. In each split, the median goes into the top
half. For 7 ranked subjects, this gives `2, 4, 6, 7`.

Ties are not taken into account, only the number of ranked subjects. If 40
subjects are ranked and five of them are tied at rank 10, the first quartile
still ends at 10 and contains four subjects too many. Ending it at 9 instead,
and moving the tied subjects to the second quartile, would be closer to the
truth: this decision is left to the reader of the output.

With fewer than 4 subjects, the last quartiles are empty: `1, 2, , ` for 2
subjects.

## Configuration

`aggrank` comes with defaults that match the table of historical rankings of
the presidents of the United States on English Wikipedia. A JSON configuration
file can be passed with `--config`:

```json
{
  "inputFile": "US-president-rankings-table.csv",
  "inputType": "csv",
  "hasAggregate": true,
  "outputFile": "summary.json",
  "labels": {
    "nameHeader": "Prime Minister",
    "totalFooter": "Total in survey"
  }
}
```

All the fields are optional. Relative paths are relative to the directory of
the configuration file. Options passed on the command line take precedence.

Fields:
- `inputFile` (string): the table.
- `inputType` (string, `csv` or `xlsx`): the format of the table. By default,
  files ending in `.xlsx` are read as Excel workbooks and anything else as CSV.
- `excelWorksheetName` (string): for Excel inputs, the worksheet to read.
  The first worksheet is read by default.
- `hasAggregate` (boolean): whether the table has an aggregate column, if the
  header does not show one.
- `outputFile` (string): where to write the JSON summary, or `stdout`.
- `labels` (object): `numberHeader`, `nameHeader`, `partyHeader`,
  `totalFooter`, `aggregateHeader`, `tieMarker`, `noteMarker`.

 */
