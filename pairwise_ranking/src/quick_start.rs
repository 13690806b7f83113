/*!

# Quick start with the Wikipedia table

This example computes the aggregate of the scholar surveys listed in
[English Wikipedia's historical rankings of the presidents of the United States](https://en.wikipedia.org/wiki/Historical_rankings_of_presidents_of_the_United_States#Scholar_survey_results).

**Getting the table** The simplest way to get the table as a file is to use
a spreadsheet program that can import HTML tables. In Google Sheets, enter the
following in a cell of an empty sheet:

```text
=importHTML("https://en.wikipedia.org/wiki/Historical_rankings_of_presidents_of_the_United_States";"table";1)
```

Then download the sheet as CSV (`File > Download > Comma-separated values`) or
in the Excel format. Keep the first row (the header) and the last row (the
'Total in survey' row).

**Running** Place the file in the current directory under the name
`US-president-rankings-table.csv` and run:

```bash
aggrank
```

or give the path explicitly:

```bash
aggrank -i 'rankings.xlsx' --has-aggregate y
```

The output starts with the string that was recognized as 'not ranked' and the
survey totals that are wrong in the table:

```text
String "—" in table interpreted to indicate 'not ranked'.

Total in survey for poll "2021 C-SPAN" is incorrect; should be 44.
```

Then comes the list of subjects in table order, then in rank order, with the
score of each subject (the fraction of won comparisons):

```text
Subjects sorted by rank: number - name - rank - score
16          Abraham Lincoln            01          0.9791
01          George Washington          02          0.9634
32          Franklin D. Roosevelt      03          0.9589
```

and finally the quartile boundaries of every poll and of the aggregate:

```text
Lowest rank in each quartile for each poll:
"1948 Schlesinger Sr.": 8, 15, 22, 29
"Aggr.": 12, 23, 34, 45
```

**Saving the results** The `--out` flag writes a JSON summary of the run, which
can be checked later against a new run with `--reference`:

```bash
aggrank -i rankings.csv --has-aggregate n --out summary.json
aggrank -i rankings.csv --has-aggregate n --reference summary.json
```

The second command fails and prints the differences if the results changed.

*/
