// Primitives for reading CSV files.

use crate::ranker::*;

/// Reads the whole table as a grid of strings.
///
/// Rows of different lengths are accepted here: the shape of the table is
/// checked when extracting the polls, with a better error message.
pub fn read_csv_table(path: &str) -> RankerResult<Vec<Vec<String>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_records(rdr)
}

fn read_records<R: std::io::Read>(rdr: csv::Reader<R>) -> RankerResult<Vec<Vec<String>>> {
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let row: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, &row);
        res.push(row);
    }
    // Some spreadsheet programs start the file with a byte order mark.
    if let Some(first) = res.first_mut().and_then(|row| row.first_mut()) {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }
    Ok(res)
}
