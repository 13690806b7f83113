use clap::Parser;

/// This is a program for generating an aggregate ranking out of a table of ranked-list surveys.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The table of surveys, in CSV or Excel format. By default, the file
    /// US-president-rankings-table.csv in the current directory. If this default file does not exist,
    /// the path will be asked for.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, files ending in .xlsx are read as Excel
    /// files and all the others as CSV.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first worksheet
    /// is used by default.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (y or n) Whether the table has an aggregate column. This is only used if no aggregate
    /// column is found in the table. If not provided, it will be asked for when needed.
    #[clap(long, value_parser = parse_answer)]
    pub has_aggregate: Option<bool>,

    /// (file path, optional) A configuration file in JSON format. See the documentation for the
    /// fields. The other options take precedence over the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the ranking will be written in
    /// JSON format to the given location. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of a ranking in JSON format. If
    /// provided, aggrank will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

/// `y`, `yes` or `true` (in any case) is a yes, anything else is a no.
pub fn parse_answer(s: &str) -> Result<bool, String> {
    let s = s.trim();
    Ok(["y", "yes", "true"]
        .iter()
        .any(|yes| s.eq_ignore_ascii_case(yes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers() {
        assert_eq!(parse_answer("y"), Ok(true));
        assert_eq!(parse_answer("Yes "), Ok(true));
        assert_eq!(parse_answer("TRUE"), Ok(true));
        assert_eq!(parse_answer("n"), Ok(false));
        assert_eq!(parse_answer(""), Ok(false));
    }

    #[test]
    fn parse_flags() {
        let args = Args::parse_from([
            "aggrank",
            "-i",
            "table.csv",
            "--has-aggregate",
            "n",
            "--out",
            "stdout",
        ]);
        assert_eq!(args.input, Some("table.csv".to_string()));
        assert_eq!(args.has_aggregate, Some(false));
        assert_eq!(args.out, Some("stdout".to_string()));
        assert!(!args.verbose);
    }
}
