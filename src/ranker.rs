use log::{debug, info, warn};

use pairwise_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::{parse_answer, Args};
use crate::ranker::config_reader::*;
use crate::ranker::io_common::{prompt, resolve_path, simplify_file_name};
use crate::ranker::io_csv::read_csv_table;
use crate::ranker::io_excel::read_excel_table;
use crate::ranker::report::format_report;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod report;

/// The table read when no input is given.
pub const DEFAULT_INPUT: &str = "US-president-rankings-table.csv";

#[derive(Debug, Snafu)]
pub enum RankerError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file has no worksheet"))]
    EmptyExcel {},
    #[snafu(display("Worksheet {name:?} not found in the Excel file"))]
    MissingWorksheet { name: String },
    #[snafu(display("Cell {cell} has a type that cannot be read: {content}"))]
    ExcelWrongCellType { cell: String, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the answer"))]
    Prompt { source: std::io::Error },
    #[snafu(display("Error in table: {source}"))]
    Ranking { source: RankingError },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RankerResult<T> = Result<T, RankerError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

impl InputType {
    fn parse(s: &str) -> RankerResult<InputType> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "xlsx" | "excel" => Ok(InputType::Xlsx),
            x => whatever!("Input type {:?} not understood: should be csv or xlsx", x),
        }
    }

    fn from_path(path: &str) -> InputType {
        let is_excel = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("xlsx"))
            .unwrap_or(false);
        if is_excel {
            InputType::Xlsx
        } else {
            InputType::Csv
        }
    }
}

/// Everything needed for one run, after merging the command line and the
/// configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input_path: String,
    pub input_type: InputType,
    pub worksheet: Option<String>,
    pub has_aggregate: Option<bool>,
    pub labels: TableLabels,
    /// A file path or `stdout`.
    pub out: Option<String>,
    pub reference: Option<String>,
}

/// Merges the command line with the configuration file, if any.
/// The command line takes precedence.
pub fn resolve_settings(args: &Args) -> RankerResult<RunSettings> {
    let (config, root): (RankerConfig, Option<PathBuf>) = match args.config.as_deref() {
        Some(p) => {
            let config = read_config(p)?;
            info!("config: {:?}", config);
            (config, Path::new(p).parent().map(|x| x.to_path_buf()))
        }
        None => (RankerConfig::default(), None),
    };
    let root = root.as_deref();

    let input_path = match (args.input.as_ref(), config.input_file.as_ref()) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => resolve_path(root, p),
        (None, None) => default_input()?,
    };

    let input_type = match args.input_type.as_ref().or(config.input_type.as_ref()) {
        Some(s) => InputType::parse(s)?,
        None => InputType::from_path(&input_path),
    };

    let out = match (args.out.as_ref(), config.output_file.as_ref()) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(p)) if p == "stdout" => Some(p.clone()),
        (None, Some(p)) => Some(resolve_path(root, p)),
        (None, None) => None,
    };

    Ok(RunSettings {
        input_path,
        input_type,
        worksheet: args
            .excel_worksheet_name
            .clone()
            .or_else(|| config.excel_worksheet_name.clone()),
        has_aggregate: args.has_aggregate.or(config.has_aggregate),
        labels: config
            .labels
            .as_ref()
            .map(|l| l.to_labels())
            .unwrap_or_default(),
        out,
        reference: args.reference.clone(),
    })
}

fn default_input() -> RankerResult<String> {
    if Path::new(DEFAULT_INPUT).exists() {
        return Ok(DEFAULT_INPUT.to_string());
    }
    let answer = prompt(&format!(
        "File {} not found in the current directory. Path of the table: ",
        DEFAULT_INPUT
    ))?;
    let path = answer.trim();
    if path.is_empty() {
        whatever!("No table to read")
    }
    Ok(path.to_string())
}

fn read_table(settings: &RunSettings) -> RankerResult<Vec<Vec<String>>> {
    info!(
        "Attempting to read table file {:?} as {:?}",
        settings.input_path, settings.input_type
    );
    match settings.input_type {
        InputType::Csv => read_csv_table(&settings.input_path),
        InputType::Xlsx => read_excel_table(&settings.input_path, settings.worksheet.as_deref()),
    }
}

/// Extracts the table, asking the user whether there is an aggregate column
/// when neither the table nor the settings tell.
fn extract_with_prompt(grid: &[Vec<String>], settings: &RunSettings) -> RankerResult<PollTable> {
    let knowledge = AggregateKnowledge::from(settings.has_aggregate);
    match extract_table(grid, &settings.labels, knowledge) {
        Err(RankingError::UndecidedAggregate { cell }) => {
            debug!("extract_with_prompt: no aggregate header in {}", cell);
            let answer =
                prompt("Aggregate poll not found. Table has aggregate? If yes enter \"y\": ")?;
            let has_aggregate = parse_answer(&answer).unwrap_or(false);
            extract_table(
                grid,
                &settings.labels,
                AggregateKnowledge::from(Some(has_aggregate)),
            )
            .context(RankingSnafu {})
        }
        r => r.context(RankingSnafu {}),
    }
}

fn build_summary_js(settings: &RunSettings, table: &PollTable, res: &AggregateResult) -> JSValue {
    let c = OutputConfig {
        input: simplify_file_name(&settings.input_path),
        has_aggregate: table.has_aggregate(),
        aggregate: table.aggregate_name(),
        unranked_token: table.unranked_token.clone(),
    };
    let subjects: Vec<SubjectSummary> = res
        .ranked()
        .iter()
        .map(|rs| SubjectSummary {
            number: rs.subject.number.clone(),
            name: rs.subject.name.clone(),
            party: rs.subject.party.clone(),
            victories: rs.tally.victories,
            defeats: rs.tally.defeats,
            score: rs.score.ratio().map(|r| r.to_string()),
            rank: rs.rank_label(&settings.labels.tie_marker),
            tied: rs.tied,
        })
        .collect();
    let totals: Vec<SurveyTotalSummary> = res
        .totals
        .iter()
        .map(|st| SurveyTotalSummary {
            poll: st.poll_name.clone(),
            declared: st.declared,
            actual: st.actual,
            aggregate: st.is_aggregate,
        })
        .collect();
    let quartiles: Vec<QuartileSummary> = res
        .quartiles
        .iter()
        .map(|(poll, q)| QuartileSummary {
            poll: poll.clone(),
            boundaries: q.map(|x| x.to_string()),
        })
        .collect();
    let drift: Vec<DriftSummary> = res
        .aggregate_drift
        .iter()
        .map(|d| {
            let s = &res.subjects[d.subject_index].subject;
            DriftSummary {
                number: s.number.clone(),
                name: s.name.clone(),
                found: d.found.clone(),
                computed: d.computed.clone(),
            }
        })
        .collect();
    json!({
        "config": c,
        "subjects": subjects,
        "surveyTotals": totals,
        "quartiles": quartiles,
        "aggregateDrift": drift
    })
}

pub fn run_ranking(settings: &RunSettings) -> RankerResult<()> {
    let grid = read_table(settings)?;
    let table = extract_with_prompt(&grid, settings)?;
    let res = run_aggregate_with(&table, &settings.labels);

    print!("{}", format_report(&table, &res, &settings.labels));

    // Assemble the final json
    let result_js = build_summary_js(settings, &table, &res);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match settings.out.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingSummarySnafu { path })?;
            info!("Summary written to {:?}", path);
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = settings.reference.as_deref() {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary {:?}", summary_p);
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
        info!("Summary identical to the reference {:?}", summary_p);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snafu::ErrorCompat;
    use std::io::Write;

    const TEST_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");

    fn run_ranking_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> RankerResult<()> {
        info!("Running test {}", test_name);
        let args = Args {
            config: Some(format!("{}/{}/{}", TEST_DIR, test_name, config_lpath)),
            reference: Some(format!("{}/{}/{}", TEST_DIR, test_name, summary_lpath)),
            ..Default::default()
        };
        let settings = resolve_settings(&args)?;
        run_ranking(&settings)
    }

    fn test_wrapper(test_name: &str) {
        let res = run_ranking_test(
            test_name,
            format!("{}_config.json", test_name).as_str(),
            format!("{}_expected_summary.json", test_name).as_str(),
        );
        if let Err(e) = &res {
            eprintln!("An error occured {}", e);
            if let Some(bt) = ErrorCompat::backtrace(e) {
                eprintln!("trace: {}", bt);
            }
        }
        assert!(res.is_ok());
    }

    fn write_table(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn settings_for(path: &str) -> RunSettings {
        let args = Args {
            input: Some(path.to_string()),
            has_aggregate: Some(false),
            ..Default::default()
        };
        resolve_settings(&args).unwrap()
    }

    #[test]
    fn simple_no_aggregate() {
        test_wrapper("simple_no_aggregate");
    }

    #[test]
    fn tie_at_top() {
        test_wrapper("tie_at_top");
    }

    #[test]
    fn presidents_sample() {
        test_wrapper("presidents_sample");
    }

    #[test]
    fn excel_sample() {
        test_wrapper("excel_sample");
    }

    #[test]
    fn reference_mismatch() {
        let res = run_ranking_test(
            "simple_no_aggregate",
            "simple_no_aggregate_config.json",
            "../tie_at_top/tie_at_top_expected_summary.json",
        );
        assert!(matches!(res, Err(RankerError::ReferenceMismatch {})));
    }

    #[test]
    fn two_unranked_tokens() {
        let f = write_table(
            "No.,President,Political party,P1,P2\n\
             01,A,,1,—\n\
             02,B,,n/a,1\n\
             ,Total in survey,,1,1\n",
        );
        let settings = settings_for(f.path().to_str().unwrap());
        let res = run_ranking(&settings);
        match res {
            Err(RankerError::Ranking {
                source: RankingError::InconsistentUnrankedToken { first, second, .. },
            }) => {
                assert_eq!(first, "—");
                assert_eq!(second, "n/a");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn summary_written_to_file() {
        let f = write_table(
            "No.,President,Political party,P1\n\
             01,A,,2\n\
             02,B,,1\n\
             ,Total in survey,,2\n",
        );
        let out = tempfile::NamedTempFile::new().unwrap();
        let mut settings = settings_for(f.path().to_str().unwrap());
        settings.out = Some(out.path().to_str().unwrap().to_string());
        run_ranking(&settings).unwrap();

        let js = read_summary(out.path().to_str().unwrap()).unwrap();
        assert_eq!(js["subjects"][0]["name"], "B");
        assert_eq!(js["subjects"][0]["score"], "1/1");
        assert_eq!(js["subjects"][1]["rank"], "02");
        assert_eq!(js["config"]["hasAggregate"], false);
        assert_eq!(js["quartiles"][1]["boundaries"], "1, 2, , ");
    }

    #[test]
    fn settings_from_config() {
        let args = Args {
            config: Some(format!(
                "{}/simple_no_aggregate/simple_no_aggregate_config.json",
                TEST_DIR
            )),
            out: Some("stdout".to_string()),
            ..Default::default()
        };
        let settings = resolve_settings(&args).unwrap();
        assert!(settings
            .input_path
            .ends_with("simple_no_aggregate/simple_no_aggregate_table.csv"));
        assert_eq!(settings.input_type, InputType::Csv);
        assert_eq!(settings.has_aggregate, Some(false));
        assert_eq!(settings.out, Some("stdout".to_string()));
        assert_eq!(settings.labels, TableLabels::default());
    }

    #[test]
    fn input_types() {
        assert_eq!(InputType::from_path("table.xlsx"), InputType::Xlsx);
        assert_eq!(InputType::from_path("table.XLSX"), InputType::Xlsx);
        assert_eq!(InputType::from_path("table.csv"), InputType::Csv);
        assert_eq!(InputType::from_path("table"), InputType::Csv);
        assert_eq!(InputType::parse("Excel").unwrap(), InputType::Xlsx);
        assert!(InputType::parse("ods").is_err());
    }
}
