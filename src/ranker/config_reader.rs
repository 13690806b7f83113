use crate::ranker::*;

use serde::{Deserialize, Serialize};

/// The labels of the table, all optional. Missing labels take the default
/// values of the Wikipedia table of presidents.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelsConfig {
    #[serde(rename = "numberHeader")]
    pub number_header: Option<String>,
    #[serde(rename = "nameHeader")]
    pub name_header: Option<String>,
    #[serde(rename = "partyHeader")]
    pub party_header: Option<String>,
    #[serde(rename = "totalFooter")]
    pub total_footer: Option<String>,
    #[serde(rename = "aggregateHeader")]
    pub aggregate_header: Option<String>,
    #[serde(rename = "tieMarker")]
    pub tie_marker: Option<String>,
    #[serde(rename = "noteMarker")]
    pub note_marker: Option<String>,
}

impl LabelsConfig {
    pub fn to_labels(&self) -> TableLabels {
        let d = TableLabels::default();
        TableLabels {
            number_header: self.number_header.clone().unwrap_or(d.number_header),
            name_header: self.name_header.clone().unwrap_or(d.name_header),
            party_header: self.party_header.clone().unwrap_or(d.party_header),
            total_footer: self.total_footer.clone().unwrap_or(d.total_footer),
            aggregate_header: self.aggregate_header.clone().unwrap_or(d.aggregate_header),
            tie_marker: self.tie_marker.clone().unwrap_or(d.tie_marker),
            note_marker: self.note_marker.clone().unwrap_or(d.note_marker),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankerConfig {
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "hasAggregate")]
    pub has_aggregate: Option<bool>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    pub labels: Option<LabelsConfig>,
}

// ******** Summary ********

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub input: String,
    #[serde(rename = "hasAggregate")]
    pub has_aggregate: bool,
    pub aggregate: String,
    #[serde(rename = "unrankedToken")]
    pub unranked_token: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub number: String,
    pub name: String,
    pub party: String,
    pub victories: u64,
    pub defeats: u64,
    /// The exact fraction, e.g. `12/16`.
    pub score: Option<String>,
    pub rank: Option<String>,
    pub tied: bool,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyTotalSummary {
    pub poll: String,
    pub declared: Option<i64>,
    pub actual: u32,
    pub aggregate: bool,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuartileSummary {
    pub poll: String,
    pub boundaries: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DriftSummary {
    pub number: String,
    pub name: String,
    pub found: String,
    pub computed: Option<String>,
}

pub fn read_config(path: &str) -> RankerResult<RankerConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RankerConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> RankerResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js);
    Ok(js)
}
