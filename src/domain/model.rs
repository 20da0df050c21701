use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A parsed row from any of the portal's tabular sources. Field order is
/// owned by the column list the parser was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(|v| v.as_str())
    }

    pub fn field(&self, name: &str) -> &str {
        self.get_str(name).unwrap_or("")
    }
}

/// The fixed challenge tracks of the hackathon.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ProblemType {
    DR,
    BAP,
    CD,
}

impl ProblemType {
    pub fn label(self) -> &'static str {
        match self {
            Self::DR => "Diabetic Retinopathy",
            Self::BAP => "Bone Age Prediction",
            Self::CD => "Cataract Detection",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DR => "DR",
            Self::BAP => "BAP",
            Self::CD => "CD",
        })
    }
}

impl FromStr for ProblemType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DR" => Ok(Self::DR),
            "BAP" => Ok(Self::BAP),
            "CD" => Ok(Self::CD),
            other => Err(format!("unknown problem type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Lower metric values rank higher (e.g. mean absolute error).
    Asc,
    /// Higher metric values rank higher (e.g. F1 score).
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub metric: String,
    pub value: f64,
    pub sort_order: SortOrder,
}

/// Per-category benchmark table, passed explicitly to the ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkSet(BTreeMap<ProblemType, Benchmark>);

impl BenchmarkSet {
    pub fn get(&self, problem_type: ProblemType) -> Option<&Benchmark> {
        self.0.get(&problem_type)
    }

    pub fn categories(&self) -> impl Iterator<Item = ProblemType> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProblemType, &Benchmark)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn merge(&mut self, overrides: BTreeMap<ProblemType, Benchmark>) {
        for (problem_type, benchmark) in overrides {
            self.0.insert(problem_type, benchmark);
        }
    }
}

impl Default for BenchmarkSet {
    fn default() -> Self {
        let mut benchmarks = BTreeMap::new();
        benchmarks.insert(
            ProblemType::DR,
            Benchmark {
                metric: "F1 Score".to_string(),
                value: 0.88,
                sort_order: SortOrder::Desc,
            },
        );
        benchmarks.insert(
            ProblemType::BAP,
            Benchmark {
                metric: "MAE (Years)".to_string(),
                value: 0.5833333333333333,
                sort_order: SortOrder::Asc,
            },
        );
        benchmarks.insert(
            ProblemType::CD,
            Benchmark {
                metric: "F1 Score".to_string(),
                value: 0.85,
                sort_order: SortOrder::Desc,
            },
        );
        Self(benchmarks)
    }
}

impl From<BTreeMap<ProblemType, Benchmark>> for BenchmarkSet {
    fn from(benchmarks: BTreeMap<ProblemType, Benchmark>) -> Self {
        Self(benchmarks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub team_name: String,
    pub problem_type: ProblemType,
    pub commit: String,
    pub metric_value: f64,
}

/// Output of the ranker: entries in display order plus the position the
/// synthetic benchmark row is inserted at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub ordered: Vec<LeaderboardEntry>,
    pub benchmark_index: usize,
}

pub const DATASET_COLUMNS: [&str; 5] = [
    "submitter_name",
    "dataset_type",
    "description",
    "email",
    "file_address",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub submitter_name: String,
    pub dataset_type: String,
    pub description: String,
    pub email: String,
    pub file_address: String,
}

impl DatasetRecord {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            submitter_name: record.get_str("submitter_name")?.to_string(),
            dataset_type: record.get_str("dataset_type")?.to_string(),
            description: record.get_str("description")?.to_string(),
            email: record.get_str("email")?.to_string(),
            file_address: record.get_str("file_address")?.to_string(),
        })
    }

    pub fn is_external_url(&self) -> bool {
        self.file_address.starts_with("http://") || self.file_address.starts_with("https://")
    }

    pub fn file_name(&self) -> &str {
        self.file_address
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("dataset.parquet")
    }

    /// Short source string for listings: the host for external links, the
    /// file name for portal-hosted files.
    pub fn display_source(&self) -> String {
        if self.is_external_url() {
            Url::parse(&self.file_address)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
                .unwrap_or_else(|| self.file_address.clone())
        } else {
            self.file_name().to_string()
        }
    }
}

/// Everything extract() pulled from the portal in one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalSnapshot {
    pub entries: Vec<LeaderboardEntry>,
    pub datasets: Vec<DatasetRecord>,
    pub sample: Option<Vec<Record>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplePreview {
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// None when the pixel vector failed to convert; consumers show a
    /// placeholder.
    pub png: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportBundle {
    pub rankings: BTreeMap<ProblemType, Ranking>,
    pub datasets: Vec<DatasetRecord>,
    pub previews: Vec<SamplePreview>,
    pub leaderboard_csv: String,
    pub datasets_csv: String,
    pub report_json: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_type_round_trip() {
        for problem_type in [ProblemType::DR, ProblemType::BAP, ProblemType::CD] {
            let parsed: ProblemType = problem_type.to_string().parse().unwrap();
            assert_eq!(parsed, problem_type);
        }
        assert!("XYZ".parse::<ProblemType>().is_err());
    }

    #[test]
    fn test_builtin_benchmarks() {
        let benchmarks = BenchmarkSet::default();
        let dr = benchmarks.get(ProblemType::DR).unwrap();
        assert_eq!(dr.metric, "F1 Score");
        assert_eq!(dr.value, 0.88);
        assert_eq!(dr.sort_order, SortOrder::Desc);

        let bap = benchmarks.get(ProblemType::BAP).unwrap();
        assert_eq!(bap.sort_order, SortOrder::Asc);
        assert!((bap.value - 0.5833333333333333).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dataset_display_source() {
        let external = DatasetRecord {
            submitter_name: "A".to_string(),
            dataset_type: "DR".to_string(),
            description: "scans".to_string(),
            email: "a@example.org".to_string(),
            file_address: "https://data.example.org/sets/dr.zip".to_string(),
        };
        assert!(external.is_external_url());
        assert_eq!(external.display_source(), "data.example.org");

        let hosted = DatasetRecord {
            file_address: "datasets/dr_fundus.parquet".to_string(),
            ..external
        };
        assert!(!hosted.is_external_url());
        assert_eq!(hosted.display_source(), "dr_fundus.parquet");
    }

    #[test]
    fn test_leaderboard_entry_deserializes_from_portal_json() {
        let json = r#"{"team_name":"RetinaNet","problem_type":"DR","commit":"ab12cd3","metric_value":0.91}"#;
        let entry: LeaderboardEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.problem_type, ProblemType::DR);
        assert_eq!(entry.metric_value, 0.91);
    }
}
