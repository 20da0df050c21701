pub mod engine;
pub mod pipeline;
pub mod ranker;

pub use crate::domain::model::{
    Benchmark, BenchmarkSet, DatasetRecord, LeaderboardEntry, PortalSnapshot, ProblemType,
    Ranking, Record, ReportBundle, SamplePreview, SortOrder,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
