use crate::core::ranker::rank_all;
use crate::domain::model::{
    Benchmark, BenchmarkSet, DatasetRecord, LeaderboardEntry, PortalSnapshot, ProblemType,
    Ranking, ReportBundle, SamplePreview, SortOrder,
};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::ingest::columnar::{decode_columnar, SAMPLE_COLUMNS};
use crate::ingest::delimited::parse_datasets;
use crate::ingest::raster::{raster_to_png, vector_to_raster};
use crate::utils::error::{PortalError, Result};
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;

pub struct PortalPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> PortalPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PortalPipeline<S, C> {
    async fn extract(&self) -> Result<PortalSnapshot> {
        tracing::debug!(
            "Fetching leaderboard from: {}",
            self.config.leaderboard_endpoint()
        );
        let response = self
            .client
            .get(self.config.leaderboard_endpoint())
            .send()
            .await?;
        tracing::debug!("Leaderboard response status: {}", response.status());
        let entries: Vec<LeaderboardEntry> = response.error_for_status()?.json().await?;

        tracing::debug!("Fetching datasets from: {}", self.config.datasets_endpoint());
        let response = self
            .client
            .get(self.config.datasets_endpoint())
            .send()
            .await?;
        let table_text = response.error_for_status()?.text().await?;
        let datasets = parse_datasets(&table_text);

        let sample = match self.config.sample_endpoint() {
            Some(endpoint) => {
                tracing::debug!("Fetching columnar sample from: {}", endpoint);
                let response = self.client.get(endpoint).send().await?;
                let buffer = response.error_for_status()?.bytes().await?;
                Some(decode_columnar(buffer, &SAMPLE_COLUMNS)?)
            }
            None => None,
        };

        Ok(PortalSnapshot {
            entries,
            datasets,
            sample,
        })
    }

    async fn transform(&self, snapshot: PortalSnapshot) -> Result<ReportBundle> {
        let benchmarks = self.config.benchmarks();
        let rankings = rank_all(&snapshot.entries, benchmarks)?;

        let (width, height) = self.config.preview_dimensions();
        let mut previews = Vec::new();
        if let Some(sample) = &snapshot.sample {
            for record in sample {
                let id = record.field("id").to_string();
                let png = match vector_to_raster(record.field("image_vector"), width, height) {
                    Ok(raster) => Some(raster_to_png(&raster)?),
                    Err(e) => {
                        // A bad pixel vector only costs its own preview.
                        tracing::warn!("Preview skipped for '{}': {}", id, e);
                        None
                    }
                };
                previews.push(SamplePreview {
                    id,
                    width,
                    height,
                    png,
                });
            }
        }

        let leaderboard_csv = render_leaderboard_csv(&rankings, benchmarks)?;
        let datasets_csv = render_datasets_csv(&snapshot.datasets)?;
        let report_json = render_report_json(&rankings, benchmarks, &snapshot.datasets, &previews)?;

        Ok(ReportBundle {
            rankings,
            datasets: snapshot.datasets,
            previews,
            leaderboard_csv,
            datasets_csv,
            report_json,
        })
    }

    async fn load(&self, bundle: ReportBundle) -> Result<String> {
        tracing::debug!("Writing reports to: {}", self.config.output_path());

        self.storage
            .write_file("leaderboard.csv", bundle.leaderboard_csv.as_bytes())
            .await?;
        self.storage
            .write_file("datasets.csv", bundle.datasets_csv.as_bytes())
            .await?;
        self.storage
            .write_file("report.json", bundle.report_json.as_bytes())
            .await?;

        for preview in &bundle.previews {
            if let Some(png) = &preview.png {
                self.storage
                    .write_file(&format!("previews/{}.png", preview.id), png)
                    .await?;
            }
        }

        Ok(self.config.output_path().to_string())
    }
}

fn render_leaderboard_csv(
    rankings: &BTreeMap<ProblemType, Ranking>,
    benchmarks: &BenchmarkSet,
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["category", "rank", "team_name", "commit", "metric_value"])?;

    for (problem_type, ranking) in rankings {
        let Some(benchmark) = benchmarks.get(*problem_type) else {
            continue;
        };
        for (index, entry) in ranking.ordered.iter().enumerate() {
            if index == ranking.benchmark_index {
                write_benchmark_row(&mut writer, *problem_type, benchmark)?;
            }
            writer.write_record([
                problem_type.to_string(),
                (index + 1).to_string(),
                entry.team_name.clone(),
                entry.commit.clone(),
                format!("{:.4}", entry.metric_value),
            ])?;
        }
        if ranking.benchmark_index == ranking.ordered.len() {
            write_benchmark_row(&mut writer, *problem_type, benchmark)?;
        }
    }

    writer_into_string(writer)
}

fn write_benchmark_row(
    writer: &mut csv::Writer<Vec<u8>>,
    problem_type: ProblemType,
    benchmark: &Benchmark,
) -> Result<()> {
    writer.write_record([
        problem_type.to_string(),
        "-".to_string(),
        "Current Benchmark".to_string(),
        "Baseline Target".to_string(),
        format!("{:.4}", benchmark.value),
    ])?;
    Ok(())
}

fn render_datasets_csv(datasets: &[DatasetRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "submitter_name",
        "dataset_type",
        "description",
        "email",
        "file_address",
        "source",
    ])?;

    for dataset in datasets {
        writer.write_record([
            dataset.submitter_name.as_str(),
            dataset.dataset_type.as_str(),
            dataset.description.as_str(),
            dataset.email.as_str(),
            dataset.file_address.as_str(),
            dataset.display_source().as_str(),
        ])?;
    }

    writer_into_string(writer)
}

fn writer_into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| PortalError::ProcessingError {
            message: format!("CSV buffer flush failed: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| PortalError::ProcessingError {
        message: format!("CSV output was not UTF-8: {}", e),
    })
}

#[derive(Serialize)]
struct PortalReport<'a> {
    generated_at: String,
    categories: Vec<CategoryReport<'a>>,
    datasets: &'a [DatasetRecord],
    previews: Vec<PreviewReport>,
}

#[derive(Serialize)]
struct CategoryReport<'a> {
    problem_type: ProblemType,
    label: &'static str,
    metric: &'a str,
    sort_order: SortOrder,
    benchmark_value: f64,
    benchmark_index: usize,
    entries: &'a [LeaderboardEntry],
}

#[derive(Serialize)]
struct PreviewReport {
    id: String,
    width: u32,
    height: u32,
    png_base64: Option<String>,
}

fn render_report_json(
    rankings: &BTreeMap<ProblemType, Ranking>,
    benchmarks: &BenchmarkSet,
    datasets: &[DatasetRecord],
    previews: &[SamplePreview],
) -> Result<String> {
    let categories = rankings
        .iter()
        .filter_map(|(problem_type, ranking)| {
            benchmarks.get(*problem_type).map(|benchmark| CategoryReport {
                problem_type: *problem_type,
                label: problem_type.label(),
                metric: &benchmark.metric,
                sort_order: benchmark.sort_order,
                benchmark_value: benchmark.value,
                benchmark_index: ranking.benchmark_index,
                entries: &ranking.ordered,
            })
        })
        .collect();

    let report = PortalReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        categories,
        datasets,
        previews: previews
            .iter()
            .map(|preview| PreviewReport {
                id: preview.id.clone(),
                width: preview.width,
                height: preview.height,
                png_base64: preview
                    .png
                    .as_ref()
                    .map(|png| base64::engine::general_purpose::STANDARD.encode(png)),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
