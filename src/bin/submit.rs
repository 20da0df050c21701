use anyhow::Context;
use clap::{Parser, Subcommand};
use dhs_portal_data::domain::model::ProblemType;
use dhs_portal_data::submit::{DatasetUpload, SolutionSubmission};
use dhs_portal_data::utils::logger;
use std::path::Path;

#[derive(Parser)]
#[command(name = "portal-submit")]
#[command(about = "Submits datasets and solutions to the hackathon portal")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a community dataset CSV
    Dataset {
        #[arg(long, default_value = "http://3.110.207.163:3000/data")]
        endpoint: String,

        #[arg(long)]
        submitter_name: String,

        #[arg(long)]
        dataset_type: ProblemType,

        /// Path to the CSV file to upload
        #[arg(long)]
        file: String,
    },
    /// Submit a solution archive (.tar.gz / .tgz)
    Solution {
        #[arg(long)]
        endpoint: String,

        #[arg(long)]
        team_number: String,

        #[arg(long)]
        team_name: String,

        /// Full problem statement name, e.g. "Diabetic Retinopathy"
        #[arg(long)]
        problem_statement: String,

        #[arg(long)]
        used_library: String,

        /// Library name when --used-library is "Others"
        #[arg(long, default_value = "")]
        used_library_other: String,

        /// Path to the solution archive
        #[arg(long)]
        file: String,
    },
}

fn file_name_of(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let client = reqwest::Client::new();

    match args.command {
        Command::Dataset {
            endpoint,
            submitter_name,
            dataset_type,
            file,
        } => {
            let file_bytes =
                std::fs::read(&file).with_context(|| format!("reading {}", file))?;
            let upload = DatasetUpload {
                submitter_name,
                dataset_type,
                file_name: file_name_of(&file),
                file_bytes,
            };

            let response = upload
                .send(&client, &endpoint)
                .await
                .context("dataset upload failed")?;
            tracing::info!("✅ Dataset uploaded successfully");
            println!("✅ Dataset uploaded: {}", response);
        }
        Command::Solution {
            endpoint,
            team_number,
            team_name,
            problem_statement,
            used_library,
            used_library_other,
            file,
        } => {
            let file_bytes =
                std::fs::read(&file).with_context(|| format!("reading {}", file))?;
            let submission = SolutionSubmission {
                team_number,
                team_name,
                problem_statement,
                used_library,
                used_library_other,
                file_name: file_name_of(&file),
                file_bytes,
            };

            let response = submission
                .send(&client, &endpoint)
                .await
                .context("solution submission failed")?;
            tracing::info!("✅ Solution submitted successfully");
            println!("✅ Solution submitted: {}", response);
        }
    }

    Ok(())
}
