use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::monitor::SystemMonitor;

pub struct PortalEngine<P: Pipeline> {
    pipeline: P,
    #[cfg(feature = "cli")]
    monitor: Option<SystemMonitor>,
}

impl<P: Pipeline> PortalEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            #[cfg(feature = "cli")]
            monitor: None,
        }
    }

    #[cfg(feature = "cli")]
    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: if enabled {
                Some(SystemMonitor::new(true))
            } else {
                None
            },
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting portal data run...");

        tracing::info!("Fetching portal data...");
        let snapshot = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} leaderboard entries and {} datasets",
            snapshot.entries.len(),
            snapshot.datasets.len()
        );
        self.log_phase_stats("Extract");

        tracing::info!("Ranking and rendering...");
        let bundle = self.pipeline.transform(snapshot).await?;
        tracing::info!(
            "Ranked {} categories, rendered {} previews",
            bundle.rankings.len(),
            bundle.previews.len()
        );
        self.log_phase_stats("Transform");

        tracing::info!("Writing reports...");
        let output_path = self.pipeline.load(bundle).await?;
        tracing::info!("Reports saved to: {}", output_path);
        self.log_phase_stats("Load");

        #[cfg(feature = "cli")]
        if let Some(monitor) = &self.monitor {
            monitor.log_final_stats();
        }

        Ok(output_path)
    }

    fn log_phase_stats(&self, phase: &str) {
        #[cfg(feature = "cli")]
        if let Some(monitor) = &self.monitor {
            monitor.log_stats(phase);
        }
        #[cfg(not(feature = "cli"))]
        let _ = phase;
    }
}
