use crate::domain::model::{BenchmarkSet, PortalSnapshot, ReportBundle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn leaderboard_endpoint(&self) -> &str;
    fn datasets_endpoint(&self) -> &str;
    fn sample_endpoint(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn preview_dimensions(&self) -> (u32, u32);
    fn benchmarks(&self) -> &BenchmarkSet;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<PortalSnapshot>;
    async fn transform(&self, snapshot: PortalSnapshot) -> Result<ReportBundle>;
    async fn load(&self, bundle: ReportBundle) -> Result<String>;
}
