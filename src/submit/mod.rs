// Write path: validated multipart submissions to the portal API.

pub mod dataset_upload;
pub mod solution;

pub use dataset_upload::DatasetUpload;
pub use solution::SolutionSubmission;
