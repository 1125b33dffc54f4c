//! Video resource: argument parsing, persistence seam and the service itself.

pub mod args;
pub mod repository;
pub mod service;

pub use repository::{SeaOrmVideoRepository, Video, VideoRepository};
pub use service::VideoService;
