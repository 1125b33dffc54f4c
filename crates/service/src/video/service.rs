use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use super::args::{NewVideo, RawArgs, VideoPatch};
use super::repository::{Video, VideoRepository};

/// Video business service independent of web framework.
///
/// Existence is always checked before the request arguments are parsed, so a
/// create on a taken id reports `Conflict` and an update on a missing id reports
/// `NotFound` whatever the body holds.
pub struct VideoService<R: VideoRepository> {
    repo: Arc<R>,
}

impl<R: VideoRepository> VideoService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Video, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("video"))
    }

    /// Create a video under a client-chosen id.
    ///
    /// # Examples
    /// ```
    /// use service::video::{VideoService, repository::mock::InMemoryVideoRepository};
    /// use std::sync::Arc;
    /// let svc = VideoService::new(Arc::new(InMemoryVideoRepository::default()));
    /// let args = serde_json::json!({"name": "intro", "likes": 1, "views": 2});
    /// let video = tokio_test::block_on(svc.create(1, args.as_object().unwrap())).unwrap();
    /// assert_eq!(video.name, "intro");
    /// ```
    #[instrument(skip(self, args))]
    pub async fn create(&self, id: i64, args: &RawArgs) -> Result<Video, ServiceError> {
        if self.repo.find(id).await?.is_some() {
            debug!(id, "video id taken");
            return Err(ServiceError::conflict("video"));
        }
        let new = NewVideo::parse(args)?;
        let video = self.repo.insert(new.into_video(id)).await?;
        info!(id = video.id, name = %video.name, "video_created");
        Ok(video)
    }

    /// Overwrite the supplied fields of an existing video and save it.
    #[instrument(skip(self, args))]
    pub async fn update(&self, id: i64, args: &RawArgs) -> Result<Video, ServiceError> {
        let mut video = self.get(id).await?;
        let patch = VideoPatch::parse(args)?;
        if patch.is_empty() {
            debug!(id, "nothing to update");
            return Ok(video);
        }
        patch.apply_to(&mut video);
        let video = self.repo.save(&video).await?;
        info!(id = video.id, "video_updated");
        Ok(video)
    }

    /// Accepted for any id. Stored records are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        info!(id, "video_delete_accepted");
        Ok(())
    }
}
