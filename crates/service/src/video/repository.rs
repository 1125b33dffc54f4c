use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

pub type Video = models::video::Model;

/// Persistence seam for video records. Writes are explicit: callers mutate a
/// `Video` value and hand it back through [`VideoRepository::save`].
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Video>, ServiceError>;
    /// Insert a new row. `Conflict` if the id is taken.
    async fn insert(&self, video: Video) -> Result<Video, ServiceError>;
    /// Overwrite the stored row with the same id. `NotFound` if there is none.
    async fn save(&self, video: &Video) -> Result<Video, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmVideoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmVideoRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl VideoRepository for SeaOrmVideoRepository {
    async fn find(&self, id: i64) -> Result<Option<Video>, ServiceError> {
        Ok(models::video::find(&self.db, id).await?)
    }

    async fn insert(&self, video: Video) -> Result<Video, ServiceError> {
        Ok(models::video::create(&self.db, video.id, &video.name, video.views, video.likes).await?)
    }

    async fn save(&self, video: &Video) -> Result<Video, ServiceError> {
        Ok(models::video::save(&self.db, video).await?)
    }
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryVideoRepository {
        videos: Mutex<HashMap<i64, Video>>,
    }

    impl InMemoryVideoRepository {
        pub async fn count(&self) -> usize {
            self.videos.lock().await.len()
        }
    }

    #[async_trait]
    impl VideoRepository for InMemoryVideoRepository {
        async fn find(&self, id: i64) -> Result<Option<Video>, ServiceError> {
            Ok(self.videos.lock().await.get(&id).cloned())
        }

        async fn insert(&self, video: Video) -> Result<Video, ServiceError> {
            let mut videos = self.videos.lock().await;
            if videos.contains_key(&video.id) {
                return Err(ServiceError::conflict("video"));
            }
            videos.insert(video.id, video.clone());
            Ok(video)
        }

        async fn save(&self, video: &Video) -> Result<Video, ServiceError> {
            let mut videos = self.videos.lock().await;
            match videos.get_mut(&video.id) {
                Some(slot) => {
                    *slot = video.clone();
                    Ok(video.clone())
                }
                None => Err(ServiceError::not_found("video")),
            }
        }
    }
}
