use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct VideoDoc { pub id: i64, pub name: String, pub views: i64, pub likes: i64 }

#[derive(ToSchema)]
pub struct CreateVideoDoc { pub name: String, pub likes: i64, pub views: i64 }

#[derive(ToSchema)]
pub struct UpdateVideoDoc { pub name: Option<String>, pub likes: Option<i64>, pub views: Option<i64> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::video::get,
        crate::routes::video::put,
        crate::routes::video::patch,
        crate::routes::video::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            VideoDoc,
            CreateVideoDoc,
            UpdateVideoDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "video")
    )
)]
pub struct ApiDoc;
