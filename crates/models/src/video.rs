use sea_orm::{entity::prelude::*, ActiveValue::Unchanged, DatabaseConnection, Set, SqlErr};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Column width of `name`.
pub const NAME_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub views: i64,
    pub likes: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("video has no relations") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name must be at most {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

fn db_error(e: DbErr) -> errors::ModelError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => errors::ModelError::Conflict("video".into()),
        _ => errors::ModelError::Db(e.to_string()),
    }
}

pub async fn find(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(db_error)
}

pub async fn create(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    views: i64,
    likes: i64,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        views: Set(views),
        likes: Set(likes),
    };
    am.insert(db).await.map_err(db_error)
}

/// Write every column of `video` to the row with the same id.
pub async fn save(db: &DatabaseConnection, video: &Model) -> Result<Model, errors::ModelError> {
    validate_name(&video.name)?;
    let am = ActiveModel {
        id: Unchanged(video.id),
        name: Set(video.name.clone()),
        views: Set(video.views),
        likes: Set(video.likes),
    };
    am.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => errors::ModelError::NotFound("video".into()),
        e => db_error(e),
    })
}
