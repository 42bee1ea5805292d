//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quillpress_core::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from the row shape to the domain record.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author,
            image: model.image,
            tags: model.tags.and_then(decode_tags),
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from the domain record to a fully-set ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author: Set(post.author),
            image: Set(post.image),
            tags: Set(post.tags.map(encode_tags)),
            created_at: Set(post.created_at.into()),
        }
    }
}

fn decode_tags(value: Json) -> Option<Vec<String>> {
    serde_json::from_value(value).ok()
}

fn encode_tags(tags: Vec<String>) -> Json {
    Json::Array(tags.into_iter().map(Json::String).collect())
}
