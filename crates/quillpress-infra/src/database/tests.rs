#[cfg(test)]
mod tests {
    use crate::database::PostgresPostStore;
    use crate::database::entity::post;
    use quillpress_core::domain::Post;
    use quillpress_core::ports::PostStore;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn row(id: uuid::Uuid) -> post::Model {
        post::Model {
            id,
            title: "Test Post".to_owned(),
            content: "Hello.\n\nWorld.".to_owned(),
            author: "jo".to_owned(),
            image: None,
            tags: Some(serde_json::json!(["intro"])),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn find_post_by_id_maps_the_row() {
        let id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row(id)]])
            .into_connection();

        let store = PostgresPostStore::new(Arc::new(db));

        let found: Option<Post> = store.get(id).await.unwrap();
        let post = found.expect("row should map to a record");

        assert_eq!(post.id, id);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.tags, Some(vec!["intro".to_string()]));
    }

    #[tokio::test]
    async fn get_of_unknown_id_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let store = PostgresPostStore::new(Arc::new(db));

        let found = store.get(uuid::Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_maps_every_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                row(uuid::Uuid::new_v4()),
                row(uuid::Uuid::new_v4()),
            ]])
            .into_connection();

        let store = PostgresPostStore::new(Arc::new(db));

        let posts = store.list().await.unwrap();
        assert_eq!(posts.len(), 2);
    }
}
