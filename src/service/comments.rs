//! Comment listing and deletion.

use crate::error::AppError;
use crate::models::Comment;
use crate::service::guard::parse_comment_id;
use crate::store::Store;

pub struct CommentService;

impl CommentService {
    pub async fn list(store: &dyn Store) -> Result<Vec<Comment>, AppError> {
        store.comments().await
    }

    /// Delete by id. Zero rows deleted is a 404; the deleted row is not returned to clients.
    pub async fn remove(store: &dyn Store, raw_id: &str) -> Result<(), AppError> {
        let comment_id = parse_comment_id(raw_id)?;
        match store.delete_comment(comment_id).await? {
            Some(deleted) => {
                tracing::info!(comment_id, article_id = deleted.article_id, "comment deleted");
                Ok(())
            }
            None => Err(AppError::not_found("comment not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_store;

    #[tokio::test]
    async fn delete_twice_is_not_found_the_second_time() {
        let store = fixture_store();
        CommentService::remove(&store, "1").await.unwrap();
        let err = CommentService::remove(&store, "1").await.unwrap_err();
        assert_eq!(err.client_message(), "404 comment not found");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = fixture_store();
        let comments = CommentService::list(&store).await.unwrap();
        assert_eq!(comments.len(), 18);
        assert!(comments.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
