//! In-memory store with the same observable semantics as `PgStore`.

use super::Store;
use crate::config::VotePolicy;
use crate::error::AppError;
use crate::models::{Article, Comment, NewComment, Topic, User};
use crate::service::{ArticleQuery, SortOrder, SortTarget};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const ARTICLE_COLUMNS: &[&str] = &["article_id", "title", "topic", "author", "body", "created_at", "votes"];

#[derive(Default)]
struct Tables {
    topics: Vec<Topic>,
    users: Vec<User>,
    /// `comment_count` on stored rows is ignored; it is recomputed on every read.
    articles: Vec<Article>,
    comments: Vec<Comment>,
    /// Highest comment id ever handed out. Never decremented, so deleted ids stay retired.
    last_comment_id: i32,
}

impl Tables {
    fn count_comments(&self, article_id: i32) -> i64 {
        self.comments.iter().filter(|c| c.article_id == article_id).count() as i64
    }

    fn with_count(&self, article: &Article) -> Article {
        Article {
            comment_count: self.count_comments(article.article_id),
            ..article.clone()
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new(topics: Vec<Topic>, users: Vec<User>, articles: Vec<Article>, comments: Vec<Comment>) -> Self {
        let last_comment_id = comments.iter().map(|c| c.comment_id).max().unwrap_or(0);
        MemoryStore {
            tables: RwLock::new(Tables {
                topics,
                users,
                articles,
                comments,
                last_comment_id,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

fn compare(a: &Article, b: &Article, target: &SortTarget) -> Ordering {
    match target {
        SortTarget::CommentCount => a.comment_count.cmp(&b.comment_count),
        SortTarget::Column(col) => match col.as_str() {
            "article_id" => a.article_id.cmp(&b.article_id),
            "title" => a.title.cmp(&b.title),
            "topic" => a.topic.cmp(&b.topic),
            "author" => a.author.cmp(&b.author),
            "body" => a.body.cmp(&b.body),
            "created_at" => a.created_at.cmp(&b.created_at),
            "votes" => a.votes.cmp(&b.votes),
            _ => Ordering::Equal,
        },
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn topics(&self) -> Result<Vec<Topic>, AppError> {
        let mut topics = self.read()?.topics.clone();
        topics.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(topics)
    }

    async fn topic_slugs(&self) -> Result<HashSet<String>, AppError> {
        Ok(self.read()?.topics.iter().map(|t| t.slug.clone()).collect())
    }

    async fn article_columns(&self) -> Result<HashSet<String>, AppError> {
        Ok(ARTICLE_COLUMNS.iter().map(|c| c.to_string()).collect())
    }

    async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, AppError> {
        let tables = self.read()?;
        let mut rows: Vec<Article> = tables
            .articles
            .iter()
            .filter(|a| query.topic.as_deref().map_or(true, |t| a.topic == t))
            .map(|a| tables.with_count(a))
            .collect();
        let target = query.sort.target();
        // Stable sort: ties keep insertion order, like heap order in the database.
        match query.order {
            SortOrder::Asc => rows.sort_by(|a, b| compare(a, b, target)),
            SortOrder::Desc => rows.sort_by(|a, b| compare(b, a, target)),
        }
        Ok(rows)
    }

    async fn article_by_id(&self, article_id: i32) -> Result<Option<Article>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .articles
            .iter()
            .find(|a| a.article_id == article_id)
            .map(|a| tables.with_count(a)))
    }

    async fn increment_votes(
        &self,
        article_id: i32,
        inc_votes: i32,
        policy: VotePolicy,
    ) -> Result<Option<Article>, AppError> {
        let mut tables = self.write()?;
        let Some(article) = tables.articles.iter_mut().find(|a| a.article_id == article_id) else {
            return Ok(None);
        };
        article.votes = policy
            .apply(article.votes, inc_votes)
            .ok_or_else(|| AppError::Internal("votes out of range".into()))?;
        let updated = article.clone();
        Ok(Some(tables.with_count(&updated)))
    }

    async fn comments_for_article(&self, article_id: i32) -> Result<Vec<Comment>, AppError> {
        let mut rows: Vec<Comment> = self
            .read()?
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn comments(&self) -> Result<Vec<Comment>, AppError> {
        let mut rows = self.read()?.comments.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let mut tables = self.write()?;
        if !tables.articles.iter().any(|a| a.article_id == comment.article_id) {
            return Err(AppError::not_found("Article Not Found"));
        }
        if !tables.users.iter().any(|u| u.username == comment.author) {
            return Err(AppError::not_found("user not found"));
        }
        tables.last_comment_id += 1;
        let row = Comment {
            comment_id: tables.last_comment_id,
            article_id: comment.article_id,
            author: comment.author.clone(),
            body: comment.body.clone(),
            votes: 0,
            created_at: Utc::now(),
        };
        tables.comments.push(row.clone());
        Ok(row)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<Option<Comment>, AppError> {
        let mut tables = self.write()?;
        let pos = tables.comments.iter().position(|c| c.comment_id == comment_id);
        Ok(pos.map(|i| tables.comments.remove(i)))
    }

    async fn users(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.read()?.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
