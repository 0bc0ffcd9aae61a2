//! Builds parameterized SELECT, UPDATE, INSERT, DELETE for the news tables.
//!
//! Values always travel as bind parameters. The only identifier interpolated
//! from a request is the sort column, and it arrives as a `SortKey` that the
//! validator built from the live allow-list.

use crate::config::VotePolicy;
use crate::models::NewComment;
use crate::service::{ArticleQuery, SortTarget};
use crate::sql::BindValue;

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<BindValue>) -> u32 {
        self.params.push(v.into());
        self.params.len() as u32
    }
}

/// Article columns as selected from `alias`. `created_at` is cast so both
/// `timestamp` and `timestamptz` schemas decode into `DateTime<Utc>`.
fn article_columns(alias: &str) -> String {
    format!(
        "{a}.article_id, {a}.title, {a}.topic, {a}.author, {a}.body, {a}.created_at::timestamptz AS created_at, {a}.votes",
        a = alias
    )
}

fn comment_columns() -> &'static str {
    "comment_id, article_id, author, body, votes, created_at::timestamptz AS created_at"
}

fn comment_count_subquery(alias: &str) -> String {
    format!(
        "(SELECT COUNT(comments.comment_id) FROM comments WHERE comments.article_id = {}.article_id) AS comment_count",
        alias
    )
}

pub fn select_topics() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = "SELECT slug, description FROM topics ORDER BY slug".into();
    q
}

pub fn select_topic_slugs() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = "SELECT slug FROM topics".into();
    q
}

/// Live column names of the articles table; the sort allow-list.
pub fn select_article_columns() -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param("articles");
    q.sql = format!(
        "SELECT column_name::text FROM information_schema.columns \
         WHERE table_schema = current_schema() AND table_name::text = ${}",
        n
    );
    q
}

/// Articles with their comment count, optionally filtered by topic, ordered by the validated key.
/// Rows tied on the sort key come back in store order.
pub fn select_articles(query: &ArticleQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match &query.topic {
        Some(topic) => {
            let n = q.push_param(topic.as_str());
            format!(" WHERE articles.topic = ${}", n)
        }
        None => String::new(),
    };
    let order_expr = match query.sort.target() {
        SortTarget::Column(col) => format!("articles.{}", quoted(col)),
        SortTarget::CommentCount => "comment_count".to_string(),
    };
    q.sql = format!(
        "SELECT {}, COUNT(comments.comment_id) AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id{} \
         GROUP BY articles.article_id ORDER BY {} {}",
        article_columns("articles"),
        where_clause,
        order_expr,
        query.order.as_sql()
    );
    q
}

pub fn select_article_by_id(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT {}, {} FROM articles WHERE articles.article_id = ${}",
        article_columns("articles"),
        comment_count_subquery("articles"),
        n
    );
    q
}

/// Single-statement vote increment returning the updated article.
pub fn update_article_votes(article_id: i32, inc_votes: i32, policy: VotePolicy) -> QueryBuf {
    let mut q = QueryBuf::new();
    let inc = q.push_param(inc_votes);
    let id = q.push_param(article_id);
    let next = match policy {
        VotePolicy::Unclamped => format!("votes + ${}", inc),
        VotePolicy::ClampAtZero => format!("GREATEST(votes + ${}, 0)", inc),
    };
    q.sql = format!(
        "WITH updated AS (UPDATE articles SET votes = {} WHERE article_id = ${} RETURNING *) \
         SELECT {}, {} FROM updated",
        next,
        id,
        article_columns("updated"),
        comment_count_subquery("updated")
    );
    q
}

pub fn select_comments_by_article(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT {} FROM comments WHERE article_id = ${} ORDER BY created_at DESC",
        comment_columns(),
        n
    );
    q
}

pub fn select_comments() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM comments ORDER BY created_at DESC", comment_columns());
    q
}

/// INSERT a comment; votes and created_at come from column defaults.
pub fn insert_comment(comment: &NewComment) -> QueryBuf {
    let mut q = QueryBuf::new();
    let article_id = q.push_param(comment.article_id);
    let author = q.push_param(comment.author.as_str());
    let body = q.push_param(comment.body.as_str());
    q.sql = format!(
        "INSERT INTO comments (article_id, author, body) VALUES (${}, ${}, ${}) RETURNING {}",
        article_id,
        author,
        body,
        comment_columns()
    );
    q
}

pub fn delete_comment(comment_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(comment_id);
    q.sql = format!(
        "DELETE FROM comments WHERE comment_id = ${} RETURNING {}",
        n,
        comment_columns()
    );
    q
}

pub fn select_users() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = "SELECT username, name, avatar_url FROM users ORDER BY username".into();
    q
}
