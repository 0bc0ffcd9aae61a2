//! `PgStore` against a live PostgreSQL server.
//!
//! Set `TEST_DATABASE_URL` to run these. Each test seeds the fixture data into
//! its own schema and drops it afterwards; without the variable the tests skip.

use news_api::models::{Article, NewComment};
use news_api::service::ArticleListParams;
use news_api::test_support::{articles, comments, topics, users};
use news_api::{ArticleService, CommentService, PgStore, Store, VotePolicy};
use serde_json::json;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SCHEMA: AtomicUsize = AtomicUsize::new(0);

const SCHEMA_DDL: &str = "
CREATE TABLE topics (
    slug VARCHAR PRIMARY KEY,
    description VARCHAR NOT NULL
);
CREATE TABLE users (
    username VARCHAR PRIMARY KEY,
    name VARCHAR NOT NULL,
    avatar_url VARCHAR NOT NULL
);
CREATE TABLE articles (
    article_id SERIAL PRIMARY KEY,
    title VARCHAR NOT NULL,
    topic VARCHAR NOT NULL REFERENCES topics(slug),
    author VARCHAR NOT NULL REFERENCES users(username),
    body VARCHAR NOT NULL,
    created_at TIMESTAMP DEFAULT NOW(),
    votes INT NOT NULL DEFAULT 0
);
CREATE TABLE comments (
    comment_id SERIAL PRIMARY KEY,
    body VARCHAR NOT NULL,
    article_id INT NOT NULL REFERENCES articles(article_id),
    author VARCHAR NOT NULL REFERENCES users(username),
    votes INT NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT NOW()
);
";

struct TestDb {
    admin: PgPool,
    schema: String,
    store: PgStore,
}

impl TestDb {
    async fn drop_schema(self) {
        self.store.pool().close().await;
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .unwrap();
    }
}

/// Fresh schema holding the fixture rows, or `None` when no server is configured.
async fn seeded_db() -> Option<TestDb> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("SKIP-TEST-DATABASE: TEST_DATABASE_URL is not set");
        return None;
    };
    let schema = format!(
        "news_test_{}_{}",
        std::process::id(),
        NEXT_SCHEMA.fetch_add(1, Ordering::SeqCst)
    );

    let admin = PgPoolOptions::new().max_connections(1).connect(&url).await.unwrap();
    sqlx::query(&format!("CREATE SCHEMA \"{}\"", schema))
        .execute(&admin)
        .await
        .unwrap();

    let opts = PgConnectOptions::from_str(&url)
        .unwrap()
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new().max_connections(2).connect_with(opts).await.unwrap();
    let store = PgStore::new(pool);
    seed(store.pool()).await;
    Some(TestDb { admin, schema, store })
}

async fn seed(pool: &PgPool) {
    sqlx::raw_sql(SCHEMA_DDL).execute(pool).await.unwrap();
    for t in topics() {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(&t.slug)
            .bind(&t.description)
            .execute(pool)
            .await
            .unwrap();
    }
    for u in users() {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(&u.username)
            .bind(&u.name)
            .bind(&u.avatar_url)
            .execute(pool)
            .await
            .unwrap();
    }
    for a in articles() {
        sqlx::query(
            "INSERT INTO articles (article_id, title, topic, author, body, created_at, votes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(a.article_id)
        .bind(&a.title)
        .bind(&a.topic)
        .bind(&a.author)
        .bind(&a.body)
        .bind(a.created_at)
        .bind(a.votes)
        .execute(pool)
        .await
        .unwrap();
    }
    for c in comments() {
        sqlx::query(
            "INSERT INTO comments (comment_id, body, article_id, author, votes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(c.comment_id)
        .bind(&c.body)
        .bind(c.article_id)
        .bind(&c.author)
        .bind(c.votes)
        .bind(c.created_at)
        .execute(pool)
        .await
        .unwrap();
    }
    sqlx::raw_sql(
        "SELECT setval(pg_get_serial_sequence('articles', 'article_id'), (SELECT MAX(article_id) FROM articles)); \
         SELECT setval(pg_get_serial_sequence('comments', 'comment_id'), (SELECT MAX(comment_id) FROM comments));",
    )
    .execute(pool)
    .await
    .unwrap();
}

fn params(topic: Option<&str>, sort_by: Option<&str>, order: Option<&str>) -> ArticleListParams {
    ArticleListParams {
        topic: topic.map(String::from),
        sort_by: sort_by.map(String::from),
        order: order.map(String::from),
    }
}

fn ids(rows: &[Article]) -> Vec<i32> {
    rows.iter().map(|a| a.article_id).collect()
}

#[tokio::test]
async fn article_listing_joins_counts_and_honours_filters() {
    let Some(db) = seeded_db().await else { return };
    let store = &db.store;

    let rows = ArticleService::list(store, &params(None, None, None)).await.unwrap();
    assert_eq!(rows.len(), 13);
    assert_eq!(rows[0].article_id, 3);
    let first = rows.iter().find(|a| a.article_id == 1).unwrap();
    assert_eq!(first.comment_count, 11);
    assert_eq!(first.created_at, articles()[0].created_at);

    let cats = ArticleService::list(store, &params(Some("cats"), None, None)).await.unwrap();
    assert_eq!(ids(&cats), vec![5]);
    assert_eq!(cats[0].comment_count, 2);

    let paper = ArticleService::list(store, &params(Some("paper"), None, None)).await.unwrap();
    assert!(paper.is_empty());

    let by_votes = ArticleService::list(store, &params(None, Some("votes"), Some("asc"))).await.unwrap();
    assert_eq!(by_votes.last().map(|a| a.article_id), Some(1));

    let by_title = ArticleService::list(store, &params(Some("mitch"), Some("title"), Some("ASC"))).await.unwrap();
    assert_eq!(by_title.first().map(|a| a.title.as_str()), Some("A"));
    assert_eq!(by_title.last().map(|a| a.title.as_str()), Some("Z"));

    let busiest = ArticleService::list(store, &params(None, Some("comment_count"), None)).await.unwrap();
    assert_eq!(busiest[0].article_id, 1);

    let err = ArticleService::list(store, &params(None, Some("popularity"), None)).await.unwrap_err();
    assert_eq!(err.client_message(), "400 Bad Request - invalid query given");
    let err = ArticleService::list(store, &params(Some("dogs"), None, None)).await.unwrap_err();
    assert_eq!(err.client_message(), "404 no resources found");

    db.drop_schema().await;
}

#[tokio::test]
async fn column_allow_list_reads_the_live_table() {
    let Some(db) = seeded_db().await else { return };
    let columns = db.store.article_columns().await.unwrap();
    for col in ["article_id", "title", "topic", "author", "body", "created_at", "votes"] {
        assert!(columns.contains(col), "missing {col}");
    }
    assert_eq!(columns.len(), 7);
    db.drop_schema().await;
}

#[tokio::test]
async fn vote_updates_follow_the_policy() {
    let Some(db) = seeded_db().await else { return };
    let store = &db.store;

    let article = ArticleService::patch_votes(store, VotePolicy::Unclamped, "1", &json!({ "inc_votes": 1 }))
        .await
        .unwrap();
    assert_eq!(article.votes, 101);
    assert_eq!(article.comment_count, 11);

    let article = ArticleService::patch_votes(store, VotePolicy::Unclamped, "2", &json!({ "inc_votes": -5 }))
        .await
        .unwrap();
    assert_eq!(article.votes, -5);

    let article = ArticleService::patch_votes(store, VotePolicy::ClampAtZero, "4", &json!({ "inc_votes": -5 }))
        .await
        .unwrap();
    assert_eq!(article.votes, 0);

    assert!(store.increment_votes(9999, 1, VotePolicy::Unclamped).await.unwrap().is_none());
    db.drop_schema().await;
}

#[tokio::test]
async fn comments_insert_with_defaults_and_map_broken_references() {
    let Some(db) = seeded_db().await else { return };
    let store = &db.store;

    let created = ArticleService::add_comment(store, "2", &json!({ "username": "lurker", "body": "hi" }))
        .await
        .unwrap();
    assert_eq!(created.comment_id, 19);
    assert_eq!(created.article_id, 2);
    assert_eq!(created.votes, 0);
    assert_eq!(ArticleService::get(store, "2").await.unwrap().comment_count, 1);

    let err = ArticleService::add_comment(store, "2", &json!({ "username": "nobody", "body": "hi" }))
        .await
        .unwrap_err();
    assert_eq!(err.client_message(), "404 user not found");

    let orphan = NewComment {
        article_id: 9999,
        author: "lurker".into(),
        body: "into the void".into(),
    };
    let err = store.insert_comment(&orphan).await.unwrap_err();
    assert_eq!(err.client_message(), "404 Article Not Found");

    db.drop_schema().await;
}

#[tokio::test]
async fn deleted_comments_stay_gone() {
    let Some(db) = seeded_db().await else { return };
    let store = &db.store;

    CommentService::remove(store, "18").await.unwrap();
    let err = CommentService::remove(store, "18").await.unwrap_err();
    assert_eq!(err.client_message(), "404 comment not found");

    let created = ArticleService::add_comment(store, "3", &json!({ "username": "rogersop", "body": "again" }))
        .await
        .unwrap();
    assert_ne!(created.comment_id, 18);

    let on_nine = ArticleService::comments(store, "9").await.unwrap();
    let ids: Vec<i32> = on_nine.iter().map(|c| c.comment_id).collect();
    assert_eq!(ids, vec![1, 17]);

    db.drop_schema().await;
}

#[tokio::test]
async fn reference_tables_and_ping() {
    let Some(db) = seeded_db().await else { return };
    let store = &db.store;

    let slugs: Vec<String> = store.topics().await.unwrap().into_iter().map(|t| t.slug).collect();
    assert_eq!(slugs, vec!["cats", "mitch", "paper"]);
    assert_eq!(store.users().await.unwrap().len(), 4);
    assert_eq!(store.comments().await.unwrap().len(), 18);
    store.ping().await.unwrap();

    db.drop_schema().await;
}
