//! Fixture data and a seeded in-memory store for tests.
//!
//! Shape of the data the API tests rely on: three topics (`paper` has no
//! articles), four users, thirteen articles (only article 5 is about `cats`,
//! article 1 has 100 votes and eleven comments, article 11 has none) and
//! eighteen comments.

use crate::models::{Article, Comment, Topic, User};
use crate::store::MemoryStore;
use chrono::{DateTime, Utc};

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

pub fn topics() -> Vec<Topic> {
    [
        ("mitch", "The man, the Mitch, the legend"),
        ("cats", "Not dogs"),
        ("paper", "what books are made of"),
    ]
    .into_iter()
    .map(|(slug, description)| Topic {
        slug: slug.into(),
        description: description.into(),
    })
    .collect()
}

pub fn users() -> Vec<User> {
    [
        ("butter_bridge", "jonny", "https://example.com/avatars/butter_bridge.jpg"),
        ("icellusedkars", "sam", "https://example.com/avatars/icellusedkars.jpg"),
        ("rogersop", "paul", "https://example.com/avatars/rogersop.jpg"),
        ("lurker", "do_nothing", "https://example.com/avatars/lurker.jpg"),
    ]
    .into_iter()
    .map(|(username, name, avatar_url)| User {
        username: username.into(),
        name: name.into(),
        avatar_url: avatar_url.into(),
    })
    .collect()
}

pub fn articles() -> Vec<Article> {
    let rows: [(&str, &str, &str, i64, i32); 13] = [
        ("Living in the shadow of a great man", "mitch", "butter_bridge", 1_594_329_060_000, 100),
        ("Sony Vaio; or, The Laptop", "mitch", "icellusedkars", 1_602_828_180_000, 0),
        ("Eight pug gifs that remind me of mitch", "mitch", "icellusedkars", 1_604_394_720_000, 0),
        ("Student SUES Mitch!", "mitch", "rogersop", 1_588_731_240_000, 0),
        ("UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop", 1_596_464_040_000, 0),
        ("A", "mitch", "icellusedkars", 1_602_986_000_000, 0),
        ("Z", "mitch", "icellusedkars", 1_578_406_080_000, 0),
        ("Does Mitch predate civilisation?", "mitch", "icellusedkars", 1_587_089_280_000, 0),
        ("They're not exactly dogs, are they?", "mitch", "butter_bridge", 1_591_438_200_000, 0),
        ("Seven inspirational thought leaders from Manchester UK", "mitch", "rogersop", 1_589_433_300_000, 0),
        ("Am I a cat?", "mitch", "icellusedkars", 1_579_126_860_000, 0),
        ("Moustache", "mitch", "butter_bridge", 1_602_419_040_000, 0),
        ("Another article about Mitch", "mitch", "butter_bridge", 1_602_419_100_000, 0),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (title, topic, author, created, votes))| {
            let article_id = i as i32 + 1;
            Article {
                article_id,
                title: title.into(),
                topic: topic.into(),
                author: author.into(),
                body: format!("{} - body", title),
                created_at: at(created),
                votes,
                comment_count: 0,
            }
        })
        .collect()
}

pub fn comments() -> Vec<Comment> {
    let rows: [(i32, &str, i32, i64); 18] = [
        (9, "butter_bridge", 16, 1_586_179_020_000),
        (1, "butter_bridge", 14, 1_604_113_380_000),
        (1, "icellusedkars", 100, 1_583_025_180_000),
        (1, "icellusedkars", -100, 1_582_459_260_000),
        (1, "icellusedkars", 0, 1_579_126_860_000),
        (1, "icellusedkars", 0, 1_577_890_980_000),
        (1, "icellusedkars", 0, 1_577_848_080_000),
        (1, "icellusedkars", 0, 1_574_986_380_000),
        (1, "icellusedkars", 0, 1_569_750_660_000),
        (1, "icellusedkars", 0, 1_555_812_600_000),
        (5, "icellusedkars", 0, 1_591_438_200_000),
        (3, "icellusedkars", 0, 1_600_560_600_000),
        (1, "icellusedkars", 0, 1_583_133_000_000),
        (1, "butter_bridge", 0, 1_594_328_400_000),
        (5, "icellusedkars", 16, 1_591_438_260_000),
        (6, "butter_bridge", 1, 1_602_433_380_000),
        (9, "icellusedkars", 20, 1_583_237_640_000),
        (3, "butter_bridge", 6, 1_601_856_420_000),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (article_id, author, votes, created))| Comment {
            comment_id: i as i32 + 1,
            article_id,
            author: author.into(),
            body: format!("comment {} on article {}", i + 1, article_id),
            votes,
            created_at: at(created),
        })
        .collect()
}

/// A fresh store holding the fixture data. Each call is independent.
pub fn fixture_store() -> MemoryStore {
    MemoryStore::new(topics(), users(), articles(), comments())
}
