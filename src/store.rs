//! Read-only view over the post and user JSON files.
//!
//! Another process appends to `posts.json` and `users.json`; this crate only
//! reads them on each render. A missing file is an empty list. A malformed
//! file is an error for the render that asked for it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const POSTS_FILE: &str = "posts.json";
pub const USERS_FILE: &str = "users.json";

/// Label for posts without a goal or length.
pub const UNKNOWN: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    /// ISO-8601 local timestamp, e.g. `2025-03-01T09:30:00.123456`.
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purpose: String,
    #[serde(deserialize_with = "null_as_default")]
    pub audience: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tone_intensity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language_style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub post_length: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formatting: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cta: String,
    #[serde(deserialize_with = "null_as_default")]
    pub post_goal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub generated_post: String,
}

impl Post {
    /// Timestamp of the post; unparseable dates sort as 2000-01-01.
    pub fn timestamp(&self) -> NaiveDateTime {
        parse_timestamp(&self.date)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub post_count: usize,
    pub created_date: Option<String>,
    pub last_post_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Only set for overall stats.
    pub total_users: Option<usize>,
    pub total_posts: usize,
    pub posts_today: usize,
    pub posts_week: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Analytics {
    pub posts_by_goal: BTreeMap<String, usize>,
    pub posts_by_length: BTreeMap<String, usize>,
}

/// Date range choices of the post management table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    AllTime,
    Last7Days,
    Last30Days,
}

impl DateRange {
    /// Parse a query value: `7`, `30`, anything else is all time.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("7") => DateRange::Last7Days,
            Some("30") => DateRange::Last30Days,
            _ => DateRange::AllTime,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateRange::AllTime => "All Time",
            DateRange::Last7Days => "Last 7 Days",
            DateRange::Last30Days => "Last 30 Days",
        }
    }

    pub fn cutoff(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            DateRange::AllTime => None,
            DateRange::Last7Days => Some(now - Duration::days(7)),
            DateRange::Last30Days => Some(now - Duration::days(30)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PostFilter {
    pub user_id: Option<String>,
    pub post_goal: Option<String>,
    /// Keep posts strictly newer than this.
    pub since: Option<NaiveDateTime>,
}

impl PostFilter {
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        posts
            .into_iter()
            .filter(|p| self.user_id.as_ref().is_none_or(|u| &p.user_id == u))
            .filter(|p| self.post_goal.as_ref().is_none_or(|g| &p.post_goal == g))
            .filter(|p| self.since.is_none_or(|cutoff| p.timestamp() > cutoff))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct PostStore {
    posts_path: PathBuf,
    users_path: PathBuf,
}

impl PostStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            posts_path: data_dir.join(POSTS_FILE),
            users_path: data_dir.join(USERS_FILE),
        }
    }

    pub fn posts(&self) -> Result<Vec<Post>> {
        load_list(&self.posts_path)
    }

    pub fn users(&self) -> Result<Vec<UserRecord>> {
        load_list(&self.users_path)
    }

    /// All posts, newest first.
    pub fn all_posts(&self, limit: Option<usize>) -> Result<Vec<Post>> {
        let mut posts = self.posts()?;
        newest_first(&mut posts, limit);
        Ok(posts)
    }

    /// One user's posts, newest first.
    pub fn user_history(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts()?
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect();
        newest_first(&mut posts, limit);
        Ok(posts)
    }

    /// Users with `post_count` recomputed from the posts file.
    pub fn all_users(&self) -> Result<Vec<UserRecord>> {
        let posts = self.posts()?;
        let mut users = self.users()?;
        for user in &mut users {
            user.post_count = posts.iter().filter(|p| p.user_id == user.user_id).count();
        }
        Ok(users)
    }

    /// Counts for one user, or overall when `user_id` is `None`.
    pub fn stats(&self, user_id: Option<&str>, today: NaiveDate) -> Result<Stats> {
        let posts = self.posts()?;
        let week_ago = today - Duration::days(7);

        let selected: Vec<NaiveDate> = posts
            .iter()
            .filter(|p| user_id.is_none_or(|u| p.user_id == u))
            .map(|p| p.timestamp().date())
            .collect();

        let total_users = match user_id {
            Some(_) => None,
            None => Some(self.users()?.len()),
        };

        Ok(Stats {
            total_users,
            total_posts: selected.len(),
            posts_today: selected.iter().filter(|d| **d == today).count(),
            posts_week: selected.iter().filter(|d| **d >= week_ago).count(),
        })
    }

    /// Look up one post by id.
    pub fn post(&self, id: u64) -> Result<Option<Post>> {
        Ok(self.posts()?.into_iter().find(|p| p.id == id))
    }

    pub fn analytics(&self) -> Result<Analytics> {
        let mut analytics = Analytics::default();
        for post in self.posts()? {
            *analytics
                .posts_by_goal
                .entry(or_unknown(&post.post_goal))
                .or_default() += 1;
            *analytics
                .posts_by_length
                .entry(or_unknown(&post.post_length))
                .or_default() += 1;
        }
        Ok(analytics)
    }
}

/// Every post as CSV, one row per post with a header row, in file order.
pub fn posts_csv(posts: &[Post]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for post in posts {
        writer.serialize(post)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Csv(e.into_error().into()))
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist yet", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Fields written as `null` read like absent ones.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn newest_first(posts: &mut Vec<Post>, limit: Option<usize>) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = limit {
        posts.truncate(limit);
    }
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

fn parse_timestamp(value: &str) -> NaiveDateTime {
    let value = value.trim();
    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
        .or_else(|| value.parse::<NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
        .unwrap_or_else(epoch)
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
