//! Web UI handlers - branded user and admin dashboards
//!
//! Two views share the same startup inputs:
//! - customer config (brand name, background and button colors)
//! - optional logo, checked on every render
//!
//! Using Pico CSS (classless CSS framework) as the base, with a small
//! per-view stylesheet carrying the customer colors.

pub mod pages;

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::api::AppState;
use crate::error::Result;
use crate::store::{DateRange, PostFilter, posts_csv};

/// Posts shown in the user's history and the admin's recent activity.
pub const HISTORY_LIMIT: usize = 10;

/// Escape text for HTML element content and quoted attribute values.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Placeholder for empty data fields.
pub(crate) fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// HTML document wrapper with Pico CSS
fn html_doc(
    title: &str,
    brand: &str,
    nav_active: &str,
    styles: &str,
    content: &str,
    footer: &str,
) -> String {
    let nav = nav_html(brand, nav_active);
    let title = esc(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css">
    <style>{styles}
    </style>
</head>
<body>
    <header class="container">
        {nav}
    </header>
    <main class="container main">
        {content}
    </main>
    <footer class="container">
        {footer}
    </footer>
</body>
</html>"#
    )
}

/// Navigation HTML
fn nav_html(brand: &str, active: &str) -> String {
    let links = [("user", "Post Generator", "/"), ("admin", "Admin", "/admin")];

    let items: String = links
        .iter()
        .map(|(id, label, href)| {
            if *id == active {
                format!(
                    r#"<li><a href="{href}" aria-current="page"><strong>{label}</strong></a></li>"#
                )
            } else {
                format!(r#"<li><a href="{href}">{label}</a></li>"#)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let brand = esc(brand);
    format!(
        r#"<nav>
        <ul><li><strong>{brand}</strong></li></ul>
        <ul>{items}</ul>
    </nav>"#
    )
}

fn current_year() -> i32 {
    Local::now().year()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "All")
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub user: Option<String>,
}

/// GET / - Post generator view, with history when `?user=` is given
pub async fn user_page(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Html<String>> {
    let logo = state.logo.resolve();

    let history = match non_empty(query.user) {
        Some(user_id) => {
            let posts = state.store.user_history(&user_id, Some(HISTORY_LIMIT))?;
            Some(pages::user::History { user_id, posts })
        }
        None => None,
    };

    Ok(Html(pages::user::render(
        &state.customer,
        &logo,
        history.as_ref(),
        current_year(),
    )))
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub user: Option<String>,
    pub goal: Option<String>,
    pub range: Option<String>,
    pub post: Option<String>,
}

/// GET /admin - Admin dashboard with stats, tables and analytics
pub async fn admin_page(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Html<String>> {
    let logo = state.logo.resolve();
    let now = Local::now().naive_local();
    let today = now.date();

    let range = DateRange::from_query(query.range.as_deref());
    let filter = PostFilter {
        user_id: non_empty(query.user),
        post_goal: non_empty(query.goal),
        since: range.cutoff(now),
    };

    let all_posts = state.store.all_posts(None)?;
    let selected_post = match query.post.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(match raw.parse::<u64>() {
            Ok(id) => pages::admin::PostDetail {
                id: raw.to_string(),
                post: state.store.post(id)?,
            },
            Err(_) => pages::admin::PostDetail {
                id: raw.to_string(),
                post: None,
            },
        }),
        _ => None,
    };
    let selected_user_stats = match &filter.user_id {
        Some(user_id) => Some(state.store.stats(Some(user_id), today)?),
        None => None,
    };

    let snapshot = pages::admin::Snapshot {
        stats: state.store.stats(None, today)?,
        recent: all_posts.iter().take(HISTORY_LIMIT).cloned().collect(),
        users: state.store.all_users()?,
        user_options: pages::admin::distinct(all_posts.iter().map(|p| p.user_id.as_str())),
        goal_options: pages::admin::distinct(all_posts.iter().map(|p| p.post_goal.as_str())),
        filtered: filter.apply(all_posts),
        selected_user_stats,
        selected_post,
        filter,
        range,
        analytics: state.store.analytics()?,
    };

    Ok(Html(pages::admin::render(
        &state.customer,
        &logo,
        &snapshot,
        current_year(),
    )))
}

/// GET /admin/analytics.csv - Every post as a CSV download
pub async fn analytics_csv(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let body = posts_csv(&state.store.posts()?)?;
    let filename = format!("analytics_{}.csv", Local::now().format("%Y%m%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(r#"attachment; filename="{filename}""#),
            ),
        ],
        body,
    ))
}

pub async fn health_check() -> &'static str {
    "OK"
}
