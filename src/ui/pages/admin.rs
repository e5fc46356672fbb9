//! Admin dashboard view.
//!
//! Everything the admin sees on one page: overall metric cards, recent
//! activity, users, a filterable post table, analytics and the current
//! branding. Editing the branding happens elsewhere.

use std::collections::BTreeSet;

use crate::asset::LogoState;
use crate::customer_config::CustomerConfig;
use crate::store::{Analytics, DateRange, Post, PostFilter, Stats, UserRecord};
use crate::ui::{esc, html_doc, or_na};

pub const ADMIN_ICON: &str = "⚙️";
const SUBTITLE: &str = "Manage users, posts, and view analytics";

const LOGO_MAX_HEIGHT_PX: u32 = 80;
const LOGO_MAX_WIDTH_PX: u32 = 150;

/// Data gathered for one admin render.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub stats: Stats,
    pub recent: Vec<Post>,
    pub users: Vec<UserRecord>,
    pub filter: PostFilter,
    pub range: DateRange,
    pub filtered: Vec<Post>,
    pub user_options: Vec<String>,
    pub goal_options: Vec<String>,
    pub selected_user_stats: Option<Stats>,
    pub selected_post: Option<PostDetail>,
    pub analytics: Analytics,
}

/// Post requested with `?post=<id>`; `post` is `None` when no post has that id.
#[derive(Clone, Debug, Default)]
pub struct PostDetail {
    pub id: String,
    pub post: Option<Post>,
}

/// Sorted, de-duplicated, non-empty values.
pub fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn render(
    config: &CustomerConfig,
    logo: &LogoState,
    snapshot: &Snapshot,
    year: i32,
) -> String {
    let sections = [
        header(config, logo),
        overview(&snapshot.stats, &snapshot.recent),
        users_section(&snapshot.users),
        posts_section(snapshot),
        snapshot.selected_post.as_ref().map(post_detail).unwrap_or_default(),
        analytics_section(&snapshot.analytics),
        configuration_section(config),
    ];

    let name = esc(&config.customer_name);
    let footer = format!(
        r#"<small>{name} - Admin Dashboard ({year})</small>"#
    );

    html_doc(
        &format!("Admin Dashboard - {}", config.customer_name),
        &config.customer_name,
        "admin",
        &styles(config),
        &sections.concat(),
        &footer,
    )
}

fn styles(config: &CustomerConfig) -> String {
    let background = esc(&config.background_color);
    let button = esc(&config.button_color);
    format!(
        r#"
        body, .main {{ background-color: {background}; }}
        button, .button {{
            background-color: {button};
            border-color: {button};
            color: white;
            border-radius: 5px;
            font-weight: 600;
        }}
        .admin-header {{
            display: flex;
            align-items: center;
            gap: 20px;
            padding: 20px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            border-radius: 10px;
            margin-bottom: 20px;
            color: white;
        }}
        .admin-header-logo {{ max-height: {LOGO_MAX_HEIGHT_PX}px; max-width: {LOGO_MAX_WIDTH_PX}px; }}
        .admin-header-text h1 {{ margin: 0; color: white; }}
        .admin-header-text p {{ margin: 5px 0 0 0; color: rgba(255,255,255,0.9); }}
        .metric-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1rem; }}
        .metric-card {{
            background: white;
            padding: 20px;
            border-radius: 10px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            border-left: 4px solid {button};
        }}
        .metric-card strong {{ display: block; font-size: 2em; }}"#
    )
}

fn header(config: &CustomerConfig, logo: &LogoState) -> String {
    let name = esc(&config.customer_name);
    let text = format!(
        r#"<div class="admin-header-text">
        <h1>{ADMIN_ICON} Admin Dashboard - {name}</h1>
        <p>{SUBTITLE}</p>
    </div>"#
    );
    match logo {
        LogoState::Present { url } => {
            let url = esc(url);
            format!(
                r#"
<div class="admin-header">
    <img class="admin-header-logo" src="{url}" alt="{name} logo" style="max-height: {LOGO_MAX_HEIGHT_PX}px; max-width: {LOGO_MAX_WIDTH_PX}px;">
    {text}
</div>
"#
            )
        }
        LogoState::Absent => format!(
            r#"
<div class="admin-header">
    {text}
</div>
"#
        ),
    }
}

fn metric_card(label: &str, value: usize) -> String {
    format!(
        r#"<article class="metric-card"><small>{label}</small><strong>{value}</strong></article>"#
    )
}

fn overview(stats: &Stats, recent: &[Post]) -> String {
    let cards = [
        metric_card("Total Users", stats.total_users.unwrap_or(0)),
        metric_card("Total Posts", stats.total_posts),
        metric_card("Posts Today", stats.posts_today),
        metric_card("Posts This Week", stats.posts_week),
    ]
    .join("\n        ");

    let activity = if recent.is_empty() {
        "<article>No recent posts</article>".to_string()
    } else {
        post_table(recent, false)
    };

    format!(
        r#"
<section id="dashboard">
    <h2>📊 Dashboard Overview</h2>
    <div class="metric-grid">
        {cards}
    </div>
    <h3>📈 Recent Activity</h3>
    {activity}
</section>
"#
    )
}

fn post_table(posts: &[Post], with_length: bool) -> String {
    let rows: String = posts
        .iter()
        .map(|p| {
            let length = if with_length {
                format!(
                    r#"<td>{}</td><td><a href="/admin?post={}#post-detail">View</a></td>"#,
                    esc(or_na(&p.post_length)),
                    p.id
                )
            } else {
                String::new()
            };
            format!(
                "\n            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{length}</tr>",
                esc(or_na(&p.date)),
                esc(or_na(&p.user_id)),
                esc(or_na(&p.topic)),
                esc(or_na(&p.post_goal)),
            )
        })
        .collect();
    let length_head = if with_length {
        "<th>Length</th><th></th>"
    } else {
        ""
    };
    format!(
        r#"<table>
        <thead><tr><th>Date</th><th>User</th><th>Topic</th><th>Goal</th>{length_head}</tr></thead>
        <tbody>{rows}
        </tbody>
    </table>"#
    )
}

fn users_section(users: &[UserRecord]) -> String {
    if users.is_empty() {
        return r#"
<section id="users">
    <h2>👥 User Management</h2>
    <article>No users found</article>
</section>
"#
        .to_string();
    }

    let active = users.iter().filter(|u| u.post_count > 0).count();
    let cards = [
        metric_card("Total Users", users.len()),
        metric_card("Active Users", active),
    ]
    .join("\n        ");
    let rows: String = users
        .iter()
        .map(|u| {
            format!(
                "\n            <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                esc(or_na(&u.user_id)),
                u.post_count,
                esc(or_na(u.last_post_date.as_deref().unwrap_or(""))),
            )
        })
        .collect();

    format!(
        r#"
<section id="users">
    <h2>👥 User Management</h2>
    <div class="metric-grid">
        {cards}
    </div>
    <table>
        <thead><tr><th>User</th><th>Posts</th><th>Last Post</th></tr></thead>
        <tbody>{rows}
        </tbody>
    </table>
</section>
"#
    )
}

fn select(name: &str, label: &str, options: &[(String, String)], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|(value, text)| {
            let mark = if value == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{mark}>{}</option>"#,
                esc(value),
                esc(text)
            )
        })
        .collect();
    format!(r#"<label>{label}<select name="{name}">{options}</select></label>"#)
}

fn with_all(values: &[String]) -> Vec<(String, String)> {
    std::iter::once(("All".to_string(), "All".to_string()))
        .chain(values.iter().map(|v| (v.clone(), v.clone())))
        .collect()
}

fn posts_section(snapshot: &Snapshot) -> String {
    let filter: &PostFilter = &snapshot.filter;
    let ranges: Vec<(String, String)> = [
        ("all", DateRange::AllTime),
        ("7", DateRange::Last7Days),
        ("30", DateRange::Last30Days),
    ]
    .iter()
    .map(|(value, range)| (value.to_string(), range.label().to_string()))
    .collect();
    let range_value = match snapshot.range {
        DateRange::AllTime => "all",
        DateRange::Last7Days => "7",
        DateRange::Last30Days => "30",
    };

    let form = format!(
        r#"<form method="get" action="/admin" class="grid">
        {}
        {}
        {}
        <button type="submit">Apply</button>
    </form>"#,
        select(
            "user",
            "Filter by User",
            &with_all(&snapshot.user_options),
            filter.user_id.as_deref().unwrap_or("All"),
        ),
        select(
            "goal",
            "Filter by Goal",
            &with_all(&snapshot.goal_options),
            filter.post_goal.as_deref().unwrap_or("All"),
        ),
        select("range", "Date Range", &ranges, range_value),
    );

    let user_stats = match (&filter.user_id, &snapshot.selected_user_stats) {
        (Some(user), Some(stats)) => format!(
            r#"
    <h3>Stats for {}</h3>
    <div class="metric-grid">
        {}
        {}
        {}
    </div>"#,
            esc(user),
            metric_card("Total Posts", stats.total_posts),
            metric_card("Posts Today", stats.posts_today),
            metric_card("Posts This Week", stats.posts_week),
        ),
        _ => String::new(),
    };

    let table = if snapshot.filtered.is_empty() {
        "<article>No posts match the filters</article>".to_string()
    } else {
        post_table(&snapshot.filtered, true)
    };

    format!(
        r#"
<section id="posts">
    <h2>📝 Post Management</h2>
    {form}{user_stats}
    <h3>Posts ({count})</h3>
    {table}
</section>
"#,
        count = snapshot.filtered.len(),
    )
}

fn post_detail(detail: &PostDetail) -> String {
    let body = match &detail.post {
        Some(post) => {
            let json = serde_json::to_string_pretty(post).unwrap_or_default();
            format!("<pre>{}</pre>", esc(&json))
        }
        None => format!("<article>No post with id {}</article>", esc(&detail.id)),
    };
    format!(
        r#"
<section id="post-detail">
    <h2>🔍 Post Details</h2>
    {body}
</section>
"#
    )
}

fn bar_rows(counts: &std::collections::BTreeMap<String, usize>) -> String {
    let max = counts.values().copied().max().unwrap_or(0);
    counts
        .iter()
        .map(|(key, count)| {
            format!(
                r#"
            <tr><td>{}</td><td>{count}</td><td><progress value="{count}" max="{max}"></progress></td></tr>"#,
                esc(key)
            )
        })
        .collect()
}

fn analytics_section(analytics: &Analytics) -> String {
    let card = |title: &str, counts: &std::collections::BTreeMap<String, usize>| {
        if counts.is_empty() {
            format!("<article><header>{title}</header>No data</article>")
        } else {
            format!(
                r#"<article>
        <header>{title}</header>
        <table>
            <tbody>{}
            </tbody>
        </table>
    </article>"#,
                bar_rows(counts)
            )
        }
    };

    format!(
        r#"
<section id="analytics">
    <h2>📊 Analytics</h2>
    <p><a href="/admin/analytics.csv" role="button" download>📥 Download Analytics CSV</a></p>
    <div class="grid">
    {}
    {}
    </div>
</section>
"#,
        card("Posts by Goal", &analytics.posts_by_goal),
        card("Posts by Length", &analytics.posts_by_length),
    )
}

fn configuration_section(config: &CustomerConfig) -> String {
    let json = serde_json::to_string_pretty(config).unwrap_or_default();
    let button = esc(&config.button_color);
    format!(
        r#"
<section id="configuration">
    <h2>{ADMIN_ICON} Configuration</h2>
    <article class="metric-card" style="border-left-color: {button};">
        <header>Current Configuration</header>
        <pre>{}</pre>
    </article>
</section>
"#,
        esc(&json)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> CustomerConfig {
        CustomerConfig {
            customer_name: "Acme".to_string(),
            background_color: "#E9F7EF".to_string(),
            button_color: "#17A2B8".to_string(),
        }
    }

    fn post(user: &str, goal: &str) -> Post {
        Post {
            user_id: user.to_string(),
            post_goal: goal.to_string(),
            topic: "AI".to_string(),
            date: "2025-03-01T09:30:00".to_string(),
            ..Default::default()
        }
    }

    fn snapshot() -> Snapshot {
        let posts = vec![post("alice", "Educate"), post("bob", "Engage")];
        let mut analytics = Analytics::default();
        analytics.posts_by_goal.insert("Educate".to_string(), 1);
        analytics.posts_by_goal.insert("Engage".to_string(), 1);
        Snapshot {
            stats: Stats {
                total_users: Some(2),
                total_posts: 2,
                posts_today: 0,
                posts_week: 1,
            },
            recent: posts.clone(),
            users: vec![
                UserRecord {
                    user_id: "alice".to_string(),
                    post_count: 1,
                    ..Default::default()
                },
                UserRecord {
                    user_id: "dave".to_string(),
                    ..Default::default()
                },
            ],
            user_options: distinct(posts.iter().map(|p| p.user_id.as_str())),
            goal_options: distinct(posts.iter().map(|p| p.post_goal.as_str())),
            filtered: posts,
            analytics,
            ..Default::default()
        }
    }

    #[test]
    fn fallback_header_has_no_image() {
        let html = render(&acme(), &LogoState::Absent, &snapshot(), 2025);
        assert!(html.contains("<h1>⚙️ Admin Dashboard - Acme</h1>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("border-left: 4px solid #17A2B8;"));
    }

    #[test]
    fn logo_header_embeds_image() {
        let logo = LogoState::Present {
            url: "/static/logo.png".to_string(),
        };
        let html = render(&acme(), &logo, &snapshot(), 2025);
        assert!(html.contains(r#"<img class="admin-header-logo" src="/static/logo.png""#));
        assert!(html.contains("max-height: 80px; max-width: 150px;"));
    }

    #[test]
    fn metric_cards_show_counts() {
        let html = render(&acme(), &LogoState::Absent, &snapshot(), 2025);
        assert!(html.contains(
            r#"<article class="metric-card"><small>Total Users</small><strong>2</strong></article>"#
        ));
        assert!(html.contains(
            r#"<article class="metric-card"><small>Posts This Week</small><strong>1</strong></article>"#
        ));
        assert!(html.contains(
            r#"<article class="metric-card"><small>Active Users</small><strong>1</strong></article>"#
        ));
    }

    #[test]
    fn filter_form_keeps_selection() {
        let mut snap = snapshot();
        snap.filter.post_goal = Some("Engage".to_string());
        snap.range = DateRange::Last30Days;
        let html = render(&acme(), &LogoState::Absent, &snap, 2025);
        assert!(html.contains(r#"<option value="Engage" selected>Engage</option>"#));
        assert!(html.contains(r#"<option value="30" selected>Last 30 Days</option>"#));
        assert!(html.contains(r#"<option value="All" selected>All</option>"#));
    }

    #[test]
    fn selected_user_stats_are_shown() {
        let mut snap = snapshot();
        snap.filter.user_id = Some("alice".to_string());
        snap.selected_user_stats = Some(Stats {
            total_users: None,
            total_posts: 1,
            posts_today: 0,
            posts_week: 0,
        });
        let html = render(&acme(), &LogoState::Absent, &snap, 2025);
        assert!(html.contains("<h3>Stats for alice</h3>"));
    }

    #[test]
    fn empty_data_renders_placeholders() {
        let html = render(&acme(), &LogoState::Absent, &Snapshot::default(), 2025);
        assert!(html.contains("No recent posts"));
        assert!(html.contains("No users found"));
        assert!(html.contains("No posts match the filters"));
        assert!(html.contains("<header>Posts by Goal</header>No data"));
    }

    #[test]
    fn configuration_is_shown_escaped() {
        let mut config = acme();
        config.customer_name = "A&B".to_string();
        let html = render(&config, &LogoState::Absent, &snapshot(), 2025);
        assert!(html.contains("&quot;customer_name&quot;: &quot;A&amp;B&quot;"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let snap = snapshot();
        assert_eq!(
            render(&acme(), &LogoState::Absent, &snap, 2025),
            render(&acme(), &LogoState::Absent, &snap, 2025)
        );
    }

    #[test]
    fn page_background_uses_customer_color() {
        let mut config = acme();
        config.background_color = "#FFF8E1".to_string();
        let html = render(&config, &LogoState::Absent, &snapshot(), 2025);
        assert!(html.contains("body, .main { background-color: #FFF8E1; }"));
    }

    #[test]
    fn analytics_links_csv_download() {
        let html = render(&acme(), &LogoState::Absent, &Snapshot::default(), 2025);
        assert!(html.contains(r#"<a href="/admin/analytics.csv" role="button" download>"#));
    }

    #[test]
    fn post_table_links_to_details() {
        let mut snap = snapshot();
        snap.filtered[1].id = 42;
        let html = render(&acme(), &LogoState::Absent, &snap, 2025);
        assert!(html.contains(r#"<a href="/admin?post=42#post-detail">View</a>"#));
        assert!(!html.contains(r#"<section id="post-detail">"#));
    }

    #[test]
    fn selected_post_is_shown_as_escaped_json() {
        let mut snap = snapshot();
        let mut selected = post("alice", "Educate");
        selected.id = 3;
        selected.generated_post = "<b>Launch</b> day".to_string();
        snap.selected_post = Some(PostDetail {
            id: "3".to_string(),
            post: Some(selected),
        });
        let html = render(&acme(), &LogoState::Absent, &snap, 2025);
        assert!(html.contains("<h2>🔍 Post Details</h2>"));
        assert!(html.contains("&quot;id&quot;: 3,"));
        assert!(html.contains("&quot;generated_post&quot;: &quot;&lt;b&gt;Launch&lt;/b&gt; day&quot;"));
    }

    #[test]
    fn unknown_post_id_is_reported() {
        let mut snap = snapshot();
        snap.selected_post = Some(PostDetail {
            id: "<x>".to_string(),
            post: None,
        });
        let html = render(&acme(), &LogoState::Absent, &snap, 2025);
        assert!(html.contains("<article>No post with id &lt;x&gt;</article>"));
    }

    #[test]
    fn distinct_sorts_and_drops_empty() {
        let values = ["bob", "", "alice", "bob"];
        assert_eq!(distinct(values.into_iter()), vec!["alice", "bob"]);
    }
}
