//! Post generator view.
//!
//! Shows:
//! - Brand header (logo, or emoji heading when no logo exists)
//! - Step-by-step instructions and a support contact
//! - Post history cards for one user
//! - Copyright footer

use crate::asset::LogoState;
use crate::customer_config::CustomerConfig;
use crate::store::Post;
use crate::ui::{esc, html_doc, or_na};

pub const APP_TITLE: &str = "LinkedIn Post Generator";
pub const FALLBACK_ICON: &str = "💼";
pub const SUPPORT_EMAIL: &str = "shermeshtc@gmail.com";

const LOGO_MAX_HEIGHT_PX: u32 = 100;
const LOGO_MAX_WIDTH_PX: u32 = 200;

const INSTRUCTIONS: [&str; 11] = [
    "<strong>Enter the topic</strong> of your LinkedIn post (what you want to write about)",
    "<strong>Specify the purpose</strong> - what do you want to achieve with this post?",
    "<strong>Select your target audience</strong> from the dropdown menu",
    "<strong>Enter the key message</strong> - the main point you want to convey",
    "<strong>Choose the tone intensity</strong> - how strong should the tone be?",
    "<strong>Select the language style</strong> - professional, casual, technical, etc.",
    "<strong>Pick the post length</strong> - from very short to very long",
    "<strong>Choose the formatting style</strong> - bullet points, paragraphs, numbered lists, etc.",
    "<strong>Optional:</strong> Add a call-to-action to encourage engagement",
    "<strong>Select the post goal</strong> - educate, engage, promote, inspire, etc.",
    "<strong>Click \"Generate Post\"</strong> and your AI-powered LinkedIn post will be created!",
];

/// One user's recent posts, newest first.
#[derive(Clone, Debug)]
pub struct History {
    pub user_id: String,
    pub posts: Vec<Post>,
}

pub fn render(
    config: &CustomerConfig,
    logo: &LogoState,
    history: Option<&History>,
    year: i32,
) -> String {
    let mut content = header(config, logo);
    content.push_str(&instructions(config));
    if let Some(history) = history {
        content.push_str(&history_section(history));
    }

    let name = esc(&config.customer_name);
    let footer = format!(
        r#"<div style="text-align: center; color: #666;">© {year} {name} - {APP_TITLE}</div>"#
    );

    html_doc(
        &format!("{} - {APP_TITLE}", config.customer_name),
        &config.customer_name,
        "user",
        &styles(config),
        &content,
        &footer,
    )
}

fn styles(config: &CustomerConfig) -> String {
    let background = esc(&config.background_color);
    let button = esc(&config.button_color);
    let hover = esc(&config.button_hover_color());
    format!(
        r#"
        body, .main {{ background-color: {background}; }}
        button, .button {{
            background-color: {button};
            border-color: {button};
            color: white;
            border-radius: 5px;
            font-weight: 600;
            transition: all 0.3s ease;
        }}
        button:hover, .button:hover {{
            background-color: {hover};
            transform: translateY(-2px);
            box-shadow: 0 4px 8px rgba(0,0,0,0.2);
        }}
        .post-container {{
            background-color: white;
            padding: 20px;
            border-radius: 10px;
            border: 2px solid #ddd;
            margin-top: 20px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .header-container {{
            display: flex;
            align-items: center;
            justify-content: center;
            gap: 20px;
            margin-bottom: 30px;
            padding: 20px;
            background: white;
            border-radius: 10px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }}
        .header-logo {{ max-height: {LOGO_MAX_HEIGHT_PX}px; max-width: {LOGO_MAX_WIDTH_PX}px; }}
        .header-text {{ text-align: center; }}
        .header-text h1 {{ margin: 0; color: #333; font-size: 2.5em; }}
        .header-text h2 {{ margin: 5px 0 0 0; color: #666; font-size: 1.3em; font-weight: 400; }}
        .instructions-box {{
            background: linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%);
            padding: 20px;
            border-radius: 10px;
            margin-bottom: 20px;
            border-left: 4px solid {button};
        }}
        .instructions-box h3 {{ color: {button}; margin-top: 0; }}
        .instructions-box li {{ margin: 8px 0; color: #555; }}"#
    )
}

/// Brand header: logo beside the name, or the emoji heading.
pub fn header(config: &CustomerConfig, logo: &LogoState) -> String {
    let name = esc(&config.customer_name);
    match logo {
        LogoState::Present { url } => {
            let url = esc(url);
            format!(
                r#"
<div class="header-container">
    <img class="header-logo" src="{url}" alt="{name} logo" style="max-height: {LOGO_MAX_HEIGHT_PX}px; max-width: {LOGO_MAX_WIDTH_PX}px;">
    <div class="header-text">
        <h1>{name}</h1>
        <h2>{APP_TITLE}</h2>
    </div>
</div>
"#
            )
        }
        LogoState::Absent => format!(
            r#"
<div class="header-container">
    <div class="header-text">
        <h1>{FALLBACK_ICON} {name}</h1>
        <h2>{APP_TITLE}</h2>
    </div>
</div>
"#
        ),
    }
}

fn instructions(config: &CustomerConfig) -> String {
    let button = esc(&config.button_color);
    let steps: String = INSTRUCTIONS
        .iter()
        .map(|step| format!("\n                <li>{step}</li>"))
        .collect();
    format!(
        r#"
<details>
    <summary>📖 How to Use - Step-by-Step Instructions</summary>
    <div class="instructions-box" style="border-left-color: {button};">
        <h3>Getting Started</h3>
        <ol>{steps}
        </ol>
    </div>
    <div style="text-align: center; margin-top: 20px;">
        <a href="mailto:{SUPPORT_EMAIL}" style="background-color: {button}; color: white; padding: 10px 20px; border-radius: 5px; text-decoration: none; display: inline-block; font-weight: 600;">
            📧 Contact Support
        </a>
    </div>
</details>
"#
    )
}

fn history_section(history: &History) -> String {
    let user = esc(&history.user_id);
    if history.posts.is_empty() {
        return format!(
            r#"
<section id="history">
    <h2>📜 Post History</h2>
    <article>No post history found for <strong>{user}</strong>.</article>
</section>
"#
        );
    }

    let cards: String = history
        .posts
        .iter()
        .enumerate()
        .map(|(idx, post)| post_card(idx + 1, post))
        .collect();
    format!(
        r#"
<section id="history">
    <h2>📜 Post History</h2>
    <p><small>Logged in as: <strong>{user}</strong></small></p>
    {cards}
</section>
"#
    )
}

fn post_card(number: usize, post: &Post) -> String {
    let topic = esc(or_na(&post.topic));
    let date = esc(or_na(&post.date));
    let purpose = esc(or_na(&post.purpose));
    let body = esc(or_na(&post.generated_post));
    format!(
        r#"
    <details class="post-container">
        <summary>Post #{number} - {topic} ({date})</summary>
        <p><strong>Topic:</strong> {topic}</p>
        <p><strong>Purpose:</strong> {purpose}</p>
        <p><strong>Generated Post:</strong></p>
        <p style="white-space: pre-wrap; font-size: 16px;">{body}</p>
    </details>"#
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

    fn logo() -> LogoState {
        LogoState::Present {
            url: "/static/logo.png".to_string(),
        }
    }

    #[test]
    fn fallback_header_without_logo() {
        let html = render(&acme(), &LogoState::Absent, None, 2025);
        assert!(html.contains("<h1>💼 Acme</h1>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("/static/logo.png"));
        assert!(html.contains("background-color: #E9F7EF;"));
        assert!(html.contains("background-color: #17A2B8;"));
        assert!(html.contains("© 2025 Acme - LinkedIn Post Generator"));
    }

    #[test]
    fn logo_header_replaces_emoji() {
        let html = render(&acme(), &logo(), None, 2025);
        assert!(html.contains(r#"<img class="header-logo" src="/static/logo.png""#));
        assert!(html.contains("max-height: 100px; max-width: 200px;"));
        assert!(html.contains("<h1>Acme</h1>"));
        assert!(!html.contains(FALLBACK_ICON));
        assert!(html.contains("background-color: #E9F7EF;"));
        assert!(html.contains("background-color: #17A2B8;"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let history = History {
            user_id: "alice".to_string(),
            posts: vec![Post {
                topic: "AI".to_string(),
                ..Default::default()
            }],
        };
        let first = render(&acme(), &logo(), Some(&history), 2025);
        let second = render(&acme(), &logo(), Some(&history), 2025);
        assert_eq!(first, second);
    }

    #[test]
    fn customer_name_is_escaped() {
        let mut config = acme();
        config.customer_name = "<b>Acme & Co</b>".to_string();
        let html = render(&config, &LogoState::Absent, None, 2025);
        assert!(html.contains("💼 &lt;b&gt;Acme &amp; Co&lt;/b&gt;"));
        assert!(!html.contains("<b>Acme"));
    }

    #[test]
    fn history_cards_and_empty_note() {
        let history = History {
            user_id: "alice".to_string(),
            posts: vec![Post {
                topic: "AI in Healthcare".to_string(),
                date: "2025-03-01T09:30:00".to_string(),
                generated_post: "Line one\nLine two".to_string(),
                ..Default::default()
            }],
        };
        let html = render(&acme(), &LogoState::Absent, Some(&history), 2025);
        assert!(html.contains("Post #1 - AI in Healthcare (2025-03-01T09:30:00)"));
        assert!(html.contains("<strong>Purpose:</strong> N/A"));
        assert!(html.contains("Line one\nLine two"));

        let empty = History {
            user_id: "bob".to_string(),
            posts: Vec::new(),
        };
        let html = render(&acme(), &LogoState::Absent, Some(&empty), 2025);
        assert!(html.contains("No post history found for <strong>bob</strong>."));
    }

    #[test]
    fn instructions_list_every_step() {
        let html = render(&acme(), &LogoState::Absent, None, 2025);
        let start = html.find("<ol>").unwrap();
        let end = html.find("</ol>").unwrap();
        assert_eq!(html[start..end].matches("<li>").count(), INSTRUCTIONS.len());
        assert!(html.contains("mailto:shermeshtc@gmail.com"));
    }
}
