//! Human-readable text rendering of entities.
//!
//! The output is stable plain text for terminals and logs. It is not a wire
//! format; only the JSON projection ([`Attributes::to_field_map`]) round-trips.

use crate::model::{Message, RateLimitStatus, Status, Trendline, User};
use crate::schema::Attributes;
use crate::timestamp;

/// Render one [`Status`].
///
/// ```text
/// @dougw  Tue Apr 07 22:52:51 +0000 2009
/// "At least I can get your humor through tweets. RT @abdur: I don't mean
///  this in a bad way, but genetically speaking your a cul-de-sac."
/// id: 1472669360  via TweetDeck
/// ```
pub fn render_status(status: &Status) -> String {
    let mut out = String::new();

    let author = status
        .user
        .as_ref()
        .and_then(|u| u.screen_name.as_deref())
        .map(|name| format!("@{}", name))
        .unwrap_or_else(|| "@?".into());
    out.push_str(&author);
    if let Some(created) = &status.created_at {
        out.push_str(&format!("  {}", timestamp::format(created)));
    }
    out.push('\n');

    out.push_str(&wrap_content(status.text.as_deref().unwrap_or(""), 72));
    out.push('\n');

    let mut footer = Vec::new();
    if let Some(id) = status.id {
        footer.push(format!("id: {}", id));
    }
    if let Some(parent) = status.in_reply_to_status_id {
        footer.push(format!("in reply to: {}", parent));
    }
    if let Some(source) = status.source.as_deref() {
        footer.push(format!("via {}", strip_tags(source)));
    }
    if !footer.is_empty() {
        out.push_str(&footer.join("  "));
        out.push('\n');
    }
    out
}

/// Render a [`User`] profile.
///
/// ```text
/// Jane Doe (@jdoe)  [protected]
/// Writes about compilers.
/// followers: 10  friends: 3  statuses: 120
/// ```
pub fn render_user(user: &User) -> String {
    let mut out = String::new();
    let handle = user.screen_name.as_deref().unwrap_or("?");
    match user.name.as_deref() {
        Some(name) => out.push_str(&format!("{} (@{})", name, handle)),
        None => out.push_str(&format!("@{}", handle)),
    }
    if user.protected == Some(true) {
        out.push_str("  [protected]");
    }
    if user.verified == Some(true) {
        out.push_str("  [verified]");
    }
    out.push('\n');

    if let Some(description) = user.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(description.trim());
        out.push('\n');
    }

    let counts = [
        ("followers", user.followers_count),
        ("friends", user.friends_count),
        ("statuses", user.statuses_count),
    ];
    let counts: Vec<String> = counts
        .iter()
        .filter_map(|(label, n)| n.map(|n| format!("{}: {}", label, n)))
        .collect();
    if !counts.is_empty() {
        out.push_str(&counts.join("  "));
        out.push('\n');
    }
    out
}

/// `@from → @to: text`
pub fn render_message(message: &Message) -> String {
    let from = message.sender_screen_name.as_deref().unwrap_or("?");
    let to = message.recipient_screen_name.as_deref().unwrap_or("?");
    format!(
        "@{} → @{}: {}\n",
        from,
        to,
        message.text.as_deref().unwrap_or("")
    )
}

pub fn render_rate_limit(status: &RateLimitStatus) -> String {
    let hits = match (status.remaining_hits, status.hourly_limit) {
        (Some(left), Some(limit)) => format!("{}/{} requests left", left, limit),
        (Some(left), None) => format!("{} requests left", left),
        _ => "rate limit unknown".into(),
    };
    match &status.reset_time {
        Some(reset) => format!("{}  resets {}\n", hits, timestamp::format(reset)),
        None => format!("{}\n", hits),
    }
}

/// Render a list of statuses as a one-line-per-status timeline.
///
/// ```text
/// Timeline  2 statuses
/// ────────────────────
///   @dougw  At least I can get your humor through tweets. RT @abdur: I…
///   @jdoe   hello world
/// ```
pub fn render_timeline<'a>(statuses: impl IntoIterator<Item = &'a Status>) -> String {
    let statuses: Vec<&Status> = statuses.into_iter().collect();
    let total = statuses.len();
    let header = format!("Timeline  {} status{}", total, if total == 1 { "" } else { "es" });
    let rule = "─".repeat(header.chars().count());
    let mut out = format!("{}\n{}\n", header, rule);

    let width = statuses
        .iter()
        .filter_map(|s| s.user.as_ref()?.screen_name.as_ref().map(|n| n.len() + 1))
        .max()
        .unwrap_or(2);
    for status in statuses {
        let author = status
            .user
            .as_ref()
            .and_then(|u| u.screen_name.as_deref())
            .map(|n| format!("@{}", n))
            .unwrap_or_else(|| "@?".into());
        let text = status.text.as_deref().unwrap_or("");
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            author,
            truncate(text, 72),
            width = width
        ));
    }
    out
}

/// `"#rust", "#til"` style listing of a trend snapshot.
pub fn render_trends(line: &Trendline) -> String {
    let names: Vec<&str> = line
        .trends
        .iter()
        .flatten()
        .filter_map(|t| t.name.as_deref())
        .collect();
    let mut out = match &line.as_of {
        Some(as_of) => format!("Trends as of {}\n", timestamp::format(as_of)),
        None => "Trends\n".to_string(),
    };
    for name in names {
        out.push_str(&format!("  {}\n", name));
    }
    out
}

/// Fallback for any entity: its display string.
pub fn render_entity(entity: &dyn Attributes) -> String {
    format!("{}\n", entity.to_display_string())
}

// --- helpers -----------------------------------------------------------------

fn wrap_content(content: &str, width: usize) -> String {
    if content.chars().count() <= width {
        return format!("\"{}\"", content);
    }
    let mut result = String::from("\"");
    let mut line_len = 1usize;
    for word in content.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width {
            result.push('\n');
            result.push(' ');
            line_len = 1;
        } else if line_len > 1 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }
    result.push('"');
    result
}

fn truncate(s: &str, max: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{}…", kept)
}

/// `<a href="...">TweetDeck</a>` → `TweetDeck`
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

// --- tests -------------------------------------------------------------------
