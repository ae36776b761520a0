//! Display derivations for the dashboard header: the four stat cards and the
//! identity badge.

use serde::Serialize;

use crate::snapshot::{AnalyticsSnapshot, UserProfile};

/// One headline figure on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: Option<String>,
}

/// Derives the four stat cards shown above the project list.
///
/// "Published Posts" falls back to the published project count when no
/// social-media posts have been reported yet.
#[must_use]
pub fn stat_cards(snapshot: &AnalyticsSnapshot) -> [StatCard; 4] {
    let published = snapshot.published_projects;
    let posts = if snapshot.social_media_posts > 0.0 {
        format!("{}", snapshot.social_media_posts)
    } else {
        published.to_string()
    };
    let posts_change = if posts == "0" {
        "0".to_string()
    } else {
        format!("+{posts}")
    };

    [
        StatCard {
            title: "Total Reach",
            value: format_count(snapshot.total_reach),
            change: None,
        },
        StatCard {
            title: "Engagement",
            value: format!("{:.1}%", snapshot.engagement),
            change: None,
        },
        StatCard {
            title: "Active Projects",
            value: published.to_string(),
            change: Some(format!("{published} active")),
        },
        StatCard {
            title: "Published Posts",
            value: posts,
            change: Some(posts_change),
        },
    ]
}

/// Formats a count with comma thousands separators and at most three
/// fractional digits, e.g. `1234567.5` becomes `1,234,567.5`.
#[must_use]
pub fn format_count(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rendered = format!("{rounded}");
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Identity shown in the dashboard corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityBadge {
    pub display_name: String,
    /// Single uppercase character used when no avatar is available.
    pub initial: String,
    pub handle: Option<String>,
    pub avatar: Option<String>,
}

#[must_use]
pub fn identity_badge(profile: &UserProfile) -> IdentityBadge {
    let non_empty = |s: &Option<String>| s.as_deref().filter(|v| !v.is_empty()).map(str::to_owned);
    let name = non_empty(&profile.name);
    let email = non_empty(&profile.email);

    let display_name = name
        .clone()
        .or_else(|| email.clone())
        .unwrap_or_else(|| "User".to_string());
    let initial = name
        .or(email)
        .and_then(|s| s.chars().next())
        .unwrap_or('U')
        .to_uppercase()
        .collect();

    IdentityBadge {
        display_name,
        initial,
        handle: non_empty(&profile.username).map(|u| format!("@{u}")),
        avatar: non_empty(&profile.avatar),
    }
}
