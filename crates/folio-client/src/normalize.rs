//! Normalization of raw project records into [`ProjectSummary`].
//!
//! Alias precedence (first present, non-empty value wins):
//!
//! | Field         | Keys                   | Fallback             |
//! |---------------|------------------------|----------------------|
//! | `id`          | `id`, `_id`            | `""`                 |
//! | `name`        | `name`, `title`        | `"Untitled Project"` |
//! | `description` | `description`          | `""`                 |
//! | `status`      | `status` (lowercased)  | absent               |
//! | `visibility`  | `visibility` (lowercased) | absent            |
//! | `image_url`   | `imageUrl`, `image`    | `""`                 |
//! | `created_at`  | `createdAt` (RFC 3339) | fetch time           |
//! | `updated_at`  | `updatedAt` (RFC 3339) | fetch time           |

use chrono::{DateTime, Utc};
use folio_core::{ProjectSummary, RECENT_PROJECTS_LIMIT};
use serde_json::Value;

use crate::projects::ProjectsDigest;
use crate::types::RawProject;

const UNTITLED_PROJECT: &str = "Untitled Project";

/// Converts a [`RawProject`] into the canonical [`ProjectSummary`].
///
/// `fetched_at` stands in for timestamps the record does not carry or that
/// fail to parse.
#[must_use]
pub fn normalize_project(raw: RawProject, fetched_at: DateTime<Utc>) -> ProjectSummary {
    let id = [raw.id.as_ref(), raw.underscore_id.as_ref()]
        .into_iter()
        .flatten()
        .find_map(id_from_value)
        .unwrap_or_default();

    let name = first_present([raw.name.as_deref(), raw.title.as_deref()])
        .unwrap_or(UNTITLED_PROJECT)
        .to_string();
    let image_url = first_present([raw.image_url.as_deref(), raw.image.as_deref()])
        .unwrap_or_default()
        .to_string();

    ProjectSummary {
        id,
        name,
        description: raw.description.unwrap_or_default(),
        status: lowercased(raw.status.as_deref()),
        visibility: lowercased(raw.visibility.as_deref()),
        technologies: raw.technologies.unwrap_or_default().into_iter().collect(),
        github_url: raw.github_url.unwrap_or_default(),
        live_url: raw.live_url.unwrap_or_default(),
        image_url,
        created_at: parse_timestamp(raw.created_at.as_deref()).unwrap_or(fetched_at),
        updated_at: parse_timestamp(raw.updated_at.as_deref()).unwrap_or(fetched_at),
    }
}

/// Filters to the published subset and keeps the first
/// [`RECENT_PROJECTS_LIMIT`] in source order, alongside the full count.
#[must_use]
pub fn select_published(projects: Vec<ProjectSummary>) -> ProjectsDigest {
    let published: Vec<ProjectSummary> = projects
        .into_iter()
        .filter(ProjectSummary::is_published)
        .collect();
    let published_count = published.len() as u64;
    let recent = published.into_iter().take(RECENT_PROJECTS_LIMIT).collect();

    ProjectsDigest {
        recent,
        published_count,
    }
}

fn first_present<const N: usize>(candidates: [Option<&str>; N]) -> Option<&str> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

fn lowercased(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_lowercase)
}

/// Accepts string ids, numeric ids, and Mongo-style `{"$oid": "..."}` objects.
fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("$oid")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        _ => None,
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
