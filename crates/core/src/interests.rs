//! Newsletter interest tags and audience matching.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Content kinds a subscriber can opt into.
///
/// Stored in the database as the exact strings `"Blog"` and `"Teaching"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interest {
    Blog,
    Teaching,
}

impl Interest {
    pub const ALL: [Interest; 2] = [Interest::Blog, Interest::Teaching];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Blog => "Blog",
            Interest::Teaching => "Teaching",
        }
    }

    /// Path segment used in public links (`/blog/<id>`, `/teaching/<id>`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            Interest::Blog => "blog",
            Interest::Teaching => "teaching",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Blog" => Some(Interest::Blog),
            "Teaching" => Some(Interest::Teaching),
            _ => None,
        }
    }
}

impl std::fmt::Display for Interest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate raw interest tags into a deduplicated list.
///
/// Fails on an empty list or any unknown tag.
pub fn parse_interests(raw: &[String]) -> Result<Vec<Interest>, CoreError> {
    let mut out = Vec::with_capacity(raw.len());
    for tag in raw {
        let interest = Interest::parse(tag)
            .ok_or_else(|| CoreError::Validation(format!("Unknown interest '{tag}'")))?;
        if !out.contains(&interest) {
            out.push(interest);
        }
    }
    if out.is_empty() {
        return Err(CoreError::Validation(
            "Select at least one interest".to_string(),
        ));
    }
    Ok(out)
}

/// Storage form of an interest list.
pub fn to_tags(interests: &[Interest]) -> Vec<String> {
    interests.iter().map(|i| i.as_str().to_string()).collect()
}

/// Whether a subscriber's stored tags overlap the selected audience.
///
/// Unknown stored tags are ignored rather than rejected.
pub fn matches_audience(subscriber_tags: &[String], audience: &[Interest]) -> bool {
    subscriber_tags
        .iter()
        .filter_map(|t| Interest::parse(t))
        .any(|i| audience.contains(&i))
}

/// Normalize free-form topic tags: trim, drop empties, keep first occurrence.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let t = tag.as_ref().trim();
        if !t.is_empty() && !out.iter().any(|existing| existing == t) {
            out.push(t.to_string());
        }
    }
    out
}

/// Split a comma-separated tag string (`"poetry, media , "`).
pub fn split_tag_string(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}
