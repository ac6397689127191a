//! Recipient batching and digest content helpers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::interests::Interest;
use crate::types::DbId;

/// Maximum recipients per outgoing message.
pub const BATCH_SIZE: usize = 50;

/// A linked entry in a digest or notification email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestItem {
    pub title: String,
    pub url: String,
}

/// Deduplicate recipients (case-insensitively, first spelling wins) and split
/// them into batches of at most `size`.
///
/// Blank addresses are dropped. A `size` of zero is treated as one.
pub fn batch_recipients<S: AsRef<str>>(recipients: &[S], size: usize) -> Vec<Vec<String>> {
    let size = size.max(1);
    let mut seen: HashSet<String> = HashSet::with_capacity(recipients.len());
    let mut unique: Vec<String> = Vec::with_capacity(recipients.len());

    for r in recipients {
        let addr = r.as_ref().trim();
        if addr.is_empty() {
            continue;
        }
        if seen.insert(addr.to_ascii_lowercase()) {
            unique.push(addr.to_string());
        }
    }

    unique.chunks(size).map(<[String]>::to_vec).collect()
}

/// Public link to a post on the site.
pub fn content_url(site_url: &str, kind: Interest, id: DbId) -> String {
    format!(
        "{}/{}/{id}",
        site_url.trim_end_matches('/'),
        kind.path_segment()
    )
}

/// Section-heading phrase for a digest period label.
pub fn period_phrase(period_label: Option<&str>) -> &'static str {
    match period_label {
        Some(label) if label.to_lowercase().contains("week") => "this week",
        _ => "in this period",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_respect_size_and_dedupe() {
        let recipients: Vec<String> = (0..120).map(|i| format!("r{i}@example.com")).collect();
        let mut with_dupes = recipients.clone();
        with_dupes.push("R0@example.com".to_string());
        with_dupes.push("   ".to_string());

        let batches = batch_recipients(&with_dupes, BATCH_SIZE);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 50);
        assert_eq!(batches[1].len(), 50);
        assert_eq!(batches[2].len(), 20);
        assert_eq!(batches[0][0], "r0@example.com");
    }

    #[test]
    fn large_lists_keep_first_spelling_and_order() {
        let mut recipients: Vec<String> =
            (0..20_000).map(|i| format!("Reader{i}@Example.com")).collect();
        recipients.extend((0..20_000).map(|i| format!("reader{i}@example.com")));

        let batches = batch_recipients(&recipients, BATCH_SIZE);
        let flat: Vec<String> = batches.into_iter().flatten().collect();
        assert_eq!(flat.len(), 20_000);
        assert_eq!(flat[0], "Reader0@Example.com");
        assert_eq!(flat[19_999], "Reader19999@Example.com");
    }

    #[test]
    fn empty_input_yields_no_batches() {
        let none: Vec<String> = Vec::new();
        assert!(batch_recipients(&none, BATCH_SIZE).is_empty());
    }

    #[test]
    fn zero_batch_size_does_not_panic() {
        let batches = batch_recipients(&["a@x.com", "b@x.com"], 0);
        assert_eq!(batches.len(), 2);
    }

    #[test]
    fn builds_content_links() {
        assert_eq!(
            content_url("https://drcodezenna.com/", Interest::Blog, 7),
            "https://drcodezenna.com/blog/7"
        );
        assert_eq!(
            content_url("https://drcodezenna.com", Interest::Teaching, 3),
            "https://drcodezenna.com/teaching/3"
        );
    }

    #[test]
    fn period_phrase_depends_on_week_label() {
        assert_eq!(period_phrase(Some("Week of Sep 1-7")), "this week");
        assert_eq!(period_phrase(Some("September 2025")), "in this period");
        assert_eq!(period_phrase(None), "in this period");
    }
}
