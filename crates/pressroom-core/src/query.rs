//! In-memory list view: search, filter, and sort over a fetched page.
//!
//! The admin list fetches a single page and derives its view entirely
//! in memory, recomputing on every input change.

use chrono::{DateTime, Duration, Utc};

use crate::models::blog::{Blog, BlogStatus};

/// Days a post counts as "recent".
const RECENT_WINDOW_DAYS: i64 = 7;

/// Status/date filter applied before search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    /// Created within the last seven days.
    Recent,
    Drafts,
    Published,
}

/// Sort order for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
    Author,
}

/// A derived list-view query.
#[derive(Debug, Clone, Default)]
pub struct BlogQuery {
    /// Case-insensitive substring matched against title, excerpt, and
    /// author name. Empty leaves the page unfiltered.
    pub search: String,
    pub filter: ListFilter,
    pub sort: SortOrder,
}

/// Apply a query to a page of blogs.
///
/// `now` anchors the recent-posts window so the view is a pure function
/// of its inputs.
pub fn apply_query(blogs: &[Blog], query: &BlogQuery, now: DateTime<Utc>) -> Vec<Blog> {
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let needle = query.search.trim().to_lowercase();

    let mut view: Vec<Blog> = blogs
        .iter()
        .filter(|b| match query.filter {
            ListFilter::All => true,
            ListFilter::Recent => b.created_at >= cutoff,
            ListFilter::Drafts => b.status == BlogStatus::Draft,
            ListFilter::Published => b.status == BlogStatus::Published,
        })
        .filter(|b| {
            needle.is_empty()
                || b.title.to_lowercase().contains(&needle)
                || b.excerpt.to_lowercase().contains(&needle)
                || b.author.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    match query.sort {
        SortOrder::Newest => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Title => view.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortOrder::Author => {
            view.sort_by(|a, b| a.author.name.to_lowercase().cmp(&b.author.name.to_lowercase()))
        }
    }

    view
}
