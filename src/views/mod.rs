//! Client-side admin list views.
//!
//! The dashboard fetches each collection once, then filters, searches, and
//! pages entirely in memory. Mutations patch the fetched collection after
//! the server confirms, rather than refetching.

pub mod users;
pub mod votes;

/// Number of pages needed for `len` items; an empty collection still has one
/// (empty) page.
pub(crate) fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size).max(1)
}

/// 1-based page slice over an already-filtered list.
pub(crate) fn page_slice<'a, T>(items: Vec<&'a T>, page: usize, page_size: usize) -> Vec<&'a T> {
    let page = page.max(1);
    items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect()
}

/// Case-insensitive substring match used by the free-text search boxes.
pub(crate) fn search_matches(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}
