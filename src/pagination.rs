//! Offset pagination shared by every listing operation.
//!
//! Callers supply raw, signed page parameters in a [`PageQuery`] so that zero
//! and negative values can be reported as validation failures. [`validate`]
//! turns a query into a [`PageRequest`] whose page index and page size are
//! non-zero; repositories only accept the validated form, so a failing
//! validation short-circuits a use case before any storage call.
//!
//! Repositories order results by entity identifier only. Identifiers are
//! time-ordered UUIDs, which makes listings deterministic and roughly
//! creation-ordered without a secondary sort key.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use thiserror::Error;

use crate::error::{Classify, ErrorKind};

/// Page size used when a caller does not provide one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Raw paging parameters supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageQuery {
    /// One-based page index.
    pub page: i64,
    /// Number of items per page.
    pub page_size: i64,
    /// Sort by identifier ascending when `true`, descending otherwise.
    pub ascending: bool,
}

impl PageQuery {
    /// Creates an ascending query for the given page and page size.
    #[must_use]
    pub const fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            ascending: true,
        }
    }

    /// Switches the query to descending identifier order.
    #[must_use]
    pub const fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Validation failures for paging parameters.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// The page size is zero or negative.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,
    /// The page index is zero or negative.
    #[error("Page index must be greater than zero")]
    InvalidPageIndex,
}

impl Classify for PaginationError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Validated paging parameters accepted by repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: NonZeroU64,
    page_size: NonZeroU64,
    ascending: bool,
}

impl PageRequest {
    /// Creates a page request from already validated values.
    #[must_use]
    pub const fn new(page: NonZeroU64, page_size: NonZeroU64, ascending: bool) -> Self {
        Self {
            page,
            page_size,
            ascending,
        }
    }

    /// Returns the one-based page index.
    #[must_use]
    pub const fn page(self) -> NonZeroU64 {
        self.page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn page_size(self) -> NonZeroU64 {
        self.page_size
    }

    /// Returns `true` when results are ordered by ascending identifier.
    #[must_use]
    pub const fn ascending(self) -> bool {
        self.ascending
    }

    /// Number of items preceding the requested page.
    ///
    /// Saturates at `u64::MAX` for absurdly large page indexes, which simply
    /// yields an empty page.
    #[must_use]
    pub const fn skip(self) -> u64 {
        (self.page.get() - 1).saturating_mul(self.page_size.get())
    }

    /// Maximum number of items on the requested page.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.page_size.get()
    }
}

/// Validates raw paging parameters.
///
/// The page size is checked before the page index, so a query where both are
/// invalid reports [`PaginationError::InvalidPageSize`].
///
/// # Errors
///
/// Returns [`PaginationError::InvalidPageSize`] when `page_size <= 0` and
/// [`PaginationError::InvalidPageIndex`] when `page <= 0`.
pub fn validate(query: &PageQuery) -> Result<PageRequest, PaginationError> {
    let page_size = positive(query.page_size).ok_or(PaginationError::InvalidPageSize)?;
    let page = positive(query.page).ok_or(PaginationError::InvalidPageIndex)?;
    Ok(PageRequest::new(page, page_size, query.ascending))
}

fn positive(value: i64) -> Option<NonZeroU64> {
    u64::try_from(value).ok().and_then(NonZeroU64::new)
}

/// Returns the number of pages needed for `total_count` items.
///
/// An empty result set still has one (empty) page.
#[must_use]
pub const fn total_pages(page_size: NonZeroU64, total_count: u64) -> u64 {
    if total_count == 0 {
        return 1;
    }
    total_count.div_ceil(page_size.get())
}

/// Page metadata returned alongside every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// One-based index of the returned page.
    pub page_number: u64,
    /// Requested page size.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_count: u64,
    /// Total number of pages, never less than one.
    pub total_pages: u64,
}

impl PaginationMetadata {
    /// Builds metadata for a page of a result set with `total_count` items.
    #[must_use]
    pub const fn new(total_count: u64, request: PageRequest) -> Self {
        Self {
            page_number: request.page().get(),
            page_size: request.page_size().get(),
            total_count,
            total_pages: total_pages(request.page_size(), total_count),
        }
    }
}

/// One page of entities as returned by a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedEntities<T> {
    items: Vec<T>,
    total_count: u64,
}

impl<T> PagedEntities<T> {
    /// Creates a page from its items and the size of the full result set.
    #[must_use]
    pub const fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the number of items across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Splits the page into its items and total count.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, u64) {
        (self.items, self.total_count)
    }
}

/// One page of read models together with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Metadata describing the page within the full result set.
    pub pagination: PaginationMetadata,
}

impl<T> Page<T> {
    /// Maps repository entities into read models and attaches metadata.
    pub fn from_entities<E>(
        entities: PagedEntities<E>,
        request: PageRequest,
        to_view: impl FnMut(E) -> T,
    ) -> Self {
        let (items, total_count) = entities.into_parts();
        Self {
            data: items.into_iter().map(to_view).collect(),
            pagination: PaginationMetadata::new(total_count, request),
        }
    }
}

/// Applies identifier ordering, skip, and limit to an in-memory collection.
///
/// `key` must return a unique value per item; descending order is the exact
/// reverse of ascending order.
pub fn paginate_by_key<T, K>(
    mut items: Vec<T>,
    request: PageRequest,
    key: impl Fn(&T) -> K,
) -> PagedEntities<T>
where
    K: Ord,
{
    let total_count = u64::try_from(items.len()).unwrap_or(u64::MAX);
    items.sort_by(|left, right| key(left).cmp(&key(right)));
    if !request.ascending() {
        items.reverse();
    }

    let skip = usize::try_from(request.skip()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let page = items.into_iter().skip(skip).take(limit).collect();
    PagedEntities::new(page, total_count)
}
