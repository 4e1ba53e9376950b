//! Cursor-based pagination over (created_at, id) orderings.
//!
//! Listings of orders and payments are sorted by `created_at` descending
//! with the entity id as tie-break. The cursor encodes both components, so
//! a page boundary stays stable while new rows are inserted above it.

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Timestamp, ValidationError};

/// Default page size when the caller does not pass `first`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Hard ceiling on page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Opaque position in a (created_at, id) ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: Timestamp,
    pub id: Uuid,
}

impl Cursor {
    pub fn new(created_at: Timestamp, id: Uuid) -> Self {
        Self { created_at, id }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.created_at.as_unix_micros(), self.id)
    }
}

impl FromStr for Cursor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (micros, id) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::invalid_format("after", "malformed cursor"))?;
        let micros: i64 = micros
            .parse()
            .map_err(|_| ValidationError::invalid_format("after", "malformed cursor timestamp"))?;
        let created_at = Timestamp::from_unix_micros(micros)
            .ok_or_else(|| ValidationError::invalid_format("after", "cursor timestamp out of range"))?;
        let id = Uuid::parse_str(id)
            .map_err(|_| ValidationError::invalid_format("after", "malformed cursor id"))?;
        Ok(Self { created_at, id })
    }
}

/// Caller-supplied page window (`first` / `after`).
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub first: Option<u32>,
    pub after: Option<String>,
}

impl PageRequest {
    /// Resolves the effective page size, clamped to `MAX_PAGE_SIZE`.
    pub fn limit(&self) -> u32 {
        self.first.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }

    /// Parses the `after` cursor if one was supplied.
    pub fn cursor(&self) -> Result<Option<Cursor>, ValidationError> {
        self.after.as_deref().map(Cursor::from_str).transpose()
    }
}

/// Page boundary metadata returned alongside items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Builds a page from items fetched with a limit+1 overshoot.
    ///
    /// `fetched` holds up to limit+1 items; the presence of the extra item
    /// signals a next page. `cursor_of` extracts the cursor for an item.
    pub fn from_overfetch(
        mut fetched: Vec<T>,
        limit: u32,
        cursor_of: impl Fn(&T) -> Cursor,
    ) -> Self {
        let has_next_page = fetched.len() > limit as usize;
        fetched.truncate(limit as usize);
        let end_cursor = fetched.last().map(|item| cursor_of(item).to_string());
        Self {
            items: fetched,
            page_info: PageInfo {
                has_next_page,
                end_cursor,
            },
        }
    }
}
