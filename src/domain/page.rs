//! Page requests and the page assembly policy.

use std::fmt;
use std::str::FromStr;

use log::debug;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DomainError::InvalidInput(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemberSortKey {
    #[default]
    Name,
    Age,
    TeamName,
}

impl FromStr for MemberSortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(MemberSortKey::Name),
            "age" => Ok(MemberSortKey::Age),
            "team_name" => Ok(MemberSortKey::TeamName),
            other => Err(DomainError::InvalidInput(format!(
                "unknown sort key '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberSort {
    pub key: MemberSortKey,
    pub direction: SortDirection,
}

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 2000;

/// Zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
    sort: MemberSort,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: MemberSort) -> Result<Self, DomainError> {
        if page < 0 {
            return Err(DomainError::InvalidInput(format!(
                "page index must not be negative, got {}",
                page
            )));
        }
        if size < 1 {
            return Err(DomainError::InvalidInput(format!(
                "page size must be at least 1, got {}",
                size
            )));
        }
        if size > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidInput(format!(
                "page size must be at most {}, got {}",
                MAX_PAGE_SIZE, size
            )));
        }
        // The end of the page must be representable, not only its start.
        if page
            .checked_mul(size)
            .and_then(|offset| offset.checked_add(size))
            .is_none()
        {
            return Err(DomainError::InvalidInput(format!(
                "page index {} is out of range for size {}",
                page, size
            )));
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn sort(&self) -> MemberSort {
        self.sort
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} (size {}, offset {})", self.page, self.size, self.offset())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    /// Builds a page, calling `count` only when the content alone cannot
    /// determine the total.
    ///
    /// A short first page is the only page. A short, non-empty later page is
    /// the last one, so its total is `offset + len`. A full page, or an empty
    /// page past the start, needs the count query.
    pub fn assemble<E, F>(content: Vec<T>, request: &PageRequest, count: F) -> Result<Self, E>
    where
        F: FnOnce() -> Result<i64, E>,
    {
        let offset = request.offset();
        let len = content.len() as i64;

        if offset == 0 {
            if len < request.size() {
                debug!("short first page, total is {} without counting", len);
                return Ok(Self::new(content, request, len));
            }
            let total = count()?;
            return Ok(Self::new(content, request, total));
        }

        if len != 0 && len < request.size() {
            debug!(
                "short last page at offset {}, total is {} without counting",
                offset,
                offset + len
            );
            return Ok(Self::new(content, request, offset + len));
        }

        let total = count()?;
        Ok(Self::new(content, request, total))
    }

    fn offset(&self) -> i64 {
        self.page * self.size
    }

    pub fn is_first(&self) -> bool {
        self.offset() == 0
    }

    pub fn has_next(&self) -> bool {
        self.offset() + (self.content.len() as i64) < self.total_elements
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn total_pages(&self) -> i64 {
        self.total_elements / self.size + i64::from(self.total_elements % self.size != 0)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
