use serde::Deserialize;

/// Rows per page for every paginated listing.
pub const PAGE_SIZE: i64 = 10;

/// Optional `?page=N` on the paginated routes. When it parses to a non-zero
/// integer it takes precedence over the path segment.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    offset: i64,
}

impl Page {
    /// Resolve the requested page from the path segment and query string.
    pub fn resolve(path: &str, query: &PageQuery) -> Result<Self, String> {
        let from_query = query
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p != 0);

        let number = match from_query {
            Some(n) => n,
            None => path
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("Invalid page number: {path}"))?,
        };

        if number < 1 {
            return Err(format!("Page number must be at least 1, got {number}"));
        }
        let offset = (number - 1)
            .checked_mul(PAGE_SIZE)
            .ok_or_else(|| format!("Page number is too large: {number}"))?;
        Ok(Self { number, offset })
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}
