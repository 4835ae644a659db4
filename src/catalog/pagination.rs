use super::ValidationError;

/// A validated (page, size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Validates raw request values against the configured maximum page size.
    pub fn new(page: i64, size: i64, max_size: u64) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::new(
                "page",
                format!("{page} is out of range, pages start at 1"),
            ));
        }
        if size < 1 {
            return Err(ValidationError::new(
                "size",
                format!("{size} is out of range, size must be at least 1"),
            ));
        }
        let size = size.unsigned_abs();
        if size > max_size {
            return Err(ValidationError::new(
                "size",
                format!("{size} exceeds the maximum page size of {max_size}"),
            ));
        }
        Ok(Self {
            page: page.unsigned_abs(),
            size,
        })
    }

    /// Builds a request from optional query values, substituting defaults.
    pub fn from_query(
        page: Option<i64>,
        size: Option<i64>,
        default_size: u64,
        max_size: u64,
    ) -> Result<Self, ValidationError> {
        let default_size = i64::try_from(default_size).unwrap_or(i64::MAX);
        Self::new(page.unwrap_or(1), size.unwrap_or(default_size), max_size)
    }

    /// Same as [`Self::from_query`] for values still in text form.
    pub fn from_raw(
        page: Option<&str>,
        size: Option<&str>,
        default_size: u64,
        max_size: u64,
    ) -> Result<Self, ValidationError> {
        Self::from_query(
            parse_number("page", page)?,
            parse_number("size", size)?,
            default_size,
            max_size,
        )
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1) * self.size
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn total_pages(&self, total: u64) -> u64 {
        total_pages(total, self.size)
    }
}

fn parse_number(field: &str, raw: Option<&str>) -> Result<Option<i64>, ValidationError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::new(field, format!("'{value}' is not an integer"))),
        None => Ok(None),
    }
}

/// `ceil(total / size)`, zero for an empty collection.
#[must_use]
pub const fn total_pages(total: u64, size: u64) -> u64 {
    if total == 0 || size == 0 {
        0
    } else {
        total.div_ceil(size)
    }
}
