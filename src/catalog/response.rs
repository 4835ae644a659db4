use super::PageRequest;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Paginated list envelope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub total_pages: u64,
}

impl<T> PageDto<T> {
    #[must_use]
    pub fn assemble(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            size: request.size(),
            total_pages: request.total_pages(total),
        }
    }
}

#[must_use]
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[must_use]
pub fn format_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_metadata() {
        let request = PageRequest::new(3, 10, 100).unwrap();
        let page = PageDto::assemble(vec![1, 2, 3, 4, 5], 25, &request);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.size, 10);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn empty_page_serializes_items_as_array() {
        let request = PageRequest::new(1, 10, 100).unwrap();
        let page: PageDto<u8> = PageDto::assemble(Vec::new(), 0, &request);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["total_pages"], 0);
    }

    #[test]
    fn timestamp_formats() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(7, 5, 3, 250)
            .unwrap();
        assert_eq!(format_datetime(&dt), "2024-03-09 07:05:03");
        assert_eq!(format_date(&dt.date()), "2024-03-09");
    }
}
