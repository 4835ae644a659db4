pub mod content_service;
pub mod content_service_impl;
pub use content_service::{CatalogSettings, ContentError, ContentService, ListQuery};
pub use content_service_impl::SeaOrmContentService;

pub mod series_service;
pub mod series_service_impl;
pub use series_service::{SeriesError, SeriesQuery, SeriesService};
pub use series_service_impl::SeaOrmSeriesService;

pub mod counter_service;
pub mod counter_service_impl;
pub use counter_service::{CounterError, CounterService};
pub use counter_service_impl::SeaOrmCounterService;

pub mod resume_service;
pub mod resume_service_impl;
pub use resume_service::{ResumeError, ResumeService, ResumeSet};
pub use resume_service_impl::StaticResumeService;
