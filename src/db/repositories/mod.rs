pub mod catalog;
pub mod counter;
pub mod relation;
pub mod series;
pub mod taxonomy;
