pub const DEFAULT_PAGE_SIZE: u64 = 10;

pub const MAX_PAGE_SIZE: u64 = 100;

pub mod resume {

    pub const FILE_PREFIX: &str = "resume";
}

pub mod limits {

    /// Upper bound for the comma-separated `completed` list on series requests.
    pub const MAX_COMPLETED_IDS: usize = 500;
}
