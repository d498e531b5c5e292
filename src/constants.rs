pub mod limits {

    pub const DEFAULT_PAGE_SIZE: u64 = 100;

    pub const MAX_PAGE_SIZE: u64 = 1000;

    /// Longest accepted `?name=` search pattern.
    pub const MAX_SEARCH_PATTERN_LEN: usize = 50;
}

pub mod session {

    pub const USER_ID_KEY: &str = "user_id";
}
