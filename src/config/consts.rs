// src/config/consts.rs

// Target site
pub const BASE_URL: &str = "https://www.ele.llc";
pub const MEMBERS_PATH: &str = "/members";

// Embedded page state (Next.js)
pub const NEXT_DATA_ID: &str = "__NEXT_DATA__";
pub const NEXT_DATA_MEMBERS_PATH: [&str; 3] = ["props", "pageProps", "members"];

// Net
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const TIMEOUT_SECS: u64 = 30;
pub const MAX_REDIRECTS: usize = 5;
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_BASE_MS: u64 = 1_000;
pub const REQUEST_PAUSE_MS: u64 = 1_000; // be polite

// Classification
pub const DEFAULT_MEMBER_TYPE: &str = "Standard Member";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "members";

// Server
pub const SERVICE_NAME: &str = "Member Directory API";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

// Logs
pub const DEFAULT_LOG_FILTER: &str = "info,member_scrape=info";
pub const CLI_LOG_FILE: &str = ".store/scrape.log";
