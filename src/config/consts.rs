// src/config/consts.rs

// Archive
pub const RESOURCES_DIR: &str = "Resources";
pub const ARCHIVE_FILE: &str = "Notificacao162.xlsx";

// Records
pub const KEY_COLUMN: &str = "AIT";

// Portal
pub const TOKEN_FIELD: &str = "_token";
pub const TOKEN_META: &str = "csrf-token";
pub const LOGIN_MARKER: &str = "login";
pub const USER_AGENT: &str = concat!("frota162_export/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Anything shorter cannot be a real workbook
pub const MIN_EXPORT_BYTES: usize = 100;

// Settings
pub const ENV_FILE: &str = "config.env";
pub const ENV_PREFIX: &str = "FROTA162_";

// Local log
pub const LOG_FILE: &str = ".store/debug.log";
