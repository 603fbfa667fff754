// src/portal/mod.rs
//
// The notification portal: session login and the spreadsheet export.
// Page parsing lives in `core::html`; this layer only sequences requests.

mod export;
mod login;

pub use export::{check_export, fetch_export};
pub use login::{authenticate, is_login_url};
