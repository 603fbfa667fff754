// src/portal/export.rs
use crate::config::consts::MIN_EXPORT_BYTES;
use crate::core::net::Session;
use crate::error::{ExportError, Result};

/// Download the notifications spreadsheet with an authenticated session.
pub fn fetch_export(session: &Session, export_url: &str) -> Result<Vec<u8>> {
    let fetched = session.get(export_url)?;
    check_export(&fetched.body)?;
    logf!("export: {} bytes from {}", fetched.body.len(), export_url);
    Ok(fetched.body)
}

/// Reject bodies too small to be a workbook (error pages, empty downloads).
pub fn check_export(bytes: &[u8]) -> Result<()> {
    if bytes.len() < MIN_EXPORT_BYTES {
        loge!("export: only {} bytes", bytes.len());
        return Err(ExportError::EmptyExport { len: bytes.len(), min: MIN_EXPORT_BYTES });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn small_bodies_are_rejected() {
        let err = check_export(&[0u8; 50]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyExportError);
        assert!(check_export(&[]).is_err());
        assert!(check_export(&[0u8; MIN_EXPORT_BYTES - 1]).is_err());
        assert!(check_export(&[0u8; MIN_EXPORT_BYTES]).is_ok());
    }
}
