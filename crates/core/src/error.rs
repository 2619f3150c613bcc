//! Error types for the meadow core.

use thiserror::Error;

/// Errors produced by scene construction and snapshot I/O.
///
/// The animation core itself never fails once constructed: `step()` and
/// `render()` clamp or drop out-of-range inputs instead of erroring.
#[derive(Debug, Error)]
pub enum MeadowError {
    /// Width or height was zero, negative, or non-finite.
    #[error("invalid dimensions: width and height must be finite and positive")]
    InvalidDimensions,

    /// An I/O failure while writing a snapshot.
    #[error("io error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = MeadowError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn io_error_includes_message() {
        let err = MeadowError::Io("disk full".into());
        let msg = format!("{err}");
        assert!(msg.contains("disk full"), "missing detail in: {msg}");
    }

    #[test]
    fn meadow_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeadowError>();
    }

    #[test]
    fn meadow_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<MeadowError>();
    }
}
