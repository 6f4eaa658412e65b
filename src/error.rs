use thiserror::Error;

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Recoverable failures: construction, configuration and display setup.
///
/// Contract violations inside the solver (mismatched field shapes, linear
/// indices out of range) are not represented here; they panic.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("grid size {size} is too small (minimum {min})")]
    GridTooSmall { size: usize, min: usize },

    #[error("field of {rows}x{cols} cells overflows the address space")]
    FieldTooLarge { rows: usize, cols: usize },

    #[error("failed to allocate field of {rows}x{cols} cells")]
    Allocation {
        rows: usize,
        cols: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("display error: {0}")]
    Display(#[from] minifb::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_too_small_message() {
        let e = SimError::GridTooSmall { size: 4, min: 10 };
        assert_eq!(e.to_string(), "grid size 4 is too small (minimum 10)");
    }

    #[test]
    fn test_config_error_from_yaml() {
        let parse: Result<Vec<u32>, _> = serde_yaml::from_str("[1, 2");
        let e: SimError = parse.unwrap_err().into();
        assert!(matches!(e, SimError::Config(_)));
        assert!(e.to_string().starts_with("invalid config:"));
    }

    #[test]
    fn test_display_error_keeps_source() {
        use std::error::Error as _;

        let e: SimError = minifb::Error::UpdateFailed("lost surface".to_string()).into();
        assert!(matches!(e, SimError::Display(minifb::Error::UpdateFailed(_))));
        assert!(e.to_string().starts_with("display error:"));
        let source = e.source().unwrap();
        assert!(source.to_string().contains("lost surface"));
    }
}
