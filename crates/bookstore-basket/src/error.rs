//! Error types for the live basket layer.

use thiserror::Error;

/// Result type alias for basket operations.
pub type BasketResult<T> = Result<T, BasketError>;

/// Basket layer error type.
///
/// Mutations on the store cannot fail; only talking to a pricing engine
/// that has already stopped can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasketError {
    /// The pricing engine task has exited (shut down, or its store is gone).
    #[error("Pricing engine has stopped")]
    EngineStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(BasketError::EngineStopped.to_string(), "Pricing engine has stopped");
    }
}
