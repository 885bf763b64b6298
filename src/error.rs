use std::collections::TryReserveError;

/// Errors that can occur while building or driving the rain engine
#[derive(thiserror::Error, Debug)]
pub enum RainError {
    #[error("invalid dimensions: canvas {width}x{height}, cell {cell_width}x{cell_height}")]
    InvalidDimensions {
        width: i32,
        height: i32,
        cell_width: i32,
        cell_height: i32,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("ghost pool could not grow: {0}")]
    AllocationFailure(#[from] AllocationFailure),
}

/// Why a ghost pool refused to take another entry.
#[derive(thiserror::Error, Debug)]
pub enum AllocationFailure {
    #[error("{0}")]
    Reserve(#[from] TryReserveError),

    #[error("pool already holds its limit of {0} ghosts")]
    Limit(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_failure_converts() {
        let err = RainError::from(AllocationFailure::Limit(3));
        assert!(matches!(err, RainError::AllocationFailure(AllocationFailure::Limit(3))));
        assert_eq!(
            err.to_string(),
            "ghost pool could not grow: pool already holds its limit of 3 ghosts"
        );
    }

    #[test]
    fn dimensions_message_names_sizes() {
        let err = RainError::InvalidDimensions {
            width: 20,
            height: 200,
            cell_width: 0,
            cell_height: 20,
        };
        assert_eq!(err.to_string(), "invalid dimensions: canvas 20x200, cell 0x20");
    }
}
