use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("{behavior}: {field} must be {expected} (got {value})")]
    InvalidParameter {
        behavior: &'static str,
        field:    &'static str,
        expected: &'static str,
        value:    f32,
    },

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

/// `Ok` when `value` is finite and `>= 0`.
pub(crate) fn non_negative(
    behavior: &'static str,
    field:    &'static str,
    value:    f32,
) -> BehaviorResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BehaviorError::InvalidParameter { behavior, field, expected: "finite and >= 0", value })
    }
}

/// `Ok` when `value` is finite and `> 0`.
pub(crate) fn positive(
    behavior: &'static str,
    field:    &'static str,
    value:    f32,
) -> BehaviorResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BehaviorError::InvalidParameter { behavior, field, expected: "finite and > 0", value })
    }
}
