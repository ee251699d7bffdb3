use crate::error::Result;

/// Outcome of a fetch that is not allowed to fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Fresh(T),
    /// The request failed; `value` is the zero-valued stand-in.
    Fallback { value: T, reason: String },
}

impl<T> Fetched<T> {
    pub fn into_value(self) -> T {
        match self {
            Fetched::Fresh(value) | Fetched::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }
}

/// Swap a failed fetch for `T::default()`, logging why.
pub fn fetch_with_fallback<T: Default>(endpoint: &str, result: Result<T>) -> Fetched<T> {
    match result {
        Ok(value) => Fetched::Fresh(value),
        Err(e) => {
            tracing::warn!(endpoint, error = %e, "fetch failed, using fallback");
            Fetched::Fallback {
                value: T::default(),
                reason: e.to_string(),
            }
        }
    }
}
