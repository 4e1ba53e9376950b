//! Mutation result envelope.
//!
//! Every mutation answers with the affected entity and an explicit success
//! flag. The boundary layer maps typed errors onto the `ok: false` form;
//! callers treat `ok: false` as authoritative even if entity data is
//! present.

use serde::Serialize;

/// Envelope returned by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationResult<T> {
    pub entity: Option<T>,
    pub ok: bool,
}

impl<T> MutationResult<T> {
    /// Successful mutation carrying the affected entity.
    pub fn ok(entity: T) -> Self {
        Self {
            entity: Some(entity),
            ok: true,
        }
    }

    /// Failure envelope with no entity.
    pub fn failed() -> Self {
        Self {
            entity: None,
            ok: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_wraps_entity() {
        let result = MutationResult::ok(42);
        assert!(result.ok);
        assert_eq!(result.entity, Some(42));
    }

    #[test]
    fn failed_is_empty() {
        let result: MutationResult<i32> = MutationResult::failed();
        assert!(!result.ok);
        assert!(result.entity.is_none());
    }

    #[test]
    fn serializes_with_ok_flag() {
        let json = serde_json::to_string(&MutationResult::ok("cart")).unwrap();
        assert!(json.contains("\"ok\":true"));
        assert!(json.contains("\"entity\":\"cart\""));
    }
}
