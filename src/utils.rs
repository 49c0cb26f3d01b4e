//! Identifier helpers for callers that need fresh letter or participant ids.

use crate::error::{LocError, LocResult};
use bech32::Bech32m;
use uuid7::uuid7;

/// A time-ordered uuid7 encoded as bech32m under the human readable `prefix`,
/// e.g. `loc_1...` for letters.
pub fn new_id(prefix: &str) -> LocResult<String> {
    let hrp = bech32::Hrp::parse(prefix).map_err(|_| LocError::malformed(prefix, "id prefix"))?;
    bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())
        .map_err(|_| LocError::malformed(prefix, "bech32 id"))
}

pub fn new_letter_id() -> LocResult<String> {
    new_id("loc_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_and_are_unique() {
        let a = new_letter_id().unwrap();
        let b = new_letter_id().unwrap();

        assert!(a.starts_with("loc_1"));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_prefix_is_malformed() {
        let err = new_id("").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::MalformedInput);
    }
}
