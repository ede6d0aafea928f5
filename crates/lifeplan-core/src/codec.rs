//! JSON encoding of stored collections.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PlannerError, PlannerResult};

pub fn encode<T: Serialize + ?Sized>(key: &'static str, value: &T) -> PlannerResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| PlannerError::Encode { key, source })
}

pub fn decode<T: DeserializeOwned>(key: &'static str, bytes: &[u8]) -> PlannerResult<T> {
    serde_json::from_slice(bytes).map_err(|source| PlannerError::Decode { key, source })
}
