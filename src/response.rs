//! Response envelope helpers: every body is the resource under a key named after it.

use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// `{ "<key>": data }` without building an intermediate map.
pub struct Keyed<T> {
    pub key: &'static str,
    pub data: T,
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.data)?;
        map.end()
    }
}

pub fn success_ok<T: Serialize>(key: &'static str, data: T) -> (StatusCode, Json<Keyed<T>>) {
    (StatusCode::OK, Json(Keyed { key, data }))
}

pub fn success_created<T: Serialize>(key: &'static str, data: T) -> (StatusCode, Json<Keyed<T>>) {
    (StatusCode::CREATED, Json(Keyed { key, data }))
}
