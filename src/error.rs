use std::fmt::Debug;
use thiserror::Error;

/// The error returned by a strict insertion when the key is already present.
///
/// The tree is left unchanged and the rejected key and value are handed back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("duplicate key {key:?}")]
pub struct DuplicateKey<K: Debug, V: Debug = ()> {
    /// The rejected key.
    pub key: K,
    /// The rejected value.
    pub value: V,
}

impl<K: Debug, V: Debug> DuplicateKey<K, V> {
    /// Returns the rejected key and value.
    pub fn into_inner(self) -> (K, V) { (self.key, self.value) }
}
