use crate::error::KVError;

/// KVStore provides the key-value storage interface session state lives in.
///
/// Keys are flat, well-known names (`auth_token`, `role_name`, ...). The
/// store is single-writer-per-key with last-write-wins semantics; callers
/// must not assume transactions across keys.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Get a value decoded as UTF-8. Returns None if the key does not exist.
    fn get_str(&self, key: &str) -> Result<Option<String>, KVError> {
        match self.get(key)? {
            Some(bytes) => {
                let value =
                    String::from_utf8(bytes).map_err(|e| KVError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a key to a UTF-8 string value.
    fn set_str(&self, key: &str, value: &str) -> Result<(), KVError> {
        self.set(key, value.as_bytes())
    }
}
