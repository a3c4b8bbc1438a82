use crate::{ParseIdError, SnowflakeId};

impl SnowflakeId {
    /// The UTF-8 bytes of the decimal form.
    pub fn to_binary(&self) -> Vec<u8> {
        self.decimal().as_bytes().to_vec()
    }

    /// Decodes the output of [`Self::to_binary`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseIdError`] if `bytes` is empty, not UTF-8, or not a
    /// base-10 `i64`.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, ParseIdError> {
        if bytes.is_empty() {
            return Err(ParseIdError::Empty);
        }
        let s = core::str::from_utf8(bytes).map_err(|_| ParseIdError::InvalidUtf8)?;
        Self::parse(s)
    }
}
