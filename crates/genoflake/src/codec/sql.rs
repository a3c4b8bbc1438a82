use crate::{Error, Result, SnowflakeId};

/// A database column value, as handed to or received from a driver.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Bytes(Vec<u8>),
    Text(String),
    Float(f64),
}

impl SqlValue {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Float(_) => "float",
        }
    }
}

impl SnowflakeId {
    /// Stores the ID as a 64-bit integer column.
    pub fn to_sql(&self) -> SqlValue {
        SqlValue::Int(self.to_raw())
    }

    /// Reads an ID back from a column.
    ///
    /// `NULL` becomes [`SnowflakeId::ZERO`]; integers are taken as-is; byte
    /// strings are decoded as decimal text.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] for malformed byte strings
    /// - [`Error::UnsupportedSqlValue`] for any other column type
    pub fn scan(value: &SqlValue) -> Result<Self> {
        match value {
            SqlValue::Null => Ok(Self::ZERO),
            SqlValue::Int(raw) => Ok(Self::from_raw(*raw)),
            SqlValue::Bytes(bytes) => Ok(Self::from_binary(bytes)?),
            other => Err(Error::UnsupportedSqlValue { kind: other.kind() }),
        }
    }
}

impl From<SnowflakeId> for SqlValue {
    fn from(id: SnowflakeId) -> Self {
        id.to_sql()
    }
}

impl TryFrom<&SqlValue> for SnowflakeId {
    type Error = Error;

    fn try_from(value: &SqlValue) -> Result<Self> {
        Self::scan(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseIdError;

    #[test]
    fn stores_as_integer() {
        let id = SnowflakeId::from_raw(987654321);
        assert_eq!(id.to_sql(), SqlValue::Int(987654321));
        assert_eq!(SqlValue::from(id), SqlValue::Int(987654321));
        assert_eq!(SnowflakeId::scan(&id.to_sql()), Ok(id));
    }

    #[test]
    fn scans_supported_columns() {
        assert_eq!(SnowflakeId::scan(&SqlValue::Null), Ok(SnowflakeId::ZERO));
        assert_eq!(
            SnowflakeId::scan(&SqlValue::Int(-5)),
            Ok(SnowflakeId::from_raw(-5))
        );
        assert_eq!(
            SnowflakeId::try_from(&SqlValue::Bytes(b"42".to_vec())),
            Ok(SnowflakeId::from_raw(42))
        );
    }

    #[test]
    fn rejects_unsupported_columns() {
        assert_eq!(
            SnowflakeId::scan(&SqlValue::Text("42".into())),
            Err(Error::UnsupportedSqlValue { kind: "text" })
        );
        assert_eq!(
            SnowflakeId::scan(&SqlValue::Float(1.5)),
            Err(Error::UnsupportedSqlValue { kind: "float" })
        );
        assert_eq!(
            SnowflakeId::scan(&SqlValue::Bytes(Vec::new())),
            Err(Error::Parse(ParseIdError::Empty))
        );
        assert!(matches!(
            SnowflakeId::scan(&SqlValue::Bytes(b"x1".to_vec())),
            Err(Error::Parse(ParseIdError::InvalidDecimal { .. }))
        ));
    }
}
