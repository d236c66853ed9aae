use std::borrow::Cow;

/// A value as it crosses the database driver boundary.
///
/// This is the shape the `scan_*` functions read from and the `*_value` functions produce.
/// The SQLx integrations translate between it and each driver's own value types, so the rules
/// for turning a driver value into a wrapper live in one place regardless of the database.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue<'a> {
    /// SQL `NULL`.
    Null,
    Int(i64),
    Float(f64),
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
}

impl<'a> DriverValue<'a> {
    /// Name of this kind of value, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DriverValue::Null => "NULL",
            DriverValue::Int(_) => "integer",
            DriverValue::Float(_) => "float",
            DriverValue::Text(_) => "text",
            DriverValue::Bytes(_) => "bytes",
        }
    }

    /// The payload of a `Text` or `Bytes` value as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DriverValue::Text(text) => Some(text.as_bytes()),
            DriverValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<i64> for DriverValue<'_> {
    fn from(value: i64) -> Self {
        DriverValue::Int(value)
    }
}

impl From<f64> for DriverValue<'_> {
    fn from(value: f64) -> Self {
        DriverValue::Float(value)
    }
}

impl From<String> for DriverValue<'_> {
    fn from(value: String) -> Self {
        DriverValue::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a str> for DriverValue<'a> {
    fn from(value: &'a str) -> Self {
        DriverValue::Text(Cow::Borrowed(value))
    }
}

impl From<Vec<u8>> for DriverValue<'_> {
    fn from(value: Vec<u8>) -> Self {
        DriverValue::Bytes(Cow::Owned(value))
    }
}

impl<'a> From<&'a [u8]> for DriverValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        DriverValue::Bytes(Cow::Borrowed(value))
    }
}
