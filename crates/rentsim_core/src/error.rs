use std::fmt;

/// A room type string that is not one of `studio`, `t2`, `t3`, `t4`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoomTypeError(pub String);

impl fmt::Display for ParseRoomTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown room type {:?} (expected studio, t2, t3 or t4)",
            self.0
        )
    }
}

impl std::error::Error for ParseRoomTypeError {}

/// An operating mode string that is neither long-term nor short-term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOperatingModeError(pub String);

impl fmt::Display for ParseOperatingModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown operating mode {:?} (expected longTerm or shortTerm)",
            self.0
        )
    }
}

impl std::error::Error for ParseOperatingModeError {}

/// A data source tag that does not follow the `provider|freshness` scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDataSourceError(pub String);

impl fmt::Display for ParseDataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown data source tag {:?}", self.0)
    }
}

impl std::error::Error for ParseDataSourceError {}
