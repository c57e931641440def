use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("Invalid driver kind: {kind}")]
    InvalidDriverKind { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseDriver {
    Memory,
    Postgres,
}

impl FromStr for DatabaseDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "memory" => Ok(Self::Memory),
            "pg" => Ok(Self::Postgres),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockDriver {
    Memory,
    Redis,
}

impl FromStr for LockDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drivers() {
        assert_eq!(DatabaseDriver::from_str("PG"), Ok(DatabaseDriver::Postgres));
        assert_eq!(DatabaseDriver::from_str("memory"), Ok(DatabaseDriver::Memory));
        assert_eq!(LockDriver::from_str("Redis"), Ok(LockDriver::Redis));
        assert_eq!(
            LockDriver::from_str("null"),
            Err(DriverError::InvalidDriverKind {
                kind: "null".into()
            })
        );
    }
}
