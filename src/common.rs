//! Types needed in multiple modules

/// Enumeration of binary symbol values
#[derive(Clone, Eq, PartialEq, Debug, Copy, Default)]
pub enum Bit {
    /// Binary symbol `0`
    #[default]
    Zero = 0,
    /// Binary symbol `1`
    One = 1,
}

impl Bit {
    /// Returns the complementary bit.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl std::ops::BitXor for Bit {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Bit::from(self != rhs)
    }
}

impl std::ops::BitXorAssign for Bit {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

/// Custom error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid code parameters error
    #[error("Invalid code parameters: {0}")]
    InvalidCodeParameters(String),
    /// Invalid input error
    #[error("{0}")]
    InvalidInput(String),
    /// File read/write error
    #[error("{0}")]
    FileReadWriteError(#[from] std::io::Error),
    /// Serde read/write error
    #[error("{0}")]
    SerdeReadWriteError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_flip() {
        assert_eq!(Zero.flip(), One);
        assert_eq!(One.flip(), Zero);
    }

    #[test]
    fn test_xor() {
        assert_eq!(Zero ^ Zero, Zero);
        assert_eq!(Zero ^ One, One);
        assert_eq!(One ^ Zero, One);
        assert_eq!(One ^ One, Zero);
        let mut bit = One;
        bit ^= One;
        assert_eq!(bit, Zero);
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCodeParameters("n = 6".to_string());
        assert_eq!(err.to_string(), "Invalid code parameters: n = 6");
    }
}
