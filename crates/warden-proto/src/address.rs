//! Unit addresses.
//!
//! An [`Address`] is assigned by the ledger when a unit is deployed or an
//! account is created. It is never mutated afterwards and is only ever
//! compared for equality.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// Size of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Opaque identifier for a deployed unit or an external account.
///
/// `Address::ZERO` doubles as the "unset" sentinel: no ledger ever assigns it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address, used where no address has been recorded.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Wrap raw address bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Whether this is the unset sentinel.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = ProtoError;

    /// Parse `0x`-prefixed (or bare) hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| ProtoError::InvalidAddress { input: s.to_string(), reason: e.to_string() })?;

        Ok(Self(bytes))
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}
