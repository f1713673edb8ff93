//! Identities and privileged roles.
//!
//! The engine knows exactly two privileged identities: the owner, who may
//! move funds and change configuration, and the randomness provider, who may
//! deliver outcomes. Both are plain 32-byte account ids; the all-zero id is
//! the null identity and can never hold a role.

use crate::errors::{EngineError, EngineResult};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 32-byte opaque account identity.
///
/// Serialized as a hex string so event logs and config dumps stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The null identity. Never a valid owner or provider.
    pub const ZERO: AccountId = AccountId([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Identity distinguished by a single leading byte. Handy for tests and
    /// the demo driver; `from_byte(0)` is the null identity.
    pub fn from_byte(b: u8) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = b;
        AccountId(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(D::Error::custom)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| D::Error::custom("account id must be 32 bytes"))?;
        Ok(AccountId(bytes))
    }
}

/// The two privileged roles and their checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: AccountId,
    provider: AccountId,
}

impl AccessControl {
    /// Creates the role pair, rejecting null identities for either role.
    pub fn new(owner: AccountId, provider: AccountId) -> EngineResult<Self> {
        if owner.is_zero() {
            return Err(EngineError::InvalidAddress("owner"));
        }
        if provider.is_zero() {
            return Err(EngineError::InvalidAddress("randomness provider"));
        }
        Ok(Self { owner, provider })
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn provider(&self) -> AccountId {
        self.provider
    }

    pub fn require_owner(&self, caller: AccountId) -> EngineResult<()> {
        if caller != self.owner {
            return Err(EngineError::Unauthorized("owner"));
        }
        Ok(())
    }

    pub fn require_provider(&self, caller: AccountId) -> EngineResult<()> {
        if caller != self.provider {
            return Err(EngineError::Unauthorized("randomness provider"));
        }
        Ok(())
    }

    /// Owner-only ownership handover. Returns the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> EngineResult<AccountId> {
        self.require_owner(caller)?;
        if new_owner.is_zero() {
            return Err(EngineError::InvalidAddress("owner"));
        }
        let old = self.owner;
        self.owner = new_owner;
        Ok(old)
    }

    /// Owner-only provider replacement. Returns the previous provider.
    pub fn set_provider(
        &mut self,
        caller: AccountId,
        new_provider: AccountId,
    ) -> EngineResult<AccountId> {
        self.require_owner(caller)?;
        if new_provider.is_zero() {
            return Err(EngineError::InvalidAddress("randomness provider"));
        }
        let old = self.provider;
        self.provider = new_provider;
        Ok(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_identities_rejected_at_construction() {
        let owner = AccountId::from_byte(1);
        assert_eq!(
            AccessControl::new(AccountId::ZERO, owner),
            Err(EngineError::InvalidAddress("owner"))
        );
        assert_eq!(
            AccessControl::new(owner, AccountId::ZERO),
            Err(EngineError::InvalidAddress("randomness provider"))
        );
    }

    #[test]
    fn test_role_checks() {
        let owner = AccountId::from_byte(1);
        let provider = AccountId::from_byte(2);
        let outsider = AccountId::from_byte(9);
        let access = AccessControl::new(owner, provider).unwrap();

        assert!(access.require_owner(owner).is_ok());
        assert_eq!(
            access.require_owner(provider),
            Err(EngineError::Unauthorized("owner"))
        );
        assert!(access.require_provider(provider).is_ok());
        assert_eq!(
            access.require_provider(outsider),
            Err(EngineError::Unauthorized("randomness provider"))
        );
    }

    #[test]
    fn test_ownership_transfer() {
        let owner = AccountId::from_byte(1);
        let provider = AccountId::from_byte(2);
        let heir = AccountId::from_byte(3);
        let mut access = AccessControl::new(owner, provider).unwrap();

        // Non-owner cannot hand over, null heir is rejected.
        assert!(access.transfer_ownership(provider, heir).is_err());
        assert_eq!(
            access.transfer_ownership(owner, AccountId::ZERO),
            Err(EngineError::InvalidAddress("owner"))
        );

        assert_eq!(access.transfer_ownership(owner, heir), Ok(owner));
        assert_eq!(access.owner(), heir);
        // The old owner lost its privileges.
        assert!(access.require_owner(owner).is_err());
    }

    #[test]
    fn test_provider_replacement() {
        let owner = AccountId::from_byte(1);
        let provider = AccountId::from_byte(2);
        let next = AccountId::from_byte(4);
        let mut access = AccessControl::new(owner, provider).unwrap();

        assert!(access.set_provider(provider, next).is_err());
        assert_eq!(access.set_provider(owner, next), Ok(provider));
        assert_eq!(access.provider(), next);
    }

    #[test]
    fn test_account_id_serde_round_trip() {
        let id = AccountId::from_byte(7);
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with("\"07"));
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
