//! Network selection.
//!
//! The analysis engine takes the network as an explicit value on every call.
//! There is deliberately no process-global "current network": multiple
//! analyses against different networks can run on the same process without
//! interfering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Stellar network tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Mainnet. Horizon responses here carry fewer invocation hints than
    /// the test tiers, which matters to the contract resolver.
    Public,
    Testnet,
    Futurenet,
    /// Local quickstart / standalone network.
    Standalone,
}

impl Network {
    /// The network passphrase, as used for transaction signing domains.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Public => "Public Global Stellar Network ; September 2015",
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Futurenet => "Test SDF Future Network ; October 2022",
            Network::Standalone => "Standalone Network ; February 2017",
        }
    }

    /// Short lowercase label used in placeholder values and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Network::Public => "public",
            Network::Testnet => "testnet",
            Network::Futurenet => "futurenet",
            Network::Standalone => "standalone",
        }
    }

    /// Production tiers expose reduced operation detail through Horizon,
    /// so unresolved contract ids are more common there.
    pub fn is_production(&self) -> bool {
        matches!(self, Network::Public)
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_tiers() {
        assert_eq!(Network::Public.label(), "public");
        assert!(Network::Public.is_production());
        assert!(!Network::Testnet.is_production());
        assert_eq!(Network::default(), Network::Testnet);
    }

    #[test]
    fn test_passphrases_are_distinct() {
        let all = [
            Network::Public,
            Network::Testnet,
            Network::Futurenet,
            Network::Standalone,
        ];
        for a in &all {
            for b in &all {
                if a != b {
                    assert_ne!(a.passphrase(), b.passphrase());
                }
            }
        }
    }
}
