//! Type-safe id wrappers for SportsWorldCentral resources.

use crate::error::{Result, SwcError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! resource_id {
    ($(#[$doc:meta])* $name:ident($inner:ty), $kind:literal, $as_inner:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            pub fn new(id: $inner) -> Self {
                Self(id)
            }

            pub fn $as_inner(&self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = SwcError;

            fn from_str(s: &str) -> Result<Self> {
                s.trim()
                    .parse()
                    .map(Self)
                    .map_err(|_| SwcError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

resource_id!(
    /// League identifier.
    ///
    /// ```rust
    /// use swc_client::LeagueId;
    ///
    /// let league_id: LeagueId = "5001".parse().unwrap();
    /// assert_eq!(league_id.as_u32(), 5001);
    /// assert_eq!(league_id.to_string(), "5001");
    /// ```
    LeagueId(u32),
    "league",
    as_u32
);

resource_id!(
    /// Fantasy team identifier.
    TeamId(u32),
    "team",
    as_u32
);

resource_id!(
    /// Player identifier.
    PlayerId(u64),
    "player",
    as_u64
);

resource_id!(PerformanceId(u64), "performance", as_u64);
