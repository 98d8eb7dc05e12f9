use std::fmt;

use serde::Serialize;

/// Anything carrying a satellite identity. PRN numbers are only unique
/// within a network, so both parts are needed.
pub trait Identified {
    fn prn_number(&self) -> u32;
    fn network(&self) -> &str;

    fn id(&self) -> SatelliteId {
        SatelliteId {
            prn_number: self.prn_number(),
            network: self.network().to_string(),
        }
    }
}

pub fn same_identity<A, B>(a: &A, b: &B) -> bool
where
    A: Identified + ?Sized,
    B: Identified + ?Sized,
{
    a.prn_number() == b.prn_number() && a.network() == b.network()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SatelliteId {
    pub prn_number: u32,
    pub network: String,
}

impl fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.network, self.prn_number)
    }
}

impl Identified for SatelliteId {
    fn prn_number(&self) -> u32 {
        self.prn_number
    }

    fn network(&self) -> &str {
        &self.network
    }
}
