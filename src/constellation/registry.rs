use std::fmt;
use std::sync::Arc;

use super::hook::{LogUnknownNetwork, UnknownNetworkHook};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_CODE: &str = "GZ";
/// Altitude assumed for satellites of an unrecognised network, roughly in the
/// middle of the known MEO constellations.
pub const DEFAULT_ORBIT_ALTITUDE: f64 = 21.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constellation {
    Galileo,
    Gps,
    Glonass,
    BeiDou,
    Qzss,
    Unknown,
}

struct Entry {
    constellation: Constellation,
    codes: &'static [&'static str],
    name: &'static str,
    /// Nominal orbit radius in thousands of km, same unit as the ground radius.
    altitude: f64,
}

// First code of each entry is the canonical one.
static TABLE: [Entry; 5] = [
    Entry {
        constellation: Constellation::Galileo,
        codes: &["GA"],
        name: "Galileo",
        altitude: 23.222,
    },
    Entry {
        constellation: Constellation::Gps,
        codes: &["GP"],
        name: "GPS",
        altitude: 20.18,
    },
    Entry {
        constellation: Constellation::Glonass,
        codes: &["GL"],
        name: "GLONASS",
        altitude: 19.13,
    },
    Entry {
        constellation: Constellation::BeiDou,
        codes: &["GB", "BD"],
        name: "BeiDou",
        altitude: 21.528,
    },
    Entry {
        constellation: Constellation::Qzss,
        codes: &["GQ"],
        name: "QZSS",
        altitude: 42.164,
    },
];

impl Constellation {
    pub const KNOWN: [Constellation; 5] = [
        Constellation::Galileo,
        Constellation::Gps,
        Constellation::Glonass,
        Constellation::BeiDou,
        Constellation::Qzss,
    ];

    fn entry(self) -> Option<&'static Entry> {
        TABLE.iter().find(|e| e.constellation == self)
    }

    pub fn from_code(code: &str) -> Self {
        TABLE
            .iter()
            .find(|e| e.codes.iter().any(|c| *c == code))
            .map(|e| e.constellation)
            .unwrap_or(Constellation::Unknown)
    }

    pub fn from_name(name: &str) -> Self {
        TABLE
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.constellation)
            .unwrap_or(Constellation::Unknown)
    }

    pub fn name(self) -> &'static str {
        self.entry().map(|e| e.name).unwrap_or(UNKNOWN_NAME)
    }

    pub fn code(self) -> &'static str {
        self.entry().map(|e| e.codes[0]).unwrap_or(UNKNOWN_CODE)
    }

    pub fn nominal_altitude(self) -> f64 {
        self.entry()
            .map(|e| e.altitude)
            .unwrap_or(DEFAULT_ORBIT_ALTITUDE)
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup from talker/network codes to constellation metadata.
///
/// Built once at startup and shared by reference (or `Arc`) with every
/// projection call site. The only side effect is the unknown-network hook.
#[derive(Clone)]
pub struct ConstellationRegistry {
    hook: Arc<dyn UnknownNetworkHook>,
}

impl Default for ConstellationRegistry {
    fn default() -> Self {
        Self::new(Arc::new(LogUnknownNetwork::new()))
    }
}

impl fmt::Debug for ConstellationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstellationRegistry").finish_non_exhaustive()
    }
}

impl ConstellationRegistry {
    pub fn new(hook: Arc<dyn UnknownNetworkHook>) -> Self {
        Self { hook }
    }

    pub fn name_for_code(&self, code: &str) -> &'static str {
        Constellation::from_code(code).name()
    }

    pub fn code_for_name(&self, name: &str) -> &'static str {
        Constellation::from_name(name).code()
    }

    /// Nominal orbit altitude for a network code. Unknown codes fall back to
    /// [`DEFAULT_ORBIT_ALTITUDE`] and are reported to the hook.
    pub fn altitude_for_code(&self, code: &str) -> f64 {
        match Constellation::from_code(code) {
            Constellation::Unknown => {
                self.hook.unknown_network(code);
                DEFAULT_ORBIT_ALTITUDE
            }
            known => known.nominal_altitude(),
        }
    }
}
