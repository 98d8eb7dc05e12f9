mod hook;
mod registry;

pub use hook::{LogUnknownNetwork, UnknownNetworkCounter, UnknownNetworkHook};
pub use registry::{
    Constellation, ConstellationRegistry, DEFAULT_ORBIT_ALTITUDE, UNKNOWN_CODE, UNKNOWN_NAME,
};
