//! Error/exit code registry
//!
//! Every unrecoverable condition in the system reports through one of the
//! codes defined here. Codes are u16 values partitioned into fixed
//! 100-wide bands, one band per owning subsystem, so that external
//! automation can branch on the subsystem without parsing text. The
//! process exit status is the 3 high-order digits of the code (host exit
//! statuses are low-range, the full code goes to stderr).

/// Fleet/orchestrator band: 1500-1599
pub mod fleet {
    pub const INVALID_EXIT_CODE: u16 = 1500;
    pub const FAILED_CLIENT_INIT: u16 = 1501;
    pub const HOSTS_IN_BAD_STATE: u16 = 1502;
    pub const FAILED_HOST_EVACUATE: u16 = 1503;
    pub const CONFLICTING_PARAMETERS: u16 = 1504;
    pub const FAILED_HOSTS_DETECTED: u16 = 1505;
    pub const CATASTROPHIC_ALL_HOSTS_DOWN: u16 = 1506;
    pub const TOO_MANY_HOSTS_NEED_EVACUATION: u16 = 1507;
    pub const INVALID_PARAMETERS: u16 = 1508;
    pub const NO_FREE_VOLUMES: u16 = 1509;
    pub const FAILED_CREDENTIALS: u16 = 1510;
    pub const INVALID_EXIT_DESCRIPTOR: u16 = 1599;
}

/// Compute band: 1600-1699
pub mod compute {
    pub const FAILED_CLIENT_INIT: u16 = 1600;
    pub const FAILED_HOST_LOOKUP: u16 = 1601;
    pub const FAILED_FLAVORS_LIST: u16 = 1603;
    pub const FAILED_SERVERS_LIST: u16 = 1604;
    pub const FAILED_NETWORKS_LIST: u16 = 1605;
    pub const FAILED_HYPERVISORS_LIST: u16 = 1607;
    pub const FAILED_CREATE_SERVER: u16 = 1609;
    pub const FAILED_DELETE_SERVER: u16 = 1611;
    pub const FAILED_CREATE_SERVER_INVALID_INPUT: u16 = 1612;
    pub const FAILED_NAME_TO_ID_MAP: u16 = 1613;
    pub const FAILED_MISSING_HOSTNAME: u16 = 1614;
    pub const FAILED_IMAGES_LIST: u16 = 1615;
    pub const FAILED_DUPLICATE_SERVER_NAME: u16 = 1616;
    pub const FAILED_SERVER_CONVERGENCE: u16 = 1620;
}

/// Block-storage band: 1700-1799
pub mod storage {
    pub const FAILED_CLIENT_INIT: u16 = 1700;
    pub const FAILED_VOLUME_CHECK: u16 = 1701;
    pub const FAILED_CREATE_VOLUME: u16 = 1702;
    pub const FAILED_INVALID_VOLUME_PROPERTIES: u16 = 1703;
    pub const FAILED_VOLUMES_LIST: u16 = 1705;
    pub const FAILED_DUPLICATE_VOLUME_NAME: u16 = 1707;
    pub const FAILED_VOLUME_CONVERGENCE: u16 = 1710;
}

/// Image band: 1800-1899
pub mod image {
    pub const FAILED_CLIENT_INIT: u16 = 1800;
    pub const DUPLICATE_IMAGE_NAME: u16 = 1801;
    pub const FAILED_CREATE_MISSING_DATA: u16 = 1802;
    pub const FAILED_CREATE_IMAGE: u16 = 1803;
    pub const FAILED_CREATE_MISSING_NAME: u16 = 1805;
    pub const FAILED_IMAGES_LIST: u16 = 1806;
    pub const FAILED_COMMUNICATION: u16 = 1807;
    pub const FAILED_IMAGE_CONVERGENCE: u16 = 1810;
}

/// Orchestration (stack) band: 1900-1999
pub mod orchestration {
    pub const FAILED_CLIENT_INIT: u16 = 1900;
    pub const FAILED_STACKS_LIST: u16 = 1901;
    pub const FAILED_CREATE_STACK: u16 = 1902;
    pub const MISSING_PARAMS: u16 = 1903;
    pub const FAILED_VERIFY_NEW_STACK: u16 = 1904;
    pub const FAILED_DELETE_STACK: u16 = 1905;
    pub const FAILED_STACK_CONVERGENCE: u16 = 1906;
}

/// Network band: 2000-2099
pub mod network {
    pub const FAILED_CLIENT_INIT: u16 = 2000;
    pub const FAILED_NETWORKS_LIST: u16 = 2002;
}

/// Telemetry band: 2100-2199
pub mod telemetry {
    pub const FAILED_CLIENT_INIT: u16 = 2100;
    pub const FAILED_METERS_LIST: u16 = 2101;
}

/// Identity band: 2200-2299
pub mod identity {
    pub const FAILED_CLIENT_INIT: u16 = 2200;
    pub const FAILED_USERS_LIST: u16 = 2201;
}

/// Stable descriptor for a code. Unknown codes fall back to the reserved
/// invalid-code entry instead of panicking.
pub fn describe(code: u16) -> &'static str {
    match code {
        1500 => "FLEET_INVALID_EXIT_CODE",
        1501 => "FLEET_FAILED_CLIENT_INIT",
        1502 => "FLEET_HOSTS_IN_BAD_STATE",
        1503 => "FLEET_FAILED_HOST_EVACUATE",
        1504 => "FLEET_CONFLICTING_PARAMETERS",
        1505 => "FLEET_FAILED_HOSTS_DETECTED",
        1506 => "FLEET_CATASTROPHIC_ALL_HOSTS_DOWN",
        1507 => "FLEET_TOO_MANY_HOSTS_NEED_EVACUATION",
        1508 => "FLEET_INVALID_PARAMETERS",
        1509 => "FLEET_NO_FREE_VOLUMES",
        1510 => "FLEET_FAILED_CREDENTIALS",
        1599 => "FLEET_INVALID_EXIT_CODE_DESCRIPTOR",

        1600 => "COMPUTE_FAILED_CLIENT_INIT",
        1601 => "COMPUTE_FAILED_HOST_LOOKUP",
        1603 => "COMPUTE_FAILED_FLAVORS_LIST",
        1604 => "COMPUTE_FAILED_SERVERS_LIST",
        1605 => "COMPUTE_FAILED_NETWORKS_LIST",
        1607 => "COMPUTE_FAILED_HYPERVISORS_LIST",
        1609 => "COMPUTE_FAILED_CREATE_SERVER",
        1611 => "COMPUTE_FAILED_DELETE_SERVER",
        1612 => "COMPUTE_FAILED_CREATE_SERVER_INVALID_INPUT",
        1613 => "COMPUTE_FAILED_NAME_TO_ID_MAP",
        1614 => "COMPUTE_FAILED_MISSING_HOSTNAME",
        1615 => "COMPUTE_FAILED_IMAGES_LIST",
        1616 => "COMPUTE_FAILED_DUPLICATE_SERVER_NAME",
        1620 => "COMPUTE_FAILED_SERVER_CONVERGENCE",

        1700 => "STORAGE_FAILED_CLIENT_INIT",
        1701 => "STORAGE_FAILED_VOLUME_CHECK",
        1702 => "STORAGE_FAILED_CREATE_VOLUME",
        1703 => "STORAGE_FAILED_INVALID_VOLUME_PROPERTIES",
        1705 => "STORAGE_FAILED_VOLUMES_LIST",
        1707 => "STORAGE_FAILED_DUPLICATE_VOLUME_NAME",
        1710 => "STORAGE_FAILED_VOLUME_CONVERGENCE",

        1800 => "IMAGE_FAILED_CLIENT_INIT",
        1801 => "IMAGE_DUPLICATE_IMAGE_NAME",
        1802 => "IMAGE_FAILED_CREATE_MISSING_DATA",
        1803 => "IMAGE_FAILED_CREATE_IMAGE",
        1805 => "IMAGE_FAILED_CREATE_MISSING_NAME",
        1806 => "IMAGE_FAILED_IMAGES_LIST",
        1807 => "IMAGE_FAILED_COMMUNICATION",
        1810 => "IMAGE_FAILED_IMAGE_CONVERGENCE",

        1900 => "ORCH_FAILED_CLIENT_INIT",
        1901 => "ORCH_FAILED_STACKS_LIST",
        1902 => "ORCH_FAILED_CREATE_STACK",
        1903 => "ORCH_MISSING_PARAMS",
        1904 => "ORCH_FAILED_VERIFY_NEW_STACK",
        1905 => "ORCH_FAILED_DELETE_STACK",
        1906 => "ORCH_FAILED_STACK_CONVERGENCE",

        2000 => "NETWORK_FAILED_CLIENT_INIT",
        2002 => "NETWORK_FAILED_NETWORKS_LIST",

        2100 => "TELEMETRY_FAILED_CLIENT_INIT",
        2101 => "TELEMETRY_FAILED_METERS_LIST",

        2200 => "IDENTITY_FAILED_CLIENT_INIT",
        2201 => "IDENTITY_FAILED_USERS_LIST",

        _ => "FLEET_INVALID_EXIT_CODE",
    }
}

/// Owning subsystem for a code, derived from its band.
pub fn band_of(code: u16) -> &'static str {
    match code / 100 {
        15 => "fleet",
        16 => "compute",
        17 => "storage",
        18 => "image",
        19 => "orchestration",
        20 => "network",
        21 => "telemetry",
        22 => "identity",
        _ => "unknown",
    }
}

/// Coarse process exit status: the 3 high-order digits of the code.
pub fn status_of(code: u16) -> i32 {
    i32::from(code / 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_known_code() {
        assert_eq!(
            describe(fleet::CATASTROPHIC_ALL_HOSTS_DOWN),
            "FLEET_CATASTROPHIC_ALL_HOSTS_DOWN"
        );
        assert_eq!(
            describe(compute::FAILED_DUPLICATE_SERVER_NAME),
            "COMPUTE_FAILED_DUPLICATE_SERVER_NAME"
        );
    }

    #[test]
    fn unknown_code_falls_back_to_reserved_entry() {
        assert_eq!(describe(1555), "FLEET_INVALID_EXIT_CODE");
        assert_eq!(describe(9999), "FLEET_INVALID_EXIT_CODE");
    }

    #[test]
    fn bands_map_to_owning_module() {
        assert_eq!(band_of(1502), "fleet");
        assert_eq!(band_of(1616), "compute");
        assert_eq!(band_of(1702), "storage");
        assert_eq!(band_of(1803), "image");
        assert_eq!(band_of(1902), "orchestration");
        assert_eq!(band_of(2002), "network");
        assert_eq!(band_of(2101), "telemetry");
        assert_eq!(band_of(2201), "identity");
        assert_eq!(band_of(42), "unknown");
    }

    #[test]
    fn exit_status_uses_high_order_digits() {
        assert_eq!(status_of(1616), 161);
        assert_eq!(status_of(1506), 150);
        assert_eq!(status_of(2201), 220);
    }
}
