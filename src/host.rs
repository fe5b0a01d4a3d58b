//! Identifiers read from the host: the MAC address and the POSIX user and group ids.

/// Local id used when the platform has no notion of the requested domain.
pub const FALLBACK_LOCAL_ID: u64 = 1000;

/// Returns the MAC address of the first usable network interface as a 48-bit integer.
pub fn mac_node() -> Option<u64> {
    match mac_address::get_mac_address() {
        Ok(Some(mac)) => Some(
            mac.bytes()
                .iter()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        ),
        Ok(None) => None,
        Err(err) => {
            tracing::debug!(error = %err, "could not read host MAC address");
            None
        }
    }
}

/// Returns the default DCE Security local id for `local_domain`.
///
/// Domain 0 (person) maps to the current user id and domain 1 (group) to the current group id.
pub fn local_id(local_domain: u64) -> u64 {
    #[cfg(unix)]
    {
        // SAFETY: getuid and getgid have no preconditions and cannot fail.
        match local_domain {
            0 => return u64::from(unsafe { libc::getuid() }),
            1 => return u64::from(unsafe { libc::getgid() }),
            _ => {}
        }
    }

    #[cfg(not(unix))]
    let _ = local_domain;

    FALLBACK_LOCAL_ID
}
