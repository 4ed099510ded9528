//! Host identity shown in the page footer.
//!
//! The [`HostLookup`] trait is the seam between the assembler and the OS.
//! [`SystemHost`] asks the operating system through `sysinfo`; tests swap in
//! [`StaticHost`] or a failing lookup.
//!
//! A failed lookup never fails a request. [`host_or_empty`] logs it and
//! returns an empty string.

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HostIdentityError {
    #[error("the operating system did not report a host name")]
    Unavailable,
}

pub trait HostLookup: Send + Sync {
    fn host_name(&self) -> Result<String, HostIdentityError>;
}

/// Host name as reported by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostLookup for SystemHost {
    fn host_name(&self) -> Result<String, HostIdentityError> {
        sysinfo::System::host_name()
            .filter(|name| !name.is_empty())
            .ok_or(HostIdentityError::Unavailable)
    }
}

/// A fixed host name.
#[derive(Debug, Clone, Default)]
pub struct StaticHost(pub String);

impl HostLookup for StaticHost {
    fn host_name(&self) -> Result<String, HostIdentityError> {
        Ok(self.0.clone())
    }
}

/// Resolve the host name, or an empty string when the lookup fails.
pub fn host_or_empty(lookup: &dyn HostLookup) -> String {
    lookup.host_name().unwrap_or_else(|e| {
        warn!(error = %e, "Host name lookup failed");
        String::new()
    })
}
