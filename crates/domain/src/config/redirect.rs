use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

use super::errors::ConfigError;
use crate::packet::IpVersion;

/// Rewrites the destination of outgoing DNS queries to a fixed resolver.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RedirectConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub ipv4_target: Option<String>,

    #[serde(default)]
    pub ipv6_target: Option<String>,
}

impl RedirectConfig {
    pub fn target_for(&self, version: IpVersion) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        match version {
            IpVersion::V4 => self.ipv4_target.as_deref(),
            IpVersion::V6 => self.ipv6_target.as_deref(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.ipv4_target.is_none() && self.ipv6_target.is_none() {
            return Err(ConfigError::Validation(
                "Redirect is enabled but no target is configured".to_string(),
            ));
        }

        if let Some(target) = &self.ipv4_target {
            target.parse::<Ipv4Addr>().map_err(|_| {
                ConfigError::Validation(format!("Invalid IPv4 redirect target '{}'", target))
            })?;
        }

        if let Some(target) = &self.ipv6_target {
            let addr = target.parse::<Ipv6Addr>().map_err(|_| {
                ConfigError::Validation(format!("Invalid IPv6 redirect target '{}'", target))
            })?;
            if addr.to_ipv4_mapped().is_some() {
                return Err(ConfigError::Validation(format!(
                    "IPv6 redirect target '{}' is an IPv4-mapped address",
                    target
                )));
            }
        }

        Ok(())
    }
}
