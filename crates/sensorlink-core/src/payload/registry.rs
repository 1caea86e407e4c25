use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::DecodeError;
use super::profile::{DEFAULT_PROFILE_NAME, DecodingProfile, FieldSet, Fields, UnreadPolicy};

/// Port-to-profile lookup.
///
/// Ports without an entry resolve to the fallback profile, so the default
/// registry decodes every port with the same layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileRegistry {
    ports: BTreeMap<u8, DecodingProfile>,
    fallback: DecodingProfile,
}

impl ProfileRegistry {
    pub fn new(fallback: DecodingProfile) -> Self {
        Self {
            ports: BTreeMap::new(),
            fallback,
        }
    }

    /// Registers `profile` for `port`, returning the profile it replaced.
    pub fn insert(&mut self, port: u8, profile: DecodingProfile) -> Option<DecodingProfile> {
        self.ports.insert(port, profile)
    }

    pub fn profile_for(&self, port: u8) -> &DecodingProfile {
        self.ports.get(&port).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &DecodingProfile {
        &self.fallback
    }

    pub fn ports(&self) -> impl Iterator<Item = (u8, &DecodingProfile)> {
        self.ports.iter().map(|(port, profile)| (*port, profile))
    }

    pub fn decode(&self, payload: &[u8], port: u8) -> Result<Fields, DecodeError> {
        let profile = self.profile_for(port);
        log::debug!(
            "decoding {} byte uplink on port {} with profile '{}'",
            payload.len(),
            port,
            profile.name
        );
        profile.decode(payload)
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, DecodeError> {
        let fallback = match &config.default {
            Some(profile) => profile.to_profile(DEFAULT_PROFILE_NAME)?,
            None => DecodingProfile::default(),
        };
        let mut registry = Self::new(fallback);
        for (port, profile) in &config.ports {
            let name = format!("port-{port}");
            registry.insert(*port, profile.to_profile(&name)?);
        }
        Ok(registry)
    }
}

/// Serialized registry configuration.
///
/// # Examples
/// ```
/// use sensorlink_core::{ProfileRegistry, RegistryConfig};
///
/// let config: RegistryConfig = serde_json::from_str(
///     r#"{ "ports": { "2": { "fields": ["humidity"] } } }"#,
/// )?;
/// let registry = ProfileRegistry::from_config(&config)?;
/// assert_eq!(registry.profile_for(2).name, "port-2");
/// assert_eq!(registry.profile_for(1).name, "default");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ProfileConfig>,
    #[serde(default)]
    pub ports: BTreeMap<u8, ProfileConfig>,
}

/// Serialized profile. Field names are validated when the registry is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fields: Vec<String>,
    #[serde(default)]
    pub unread: UnreadPolicy,
}

impl ProfileConfig {
    fn to_profile(&self, default_name: &str) -> Result<DecodingProfile, DecodeError> {
        let fields = FieldSet::from_names(&self.fields)?;
        let name = self.name.as_deref().unwrap_or(default_name);
        Ok(DecodingProfile::new(name, fields).with_unread(self.unread))
    }
}
