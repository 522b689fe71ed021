//! Configuration and endpoint registry
//!
//! Logical call names map to structured endpoint descriptors through an
//! explicit registration API. Descriptors are validated at registration
//! time, not at call time, so a bad method or empty path fails fast during
//! bootstrap instead of on the first request.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use http::Method;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::error::{ClientResult, ErrorContext};
use crate::{config_error, registration_error};

/// Delimiter separating a logical call name from a REST-style trailing path
/// suffix, e.g. `"user.get/42"` resolves `user.get` and splices `/42` onto
/// the configured path.
pub const NAME_SUFFIX_DELIMITER: char = '/';

/// Top-level configuration file shape
#[derive(Default, Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    #[serde(default)]
    pub defaults: RequestDefaults,

    #[validate(nested)]
    #[serde(default)]
    pub endpoints: Vec<EndpointDescriptor>,
}

// Config file load and validation
impl Config {
    pub fn load_from_yaml<P>(path: P) -> ClientResult<Self>
    where
        P: AsRef<std::path::Path> + std::fmt::Display,
    {
        let conf_str = fs::read_to_string(&path)
            .map_err(|e| config_error!("Unable to read conf file from {path}: {e}"))?;
        log::debug!("Conf file read from {path}");
        Self::from_yaml(&conf_str)
    }

    pub fn from_yaml(conf_str: &str) -> ClientResult<Self> {
        log::trace!("Read conf file: {conf_str}");
        let conf: Config = serde_yaml::from_str(conf_str)
            .map_err(|e| config_error!("Unable to parse yaml conf: {e}"))?;

        log::trace!("Loaded conf: {conf:?}");

        // use validator to validate conf file
        conf.validate()
            .map_err(|e| config_error!("Conf validation failed: {e}"))?;

        Ok(conf)
    }

    #[allow(dead_code)]
    pub fn to_yaml(&self) -> ClientResult<String> {
        serde_yaml::to_string(self).with_context("Unable to serialize conf to yaml")
    }
}

/// Stack-wide request defaults, merged under per-call options
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestDefaults {
    /// Base URL spliced in front of endpoint paths at assembly time. The
    /// fingerprint is computed before this rewrite.
    #[serde(default)]
    pub base_url: String,

    /// Headers attached to every dispatch, overridable per call
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Default loading indicator message
    #[serde(default = "RequestDefaults::default_visibility_message")]
    pub visibility_message: String,

    /// Default toast display duration in milliseconds
    #[serde(default = "RequestDefaults::default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    /// Per-dispatch timeout in milliseconds, 0 means transport default
    #[serde(default)]
    pub timeout_ms: u64,
}

impl RequestDefaults {
    fn default_visibility_message() -> String {
        "Loading".to_string()
    }

    fn default_toast_duration_ms() -> u64 {
        2000
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            headers: HashMap::new(),
            visibility_message: Self::default_visibility_message(),
            toast_duration_ms: Self::default_toast_duration_ms(),
            timeout_ms: 0,
        }
    }
}

/// Structured endpoint descriptor, validated at registration time
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct EndpointDescriptor {
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default = "EndpointDescriptor::default_method")]
    #[validate(custom(function = "validate_method"))]
    pub method: String,

    #[validate(length(min = 1))]
    #[validate(custom(function = "validate_path"))]
    pub path: String,

    /// Default cache TTL in milliseconds for this endpoint, absent = no
    /// caching unless the caller asks for it
    #[serde(default)]
    pub cache_ttl_ms: Option<u64>,

    /// Default duplicate-suppression policy for this endpoint
    #[serde(default)]
    pub suppress_duplicates: bool,
}

impl EndpointDescriptor {
    fn default_method() -> String {
        "GET".to_string()
    }

    pub fn method(&self) -> Method {
        // registration validated the method string
        self.method.parse().unwrap_or(Method::GET)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_ms.map(Duration::from_millis)
    }
}

fn validate_method(method: &str) -> Result<(), ValidationError> {
    if method.parse::<Method>().is_err() {
        return Err(ValidationError::new("invalid_http_method"));
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), ValidationError> {
    if !path.starts_with('/') {
        return Err(ValidationError::new("path_must_be_absolute"));
    }
    Ok(())
}

/// The method and canonical target a logical name resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub method: Method,
    pub target: String,
    pub cache_ttl: Option<Duration>,
    pub suppress_duplicates: bool,
}

/// Registry mapping logical call names to endpoint descriptors
pub struct EndpointRegistry {
    endpoints: DashMap<String, Arc<EndpointDescriptor>>,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self {
            endpoints: DashMap::new(),
        }
    }

    /// Build a registry from a validated configuration
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let registry = Self::new();
        for descriptor in &config.endpoints {
            registry.register(descriptor.clone())?;
        }
        log::info!("Registered {} endpoints", registry.len());
        Ok(registry)
    }

    /// Register a descriptor, validating it first. Re-registering a name
    /// replaces the previous descriptor.
    pub fn register(&self, descriptor: EndpointDescriptor) -> ClientResult<()> {
        descriptor
            .validate()
            .map_err(|e| registration_error!("Endpoint {} invalid: {e}", descriptor.name))?;
        log::debug!(
            "Registering endpoint {} -> {} {}",
            descriptor.name,
            descriptor.method,
            descriptor.path
        );
        self.endpoints
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<EndpointDescriptor>> {
        self.endpoints.get(name).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Resolve a logical call name to method and canonical target.
    ///
    /// Anything after the first `/` in the name is a trailing path suffix
    /// spliced onto the configured path. An unregistered base name is a
    /// non-fatal warning: the call proceeds with a GET to the name itself
    /// so a missing config entry degrades rather than breaks dispatch.
    pub fn resolve(&self, name: &str) -> ResolvedEndpoint {
        let (base, suffix) = match name.split_once(NAME_SUFFIX_DELIMITER) {
            Some((base, rest)) => (base, Some(rest)),
            None => (name, None),
        };

        let Some(descriptor) = self.get(base) else {
            log::warn!("No endpoint registered for call name {base}, using fallback target");
            return ResolvedEndpoint {
                method: Method::GET,
                target: format!("/{name}"),
                cache_ttl: None,
                suppress_duplicates: false,
            };
        };

        let target = match suffix {
            Some(suffix) => format!("{}/{suffix}", descriptor.path),
            None => descriptor.path.clone(),
        };

        ResolvedEndpoint {
            method: descriptor.method(),
            target,
            cache_ttl: descriptor.cache_ttl(),
            suppress_duplicates: descriptor.suppress_duplicates,
        }
    }
}
