//! Typed create specifications
//!
//! Every create operation takes an explicit spec with required/optional
//! fields validated before any API call is issued.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default size for volumes created without an explicit size.
pub const DEFAULT_VOLUME_SIZE_GB: u32 = 2;

/// Server create spec. All four references are required; image, flavor and
/// network are display names resolved to ids before the boot request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSpec {
    pub name: String,
    pub image: String,
    pub flavor: String,
    pub network: String,
}

impl ServerSpec {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("image", &self.image),
            ("flavor", &self.flavor),
            ("network", &self.network),
        ] {
            if value.trim().is_empty() {
                return Err(CloudError::InvalidConfig(format!(
                    "server spec requires {field}"
                )));
            }
        }
        Ok(())
    }
}

/// Fully resolved boot request handed to the compute client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootRequest {
    pub name: String,
    pub image_id: String,
    pub flavor_id: String,
    pub network_id: String,
}

/// Volume create spec. Only the name is required; the size defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSpec {
    pub name: String,

    #[serde(default)]
    pub size_gb: Option<u32>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl VolumeSpec {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CloudError::InvalidConfig(
                "volume spec requires a name".to_string(),
            ));
        }
        Ok(())
    }

    pub fn size_or_default(&self) -> u32 {
        self.size_gb.unwrap_or(DEFAULT_VOLUME_SIZE_GB)
    }
}

/// Source of the image payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImageSource {
    File(PathBuf),
    Data(Vec<u8>),
}

/// Image create spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSpec {
    pub name: String,
    pub source: ImageSource,

    #[serde(default = "default_disk_format")]
    pub disk_format: String,

    #[serde(default = "default_container_format")]
    pub container_format: String,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

fn default_disk_format() -> String {
    "qcow2".to_string()
}

fn default_container_format() -> String {
    "bare".to_string()
}

impl ImageSpec {
    pub fn new(name: impl Into<String>, source: ImageSource) -> Self {
        Self {
            name: name.into(),
            source,
            disk_format: default_disk_format(),
            container_format: default_container_format(),
            properties: BTreeMap::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CloudError::InvalidConfig(
                "image spec requires a name".to_string(),
            ));
        }
        if let ImageSource::Data(data) = &self.source
            && data.is_empty()
        {
            return Err(CloudError::InvalidConfig(
                "image spec requires a non-empty payload".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stack create spec: a name plus the full template body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackSpec {
    pub name: String,
    pub template: String,
}

impl StackSpec {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.template.trim().is_empty() {
            return Err(CloudError::InvalidConfig(
                "stack spec requires name and template".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_spec_rejects_missing_reference() {
        let spec = ServerSpec {
            name: "svr1".to_string(),
            image: "".to_string(),
            flavor: "m1medium".to_string(),
            network: "newnet".to_string(),
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn volume_spec_defaults_size() {
        let spec = VolumeSpec {
            name: "vol1".to_string(),
            size_gb: None,
            description: None,
            metadata: BTreeMap::new(),
        };
        assert!(spec.validate().is_ok());
        assert_eq!(spec.size_or_default(), DEFAULT_VOLUME_SIZE_GB);
    }

    #[test]
    fn volume_spec_parses_json_config() {
        let spec: VolumeSpec = serde_json::from_str(
            r#"{ "name": "foo", "size_gb": 4, "metadata": { "bar": "baz" } }"#,
        )
        .unwrap();
        assert_eq!(spec.size_or_default(), 4);
        assert_eq!(spec.metadata.get("bar").map(String::as_str), Some("baz"));
    }

    #[test]
    fn image_spec_rejects_empty_payload() {
        let spec = ImageSpec::new("img", ImageSource::Data(Vec::new()));
        assert!(spec.validate().is_err());
    }
}
