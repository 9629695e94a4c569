// Container Domain Model

use serde::{Deserialize, Serialize};

use super::interapps::InteractiveApps;

/// Container image a step runs in. Identity key is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerImage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub url: String,
    /// Only meaningful when the job targets the alternate grid
    #[serde(default)]
    pub osg_image_path: String,
}

/// Auxiliary data container whose volumes are mounted into a step's container
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolumesFrom {
    pub name: String,
    #[serde(default)]
    pub name_prefix: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub host_path: String,
    #[serde(default)]
    pub container_path: String,
    #[serde(default)]
    pub read_only: bool,
}

/// Bind mount from the execution host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub host_path: String,
    pub container_path: String,
    #[serde(default)]
    pub read_only: bool,
}

/// Host device exposed to the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub host_path: String,
    pub container_path: String,
    #[serde(default)]
    pub cgroup_permissions: String,
}

/// Port published by an interactive container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ports {
    #[serde(default)]
    pub host_port: Option<u16>,
    pub container_port: u16,
    #[serde(default)]
    pub bind_to_host: bool,
}

/// Container declaration for a single step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub id: String,
    pub image: ContainerImage,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "container_volumes_from")]
    pub volumes_from: Vec<VolumesFrom>,
    #[serde(default, rename = "container_volumes")]
    pub volumes: Vec<Volume>,
    #[serde(default, rename = "container_devices")]
    pub devices: Vec<Device>,
    #[serde(default, rename = "container_ports")]
    pub ports: Vec<Ports>,
    #[serde(default)]
    pub network_mode: Option<String>,
    #[serde(default)]
    pub entrypoint: Option<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub uid: Option<u32>,
    #[serde(default)]
    pub skip_tmp_mount: bool,
    #[serde(default)]
    pub interactive_apps: Option<InteractiveApps>,
}
