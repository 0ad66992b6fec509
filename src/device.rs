use crate::capability::{
    CapabilityInstance, CapabilityIssue, CapabilityKind, CapabilityValue, TypedCapability,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// One physical unit, as reported by the device list.
/// `device` is the only identifying field; two records with the
/// same `device` are the same unit even if their names differ.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Device {
    pub device: String,
    #[serde(
        default,
        rename = "deviceName",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_name: Option<String>,
    pub sku: String,
    #[serde(default, rename = "type")]
    pub device_type: DeviceType,
    #[serde(default)]
    pub capabilities: Vec<DeviceCapability>,
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.device == other.device
    }
}

impl Eq for Device {}

impl std::hash::Hash for Device {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.device.hash(state)
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{} ({} {})", self.display_name(), self.sku, self.device)
    }
}

impl Device {
    pub fn new<S: Into<String>, I: Into<String>>(sku: S, id: I) -> Self {
        Self {
            device: id.into(),
            device_name: None,
            sku: sku.into(),
            device_type: DeviceType::default(),
            capabilities: vec![],
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.device.trim().is_empty()
    }

    /// Returns the name assigned in the Govee App, or, if there
    /// isn't one, a name computed from the SKU and the last couple
    /// of bytes of the device id, similar to the name shown by a
    /// BLE scan.
    pub fn display_name(&self) -> String {
        match self.device_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.computed_name(),
        }
    }

    pub fn computed_name(&self) -> String {
        let digits: Vec<char> = self.device.chars().filter(|&c| c != ':').collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("{}_{tail}", self.sku)
    }

    pub fn capability_by_instance(&self, instance: &CapabilityInstance) -> Option<&DeviceCapability> {
        self.capabilities.iter().find(|c| &c.instance == instance)
    }

    pub fn supports_rgb(&self) -> bool {
        self.capability_by_instance(&CapabilityInstance::ColorRgb)
            .is_some()
    }

    pub fn supports_brightness(&self) -> bool {
        self.capability_by_instance(&CapabilityInstance::Brightness)
            .is_some()
    }

    pub fn brightness_range(&self) -> Option<(u32, u32)> {
        let cap = self.capability_by_instance(&CapabilityInstance::Brightness)?;
        match cap.parameters {
            Some(DeviceParameters::Integer {
                range: IntegerRange { min, max, .. },
                ..
            }) => Some((min, max)),
            _ => None,
        }
    }
}

/// Broad category of a device. Informational only; nothing checks
/// that a device's capabilities make sense for its type.
#[derive(
    Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq, strum_macros::IntoStaticStr,
)]
pub enum DeviceType {
    #[serde(rename = "devices.types.light", alias = "light")]
    #[strum(serialize = "light")]
    #[default]
    Light,
    #[serde(rename = "devices.types.air_purifier", alias = "air_purifier")]
    #[strum(serialize = "air_purifier")]
    AirPurifier,
    #[serde(rename = "devices.types.thermometer", alias = "thermometer")]
    #[strum(serialize = "thermometer")]
    Thermometer,
    #[serde(rename = "devices.types.socket", alias = "socket")]
    #[strum(serialize = "socket")]
    Socket,
    #[serde(rename = "devices.types.sensor", alias = "sensor")]
    #[strum(serialize = "sensor")]
    Sensor,
    #[serde(rename = "devices.types.heater", alias = "heater")]
    #[strum(serialize = "heater")]
    Heater,
    #[serde(rename = "devices.types.humidifier", alias = "humidifier")]
    #[strum(serialize = "humidifier")]
    Humidifier,
    #[serde(
        rename = "devices.types.dehumidifier",
        alias = "dehumidifier",
        alias = "devices.types.dehumidifer"
    )]
    #[strum(serialize = "dehumidifier")]
    Dehumidifier,
    #[serde(rename = "devices.types.ice_maker", alias = "ice_maker")]
    #[strum(serialize = "ice_maker")]
    IceMaker,
    #[serde(rename = "devices.types.aroma_diffuser", alias = "aroma_diffuser")]
    #[strum(serialize = "aroma_diffuser")]
    AromaDiffuser,
    #[serde(other)]
    #[strum(serialize = "other")]
    Other,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name: &'static str = self.into();
        fmt.write_str(name)
    }
}

/// Describes a capability a device has, as opposed to its current
/// value (see [`CapabilityEntry`])
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DeviceCapability {
    #[serde(rename = "type")]
    pub kind: CapabilityKind,
    pub instance: CapabilityInstance,
    #[serde(default)]
    pub parameters: Option<DeviceParameters>,
}

impl DeviceCapability {
    pub fn enum_options(&self) -> &[EnumOption] {
        match &self.parameters {
            Some(DeviceParameters::Enum { options }) => options,
            _ => &[],
        }
    }

    /// Scene options in this capability; options whose value is
    /// neither an id nor an `{id, paramId}` pair are skipped
    pub fn scene_options(&self) -> Vec<SceneOption> {
        self.enum_options()
            .iter()
            .filter_map(|opt| match opt.as_scene() {
                Ok(scene) => Some(scene),
                Err(err) => {
                    log::warn!("{}: skipping scene option: {err:#}", self.instance);
                    None
                }
            })
            .collect()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "dataType")]
pub enum DeviceParameters {
    #[serde(rename = "ENUM")]
    Enum { options: Vec<EnumOption> },
    #[serde(rename = "INTEGER")]
    Integer {
        #[serde(default)]
        unit: Option<String>,
        range: IntegerRange,
    },
    #[serde(rename = "STRUCT")]
    Struct { fields: Vec<StructField> },
    /// Array and any newer parameter types
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StructField {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerRange {
    pub min: u32,
    pub max: u32,
    #[serde(default)]
    pub precision: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EnumOption {
    pub name: String,
    #[serde(default)]
    pub value: JsonValue,
}

impl EnumOption {
    pub fn as_scene(&self) -> anyhow::Result<SceneOption> {
        let value: SceneValue = serde_json::from_value(self.value.clone()).map_err(|err| {
            anyhow::anyhow!("'{}' has value {} ({err})", self.name, self.value)
        })?;
        Ok(SceneOption {
            name: self.name.clone(),
            value,
        })
    }
}

/// A reference to a preconfigured scene from the upstream scene
/// catalog. Neither id is range checked.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SceneOption {
    pub name: String,
    pub value: SceneValue,
}

/// The scene catalog reports an `{id, paramId}` pair, while diy
/// scenes are commonly reported as a bare id.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum SceneValue {
    Pair {
        id: u64,
        #[serde(rename = "paramId")]
        param_id: u64,
    },
    Id(u64),
}

impl SceneValue {
    pub fn id(&self) -> u64 {
        match self {
            Self::Pair { id, .. } | Self::Id(id) => *id,
        }
    }

    pub fn param_id(&self) -> Option<u64> {
        match self {
            Self::Pair { param_id, .. } => Some(*param_id),
            Self::Id(_) => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StateValue {
    #[serde(default)]
    pub value: JsonValue,
}

/// One reported facet of a device, as received. The value has not
/// been checked against the taxonomy; use [`CapabilityEntry::typed`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CapabilityEntry {
    #[serde(rename = "type", alias = "capability_type")]
    pub kind: CapabilityKind,
    pub instance: CapabilityInstance,
    pub state: StateValue,
}

impl CapabilityEntry {
    pub fn new(kind: CapabilityKind, instance: CapabilityInstance, value: JsonValue) -> Self {
        Self {
            kind,
            instance,
            state: StateValue { value },
        }
    }

    pub fn typed(&self) -> Result<TypedCapability, CapabilityIssue> {
        let value = CapabilityValue::from_json(&self.instance, &self.state.value)?;
        self.instance.check_kind(self.kind)?;
        Ok(TypedCapability {
            kind: self.kind,
            value,
        })
    }
}

/// The capabilities of one device at one observation point, in the
/// order the source reported them. Not sorted or deduplicated.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct DeviceState {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sku: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub device: String,
    #[serde(default)]
    pub capabilities: Vec<CapabilityEntry>,
}

/// The outcome of checking a [`DeviceState`] against the taxonomy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateReport {
    pub capabilities: Vec<TypedCapability>,
    pub issues: Vec<CapabilityIssue>,
}

impl StateReport {
    pub fn is_well_formed(&self) -> bool {
        self.issues.is_empty()
    }
}

impl DeviceState {
    /// Type every entry. Entries that don't fit the taxonomy are
    /// logged and reported in `issues`; they never fail the state
    /// as a whole.
    pub fn validate(&self) -> StateReport {
        let mut report = StateReport::default();
        for entry in &self.capabilities {
            match entry.typed() {
                Ok(cap) => report.capabilities.push(cap),
                Err(issue) => {
                    log::warn!("{}: {issue}", self.label());
                    report.issues.push(issue);
                }
            }
        }
        report
    }

    /// Reduce to the last reported entry for each instance, ordered
    /// by the position of that last entry
    pub fn latest_by_instance(&self) -> Vec<&CapabilityEntry> {
        let mut last_index = HashMap::new();
        for (idx, entry) in self.capabilities.iter().enumerate() {
            last_index.insert(&entry.instance, idx);
        }
        self.capabilities
            .iter()
            .enumerate()
            .filter(|(idx, entry)| last_index.get(&entry.instance) == Some(idx))
            .map(|(_, entry)| entry)
            .collect()
    }

    /// The most recently reported, well formed value for `instance`
    pub fn value_of(&self, instance: &CapabilityInstance) -> Option<CapabilityValue> {
        self.capabilities
            .iter()
            .rev()
            .filter(|entry| &entry.instance == instance)
            .find_map(|entry| entry.typed().ok())
            .map(|cap| cap.value)
    }

    fn label(&self) -> &str {
        if self.device.is_empty() {
            "<unidentified device>"
        } else {
            &self.device
        }
    }
}
