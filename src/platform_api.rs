use crate::capability::{CapabilityInstance, CapabilityKind, CapabilityValue};
use crate::device::{Device, DeviceCapability, DeviceState, SceneOption};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// Envelopes used by the Govee Platform API V1:
// <https://developer.govee.com/reference/get-you-devices>
//
// Nothing here performs any I/O; these are the shapes a transport
// produces and consumes, so that callers holding a raw response body
// can get at the model types inside it.

const CODE_OK: u32 = 200;

/// Response to `GET /router/api/v1/user/devices`
#[derive(Deserialize, Serialize, Debug)]
pub struct GetDevicesResponse {
    pub code: u32,
    pub message: String,
    #[serde(default)]
    pub data: Vec<Device>,
}

/// Response to `POST /router/api/v1/device/state`
#[derive(Deserialize, Serialize, Debug)]
pub struct GetDeviceStateResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub code: u32,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(default)]
    pub payload: DeviceState,
}

/// Response to `POST /router/api/v1/device/scenes` and
/// `POST /router/api/v1/device/diy-scenes`
#[derive(Deserialize, Serialize, Debug)]
pub struct GetDeviceScenesResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub code: u32,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(default)]
    pub payload: DeviceScenesPayload,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct DeviceScenesPayload {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub capabilities: Vec<DeviceCapability>,
}

fn check_code(code: u32, message: &str) -> anyhow::Result<()> {
    if code != CODE_OK {
        anyhow::bail!("API error {code}: {message}");
    }
    Ok(())
}

impl GetDevicesResponse {
    pub fn into_devices(self) -> anyhow::Result<Vec<Device>> {
        check_code(self.code, &self.message)?;
        Ok(self.data)
    }
}

impl GetDeviceStateResponse {
    pub fn into_state(self) -> anyhow::Result<DeviceState> {
        check_code(self.code, &self.message)?;
        Ok(self.payload)
    }
}

impl GetDeviceScenesResponse {
    /// Returns the scene options listed under `instance`, typically
    /// `lightScene` or `diyScene`
    pub fn into_scene_options(
        self,
        instance: &CapabilityInstance,
    ) -> anyhow::Result<Vec<SceneOption>> {
        check_code(self.code, &self.message)?;
        let cap = self
            .payload
            .capabilities
            .iter()
            .find(|cap| &cap.instance == instance)
            .ok_or_else(|| anyhow::anyhow!("No {instance} scenes found"))?;
        Ok(cap.scene_options())
    }
}

/// Accept either a full state response envelope or a bare
/// `{"capabilities": [...]}` payload
pub fn parse_device_state<S: AsRef<[u8]>>(text: S) -> anyhow::Result<DeviceState> {
    let text = text.as_ref();
    let value: JsonValue = from_json(text)?;
    if value.get("payload").is_some() {
        let resp: GetDeviceStateResponse = from_json(text)?;
        resp.into_state()
    } else {
        from_json(text)
    }
}

/// Accept either a device list envelope or a bare array of devices
pub fn parse_device_list<S: AsRef<[u8]>>(text: S) -> anyhow::Result<Vec<Device>> {
    let text = text.as_ref();
    let value: JsonValue = from_json(text)?;
    if value.is_array() {
        from_json(text)
    } else {
        let resp: GetDevicesResponse = from_json(text)?;
        resp.into_devices()
    }
}

#[derive(Serialize, Debug)]
pub struct ControlDeviceRequest {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub payload: ControlDevicePayload,
}

#[derive(Serialize, Debug)]
pub struct ControlDevicePayload {
    pub sku: String,
    pub device: String,
    pub capability: ControlDeviceCapability,
}

#[derive(Serialize, Debug)]
pub struct ControlDeviceCapability {
    #[serde(rename = "type")]
    pub kind: CapabilityKind,
    pub instance: CapabilityInstance,
    pub value: JsonValue,
}

impl ControlDeviceRequest {
    /// Build the body of a `POST /router/api/v1/device/control`,
    /// using the default kind for the value's instance
    pub fn new(device: &Device, value: &CapabilityValue) -> Self {
        let instance = value.instance();
        let kind = device
            .capability_by_instance(&instance)
            .map(|cap| cap.kind)
            .unwrap_or_else(|| instance.default_kind());
        Self::with_kind(device, kind, value)
    }

    pub fn with_kind(device: &Device, kind: CapabilityKind, value: &CapabilityValue) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            payload: ControlDevicePayload {
                sku: device.sku.to_string(),
                device: device.device.to_string(),
                capability: ControlDeviceCapability {
                    kind,
                    instance: value.instance(),
                    value: value.to_json(),
                },
            },
        }
    }
}

pub fn from_json<T: serde::de::DeserializeOwned, S: AsRef<[u8]>>(text: S) -> anyhow::Result<T> {
    let text = text.as_ref();
    serde_json_path_to_error::from_slice(text)
        .map_err(|err| anyhow::anyhow!("{err}. Input: {}", String::from_utf8_lossy(text)))
}

/// Read a payload from `path`, or from stdin if `path` is `-` or absent
pub fn read_payload(path: Option<&std::path::Path>) -> anyhow::Result<Vec<u8>> {
    use std::io::Read;
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut data = vec![];
            std::io::stdin()
                .read_to_end(&mut data)
                .context("reading stdin")?;
            Ok(data)
        }
    }
}
