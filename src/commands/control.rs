use crate::capability::{CapabilityKind, CapabilityValue, ColorValue};
use crate::color::parse_color;
use crate::device::Device;
use crate::platform_api::{from_json, parse_device_list, read_payload, ControlDeviceRequest};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Print the body of a device control request. Nothing is sent.
#[derive(clap::Parser, Debug)]
pub struct ControlCommand {
    #[arg(long)]
    pub device: String,

    /// Required unless --devices is used to look the device up
    #[arg(long)]
    pub sku: Option<String>,

    /// A device list response used to resolve the sku and the
    /// kinds the device advertises for each capability
    #[arg(long)]
    pub devices: Option<PathBuf>,

    #[command(subcommand)]
    cmd: SubCommand,
}

#[derive(clap::Parser, Debug, PartialEq)]
enum SubCommand {
    On,
    Off,
    Brightness {
        percent: u8,
    },
    /// Set the color via colorRgb
    Color {
        /// A preset name, such as "Warm White", or any CSS color
        color: String,
    },
    /// Set the color via the `color` instance, sending an {r, g, b}
    /// triple rather than a packed integer
    ColorTriple {
        color: String,
    },
    Scene {
        id: u64,
    },
    DiyScene {
        id: u64,
    },
    /// Send an arbitrary value for an instance
    Raw {
        #[arg(long)]
        kind: String,
        instance: String,
        /// The value, as JSON
        value: String,
    },
}

impl ControlCommand {
    fn resolve_device(&self) -> anyhow::Result<Device> {
        if let Some(path) = &self.devices {
            let data = read_payload(Some(path))?;
            let device = parse_device_list(&data)?
                .into_iter()
                .find(|d| d.device == self.device)
                .ok_or_else(|| anyhow::anyhow!("device {} not found", self.device))?;
            if let Some(sku) = &self.sku {
                if !sku.eq_ignore_ascii_case(&device.sku) {
                    log::warn!(
                        "--sku {sku} doesn't match {} from the device list",
                        device.sku
                    );
                }
            }
            return Ok(device);
        }

        match &self.sku {
            Some(sku) => Ok(Device::new(sku, &self.device)),
            None => anyhow::bail!("Please specify either --sku or --devices"),
        }
    }

    fn request(&self, device: &Device) -> anyhow::Result<ControlDeviceRequest> {
        let value = match &self.cmd {
            SubCommand::On => CapabilityValue::PowerSwitch(true),
            SubCommand::Off => CapabilityValue::PowerSwitch(false),
            SubCommand::Brightness { percent } => {
                let percent = match device.brightness_range() {
                    Some((min, max)) => (u32::from(*percent)).max(min).min(max),
                    None => u32::from(*percent).min(100),
                };
                CapabilityValue::Brightness(percent.min(100) as u8)
            }
            SubCommand::Color { color } => {
                let color = parse_color(color)?;
                if !device.capabilities.is_empty() && !device.supports_rgb() {
                    log::warn!("{device} does not advertise colorRgb");
                }
                CapabilityValue::ColorRgb(color.to_packed())
            }
            SubCommand::ColorTriple { color } => {
                CapabilityValue::Color(ColorValue::Triple(parse_color(color)?))
            }
            SubCommand::Scene { id } => CapabilityValue::LightScene(*id),
            SubCommand::DiyScene { id } => CapabilityValue::DiyScene(*id),
            SubCommand::Raw {
                kind,
                instance,
                value,
            } => {
                let kind: CapabilityKind = serde_json::from_value(JsonValue::String(kind.clone()))?;
                if kind == CapabilityKind::Other {
                    log::warn!("{kind:?} is not a recognized capability kind");
                }
                let value: JsonValue = from_json(value)?;
                let value = CapabilityValue::raw(instance.as_str(), value)?;
                return Ok(ControlDeviceRequest::with_kind(device, kind, &value));
            }
        };
        Ok(ControlDeviceRequest::new(device, &value))
    }

    pub fn run(&self, _args: &crate::Args) -> anyhow::Result<()> {
        let device = self.resolve_device()?;
        let request = self.request(&device)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    fn capability(args: &[&str]) -> JsonValue {
        let cmd = ControlCommand::try_parse_from(args).unwrap();
        let device = cmd.resolve_device().unwrap();
        let request = cmd.request(&device).unwrap();
        serde_json::to_value(&request).unwrap()["payload"]["capability"].clone()
    }

    fn with(extra: &[&str]) -> JsonValue {
        let mut args = vec!["control", "--device", "AA:BB", "--sku", "H6072"];
        args.extend_from_slice(extra);
        capability(&args)
    }

    #[test]
    fn control_bodies() {
        k9::assert_equal!(
            with(&["on"]),
            json!({"type": "devices.capabilities.on_off", "instance": "powerSwitch", "value": true})
        );
        k9::assert_equal!(
            with(&["brightness", "250"])["value"],
            json!(100)
        );
        k9::assert_equal!(
            with(&["color", "red"]),
            json!({"type": "devices.capabilities.color_setting", "instance": "colorRgb", "value": 16711680})
        );
        k9::assert_equal!(
            with(&["color-triple", "Warm White"])["value"],
            json!({"r": 255, "g": 180, "b": 107})
        );
        k9::assert_equal!(
            with(&["scene", "3853"]),
            json!({"type": "devices.capabilities.dynamic_scene", "instance": "lightScene", "value": 3853})
        );
        k9::assert_equal!(
            with(&["raw", "--kind", "devices.capabilities.toggle", "gradientToggle", "1"]),
            json!({"type": "devices.capabilities.toggle", "instance": "gradientToggle", "value": 1})
        );
    }

    #[test]
    fn raw_values_for_known_instances_must_fit() {
        let cmd = ControlCommand::try_parse_from([
            "control",
            "--device",
            "AA:BB",
            "--sku",
            "H6072",
            "raw",
            "--kind",
            "devices.capabilities.on_off",
            "powerSwitch",
            "\"banana\"",
        ])
        .unwrap();
        let device = cmd.resolve_device().unwrap();
        k9::assert_equal!(
            cmd.request(&device).unwrap_err().to_string(),
            "powerSwitch: expected boolean, got \"banana\""
        );

        k9::assert_equal!(
            with(&["raw", "--kind", "devices.capabilities.on_off", "powerSwitch", "false"]),
            json!({"type": "devices.capabilities.on_off", "instance": "powerSwitch", "value": false})
        );
    }

    #[test]
    fn device_list_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devices.json");
        std::fs::write(&path, include_str!("../../test-data/list_devices.json")).unwrap();
        let path = path.to_str().unwrap();

        let cmd = ControlCommand::try_parse_from([
            "control",
            "--device",
            "AA:BB:CC:DD:EE:FF:12:34",
            "--devices",
            path,
            "brightness",
            "0",
        ])
        .unwrap();
        let device = cmd.resolve_device().unwrap();
        k9::assert_equal!(device.sku, "H6072");
        let body = serde_json::to_value(cmd.request(&device).unwrap()).unwrap();
        // clamped to the advertised range, under the advertised kind
        k9::assert_equal!(
            body["payload"]["capability"],
            json!({"type": "devices.capabilities.range", "instance": "brightness", "value": 1})
        );

        let cmd =
            ControlCommand::try_parse_from(["control", "--device", "nope", "--devices", path, "on"])
                .unwrap();
        k9::assert_equal!(
            cmd.resolve_device().unwrap_err().to_string(),
            "device nope not found"
        );

        let cmd = ControlCommand::try_parse_from(["control", "--device", "AA:BB", "on"]).unwrap();
        assert!(cmd.resolve_device().is_err());
    }
}
