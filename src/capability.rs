use crate::color::{decode, RgbColor, MAX_PACKED};
use crate::temperature::TemperatureValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as JsonValue};

// The capability vocabulary of the Govee Platform API V1:
// <https://developer.govee.com/reference/get-you-devices>
//
// Both enumerations are closed, but grow across schema revisions,
// so each has a fallback variant that new upstream values decode
// into instead of failing the whole payload.

#[derive(
    Deserialize,
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
pub enum CapabilityKind {
    #[serde(rename = "devices.capabilities.on_off", alias = "on_off")]
    #[strum(serialize = "devices.capabilities.on_off")]
    OnOff,
    #[serde(rename = "devices.capabilities.toggle", alias = "toggle")]
    #[strum(serialize = "devices.capabilities.toggle")]
    Toggle,
    #[serde(rename = "devices.capabilities.brightness", alias = "brightness")]
    #[strum(serialize = "devices.capabilities.brightness")]
    Brightness,
    #[serde(rename = "devices.capabilities.range", alias = "range")]
    #[strum(serialize = "devices.capabilities.range")]
    Range,
    #[serde(rename = "devices.capabilities.mode", alias = "mode")]
    #[strum(serialize = "devices.capabilities.mode")]
    Mode,
    #[serde(rename = "devices.capabilities.color", alias = "color")]
    #[strum(serialize = "devices.capabilities.color")]
    Color,
    #[serde(rename = "devices.capabilities.color_setting", alias = "color_setting")]
    #[strum(serialize = "devices.capabilities.color_setting")]
    ColorSetting,
    #[serde(
        rename = "devices.capabilities.diy_color_setting",
        alias = "diy_color_setting"
    )]
    #[strum(serialize = "devices.capabilities.diy_color_setting")]
    DiyColorSetting,
    #[serde(
        rename = "devices.capabilities.segment_color_setting",
        alias = "segment_color_setting"
    )]
    #[strum(serialize = "devices.capabilities.segment_color_setting")]
    SegmentColorSetting,
    #[serde(rename = "devices.capabilities.music_setting", alias = "music_setting")]
    #[strum(serialize = "devices.capabilities.music_setting")]
    MusicSetting,
    #[serde(rename = "devices.capabilities.dynamic_scene", alias = "dynamic_scene")]
    #[strum(serialize = "devices.capabilities.dynamic_scene")]
    DynamicScene,
    #[serde(rename = "devices.capabilities.work_mode", alias = "work_mode")]
    #[strum(serialize = "devices.capabilities.work_mode")]
    WorkMode,
    #[serde(
        rename = "devices.capabilities.dynamic_setting",
        alias = "dynamic_setting"
    )]
    #[strum(serialize = "devices.capabilities.dynamic_setting")]
    DynamicSetting,
    #[serde(
        rename = "devices.capabilities.temperature_setting",
        alias = "temperature_setting"
    )]
    #[strum(serialize = "devices.capabilities.temperature_setting")]
    TemperatureSetting,
    #[serde(rename = "devices.capabilities.online", alias = "online")]
    #[strum(serialize = "devices.capabilities.online")]
    Online,
    #[serde(rename = "devices.capabilities.property", alias = "property")]
    #[strum(serialize = "devices.capabilities.property")]
    Property,
    #[serde(
        rename = "devices.capabilities.sensorTemperature",
        alias = "sensorTemperature"
    )]
    #[strum(serialize = "devices.capabilities.sensorTemperature")]
    SensorTemperature,
    #[serde(
        rename = "devices.capabilities.sensorHumidity",
        alias = "sensorHumidity"
    )]
    #[strum(serialize = "devices.capabilities.sensorHumidity")]
    SensorHumidity,
    #[serde(other)]
    #[strum(serialize = "other")]
    Other,
}

impl CapabilityKind {
    /// The name used on the wire, eg: `devices.capabilities.on_off`
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.write_str(self.as_str())
    }
}

/// A specific control point within a capability kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CapabilityInstance {
    PowerSwitch,
    Brightness,
    Color,
    ColorRgb,
    DiyScene,
    LightScene,
    Online,
    SensorTemperature,
    SensorHumidity,
    /// Not (yet) part of the taxonomy; holds the name as reported
    Unknown(String),
}

/// Every instance the taxonomy knows how to type
pub const KNOWN_INSTANCES: [CapabilityInstance; 9] = [
    CapabilityInstance::PowerSwitch,
    CapabilityInstance::Brightness,
    CapabilityInstance::Color,
    CapabilityInstance::ColorRgb,
    CapabilityInstance::DiyScene,
    CapabilityInstance::LightScene,
    CapabilityInstance::Online,
    CapabilityInstance::SensorTemperature,
    CapabilityInstance::SensorHumidity,
];

impl CapabilityInstance {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PowerSwitch => "powerSwitch",
            Self::Brightness => "brightness",
            Self::Color => "color",
            Self::ColorRgb => "colorRgb",
            Self::DiyScene => "diyScene",
            Self::LightScene => "lightScene",
            Self::Online => "online",
            Self::SensorTemperature => "sensorTemperature",
            Self::SensorHumidity => "sensorHumidity",
            Self::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// The shape that `state.value` must have for this instance.
    /// Existing rows must never change; add new instances instead.
    pub fn value_shape(&self) -> ValueShape {
        match self {
            Self::PowerSwitch | Self::Online => ValueShape::Boolean,
            Self::Brightness => ValueShape::Percent,
            Self::Color => ValueShape::PackedColorOrTriple,
            Self::ColorRgb => ValueShape::PackedColor,
            Self::DiyScene | Self::LightScene => ValueShape::SceneId,
            Self::SensorTemperature => ValueShape::Number,
            Self::SensorHumidity => ValueShape::Humidity,
            Self::Unknown(_) => ValueShape::Any,
        }
    }

    /// The capability kinds this instance may be reported under.
    /// The first entry is the kind used when issuing control requests.
    pub fn kinds(&self) -> &'static [CapabilityKind] {
        use CapabilityKind as K;
        match self {
            Self::PowerSwitch => &[K::OnOff],
            Self::Brightness => &[K::Range, K::Brightness],
            Self::Color => &[K::ColorSetting, K::Color],
            Self::ColorRgb => &[K::ColorSetting, K::DiyColorSetting],
            Self::DiyScene => &[K::DynamicScene, K::DiyColorSetting],
            Self::LightScene => &[K::DynamicScene],
            Self::Online => &[K::Online],
            Self::SensorTemperature => &[K::Property, K::SensorTemperature],
            Self::SensorHumidity => &[K::Property, K::SensorHumidity],
            Self::Unknown(_) => &[],
        }
    }

    pub fn default_kind(&self) -> CapabilityKind {
        self.kinds()
            .first()
            .copied()
            .unwrap_or(CapabilityKind::Other)
    }

    pub fn check_kind(&self, kind: CapabilityKind) -> Result<(), CapabilityIssue> {
        if self.kinds().contains(&kind) {
            Ok(())
        } else {
            Err(CapabilityIssue::KindMismatch {
                instance: self.clone(),
                kind,
            })
        }
    }
}

impl From<&str> for CapabilityInstance {
    fn from(s: &str) -> Self {
        KNOWN_INSTANCES
            .iter()
            .find(|instance| instance.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Self::Unknown(s.to_string()))
    }
}

impl std::fmt::Display for CapabilityInstance {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl Serialize for CapabilityInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CapabilityInstance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Boolean,
    /// An integer in the range 0-100
    Percent,
    /// A 0xRRGGBB integer
    PackedColor,
    PackedColorOrTriple,
    SceneId,
    Number,
    /// `{"currentHumidity": number}`
    Humidity,
    /// The instance is unknown, so is its shape
    Any,
}

impl std::fmt::Display for ValueShape {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            Self::Boolean => "boolean",
            Self::Percent => "number 0-100",
            Self::PackedColor => "packed color integer",
            Self::PackedColorOrTriple => "packed color integer or {r, g, b}",
            Self::SceneId => "scene id",
            Self::Number => "number",
            Self::Humidity => "{currentHumidity: number}",
            Self::Any => "any value",
        };
        fmt.write_str(label)
    }
}

/// A recoverable problem with a single capability entry.
/// None of these are fatal to the state they were found in.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CapabilityIssue {
    #[error("unrecognized capability instance '{instance}'")]
    UnknownInstance { instance: String },
    #[error("{instance}: expected {expected}, got {value}")]
    ShapeMismatch {
        instance: CapabilityInstance,
        expected: ValueShape,
        value: JsonValue,
    },
    #[error("{instance} is not expected to be reported as {kind}")]
    KindMismatch {
        instance: CapabilityInstance,
        kind: CapabilityKind,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct HumidityReading {
    #[serde(rename = "currentHumidity")]
    pub current_humidity: f64,
}

/// The `color` instance has been observed carrying either form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    Packed(u32),
    Triple(RgbColor),
}

impl ColorValue {
    pub fn rgb(&self) -> RgbColor {
        match self {
            Self::Packed(packed) => decode((*packed).into()),
            Self::Triple(color) => *color,
        }
    }
}

/// A capability value with its shape resolved by its instance
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityValue {
    PowerSwitch(bool),
    Brightness(u8),
    Color(ColorValue),
    /// Packed 0xRRGGBB
    ColorRgb(u32),
    DiyScene(u64),
    LightScene(u64),
    Online(bool),
    SensorTemperature(TemperatureValue),
    SensorHumidity(HumidityReading),
    /// An instance outside the taxonomy, carried verbatim.
    /// Never produced by `from_json`.
    Unknown { instance: String, value: JsonValue },
}

fn packed_color(value: &JsonValue) -> Option<u32> {
    value
        .as_u64()
        .filter(|&n| n <= u64::from(MAX_PACKED))
        .map(|n| n as u32)
}

fn color_triple(value: &JsonValue) -> Option<RgbColor> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value::<RgbColor>(value.clone())
        .ok()
        .filter(RgbColor::is_in_range)
}

impl CapabilityValue {
    /// Interpret `value` according to the shape declared for `instance`.
    /// Values of the wrong shape are rejected rather than coerced.
    pub fn from_json(
        instance: &CapabilityInstance,
        value: &JsonValue,
    ) -> Result<Self, CapabilityIssue> {
        use CapabilityInstance as I;

        let typed = match instance {
            I::PowerSwitch => value.as_bool().map(Self::PowerSwitch),
            I::Online => value.as_bool().map(Self::Online),
            // Fractional levels are rounded to the nearest whole percent
            I::Brightness => value
                .as_f64()
                .filter(|n| (0.0..=100.0).contains(n))
                .map(|n| Self::Brightness(n.round() as u8)),
            I::Color => packed_color(value)
                .map(ColorValue::Packed)
                .or_else(|| color_triple(value).map(ColorValue::Triple))
                .map(Self::Color),
            I::ColorRgb => packed_color(value).map(Self::ColorRgb),
            I::DiyScene => value.as_u64().map(Self::DiyScene),
            I::LightScene => value.as_u64().map(Self::LightScene),
            I::SensorTemperature => value
                .as_f64()
                .map(|f| Self::SensorTemperature(TemperatureValue::with_fahrenheit(f))),
            I::SensorHumidity => {
                if value.is_object() {
                    serde_json::from_value(value.clone())
                        .ok()
                        .map(Self::SensorHumidity)
                } else {
                    None
                }
            }
            I::Unknown(name) => {
                return Err(CapabilityIssue::UnknownInstance {
                    instance: name.clone(),
                })
            }
        };

        typed.ok_or_else(|| CapabilityIssue::ShapeMismatch {
            instance: instance.clone(),
            expected: instance.value_shape(),
            value: value.clone(),
        })
    }

    /// Type a value for an instance given by name. Known instances
    /// must match their value shape; any other instance carries the
    /// JSON through unchanged.
    pub fn raw<S: Into<String>>(instance: S, value: JsonValue) -> Result<Self, CapabilityIssue> {
        let instance = instance.into();
        match CapabilityInstance::from(instance.as_str()) {
            CapabilityInstance::Unknown(_) => Ok(Self::Unknown { instance, value }),
            known => Self::from_json(&known, &value),
        }
    }

    pub fn instance(&self) -> CapabilityInstance {
        use CapabilityInstance as I;
        match self {
            Self::PowerSwitch(_) => I::PowerSwitch,
            Self::Brightness(_) => I::Brightness,
            Self::Color(_) => I::Color,
            Self::ColorRgb(_) => I::ColorRgb,
            Self::DiyScene(_) => I::DiyScene,
            Self::LightScene(_) => I::LightScene,
            Self::Online(_) => I::Online,
            Self::SensorTemperature(_) => I::SensorTemperature,
            Self::SensorHumidity(_) => I::SensorHumidity,
            Self::Unknown { instance, .. } => I::from(instance.as_str()),
        }
    }

    /// The wire form of the value
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::PowerSwitch(on) | Self::Online(on) => json!(on),
            Self::Brightness(percent) => json!(percent),
            Self::Color(ColorValue::Packed(packed)) | Self::ColorRgb(packed) => json!(packed),
            Self::Color(ColorValue::Triple(RgbColor { r, g, b })) => {
                json!({"r": r, "g": g, "b": b})
            }
            Self::DiyScene(id) | Self::LightScene(id) => json!(id),
            Self::SensorTemperature(temp) => json!(temp.as_fahrenheit()),
            Self::SensorHumidity(reading) => {
                json!({"currentHumidity": reading.current_humidity})
            }
            Self::Unknown { value, .. } => value.clone(),
        }
    }

    /// Returns the color carried by a color-bearing value
    pub fn rgb(&self) -> Option<RgbColor> {
        match self {
            Self::Color(color) => Some(color.rgb()),
            Self::ColorRgb(packed) => Some(decode((*packed).into())),
            _ => None,
        }
    }
}

impl std::fmt::Display for CapabilityValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::PowerSwitch(on) => fmt.write_str(if *on { "on" } else { "off" }),
            Self::Online(online) => fmt.write_str(if *online { "online" } else { "offline" }),
            Self::Brightness(percent) => write!(fmt, "{percent}%"),
            Self::Color(_) | Self::ColorRgb(_) => match self.rgb() {
                Some(color) => write!(fmt, "{color}"),
                None => Ok(()),
            },
            Self::DiyScene(id) | Self::LightScene(id) => write!(fmt, "scene {id}"),
            Self::SensorTemperature(temp) => write!(fmt, "{temp}"),
            Self::SensorHumidity(reading) => write!(fmt, "{}%", reading.current_humidity),
            Self::Unknown { value, .. } => write!(fmt, "{value}"),
        }
    }
}

/// A capability entry whose instance and value have been checked
/// against the taxonomy
#[derive(Debug, Clone, PartialEq)]
pub struct TypedCapability {
    pub kind: CapabilityKind,
    pub value: CapabilityValue,
}

impl TypedCapability {
    pub fn instance(&self) -> CapabilityInstance {
        self.value.instance()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::temperature::TemperatureScale;
    use strum::IntoEnumIterator;

    fn samples(instance: &CapabilityInstance) -> (Vec<JsonValue>, Vec<JsonValue>) {
        use CapabilityInstance as I;
        match instance {
            I::PowerSwitch | I::Online => (
                vec![json!(true), json!(false)],
                vec![json!(1), json!("on"), JsonValue::Null],
            ),
            I::Brightness => (
                vec![json!(0), json!(42), json!(100), json!(100.0), json!(50.5)],
                vec![json!(101), json!(-1), json!(100.5), json!("50"), json!(true)],
            ),
            I::Color => (
                vec![json!(16711680), json!({"r": 1, "g": 2, "b": 3})],
                vec![
                    json!("red"),
                    json!({"r": 300, "g": 0, "b": 0}),
                    json!(-5),
                    json!(0x1000000),
                ],
            ),
            I::ColorRgb => (
                vec![json!(0), json!(65280), json!(0xffffff)],
                vec![json!({"r": 1, "g": 2, "b": 3}), json!(true), json!(0x1000000)],
            ),
            I::DiyScene | I::LightScene => (
                vec![json!(0), json!(3853)],
                vec![json!("3853"), json!(1.5), json!({"id": 1, "paramId": 2})],
            ),
            I::SensorTemperature => (
                vec![json!(71.6), json!(70), json!(-4)],
                vec![json!("71"), json!({"value": 71}), json!(false)],
            ),
            I::SensorHumidity => (
                vec![json!({"currentHumidity": 45}), json!({"currentHumidity": 45.5})],
                vec![json!(45), json!({"humidity": 45}), json!([45])],
            ),
            I::Unknown(_) => unreachable!(),
        }
    }

    #[test]
    fn declared_shapes_are_accepted_and_others_flagged() {
        for instance in &KNOWN_INSTANCES {
            let (good, bad) = samples(instance);
            for value in good {
                let typed = CapabilityValue::from_json(instance, &value)
                    .unwrap_or_else(|err| panic!("{instance} rejected {value}: {err}"));
                k9::assert_equal!(&typed.instance(), instance);
            }
            for value in bad {
                match CapabilityValue::from_json(instance, &value) {
                    Err(CapabilityIssue::ShapeMismatch {
                        instance: flagged,
                        expected,
                        ..
                    }) => {
                        k9::assert_equal!(&flagged, instance);
                        k9::assert_equal!(expected, instance.value_shape());
                    }
                    other => panic!("{instance} accepted {value}: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn unknown_instance() {
        let instance = CapabilityInstance::from("gradientToggle");
        k9::assert_equal!(
            instance,
            CapabilityInstance::Unknown("gradientToggle".to_string())
        );
        assert!(!instance.is_known());
        k9::assert_equal!(instance.value_shape(), ValueShape::Any);
        k9::assert_equal!(instance.default_kind(), CapabilityKind::Other);
        k9::assert_equal!(
            CapabilityValue::from_json(&instance, &json!(1)),
            Err(CapabilityIssue::UnknownInstance {
                instance: "gradientToggle".to_string()
            })
        );
    }

    #[test]
    fn instance_names_round_trip() {
        for instance in &KNOWN_INSTANCES {
            assert!(instance.is_known());
            k9::assert_equal!(&CapabilityInstance::from(instance.as_str()), instance);
            let encoded = serde_json::to_value(instance).unwrap();
            k9::assert_equal!(encoded, json!(instance.as_str()));
            let decoded: CapabilityInstance = serde_json::from_value(encoded).unwrap();
            k9::assert_equal!(&decoded, instance);
        }
        // Names are case sensitive on the wire
        assert!(!CapabilityInstance::from("PowerSwitch").is_known());
    }

    #[test]
    fn kinds() {
        for kind in CapabilityKind::iter().filter(|k| *k != CapabilityKind::Other) {
            let decoded: CapabilityKind = serde_json::from_value(json!(kind.as_str())).unwrap();
            k9::assert_equal!(decoded, kind);
            let short = kind.as_str().trim_start_matches("devices.capabilities.");
            let decoded: CapabilityKind = serde_json::from_value(json!(short)).unwrap();
            k9::assert_equal!(decoded, kind);
        }
        let decoded: CapabilityKind =
            serde_json::from_value(json!("devices.capabilities.teleport")).unwrap();
        k9::assert_equal!(decoded, CapabilityKind::Other);

        for instance in &KNOWN_INSTANCES {
            assert!(!instance.kinds().is_empty());
            assert!(instance.check_kind(instance.default_kind()).is_ok());
        }
        k9::assert_equal!(
            CapabilityInstance::PowerSwitch.check_kind(CapabilityKind::Range),
            Err(CapabilityIssue::KindMismatch {
                instance: CapabilityInstance::PowerSwitch,
                kind: CapabilityKind::Range
            })
        );
        assert!(CapabilityInstance::ColorRgb
            .check_kind(CapabilityKind::DiyColorSetting)
            .is_ok());
        assert!(CapabilityInstance::SensorHumidity
            .check_kind(CapabilityKind::SensorHumidity)
            .is_ok());
    }

    #[test]
    fn fractional_brightness() {
        let level = |value: JsonValue| {
            CapabilityValue::from_json(&CapabilityInstance::Brightness, &value).unwrap()
        };
        k9::assert_equal!(level(json!(100.0)), CapabilityValue::Brightness(100));
        k9::assert_equal!(level(json!(50.5)), CapabilityValue::Brightness(51));
        k9::assert_equal!(level(json!(49.4)), CapabilityValue::Brightness(49));
        k9::assert_equal!(level(json!(50.5)).to_json(), json!(51));
    }

    #[test]
    fn color_values() {
        let packed =
            CapabilityValue::from_json(&CapabilityInstance::Color, &json!(0xff0000)).unwrap();
        k9::assert_equal!(packed, CapabilityValue::Color(ColorValue::Packed(0xff0000)));
        k9::assert_equal!(packed.rgb(), Some(RgbColor::new(255, 0, 0)));

        let triple = CapabilityValue::from_json(
            &CapabilityInstance::Color,
            &json!({"r": 0, "g": 255, "b": 0}),
        )
        .unwrap();
        k9::assert_equal!(triple.rgb(), Some(RgbColor::new(0, 255, 0)));
        k9::assert_equal!(triple.to_json(), json!({"r": 0, "g": 255, "b": 0}));

        let rgb = CapabilityValue::from_json(&CapabilityInstance::ColorRgb, &json!(65280)).unwrap();
        k9::assert_equal!(rgb.rgb(), Some(RgbColor::new(0, 255, 0)));
        k9::assert_equal!(rgb.to_json(), json!(65280));
        k9::assert_equal!(rgb.to_string(), "#00ff00");

        k9::assert_equal!(CapabilityValue::Brightness(10).rgb(), None);
    }

    #[test]
    fn sensor_values() {
        let temp =
            CapabilityValue::from_json(&CapabilityInstance::SensorTemperature, &json!(71.6))
                .unwrap();
        match &temp {
            CapabilityValue::SensorTemperature(t) => {
                k9::assert_equal!(t.as_fahrenheit(), 71.6);
                k9::assert_equal!(t.rounded(TemperatureScale::Celsius).to_string(), "22°C");
            }
            other => panic!("unexpected {other:?}"),
        }
        k9::assert_equal!(temp.to_json(), json!(71.6));

        let humidity = CapabilityValue::from_json(
            &CapabilityInstance::SensorHumidity,
            &json!({"currentHumidity": 45}),
        )
        .unwrap();
        k9::assert_equal!(
            humidity,
            CapabilityValue::SensorHumidity(HumidityReading {
                current_humidity: 45.
            })
        );
        k9::assert_equal!(humidity.to_string(), "45%");
    }

    #[test]
    fn raw_values_pass_through() {
        let value = CapabilityValue::raw("nightlightToggle", json!(1)).unwrap();
        k9::assert_equal!(
            value.instance(),
            CapabilityInstance::Unknown("nightlightToggle".to_string())
        );
        k9::assert_equal!(value.to_json(), json!(1));
    }

    #[test]
    fn raw_values_for_known_instances_are_typed() {
        k9::assert_equal!(
            CapabilityValue::raw("powerSwitch", json!(true)),
            Ok(CapabilityValue::PowerSwitch(true))
        );
        k9::assert_equal!(
            CapabilityValue::raw("powerSwitch", json!("banana")),
            Err(CapabilityIssue::ShapeMismatch {
                instance: CapabilityInstance::PowerSwitch,
                expected: ValueShape::Boolean,
                value: json!("banana"),
            })
        );
        k9::assert_equal!(
            CapabilityValue::raw("colorRgb", json!(0x1000000)),
            Err(CapabilityIssue::ShapeMismatch {
                instance: CapabilityInstance::ColorRgb,
                expected: ValueShape::PackedColor,
                value: json!(0x1000000),
            })
        );
    }
}
