use crate::capability::{CapabilityInstance, CapabilityValue};
use crate::device::DeviceState;
use crate::platform_api::{parse_device_state, read_payload};
use crate::temperature::TemperatureScale;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
pub struct StateCommand {
    /// A device state response, or a bare `{"capabilities": [...]}`
    /// payload. Reads stdin if omitted or `-`.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Show only the last reported entry for each instance
    #[arg(long)]
    latest: bool,

    /// Fail if any entry doesn't match the capability taxonomy
    #[arg(long)]
    strict: bool,

    /// Print just the most recent well formed value of this instance
    #[arg(long, conflicts_with_all = ["latest", "strict"])]
    instance: Option<String>,
}

pub fn format_value(value: &CapabilityValue, scale: TemperatureScale) -> String {
    match value {
        CapabilityValue::SensorTemperature(temp) => temp.rounded(scale).to_string(),
        _ => value.to_string(),
    }
}

impl StateCommand {
    pub fn run(&self, args: &crate::Args) -> anyhow::Result<()> {
        let scale = args.display_args.temperature_scale()?;
        let data = read_payload(self.input.as_deref())?;
        let mut state = parse_device_state(&data)?;

        if let Some(name) = &self.instance {
            let instance = CapabilityInstance::from(name.as_str());
            if !instance.is_known() {
                log::warn!("{instance} is not a recognized capability instance");
            }
            let value = state
                .value_of(&instance)
                .ok_or_else(|| anyhow::anyhow!("no well formed {instance} value reported"))?;
            println!("{}", format_value(&value, scale));
            return Ok(());
        }

        if self.latest {
            let latest = state.latest_by_instance().into_iter().cloned().collect();
            state = DeviceState {
                capabilities: latest,
                ..state
            };
        }

        let report = state.validate();
        for cap in &report.capabilities {
            println!(
                "{instance:<18} {kind:<42} {value}",
                instance = cap.instance().to_string(),
                kind = cap.kind.to_string(),
                value = format_value(&cap.value, scale)
            );
        }

        log::info!(
            "{} well formed capabilities, {} issues",
            report.capabilities.len(),
            report.issues.len()
        );

        if self.strict && !report.is_well_formed() {
            anyhow::bail!(
                "{} capability entries did not match the taxonomy",
                report.issues.len()
            );
        }

        Ok(())
    }
}
