use crate::platform_api::{parse_device_list, read_payload};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
pub struct DevicesCommand {
    /// A device list response, or a bare array of devices.
    /// Reads stdin if omitted or `-`.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Also list each device's capabilities
    #[arg(long)]
    capabilities: bool,
}

impl DevicesCommand {
    pub fn run(&self, _args: &crate::Args) -> anyhow::Result<()> {
        let data = read_payload(self.input.as_deref())?;
        let mut devices = parse_device_list(&data)?;
        devices.sort_by_key(|d| (d.device_type.to_string(), d.display_name()));

        for d in devices {
            if !d.is_well_formed() {
                log::warn!("skipping {} device with no id", d.sku);
                continue;
            }
            let mut features = vec![];
            if d.supports_rgb() {
                features.push("rgb");
            }
            if d.supports_brightness() {
                features.push("brightness");
            }
            println!(
                "{sku:<7} {id} {kind:<12} {name} {features}",
                sku = d.sku,
                id = d.device,
                kind = d.device_type.to_string(),
                name = d.display_name(),
                features = if features.is_empty() {
                    String::new()
                } else {
                    format!("[{}]", features.join(" "))
                }
            );

            if self.capabilities {
                for cap in &d.capabilities {
                    let note = if cap.instance.is_known() {
                        ""
                    } else {
                        " (unrecognized)"
                    };
                    println!("    {:<22} {}{note}", cap.instance.to_string(), cap.kind);
                }
            }
        }
        Ok(())
    }
}
