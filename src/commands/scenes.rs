use crate::capability::CapabilityInstance;
use crate::platform_api::{from_json, read_payload, GetDeviceScenesResponse};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
pub struct ScenesCommand {
    /// A scene list or diy scene list response.
    /// Reads stdin if omitted or `-`.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Which capability to list the scenes of
    #[arg(long, default_value = "lightScene")]
    instance: String,
}

impl ScenesCommand {
    pub fn run(&self, _args: &crate::Args) -> anyhow::Result<()> {
        let data = read_payload(self.input.as_deref())?;
        let resp: GetDeviceScenesResponse = from_json(&data)?;
        let instance = CapabilityInstance::from(self.instance.as_str());

        for scene in resp.into_scene_options(&instance)? {
            match scene.value.param_id() {
                Some(param) => println!(
                    "{name:<24} id={id} paramId={param}",
                    name = scene.name,
                    id = scene.value.id(),
                ),
                None => println!("{name:<24} id={id}", name = scene.name, id = scene.value.id()),
            }
        }
        Ok(())
    }
}
