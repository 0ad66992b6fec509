use crate::temperature::TemperatureScale;
use clap::Parser;
use std::str::FromStr;

mod capability;
mod color;
mod commands;
mod device;
mod platform_api;
mod temperature;
mod version_info;

#[derive(clap::Parser, Debug)]
#[command(version = version_info::caps_version(), propagate_version = true)]
pub struct Args {
    #[command(flatten)]
    display_args: DisplayArguments,

    #[command(subcommand)]
    cmd: SubCommand,
}

#[derive(clap::Parser, Debug)]
pub struct DisplayArguments {
    /// The scale used to show temperatures. If not passed here, it
    /// will be read from the GOVEE_TEMPERATURE_SCALE environment
    /// variable, and otherwise defaults to celsius.
    #[arg(long, global = true)]
    pub temperature_scale: Option<TemperatureScale>,
}

impl DisplayArguments {
    pub fn temperature_scale(&self) -> anyhow::Result<TemperatureScale> {
        match self.temperature_scale {
            Some(scale) => Ok(scale),
            None => Ok(opt_env_var("GOVEE_TEMPERATURE_SCALE")?.unwrap_or_default()),
        }
    }
}

#[derive(clap::Parser, Debug)]
enum SubCommand {
    /// Convert between RGB triples and packed colors
    Color(commands::color::ColorCommand),
    /// Type and check a device state payload
    State(commands::state::StateCommand),
    /// List the devices in a device list payload
    Devices(commands::devices::DevicesCommand),
    /// List the scenes in a scene list payload
    Scenes(commands::scenes::ScenesCommand),
    Control(commands::control::ControlCommand),
    /// Show the recognized capability instances and their value shapes
    Taxonomy(commands::taxonomy::TaxonomyCommand),
}

pub fn opt_env_var<T: FromStr>(name: &str) -> anyhow::Result<Option<T>>
where
    <T as FromStr>::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(p) => {
            let value = p
                .parse()
                .map_err(|err| anyhow::anyhow!("parsing ${name}: {err:#}"))?;
            Ok(Some(value))
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => anyhow::bail!("${name} is invalid: {err:#}"),
    }
}

fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Ok(path) = dotenv {
        log::debug!("loaded environment from {}", path.display());
    }

    let args = Args::parse();
    log::trace!("{args:?}");

    match &args.cmd {
        SubCommand::Color(cmd) => cmd.run(&args),
        SubCommand::State(cmd) => cmd.run(&args),
        SubCommand::Devices(cmd) => cmd.run(&args),
        SubCommand::Scenes(cmd) => cmd.run(&args),
        SubCommand::Control(cmd) => cmd.run(&args),
        SubCommand::Taxonomy(cmd) => cmd.run(&args),
    }
}
