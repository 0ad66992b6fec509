use crate::capability::{CapabilityKind, KNOWN_INSTANCES};
use strum::IntoEnumIterator;

#[derive(clap::Parser, Debug)]
pub struct TaxonomyCommand {
    /// List the recognized capability kinds and the instances each
    /// may be reported under, rather than the instance table
    #[arg(long)]
    kinds: bool,
}

/// Every recognized kind, with the names of the instances that
/// accept it. Kinds that no modeled instance uses have no names.
fn kind_table() -> Vec<(CapabilityKind, Vec<String>)> {
    CapabilityKind::iter()
        .filter(|kind| *kind != CapabilityKind::Other)
        .map(|kind| {
            let instances = KNOWN_INSTANCES
                .iter()
                .filter(|instance| instance.kinds().contains(&kind))
                .map(|instance| instance.to_string())
                .collect();
            (kind, instances)
        })
        .collect()
}

impl TaxonomyCommand {
    pub fn run(&self, _args: &crate::Args) -> anyhow::Result<()> {
        if self.kinds {
            for (kind, instances) in kind_table() {
                println!("{kind:<42} {}", instances.join(", "), kind = kind.as_str());
            }
            return Ok(());
        }

        for instance in &KNOWN_INSTANCES {
            let kinds: Vec<&str> = instance.kinds().iter().map(|k| k.as_str()).collect();
            println!(
                "{instance:<18} {shape:<34} {kinds}",
                instance = instance.to_string(),
                shape = instance.value_shape().to_string(),
                kinds = kinds.join(", ")
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_list_their_instances() {
        let table = kind_table();
        assert!(table.iter().all(|(kind, _)| *kind != CapabilityKind::Other));

        let instances_of = |wanted: CapabilityKind| {
            table
                .iter()
                .find(|(kind, _)| *kind == wanted)
                .map(|(_, instances)| instances.clone())
                .unwrap()
        };
        k9::assert_equal!(instances_of(CapabilityKind::OnOff), vec!["powerSwitch"]);
        k9::assert_equal!(
            instances_of(CapabilityKind::Property),
            vec!["sensorTemperature", "sensorHumidity"]
        );
        k9::assert_equal!(
            instances_of(CapabilityKind::DynamicScene),
            vec!["diyScene", "lightScene"]
        );
        k9::assert_equal!(instances_of(CapabilityKind::MusicSetting), Vec::<String>::new());
    }
}
