use crate::color::{decode, encode, parse_color, RgbColor, COLOR_PRESETS, MAX_PACKED};

#[derive(clap::Parser, Debug)]
pub struct ColorCommand {
    #[command(subcommand)]
    cmd: SubCommand,
}

#[derive(clap::Parser, Debug, PartialEq)]
enum SubCommand {
    /// Pack a color into its 0xRRGGBB integer form
    Encode {
        /// A preset name, such as "Warm White", or any CSS color
        #[arg(required_unless_present = "rgb", conflicts_with = "rgb")]
        color: Option<String>,

        /// Individual channels. Values outside 0-255 are masked
        /// to their low 8 bits.
        #[arg(
            long,
            num_args = 3,
            value_names = ["R", "G", "B"],
            allow_negative_numbers = true
        )]
        rgb: Option<Vec<i32>>,
    },
    /// Unpack a 0xRRGGBB integer into its channels
    Decode {
        #[arg(allow_negative_numbers = true)]
        packed: i64,
    },
    /// List the named color presets
    Presets,
}

impl ColorCommand {
    pub fn run(&self, _args: &crate::Args) -> anyhow::Result<()> {
        match &self.cmd {
            SubCommand::Encode { color, rgb } => {
                let color = match (color, rgb.as_deref()) {
                    (_, Some(&[r, g, b])) => RgbColor::new(r, g, b),
                    (Some(color), _) => parse_color(color)?,
                    _ => anyhow::bail!("specify either a color or --rgb R G B"),
                };
                if !color.is_in_range() {
                    log::warn!("{color:?} has channels outside 0-255; they were masked");
                }
                let packed = encode(color);
                println!("{packed} 0x{packed:06X} {color}");
            }
            SubCommand::Decode { packed } => {
                if !(0..=i64::from(MAX_PACKED)).contains(packed) {
                    log::warn!("{packed} is outside 0-0xFFFFFF; only the low 24 bits are used");
                }
                let color = decode(*packed);
                println!(
                    "r={r} g={g} b={b} {color}",
                    r = color.r,
                    g = color.g,
                    b = color.b
                );
            }
            SubCommand::Presets => {
                for preset in COLOR_PRESETS {
                    println!(
                        "{name:<12} {color} {packed}",
                        name = preset.name,
                        color = preset.color,
                        packed = preset.color.to_packed()
                    );
                }
            }
        }
        Ok(())
    }
}
