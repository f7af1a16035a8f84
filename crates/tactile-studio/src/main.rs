mod replay;
mod window;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use tactile_engine::logging::{init_logging, LoggingConfig};
use tactile_ui::pannable::{PanConfig, PanMode};

/// Kinetic panning playground
#[derive(Parser, Debug)]
#[command(name = "tactile-studio")]
#[command(about = "Scripted gesture replay and interactive kinetic panning")]
#[command(version)]
struct Args {
    /// How drag motion turns into scrolling
    #[arg(short, long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Keep fast glides from decaying
    #[arg(long)]
    low_friction: bool,

    /// Open an interactive window instead of replaying scripts
    #[arg(long)]
    window: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Content follows the finger, no inertia
    Push,
    /// Speed grows with the distance from the press point
    Accelerated,
    /// Drag velocity with inertial glide
    Auto,
}

impl From<Mode> for PanMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Push => PanMode::Push,
            Mode::Accelerated => PanMode::Accelerated,
            Mode::Auto => PanMode::Auto,
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = Args::parse();
    let mode = PanMode::from(args.mode);
    let config = PanConfig::default().mode(mode).low_friction_mode(args.low_friction);
    config.validate().context("invalid pan configuration")?;

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          TACTILE STUDIO v0.1           ║");
    println!("  ║   kinetic panning  ·  {:<16} ║", format!("{mode:?} mode"));
    println!("  ╚════════════════════════════════════════╝");
    println!();

    if args.window {
        window::run(config)
    } else {
        replay::run(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_flag_selects_pan_mode() {
        let args = Args::try_parse_from(["tactile-studio", "--mode", "push", "--low-friction"])
            .expect("valid flags");
        assert_eq!(PanMode::from(args.mode), PanMode::Push);
        assert!(args.low_friction);
        assert!(!args.window);
    }

    #[test]
    fn defaults_to_auto() {
        let args = Args::try_parse_from(["tactile-studio"]).expect("no flags");
        assert_eq!(args.mode, Mode::Auto);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["tactile-studio", "--fling"]).is_err());
    }
}
