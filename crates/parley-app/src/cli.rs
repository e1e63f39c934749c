use std::path::PathBuf;

use clap::Parser;

/// Parley: talk to a Voiceflow assistant with Dialogflow doing the understanding.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log directive override (e.g. `parley=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_valid() {
        let args = Args::try_parse_from(["parley"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn accepts_config_and_log_level() {
        let args = Args::try_parse_from([
            "parley",
            "--config",
            "/etc/parley.toml",
            "--log-level",
            "parley=debug",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/parley.toml")));
        assert_eq!(args.log_level.as_deref(), Some("parley=debug"));
    }
}
