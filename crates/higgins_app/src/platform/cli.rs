use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Talk to a remote conversation function", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "PATH",
        value_hint = clap::ValueHint::FilePath,
        help = "path to higgins.ron config file (default ./higgins.ron)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "base url of the function invoke api")]
    pub endpoint: Option<String>,

    #[arg(short, long, value_name = "NAME", help = "function to invoke")]
    pub function: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "answer from a local script instead of the remote function"
    )]
    pub local_script: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        requires = "local_script",
        help = "directory of add-on scripts loaded after the local script"
    )]
    pub addons: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive session; each line is sent when Enter is pressed
    Chat,
    /// Send one text, print the answer and exit
    Ask { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_parses_text_and_overrides() {
        let cli = Cli::try_parse_from([
            "higgins",
            "--endpoint",
            "http://127.0.0.1:3001",
            "-f",
            "HigginsV1",
            "ask",
            "hello there",
        ])
        .unwrap();

        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:3001"));
        assert_eq!(cli.function.as_deref(), Some("HigginsV1"));
        assert_eq!(
            cli.command,
            Some(Command::Ask {
                text: "hello there".to_string()
            })
        );
    }

    #[test]
    fn chat_is_optional() {
        let cli = Cli::try_parse_from(["higgins"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn addons_require_local_script() {
        assert!(Cli::try_parse_from(["higgins", "--addons", "scripts/addons"]).is_err());
        let cli = Cli::try_parse_from([
            "higgins",
            "--local-script",
            "scripts/core/script.txt",
            "--addons",
            "scripts/addons",
        ])
        .unwrap();
        assert_eq!(cli.addons, Some(PathBuf::from("scripts/addons")));
    }
}
