use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "basketball play-by-play analyzer")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Parse a play-by-play XML file and write the analysis tables
    Analyze {
        /// XML file (optional, defaults to the first *.xml in the current directory)
        xml_file: Option<PathBuf>,
    },
    /// Print the play-by-play table from the last analysis
    Display {
        /// One line per play instead of a block
        #[arg(long)]
        compact: bool,
    },
    /// Generate a shell completion script
    Completions {
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_file_is_optional() {
        let cli = Cli::try_parse_from(["basketball_pbp", "analyze"]).unwrap();
        assert_eq!(cli.command, Command::Analyze { xml_file: None });

        let cli = Cli::try_parse_from(["basketball_pbp", "analyze", "game.xml"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Analyze {
                xml_file: Some(PathBuf::from("game.xml"))
            }
        );
    }

    #[test]
    fn test_display_compact_flag() {
        let cli = Cli::try_parse_from(["basketball_pbp", "display", "--compact"]).unwrap();
        assert_eq!(cli.command, Command::Display { compact: true });
    }
}
