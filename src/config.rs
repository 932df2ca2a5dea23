use clap::Parser;
use tracing::Level;

/// Tokens that end the session when no extra ones are configured.
pub const EXIT_WORDS: [&str; 2] = ["exit", "salir"];

pub const PROMPT: &str = "Please enter an IP address or 'exit'";

#[derive(Parser, Debug)]
#[command(name = "ipclass")]
#[command(author = "Daniel Yu")]
#[command(about = "Reads IPv4 addresses and lists them by network class.")]
pub struct Opts {
    /// Do not print a prompt before each address
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Extra token that ends the session, may be repeated
    #[arg(long = "exit-word", value_name = "WORD")]
    pub exit_words: Vec<String>,
}

/// Settings for one interactive session.
#[derive(Clone, Debug)]
pub struct Config {
    pub prompt: Option<String>,
    pub exit_words: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: Some(PROMPT.to_owned()),
            exit_words: EXIT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn is_exit(&self, token: &str) -> bool {
        self.exit_words.iter().any(|w| w == token)
    }
}

impl Opts {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if self.quiet {
            config.prompt = None;
        }
        config.exit_words.extend(self.exit_words.iter().cloned());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Opts::parse_from(&["ipclass"]).config();
        assert_eq!(Some(PROMPT), config.prompt.as_deref());
        assert!(config.is_exit("exit"));
        assert!(config.is_exit("salir"));
        assert!(!config.is_exit("EXIT"));
        assert!(!config.is_exit("10.1.1.1"));
    }

    #[test]
    fn options() {
        let opts = Opts::parse_from(&["ipclass", "-q", "-vv", "--exit-word", "quit"]);
        assert_eq!(Level::TRACE, opts.log_level());
        let config = opts.config();
        assert_eq!(None, config.prompt);
        assert!(config.is_exit("quit"));
        assert!(config.is_exit("exit"));
        assert_eq!(Level::DEBUG, Opts::parse_from(&["ipclass", "-v"]).log_level());
        assert_eq!(Level::WARN, Opts::parse_from(&["ipclass"]).log_level());
    }
}
