use clap::{builder::ValueParser, Arg, ArgAction, ArgMatches, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_LEVEL: &str = "log-level";
pub const ARG_LOG_JSON: &str = "log-json";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Increase verbosity, repeat for more (-v WARN ... -vvvv TRACE)")
                .global(true)
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new(ARG_LOG_LEVEL)
                .long("log-level")
                .help("Log level: ERROR, WARN, INFO, DEBUG, TRACE or 0-4 (default: ERROR)")
                .env("AUTHDESK_LOG_LEVEL")
                .global(true)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long("log-json")
                .help("Emit logs as JSON lines on stderr")
                .env("AUTHDESK_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

/// Effective verbosity: the louder of `-v` count and `--log-level`.
#[must_use]
pub fn verbosity(matches: &ArgMatches) -> u8 {
    let count = matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0);
    let level = matches.get_one::<u8>(ARG_LOG_LEVEL).copied().unwrap_or(0);
    count.max(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_log_level() {
        let command = with_args(Command::new("test"));
        for (input, expected) in [("error", 0), ("WARN", 1), ("info", 2), ("3", 3), ("trace", 4)] {
            temp_env::with_var("AUTHDESK_LOG_LEVEL", Some(input), || {
                let matches = command.clone().get_matches_from(vec!["test"]);
                assert_eq!(matches.get_one::<u8>(ARG_LOG_LEVEL).copied(), Some(expected));
                assert_eq!(verbosity(&matches), expected);
            });
        }
    }

    #[test]
    fn test_verbose_flag_counts() {
        temp_env::with_vars([("AUTHDESK_LOG_LEVEL", None::<String>)], || {
            let matches = with_args(Command::new("test")).get_matches_from(vec!["test", "-vvv"]);
            assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(3));
            assert_eq!(matches.get_one::<u8>(ARG_LOG_LEVEL), None);
            assert_eq!(verbosity(&matches), 3);
            assert!(!matches.get_flag(ARG_LOG_JSON));
        });
    }

    #[test]
    fn test_verbosity_takes_the_louder_source() {
        temp_env::with_vars([("AUTHDESK_LOG_LEVEL", Some("warn"))], || {
            let command = with_args(Command::new("test"));
            let matches = command.clone().get_matches_from(vec!["test", "-vvv"]);
            assert_eq!(verbosity(&matches), 3);

            let matches = command.get_matches_from(vec!["test", "-v", "--log-level", "trace"]);
            assert_eq!(verbosity(&matches), 4);
        });
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        temp_env::with_vars([("AUTHDESK_LOG_LEVEL", None::<String>)], || {
            let result = with_args(Command::new("test"))
                .try_get_matches_from(vec!["test", "--log-level", "loud"]);
            assert!(result.is_err());
        });
    }
}
