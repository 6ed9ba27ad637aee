//! Command line parsing
//!
//! Usage: `shikimori [--config <path>] <command> [args...]`

use shikimori_api::Query;

/// One invocation of the binary.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Profile of the token owner (`users/whoami`).
    Whoami,
    /// GET an arbitrary path under `/api/`, with `key=value` query pairs.
    Get { path: String, query: Query },
    /// Print an authorization URL and the state it was issued with.
    AuthorizeUrl,
    /// Exchange an authorization code for tokens.
    Token { code: String },
    /// Trade the configured refresh token for a new token pair.
    Refresh,
}

/// Parsed arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub config: Option<String>,
    pub command: Command,
}

pub const USAGE: &str = "usage: shikimori [--config <path>] <command>

commands:
  whoami                  show the authenticated user
  get <path> [key=value]  GET <site>/api/<path>
  authorize-url           print an authorization URL
  token <code>            exchange an authorization code
  refresh                 refresh the configured token";

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let config = args
            .iter()
            .position(|a| a == "--config")
            .map(|i| {
                args.get(i + 1)
                    .cloned()
                    .ok_or_else(|| "--config needs a path".to_owned())
            })
            .transpose()?;

        let mut rest = Vec::new();
        let mut skip = false;
        for arg in args {
            if skip {
                skip = false;
                continue;
            }
            if arg == "--config" {
                skip = true;
                continue;
            }
            rest.push(arg.as_str());
        }

        let command = match rest.as_slice() {
            ["whoami"] => Command::Whoami,
            ["get", path, pairs @ ..] => Command::Get {
                path: (*path).to_owned(),
                query: parse_pairs(pairs)?,
            },
            ["authorize-url"] => Command::AuthorizeUrl,
            ["token", code] => Command::Token {
                code: (*code).to_owned(),
            },
            ["refresh"] => Command::Refresh,
            [] => return Err("missing command".to_owned()),
            [other, ..] => return Err(format!("unknown or malformed command: {other}")),
        };

        Ok(Self { config, command })
    }
}

fn parse_pairs(pairs: &[&str]) -> Result<Query, String> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| format!("expected key=value, got: {pair}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_whoami() {
        let parsed = Args::parse(&args(&["whoami"])).unwrap();
        assert_eq!(parsed.command, Command::Whoami);
        assert!(parsed.config.is_none());
    }

    #[test]
    fn parses_config_anywhere() {
        let parsed = Args::parse(&args(&["refresh", "--config", "/etc/shiki.toml"])).unwrap();
        assert_eq!(parsed.command, Command::Refresh);
        assert_eq!(parsed.config.as_deref(), Some("/etc/shiki.toml"));

        let parsed = Args::parse(&args(&["--config", "a.toml", "token", "abc"])).unwrap();
        assert_eq!(
            parsed.command,
            Command::Token {
                code: "abc".to_owned()
            }
        );
    }

    #[test]
    fn parses_get_with_query() {
        let parsed = Args::parse(&args(&["get", "animes", "page=2", "limit=5", "page=3"])).unwrap();
        let Command::Get { path, query } = parsed.command else {
            panic!("expected get");
        };
        assert_eq!(path, "animes");
        assert_eq!(
            query.iter().collect::<Vec<_>>(),
            vec![("page", "2"), ("limit", "5"), ("page", "3")]
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(Args::parse(&args(&["get", "animes", "page"])).is_err());
        assert!(Args::parse(&args(&["get", "animes", "=2"])).is_err());
    }

    #[test]
    fn rejects_missing_and_unknown_commands() {
        assert!(Args::parse(&args(&[])).is_err());
        assert!(Args::parse(&args(&["frobnicate"])).is_err());
        assert!(Args::parse(&args(&["token"])).is_err());
        assert!(Args::parse(&args(&["--config"])).is_err());
    }
}
