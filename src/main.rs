mod app;
mod command;
mod config;
mod consts;
mod game;
mod logo;
mod scores;
mod server;
mod startup;
mod util;
use crate::app::App;
use crate::config::{Config, ServerConfig};
use crate::scores::{HttpScoreSink, ScoreClient};
use crate::server::PgScoreStore;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static USAGE: &str = "\
Usage: snake-scores [play] [-c|--config PATH] [-n|--name NAME] [-s|--server URL] [--log-file PATH]
       snake-scores serve [-c|--config PATH] [-l|--listen ADDR] [--database-url URL]
       snake-scores -h|--help
       snake-scores -V|--version";

static HELP: &str = "\
Play Snake in the terminal, or run the server that keeps the scores

Subcommands:
  play    Play a game; each finished game's score is sent to the score server
          (default)
  serve   Accept scores over HTTP and store them in PostgreSQL

Options:
  -c, --config PATH         Read configuration from PATH
  -n, --name NAME           [play] Player name to prefill
  -s, --server URL          [play] Score server to send scores to
      --log-file PATH       [play] Write logs to PATH
  -l, --listen ADDR         [serve] Address to listen on
      --database-url URL    [serve] PostgreSQL connection URL (overrides
                            $DATABASE_URL)
  -h, --help                Show this help and exit
  -V, --version             Show the program version and exit";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Play(PlayArgs),
    Serve(ServeArgs),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct PlayArgs {
    config: Option<PathBuf>,
    name: Option<String>,
    server: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct ServeArgs {
    config: Option<PathBuf>,
    listen: Option<String>,
    database_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Play,
    Serve,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut mode = None;
        let mut config = None;
        let mut play = PlayArgs::default();
        let mut serve = ServeArgs::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                Arg::Value(v) if mode.is_none() => {
                    mode = match v.to_str() {
                        Some("play") => Some(Mode::Play),
                        Some("serve") => Some(Mode::Serve),
                        _ => return Err(Arg::Value(v).unexpected()),
                    };
                }
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('n') | Arg::Long("name") if mode != Some(Mode::Serve) => {
                    mode = Some(Mode::Play);
                    play.name = Some(parser.value()?.string()?);
                }
                Arg::Short('s') | Arg::Long("server") if mode != Some(Mode::Serve) => {
                    mode = Some(Mode::Play);
                    play.server = Some(parser.value()?.string()?);
                }
                Arg::Long("log-file") if mode != Some(Mode::Serve) => {
                    mode = Some(Mode::Play);
                    play.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("listen") if mode == Some(Mode::Serve) => {
                    serve.listen = Some(parser.value()?.string()?);
                }
                Arg::Long("database-url") if mode == Some(Mode::Serve) => {
                    serve.database_url = Some(parser.value()?.string()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(match mode.unwrap_or(Mode::Play) {
            Mode::Play => Cli::Play(PlayArgs { config, ..play }),
            Mode::Serve => Cli::Serve(ServeArgs { config, ..serve }),
        })
    }
}

fn main() -> ExitCode {
    let cli = match Cli::from_parser(Parser::from_env()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("snake-scores: {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    let r = match cli {
        Cli::Play(args) => run_play(args),
        Cli::Serve(args) => run_serve(args),
        Cli::Help => {
            println!("{USAGE}\n\n{HELP}");
            Ok(())
        }
        Cli::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };
    exit_code(r)
}

fn run_play(args: PlayArgs) -> anyhow::Result<()> {
    if let Some(path) = args.log_file.as_deref() {
        init_file_logging(path)?;
    }
    let mut config = Config::discover(args.config.as_deref())?;
    if let Some(url) = args.server {
        config.client.server_url = url;
    }
    if args.name.is_some() {
        config.client.player_name = args.name;
    }
    let client = ScoreClient::new(&config.client.server_url)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let sink = HttpScoreSink::new(client, runtime.handle().clone());
    tracing::info!(server = %config.client.server_url, "starting game");
    let terminal = ratatui::init();
    let r = App::new(sink, rand::rng(), config.client.player_name.as_deref()).run(terminal);
    ratatui::restore();
    r.map_err(Into::into)
}

fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
    let mut config = Config::discover(args.config.as_deref())?;
    config.apply_env();
    if args.database_url.is_some() {
        config.server.database_url = args.database_url;
    }
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    tokio::runtime::Runtime::new()
        .context("failed to start async runtime")?
        .block_on(serve_scores(config.server))
}

async fn serve_scores(config: ServerConfig) -> anyhow::Result<()> {
    let store = PgScoreStore::connect(config.database_url()?, config.max_connections).await?;
    // Concurrent first saves race on CREATE TABLE, so the table must exist
    // before any request is accepted.
    store.ensure_table().await?;
    let listener = server::bind(&config.listen).await?;
    let r = server::serve(listener, store.clone()).await;
    store.close().await;
    r.map_err(Into::into)
}

/// Send log events to the file at `path`, which is truncated first.  The
/// terminal belongs to the game, so nothing is logged unless this is called.
fn init_file_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path)?;
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(consts::DEFAULT_LOG_FILTER))
}

fn exit_code(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("snake-scores: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[rstest]
    #[case(&[], Cli::Play(PlayArgs::default()))]
    #[case(&["play"], Cli::Play(PlayArgs::default()))]
    #[case(&["--name", "Bob"], Cli::Play(PlayArgs {
        name: Some(String::from("Bob")),
        ..PlayArgs::default()
    }))]
    #[case(&["play", "-n", "Bob", "-s", "http://scores.example:8080", "--log-file", "snake.log"], Cli::Play(PlayArgs {
        config: None,
        name: Some(String::from("Bob")),
        server: Some(String::from("http://scores.example:8080")),
        log_file: Some(PathBuf::from("snake.log")),
    }))]
    #[case(&["-c", "alt.toml", "play"], Cli::Play(PlayArgs {
        config: Some(PathBuf::from("alt.toml")),
        ..PlayArgs::default()
    }))]
    #[case(&["serve"], Cli::Serve(ServeArgs::default()))]
    #[case(&["serve", "--listen", "0.0.0.0:8080", "--database-url", "postgresql://localhost/scores", "--config", "alt.toml"], Cli::Serve(ServeArgs {
        config: Some(PathBuf::from("alt.toml")),
        listen: Some(String::from("0.0.0.0:8080")),
        database_url: Some(String::from("postgresql://localhost/scores")),
    }))]
    #[case(&["serve", "--help"], Cli::Help)]
    #[case(&["-V"], Cli::Version)]
    fn parse_args(#[case] args: &[&str], #[case] cli: Cli) {
        assert_eq!(parse(args).unwrap(), cli);
    }

    #[rstest]
    #[case(&["fly"])]
    #[case(&["play", "serve"])]
    #[case(&["serve", "--name", "Bob"])]
    #[case(&["play", "--listen", "0.0.0.0:8080"])]
    #[case(&["--database-url", "postgresql://localhost/scores"])]
    #[case(&["--name"])]
    fn bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn broken_pipe() {
        let e = anyhow::Error::from(io::Error::from(ErrorKind::BrokenPipe));
        assert!(is_broken_pipe(&e));
        let e = anyhow::Error::from(io::Error::from(ErrorKind::PermissionDenied));
        assert!(!is_broken_pipe(&e));
        let e = anyhow::Error::from(io::Error::from(ErrorKind::BrokenPipe))
            .context("failed to draw frame");
        assert!(is_broken_pipe(&e));
    }
}
