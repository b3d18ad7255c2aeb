//! `warbler`: command-line front end for the warbler API client.
//!
//! - **`parse`**: unmarshal a saved API response offline and render it.
//! - **`user`**: show a user, or list their friends or followers.
//! - **`my`**: the same for the authenticated user.
//! - **`timeline`**: read a status timeline.
//! - **`rate-limit`**: show the remaining request allowance.
//!
//! Network commands read their configuration from `WARBLER_*` environment
//! variables and log through `RUST_LOG` (default `warbler=info`).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use warbler::render::{
    render_entity, render_message, render_rate_limit, render_status, render_timeline,
    render_trends, render_user,
};
use warbler::{
    unmarshal, Action, Attributes, Batch, Client, ClientConfig, Entity, Location, Message,
    Payload, RateLimitStatus, Reference, Status, Trendline, User,
};
use warbler_http::{Anonymous, BasicAuth, BearerToken, HttpTransport};

/// warbler: Twitter-style REST API client
#[derive(Parser)]
#[command(name = "warbler", version, about, long_about = None)]
struct Cli {
    /// Screen name of the authenticated user.
    #[arg(long, env = "WARBLER_LOGIN", global = true)]
    login: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, env = "WARBLER_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Password for basic authentication, used with --login when no token is set.
    #[arg(long, env = "WARBLER_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Print entities as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Extra request parameter as KEY=VALUE (repeatable), e.g. `count=5`.
    #[arg(short = 'p', long = "param", global = true, value_parser = parse_param)]
    params: Vec<(String, String)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Unmarshal a saved API response and render it.
    ///
    /// Pass `-` as FILE to read from stdin. Array elements that fail to
    /// hydrate are reported on stderr; the exit status is 1 if any did.
    Parse {
        /// Entity type of the payload.
        #[arg(value_enum)]
        kind: Kind,

        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,
    },

    /// Show a user (`info`), or their `friends` or `followers`.
    ///
    /// USER is a numeric id or a screen name (`jdoe` or `@jdoe`).
    User {
        user: Reference,
        #[arg(default_value = "info")]
        action: Action,
    },

    /// `info`, `friends` or `followers` of the authenticated user.
    My {
        #[arg(default_value = "info")]
        action: Action,
    },

    /// Read a timeline: public, friends, home, user, me or mentions.
    Timeline {
        kind: Action,
        /// Whose timeline to read, for `user`.
        user: Option<Reference>,
    },

    /// Show the remaining request allowance for this hour.
    RateLimit,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    User,
    Status,
    Message,
    Location,
    Trendline,
    RateLimit,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warbler=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    let options: Vec<(&str, &str)> = cli
        .params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    match &cli.command {
        Command::Parse { kind, file } => {
            let raw = read_input(file);
            let complete = match kind {
                Kind::User => show(parse::<User>(&raw), json, render_user),
                Kind::Status => show(parse::<Status>(&raw), json, render_status),
                Kind::Message => show(parse::<Message>(&raw), json, render_message),
                Kind::Location => show(parse::<Location>(&raw), json, |l| render_entity(l)),
                Kind::Trendline => show(parse::<Trendline>(&raw), json, render_trends),
                Kind::RateLimit => show(parse::<RateLimitStatus>(&raw), json, render_rate_limit),
            };
            if !complete {
                process::exit(1);
            }
        }

        Command::User { user, action } => {
            let client = connect(&cli);
            let payload = client.user(*action, user, &options).unwrap_or_else(|e| fatal(&e));
            show(payload, json, render_user);
        }

        Command::My { action } => {
            let client = connect(&cli);
            let payload = client.my(*action, &options).unwrap_or_else(|e| fatal(&e));
            if let Payload::One(me) = &payload {
                if me.self_capabilities().is_none() {
                    warn!("returned user is not the configured login");
                }
            }
            show(payload, json, render_user);
        }

        Command::Timeline { kind, user } => {
            let client = connect(&cli);
            let statuses = match user {
                Some(user) => client.timeline_for(*kind, user, &options),
                None => client.timeline(*kind, &options),
            }
            .unwrap_or_else(|e| fatal(&e));
            if json {
                print_json(&statuses, true);
            } else {
                print!("{}", render_timeline(&statuses));
            }
            report_rejected(&statuses);
        }

        Command::RateLimit => {
            let client = connect(&cli);
            let status = client
                .account_info(Action::RateLimitStatus)
                .unwrap_or_else(|e| fatal(&e));
            show(Payload::One(status), json, render_rate_limit);
        }
    }
}

/// Build a client from the environment and the credential flags.
fn connect(cli: &Cli) -> Client {
    let config = ClientConfig::from_env().unwrap_or_else(|e| fatal(&e));
    info!(base_url = %config.base_url(), login = cli.login.as_deref().unwrap_or("-"), "connecting");

    let transport = match (&cli.token, &cli.login, &cli.password) {
        (Some(token), _, _) => HttpTransport::new(&config, BearerToken::new(token.as_str())),
        (None, Some(login), Some(password)) => {
            HttpTransport::new(&config, BasicAuth::new(login.as_str(), password.as_str()))
        }
        _ => HttpTransport::new(&config, Anonymous),
    }
    .unwrap_or_else(|e| fatal(&e));

    let mut builder = Client::builder(transport).config(config);
    if let Some(login) = &cli.login {
        builder = builder.login(login.as_str());
    }
    builder.build()
}

fn parse<E: Entity>(raw: &str) -> Payload<E> {
    unmarshal::<E>(raw).unwrap_or_else(|e| fatal(&e))
}

/// Print a payload; returns whether every element hydrated.
fn show<E: Entity>(payload: Payload<E>, json: bool, render: impl Fn(&E) -> String) -> bool {
    match payload {
        Payload::One(entity) => {
            if json {
                print_json(std::slice::from_ref(&entity), false);
            } else {
                print!("{}", render(&entity));
            }
            true
        }
        Payload::Many(batch) => {
            if json {
                print_json(&batch, true);
            } else {
                for entity in &batch {
                    print!("{}", render(entity));
                }
            }
            report_rejected(&batch)
        }
    }
}

fn print_json<'a, E: Entity>(entities: impl IntoIterator<Item = &'a E>, many: bool) {
    let value = json_output(entities, many);
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{}", text),
        Err(e) => fatal(&e),
    }
}

/// Field maps of `entities`: an array when `many`, otherwise the single
/// entity as an object.
fn json_output<'a, E: Entity>(entities: impl IntoIterator<Item = &'a E>, many: bool) -> serde_json::Value {
    let mut maps: Vec<_> = entities
        .into_iter()
        .map(|e| serde_json::Value::Object(e.to_field_map()))
        .collect();
    if many || maps.len() != 1 {
        serde_json::Value::Array(maps)
    } else {
        maps.remove(0)
    }
}

fn report_rejected<E>(batch: &Batch<E>) -> bool {
    for rejected in &batch.rejected {
        eprintln!("warbler: element {}: {}", rejected.index, rejected.error);
    }
    batch.is_complete()
}

/// Parse a `KEY=VALUE` request parameter.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", raw)),
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path)
            .unwrap_or_else(|e| fatal(&format!("failed to read {}: {}", path.display(), e)))
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &dyn std::fmt::Display) -> ! {
    eprintln!("warbler: {}", msg);
    process::exit(2);
}

// --- tests -------------------------------------------------------------------
