use std::env;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;

use crate::server;
use crate::server::api;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Status,
    Train,
    Raid,
    Recalibrate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("status") => Some(Command::Status),
        Some("train") => Some(Command::Train),
        Some("raid") => Some(Command::Raid),
        Some("recalibrate") => Some(Command::Recalibrate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Status) => handle_status(),
        Some(Command::Train) => handle_train(args),
        Some(Command::Raid) => handle_raid(args),
        Some(Command::Recalibrate) => handle_recalibrate(),
        None => {
            eprintln!("usage: shadowgym <serve|status|train|raid|recalibrate>");
            2
        }
    }
}

fn data_dir() -> PathBuf {
    env::var("SHADOWGYM_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn sync_enabled() -> bool {
    env::var("SHADOWGYM_SYNC")
        .map(|raw| raw != "off")
        .unwrap_or(true)
}

fn open_session(seed: u64) -> Session {
    Session::open(data_dir(), sync_enabled(), seed)
}

fn default_seed() -> u64 {
    Utc::now().timestamp_millis() as u64
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("SHADOWGYM_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let session = open_session(default_seed());
    match server::run_server(&bind_addr, session) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_status() -> i32 {
    let session = open_session(default_seed());
    print_payload(api::state_payload(&session))
}

fn handle_train(args: &[String]) -> i32 {
    let Some(key) = args.get(2) else {
        eprintln!("usage: shadowgym train <strength|agility|endurance|focus> [seed]");
        return 2;
    };
    let seed = parse_u64_arg(args.get(3), "seed", default_seed());

    let mut session = open_session(seed);
    let payload = api::train_payload(&mut session, key);
    finish_one_shot(&mut session);
    print_payload(payload)
}

fn handle_raid(args: &[String]) -> i32 {
    let seed = parse_u64_arg(args.get(2), "seed", default_seed());
    let mut session = open_session(seed);
    let payload = api::raid_payload(&mut session);
    finish_one_shot(&mut session);
    print_payload(payload)
}

fn handle_recalibrate() -> i32 {
    let mut session = open_session(default_seed());
    let payload = api::recalibrate_payload(&mut session);
    finish_one_shot(&mut session);
    print_payload(payload)
}

/// A one-shot process cannot ride the debounce window, so it pumps once and
/// flushes before exiting.
fn finish_one_shot(session: &mut Session) {
    session.pump(Instant::now());
    session.flush();
}

fn print_payload(payload: Result<String, serde_json::Error>) -> i32 {
    match payload {
        Ok(body) => {
            println!("{body}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize response: {err}");
            1
        }
    }
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
