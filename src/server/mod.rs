//! HTTP trigger surface. One thread owns the session: a non-blocking accept
//! loop interleaves request handling with the periodic ticks and the save
//! debounce, so every PlayerState mutation stays behind a single writer.

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::{Duration, Instant};

use crate::engine::ticks::{EFFECT_TICK_INTERVAL, ENERGY_REGEN_INTERVAL};
use crate::engine::Ticker;
use crate::session::Session;

pub mod api;
pub mod routes;

/// Idle poll interval between accept attempts.
const POLL_SLEEP: Duration = Duration::from_millis(25);

pub fn run_server(bind_addr: &str, mut session: Session) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    listener.set_nonblocking(true)?;
    println!("shadowgym server listening on http://{bind_addr}");

    let now = Instant::now();
    let mut effect_tick = Ticker::new(EFFECT_TICK_INTERVAL, now);
    let mut regen_tick = Ticker::new(ENERGY_REGEN_INTERVAL, now);

    loop {
        match listener.accept() {
            Ok((mut stream, _)) => {
                if let Err(err) = handle_connection(&mut session, &mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => {
                std::thread::sleep(POLL_SLEEP);
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }

        let now = Instant::now();
        if effect_tick.due(now) {
            session.engine.tick_effects();
        }
        if regen_tick.due(now) {
            session.engine.regen_energy();
        }
        session.pump(now);
    }
}

fn handle_connection(session: &mut Session, stream: &mut TcpStream) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let request_line = request.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let response = routes::route_request(session, method, path).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
