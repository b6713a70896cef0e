//! Terminal preview for myrtio-matrix-composer
//!
//! Runs the full controller offline against a terminal frame buffer and
//! replays a fixed command script through the interpreter, so every view
//! can be checked without hardware or a broker.

use std::{
    io::{self, Write as _},
    thread,
    time::{Duration as StdDuration, SystemTime, UNIX_EPOCH},
};

use embassy_time::{Duration, Instant};
use myrtio_matrix_composer::{
    Config, Controller, FrameScheduler, LinkError, Message, OffsetClock, TransportError,
    UtcSource,
    input::NoButtons,
    output::Matrix,
    rng::Rng,
    simulator::{Terminal, render_ansi},
    supervisor::{ConnectOptions, Link, PubSubClient},
};

/// Terminal redraw period
const PREVIEW_FRAME_DURATION: Duration = Duration::from_millis(50);

/// Length of one pass through the script
const SCRIPT_PERIOD_SECS: u64 = 48;

/// Commands replayed every pass: (second, topic suffix, payload)
const SCRIPT: &[(u64, &str, &str)] = &[
    (0, "effect/set", "clock"),
    (4, "effect/set", "rainbow"),
    (8, "effect/set", "fire"),
    (12, "effect/set", "plasma"),
    (16, "effect/set", "sparkle"),
    (20, "effect/set", "matrix"),
    (24, "effect/set", "gradient"),
    (28, "color/set", "255,120,0"),
    (28, "text/set", "Hello Unicorn!"),
    (36, "sensors/set", r#"{"front":"open","garage":"on","back":"closed"}"#),
    (42, "power/set", "off"),
    (44, "power/set", "on"),
    (44, "effect/set", "none"),
];

/// Link layer of a machine without a radio
struct OfflineLink;

impl Link for OfflineLink {
    fn is_connected(&mut self) -> bool {
        false
    }

    fn connect(&mut self, _ssid: &str, _password: &str) -> Result<(), LinkError> {
        Err(LinkError::NotFound)
    }
}

/// Client that is never reached while the link is down
struct NullClient;

impl PubSubClient for NullClient {
    fn connect(&mut self, _options: &ConnectOptions<'_>) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }

    fn subscribe(&mut self, _topic: &str) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }

    fn publish(&mut self, _topic: &str, _payload: &[u8], _retain: bool) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }

    fn poll(&mut self) -> Result<Option<Message>, TransportError> {
        Ok(None)
    }

    fn ping(&mut self) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }

    fn disconnect(&mut self) {}
}

/// Host wall clock
struct SystemUtc;

impl UtcSource for SystemUtc {
    fn unix_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let config = Config::default();
    let prefix = config.topics.prefix.clone();
    let clock = OffsetClock::new(SystemUtc, config.utc_offset());
    let seed = u32::try_from(SystemUtc.unix_seconds() & 0xFFFF_FFFF).unwrap_or(1);

    let mut controller = Controller::new(
        &config,
        OfflineLink,
        NullClient,
        clock,
        Matrix::new(Terminal::new()),
        NoButtons,
        Rng::new(seed),
    );
    let mut scheduler = FrameScheduler::with_frame_duration(PREVIEW_FRAME_DURATION);

    let start = Instant::now();
    let mut last_second = None;
    let mut stdout = io::stdout();

    loop {
        let now = Instant::now();
        let second = (now - start).as_secs() % SCRIPT_PERIOD_SECS;

        if last_second != Some(second) {
            last_second = Some(second);
            for (_, suffix, payload) in SCRIPT.iter().filter(|(at, _, _)| *at == second) {
                let topic = format!("{prefix}/{suffix}");
                log::info!("{topic} <- {payload}");
                controller.handle_message(&topic, payload.as_bytes());
            }
        }

        controller.tick(now);

        let view = render_ansi(controller.state(), controller.sink().output().frame());
        if stdout.write_all(view.as_bytes()).and_then(|()| stdout.flush()).is_err() {
            break;
        }

        let frame = scheduler.tick(now);
        thread::sleep(StdDuration::from_micros(frame.sleep_duration.as_micros()));
    }

    controller.shutdown();
}
