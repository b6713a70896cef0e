//! Hand-written collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use myrtio_matrix_composer::{
    BrightnessInput, HEIGHT, LinkError, LocalTime, Message, PixelSink, Rgb, TimeSource,
    TransportError, WIDTH,
    supervisor::{ConnectOptions, Link, PubSubClient},
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Install a test logger, ignoring repeated initialization
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pixel sink that records every call
#[derive(Debug, Clone)]
pub struct RecordingSink {
    pub grid: [[Rgb; WIDTH]; HEIGHT],
    pub set_pixel_calls: usize,
    pub out_of_bounds: usize,
    pub clears: usize,
    pub presents: usize,
    pub brightness: Option<u8>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            grid: [[BLACK; WIDTH]; HEIGHT],
            set_pixel_calls: 0,
            out_of_bounds: 0,
            clears: 0,
            presents: 0,
            brightness: None,
        }
    }
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.grid[y][x]
    }

    /// Every lit pixel as `(x, y, color)`
    pub fn lit(&self) -> Vec<(usize, usize, Rgb)> {
        let mut lit = Vec::new();
        for (y, row) in self.grid.iter().enumerate() {
            for (x, color) in row.iter().enumerate() {
                if *color != BLACK {
                    lit.push((x, y, *color));
                }
            }
        }
        lit
    }

    /// Returns if every lit pixel has the given color
    pub fn only_color(&self, color: Rgb) -> bool {
        self.lit().iter().all(|(_, _, c)| *c == color)
    }

    pub fn reset_counters(&mut self) {
        self.set_pixel_calls = 0;
        self.out_of_bounds = 0;
        self.clears = 0;
        self.presents = 0;
    }
}

impl PixelSink for RecordingSink {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        self.set_pixel_calls += 1;
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) if x < WIDTH && y < HEIGHT => self.grid[y][x] = color,
            _ => self.out_of_bounds += 1,
        }
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.grid = [[BLACK; WIDTH]; HEIGHT];
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = Some(brightness);
    }
}

/// Time source stuck at one time of day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalTime);

impl TimeSource for FixedClock {
    fn now(&self) -> LocalTime {
        self.0
    }
}

/// Link whose connect results are scripted
#[derive(Debug, Default)]
pub struct ScriptedLink {
    pub connected: bool,
    pub connect_results: VecDeque<Result<(), LinkError>>,
    pub connect_calls: usize,
}

impl ScriptedLink {
    pub fn up() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn down() -> Self {
        Self::default()
    }
}

impl Link for ScriptedLink {
    fn is_connected(&mut self) -> bool {
        self.connected
    }

    fn connect(&mut self, _ssid: &str, _password: &str) -> Result<(), LinkError> {
        self.connect_calls += 1;
        let result = self
            .connect_results
            .pop_front()
            .unwrap_or(Err(LinkError::Timeout));
        if result.is_ok() {
            self.connected = true;
        }
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub topic: String,
    pub payload: Vec<u8>,
    pub retain: bool,
}

impl Published {
    pub fn payload_str(&self) -> &str {
        std::str::from_utf8(&self.payload).unwrap()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedConnect {
    pub client_id: String,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub will: Option<Published>,
}

/// Pub/sub client with scripted results that records every call
#[derive(Debug, Default)]
pub struct ScriptedClient {
    /// Results for successive connect calls, `Ok` once exhausted
    pub connect_results: VecDeque<Result<(), TransportError>>,
    /// Results for successive polls, `Ok(None)` once exhausted
    pub inbox: VecDeque<Result<Option<Message>, TransportError>>,
    pub ping_results: VecDeque<Result<(), TransportError>>,
    pub fail_publish: bool,
    pub connects: Vec<RecordedConnect>,
    pub subscriptions: Vec<String>,
    pub published: Vec<Published>,
    pub pings: usize,
    pub disconnects: usize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_connects(count: usize) -> Self {
        Self {
            connect_results: (0..count)
                .map(|_| Err(TransportError::ConnectionLost))
                .collect(),
            ..Self::default()
        }
    }

    pub fn deliver(&mut self, topic: &str, payload: &str) {
        self.inbox
            .push_back(Ok(Some(Message::new(topic, payload.as_bytes()))));
    }

    pub fn published_on(&self, topic: &str) -> Vec<&Published> {
        self.published.iter().filter(|p| p.topic == topic).collect()
    }
}

impl PubSubClient for ScriptedClient {
    fn connect(&mut self, options: &ConnectOptions<'_>) -> Result<(), TransportError> {
        self.connects.push(RecordedConnect {
            client_id: options.client_id.to_owned(),
            host: options.host.to_owned(),
            port: options.port,
            user: options.user.map(str::to_owned),
            will: options.will.map(|will| Published {
                topic: will.topic.to_owned(),
                payload: will.payload.to_vec(),
                retain: will.retain,
            }),
        });
        self.connect_results.pop_front().unwrap_or(Ok(()))
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError> {
        self.subscriptions.push(topic.to_owned());
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), TransportError> {
        if self.fail_publish {
            return Err(TransportError::ConnectionLost);
        }
        self.published.push(Published {
            topic: topic.to_owned(),
            payload: payload.to_vec(),
            retain,
        });
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<Message>, TransportError> {
        self.inbox.pop_front().unwrap_or(Ok(None))
    }

    fn ping(&mut self) -> Result<(), TransportError> {
        self.pings += 1;
        self.ping_results.pop_front().unwrap_or(Ok(()))
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }
}

/// Buttons held in a fixed position
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldButtons {
    pub up: bool,
    pub down: bool,
}

impl BrightnessInput for HeldButtons {
    fn brightness_up(&mut self) -> bool {
        self.up
    }

    fn brightness_down(&mut self) -> bool {
        self.down
    }
}
