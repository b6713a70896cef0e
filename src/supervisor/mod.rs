//! Connectivity supervisor
//!
//! Owns the link-layer and pub/sub session lifecycle. Every method takes the
//! current instant and returns without blocking on the network beyond what
//! the collaborators themselves do.

mod backoff;

pub use backoff::{Backoff, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, DEFAULT_RESET_AFTER};

use alloc::{string::String, vec::Vec};

use embassy_time::{Duration, Instant};

use crate::{
    config::{BrokerConfig, Config, DeviceConfig, LinkConfig, Topics},
    discovery,
    error::{LinkError, TransportError},
    report::StateReport,
    state::DisplayState,
};

/// Availability payloads
pub const AVAILABILITY_ONLINE: &str = "online";
pub const AVAILABILITY_OFFLINE: &str = "offline";

/// How often link health is checked
pub const DEFAULT_LINK_CHECK_INTERVAL: Duration = Duration::from_secs(10);

/// Liveness ping interval, independent of traffic
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(30);

/// Link connect attempts per failed check
pub const DEFAULT_LINK_RETRIES: u8 = 3;

/// Station network collaborator
pub trait Link {
    fn is_connected(&mut self) -> bool;

    /// Associate with the network, blocking up to a bounded wait
    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;
}

/// Inbound pub/sub message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(topic: &str, payload: &[u8]) -> Self {
        Self {
            topic: String::from(topic),
            payload: Vec::from(payload),
        }
    }
}

/// Message the broker publishes if the session drops without a goodbye
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastWill<'a> {
    pub topic: &'a str,
    pub payload: &'a [u8],
    pub retain: bool,
}

/// Session parameters handed to the pub/sub client on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions<'a> {
    pub client_id: &'a str,
    pub host: &'a str,
    pub port: u16,
    pub user: Option<&'a str>,
    pub password: Option<&'a str>,
    pub keepalive_secs: u16,
    pub will: Option<LastWill<'a>>,
}

/// Pub/sub client collaborator
pub trait PubSubClient {
    fn connect(&mut self, options: &ConnectOptions<'_>) -> Result<(), TransportError>;

    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError>;

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool)
    -> Result<(), TransportError>;

    /// Receive at most one pending message without blocking
    fn poll(&mut self) -> Result<Option<Message>, TransportError>;

    fn ping(&mut self) -> Result<(), TransportError>;

    fn disconnect(&mut self);
}

/// Everything the supervisor needs to (re)build a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub link: LinkConfig,
    pub broker: BrokerConfig,
    pub device: DeviceConfig,
    pub topics: Topics,
    pub link_check_interval: Duration,
    pub ping_interval: Duration,
    pub link_retries: u8,
}

impl SessionConfig {
    pub fn new(config: &Config) -> Self {
        Self {
            link: config.link.clone(),
            broker: config.broker.clone(),
            device: config.device.clone(),
            topics: Topics::new(&config.topics),
            link_check_interval: DEFAULT_LINK_CHECK_INTERVAL,
            ping_interval: DEFAULT_PING_INTERVAL,
            link_retries: DEFAULT_LINK_RETRIES,
        }
    }

    fn connect_options(&self) -> ConnectOptions<'_> {
        ConnectOptions {
            client_id: &self.broker.client_id,
            host: &self.broker.host,
            port: self.broker.port,
            user: self.broker.user(),
            password: self.broker.password(),
            keepalive_secs: self.broker.keepalive_secs,
            will: Some(LastWill {
                topic: &self.topics.availability,
                payload: AVAILABILITY_OFFLINE.as_bytes(),
                retain: true,
            }),
        }
    }
}

/// Keeps the pub/sub session alive across link and transport failures
pub struct Supervisor<L: Link, C: PubSubClient> {
    link: L,
    client: C,
    config: SessionConfig,
    backoff: Backoff,
    connected: bool,
    next_link_check: Instant,
    next_ping: Instant,
}

impl<L: Link, C: PubSubClient> Supervisor<L, C> {
    pub fn new(link: L, client: C, config: SessionConfig) -> Self {
        Self::with_backoff(link, client, config, Backoff::default())
    }

    pub const fn with_backoff(link: L, client: C, config: SessionConfig, backoff: Backoff) -> Self {
        Self {
            link,
            client,
            config,
            backoff,
            connected: false,
            next_link_check: Instant::from_ticks(0),
            next_ping: Instant::from_ticks(0),
        }
    }

    /// Returns if the pub/sub session is believed to be up
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    pub const fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    pub const fn topics(&self) -> &Topics {
        &self.config.topics
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub const fn link(&self) -> &L {
        &self.link
    }

    pub const fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    pub const fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Periodic link health check
    ///
    /// When the link is down the session is marked disconnected and the link
    /// is reconnected with a bounded number of attempts.
    pub fn check_link(&mut self, now: Instant) {
        if now < self.next_link_check {
            return;
        }
        self.next_link_check = now + self.config.link_check_interval;

        if self.link.is_connected() {
            return;
        }

        if self.connected {
            log::warn!("link lost, session marked disconnected");
            self.connected = false;
        }

        for attempt in 1..=self.config.link_retries {
            log::info!("connecting link to {} (attempt {attempt})", self.config.link.ssid);
            match self
                .link
                .connect(&self.config.link.ssid, &self.config.link.password)
            {
                Ok(()) if self.link.is_connected() => {
                    log::info!("link connected");
                    return;
                }
                Ok(()) => log::warn!("link connect returned but link is still down"),
                Err(err) => log::warn!("link connect failed: {err}"),
            }
        }
    }

    /// Receive at most one inbound message
    ///
    /// A receive failure marks the session disconnected and allows an
    /// immediate reconnect.
    pub fn poll(&mut self, now: Instant) -> Option<Message> {
        if !self.connected {
            return None;
        }

        match self.client.poll() {
            Ok(message) => {
                if let Some(message) = &message {
                    log::debug!("received {} bytes on {}", message.payload.len(), message.topic);
                }
                message
            }
            Err(err) => {
                log::warn!("receive failed: {err}, reconnecting");
                self.connected = false;
                self.backoff.retry_now(now);
                None
            }
        }
    }

    /// Reconnect when allowed and keep the session alive
    pub fn maintain(&mut self, now: Instant, state: &DisplayState) {
        if !self.connected && self.backoff.ready(now) && self.link.is_connected() {
            self.reconnect(now, state);
        }

        if self.connected && now >= self.next_ping {
            self.next_ping = now + self.config.ping_interval;
            if let Err(err) = self.client.ping() {
                log::warn!("ping failed: {err}");
                self.connected = false;
            }
        }
    }

    /// Link check, one receive and session maintenance in loop order
    ///
    /// Returns the received message, if any. Callers that need to apply the
    /// message before maintenance use the individual steps instead.
    pub fn service(&mut self, now: Instant, state: &DisplayState) -> Option<Message> {
        self.check_link(now);
        let message = self.poll(now);
        self.maintain(now, state);
        message
    }

    /// Publish the state report, if connected
    pub fn publish_state(&mut self, state: &DisplayState) {
        if !self.connected {
            return;
        }
        if let Err(err) = self.try_publish_state(state) {
            log::warn!("state publish failed: {err}");
            self.connected = false;
        }
    }

    /// Best-effort goodbye: retained "offline" availability, then disconnect
    pub fn shutdown(&mut self) {
        if self.connected {
            if let Err(err) = self.client.publish(
                &self.config.topics.availability,
                AVAILABILITY_OFFLINE.as_bytes(),
                true,
            ) {
                log::debug!("offline publish failed: {err}");
            }
        }
        self.client.disconnect();
        self.connected = false;
    }

    fn reconnect(&mut self, now: Instant, state: &DisplayState) {
        log::info!(
            "connecting to broker {}:{}",
            self.config.broker.host,
            self.config.broker.port
        );

        match self.open_session(state) {
            Ok(()) => {
                log::info!("broker session established");
                self.backoff.record_success();
                self.connected = true;
                self.next_ping = now + self.config.ping_interval;
            }
            Err(err) => {
                self.client.disconnect();
                let delay = self.backoff.record_failure(now);
                log::warn!(
                    "broker connect failed: {err}, retrying in {}s",
                    delay.as_secs()
                );
            }
        }
    }

    fn open_session(&mut self, state: &DisplayState) -> Result<(), TransportError> {
        self.client.connect(&self.config.connect_options())?;

        for topic in self.config.topics.subscriptions() {
            self.client.subscribe(topic)?;
        }

        self.client.publish(
            &self.config.topics.availability,
            AVAILABILITY_ONLINE.as_bytes(),
            true,
        )?;
        self.publish_discovery()?;
        self.try_publish_state(state)
    }

    fn publish_discovery(&mut self) -> Result<(), TransportError> {
        let messages = match discovery::discovery_messages(&self.config.topics, &self.config.device)
        {
            Ok(messages) => messages,
            Err(err) => {
                log::warn!("skipping discovery, encoding failed: {err}");
                return Ok(());
            }
        };

        for message in &messages {
            self.client.publish(&message.topic, &message.payload, true)?;
        }
        Ok(())
    }

    fn try_publish_state(&mut self, state: &DisplayState) -> Result<(), TransportError> {
        let payload = StateReport::new(state).to_payload().map_err(|err| {
            log::warn!("state encoding failed: {err}");
            TransportError::Protocol
        })?;
        self.client.publish(&self.config.topics.state, &payload, false)
    }
}
