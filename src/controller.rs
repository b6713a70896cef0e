//! Main loop body
//!
//! [`Controller`] owns the display state and every collaborator and runs one
//! loop iteration per [`Controller::tick`]: link check, one inbound message,
//! session maintenance, buttons, then one rendered frame.

use embassy_time::Instant;

use crate::{
    PixelSink,
    clock::TimeSource,
    config::Config,
    input::{BrightnessInput, adjust_brightness},
    interpreter::{CommandEffects, CommandInterpreter},
    renderer::Renderer,
    rng::Rng,
    state::DisplayState,
    supervisor::{Link, PubSubClient, SessionConfig, Supervisor},
};

pub struct Controller<L, C, T, S, I>
where
    L: Link,
    C: PubSubClient,
    T: TimeSource,
    S: PixelSink,
    I: BrightnessInput,
{
    state: DisplayState,
    interpreter: CommandInterpreter,
    renderer: Renderer<T>,
    supervisor: Supervisor<L, C>,
    sink: S,
    input: I,
}

impl<L, C, T, S, I> Controller<L, C, T, S, I>
where
    L: Link,
    C: PubSubClient,
    T: TimeSource,
    S: PixelSink,
    I: BrightnessInput,
{
    /// Build the controller and apply the startup brightness to the sink
    pub fn new(config: &Config, link: L, client: C, clock: T, sink: S, input: I, rng: Rng) -> Self {
        let session = SessionConfig::new(config);
        Self::with_supervisor(Supervisor::new(link, client, session), clock, sink, input, rng)
    }

    /// Build the controller around an existing supervisor
    pub fn with_supervisor(
        supervisor: Supervisor<L, C>,
        clock: T,
        mut sink: S,
        input: I,
        mut rng: Rng,
    ) -> Self {
        let state = DisplayState::new(&mut rng);
        sink.set_brightness(state.brightness);

        Self {
            interpreter: CommandInterpreter::new(supervisor.topics().clone()),
            renderer: Renderer::new(clock, rng),
            state,
            supervisor,
            sink,
            input,
        }
    }

    pub const fn state(&self) -> &DisplayState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut DisplayState {
        &mut self.state
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub const fn supervisor(&self) -> &Supervisor<L, C> {
        &self.supervisor
    }

    pub const fn supervisor_mut(&mut self) -> &mut Supervisor<L, C> {
        &mut self.supervisor
    }

    pub const fn renderer_mut(&mut self) -> &mut Renderer<T> {
        &mut self.renderer
    }

    /// Run one loop iteration
    pub fn tick(&mut self, now: Instant) {
        self.supervisor.check_link(now);

        if let Some(message) = self.supervisor.poll(now) {
            self.handle_message(&message.topic, &message.payload);
        }

        self.supervisor.maintain(now, &self.state);
        self.poll_buttons();

        self.renderer.render(&mut self.state, &mut self.sink);
        self.sink.present();
    }

    /// Apply an inbound message as if it arrived from the session
    pub fn handle_message(&mut self, topic: &str, payload: &[u8]) -> CommandEffects {
        let effects = self.interpreter.handle(&mut self.state, topic, payload);
        self.apply_effects(effects);
        effects
    }

    /// Best-effort offline notice and disconnect
    pub fn shutdown(&mut self) {
        self.supervisor.shutdown();
    }

    fn apply_effects(&mut self, effects: CommandEffects) {
        if !effects.has_effects() {
            return;
        }

        if let Some(brightness) = effects.brightness {
            self.sink.set_brightness(brightness);
        }

        if effects.clear {
            self.sink.clear();
            self.sink.present();
        }

        if effects.publish_state {
            self.supervisor.publish_state(&self.state);
        }
    }

    fn poll_buttons(&mut self) {
        let Some(brightness) = adjust_brightness(&mut self.input, self.state.brightness) else {
            return;
        };

        log::debug!("brightness adjusted to {brightness} by buttons");
        self.state.brightness = brightness;
        self.sink.set_brightness(brightness);
        self.supervisor.publish_state(&self.state);
    }
}
