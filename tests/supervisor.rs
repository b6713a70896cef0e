mod common;

mod tests {
    use super::common::{ScriptedClient, ScriptedLink, init_logger};
    use embassy_time::{Duration, Instant};
    use myrtio_matrix_composer::{
        Config, DisplayState, LinkError, SessionConfig, Supervisor, TransportError,
    };
    use serde_json::Value;

    type TestSupervisor = Supervisor<ScriptedLink, ScriptedClient>;

    fn config() -> Config {
        let mut config = Config::default();
        config.link.ssid = "home".into();
        config.broker.host = "broker.local".into();
        config.broker.user = Some(String::new());
        config
    }

    fn supervisor(link: ScriptedLink, client: ScriptedClient) -> TestSupervisor {
        init_logger();
        Supervisor::new(link, client, SessionConfig::new(&config()))
    }

    fn secs(secs: u64) -> Instant {
        Instant::from_secs(secs)
    }

    #[test]
    fn test_first_service_opens_session() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::new());

        assert_eq!(supervisor.service(secs(0), &state), None);
        assert!(supervisor.is_connected());

        let client = supervisor.client();
        assert_eq!(client.connects.len(), 1);
        let connect = &client.connects[0];
        assert_eq!(connect.client_id, "stellar_unicorn");
        assert_eq!(connect.host, "broker.local");
        assert_eq!(connect.port, 1883);
        assert_eq!(connect.user, None);

        let will = connect.will.as_ref().unwrap();
        assert_eq!(will.topic, "unicorn/availability");
        assert_eq!(will.payload_str(), "offline");
        assert!(will.retain);

        assert_eq!(
            client.subscriptions,
            [
                "unicorn/text/set",
                "unicorn/brightness/set",
                "unicorn/color/set",
                "unicorn/effect/set",
                "unicorn/power/set",
                "unicorn/sensors/set",
                "home/door/+/state",
            ]
        );
    }

    #[test]
    fn test_session_publishes_availability_discovery_and_state() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::new());
        supervisor.service(secs(0), &state);

        let published = &supervisor.client().published;
        let topics: Vec<&str> = published.iter().map(|p| p.topic.as_str()).collect();
        assert_eq!(
            topics,
            [
                "unicorn/availability",
                "homeassistant/light/stellar_unicorn/config",
                "homeassistant/text/stellar_unicorn_text/config",
                "unicorn/state",
            ]
        );
        assert_eq!(published[0].payload_str(), "online");
        assert!(published[0].retain);
        assert!(published[1].retain && published[2].retain);
        assert!(!published[3].retain);

        let light: Value = serde_json::from_slice(&published[1].payload).unwrap();
        assert_eq!(light["command_topic"], "unicorn/power/set");
        assert_eq!(light["unique_id"], "stellar_unicorn_light");
        assert_eq!(
            light["effect_list"],
            serde_json::json!(["none", "rainbow", "fire", "plasma", "sparkle", "matrix", "gradient"])
        );
        assert_eq!(light["device"]["manufacturer"], "Pimoroni");

        let text: Value = serde_json::from_slice(&published[2].payload).unwrap();
        assert_eq!(text["command_topic"], "unicorn/text/set");
        assert_eq!(text["value_template"], "{{ value_json.text }}");

        let report: Value = serde_json::from_slice(&published[3].payload).unwrap();
        assert_eq!(
            report,
            serde_json::json!({
                "state": "ON",
                "brightness": 128,
                "color": {"r": 255, "g": 255, "b": 255},
                "effect": "none",
                "text": ""
            })
        );
    }

    #[test]
    fn test_delivers_one_message_per_service() {
        let state = DisplayState::default();
        let mut client = ScriptedClient::new();
        client.deliver("unicorn/text/set", "a");
        client.deliver("unicorn/text/set", "b");
        let mut supervisor = supervisor(ScriptedLink::up(), client);

        // Not connected yet on the first poll
        assert_eq!(supervisor.service(secs(0), &state), None);

        let first = supervisor.service(secs(1), &state).unwrap();
        assert_eq!(first.payload, b"a");
        let second = supervisor.service(secs(2), &state).unwrap();
        assert_eq!(second.payload, b"b");
        assert_eq!(supervisor.service(secs(3), &state), None);
    }

    #[test]
    fn test_poll_error_reconnects_immediately() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::new());
        supervisor.service(secs(0), &state);

        supervisor
            .client_mut()
            .inbox
            .push_back(Err(TransportError::ConnectionLost));
        assert_eq!(supervisor.service(secs(5), &state), None);

        assert!(supervisor.is_connected());
        assert_eq!(supervisor.client().connects.len(), 2);
        assert_eq!(supervisor.client().subscriptions.len(), 14);
    }

    #[test]
    fn test_failed_connects_follow_backoff() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::failing_connects(3));

        supervisor.service(secs(0), &state);
        assert!(!supervisor.is_connected());
        assert_eq!(supervisor.client().connects.len(), 1);

        supervisor.service(Instant::from_millis(500), &state);
        assert_eq!(supervisor.client().connects.len(), 1);

        supervisor.service(secs(1), &state);
        assert_eq!(supervisor.client().connects.len(), 2);

        supervisor.service(secs(2), &state);
        assert_eq!(supervisor.client().connects.len(), 2);

        supervisor.service(secs(3), &state);
        assert_eq!(supervisor.client().connects.len(), 3);
        assert!(!supervisor.is_connected());

        supervisor.service(secs(7), &state);
        assert_eq!(supervisor.client().connects.len(), 4);
        assert!(supervisor.is_connected());
        assert_eq!(supervisor.backoff().attempts(), 0);
    }

    #[test]
    fn test_ping_interval_and_failure() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::new());
        supervisor.service(secs(0), &state);

        supervisor.service(secs(29), &state);
        assert_eq!(supervisor.client().pings, 0);

        supervisor.service(secs(30), &state);
        assert_eq!(supervisor.client().pings, 1);

        supervisor
            .client_mut()
            .ping_results
            .push_back(Err(TransportError::Timeout));
        supervisor.service(secs(60), &state);
        assert_eq!(supervisor.client().pings, 2);
        assert!(!supervisor.is_connected());

        supervisor.service(secs(60) + Duration::from_millis(10), &state);
        assert!(supervisor.is_connected());
        assert_eq!(supervisor.client().connects.len(), 2);
    }

    #[test]
    fn test_link_down_is_retried_per_check() {
        let state = DisplayState::default();
        let mut link = ScriptedLink::down();
        link.connect_results.extend([
            Err(LinkError::Timeout),
            Err(LinkError::AuthFailed),
            Err(LinkError::NotFound),
            Ok(()),
        ]);
        let mut supervisor = supervisor(link, ScriptedClient::new());

        supervisor.service(secs(0), &state);
        assert_eq!(supervisor.link().connect_calls, 3);
        assert!(supervisor.client().connects.is_empty());

        // No new check before the interval
        supervisor.service(secs(5), &state);
        assert_eq!(supervisor.link().connect_calls, 3);

        supervisor.service(secs(10), &state);
        assert_eq!(supervisor.link().connect_calls, 4);
        assert!(supervisor.is_connected());
    }

    #[test]
    fn test_link_loss_marks_session_disconnected() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::new());
        supervisor.service(secs(0), &state);
        assert!(supervisor.is_connected());

        supervisor.link_mut().connected = false;
        supervisor.service(secs(10), &state);
        assert!(!supervisor.is_connected());
        assert_eq!(supervisor.client().connects.len(), 1);
    }

    #[test]
    fn test_publish_state_only_when_connected() {
        let mut state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::down(), ScriptedClient::new());
        supervisor.publish_state(&state);
        assert!(supervisor.client().published.is_empty());

        supervisor.link_mut().connected = true;
        supervisor.service(secs(0), &state);
        let before = supervisor.client().published_on("unicorn/state").len();

        state.power = false;
        supervisor.publish_state(&state);
        let reports = supervisor.client().published_on("unicorn/state");
        assert_eq!(reports.len(), before + 1);
        assert!(reports[before].payload_str().contains(r#""state":"OFF""#));
    }

    #[test]
    fn test_publish_failure_marks_disconnected() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::new());
        supervisor.service(secs(0), &state);

        supervisor.client_mut().fail_publish = true;
        supervisor.publish_state(&state);
        assert!(!supervisor.is_connected());
    }

    #[test]
    fn test_shutdown_publishes_offline() {
        let state = DisplayState::default();
        let mut supervisor = supervisor(ScriptedLink::up(), ScriptedClient::new());
        supervisor.service(secs(0), &state);

        supervisor.shutdown();
        let last = supervisor.client().published.last().unwrap();
        assert_eq!(last.topic, "unicorn/availability");
        assert_eq!(last.payload_str(), "offline");
        assert!(last.retain);
        assert_eq!(supervisor.client().disconnects, 1);
        assert!(!supervisor.is_connected());
    }
}
