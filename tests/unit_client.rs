// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Behavior tests for `UnitClient` over the in-memory transport.

use std::sync::Arc;

use ensy_lib::protocol::{MemoryTransport, PublishedMessage, TransportEvent};
use ensy_lib::{ActionName, Error, EventName, PartyMode, ProtocolError, UnitClient};
use parking_lot::Mutex;

const UNIT: &str = "aabbccddeeff";

fn client() -> (UnitClient<MemoryTransport>, MemoryTransport) {
    let transport = MemoryTransport::new();
    let client = UnitClient::with_transport(UNIT, transport.clone()).unwrap();
    (client, transport)
}

fn message(topic: &str, payload: &str) -> TransportEvent {
    TransportEvent::Message {
        topic: topic.to_string(),
        payload: payload.to_string(),
    }
}

fn sent(topic: &str, payload: &str) -> PublishedMessage {
    PublishedMessage {
        topic: topic.to_string(),
        payload: payload.to_string(),
    }
}

/// Collects what listeners receive, tagged so ordering can be checked.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    fn listener(&self, tag: &'static str) -> impl Fn(&str) + Send + Sync + 'static {
        let calls = Arc::clone(&self.0);
        move |payload| calls.lock().push(format!("{tag}:{payload}"))
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

// ============================================================================
// Construction
// ============================================================================

mod construction {
    use super::*;

    #[test]
    fn accepts_lowercase_hex_ids() {
        for id in ["aabbccddeeff", "000000000000", "0123456789ab", "ffffffffffff"] {
            assert!(
                UnitClient::with_transport(id, MemoryTransport::new()).is_ok(),
                "{id} should be accepted"
            );
        }
    }

    #[test]
    fn rejects_everything_else() {
        for id in [
            "",
            "aabbccddeef",
            "aabbccddeeff0",
            "AABBCCDDEEFF",
            "aabbccddeefg",
            "aa:bb:cc:dd:ee",
            " aabbccddeef",
        ] {
            let result = UnitClient::with_transport(id, MemoryTransport::new());
            assert!(
                matches!(result, Err(Error::InvalidIdentifier(ref rejected)) if rejected == id),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn nothing_subscribed_before_connect() {
        let (_client, transport) = client();
        assert!(transport.subscriptions().is_empty());
        assert!(transport.published().is_empty());
    }
}

// ============================================================================
// Inbound events
// ============================================================================

mod inbound {
    use super::*;

    #[tokio::test]
    async fn end_to_end_temperature() {
        let (client, transport) = client();
        let recorder = Recorder::default();
        client.add_listener(EventName::Temperature, recorder.listener("temperature"));

        client.handle_event(TransportEvent::Connected).await.unwrap();
        assert_eq!(transport.subscriptions(), ["units/aabbccddeeff/unit/+"]);

        client
            .handle_event(message("units/aabbccddeeff/unit/temperature", "22"))
            .await
            .unwrap();

        assert_eq!(recorder.calls(), ["temperature:22"]);
        assert_eq!(client.state().temperature(), Some(22));
    }

    #[tokio::test]
    async fn listeners_run_in_registration_order() {
        let (client, _) = client();
        let recorder = Recorder::default();
        client.add_listener(EventName::Fan, recorder.listener("first"));
        client.add_listener(EventName::Fan, recorder.listener("second"));
        client.add_listener(EventName::Fan, recorder.listener("third"));
        client.add_listener(EventName::Party, recorder.listener("party"));

        client
            .handle_event(message("units/aabbccddeeff/unit/fan", "2"))
            .await
            .unwrap();

        assert_eq!(recorder.calls(), ["first:2", "second:2", "third:2"]);
    }

    #[tokio::test]
    async fn every_event_name_is_delivered_verbatim() {
        let (client, _) = client();
        let recorder = Recorder::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        client.on_any_event(move |name, payload| sink.lock().push((name, payload.to_string())));

        for name in EventName::ALL {
            client.add_listener(name, recorder.listener(name.as_str()));
        }

        for name in EventName::ALL {
            let topic = format!("units/{UNIT}/unit/{name}");
            client
                .handle_event(message(&topic, " 1.5 text "))
                .await
                .unwrap();
        }

        let expected: Vec<String> = EventName::ALL
            .iter()
            .map(|name| format!("{name}: 1.5 text "))
            .collect();
        assert_eq!(recorder.calls(), expected);

        let seen = seen.lock();
        assert_eq!(seen.len(), EventName::ALL.len());
        assert!(seen.iter().all(|(_, payload)| payload == " 1.5 text "));
    }

    #[tokio::test]
    async fn other_units_and_directions_are_ignored() {
        let (client, _) = client();
        let recorder = Recorder::default();
        client.add_listener(EventName::Fan, recorder.listener("fan"));

        for topic in [
            "units/112233445566/unit/fan",
            "units/aabbccddeeff/app/fan",
            "devices/aabbccddeeff/unit/fan",
            "units/aabbccddeeff/unit/boost",
        ] {
            client.handle_event(message(topic, "3")).await.unwrap();
        }

        assert!(recorder.calls().is_empty());
        assert!(client.state().is_empty());
    }

    #[tokio::test]
    async fn malformed_topics_are_recoverable() {
        let (client, _) = client();
        let recorder = Recorder::default();
        client.add_listener(EventName::Fan, recorder.listener("fan"));

        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        client.on_protocol_error(move |err| sink.lock().push(err.to_string()));

        for (topic, segments) in [
            ("units/aabbccddeeff/unit", 3),
            ("units/aabbccddeeff/unit/fan/extra", 5),
            ("fan", 1),
        ] {
            let result = client.handle_event(message(topic, "2")).await;
            assert!(
                matches!(
                    result,
                    Err(Error::Protocol(ProtocolError::MalformedTopic { segments: s, .. })) if s == segments
                ),
                "{topic} should be malformed"
            );
        }
        assert!(recorder.calls().is_empty());
        assert_eq!(errors.lock().len(), 3);

        // The client keeps working afterwards.
        client
            .handle_event(message("units/aabbccddeeff/unit/fan", "2"))
            .await
            .unwrap();
        assert_eq!(recorder.calls(), ["fan:2"]);
    }

    #[tokio::test]
    async fn remove_handler_silences_event() {
        let (client, _) = client();
        let recorder = Recorder::default();
        client.add_listener(EventName::Countdown, recorder.listener("a"));
        client.add_listener(EventName::Countdown, recorder.listener("b"));
        client.add_listener(EventName::Fan, recorder.listener("fan"));

        assert_eq!(client.remove_handler(EventName::Countdown), 2);
        assert_eq!(client.listener_count(EventName::Countdown), 0);

        client
            .handle_event(message("units/aabbccddeeff/unit/countdown", "30"))
            .await
            .unwrap();
        client
            .handle_event(message("units/aabbccddeeff/unit/fan", "1"))
            .await
            .unwrap();

        assert_eq!(recorder.calls(), ["fan:1"]);
        // Still cached even without listeners.
        assert_eq!(client.state().countdown(), Some(30));
    }

    #[tokio::test]
    async fn set_handler_replaces_and_remove_listener_detaches_one() {
        let (client, _) = client();
        let recorder = Recorder::default();
        client.add_listener(EventName::Absent, recorder.listener("old"));
        client.set_handler(EventName::Absent, recorder.listener("only"));
        let extra = client.add_listener(EventName::Absent, recorder.listener("extra"));

        assert!(client.remove_listener(extra));
        assert!(!client.remove_listener(extra));

        client
            .handle_event(message("units/aabbccddeeff/unit/absent", "1"))
            .await
            .unwrap();

        assert_eq!(recorder.calls(), ["only:1"]);
    }

    #[tokio::test]
    async fn broadcast_receives_events() {
        let (client, _) = client();
        let mut events = client.subscribe_events();

        client
            .handle_event(message("units/aabbccddeeff/unit/tout", "-4"))
            .await
            .unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.name, EventName::OutdoorTemperature);
        assert_eq!(event.payload, "-4");
        assert_eq!(event.parse::<i32>().unwrap(), -4);
    }

    #[tokio::test]
    async fn listener_may_register_another_listener() {
        let (client, _) = client();
        let recorder = Recorder::default();

        let inner_client = client.clone();
        let inner_recorder = recorder.clone();
        client.add_listener(EventName::Status, move |_| {
            inner_client.add_listener(EventName::Fan, inner_recorder.listener("late"));
        });

        client
            .handle_event(message("units/aabbccddeeff/unit/status", "online"))
            .await
            .unwrap();
        client
            .handle_event(message("units/aabbccddeeff/unit/fan", "3"))
            .await
            .unwrap();

        assert_eq!(recorder.calls(), ["late:3"]);
        assert!(client.state().is_online());
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn fan_speed_domain() {
        let (client, transport) = client();

        for bad in [0, 4, -1] {
            let result = client.set_fan_speed(bad).await;
            assert!(matches!(result, Err(Error::InvalidArgument(_))), "{bad}");
        }
        for good in [1, 2, 3] {
            client.set_fan_speed(good).await.unwrap();
        }

        assert_eq!(
            transport.published(),
            [
                sent("units/aabbccddeeff/app/fan", "1"),
                sent("units/aabbccddeeff/app/fan", "2"),
                sent("units/aabbccddeeff/app/fan", "3"),
            ]
        );
    }

    #[tokio::test]
    async fn absent_mode() {
        let (client, transport) = client();
        client.set_absent(true).await.unwrap();
        client.set_absent(false).await.unwrap();

        assert_eq!(
            transport.published(),
            [
                sent("units/aabbccddeeff/app/absent", "1"),
                sent("units/aabbccddeeff/app/absent", "0"),
            ]
        );
    }

    #[tokio::test]
    async fn temperature_uses_correct_spelling() {
        let (client, transport) = client();
        client.set_temperature(21).await.unwrap();

        assert_eq!(
            transport.last_published(),
            Some(sent("units/aabbccddeeff/app/temperature", "21"))
        );

        for bad in [9, 31] {
            assert!(matches!(
                client.set_temperature(bad).await,
                Err(Error::InvalidArgument(_))
            ));
        }
        assert_eq!(transport.published().len(), 1);
    }

    #[tokio::test]
    async fn countdown_and_party() {
        let (client, transport) = client();
        client.set_countdown(90).await.unwrap();
        client.start_party().await.unwrap();
        client.stop_party().await.unwrap();
        client.set_party_mode(PartyMode::Start).await.unwrap();

        assert!(matches!(
            client.set_countdown(-1).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            client.set_countdown(1441).await,
            Err(Error::InvalidArgument(_))
        ));

        assert_eq!(
            transport.published(),
            [
                sent("units/aabbccddeeff/app/countdown", "90"),
                sent("units/aabbccddeeff/app/party", "1"),
                sent("units/aabbccddeeff/app/party", "2"),
                sent("units/aabbccddeeff/app/party", "1"),
            ]
        );
    }

    #[tokio::test]
    async fn raw_values_bypass_validation() {
        let (client, transport) = client();
        client.set_raw(ActionName::Fan, "7").await.unwrap();
        assert_eq!(
            transport.last_published(),
            Some(sent("units/aabbccddeeff/app/fan", "7"))
        );
    }

    #[tokio::test]
    async fn transport_failure_is_returned() {
        let (client, transport) = client();
        transport.fail_with("offline");

        let result = client.set_fan_speed(2).await;
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));

        transport.clear_failure();
        client.set_fan_speed(2).await.unwrap();
    }

    #[tokio::test]
    async fn commands_fail_after_end() {
        let (client, transport) = client();
        client.end().await.unwrap();

        assert!(matches!(client.set_fan_speed(2).await, Err(Error::Ended)));
        assert!(matches!(client.set_absent(true).await, Err(Error::Ended)));
        assert!(matches!(client.start_party().await, Err(Error::Ended)));
        assert!(transport.published().is_empty());
    }
}
