//! Conversation scenarios against scripted backends and console.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_bridge::{
    DetectIntentQuery, DialogueTransport, MessageSink, NluClient, ParameterValue, QueryResult,
    Trace,
};
use parley_common::BridgeError;
use serde_json::{json, Value};

use super::*;

const FAREWELL: &str = "The end! Start me again with `parley`";

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Prompt(String),
    Say(String),
}

fn prompt(q: &str) -> Line {
    Line::Prompt(q.to_string())
}

fn say(m: &str) -> Line {
    Line::Say(m.to_string())
}

#[derive(Default)]
struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Vec<Line>,
}

impl ScriptedConsole {
    fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    fn prompts(&self) -> usize {
        self.transcript
            .iter()
            .filter(|l| matches!(l, Line::Prompt(_)))
            .count()
    }
}

impl MessageSink for ScriptedConsole {
    fn emit(&mut self, message: &str) -> std::io::Result<()> {
        self.transcript.push(say(message));
        Ok(())
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn prompt(&mut self, question: &str) -> Result<String> {
        self.transcript.push(prompt(question));
        self.inputs.pop_front().ok_or(BridgeError::InputClosed)
    }
}

#[derive(Default)]
struct NluLog {
    replies: VecDeque<Result<QueryResult>>,
    queries: Vec<DetectIntentQuery>,
}

struct ScriptedNlu(Arc<Mutex<NluLog>>);

#[async_trait]
impl NluClient for ScriptedNlu {
    async fn detect_intent(&self, query: &DetectIntentQuery) -> Result<QueryResult> {
        let mut log = self.0.lock().unwrap();
        log.queries.push(query.clone());
        log.replies
            .pop_front()
            .unwrap_or_else(|| Err(BridgeError::backend_unavailable("no scripted reply")))
    }
}

#[derive(Default)]
struct DialogueLog {
    replies: VecDeque<Result<Vec<Trace>>>,
    requests: Vec<(SessionId, Value)>,
}

struct ScriptedDialogue(Arc<Mutex<DialogueLog>>);

#[async_trait]
impl DialogueTransport for ScriptedDialogue {
    async fn interact(&self, session: &SessionId, action: &Action) -> Result<Vec<Trace>> {
        let mut log = self.0.lock().unwrap();
        log.requests
            .push((session.clone(), serde_json::to_value(action).unwrap()));
        log.replies
            .pop_front()
            .unwrap_or_else(|| Err(BridgeError::interaction_failed("no scripted reply")))
    }
}

struct Harness {
    nlu: Arc<Mutex<NluLog>>,
    dialogue: Arc<Mutex<DialogueLog>>,
}

impl Harness {
    fn new(nlu: Vec<Result<QueryResult>>, dialogue: Vec<Result<Vec<Trace>>>) -> Self {
        Self {
            nlu: Arc::new(Mutex::new(NluLog {
                replies: nlu.into(),
                queries: Vec::new(),
            })),
            dialogue: Arc::new(Mutex::new(DialogueLog {
                replies: dialogue.into(),
                requests: Vec::new(),
            })),
        }
    }

    fn conversation(&self, console: ScriptedConsole) -> ConversationLoop<ScriptedConsole> {
        let resolver = IntentResolver::new(Box::new(ScriptedNlu(self.nlu.clone())), "travel-1234");
        let bridge = DialogueBridge::new(Box::new(ScriptedDialogue(self.dialogue.clone())));
        ConversationLoop::new(resolver, bridge, console)
    }

    fn requests(&self) -> Vec<(SessionId, Value)> {
        self.dialogue.lock().unwrap().requests.clone()
    }

    fn queries(&self) -> Vec<DetectIntentQuery> {
        self.nlu.lock().unwrap().queries.clone()
    }
}

fn intent(name: &str, confidence: f64, parameters: &[(&str, ParameterValue)]) -> Result<QueryResult> {
    Ok(QueryResult {
        intent_display_name: name.to_string(),
        confidence,
        parameters: parameters
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    })
}

fn text(m: &str) -> Trace {
    Trace::Text(m.to_string())
}

fn speak(m: &str) -> Trace {
    Trace::Speak(m.to_string())
}

#[tokio::test]
async fn launch_end_terminates_before_any_user_prompt() {
    let harness = Harness::new(vec![], vec![Ok(vec![text("Closed today."), Trace::End])]);
    let mut conversation = harness.conversation(ScriptedConsole::new(&["alice"]));

    let session = conversation.run().await.unwrap();

    assert_eq!(session.as_str(), "alice");
    assert_eq!(
        conversation.console().transcript,
        vec![
            prompt("What is your name?"),
            say("Closed today."),
            say(FAREWELL),
        ]
    );
    assert!(harness.queries().is_empty());
    assert_eq!(harness.requests().len(), 1);
}

#[tokio::test]
async fn alice_books_a_flight_then_the_dialogue_ends() {
    let harness = Harness::new(
        vec![
            intent("BookFlight", 0.9, &[]),
            intent(
                "ProvideCity",
                0.8,
                &[("city", ParameterValue::String("Paris".into()))],
            ),
        ],
        vec![
            Ok(vec![text("Hi!")]),
            Ok(vec![speak("Where to?")]),
            Ok(vec![text("Bye!"), Trace::End, text("unreachable")]),
        ],
    );
    let mut conversation = harness.conversation(ScriptedConsole::new(&[
        "alice",
        "book a flight",
        "Paris",
        "never read",
    ]));

    conversation.run().await.unwrap();

    assert_eq!(
        conversation.console().transcript,
        vec![
            prompt("What is your name?"),
            say("Hi!"),
            prompt("Say something"),
            say("Where to?"),
            prompt("Say something"),
            say("Bye!"),
            say(FAREWELL),
        ]
    );

    let requests = harness.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|(s, _)| s.as_str() == "alice"));
    assert_eq!(requests[0].1, json!({"type": "launch"}));
    assert_eq!(
        requests[1].1,
        json!({
            "type": "intent",
            "payload": {"intent": {"name": "BookFlight"}, "entities": [], "confidence": 0.9}
        })
    );
    assert_eq!(
        requests[2].1,
        json!({
            "type": "intent",
            "payload": {
                "intent": {"name": "ProvideCity"},
                "entities": [{"name": "city", "value": "Paris"}],
                "confidence": 0.8
            }
        })
    );

    let queries = harness.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].text, "book a flight");
    assert!(queries
        .iter()
        .all(|q| q.session_id.as_str() == "alice" && q.language_code == "en"));
}

#[tokio::test]
async fn intent_action_matches_wire_shape() {
    let harness = Harness::new(
        vec![intent(
            "BookFlight",
            0.92,
            &[("city", ParameterValue::String("Paris".into()))],
        )],
        vec![Ok(vec![]), Ok(vec![Trace::End])],
    );
    let mut conversation = harness.conversation(ScriptedConsole::new(&["alice", "to Paris"]));

    conversation.run().await.unwrap();

    assert_eq!(
        harness.requests()[1].1.to_string(),
        r#"{"type":"intent","payload":{"intent":{"name":"BookFlight"},"entities":[{"name":"city","value":"Paris"}],"confidence":0.92}}"#
    );
}

#[tokio::test]
async fn bye_is_printed_once_and_no_prompt_follows() {
    let harness = Harness::new(
        vec![intent("Goodbye", 1.0, &[])],
        vec![
            Ok(vec![text("Hi!")]),
            Ok(vec![text("Bye!"), Trace::End]),
        ],
    );
    let mut conversation = harness.conversation(ScriptedConsole::new(&["alice", "bye", "extra"]));

    conversation.run().await.unwrap();

    let console = conversation.console();
    let byes = console
        .transcript
        .iter()
        .filter(|l| **l == say("Bye!"))
        .count();
    assert_eq!(byes, 1);
    assert_eq!(console.prompts(), 2);
    assert_eq!(console.transcript.last(), Some(&say(FAREWELL)));
    assert_eq!(console.inputs.len(), 1);
}

#[tokio::test]
async fn resolver_failure_aborts_without_farewell() {
    let harness = Harness::new(
        vec![Err(BridgeError::BackendUnavailable {
            status: Some(503),
            detail: "unavailable".into(),
        })],
        vec![Ok(vec![text("Hi!")])],
    );
    let mut conversation = harness.conversation(ScriptedConsole::new(&["alice", "hello"]));

    let err = conversation.run().await.unwrap_err();

    assert!(matches!(err, BridgeError::BackendUnavailable { .. }));
    assert_eq!(harness.requests().len(), 1);
    assert!(!conversation.console().transcript.contains(&say(FAREWELL)));
}

#[tokio::test]
async fn bridge_failure_aborts() {
    let harness = Harness::new(
        vec![],
        vec![Err(BridgeError::InteractionFailed {
            status: Some(401),
            detail: "invalid API key".into(),
        })],
    );
    let mut conversation = harness.conversation(ScriptedConsole::new(&["alice"]));

    let err = conversation.run().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(conversation.console().prompts(), 1);
    assert!(harness.queries().is_empty());
}

#[tokio::test]
async fn closed_input_aborts() {
    let harness = Harness::new(vec![], vec![Ok(vec![text("Hi!")])]);
    let mut conversation = harness.conversation(ScriptedConsole::new(&["alice"]));

    let err = conversation.run().await.unwrap_err();

    assert!(matches!(err, BridgeError::InputClosed));
}

#[tokio::test]
async fn empty_input_is_forwarded_unchanged() {
    let harness = Harness::new(
        vec![intent("", 0.0, &[])],
        vec![Ok(vec![]), Ok(vec![Trace::End])],
    );
    let mut conversation = harness.conversation(ScriptedConsole::new(&["alice", ""]));

    conversation.run().await.unwrap();

    assert_eq!(harness.queries()[0].text, "");
    assert_eq!(
        harness.requests()[1].1["payload"]["intent"]["name"],
        json!("")
    );
}

#[tokio::test]
async fn configured_texts_and_language_are_used() {
    let harness = Harness::new(
        vec![intent("Saludo", 0.7, &[])],
        vec![Ok(vec![]), Ok(vec![Trace::End])],
    );
    let texts = ConversationConfig {
        name_prompt: "¿Cómo te llamas?".into(),
        input_prompt: "Di algo".into(),
        farewell: String::new(),
    };
    let mut conversation = harness
        .conversation(ScriptedConsole::new(&["ana", "hola"]))
        .with_texts(texts)
        .with_language_code("es");

    conversation.run().await.unwrap();

    assert_eq!(
        conversation.console().transcript,
        vec![prompt("¿Cómo te llamas?"), prompt("Di algo")]
    );
    assert_eq!(harness.queries()[0].language_code, "es");
}
