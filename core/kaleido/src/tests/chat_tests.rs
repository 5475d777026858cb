use super::fakes::{
    AbortingModel, Event, Journal, RecordingDiagramSink, RecordingLog, RecordingTextSink,
    ScriptedModel,
};
use crate::domain::{Interest, LearningStyle, PersonaConfig, Role, SessionState};
use crate::usecase::chat::{ChatUseCase, ModelAvailability, SubmitOutcome};
use common::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

struct Harness {
    journal: Journal,
    log: Arc<RecordingLog>,
    chat: ChatUseCase,
    state: SessionState,
    text: RecordingTextSink,
    diagram: RecordingDiagramSink,
}

impl Harness {
    fn with_replies(replies: Vec<Result<String, Error>>) -> Self {
        let journal = Journal::new();
        let model = ScriptedModel::new(journal.clone(), replies);
        Self::build(journal.clone(), ModelAvailability::Ready(Arc::new(model)))
    }

    fn unavailable() -> Self {
        Self::build(
            Journal::new(),
            ModelAvailability::Unavailable(Error::env(
                "API Key missing! Set GOOGLE_API_KEY or create a .env file with your key.",
            )),
        )
    }

    fn build(journal: Journal, model: ModelAvailability) -> Self {
        let log = Arc::new(RecordingLog::default());
        Self {
            chat: ChatUseCase::new(model, log.clone()),
            log,
            state: SessionState::default(),
            text: RecordingTextSink(journal.clone()),
            diagram: RecordingDiagramSink::new(journal.clone()),
            journal,
        }
    }

    fn submit(&mut self, message: &str) -> SubmitOutcome {
        self.chat
            .submit(&mut self.state, message, &mut self.text, &mut self.diagram)
            .unwrap()
    }

    fn roles(&self) -> Vec<Role> {
        self.state.history.turns().iter().map(|t| t.role()).collect()
    }
}

#[test]
fn test_submit_success_appends_user_then_assistant() {
    let mut h = Harness::with_replies(vec![Ok("Gravity is like a six hit into the sky.".to_string())]);
    let outcome = h.submit("Explain Gravity");
    assert_eq!(outcome, SubmitOutcome::Answered);
    assert_eq!(h.roles(), vec![Role::User, Role::Assistant]);
    assert_eq!(h.state.history.turns()[0].content(), "Explain Gravity");
    assert_eq!(
        h.state.history.turns()[1].content(),
        "Gravity is like a six hit into the sky."
    );

    let events = h.journal.events();
    let prompt = h.journal.model_calls().remove(0);
    assert_eq!(
        events,
        vec![
            Event::Turn(Role::User),
            Event::Text("Explain Gravity".to_string()),
            Event::Status("Thinking...".to_string()),
            Event::ModelCalled(prompt),
            Event::Turn(Role::Assistant),
            Event::Text("Gravity is like a six hit into the sky.".to_string()),
        ]
    );
}

#[test]
fn test_user_turn_is_stored_before_model_call() {
    let mut h = Harness::build(Journal::new(), ModelAvailability::Ready(Arc::new(AbortingModel)));
    let aborted = panic::catch_unwind(AssertUnwindSafe(|| h.submit("Explain Gravity")));
    assert!(aborted.is_err());
    // モデル呼び出しが戻る前に user ターンは履歴に入っている
    assert_eq!(h.roles(), vec![Role::User]);
    assert_eq!(h.state.history.turns()[0].content(), "Explain Gravity");
}

#[test]
fn test_submit_failure_keeps_user_turn_only() {
    let mut h = Harness::with_replies(vec![Err(Error::http("429 quota exceeded"))]);
    let outcome = h.submit("What is Inflation?");
    assert_eq!(outcome, SubmitOutcome::Failed(Error::http("429 quota exceeded")));
    assert_eq!(h.roles(), vec![Role::User]);
    assert_eq!(h.journal.model_calls().len(), 1);
    assert_eq!(h.journal.errors(), vec!["Error: 429 quota exceeded".to_string()]);
    assert!(h.log.messages().contains(&"generation failed".to_string()));

    // 次の送信は通常どおり動く（残った user ターンはそのまま）
    let outcome = h.submit("What is Inflation?");
    assert_eq!(outcome, SubmitOutcome::Failed(Error::http("no scripted reply left")));
    assert_eq!(h.roles(), vec![Role::User, Role::User]);
    assert_eq!(h.state.history.unanswered_count(), 2);
}

#[test]
fn test_blank_message_is_ignored() {
    let mut h = Harness::with_replies(vec![Ok("unused".to_string())]);
    assert_eq!(h.submit(""), SubmitOutcome::Ignored);
    assert_eq!(h.submit("   \t"), SubmitOutcome::Ignored);
    assert!(h.state.history.is_empty());
    assert!(h.journal.events().is_empty());
}

#[test]
fn test_missing_credential_never_calls_model() {
    let mut h = Harness::unavailable();
    let outcome = h.submit("How does the Internet work?");
    assert!(matches!(outcome, SubmitOutcome::Failed(Error::Env(_))));
    assert_eq!(h.roles(), vec![Role::User]);
    assert!(h.journal.model_calls().is_empty());
    assert_eq!(h.journal.errors().len(), 1);
    assert!(h.journal.errors()[0].contains("API Key missing"));
    assert!(h.chat.config_error().is_some());
}

#[test]
fn test_render_failure_keeps_assistant_turn() {
    let journal = Journal::new();
    let model = ScriptedModel::new(
        journal.clone(),
        vec![Ok("Look:```dot\ndigraph { broken```Done".to_string())],
    );
    let mut h = Harness::build(journal.clone(), ModelAvailability::Ready(Arc::new(model)));
    h.diagram = RecordingDiagramSink::failing_on(journal, "broken");

    let outcome = h.submit("Explain Gravity");
    assert!(matches!(outcome, SubmitOutcome::AnsweredWithRenderError(Error::Render(_))));
    assert_eq!(h.roles(), vec![Role::User, Role::Assistant]);
    assert_eq!(h.journal.errors().len(), 1);
    assert!(h.journal.errors()[0].starts_with("Diagram error:"));
    assert!(h.log.messages().contains(&"diagram failed".to_string()));
}

#[test]
fn test_visual_style_prompt_and_diagram() {
    let mut h = Harness::with_replies(vec![Ok(
        "Think of a cricket match.\n```dot\ndigraph { Bowler -> Batsman }\n```\nThat's it!".to_string(),
    )]);
    h.state.persona.style = LearningStyle::VisualFlowcharts;
    assert_eq!(h.submit("Explain Gravity"), SubmitOutcome::Answered);

    let prompt = &h.journal.model_calls()[0];
    assert!(prompt.contains("Graphviz DOT"));
    assert_eq!(
        h.journal.diagrams(),
        vec!["digraph { Bowler -> Batsman }\n".to_string()]
    );
    assert!(h.log.messages().contains(&"diagram rendered".to_string()));
}

#[test]
fn test_persona_change_affects_next_prompt_only() {
    let mut h = Harness::with_replies(vec![Ok("first".to_string()), Ok("second".to_string())]);
    h.submit("Explain Gravity");
    let before = h.state.history.clone();

    h.state.persona = PersonaConfig {
        interest: Interest::Farming,
        ..h.state.persona
    };
    h.submit("Explain Gravity");

    let calls = h.journal.model_calls();
    assert!(calls[0].contains("User loves Bollywood 🎬"));
    assert!(calls[1].contains("User loves Farming 🚜"));
    assert_eq!(&h.state.history.turns()[..2], before.turns());
}

#[test]
fn test_replay_continues_after_failing_diagram() {
    let journal = Journal::new();
    let mut h = Harness::build(journal.clone(), ModelAvailability::Unavailable(Error::env("x")));
    h.state.history.push_user("q1");
    h.state.history.push_assistant("a```dot\nbroken```b");
    h.state.history.push_user("q2");
    h.state.history.push_assistant("c```dot\ndigraph{ok}```d");
    h.diagram = RecordingDiagramSink::failing_on(journal.clone(), "broken");

    let failures = h
        .chat
        .replay(&h.state, &mut h.text, &mut h.diagram)
        .unwrap();
    assert_eq!(failures, 1);
    assert_eq!(
        journal.diagrams(),
        vec!["broken".to_string(), "digraph{ok}".to_string()]
    );
    assert!(journal.events().contains(&Event::Text("d".to_string())));
    assert_eq!(journal.errors().len(), 1);
    assert_eq!(h.state.history.len(), 4);
}

#[test]
fn test_replay_of_empty_history() {
    let mut h = Harness::unavailable();
    let failures = h.chat.replay(&h.state, &mut h.text, &mut h.diagram).unwrap();
    assert_eq!(failures, 0);
    assert_eq!(h.journal.infos(), vec!["No conversation yet.".to_string()]);
}

#[test]
fn test_reset_empties_history_and_is_idempotent() {
    for n in [0usize, 1, 7] {
        let mut h = Harness::unavailable();
        for i in 0..n {
            if i % 2 == 0 {
                h.state.history.push_user(format!("q{}", i));
            } else {
                h.state.history.push_assistant(format!("a{}", i));
            }
        }
        h.chat.reset(&mut h.state);
        assert!(h.state.history.is_empty());
        h.chat.reset(&mut h.state);
        assert!(h.state.history.is_empty());
    }
}

#[test]
fn test_welcome_only_when_history_empty() {
    let mut h = Harness::unavailable();
    h.chat.welcome(&h.state, &mut h.text).unwrap();
    let infos = h.journal.infos();
    assert_eq!(
        infos[0],
        "👋 Welcome! I am ready to teach you in Hinglish (Hindi+English) using Bollywood 🎬 analogies."
    );
    assert!(infos.iter().any(|l| l.contains("How does the Internet work?")));
    assert!(infos.iter().any(|l| l.contains("Analogy Engine")));

    h.journal.clear();
    h.state.history.push_user("q");
    h.chat.welcome(&h.state, &mut h.text).unwrap();
    assert!(h.journal.events().is_empty());
}

#[test]
fn test_banner_shows_config_error() {
    let mut h = Harness::unavailable();
    h.chat.banner(&mut h.text).unwrap();
    assert_eq!(h.journal.infos()[0], "Kaleido 🌈");
    assert!(h.journal.errors()[0].contains("API Key missing"));

    let mut ready = Harness::with_replies(vec![]);
    ready.chat.banner(&mut ready.text).unwrap();
    assert!(ready.journal.errors().is_empty());
}

#[test]
fn test_preview_prompt_matches_sent_prompt() {
    let mut h = Harness::with_replies(vec![Ok("ok".to_string())]);
    let preview = h.chat.preview_prompt(&h.state, "Explain Gravity");
    h.submit("Explain Gravity");
    assert_eq!(h.journal.model_calls(), vec![preview]);
}

#[test]
fn test_generation_logs_persona_fields() {
    let mut h = Harness::with_replies(vec![Ok("ok".to_string())]);
    h.submit("Explain Gravity");
    let records = h.log.0.lock().unwrap();
    let started = records
        .iter()
        .find(|r| r.message == "generation started")
        .unwrap();
    let fields = started.fields.as_ref().unwrap();
    assert_eq!(fields["interest"], "bollywood");
    assert_eq!(fields["provider"], "scripted");
    assert!(records.iter().any(|r| r.message == "generation succeeded"));
}
