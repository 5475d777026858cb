use super::fakes::{
    Event, Journal, RecordingDiagramSink, RecordingLog, RecordingTextSink, ScriptedLineReader,
    ScriptedModel,
};
use crate::adapter::StdinLineReader;
use crate::domain::{Interest, Language, LearningStyle, Role, SessionState};
use crate::usecase::chat::{ChatUseCase, ModelAvailability};
use crate::usecase::repl::Repl;
use common::error::Error;
use std::sync::Arc;

fn run_script(
    lines: &[&str],
    replies: Vec<Result<String, Error>>,
) -> (SessionState, Journal, ScriptedLineReader, usize) {
    let journal = Journal::new();
    let log = Arc::new(RecordingLog::default());
    let chat = ChatUseCase::new(
        ModelAvailability::Ready(Arc::new(ScriptedModel::new(journal.clone(), replies))),
        log.clone(),
    );
    let mut state = SessionState::default();
    let mut reader = ScriptedLineReader::new(lines);
    let handled = Repl::new(&chat, log)
        .run(
            &mut state,
            &mut reader,
            &mut RecordingTextSink(journal.clone()),
            &mut RecordingDiagramSink::new(journal.clone()),
        )
        .unwrap();
    (state, journal, reader, handled)
}

#[test]
fn test_startup_shows_banner_and_welcome() {
    let (state, journal, reader, handled) = run_script(&[], vec![]);
    assert!(state.history.is_empty());
    assert_eq!(handled, 0);
    assert_eq!(reader.reads, 1);
    let infos = journal.infos();
    assert_eq!(infos[0], "Kaleido 🌈");
    assert_eq!(infos[1], "The AI Tutor that adapts to YOU.");
    assert!(infos[2].starts_with("👋 Welcome!"));
}

#[test]
fn test_question_then_quit_stops_reading() {
    let (state, journal, reader, handled) = run_script(
        &["Explain Gravity", "", "/quit", "never read"],
        vec![Ok("Like a ball falling back to the pitch.".to_string())],
    );
    assert_eq!(handled, 1);
    assert_eq!(reader.reads, 3);
    assert_eq!(state.history.len(), 2);
    assert_eq!(journal.model_calls().len(), 1);
}

#[test]
fn test_persona_commands_update_next_prompt() {
    let (state, journal, _reader, _handled) = run_script(
        &[
            "/interest video-games",
            "/language marathi-mix",
            "/style visual-flowcharts",
            "Explain Gravity",
        ],
        vec![Ok("ok".to_string())],
    );
    assert_eq!(state.persona.interest, Interest::VideoGames);
    assert_eq!(state.persona.language, Language::MarathiMix);
    assert_eq!(state.persona.style, LearningStyle::VisualFlowcharts);
    let prompt = &journal.model_calls()[0];
    assert!(prompt.contains("User loves Video Games 🎮, speaks Marathi Mix"));
    assert!(prompt.contains("Graphviz DOT"));
    assert!(journal
        .infos()
        .contains(&"✅ style set to Visual Flowcharts".to_string()));
}

#[test]
fn test_invalid_slug_and_unknown_command_are_inline_errors() {
    let (state, journal, _reader, handled) = run_script(&["/interest chess", "/dance"], vec![]);
    assert_eq!(handled, 2);
    assert_eq!(state.persona.interest, Interest::Bollywood);
    let errors = journal.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("Unknown interest 'chess'"));
    assert!(errors[0].contains("video-games"));
    assert_eq!(errors[1], "Unknown command: /dance (try /help)");
}

#[test]
fn test_reset_clears_and_shows_welcome_again() {
    let (state, journal, _reader, _handled) = run_script(
        &["Explain Gravity", "/fresh"],
        vec![Ok("answer".to_string())],
    );
    assert!(state.history.is_empty());
    let welcomes = journal
        .infos()
        .iter()
        .filter(|l| l.starts_with("👋 Welcome!"))
        .count();
    assert_eq!(welcomes, 2);
}

#[test]
fn test_history_replays_turns() {
    let (_state, journal, _reader, _handled) = run_script(
        &["Explain Gravity", "/history"],
        vec![Ok("answer".to_string())],
    );
    let turns: Vec<Event> = journal
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Turn(_)))
        .collect();
    assert_eq!(
        turns,
        vec![
            Event::Turn(Role::User),
            Event::Turn(Role::Assistant),
            Event::Turn(Role::User),
            Event::Turn(Role::Assistant),
        ]
    );
    assert_eq!(journal.model_calls().len(), 1);
}

#[test]
fn test_settings_and_help() {
    let (_state, journal, _reader, _handled) = run_script(&["/settings", "/help"], vec![]);
    let infos = journal.infos();
    assert!(infos.iter().any(|l| l.contains("Interest: Bollywood 🎬 (bollywood)")));
    assert!(infos.iter().any(|l| l.contains("Provider: scripted")));
    assert!(infos.iter().any(|l| l.starts_with("  /reset, /fresh")));
}

#[test]
fn test_invalid_utf8_input_keeps_session_running() {
    let journal = Journal::new();
    let log = Arc::new(RecordingLog::default());
    let chat = ChatUseCase::new(
        ModelAvailability::Ready(Arc::new(ScriptedModel::new(
            journal.clone(),
            vec![
                Ok("first".to_string()),
                Ok("second".to_string()),
                Ok("third".to_string()),
            ],
        ))),
        log.clone(),
    );
    let mut state = SessionState::default();
    let input: &[u8] = b"Explain Gravity\ncaf\xe9 question\nWhat is Inflation?\n";
    let mut reader = StdinLineReader::new(input, Vec::new());
    let handled = Repl::new(&chat, log)
        .run(
            &mut state,
            &mut reader,
            &mut RecordingTextSink(journal.clone()),
            &mut RecordingDiagramSink::new(journal.clone()),
        )
        .unwrap();

    assert_eq!(handled, 3);
    assert_eq!(state.history.len(), 6);
    let asked: Vec<&str> = state
        .history
        .turns()
        .iter()
        .filter(|t| t.role() == Role::User)
        .map(|t| t.content())
        .collect();
    assert_eq!(
        asked,
        vec!["Explain Gravity", "caf\u{FFFD} question", "What is Inflation?"]
    );
    assert_eq!(journal.model_calls().len(), 3);
}
