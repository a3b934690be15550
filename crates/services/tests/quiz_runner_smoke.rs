use std::collections::VecDeque;
use std::io;

use quiz_core::time::fixed_clock;
use services::{
    DisplaySurface, InputSurface, QuizRunner, QuizSession, RestartOutcome, RunnerError, Screen,
    SessionError, SessionStatus, UserAction,
};

const QUIZ: &str = r#"[
    {"question":"What is the capital of France?","options":["Paris","London","Berlin","Madrid"],"correct_answer":"Paris","explanation":"Paris is the capital city of France."},
    {"question":"2+2?","options":["3","4","5"],"correct_answer":"4","explanation":"Basic math."},
    {"question":"Largest planet?","options":["Mars","Jupiter"],"correct_answer":"Jupiter","explanation":"Jupiter is the largest."}
]"#;

#[derive(Default)]
struct RecordingDisplay {
    screens: Vec<Screen>,
}

impl DisplaySurface for RecordingDisplay {
    fn render(&mut self, screen: &Screen) -> io::Result<()> {
        self.screens.push(screen.clone());
        Ok(())
    }
}

struct ScriptedInput {
    actions: VecDeque<UserAction>,
}

impl ScriptedInput {
    fn new(actions: impl IntoIterator<Item = UserAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }
}

impl InputSurface for ScriptedInput {
    fn next_action(&mut self, _screen: &Screen) -> io::Result<UserAction> {
        Ok(self.actions.pop_front().unwrap_or(UserAction::Quit))
    }
}

fn submit(answer: &str) -> UserAction {
    UserAction::Submit(answer.to_string())
}

#[test]
fn full_quiz_with_retry_rounds() {
    let runner = QuizRunner::new(QuizSession::with_clock(fixed_clock()));
    let mut display = RecordingDisplay::default();
    let mut input = ScriptedInput::new([
        UserAction::Start("not json".into()),
        UserAction::Start(QUIZ.into()),
        submit("Paris"),
        submit("5"),
        submit("Mars"),
        UserAction::RestartIncorrectOnly,
        submit("4"),
        submit("Jupiter"),
        UserAction::RestartIncorrectOnly,
        UserAction::RestartFull,
    ]);

    let session = runner.run(&mut display, &mut input).unwrap();

    let screens = &display.screens;
    assert_eq!(screens[0], Screen::Welcome);
    assert!(matches!(&screens[1], Screen::ValidationFailed { message } if message.starts_with("Invalid JSON format")));
    assert_eq!(screens[2], Screen::Welcome);

    let completed: Vec<_> = screens
        .iter()
        .filter_map(|screen| match screen {
            Screen::Completed(done) => Some(done),
            _ => None,
        })
        .collect();
    assert_eq!(completed[0].score, 1);
    assert_eq!(completed[0].total, 3);
    assert_eq!(completed[0].breakdown.incorrect, 2);
    assert_eq!(completed[1].score, 2);
    assert_eq!(completed[1].total, 2);
    assert!((completed[1].percentage - 100.0).abs() < f64::EPSILON);

    assert!(screens.contains(&Screen::Notice {
        message: RestartOutcome::NOTHING_TO_RETRY_NOTICE.to_string()
    }));

    let Some(Screen::Question(last)) = screens.last() else {
        panic!("expected to end on a question after the full restart");
    };
    assert_eq!(last.position, 1);
    assert_eq!(last.total, 3);
    assert!(last.feedback.is_none());

    assert_eq!(session.status(), SessionStatus::InProgress);
    assert_eq!(session.round(), 3);
    assert_eq!(session.active_questions(), session.original_questions());
}

#[test]
fn out_of_turn_action_is_fatal() {
    let runner = QuizRunner::default();
    let mut display = RecordingDisplay::default();
    let mut input = ScriptedInput::new([UserAction::RestartFull]);

    let err = runner.run(&mut display, &mut input).unwrap_err();
    assert!(matches!(
        err,
        RunnerError::Session(SessionError::GuardViolation {
            status: SessionStatus::NotStarted,
            ..
        })
    ));
}

#[test]
fn quitting_immediately_leaves_session_untouched() {
    let runner = QuizRunner::default();
    let mut display = RecordingDisplay::default();
    let mut input = ScriptedInput::new(Vec::new());

    let session = runner.run(&mut display, &mut input).unwrap();
    assert_eq!(display.screens, [Screen::Welcome]);
    assert_eq!(session.status(), SessionStatus::NotStarted);
    assert_eq!(session.round(), 0);
}
