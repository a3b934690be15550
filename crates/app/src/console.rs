//! Terminal display and input surfaces.

use std::fs;
use std::io::{self, BufRead, Write};

use services::{CompletedScreen, DisplaySurface, InputSurface, QuestionScreen, Screen, UserAction};

const RESULTS_BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Build the display and input for `format`.
///
/// Text prompts share `stdout` with the display. In JSON mode prompts go to
/// `stderr`, keeping `stdout` one JSON object per line.
pub fn console_surfaces<R, O, E>(
    format: OutputFormat,
    reader: R,
    stdout: impl Fn() -> O,
    stderr: E,
) -> (Box<dyn DisplaySurface>, ConsoleInput<R, Box<dyn Write>>)
where
    R: BufRead,
    O: Write + 'static,
    E: Write + 'static,
{
    let (display, prompts): (Box<dyn DisplaySurface>, Box<dyn Write>) = match format {
        OutputFormat::Text => (
            Box::new(TextDisplay::new(stdout())),
            Box::new(stdout()),
        ),
        OutputFormat::Json => (Box::new(JsonDisplay::new(stdout())), Box::new(stderr)),
    };
    (display, ConsoleInput::new(reader, prompts))
}

//
// ─── DISPLAY ───────────────────────────────────────────────────────────────────
//

/// Human-readable rendering.
pub struct TextDisplay<W> {
    out: W,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn question(&mut self, screen: &QuestionScreen) -> io::Result<()> {
        if let Some(feedback) = &screen.feedback {
            writeln!(self.out, "{feedback}")?;
            writeln!(self.out)?;
        }
        writeln!(self.out, "Question {} of {}", screen.position, screen.total)?;
        writeln!(self.out, "{}", screen.text)?;
        for (i, option) in screen.options.iter().enumerate() {
            writeln!(self.out, "  {}. {option}", i + 1)?;
        }
        Ok(())
    }

    fn completed(&mut self, screen: &CompletedScreen) -> io::Result<()> {
        if let Some(feedback) = &screen.feedback {
            writeln!(self.out, "{feedback}")?;
            writeln!(self.out)?;
        }
        writeln!(self.out, "Quiz Completed!")?;
        writeln!(
            self.out,
            "Your final score: {} out of {}",
            screen.score, screen.total
        )?;
        writeln!(self.out, "Percentage: {:.2}%", screen.percentage)?;
        if let Some(secs) = screen.elapsed_secs {
            writeln!(self.out, "Time taken: {}m {:02}s", secs / 60, secs % 60)?;
        }
        writeln!(
            self.out,
            "Results: [{}]  correct {} / incorrect {}",
            results_bar(screen.breakdown.correct, screen.total),
            screen.breakdown.correct,
            screen.breakdown.incorrect
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "Summary of your answers:")?;
        for (i, record) in screen.summary.iter().enumerate() {
            let status = if record.was_correct { "Correct" } else { "Incorrect" };
            writeln!(self.out, "  Q{}: {}", i + 1, record.question_text)?;
            writeln!(
                self.out,
                "      your answer: {} | correct answer: {} | {status}",
                record.user_answer, record.correct_answer
            )?;
        }
        Ok(())
    }
}

impl<W: Write> DisplaySurface for TextDisplay<W> {
    fn render(&mut self, screen: &Screen) -> io::Result<()> {
        match screen {
            Screen::Welcome => writeln!(self.out, "Quiz Runner")?,
            Screen::ValidationFailed { message } => writeln!(self.out, "error: {message}")?,
            Screen::Notice { message } => writeln!(self.out, "{message}")?,
            Screen::Question(question) => self.question(question)?,
            Screen::Completed(completed) => self.completed(completed)?,
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// `#` for the correct share, `-` for the rest.
fn results_bar(correct: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (correct * RESULTS_BAR_WIDTH + total / 2) / total
    };
    let filled = filled.min(RESULTS_BAR_WIDTH);
    format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(RESULTS_BAR_WIDTH - filled)
    )
}

/// One JSON object per screen, for driving the quiz from another program.
pub struct JsonDisplay<W> {
    out: W,
}

impl<W: Write> JsonDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for JsonDisplay<W> {
    fn render(&mut self, screen: &Screen) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, screen)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

/// Line-based input. Prompts are written to `prompt`.
pub struct ConsoleInput<R, W> {
    reader: R,
    prompt: W,
    pending_quiz: Option<String>,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, prompt: W) -> Self {
        Self {
            reader,
            prompt,
            pending_quiz: None,
        }
    }

    /// Offer `raw` as the first quiz instead of asking for a path.
    #[must_use]
    pub fn with_initial_quiz(mut self, raw: String) -> Self {
        self.pending_quiz = Some(raw);
        self
    }

    /// `None` on end of input. The line terminator is stripped.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.prompt, "{prompt}")?;
        self.prompt.flush()?;
        self.read_line()
    }

    fn ask_for_quiz(&mut self) -> io::Result<UserAction> {
        if let Some(raw) = self.pending_quiz.take() {
            return Ok(UserAction::Start(raw));
        }

        loop {
            let Some(line) = self.ask("Path to quiz JSON file (blank to quit): ")? else {
                return Ok(UserAction::Quit);
            };
            let path = line.trim();
            if path.is_empty() {
                return Ok(UserAction::Quit);
            }
            match fs::read_to_string(path) {
                Ok(raw) => return Ok(UserAction::Start(raw)),
                Err(err) => writeln!(self.prompt, "could not read {path}: {err}")?,
            }
        }
    }

    fn ask_for_answer(&mut self, screen: &QuestionScreen) -> io::Result<UserAction> {
        let count = screen.options.len();
        loop {
            let Some(line) = self.ask(&format!("Your answer [1-{count}]: "))? else {
                return Ok(UserAction::Quit);
            };
            if let Some(option) = pick_option(&screen.options, &line) {
                return Ok(UserAction::Submit(option));
            }
            writeln!(
                self.prompt,
                "Please enter a number between 1 and {count} or the exact option text."
            )?;
        }
    }

    fn ask_after_completion(&mut self) -> io::Result<UserAction> {
        loop {
            let Some(line) = self.ask("[r]estart, [i]ncorrect only, [n]ew quiz, [q]uit: ")? else {
                return Ok(UserAction::Quit);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "r" | "restart" => return Ok(UserAction::RestartFull),
                "i" | "incorrect" => return Ok(UserAction::RestartIncorrectOnly),
                "n" | "new" => return self.ask_for_quiz(),
                "q" | "quit" => return Ok(UserAction::Quit),
                _ => writeln!(self.prompt, "Please choose r, i, n or q.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> InputSurface for ConsoleInput<R, W> {
    fn next_action(&mut self, screen: &Screen) -> io::Result<UserAction> {
        match screen {
            Screen::Question(question) => self.ask_for_answer(question),
            Screen::Completed(_) => self.ask_after_completion(),
            Screen::Welcome | Screen::ValidationFailed { .. } | Screen::Notice { .. } => {
                self.ask_for_quiz()
            }
        }
    }
}

/// Resolve typed input to an option: a 1-based number first, then exact text.
fn pick_option(options: &[String], line: &str) -> Option<String> {
    let trimmed = line.trim();
    if let Ok(number) = trimmed.parse::<usize>() {
        if let Some(option) = number.checked_sub(1).and_then(|i| options.get(i)) {
            return Some(option.clone());
        }
    }
    options
        .iter()
        .find(|option| option.as_str() == line)
        .or_else(|| options.iter().find(|option| option.as_str() == trimmed))
        .cloned()
}
