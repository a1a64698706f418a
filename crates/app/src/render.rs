//! Plain-text rendering of `SessionView` snapshots.

use std::fmt::Write;

use quiz_core::model::{Level, SUGGESTED_TOPICS};
use services::{QuestionView, QuizAction, SessionView};

pub const TITLE: &str = "AI Quiz Generator";

/// `A`, `B`, … for the first 26 options, then 1-based numbers.
pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

pub fn selection(view: &SessionView) -> String {
    let mut out = format!("{TITLE}\nTest your knowledge with AI-generated questions\n\n");

    out.push_str("Topics:\n");
    for (i, topic) in SUGGESTED_TOPICS.iter().enumerate() {
        let marker = if view.topic.as_deref() == Some(*topic) { '*' } else { ' ' };
        let _ = writeln!(out, " {marker}{:>2}. {topic}", i + 1);
    }

    out.push_str("Difficulty levels:\n");
    for (i, level) in Level::ALL.iter().enumerate() {
        let marker = if view.level == Some(*level) { '*' } else { ' ' };
        let _ = writeln!(out, " {marker}{:>2}. {level}", i + 1);
    }

    if let Some(topic) = &view.topic {
        let _ = writeln!(out, "Selected topic: {topic}");
    }
    if let Some(level) = view.level {
        let _ = writeln!(out, "Selected level: {level}");
    }
    out
}

pub fn loading(action: QuizAction) -> &'static str {
    match action {
        QuizAction::Generate => "Generating Quiz...",
        QuizAction::Submit => "Submitting...",
    }
}

pub fn quiz_header(view: &SessionView) -> String {
    let topic = view.topic.as_deref().unwrap_or_default();
    let level = view.level.map(|l| l.as_str()).unwrap_or_default();
    format!(
        "{topic} Quiz\nLevel: {level}\nAnswered {}/{}\n",
        view.progress.answered, view.progress.total
    )
}

pub fn question(question: &QuestionView) -> String {
    let mut out = format!("{}. {}\n", question.index + 1, question.text);
    for (i, option) in question.options.iter().enumerate() {
        let marker = if question.selected == Some(i) { '>' } else { ' ' };
        let _ = writeln!(out, "  {marker} {}. {option}", option_label(i));
    }
    out
}

/// Score, band message and per-question feedback, in the order the service sent it.
pub fn results(view: &SessionView) -> String {
    let Some(results) = &view.results else {
        return String::new();
    };

    let mut out = format!(
        "{}/10\nQuiz Complete!\n{}\n{} of {} correct\n\n",
        results.score,
        results.band().message(),
        results.correct_count(),
        results.total()
    );
    for detail in &results.details {
        let mark = if detail.correct { '✓' } else { '✗' };
        let _ = writeln!(out, "{mark} {}", detail.question);
        let _ = writeln!(out, "    Your answer: {}", detail.user_answer);
        if !detail.correct {
            if let Some(correct) = &detail.correct_answer {
                let _ = writeln!(out, "    Correct answer: {correct}");
            }
        }
    }
    out
}
