use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use quiz_core::Phase;
use services::{ControllerError, QuizAction, QuizController, SessionView};

use crate::{input, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-oriented prompt over any async reader and blocking writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn notice(&mut self, err: &ControllerError) -> io::Result<()> {
        self.say(&format!("! {}", err.notice()))
    }

    /// Read one trimmed line. `None` on end of input or a quit word.
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if input::is_quit(line) {
            return Ok(None);
        }
        Ok(Some(line.to_owned()))
    }

    /// Ask until `parse` accepts the answer.
    async fn choose<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        while let Some(line) = self.ask(prompt).await? {
            if let Some(value) = parse(&line) {
                return Ok(Some(value));
            }
            self.say("Invalid choice, try again (q to quit).")?;
        }
        Ok(None)
    }
}

/// Drive the controller from the terminal until the user quits or input ends.
pub async fn run<R, W>(controller: &QuizController, terminal: &mut Terminal<R, W>) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let view = controller.view();
        let flow = match view.phase {
            Phase::Selecting => select_and_generate(controller, terminal, &view).await?,
            Phase::InProgress => answer_and_submit(controller, terminal, &view).await?,
            Phase::Completed => show_results(controller, terminal, &view).await?,
        };
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

async fn select_and_generate<R, W>(
    controller: &QuizController,
    terminal: &mut Terminal<R, W>,
    view: &SessionView,
) -> io::Result<Flow>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    terminal.say(&render::selection(view))?;

    if view.topic.is_none() {
        let Some(topic) = terminal
            .choose("Topic (number or name): ", input::parse_topic)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        if let Err(err) = controller.select_topic(&topic) {
            terminal.notice(&err)?;
            return Ok(Flow::Continue);
        }
    }
    if view.level.is_none() {
        let Some(level) = terminal
            .choose("Difficulty level (number or name): ", input::parse_level)
            .await?
        else {
            return Ok(Flow::Quit);
        };
        if let Err(err) = controller.select_level(level) {
            terminal.notice(&err)?;
            return Ok(Flow::Continue);
        }
    }

    terminal.say(render::loading(QuizAction::Generate))?;
    match controller.generate().await {
        Ok(()) => Ok(Flow::Continue),
        Err(err) => {
            terminal.notice(&err)?;
            let Some(reply) = terminal
                .ask("Press Enter to retry, c to change the selection, q to quit: ")
                .await?
            else {
                return Ok(Flow::Quit);
            };
            if reply.eq_ignore_ascii_case("c") {
                reset(controller, terminal)?;
            }
            Ok(Flow::Continue)
        }
    }
}

async fn answer_and_submit<R, W>(
    controller: &QuizController,
    terminal: &mut Terminal<R, W>,
    view: &SessionView,
) -> io::Result<Flow>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    terminal.say(&render::quiz_header(view))?;

    for question in view.questions.iter().filter(|q| q.selected.is_none()) {
        terminal.say(&render::question(question))?;
        let count = question.options.len();
        let prompt = format!(
            "Answer {} (A-{}): ",
            question.index + 1,
            render::option_label(count.saturating_sub(1))
        );
        let Some(option) = terminal
            .choose(&prompt, |raw| input::parse_option(raw, count))
            .await?
        else {
            return Ok(Flow::Quit);
        };
        if let Err(err) = controller.select_answer(question.index, option) {
            terminal.notice(&err)?;
        }
    }

    terminal.say(render::loading(QuizAction::Submit))?;
    match controller.submit().await {
        Ok(()) => Ok(Flow::Continue),
        Err(err) if err.is_validation() => {
            terminal.notice(&err)?;
            Ok(Flow::Continue)
        }
        Err(err) => {
            terminal.notice(&err)?;
            match terminal.ask("Press Enter to retry, q to quit: ").await? {
                Some(_) => Ok(Flow::Continue),
                None => Ok(Flow::Quit),
            }
        }
    }
}

async fn show_results<R, W>(
    controller: &QuizController,
    terminal: &mut Terminal<R, W>,
    view: &SessionView,
) -> io::Result<Flow>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    terminal.say(&render::results(view))?;
    match terminal.ask("Take another quiz? [y/N]: ").await? {
        Some(reply) if input::is_yes(&reply) => {
            reset(controller, terminal)?;
            Ok(Flow::Continue)
        }
        _ => Ok(Flow::Quit),
    }
}

fn reset<R, W>(controller: &QuizController, terminal: &mut Terminal<R, W>) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(err) = controller.reset() {
        terminal.notice(&err)?;
    }
    Ok(())
}
