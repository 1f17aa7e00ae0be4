use async_trait::async_trait;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::InquireError;
use std::{
    io::{self, BufRead, BufReader, IsTerminal, Write},
    thread,
    time::Duration,
};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::menu::MenuItem;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Ctrl-C at a prompt, or SIGINT while waiting on input or the network.
    #[error("interrupted")]
    Interrupted,

    /// Esc at a prompt: abandon the current action, keep the program running.
    #[error("cancelled")]
    Cancelled,

    #[error("end of input")]
    EndOfInput,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl From<InquireError> for ConsoleError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationInterrupted => ConsoleError::Interrupted,
            InquireError::OperationCanceled => ConsoleError::Cancelled,
            InquireError::IO(e) => ConsoleError::Io(e),
            other => ConsoleError::Io(io::Error::other(other.to_string())),
        }
    }
}

/// Per-provider colour used for tables and menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Cyan,
    Magenta,
    Blue,
}

impl Accent {
    fn color(self) -> Color {
        match self {
            Accent::Cyan => Color::Cyan,
            Accent::Magenta => Color::Magenta,
            Accent::Blue => Color::Blue,
        }
    }
}

/// Everything the menu loop and handlers need from the terminal: line input plus presentation.
#[async_trait(?Send)]
pub trait Console {
    fn clear(&mut self);

    fn show_menu(&mut self, title: &str, items: &[MenuItem]);

    /// Waits for one line of input.
    async fn prompt(&mut self, message: &str) -> Result<String, ConsoleError>;

    fn show_table(&mut self, title: &str, rows: &[(String, String)], accent: Accent);

    fn show_info(&mut self, message: &str);

    fn show_error(&mut self, message: &str);

    /// Wait for the user to press Enter. Consumes one line of input.
    async fn pause(&mut self, message: &str) -> Result<(), ConsoleError>;

    /// Show a "working" indicator until `end_work`.
    fn begin_work(&mut self, message: &str);

    fn end_work(&mut self);
}

/// Lines from a blocking reader, read on a dedicated thread.
///
/// Awaiting the next line yields to the runtime, so a Ctrl-C can be observed while
/// input is piped in. The thread is detached and never holds up process exit.
pub struct LineFeed {
    rx: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl LineFeed {
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        thread::Builder::new().name("uniapi-stdin".to_string()).spawn(move || {
            for line in reader.lines() {
                let line = line.map(|l| l.trim_end_matches('\r').to_string());
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;

        Ok(Self { rx })
    }

    pub async fn next_line(&mut self) -> Result<String, ConsoleError> {
        match self.rx.recv().await {
            Some(line) => Ok(line?),
            None => Err(ConsoleError::EndOfInput),
        }
    }
}

/// Real terminal: inquire prompts when attached to a TTY, a [`LineFeed`] over stdin otherwise.
pub struct TerminalConsole {
    input: Option<LineFeed>,
    spinner: Option<ProgressBar>,
}

impl TerminalConsole {
    pub fn new() -> io::Result<Self> {
        let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
        let input =
            if interactive { None } else { Some(LineFeed::spawn(BufReader::new(io::stdin()))?) };

        Ok(Self { input, spinner: None })
    }

    fn is_interactive(&self) -> bool {
        self.input.is_none()
    }
}

#[async_trait(?Send)]
impl Console for TerminalConsole {
    fn clear(&mut self) {
        if self.is_interactive() {
            print!("\x1B[2J\x1B[1;1H");
            let _ = io::stdout().flush();
        }
    }

    fn show_menu(&mut self, title: &str, items: &[MenuItem]) {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_BORDERS_ONLY)
            .set_header(vec![Cell::new(title).fg(Color::Green).add_attribute(Attribute::Bold)]);

        for item in items {
            table.add_row(vec![
                Cell::new(format!("{}. {}", item.token, item.label))
                    .fg(item.accent.color())
                    .add_attribute(Attribute::Bold),
            ]);
        }

        println!("{table}");
    }

    async fn prompt(&mut self, message: &str) -> Result<String, ConsoleError> {
        self.end_work();
        match self.input.as_mut() {
            None => Ok(inquire::Text::new(message).prompt()?),
            Some(feed) => {
                let mut stdout = io::stdout();
                write!(stdout, "{message} ")?;
                stdout.flush()?;
                feed.next_line().await
            }
        }
    }

    fn show_table(&mut self, title: &str, rows: &[(String, String)], accent: Accent) {
        self.end_work();

        let color = accent.color();
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Attribute").fg(color).add_attribute(Attribute::Bold),
                Cell::new("Value").fg(color).add_attribute(Attribute::Bold),
            ]);

        for (label, value) in rows {
            table.add_row(vec![
                Cell::new(label).add_attribute(Attribute::Dim),
                Cell::new(value).add_attribute(Attribute::Bold),
            ]);
        }

        println!("{title}");
        println!("{table}");
    }

    fn show_info(&mut self, message: &str) {
        self.end_work();
        println!("{message}");
    }

    fn show_error(&mut self, message: &str) {
        self.end_work();
        println!("{message}");
    }

    async fn pause(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.prompt(message).await.map(|_| ())
    }

    fn begin_work(&mut self, message: &str) {
        self.end_work();
        if !io::stderr().is_terminal() {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(pb);
    }

    fn end_work(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        self.end_work();
    }
}
