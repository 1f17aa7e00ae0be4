use tracing::debug;
use uniapi_core::{ApiClient, Config};

use crate::{
    console::{Accent, Console, ConsoleError},
    handler::{self, CONTINUE_PROMPT},
};

pub const MENU_TITLE: &str = "Universal API Tool";
pub const MENU_PROMPT: &str = "Select an option (1-3) or 'q' to quit:";
pub const INVALID_CHOICE: &str = "Invalid choice, please try again.";
pub const FAREWELL: &str = "Goodbye! 👋";

/// One line of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub token: &'static str,
    pub label: &'static str,
    pub accent: Accent,
}

pub const MENU_ITEMS: [MenuItem; 3] = [
    MenuItem { token: "1", label: "💱 Exchange Rate (FastForex)", accent: Accent::Cyan },
    MenuItem { token: "2", label: "🎬 Movie Info (OMDb)", accent: Accent::Magenta },
    MenuItem { token: "3", label: "☁️  Weather (WeatherAPI)", accent: Accent::Blue },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ExchangeRate,
    Movie,
    Weather,
    Quit,
}

impl MenuChoice {
    /// Trims and lower-cases before matching, so `" Q "` quits.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" => Some(MenuChoice::ExchangeRate),
            "2" => Some(MenuChoice::Movie),
            "3" => Some(MenuChoice::Weather),
            "q" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// The main read-eval loop: show the menu, read a choice, run its handler.
pub struct Dispatcher<C: Console> {
    console: C,
    client: ApiClient,
    config: Config,
    state: MenuState,
}

impl<C: Console> Dispatcher<C> {
    pub fn new(console: C, client: ApiClient, config: Config) -> Self {
        Self { console, client, config, state: MenuState::Running }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Loops until the user quits.
    ///
    /// Interrupts and end of input come back as errors; the caller decides how to exit.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        while self.state == MenuState::Running {
            self.console.clear();
            self.console.show_menu(MENU_TITLE, &MENU_ITEMS);

            let line = match self.console.prompt(MENU_PROMPT).await {
                Ok(line) => line,
                Err(ConsoleError::Cancelled) => continue,
                Err(err) => return Err(err),
            };

            self.step(&line).await?;
        }

        Ok(())
    }

    /// Handles one line of menu input and returns the resulting state.
    pub async fn step(&mut self, input: &str) -> Result<MenuState, ConsoleError> {
        if self.state == MenuState::Terminated {
            return Ok(self.state);
        }

        let Some(choice) = MenuChoice::parse(input) else {
            debug!(input = input.trim(), "invalid menu choice");
            self.console.show_error(INVALID_CHOICE);
            self.console.pause(CONTINUE_PROMPT).await?;
            return Ok(self.state);
        };

        debug!(?choice, "menu choice");

        let result = match choice {
            MenuChoice::Quit => {
                self.console.show_info(FAREWELL);
                self.state = MenuState::Terminated;
                return Ok(self.state);
            }
            MenuChoice::ExchangeRate => {
                handler::exchange_rate(&mut self.console, &self.client, &self.config).await
            }
            MenuChoice::Movie => {
                handler::movie(&mut self.console, &self.client, &self.config).await
            }
            MenuChoice::Weather => {
                handler::weather(&mut self.console, &self.client, &self.config).await
            }
        };

        match result {
            // Esc inside a handler only abandons that handler.
            Ok(()) | Err(ConsoleError::Cancelled) => Ok(self.state),
            Err(err) => Err(err),
        }
    }
}
