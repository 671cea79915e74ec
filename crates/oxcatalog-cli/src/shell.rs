//! Line-oriented interactive front end over the screen controllers

use crate::render;
use oxcatalog_app::{
    LoginController, LoginForm, Notification, Outcome, ProductListController, Screen,
    SearchController, SessionGate,
};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const HELP: &str = "\
Commands:
  login <username> <password> <tenant>   sign in
  products [page]                        list products
  next | prev                            move between product pages
  search [query]                         search loaded products by the configured field
  logout                                 forget the stored session
  help                                   show this help
  quit                                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(LoginForm),
    Products(Option<u32>),
    Next,
    Prev,
    Search(Option<String>),
    Logout,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "login" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                match args.as_slice() {
                    [username, password, tenant] => {
                        Command::Login(LoginForm::new(*username, *password, *tenant))
                    }
                    _ => return Err("usage: login <username> <password> <tenant>".to_string()),
                }
            }
            "products" => match rest.trim() {
                "" => Command::Products(None),
                n => match n.parse::<u32>() {
                    Ok(page) if page >= 1 => Command::Products(Some(page)),
                    _ => return Err(format!("invalid page number '{}'", n)),
                },
            },
            "next" => Command::Next,
            "prev" | "previous" => Command::Prev,
            // The query is kept verbatim; ranking decides what blank means
            "search" if rest.is_empty() => Command::Search(None),
            "search" => Command::Search(Some(rest.to_string())),
            "logout" => Command::Logout,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };

        Ok(Some(command))
    }
}

pub struct Shell {
    gate: SessionGate,
    login: LoginController,
    products: ProductListController,
    search: SearchController,
    screen: Screen,
}

impl Shell {
    pub fn new(
        gate: SessionGate,
        login: LoginController,
        products: ProductListController,
        search: SearchController,
    ) -> Self {
        Self {
            gate,
            login,
            products,
            search,
            screen: Screen::Login,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        println!("{}", HELP);
        self.navigate(Screen::Products).await;

        let mut rl = DefaultEditor::new()?;
        loop {
            let prompt = format!("{}> ", self.screen);
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            };

            match Command::parse(&line) {
                Ok(Some(command)) => {
                    // Passwords typed with `login` stay out of the history
                    if !matches!(command, Command::Login(_)) {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    if !self.execute(command).await {
                        break;
                    }
                }
                Ok(None) => {}
                Err(message) => println!("{}", render::notification(&Notification::error(message))),
            }
        }

        Ok(())
    }

    /// Run one command; returns false when the shell should exit
    async fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Login(form) => {
                let outcome = self.login.submit(&form).await;
                if outcome.redirect.is_some() {
                    self.forget_catalog();
                }
                self.handle(outcome, Screen::Login).await;
            }
            Command::Products(None) => self.navigate(Screen::Products).await,
            Command::Products(Some(page)) => {
                let outcome = self.products.load_page(page).await;
                self.handle(outcome, Screen::Products).await;
            }
            Command::Next => {
                let outcome = self.products.next_page().await;
                self.handle(outcome, Screen::Products).await;
            }
            Command::Prev => {
                let outcome = self.products.previous_page().await;
                self.handle(outcome, Screen::Products).await;
            }
            Command::Search(None) => self.navigate(Screen::Search).await,
            Command::Search(Some(query)) => {
                let outcome = self.search.open().await;
                if let Some(target) = self.report(outcome) {
                    self.navigate(target).await;
                    return true;
                }
                if !self.search.is_loaded() {
                    return true;
                }
                self.screen = Screen::Search;
                let results = self.search.set_query(query);
                println!("{}", render::items(results));
            }
            Command::Logout => {
                let outcome = match self.gate.logout().await {
                    Ok(()) => {
                        self.forget_catalog();
                        Outcome::redirect(Screen::Login)
                            .with_notification(Notification::success("logged out"))
                    }
                    Err(e) => Outcome::notify(Notification::error(format!("logout failed: {}", e))),
                };
                self.handle(outcome, self.screen).await;
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return false,
        }
        true
    }

    /// Drop everything fetched under the previous session
    fn forget_catalog(&mut self) {
        self.products.reset();
        self.search.clear();
    }

    /// Report an outcome and follow its redirect, if any
    async fn handle(&mut self, outcome: Outcome, current: Screen) {
        match self.report(outcome) {
            Some(target) => self.navigate(target).await,
            None => {
                self.screen = current;
                self.show();
            }
        }
    }

    async fn navigate(&mut self, mut target: Screen) {
        loop {
            let outcome = match target {
                Screen::Login => {
                    self.screen = Screen::Login;
                    println!("Log in with: login <username> <password> <tenant>");
                    return;
                }
                Screen::Products => self.products.refresh().await,
                Screen::Search => self.search.open().await,
            };

            match self.report(outcome) {
                Some(next) if next != target => target = next,
                _ => {
                    self.screen = target;
                    self.show();
                    return;
                }
            }
        }
    }

    fn report(&self, outcome: Outcome) -> Option<Screen> {
        if let Some(notification) = &outcome.notification {
            println!("{}", render::notification(notification));
        }
        outcome.redirect
    }

    fn show(&self) {
        match self.screen {
            Screen::Login => {}
            Screen::Products => {
                if let Some(page) = self.products.current() {
                    println!("{}", render::page(page));
                }
            }
            Screen::Search => {
                println!("{}", render::items(self.search.results()));
                let missing = self.search.unindexed_count();
                if missing > 0 {
                    println!(
                        "{}",
                        render::notification(&Notification::info(format!(
                            "{} products beyond the search limit are not searchable",
                            missing
                        )))
                    );
                }
            }
        }
    }
}
