use async_trait::async_trait;
use structopt::StructOpt;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;
use user_roster::{
    auth::Credentials,
    controller::{Confirm, Controller, Deletion, Entry},
    routes::{self, Resolution, Route},
    session::Session,
    users::UserId,
    view, Client,
};

/// Browse, edit and delete users of a remote user service.
#[derive(Debug, StructOpt)]
struct Opt {
    /// Base URL of the user service [env: ROSTER_URL]
    #[structopt(long)]
    url: Option<String>,
    /// API key sent as x-api-key [env: ROSTER_API_KEY]
    #[structopt(long)]
    api_key: Option<String>,
    /// Users per page
    #[structopt(long)]
    per_page: Option<u32>,
    /// Email to log in with; prompted for if missing
    #[structopt(long)]
    email: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    Page(u32),
    Reload,
    Edit(UserId),
    FirstName(String),
    LastName(String),
    Email(String),
    Save,
    Cancel,
    Delete(UserId),
    Help,
    Quit,
}

static HELP: &str = "\
n | p | g <page>     next, previous, go to page
r                    reload the current page
e <id>               edit a user
first|last|email <v> change a field of the draft
s | c                save or cancel the draft
d <id>               delete a user
q                    quit";

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let id = || {
            rest.parse::<u64>()
                .map_err(|_| format!("expected a number, got {rest:?}"))
        };
        let page = || {
            rest.parse::<u32>()
                .map_err(|_| format!("expected a page number, got {rest:?}"))
        };
        let value = || {
            if rest.is_empty() {
                Err(format!("{word} needs a value"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "n" | "next" => Ok(Command::Next),
            "p" | "prev" | "previous" => Ok(Command::Previous),
            "g" | "page" => Ok(Command::Page(page()?)),
            "r" | "reload" => Ok(Command::Reload),
            "e" | "edit" => Ok(Command::Edit(id()?)),
            "first" => Ok(Command::FirstName(value()?)),
            "last" => Ok(Command::LastName(value()?)),
            "email" => Ok(Command::Email(value()?)),
            "s" | "save" => Ok(Command::Save),
            "c" | "cancel" => Ok(Command::Cancel),
            "d" | "delete" => Ok(Command::Delete(id()?)),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command {other:?}, try h")),
        }
    }
}

/// Line-based terminal input, shared between the command loop and
/// confirmation prompts.
struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    async fn prompt(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::Write::flush(&mut std::io::stdout())?;
        self.lines.next_line().await
    }
}

#[async_trait]
impl Confirm for Terminal {
    async fn confirm(&mut self, prompt: &str) -> bool {
        match self.prompt(&format!("{prompt} [y/N] ")).await {
            Ok(Some(answer)) => matches!(answer.trim(), "y" | "Y" | "yes"),
            _ => false,
        }
    }
}

/// Prints the loading line when navigating to `page` will fetch.
fn loading_if_moved(users: &Controller<Client>, page: u32) {
    if users.clamp_page(page) != users.page() {
        println!("{}", view::LOADING);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();
    let mut builder = Client::builder();
    if let Some(url) = opt.url {
        builder = builder.with_url(url);
    }
    if let Some(api_key) = opt.api_key {
        builder = builder.with_api_key(api_key);
    }
    if let Some(per_page) = opt.per_page {
        builder = builder.with_per_page(per_page);
    }
    let client = builder.build()?;

    let mut term = Terminal::new();
    let mut session = Session::new();
    let mut email = opt.email;

    // Start where the root path sends us and keep going until the list shows.
    let mut route = match routes::resolve("/", &session) {
        Some(Resolution::Render(route) | Resolution::Redirect(route)) => route,
        None => Route::Login,
    };
    while route == Route::Login {
        let address = match email.take() {
            Some(address) => address,
            None => match term.prompt("Email: ").await? {
                Some(address) => address.trim().to_string(),
                None => return Ok(()),
            },
        };
        let Some(password) = term.prompt("Password: ").await? else {
            return Ok(());
        };

        let credentials = Credentials::new(address, password.trim());
        if let Err(e) = session.sign_in(&client.auth(), &credentials).await {
            println!("Login failed: {e}");
            continue;
        }
        route = match routes::resolve(Route::Users.path(), &session) {
            Some(Resolution::Render(route) | Resolution::Redirect(route)) => route,
            None => Route::Login,
        };
    }

    let mut users = Controller::new(client);
    if let Entry::Redirect(route) = users.enter(&session).await {
        println!("Not signed in, go to {route}");
        return Ok(());
    }

    loop {
        println!("\n{}", view::render(&users));
        let Some(line) = term.prompt("> ").await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match command {
            Command::Next => {
                loading_if_moved(&users, users.page().saturating_add(1));
                users.next_page().await;
            }
            Command::Previous => {
                loading_if_moved(&users, users.page().saturating_sub(1));
                users.previous_page().await;
            }
            Command::Page(page) => {
                loading_if_moved(&users, page);
                users.go_to(page).await;
            }
            Command::Reload => {
                println!("{}", view::LOADING);
                users.reload().await;
            }
            Command::Edit(id) => {
                if !users.begin_edit(id) {
                    println!("No user #{id} on this page");
                }
            }
            Command::FirstName(value) => match users.draft_mut() {
                Some(draft) => draft.first_name = value,
                None => println!("Not editing anyone"),
            },
            Command::LastName(value) => match users.draft_mut() {
                Some(draft) => draft.last_name = value,
                None => println!("Not editing anyone"),
            },
            Command::Email(value) => match users.draft_mut() {
                Some(draft) => draft.email = value,
                None => println!("Not editing anyone"),
            },
            Command::Save => users.submit_edit().await,
            Command::Cancel => users.cancel_edit(),
            Command::Delete(id) => {
                if users.delete(id, &mut term).await == Deletion::NotListed {
                    println!("No user #{id} on this page");
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
