//! Library client - command line front end
//!
//! Every invocation is one "page load": it restores the persisted session,
//! runs the guard the matching page would run, calls the backend and prints
//! the JSON answer on stdout. Logs and notices go to stderr.

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use library_client::{
    config::{AppConfig, LoggingConfig},
    models::{
        BookInput, BookQuery, BookUpdate, FineStatus, RegisterUser, Role, TransactionQuery,
        TransactionStatus, UserUpdate,
    },
    navigation::TerminalNavigator,
    storage::FileStore,
    AppState, ClientResult, LoginOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "library-client", version, about = "Library management system client")]
struct Cli {
    /// Backend base URL, overrides configuration
    #[arg(long, env = "LIBRARY_API_URL")]
    api_url: Option<String>,

    /// Session file, overrides configuration
    #[arg(long, env = "LIBRARY_SESSION_FILE")]
    session_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session
    Login {
        email: String,
        #[arg(long, env = "LIBRARY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Drop the persisted session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create a new account
    Register(RegisterArgs),
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    #[command(subcommand)]
    Books(BooksCommand),
    /// Issue a book to a user
    Issue {
        book_id: i64,
        user_id: i64,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Return an issued book
    Return { transaction_id: i64 },
    #[command(subcommand)]
    Transactions(TransactionsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Fines(FinesCommand),
    #[command(subcommand)]
    Reports(ReportsCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    role: Option<Role>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

#[derive(Subcommand, Debug)]
enum BooksCommand {
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        available_only: bool,
    },
    Show { book_id: i64 },
    Search { keyword: String },
    Categories,
    Create {
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        copies: Option<i64>,
        #[arg(long)]
        publisher: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        shelf: Option<String>,
    },
    Update {
        book_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        copies: Option<i64>,
        #[arg(long)]
        shelf: Option<String>,
    },
    Delete { book_id: i64 },
}

#[derive(Subcommand, Debug)]
enum TransactionsCommand {
    List {
        #[arg(long)]
        status: Option<TransactionStatus>,
        #[arg(long)]
        user_id: Option<i64>,
    },
    Show { transaction_id: i64 },
    Overdue,
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List {
        #[arg(long)]
        role: Option<Role>,
    },
    Show { user_id: i64 },
    Update {
        user_id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    Delete { user_id: i64 },
    /// Books currently issued to a user
    Books { user_id: i64 },
}

#[derive(Subcommand, Debug)]
enum FinesCommand {
    List {
        #[arg(long)]
        status: Option<FineStatus>,
        /// Only fines of this user
        #[arg(long)]
        user_id: Option<i64>,
    },
    Show { fine_id: i64 },
    Pay {
        fine_id: i64,
        #[arg(long, default_value = "cash")]
        method: String,
    },
    Waive { fine_id: i64 },
}

#[derive(Subcommand, Debug)]
enum ReportsCommand {
    Dashboard,
    Inventory,
    Circulation {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    Fines {
        #[arg(long)]
        status: Option<FineStatus>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }
    if let Some(path) = cli.session_file.clone() {
        config.storage.path = path;
    }

    init_tracing(&config.logging);

    let store = Arc::new(
        FileStore::open(&config.storage.path).context("Failed to open session store")?,
    );
    let navigator = Arc::new(TerminalNavigator::new().with_hint(
        config.routes.login_page.clone(),
        "Not logged in. Run `library-client login <email>` first.",
    ));
    let state = AppState::new(config, store, navigator).context("Failed to create client")?;

    run(&state, cli.command).await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_client={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<ExitCode> {
    let api = &state.api;
    let session = &state.session;

    match command {
        Command::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            match session.login(&email, &password).await {
                LoginOutcome::Success { user } => print_json(&user),
                LoginOutcome::Failure { error } => {
                    eprintln!("Login failed: {}", error);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Logout => {
            session.logout();
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami => {
            if !session.require_auth() {
                return Ok(ExitCode::FAILURE);
            }
            print_json(&session.current_user())
        }
        Command::Register(args) => {
            let user = RegisterUser {
                username: args.username,
                email: args.email,
                password: args.password,
                full_name: args.full_name,
                role: args.role,
                phone: args.phone,
                address: args.address,
            };
            render(api.register(&user).await)
        }
        Command::ChangePassword { current, new } => {
            if !session.require_auth() {
                return Ok(ExitCode::FAILURE);
            }
            render(api.change_password(&current, &new).await)
        }
        Command::Books(command) => run_books(state, command).await,
        Command::Issue {
            book_id,
            user_id,
            days,
        } => {
            if !session.require_any_role(&Role::STAFF) {
                return Ok(ExitCode::FAILURE);
            }
            render(api.issue_book(book_id, user_id, days).await)
        }
        Command::Return { transaction_id } => {
            if !session.require_any_role(&Role::STAFF) {
                return Ok(ExitCode::FAILURE);
            }
            render(api.return_book(transaction_id).await)
        }
        Command::Transactions(command) => run_transactions(state, command).await,
        Command::Users(command) => run_users(state, command).await,
        Command::Fines(command) => run_fines(state, command).await,
        Command::Reports(command) => run_reports(state, command).await,
    }
}

async fn run_books(state: &AppState, command: BooksCommand) -> anyhow::Result<ExitCode> {
    let api = &state.api;
    let session = &state.session;

    let allowed = match &command {
        BooksCommand::Create { .. } | BooksCommand::Update { .. } => {
            session.require_any_role(&Role::STAFF)
        }
        BooksCommand::Delete { .. } => session.require_role(Role::Admin),
        _ => session.require_auth(),
    };
    if !allowed {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        BooksCommand::List {
            category,
            available_only,
        } => {
            let query = BookQuery {
                category,
                available_only: available_only.then_some(true),
            };
            render(api.list_books(&query).await)
        }
        BooksCommand::Show { book_id } => render(api.get_book(book_id).await),
        BooksCommand::Search { keyword } => render(api.search_books(&keyword).await),
        BooksCommand::Categories => render(api.list_categories().await),
        BooksCommand::Create {
            isbn,
            title,
            author,
            category,
            copies,
            publisher,
            year,
            shelf,
        } => {
            let book = BookInput {
                isbn,
                title,
                author,
                category,
                total_copies: copies,
                publisher,
                publication_year: year,
                shelf_location: shelf,
                description: None,
                cover_image: None,
            };
            render(api.create_book(&book).await)
        }
        BooksCommand::Update {
            book_id,
            title,
            author,
            category,
            copies,
            shelf,
        } => {
            let changes = BookUpdate {
                title,
                author,
                category,
                total_copies: copies,
                shelf_location: shelf,
                ..Default::default()
            };
            render(api.update_book(book_id, &changes).await)
        }
        BooksCommand::Delete { book_id } => render(api.delete_book(book_id).await),
    }
}

async fn run_transactions(state: &AppState, command: TransactionsCommand) -> anyhow::Result<ExitCode> {
    let api = &state.api;
    let session = &state.session;

    let allowed = match &command {
        TransactionsCommand::Overdue => session.require_any_role(&Role::STAFF),
        _ => session.require_auth(),
    };
    if !allowed {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        TransactionsCommand::List { status, user_id } => {
            render(api.list_transactions(&TransactionQuery { status, user_id }).await)
        }
        TransactionsCommand::Show { transaction_id } => {
            render(api.get_transaction(transaction_id).await)
        }
        TransactionsCommand::Overdue => render(api.list_overdue_transactions().await),
    }
}

async fn run_users(state: &AppState, command: UsersCommand) -> anyhow::Result<ExitCode> {
    let api = &state.api;
    let session = &state.session;

    let allowed = match &command {
        UsersCommand::List { .. } => session.require_any_role(&Role::STAFF),
        UsersCommand::Delete { .. } => session.require_role(Role::Admin),
        _ => session.require_auth(),
    };
    if !allowed {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        UsersCommand::List { role } => render(api.list_users(role).await),
        UsersCommand::Show { user_id } => render(api.get_user(user_id).await),
        UsersCommand::Update {
            user_id,
            email,
            full_name,
            phone,
            address,
            role,
        } => {
            let changes = UserUpdate {
                email,
                full_name,
                phone,
                address,
                role,
                is_active: None,
            };
            render(api.update_user(user_id, &changes).await)
        }
        UsersCommand::Delete { user_id } => render(api.delete_user(user_id).await),
        UsersCommand::Books { user_id } => render(api.list_user_books(user_id).await),
    }
}

async fn run_fines(state: &AppState, command: FinesCommand) -> anyhow::Result<ExitCode> {
    let api = &state.api;
    let session = &state.session;

    let allowed = match &command {
        FinesCommand::List { user_id: None, .. } | FinesCommand::Pay { .. } => {
            session.require_any_role(&Role::STAFF)
        }
        FinesCommand::Waive { .. } => session.require_role(Role::Admin),
        _ => session.require_auth(),
    };
    if !allowed {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        FinesCommand::List {
            status,
            user_id: Some(user_id),
        } => render(api.list_user_fines(user_id, status).await),
        FinesCommand::List { status, user_id: None } => render(api.list_fines(status).await),
        FinesCommand::Show { fine_id } => render(api.get_fine(fine_id).await),
        FinesCommand::Pay { fine_id, method } => render(api.pay_fine(fine_id, &method).await),
        FinesCommand::Waive { fine_id } => render(api.waive_fine(fine_id).await),
    }
}

async fn run_reports(state: &AppState, command: ReportsCommand) -> anyhow::Result<ExitCode> {
    if !state.session.require_any_role(&Role::STAFF) {
        return Ok(ExitCode::FAILURE);
    }

    let api = &state.api;
    match command {
        ReportsCommand::Dashboard => render(api.dashboard_report().await),
        ReportsCommand::Inventory => render(api.inventory_report().await),
        ReportsCommand::Circulation { start, end } => {
            render(api.circulation_report(start, end).await)
        }
        ReportsCommand::Fines { status } => render(api.fines_report(status).await),
    }
}

/// Print a successful result, or an inline error notice in its place
fn render<T: Serialize>(result: ClientResult<T>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(value) => print_json(&value),
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(ExitCode::SUCCESS)
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
