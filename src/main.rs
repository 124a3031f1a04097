//! `workforce`: command-line shell over the dashboard's session and routing.
//!
//! The session is kept in file-backed storage, so a login survives between
//! invocations the way a browser session survives a reload.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workforce_access::{
    AccountAction, AppConfig, Error, FileStorage, Landing, MockDirectory, Navigator, RedirectReason,
    RouteTable, Secret, SessionStore, account_action, menu_for, public_links,
};

/// Session and navigation shell for WorkForce Pro
#[derive(Parser, Debug)]
#[command(name = "workforce", version, about)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session storage directory (overrides $WORKFORCE_STORAGE_DIR)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Log out and remove the persisted session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Navigate to a path and show where it lands
    Visit {
        /// Requested path, e.g. /dashboard/payroll
        path: String,
    },
    /// Show the sidebar for the current session
    Menu {
        /// Path used to highlight the active entry
        #[arg(long, default_value = "/dashboard")]
        path: String,
    },
    /// List the route table
    Routes,
    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = AppConfig::resolve(cli.config, cli.storage_dir)?;
    let session = SessionStore::open(
        MockDirectory::new(),
        FileStorage::new(&config.storage_dir),
        config.storage_key.clone(),
    );
    let table = RouteTable::default();
    let mut nav = Navigator::new(session, table, config.clone());

    match cli.command {
        Command::Login { email, password } => {
            let landing = nav.login(&email, &Secret::new(password))?;
            if let Some(identity) = nav.session().current() {
                println!(
                    "logged in as {} ({}, {})",
                    identity.name, identity.role, identity.department
                );
            }
            print_landing(&landing);
        }
        Command::Logout => {
            let landing = nav.logout()?;
            println!("logged out");
            print_landing(&landing);
        }
        Command::Whoami => match account_action(nav.session().current()) {
            AccountAction::SignOut { name, role } => println!("{name} ({role})"),
            AccountAction::SignIn { path } => println!("not logged in; sign in at {path}"),
        },
        Command::Visit { path } => {
            let landing = nav.navigate(&path)?;
            print_landing(&landing);
        }
        Command::Menu { path } => {
            let menu = menu_for(nav.session().current(), &path);
            if menu.is_empty() {
                for link in public_links() {
                    println!("  {:<32} {}", link.path, link.label);
                }
            }
            for item in menu {
                let marker = if item.active { '*' } else { ' ' };
                println!("{marker} {:<32} {}", item.entry.path, item.entry.label);
            }
        }
        Command::Routes => {
            for route in table.routes() {
                println!(
                    "{:<34} {:<20} {:<10} {}",
                    route.path,
                    route.view.to_string(),
                    format!("{:?}", route.layout),
                    route.roles
                );
            }
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}

fn print_landing(landing: &Landing) {
    for hop in &landing.redirects {
        let reason = match &hop.reason {
            RedirectReason::UnknownPath => "unknown path".to_string(),
            RedirectReason::Denied(denial) => denial.to_string(),
        };
        println!("  {} -> {} ({})", hop.from, hop.to, reason);
    }
    println!("{} [{}]", landing.path(), landing.route.view);
    for item in &landing.menu {
        let marker = if item.active { '*' } else { ' ' };
        println!("  {marker} {}", item.entry.label);
    }
}
