use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Bcrypt, Engine, RegisterCmd, User as Account};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "money_admin")]
#[command(about = "Admin utilities for Money (bootstrap users, fix balances)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./money.db?mode=rwc"
    )]
    database_url: String,

    /// Bcrypt cost used when hashing new passwords.
    #[arg(long, env = "MONEY__AUTH__BCRYPT_COST", default_value_t = Bcrypt::DEFAULT_COST)]
    bcrypt_cost: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a user; the password is read from the terminal.
    Create(UserCreateArgs),
    /// Overwrite a user's balance.
    SetBalance(UserSetBalanceArgs),
    /// Set a new password without knowing the old one.
    ResetPassword(UserResetPasswordArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct UserSetBalanceArgs {
    #[arg(long)]
    username: String,
    #[arg(long, allow_negative_numbers = true)]
    balance: i64,
}

#[derive(Args, Debug)]
struct UserResetPasswordArgs {
    #[arg(long)]
    username: String,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn describe(user: &Account) -> String {
    format!("{} <{}> ({}), balance {}", user.username, user.email, user.id, user.balance)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .password_hasher(Bcrypt::new(cli.bcrypt_cost))
        .build()
        .await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;
            let user = engine
                .register(RegisterCmd::new(args.username, args.email, password))
                .await?;
            println!("created user: {}", describe(&user));
        }
        Command::User(User {
            command: UserCommand::SetBalance(args),
        }) => {
            let user = engine.user_by_username(&args.username).await?;
            let user = engine.update_balance(user.id, args.balance).await?;
            println!("updated user: {}", describe(&user));
        }
        Command::User(User {
            command: UserCommand::ResetPassword(args),
        }) => {
            let password = prompt_password_twice()?;
            engine.reset_password(&args.username, &password).await?;
            println!("password reset for: {}", args.username.trim());
        }
    }

    Ok(())
}
