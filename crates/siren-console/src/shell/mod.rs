//! Interactive shell: view dispatch and command loops.

mod forms;
mod render;

use anyhow::Result;
use colored::Colorize;

use siren_core::Credentials;
use siren_rest::{RestClient, SessionStore};

use crate::dashboard::Dashboard;
use crate::guard::{self, View};
use crate::output;

/// Run the console until the user quits or input ends.
pub async fn run(session: &SessionStore, client: &RestClient) -> Result<()> {
    println!("{}", "Emergency Calls Console".bold());
    println!("{}", format!("API: {}", client.api()).dimmed());

    loop {
        let keep_going = match guard::route(session.is_authenticated()) {
            View::Login => login_view(session, client).await?,
            View::Dashboard => dashboard_view(session).await?,
        };
        if !keep_going {
            return Ok(());
        }
    }
}

/// The sign-in view. Returns false when the console should exit.
///
/// Loops until a login succeeds (the guard then routes to the dashboard)
/// or input ends.
async fn login_view(session: &SessionStore, client: &RestClient) -> Result<bool> {
    println!();
    println!("{}", "Sign In".bold());
    println!("{}", "Commands: login, register, help, quit".dimmed());

    while !session.is_authenticated() {
        let Some(line) = forms::prompt("signin> ")? else {
            return Ok(false);
        };

        let (command, _rest) = split_command(&line);
        match command {
            "" => {}
            "login" => {
                let Some((username, password)) = forms::credentials()? else {
                    return Ok(false);
                };
                if session.login(&Credentials::new(username, password)).await {
                    output::success("Signed in");
                } else {
                    output::error("Invalid username or password");
                }
            }
            "register" => {
                if !register(client).await? {
                    return Ok(false);
                }
            }
            "help" => {
                println!("  login       Sign in with username and password");
                println!("  register    Create a new account");
                println!("  quit        Exit the console");
            }
            "quit" | "exit" => return Ok(false),
            other => output::error(&format!("Unknown command: {}", other)),
        }
    }

    Ok(true)
}

/// Registration flow. Password length is checked client-side before any
/// request; server-side rejections surface as one generic message.
async fn register(client: &RestClient) -> Result<bool> {
    let Some((username, password)) = forms::credentials()? else {
        return Ok(false);
    };

    if let Err(message) = forms::validate_password(&password) {
        output::error(message);
        return Ok(true);
    }

    match client.register(&username, &password).await {
        Ok(()) => output::success("Registered. You can now sign in."),
        Err(e) => {
            tracing::debug!(error = %e, "registration failed");
            output::error("Registration failed");
        }
    }

    Ok(true)
}

/// The protected dashboard view. Returns false when the console should
/// exit; returning true after a logout lets the guard redirect.
async fn dashboard_view(session: &SessionStore) -> Result<bool> {
    // State lives and dies with the view: a fresh dashboard per sign-in.
    let dashboard = Dashboard::new(session.clone());

    println!();
    println!("{}", "Emergency Calls Dashboard".bold());
    println!("{}", "Type 'help' for commands.".dimmed());

    dashboard.refresh().await;
    render::page(&dashboard.page());

    loop {
        let Some(line) = forms::prompt("siren> ")? else {
            return Ok(false);
        };

        let (command, rest) = split_command(&line);
        match command {
            "" => {}
            "list" | "ls" => {
                dashboard.refresh().await;
                render::page(&dashboard.page());
            }
            "page" => match forms::parse_page_number(rest) {
                Ok(index) => {
                    dashboard.set_page(index).await;
                    render::page(&dashboard.page());
                }
                Err(message) => output::error(&message),
            },
            "filter" => match forms::parse_filter(rest) {
                Ok(filter) => {
                    dashboard.set_filter(filter).await;
                    render::page(&dashboard.page());
                }
                Err(message) => output::error(&message),
            },
            "add" => {
                if !forms::new_call(&dashboard)? {
                    return Ok(false);
                }
                dashboard.create().await;
                render::page(&dashboard.page());
            }
            "edit" => match forms::parse_id(rest) {
                Ok(id) => {
                    if !dashboard.begin_edit(id) {
                        output::error(&format!("No call with id {} on this page", id));
                    } else if forms::edit_call(&dashboard)? {
                        dashboard.update().await;
                        render::page(&dashboard.page());
                    } else {
                        dashboard.cancel_edit();
                    }
                }
                Err(message) => output::error(&message),
            },
            "delete" | "del" => match forms::parse_id(rest) {
                Ok(id) => {
                    dashboard.delete(Some(id)).await;
                    render::page(&dashboard.page());
                }
                Err(message) => output::error(&message),
            },
            "get" => match forms::parse_id(rest) {
                Ok(id) => {
                    if let Some(call) = dashboard.get(id).await {
                        render::detail(&call);
                    }
                }
                Err(message) => output::error(&message),
            },
            "logout" => {
                session.logout();
                output::success("Signed out");
                return Ok(true);
            }
            "help" => {
                println!("  list                Re-fetch and display the current page");
                println!("  page <n>            Go to page n (1-based)");
                println!("  filter <type|off>   Restrict the list to one incident type");
                println!("  add                 Create a new emergency call");
                println!("  edit <id>           Edit the call with the given id");
                println!("  delete <id>         Delete the call with the given id");
                println!("  get <id>            Display a single call");
                println!("  logout              Sign out");
                println!("  quit                Exit the console");
            }
            "quit" | "exit" => return Ok(false),
            other => output::error(&format!("Unknown command: {}", other)),
        }
    }
}

/// Split a command line into its first word and the remainder.
fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}
