//! Interactive presentation layer. Routing follows the session state
//! machine: the initial `Unknown` state resolves against the gateway at
//! startup, `Inactive` shows the auth menu, and `Active` unlocks the main
//! screens.

mod app;
mod auth;
mod dashboard;
mod form;
mod output;
mod reports_screen;
mod script;
mod transactions_screen;

use dialoguer::{theme::ColorfulTheme, Select};
use once_cell::sync::Lazy;

pub use app::App;

use crate::errors::{FinanceError, Result};
use crate::session::SessionState;

/// One prompt theme shared by every screen.
pub(crate) static THEME: Lazy<ColorfulTheme> = Lazy::new(ColorfulTheme::default);

pub fn run_cli() -> Result<()> {
    if std::env::var_os("GRANA_CLI_SCRIPT").is_some() {
        return script::run_script();
    }

    let mut app = App::bootstrap()?;
    app.tracker.resolve_initial(&app.gateway);

    loop {
        let state = app.tracker.state().clone();
        let keep_running = match state {
            SessionState::Unknown => {
                app.tracker.resolve_initial(&app.gateway);
                true
            }
            SessionState::Inactive => auth::auth_menu(&mut app)?,
            SessionState::Active(_) => main_menu(&mut app)?,
        };
        if !keep_running {
            break;
        }
    }

    app.save_config()?;
    output::info("Até logo!");
    Ok(())
}

fn main_menu(app: &mut App) -> Result<bool> {
    let choice = Select::with_theme(&*THEME)
        .with_prompt("Menu principal")
        .items(&[
            "Dashboard",
            "Relatórios",
            "Transações",
            "Novo lançamento",
            "Perfil",
            "Sair do aplicativo",
        ])
        .default(0)
        .interact()
        .map_err(ui_err)?;

    match choice {
        0 => dashboard::show(app)?,
        1 => reports_screen::show(app)?,
        2 => transactions_screen::show(app)?,
        3 => form::new_transaction(app)?,
        4 => {
            auth::profile(app)?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn ui_err(err: dialoguer::Error) -> FinanceError {
    match err {
        dialoguer::Error::IO(io) => FinanceError::Io(io),
    }
}
