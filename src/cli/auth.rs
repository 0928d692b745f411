//! Login and signup screens, shown while the session is inactive.

use dialoguer::{Input, Password, Select};

use crate::cli::app::App;
use crate::cli::output;
use crate::cli::{ui_err, THEME};
use crate::errors::{FinanceError, Result};
use crate::session::{SessionGateway, SessionState};

/// Shows the signed-out menu. Returns `false` when the user chooses to
/// leave the application.
pub fn auth_menu(app: &mut App) -> Result<bool> {
    output::section("Bem-vindo ao Grana");
    let choice = Select::with_theme(&*THEME)
        .with_prompt("Acesse sua conta")
        .items(&["Entrar", "Criar conta", "Sair do aplicativo"])
        .default(0)
        .interact()
        .map_err(ui_err)?;

    match choice {
        0 => sign_in(app)?,
        1 => sign_up(app)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn sign_in(app: &mut App) -> Result<()> {
    let email: String = Input::with_theme(&*THEME)
        .with_prompt("E-mail")
        .interact_text()
        .map_err(ui_err)?;
    let password = Password::with_theme(&*THEME)
        .with_prompt("Senha")
        .interact()
        .map_err(ui_err)?;

    match app.gateway.sign_in(&email, &password) {
        Ok(session) => {
            output::success(&format!("Bem-vindo de volta, {}!", display_name(&session)));
            app.tracker.transition(SessionState::Active(session));
            Ok(())
        }
        Err(FinanceError::Auth(reason)) => {
            output::error(&format!("Não foi possível entrar: {}", reason));
            Ok(())
        }
        Err(other) => Err(other),
    }
}

fn sign_up(app: &mut App) -> Result<()> {
    let name: String = Input::with_theme(&*THEME)
        .with_prompt("Nome")
        .interact_text()
        .map_err(ui_err)?;
    let email: String = Input::with_theme(&*THEME)
        .with_prompt("E-mail")
        .interact_text()
        .map_err(ui_err)?;
    let password = Password::with_theme(&*THEME)
        .with_prompt("Senha (mínimo 6 caracteres)")
        .interact()
        .map_err(ui_err)?;

    match app.gateway.sign_up(&email, &password, &name) {
        Ok(session) => {
            output::success(&format!("Conta criada. Bem-vindo, {}!", display_name(&session)));
            app.tracker.transition(SessionState::Active(session));
            Ok(())
        }
        Err(FinanceError::Auth(reason)) => {
            output::error(&format!("Não foi possível criar a conta: {}", reason));
            Ok(())
        }
        Err(other) => Err(other),
    }
}

/// Profile screen for the signed-in user. Returns `false` after signing
/// out so the caller re-routes to the auth menu.
pub fn profile(app: &mut App) -> Result<bool> {
    let session = match app.tracker.state() {
        SessionState::Active(session) => session.clone(),
        _ => return Ok(false),
    };

    output::section("Perfil");
    output::info(&format!("Nome:   {}", display_name(&session)));
    output::info(&format!("E-mail: {}", session.email));

    let choice = Select::with_theme(&*THEME)
        .items(&["Voltar", "Sair da conta"])
        .default(0)
        .interact()
        .map_err(ui_err)?;
    if choice == 1 {
        app.gateway.sign_out()?;
        app.tracker.transition(SessionState::Inactive);
        output::info("Você saiu da sua conta.");
        return Ok(false);
    }
    Ok(true)
}

fn display_name(session: &crate::session::Session) -> String {
    session
        .display_name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| session.email.clone())
}
