//! Monthly overview: balance cards, the latest entries, and the
//! quick-entry form.

use chrono::Local;
use colored::Colorize;
use dialoguer::{Input, Select};

use crate::cli::app::App;
use crate::cli::output;
use crate::cli::{ui_err, THEME};
use crate::domain::{Category, TransactionType};
use crate::errors::{FinanceError, Result};
use crate::installment::{expand, InstallmentPlan};
use crate::reports::{balance, filter_by_month, sum_by_type};

pub fn show(app: &mut App) -> Result<()> {
    loop {
        let month = filter_by_month(app.store.all(), app.period);
        let entries = sum_by_type(&month, TransactionType::Entry);
        let exits = sum_by_type(&month, TransactionType::Exit);

        output::section(&app.period.label().to_uppercase());
        output::info(&format!("Saldo do mês: {}", output::money(balance(&month))));
        output::info(&format!(
            "Entradas: {}   Saídas: {}",
            output::money(entries),
            output::money(-exits)
        ));

        if month.is_empty() {
            output::info("Sem registros este mês.");
        } else {
            println!();
            for transaction in month.iter().take(5) {
                output::info(&format!(
                    "{}  {:<28} {:>14}  {}",
                    transaction.date.format("%d/%m"),
                    truncate(&transaction.description, 28),
                    output::money(transaction.signed_amount()),
                    output::category_chip(transaction.category)
                ));
            }
            if month.len() > 5 {
                output::info(&format!("… e mais {} lançamentos", month.len() - 5).dimmed().to_string());
            }
        }

        let choice = Select::with_theme(&*THEME)
            .items(&[
                "Mês anterior",
                "Próximo mês",
                "Lançamento rápido",
                "Voltar",
            ])
            .default(3)
            .interact()
            .map_err(ui_err)?;

        match choice {
            0 => app.period = app.period.prev(),
            1 => app.period = app.period.next(),
            2 => quick_entry(app)?,
            _ => return Ok(()),
        }
    }
}

/// The dashboard's one-line entry: description, amount, and type. Date is
/// today and the category defaults to `Others`, like the original quick
/// form.
fn quick_entry(app: &mut App) -> Result<()> {
    let description: String = Input::with_theme(&*THEME)
        .with_prompt("O que você gastou hoje?")
        .interact_text()
        .map_err(ui_err)?;
    let amount: f64 = Input::with_theme(&*THEME)
        .with_prompt("Valor (R$)")
        .validate_with(|value: &f64| {
            if *value > 0.0 {
                Ok(())
            } else {
                Err("o valor deve ser positivo")
            }
        })
        .interact_text()
        .map_err(ui_err)?;
    let kind_index = Select::with_theme(&*THEME)
        .with_prompt("Tipo")
        .items(&[TransactionType::Entry.label(), TransactionType::Exit.label()])
        .default(0)
        .interact()
        .map_err(ui_err)?;
    let kind = TransactionType::ALL[kind_index];

    let plan = InstallmentPlan::single(
        description,
        amount,
        Local::now().date_naive(),
        kind,
        Category::Others,
    );
    match expand(&plan) {
        Ok(drafts) => {
            app.store.add_batch(drafts)?;
            output::success("Lançamento registrado.");
        }
        Err(FinanceError::InvalidInput(reason)) => {
            output::error(&format!("Lançamento rejeitado: {}", reason));
        }
        Err(other) => return Err(other),
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
