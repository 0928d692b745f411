//! Transaction browser for the month in view: list, edit, and delete.

use dialoguer::{Confirm, Select};
use uuid::Uuid;

use crate::cli::app::App;
use crate::cli::form;
use crate::cli::output;
use crate::cli::{ui_err, THEME};
use crate::currency::format_brl;
use crate::domain::Transaction;
use crate::errors::Result;
use crate::reports::filter_by_month;
use crate::store::UpdateOutcome;

pub fn show(app: &mut App) -> Result<()> {
    loop {
        let month = filter_by_month(app.store.all(), app.period);
        output::section(&format!("Transações de {}", app.period.label()));

        let mut items: Vec<String> = month.iter().map(row).collect();
        items.push("Mês anterior".into());
        items.push("Próximo mês".into());
        items.push("Voltar".into());

        let choice = Select::with_theme(&*THEME)
            .items(&items)
            .default(items.len() - 1)
            .interact()
            .map_err(ui_err)?;

        if choice < month.len() {
            detail(app, month[choice].id)?;
        } else {
            match choice - month.len() {
                0 => app.period = app.period.prev(),
                1 => app.period = app.period.next(),
                _ => return Ok(()),
            }
        }
    }
}

fn detail(app: &mut App, id: Uuid) -> Result<()> {
    let transaction = match app.store.get(id) {
        Some(found) => found.clone(),
        None => return Ok(()),
    };

    output::section(&transaction.description);
    output::info(&format!("Data:      {}", transaction.date.format("%d/%m/%Y")));
    output::info(&format!("Tipo:      {}", transaction.kind.label()));
    output::info(&format!(
        "Categoria: {}",
        output::category_chip(transaction.category)
    ));
    output::info(&format!(
        "Valor:     {}",
        output::money(transaction.signed_amount())
    ));
    if let Some(count) = transaction.installments_count {
        output::info(&format!("Série:     {} parcelas mensais", count));
    }

    let choice = Select::with_theme(&*THEME)
        .items(&["Editar", "Excluir", "Voltar"])
        .default(2)
        .interact()
        .map_err(ui_err)?;

    match choice {
        0 => {
            let draft = form::edit_draft(&transaction)?;
            match app.store.update(id, draft)? {
                UpdateOutcome::Updated => output::success("Lançamento atualizado."),
                UpdateOutcome::NotFound => output::warning("Lançamento não encontrado."),
            }
        }
        1 => {
            let confirmed = Confirm::with_theme(&*THEME)
                .with_prompt(format!("Excluir \"{}\"?", transaction.description))
                .default(false)
                .interact()
                .map_err(ui_err)?;
            if confirmed {
                app.store.remove(id)?;
                output::success("Lançamento excluído.");
            }
        }
        _ => {}
    }
    Ok(())
}

fn row(transaction: &Transaction) -> String {
    format!(
        "{}  {:<30} {:>12}  {}",
        transaction.date.format("%d/%m"),
        transaction.description,
        format!("R$ {}", format_brl(transaction.signed_amount())),
        transaction.category.label()
    )
}
