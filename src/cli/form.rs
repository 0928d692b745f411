//! The full transaction form: a single fixed entry or an installment
//! series expanded into one batch.

use chrono::{Local, NaiveDate};
use dialoguer::{Input, Select};

use crate::cli::app::App;
use crate::cli::output;
use crate::cli::{ui_err, THEME};
use crate::domain::{
    parse_iso_date, Category, InstallmentKind, Repetition, Transaction, TransactionDraft,
    TransactionType,
};
use crate::errors::{FinanceError, Result};
use crate::installment::{expand, InstallmentPlan};

const MAX_INSTALLMENTS: u32 = 48;

pub fn new_transaction(app: &mut App) -> Result<()> {
    output::section("Novo Lançamento");

    let description: String = Input::with_theme(&*THEME)
        .with_prompt("Descrição")
        .interact_text()
        .map_err(ui_err)?;
    let kind = prompt_kind(TransactionType::Exit)?;
    let category = prompt_category(Category::Food)?;
    let amount: f64 = Input::with_theme(&*THEME)
        .with_prompt("Valor da parcela (R$)")
        .validate_with(|value: &f64| {
            if *value > 0.0 {
                Ok(())
            } else {
                Err("o valor deve ser positivo")
            }
        })
        .interact_text()
        .map_err(ui_err)?;
    let start_date = prompt_date("Data de início", Local::now().date_naive())?;

    let launch = Select::with_theme(&*THEME)
        .with_prompt("Forma de lançamento")
        .items(&["Único / Fixo", "Parcelado"])
        .default(0)
        .interact()
        .map_err(ui_err)?;
    let (installment_kind, count) = if launch == 1 {
        let count: u32 = Input::with_theme(&*THEME)
            .with_prompt("Quantidade de parcelas (meses)")
            .validate_with(|value: &u32| {
                if (1..=MAX_INSTALLMENTS).contains(value) {
                    Ok(())
                } else {
                    Err("informe entre 1 e 48 parcelas")
                }
            })
            .interact_text()
            .map_err(ui_err)?;
        (InstallmentKind::Installment, count)
    } else {
        (InstallmentKind::Fixed, 1)
    };

    let repetition_index = Select::with_theme(&*THEME)
        .with_prompt("Repetição")
        .items(&["Não repete", "Mensal"])
        .default(0)
        .interact()
        .map_err(ui_err)?;
    let repetition = if repetition_index == 1 {
        Repetition::Monthly
    } else {
        Repetition::None
    };

    let plan = InstallmentPlan {
        description,
        amount,
        start_date,
        kind,
        category,
        repetition,
        installment_kind,
        count,
    };
    match expand(&plan) {
        Ok(drafts) => {
            let created = drafts.len();
            app.store.add_batch(drafts)?;
            if created > 1 {
                output::success(&format!(
                    "{} lançamentos criados nos próximos meses.",
                    created
                ));
            } else {
                output::success("Lançamento confirmado.");
            }
            Ok(())
        }
        Err(FinanceError::InvalidInput(reason)) => {
            output::error(&format!("Lançamento rejeitado: {}", reason));
            Ok(())
        }
        Err(other) => Err(other),
    }
}

/// Prompts for a full replacement of an existing record, pre-filled with
/// its current values. Series metadata travels unchanged: editing one
/// sibling never rewrites the others.
pub fn edit_draft(existing: &Transaction) -> Result<TransactionDraft> {
    let description: String = Input::with_theme(&*THEME)
        .with_prompt("Descrição")
        .default(existing.description.clone())
        .interact_text()
        .map_err(ui_err)?;
    let kind = prompt_kind(existing.kind)?;
    let category = prompt_category(existing.category)?;
    let amount: f64 = Input::with_theme(&*THEME)
        .with_prompt("Valor (R$)")
        .default(existing.amount)
        .validate_with(|value: &f64| {
            if *value > 0.0 {
                Ok(())
            } else {
                Err("o valor deve ser positivo")
            }
        })
        .interact_text()
        .map_err(ui_err)?;
    let date = prompt_date("Data", existing.date)?;

    let mut draft = TransactionDraft::new(description, amount, date, kind, category);
    draft.repetition = existing.repetition;
    draft.installment_kind = existing.installment_kind;
    draft.installments_count = existing.installments_count;
    Ok(draft)
}

fn prompt_kind(default: TransactionType) -> Result<TransactionType> {
    let default_index = TransactionType::ALL
        .iter()
        .position(|k| *k == default)
        .unwrap_or(0);
    let labels: Vec<&str> = TransactionType::ALL.iter().map(|k| k.label()).collect();
    let index = Select::with_theme(&*THEME)
        .with_prompt("Tipo")
        .items(&labels)
        .default(default_index)
        .interact()
        .map_err(ui_err)?;
    Ok(TransactionType::ALL[index])
}

fn prompt_category(default: Category) -> Result<Category> {
    let default_index = Category::ALL.iter().position(|c| *c == default).unwrap_or(0);
    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    let index = Select::with_theme(&*THEME)
        .with_prompt("Categoria")
        .items(&labels)
        .default(default_index)
        .interact()
        .map_err(ui_err)?;
    Ok(Category::ALL[index])
}

fn prompt_date(prompt: &str, default: NaiveDate) -> Result<NaiveDate> {
    let raw: String = Input::with_theme(&*THEME)
        .with_prompt(format!("{} (AAAA-MM-DD)", prompt))
        .default(default.format("%Y-%m-%d").to_string())
        .validate_with(|value: &String| {
            if parse_iso_date(value).is_some() {
                Ok(())
            } else {
                Err("data inválida, use AAAA-MM-DD")
            }
        })
        .interact_text()
        .map_err(ui_err)?;
    parse_iso_date(&raw).ok_or_else(|| FinanceError::invalid("data inválida"))
}
