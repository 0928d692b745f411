//! Non-interactive script mode for smoke coverage. Setting
//! `GRANA_CLI_SCRIPT` switches the binary to reading newline-separated
//! commands from stdin, bypassing the interactive prompts.

use std::io::{self, BufRead};

use chrono::Local;

use crate::cli::app::App;
use crate::cli::output;
use crate::currency::format_brl;
use crate::domain::{parse_iso_date, Category, InstallmentKind, Repetition, TransactionType};
use crate::errors::{FinanceError, Result};
use crate::installment::{expand, InstallmentPlan};
use crate::reports::{balance, filter_by_month, sum_by_type, Period};

pub fn run_script() -> Result<()> {
    let mut app = App::bootstrap()?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !execute(&mut app, trimmed)? {
            break;
        }
    }
    app.save_config()
}

fn execute(app: &mut App, line: &str) -> Result<bool> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("exit") | Some("quit") => return Ok(false),
        Some("month") => {
            let year = parts.next().and_then(|v| v.parse::<i32>().ok());
            let month = parts.next().and_then(|v| v.parse::<u32>().ok());
            match (year, month) {
                (Some(year), Some(month)) if (1..=12).contains(&month) => {
                    app.period = Period::new(year, month);
                }
                _ => output::warning("uso: month <ano> <mês>"),
            }
        }
        Some("dashboard") => {
            let month = filter_by_month(app.store.all(), app.period);
            println!(
                "{}: entradas R$ {} | saidas R$ {} | saldo R$ {}",
                app.period.label(),
                format_brl(sum_by_type(&month, TransactionType::Entry)),
                format_brl(sum_by_type(&month, TransactionType::Exit)),
                format_brl(balance(&month))
            );
        }
        Some("list") => {
            for transaction in app.store.all() {
                println!(
                    "{} {} R$ {} {}",
                    transaction.date.format("%Y-%m-%d"),
                    transaction.kind.label(),
                    format_brl(transaction.amount),
                    transaction.description
                );
            }
        }
        Some("quick") => {
            let amount = parts.next().and_then(|v| v.parse::<f64>().ok());
            let kind = match parts.next() {
                Some("entrada") => Some(TransactionType::Entry),
                Some("saida") => Some(TransactionType::Exit),
                _ => None,
            };
            let description = parts.collect::<Vec<_>>().join(" ");
            match (amount, kind) {
                (Some(amount), Some(kind)) => {
                    let plan = InstallmentPlan::single(
                        description,
                        amount,
                        Local::now().date_naive(),
                        kind,
                        Category::Others,
                    );
                    add_plan(app, &plan)?;
                }
                _ => output::warning("uso: quick <valor> <entrada|saida> <descrição>"),
            }
        }
        Some("parcelado") => {
            let amount = parts.next().and_then(|v| v.parse::<f64>().ok());
            let count = parts.next().and_then(|v| v.parse::<u32>().ok());
            let start = parts.next().and_then(parse_iso_date);
            let description = parts.collect::<Vec<_>>().join(" ");
            match (amount, count, start) {
                (Some(amount), Some(count), Some(start)) => {
                    let plan = InstallmentPlan {
                        description,
                        amount,
                        start_date: start,
                        kind: TransactionType::Exit,
                        category: Category::Shopping,
                        repetition: Repetition::None,
                        installment_kind: InstallmentKind::Installment,
                        count,
                    };
                    add_plan(app, &plan)?;
                }
                _ => output::warning("uso: parcelado <valor> <parcelas> <AAAA-MM-DD> <descrição>"),
            }
        }
        Some(other) => output::warning(&format!("comando desconhecido: {}", other)),
        None => {}
    }
    Ok(true)
}

fn add_plan(app: &mut App, plan: &InstallmentPlan) -> Result<()> {
    match expand(plan) {
        Ok(drafts) => {
            let created = drafts.len();
            app.store.add_batch(drafts)?;
            println!("ok: {} lancamento(s)", created);
            Ok(())
        }
        Err(FinanceError::InvalidInput(reason)) => {
            output::warning(&format!("rejeitado: {}", reason));
            Ok(())
        }
        Err(other) => Err(other),
    }
}
