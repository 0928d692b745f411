//! Financial reports: monthly or annual totals, the expense breakdown by
//! category, and the six-month cash-flow trend.

use colored::Colorize;
use dialoguer::Select;

use crate::cli::app::App;
use crate::cli::output;
use crate::cli::{ui_err, THEME};
use crate::domain::{Transaction, TransactionType};
use crate::errors::Result;
use crate::reports::{
    category_shares, filter_by_month, filter_by_year, monthly_series, sum_by_type, top_category,
};

const TREND_MONTHS: usize = 6;
const BAR_WIDTH: usize = 24;

pub fn show(app: &mut App) -> Result<()> {
    let mut annual = false;
    loop {
        let scope_label = if annual {
            app.period.year.to_string()
        } else {
            app.period.label()
        };
        let selected: Vec<Transaction> = if annual {
            filter_by_year(app.store.all(), app.period.year)
        } else {
            filter_by_month(app.store.all(), app.period)
        };

        output::section(&format!("Relatórios — {}", scope_label));
        print_totals(&selected);
        print_breakdown(&selected);
        print_trend(app);

        let choice = Select::with_theme(&*THEME)
            .items(&[
                if annual { "Ver visão mensal" } else { "Ver visão anual" },
                "Período anterior",
                "Próximo período",
                "Voltar",
            ])
            .default(3)
            .interact()
            .map_err(ui_err)?;

        match choice {
            0 => annual = !annual,
            1 => {
                app.period = if annual {
                    app.period.offset(-12)
                } else {
                    app.period.prev()
                }
            }
            2 => {
                app.period = if annual {
                    app.period.offset(12)
                } else {
                    app.period.next()
                }
            }
            _ => return Ok(()),
        }
    }
}

fn print_totals(selected: &[Transaction]) {
    let entries = sum_by_type(selected, TransactionType::Entry);
    let exits = sum_by_type(selected, TransactionType::Exit);
    output::info(&format!(
        "Entradas: {}   Saídas: {}   Saldo: {}",
        output::money(entries),
        output::money(-exits),
        output::money(entries - exits)
    ));
}

fn print_breakdown(selected: &[Transaction]) {
    let exits: Vec<Transaction> = selected
        .iter()
        .filter(|t| t.kind == TransactionType::Exit)
        .cloned()
        .collect();
    let shares = category_shares(&exits);
    if shares.is_empty() {
        output::info("Nenhuma saída registrada neste período.");
        return;
    }

    println!("\n{}", "Distribuição de saídas".bold());
    let max = shares.first().map(|s| s.total).unwrap_or(0.0);
    for share in &shares {
        output::info(&format!(
            "{:<14} {:>14}  {:>5.1}%  {}",
            output::category_chip(share.category),
            format!("R$ {}", crate::currency::format_brl(share.total)),
            share.share,
            output::bar(share.total, max, BAR_WIDTH)
        ));
    }
    if let Some(top) = top_category(&exits) {
        output::info(&format!(
            "Maior categoria: {} ({:.1}% do total de saídas)",
            output::category_chip(top.category),
            top.share
        ));
    }
}

fn print_trend(app: &App) {
    let series = monthly_series(app.store.all(), app.period, TREND_MONTHS);
    let max = series
        .iter()
        .map(|m| m.entries.max(m.exits))
        .fold(0.0_f64, f64::max);

    println!("\n{}", "Fluxo de caixa (últimos 6 meses)".bold());
    for month in &series {
        output::info(&format!(
            "{} {}  {}",
            month.period.short_label(),
            output::bar(month.entries, max, BAR_WIDTH).bright_green(),
            format!("R$ {}", crate::currency::format_brl(month.entries)).dimmed()
        ));
        output::info(&format!(
            "    {}  {}",
            output::bar(month.exits, max, BAR_WIDTH).bright_red(),
            format!("R$ {}", crate::currency::format_brl(month.exits)).dimmed()
        ));
    }
}
