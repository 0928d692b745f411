use chrono::NaiveDate;
use grana_core::currency::format_brl;
use grana_core::domain::{Category, Transaction, TransactionDraft, TransactionType};
use grana_core::reports::{
    balance, category_shares, filter_by_month, filter_by_year, monthly_series, sum_by_category,
    sum_by_type, Period,
};

fn txn(desc: &str, amount: f64, date: &str, kind: TransactionType, category: Category) -> Transaction {
    Transaction::from_draft(TransactionDraft::new(
        desc,
        amount,
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        kind,
        category,
    ))
}

#[test]
fn month_filter_returns_exactly_the_matching_subset() {
    let set = vec![
        txn("Palheta / Sup.GPS", 36.90, "2024-02-16", TransactionType::Exit, Category::Transport),
        txn("Prest. Casa", 800.00, "2024-02-12", TransactionType::Exit, Category::Rent),
        txn("Salário", 4847.70, "2025-05-05", TransactionType::Entry, Category::Salary),
        txn("iFood - Restaurante", 42.90, "2025-05-20", TransactionType::Exit, Category::Food),
    ];

    let feb = filter_by_month(&set, Period::new(2024, 2));
    assert_eq!(feb.len(), 2);
    assert!(feb.iter().all(|t| t.date.format("%Y-%m").to_string() == "2024-02"));

    // Count splits cleanly by type inside the subset.
    let entries = feb.iter().filter(|t| t.kind == TransactionType::Entry).count();
    let exits = feb.iter().filter(|t| t.kind == TransactionType::Exit).count();
    assert_eq!(entries + exits, feb.len());

    // Idempotent.
    assert_eq!(filter_by_month(&feb, Period::new(2024, 2)), feb);

    // Disjoint month is empty, not an error.
    assert!(filter_by_month(&set, Period::new(2023, 7)).is_empty());
}

#[test]
fn year_filter_spans_all_months_of_that_year() {
    let set = vec![
        txn("jan", 1.0, "2024-01-01", TransactionType::Exit, Category::Others),
        txn("dez", 2.0, "2024-12-31", TransactionType::Exit, Category::Others),
        txn("fora", 3.0, "2025-01-01", TransactionType::Exit, Category::Others),
    ];
    let year = filter_by_year(&set, 2024);
    assert_eq!(year.len(), 2);
    assert_eq!(year[0].description, "jan");
    assert_eq!(year[1].description, "dez");
}

#[test]
fn balance_identity_holds_for_any_set() {
    let set = vec![
        txn("a", 100.0, "2025-05-01", TransactionType::Entry, Category::Salary),
        txn("b", 30.0, "2025-05-02", TransactionType::Exit, Category::Food),
        txn("c", 20.0, "2025-05-03", TransactionType::Exit, Category::Bills),
    ];
    let identity = sum_by_type(&set, TransactionType::Entry) - sum_by_type(&set, TransactionType::Exit);
    assert!((balance(&set) - identity).abs() < 1e-9);
    assert_eq!(balance(&[]), 0.0);
    assert_eq!(sum_by_type(&[], TransactionType::Entry), 0.0);
}

#[test]
fn category_sum_over_uniform_input_collapses_to_one_entry() {
    assert!(sum_by_category(&[]).is_empty());

    let uniform = vec![
        txn("a", 10.0, "2025-05-01", TransactionType::Exit, Category::Food),
        txn("b", 15.0, "2025-05-02", TransactionType::Exit, Category::Food),
    ];
    let totals = sum_by_category(&uniform);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0], (Category::Food, 25.0));
}

#[test]
fn may_2025_scenario_matches_the_reference_numbers() {
    let set = vec![
        txn("Salário", 4847.70, "2025-05-05", TransactionType::Entry, Category::Salary),
        txn("iFood - Restaurante", 42.90, "2025-05-20", TransactionType::Exit, Category::Food),
    ];
    let may = filter_by_month(&set, Period::new(2025, 5));
    assert_eq!(may.len(), 2);
    let saldo = balance(&may);
    assert!((saldo - 4804.80).abs() < 1e-9);
    assert_eq!(format_brl(saldo), "4.804,80");
}

#[test]
fn six_month_series_ends_at_the_requested_period() {
    let set = vec![
        txn("Salário", 4847.70, "2025-05-05", TransactionType::Entry, Category::Salary),
        txn("iFood", 42.90, "2025-05-20", TransactionType::Exit, Category::Food),
        txn("Mercado", 250.0, "2025-03-10", TransactionType::Exit, Category::Food),
    ];
    let series = monthly_series(&set, Period::new(2025, 5), 6);
    assert_eq!(series.len(), 6);
    assert_eq!(series.first().unwrap().period, Period::new(2024, 12));
    assert_eq!(series.last().unwrap().period, Period::new(2025, 5));

    let march = &series[3];
    assert_eq!(march.period, Period::new(2025, 3));
    assert_eq!(march.exits, 250.0);
    assert_eq!(march.entries, 0.0);
    assert_eq!(march.balance, -250.0);
}

#[test]
fn expense_shares_ignore_entries_by_contract() {
    // Callers pass pre-filtered exit sets; a mixed set would count the
    // entry amount too, so the screen filters first.
    let exits = vec![
        txn("Aluguel", 800.0, "2025-05-01", TransactionType::Exit, Category::Rent),
        txn("iFood", 200.0, "2025-05-02", TransactionType::Exit, Category::Food),
    ];
    let shares = category_shares(&exits);
    assert_eq!(shares[0].category, Category::Rent);
    assert!((shares[0].share - 80.0).abs() < 1e-9);
    assert!((shares[1].share - 20.0).abs() < 1e-9);
}
