use spendlog_core::db::open_db_in_memory;
use spendlog_core::{
    CanonicalDate, ExpenseRepository, MonthFilter, NewExpense, SqliteExpenseRepository,
    SummaryQuery,
};

fn seed(repo: &SqliteExpenseRepository<'_>, amount: f64, day: &str, category: &str) {
    let mut expense = NewExpense::new(amount, CanonicalDate::parse(day).unwrap());
    expense.category = category.to_string();
    repo.insert_expense(&expense).unwrap();
}

#[test]
fn summary_of_empty_store_is_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::new(&conn);

    let report = repo.summarize(&SummaryQuery::default()).unwrap();
    assert_eq!(report.total, 0.0);
    assert!(report.by_category.is_none());
}

#[test]
fn grouped_subtotals_sum_to_total_and_sort_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::new(&conn);

    seed(&repo, 10.25, "2024-03-05", "food");
    seed(&repo, 5.5, "2024-03-09", "food");
    seed(&repo, 30.0, "2024-03-12", "travel");

    let query = SummaryQuery {
        group_by_category: true,
        ..SummaryQuery::default()
    };
    let report = repo.summarize(&query).unwrap();

    assert_eq!(report.total, 45.75);

    let by_category = report.by_category.unwrap();
    assert_eq!(by_category.len(), 2);
    assert_eq!(by_category[0].category, "travel");
    assert_eq!(by_category[0].total, 30.0);
    assert_eq!(by_category[1].category, "food");
    assert_eq!(by_category[1].total, 15.75);

    let subtotal_sum: f64 = by_category.iter().map(|row| row.total).sum();
    assert_eq!(subtotal_sum, report.total);
}

#[test]
fn month_filter_accepts_both_orders_and_selects_the_same_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::new(&conn);

    seed(&repo, 10.0, "2024-03-05", "food");
    seed(&repo, 2.5, "2024-03-20", "travel");
    seed(&repo, 99.0, "2024-04-01", "food");

    let year_first = SummaryQuery {
        month: Some(MonthFilter::parse("2024-03").unwrap()),
        ..SummaryQuery::default()
    };
    let month_first = SummaryQuery {
        month: Some(MonthFilter::parse("03-2024").unwrap()),
        ..SummaryQuery::default()
    };

    let report_a = repo.summarize(&year_first).unwrap();
    let report_b = repo.summarize(&month_first).unwrap();

    assert_eq!(report_a.total, 12.5);
    assert_eq!(report_a.total, report_b.total);
}

#[test]
fn month_filter_restricts_grouped_subtotals() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::new(&conn);

    seed(&repo, 10.0, "2024-03-05", "food");
    seed(&repo, 99.0, "2024-04-01", "food");
    seed(&repo, 30.0, "2024-03-12", "travel");

    let query = SummaryQuery {
        month: Some(MonthFilter::parse("2024-03").unwrap()),
        group_by_category: true,
    };
    let report = repo.summarize(&query).unwrap();

    assert_eq!(report.total, 40.0);

    let by_category = report.by_category.unwrap();
    assert_eq!(by_category[0].category, "travel");
    assert_eq!(by_category[0].total, 30.0);
    assert_eq!(by_category[1].category, "food");
    assert_eq!(by_category[1].total, 10.0);
}

#[test]
fn month_with_no_matching_rows_reports_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::new(&conn);

    seed(&repo, 10.0, "2024-03-05", "food");

    let query = SummaryQuery {
        month: Some(MonthFilter::parse("2024-05").unwrap()),
        group_by_category: true,
    };
    let report = repo.summarize(&query).unwrap();

    assert_eq!(report.total, 0.0);
    assert!(report.by_category.unwrap().is_empty());
}
