//! Derived views computed from a ledger snapshot.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::filter::Selector;
use crate::domain::{Category, MonthKey, Transaction, TransactionKind};

/// Income, expense and balance over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

impl Totals {
    fn from_parts(income: Decimal, expenses: Decimal) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

/// Statistics for the monthly summary panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    pub count: usize,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals<'a, I>(transactions: I) -> Totals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expenses) = transactions.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), txn| match txn.kind {
                TransactionKind::Income => (income + txn.amount, expenses),
                TransactionKind::Expense => (income, expenses + txn.amount),
            },
        );
        Totals::from_parts(income, expenses)
    }

    /// Stats over the whole set for `Selector::All`, else over one calendar month.
    pub fn monthly_stats(transactions: &[Transaction], month: &Selector<MonthKey>) -> MonthlyStats {
        let in_month: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| match month {
                Selector::All => true,
                Selector::Only(key) => key.contains(txn.date),
            })
            .collect();
        let totals = Self::totals(in_month.iter().copied());
        MonthlyStats {
            count: in_month.len(),
            income: totals.income,
            expenses: totals.expenses,
            net: totals.balance,
        }
    }

    /// Distinct months present among transaction dates, most recent first.
    pub fn observed_months(transactions: &[Transaction]) -> Vec<MonthKey> {
        let months: BTreeSet<MonthKey> = transactions
            .iter()
            .map(|txn| MonthKey::of(txn.date))
            .collect();
        months.into_iter().rev().collect()
    }

    /// Per-category sums for one direction, largest first; ties keep label order.
    pub fn category_breakdown(
        transactions: &[Transaction],
        kind: TransactionKind,
    ) -> Vec<CategoryTotal> {
        let mut sums: HashMap<&Category, (Decimal, usize)> = HashMap::new();
        for txn in transactions.iter().filter(|txn| txn.kind == kind) {
            let entry = sums.entry(&txn.category).or_insert((Decimal::ZERO, 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }
        let mut breakdown: Vec<CategoryTotal> = sums
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.clone(),
                total,
                count,
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTransaction;
    use chrono::NaiveDate;

    fn txn(amount: i64, kind: TransactionKind, category: Category, y: i32, m: u32) -> Transaction {
        Transaction::new(NewTransaction::new(
            "entry",
            Decimal::new(amount, 0),
            kind,
            category,
            NaiveDate::from_ymd_opt(y, m, 15).unwrap(),
        ))
    }

    #[test]
    fn totals_of_empty_set_are_zero() {
        assert_eq!(SummaryService::totals(&Vec::<Transaction>::new()), Totals::default());
    }

    #[test]
    fn totals_split_by_direction() {
        let list = vec![
            txn(100, TransactionKind::Income, Category::Salary, 2024, 1),
            txn(40, TransactionKind::Expense, Category::Food, 2024, 1),
        ];
        let totals = SummaryService::totals(&list);
        assert_eq!(totals.income, Decimal::new(100, 0));
        assert_eq!(totals.expenses, Decimal::new(40, 0));
        assert_eq!(totals.balance, Decimal::new(60, 0));
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        let list: Vec<Transaction> = (0..10)
            .map(|_| {
                Transaction::new(NewTransaction::new(
                    "dime",
                    Decimal::new(1, 1),
                    TransactionKind::Income,
                    Category::Other,
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                ))
            })
            .collect();
        assert_eq!(SummaryService::totals(&list).income, Decimal::ONE);
    }

    #[test]
    fn monthly_stats_for_all_matches_totals() {
        let list = vec![
            txn(500, TransactionKind::Income, Category::Salary, 2024, 2),
            txn(120, TransactionKind::Expense, Category::Rent, 2024, 3),
            txn(30, TransactionKind::Expense, Category::Food, 2023, 12),
        ];
        let stats = SummaryService::monthly_stats(&list, &Selector::All);
        let totals = SummaryService::totals(&list);
        assert_eq!(stats.count, list.len());
        assert_eq!(stats.income, totals.income);
        assert_eq!(stats.expenses, totals.expenses);
        assert_eq!(stats.net, totals.balance);
    }

    #[test]
    fn monthly_stats_restricts_to_calendar_month() {
        let list = vec![
            txn(500, TransactionKind::Income, Category::Salary, 2024, 3),
            txn(120, TransactionKind::Expense, Category::Rent, 2024, 3),
            txn(30, TransactionKind::Expense, Category::Food, 2023, 3),
        ];
        let march = Selector::Only(MonthKey::new(2024, 3).unwrap());
        let stats = SummaryService::monthly_stats(&list, &march);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.net, Decimal::new(380, 0));

        let empty = Selector::Only(MonthKey::new(2020, 1).unwrap());
        assert_eq!(
            SummaryService::monthly_stats(&list, &empty),
            MonthlyStats::default()
        );
    }

    #[test]
    fn observed_months_are_distinct_and_descending() {
        let list = vec![
            txn(1, TransactionKind::Income, Category::Other, 2023, 12),
            txn(1, TransactionKind::Income, Category::Other, 2024, 2),
            txn(1, TransactionKind::Income, Category::Other, 2024, 2),
            txn(1, TransactionKind::Income, Category::Other, 2024, 1),
        ];
        let months: Vec<String> = SummaryService::observed_months(&list)
            .into_iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2024-02", "2024-01", "2023-12"]);
    }

    #[test]
    fn category_breakdown_orders_by_total() {
        let list = vec![
            txn(20, TransactionKind::Expense, Category::Food, 2024, 1),
            txn(900, TransactionKind::Expense, Category::Rent, 2024, 1),
            txn(35, TransactionKind::Expense, Category::Food, 2024, 1),
            txn(3000, TransactionKind::Income, Category::Salary, 2024, 1),
        ];
        let breakdown = SummaryService::category_breakdown(&list, TransactionKind::Expense);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, Category::Rent);
        assert_eq!(breakdown[1].total, Decimal::new(55, 0));
        assert_eq!(breakdown[1].count, 2);
    }
}
