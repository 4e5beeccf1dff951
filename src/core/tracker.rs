//! Application entry point tying the ledger, filter and preferences together.

use rust_decimal::Decimal;

use crate::{
    config::{Config, Theme},
    currency::CurrencyFormatter,
    domain::{
        MonthKey, NewTransaction, Transaction, TransactionForm, TransactionId, TransactionKind,
    },
    errors::{LedgerError, StorageError},
    ledger::{Ledger, LedgerEvent, SubscriptionId},
    storage::{KeyValueStore, PersistenceAdapter},
};

use super::{
    filter::{FilterPatch, FilterState, Selector},
    services::{CategoryTotal, MonthlyStats, SummaryService, Totals},
};

/// One tracker instance per process, built with [`Tracker::open`].
#[derive(Debug)]
pub struct Tracker {
    ledger: Ledger,
    filter: FilterState,
    theme: Theme,
    formatter: CurrencyFormatter,
}

impl Tracker {
    /// Wraps `store`, loads saved transactions and the theme preference.
    pub fn open(store: Box<dyn KeyValueStore>, config: Config) -> Self {
        let adapter = PersistenceAdapter::new(store, config.storage);
        let theme = adapter.read_theme();
        let mut ledger = Ledger::new(adapter);
        ledger.load();
        tracing::debug!(%theme, currency = %config.currency, "tracker ready");
        Self {
            ledger,
            filter: FilterState::new(),
            theme,
            formatter: CurrencyFormatter::new(config.locale, config.currency),
        }
    }

    /// Re-reads the store, discarding in-memory state.
    pub fn reload(&mut self) -> usize {
        self.theme = self.ledger.adapter().read_theme();
        self.ledger.load()
    }

    pub fn add_transaction(&mut self, input: NewTransaction) -> Result<Transaction, LedgerError> {
        self.ledger.add(input)
    }

    /// Parses raw form fields, then records the result.
    pub fn submit_form(&mut self, form: &TransactionForm) -> Result<Transaction, LedgerError> {
        let input = form.parse()?;
        self.ledger.add(input)
    }

    pub fn delete_transaction(
        &mut self,
        id: &TransactionId,
    ) -> Result<Option<Transaction>, LedgerError> {
        self.ledger.delete(id)
    }

    pub fn clear_all(&mut self) -> Result<usize, LedgerError> {
        self.ledger.clear()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Totals over the whole ledger; the filter does not apply.
    pub fn totals(&self) -> Totals {
        SummaryService::totals(self.ledger.transactions())
    }

    pub fn monthly_stats(&self, month: &Selector<MonthKey>) -> MonthlyStats {
        SummaryService::monthly_stats(self.ledger.transactions(), month)
    }

    /// Stats for the month currently selected in the filter.
    pub fn current_month_stats(&self) -> MonthlyStats {
        self.monthly_stats(&self.filter.month)
    }

    /// The list view: type and category selectors applied, ledger order kept.
    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        self.filter.apply(self.ledger.transactions())
    }

    pub fn observed_months(&self) -> Vec<MonthKey> {
        SummaryService::observed_months(self.ledger.transactions())
    }

    pub fn category_breakdown(&self, kind: TransactionKind) -> Vec<CategoryTotal> {
        SummaryService::category_breakdown(self.ledger.transactions(), kind)
    }

    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filter.update(patch);
        tracing::debug!(filter = ?self.filter, "filter updated");
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn reset_filter(&mut self) {
        self.filter.reset();
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Stores `theme`; the in-memory value only changes once the write succeeds.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.ledger.adapter_mut().write_theme(theme)?;
        self.theme = theme;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&LedgerEvent) + 'static,
    {
        self.ledger.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.ledger.unsubscribe(id)
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    /// `amount` in the configured currency and locale.
    pub fn format_amount(&self, amount: Decimal) -> String {
        self.formatter.format(amount)
    }
}
