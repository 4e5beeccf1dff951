use std::collections::HashSet;

use crate::{
    domain::{
        transaction::check_amount, Amounted, Displayable, Identifiable, NewTransaction,
        Transaction, TransactionId,
    },
    errors::{LedgerError, StorageError},
    storage::PersistenceAdapter,
};

use super::events::{EventBus, LedgerEvent, SubscriptionId};

/// Ordered transaction collection, newest insertion first, written through
/// to the persistence adapter after every mutation.
pub struct Ledger {
    transactions: Vec<Transaction>,
    adapter: PersistenceAdapter,
    events: EventBus,
}

impl Ledger {
    /// Creates an empty ledger; call [`Ledger::load`] to read saved data.
    pub fn new(adapter: PersistenceAdapter) -> Self {
        Self {
            transactions: Vec::new(),
            adapter,
            events: EventBus::new(),
        }
    }

    /// Replaces the in-memory list with the stored one.
    ///
    /// Missing, unreadable or malformed data yields an empty ledger. Records
    /// that repeat an earlier id or carry an amount `add` would reject are
    /// skipped.
    pub fn load(&mut self) -> usize {
        let stored = match self.adapter.read_transactions() {
            Ok(Some(list)) => list,
            Ok(None) => {
                tracing::debug!("no saved transactions");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "saved transactions unreadable, starting empty");
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(stored.len());
        for txn in stored {
            if let Err(reason) = check_amount(txn.amount()) {
                tracing::warn!(
                    id = %txn.id,
                    amount = %txn.amount,
                    %reason,
                    "skipping record with invalid amount"
                );
                continue;
            }
            if !seen.insert(txn.id.clone()) {
                tracing::warn!(id = %txn.id, "skipping record with duplicate id");
                continue;
            }
            kept.push(txn);
        }

        self.transactions = kept;
        let count = self.transactions.len();
        tracing::info!(count, "ledger loaded");
        self.events.publish(&LedgerEvent::Loaded { count });
        count
    }

    /// Validates and records a new transaction at the front of the list.
    pub fn add(&mut self, input: NewTransaction) -> Result<Transaction, LedgerError> {
        let input = input.validated()?;
        let mut transaction = Transaction::new(input);
        while self.contains(&transaction.id) {
            transaction.id = TransactionId::generate();
        }

        self.transactions.insert(0, transaction.clone());
        if let Err(err) = self.persist() {
            self.transactions.remove(0);
            return Err(err.into());
        }

        tracing::debug!(
            id = %transaction.id,
            label = %transaction.display_label(),
            "transaction added"
        );
        self.events.publish(&LedgerEvent::Added(transaction.clone()));
        Ok(transaction)
    }

    /// Removes the transaction with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let Some(index) = position_of(&self.transactions, id) else {
            tracing::debug!(%id, "delete ignored, id not present");
            return Ok(None);
        };

        let removed = self.transactions.remove(index);
        if let Err(err) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(err.into());
        }

        tracing::debug!(%id, "transaction deleted");
        self.events.publish(&LedgerEvent::Deleted(removed.clone()));
        Ok(Some(removed))
    }

    /// Empties the ledger and the stored list; returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, LedgerError> {
        let previous = std::mem::take(&mut self.transactions);
        if let Err(err) = self.persist() {
            self.transactions = previous;
            return Err(err.into());
        }

        let removed = previous.len();
        tracing::debug!(removed, "ledger cleared");
        self.events.publish(&LedgerEvent::Cleared { removed });
        Ok(removed)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Owned copy of the current list.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        position_of(&self.transactions, id).map(|index| &self.transactions[index])
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn adapter(&self) -> &PersistenceAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut PersistenceAdapter {
        &mut self.adapter
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&LedgerEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.adapter
            .write_transactions(&self.transactions)
            .inspect_err(|err| tracing::error!(error = %err, "failed to save transactions"))
    }
}

fn position_of<T: Identifiable>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions.len())
            .field("events", &self.events)
            .finish()
    }
}
