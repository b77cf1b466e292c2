use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::transactions::{Transaction, TransactionType};

/// Read-only snapshot over a validated transaction set.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    income: Vec<Transaction>,
    expenses: Vec<Transaction>,
}

impl Analyzer {
    /// Splits the set by type. Both views keep the input order.
    pub fn new(transactions: Vec<Transaction>) -> Analyzer {
        let (income, expenses) = transactions.into_iter().partition(Transaction::is_income);

        Analyzer { income, expenses }
    }

    pub fn income(&self) -> &[Transaction] {
        &self.income
    }

    pub fn expenses(&self) -> &[Transaction] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn subset(&self, type_: TransactionType) -> &[Transaction] {
        match type_ {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expenses,
        }
    }

    /// Saturates at `Decimal::MAX`. Sets coming out of `parse` never reach it.
    pub fn total(&self, type_: TransactionType) -> Decimal {
        self.subset(type_)
            .iter()
            .fold(Decimal::ZERO, |total, transaction| total.saturating_add(transaction.amount()))
    }

    pub fn total_balance(&self) -> Decimal {
        self.total(TransactionType::Income)
            .saturating_sub(self.total(TransactionType::Expense))
    }

    /// Categories without a transaction of the given type are left out.
    pub fn category_breakdown(&self, type_: TransactionType) -> BTreeMap<String, Decimal> {
        let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
        for transaction in self.subset(type_) {
            let total = breakdown
                .entry(transaction.category().clone())
                .or_insert(Decimal::ZERO);
            *total = total.saturating_add(transaction.amount());
        }

        breakdown
    }

    /// The first expense with the highest amount wins a tie.
    pub fn most_expensive_transaction(&self) -> Option<&Transaction> {
        self.expenses.iter().reduce(|most, transaction| {
            if transaction.amount() > most.amount() {
                transaction
            } else {
                most
            }
        })
    }
}
