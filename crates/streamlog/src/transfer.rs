//! Fee transfer: the external value-transfer effect charged per submission.
//!
//! The logger calls [`FeeTransfer::transfer`] after validation and before
//! commit. A failed transfer aborts the submission with nothing committed.

use std::collections::HashMap;

use streamlog_core::Principal;
use thiserror::Error;

/// Failure of a fee transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("insufficient balance: {available} available, {required} required")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("crediting {amount} would overflow the recipient balance {balance}")]
    BalanceOverflow { balance: u64, amount: u64 },

    /// Rejected by the transfer backend with its own code.
    #[error("transfer rejected with code {0}")]
    Rejected(u32),
}

impl TransferError {
    /// Numeric code reported through `LogError::TransferFailed`.
    pub fn code(&self) -> u32 {
        match self {
            TransferError::InsufficientBalance { .. } => 1,
            TransferError::BalanceOverflow { .. } => 2,
            TransferError::Rejected(code) => *code,
        }
    }
}

/// Atomic value transfer from the caller to the fee recipient.
pub trait FeeTransfer {
    /// Move `amount` from `from` to `to`, either fully or not at all.
    fn transfer(&mut self, amount: u64, from: &Principal, to: &Principal) -> Result<(), TransferError>;
}

/// One completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub amount: u64,
    pub from: Principal,
    pub to: Principal,
}

/// In-memory fee ledger.
///
/// Records every completed transfer in order. An unmetered ledger accepts
/// every transfer; a metered ledger tracks balances and refuses overdrafts.
#[derive(Debug, Clone, Default)]
pub struct TransferLedger {
    records: Vec<TransferRecord>,
    balances: Option<HashMap<Principal, u64>>,
}

impl TransferLedger {
    /// An unmetered ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A metered ledger with the given opening balances. Unlisted
    /// principals start at zero.
    pub fn with_balances(balances: impl IntoIterator<Item = (Principal, u64)>) -> Self {
        Self {
            records: Vec::new(),
            balances: Some(balances.into_iter().collect()),
        }
    }

    /// Completed transfers, oldest first.
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.records
    }

    /// Balance of `who`, if the ledger is metered.
    pub fn balance_of(&self, who: &Principal) -> Option<u64> {
        self.balances
            .as_ref()
            .map(|b| b.get(who).copied().unwrap_or(0))
    }

    /// Sum of all transferred amounts, saturating at `u64::MAX`.
    pub fn total_transferred(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.amount))
    }
}

impl FeeTransfer for TransferLedger {
    fn transfer(&mut self, amount: u64, from: &Principal, to: &Principal) -> Result<(), TransferError> {
        if let Some(balances) = self.balances.as_mut() {
            let available = balances.get(from).copied().unwrap_or(0);
            if available < amount {
                return Err(TransferError::InsufficientBalance {
                    available,
                    required: amount,
                });
            }
            // Both new balances are computed before either is written.
            if from != to {
                let balance = balances.get(to).copied().unwrap_or(0);
                let credited = balance
                    .checked_add(amount)
                    .ok_or(TransferError::BalanceOverflow { balance, amount })?;
                balances.insert(from.clone(), available - amount);
                balances.insert(to.clone(), credited);
            }
        }

        self.records.push(TransferRecord {
            amount,
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }
}
