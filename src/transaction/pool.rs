use super::model::Transaction;

/// Pending transactions in submission order.
#[derive(Debug, Default)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn add(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    /// Take every pending transaction, leaving the pool empty.
    pub fn drain_all(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
