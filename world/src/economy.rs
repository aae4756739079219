//! Coin ledger.
//!
//! Credits come from kills, debits from tool purchases. A debit is all or
//! nothing: the caller validates the full purchase first and only then
//! spends, so a rejected purchase never touches the balance.

#[derive(Debug, Default)]
pub(crate) struct Economy {
    balance: u64,
    initial: u64,
}

impl Economy {
    pub(crate) fn new(initial: u64) -> Self {
        Self {
            balance: initial,
            initial,
        }
    }

    pub(crate) fn balance(&self) -> u64 {
        self.balance
    }

    pub(crate) fn can_afford(&self, cost: u64) -> bool {
        self.balance >= cost
    }

    /// Credits coins, returning the new balance.
    pub(crate) fn credit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    /// Debits coins the caller already validated, returning the new balance.
    pub(crate) fn debit(&mut self, amount: u64) -> u64 {
        debug_assert!(self.balance >= amount);
        self.balance = self.balance.saturating_sub(amount);
        self.balance
    }

    pub(crate) fn reset(&mut self) {
        self.balance = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use super::Economy;

    #[test]
    fn credit_and_debit_track_the_balance() {
        let mut economy = Economy::new(10);
        assert_eq!(economy.credit(5), 15);
        assert!(economy.can_afford(15));
        assert!(!economy.can_afford(16));
        assert_eq!(economy.debit(15), 0);
    }

    #[test]
    fn reset_restores_the_starting_balance() {
        let mut economy = Economy::new(10);
        let _ = economy.credit(90);
        economy.reset();
        assert_eq!(economy.balance(), 10);
    }
}
