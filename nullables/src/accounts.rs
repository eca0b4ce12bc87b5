//! Deterministic principals for tests.

use wlt_types::Principal;

/// A fixed, indexed set of principals.
///
/// Index 0 is conventionally the owner/deployer, 1 a minter and 2 an
/// unprivileged user; the named accessors follow that convention.
pub struct TestAccounts {
    accounts: Vec<Principal>,
}

impl TestAccounts {
    /// Create `count` principals named `acct_0 .. acct_{count-1}`.
    pub fn new(count: usize) -> Self {
        Self {
            accounts: (0..count)
                .map(|i| Principal::new(format!("acct_{i}")))
                .collect(),
        }
    }

    /// Principal at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> Principal {
        self.accounts[index].clone()
    }

    pub fn owner(&self) -> Principal {
        self.get(0)
    }

    pub fn minter(&self) -> Principal {
        self.get(1)
    }

    pub fn other_user(&self) -> Principal {
        self.get(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounts_are_stable_and_distinct() {
        let a = TestAccounts::new(3);
        let b = TestAccounts::new(3);
        assert_eq!(a.owner(), b.owner());
        assert_ne!(a.owner(), a.minter());
        assert_ne!(a.minter(), a.other_user());
        assert_eq!(a.get(2).as_str(), "acct_2");
    }
}
