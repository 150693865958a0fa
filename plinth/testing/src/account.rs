use {
    plinth_app::GENESIS_SENDER,
    plinth_types::{Addr, Addressable},
    std::collections::HashMap,
};

pub type TestAccounts = HashMap<&'static str, TestAccount>;

pub struct TestAccount {
    pub address: Addr,
}

impl TestAccount {
    /// Derive a deterministic address from the account's name, so that tests
    /// are reproducible across runs.
    ///
    /// The salt is prefixed so that account addresses can't collide with those
    /// of genesis contracts, whose salts are chosen by the test author.
    pub fn new(name: &str) -> Self {
        let salt = format!("account/{name}");

        Self {
            address: Addr::derive(GENESIS_SENDER, salt.as_bytes()),
        }
    }
}

impl Addressable for TestAccount {
    fn address(&self) -> Addr {
        self.address
    }
}
