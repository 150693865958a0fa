use {crate::market::AssetId, plinth::Addr};

/// Numerical identifier of a loan.
pub type LoanId = u64;

/// The loan ledger's configuration.
#[plinth::derive(Serde, Borsh)]
pub struct Config {
    /// The market contract whose assets this ledger lends against.
    pub market: Addr,
}

/// Where a loan stands in its lifecycle.
///
/// A cancelled loan has no state of its own: cancellation deletes the record,
/// leaving only the lender's refund credit behind.
#[plinth::derive(Serde, Borsh)]
#[derive(Copy)]
pub enum LoanState {
    /// Open for applications.
    New,
    /// A borrower has applied; awaiting the lender's decision.
    Pending,
    /// The lender approved; the asset changed hands and the principal was
    /// disbursed. Terminal.
    Approved,
}

/// A loan offer. Keyed by [`LoanId`] in the ledger's storage.
#[plinth::derive(Serde, Borsh)]
pub struct Loan {
    /// The asset the principal is offered against.
    pub asset_id: AssetId,
    /// The address that funded the loan.
    pub lender: Addr,
    /// The address that applied to use the loan. `None` until someone
    /// applies, and again after the lender declines.
    pub borrower: Option<Addr>,
    /// The escrowed principal. Fixed at creation; at least the asset's price
    /// at that time.
    pub amount: u128,
    pub state: LoanState,
}

impl Loan {
    pub fn new(asset_id: AssetId, lender: Addr, amount: u128) -> Self {
        Self {
            asset_id,
            lender,
            borrower: None,
            amount,
            state: LoanState::New,
        }
    }
}
