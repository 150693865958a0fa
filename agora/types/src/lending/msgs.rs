use {
    crate::{
        lending::{Config, Loan, LoanId},
        market::AssetId,
    },
    plinth::Addr,
    std::collections::BTreeMap,
};

#[plinth::derive(Serde)]
pub struct InstantiateMsg {
    pub market: Addr,
}

#[plinth::derive(Serde)]
pub enum ExecuteMsg {
    /// Fund a new loan offer against a for-sale asset.
    ///
    /// The attached funds become the escrowed principal, and must cover at
    /// least the asset's price.
    Create { asset_id: AssetId },
    /// Apply to buy the asset using the given loan.
    ///
    /// The loan must be open, with no other application in flight.
    Apply { loan_id: LoanId },
    /// Approve a pending application. The asset moves to the borrower and
    /// the principal to the seller, in this same transaction.
    ///
    /// Sender must be the lender.
    Approve { loan_id: LoanId },
    /// Turn down a pending application, reopening the loan for others.
    ///
    /// Sender must be the lender.
    Decline { loan_id: LoanId },
    /// Withdraw a loan offer, crediting the principal to the sender's
    /// refund balance.
    ///
    /// Sender must be the lender.
    Cancel { loan_id: LoanId },
    /// Pay out the sender's entire refund balance.
    WithdrawRefund {},
}

#[plinth::derive(Serde, QueryRequest)]
pub enum QueryMsg {
    /// Query the ledger's configuration.
    #[returns(Config)]
    Config {},
    /// Query a single loan by ID.
    #[returns(Loan)]
    Loan { loan_id: LoanId },
    /// Enumerate all open loans.
    #[returns(BTreeMap<LoanId, Loan>)]
    Loans {
        start_after: Option<LoanId>,
        limit: Option<u32>,
    },
    /// Enumerate open loans offered against the given asset.
    #[returns(BTreeMap<LoanId, Loan>)]
    LoansByAsset {
        asset_id: AssetId,
        start_after: Option<LoanId>,
        limit: Option<u32>,
    },
    /// Query the loans the given user participates in, on either side.
    #[returns(LoansByUserResponse)]
    LoansByUser { user: Addr },
    /// Query the amount withdrawable by the given address from cancelled
    /// loans.
    #[returns(u128)]
    Refund { address: Addr },
}

/// Response type of the `QueryMsg::LoansByUser` query.
#[plinth::derive(Serde)]
pub struct LoansByUserResponse {
    /// Loans the user has applied for.
    pub borrowed: BTreeMap<LoanId, Loan>,
    /// Loans the user has funded.
    pub lent: BTreeMap<LoanId, Loan>,
}
