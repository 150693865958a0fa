use {
    crate::{lending::LoanId, market::AssetId},
    plinth::Addr,
};

/// A lender has funded a new loan offer.
#[plinth::derive(Serde)]
#[plinth::event("loan_created")]
pub struct LoanCreated {
    pub loan_id: LoanId,
    pub asset_id: AssetId,
    pub lender: Addr,
    pub amount: u128,
}

/// A borrower has applied for a loan.
#[plinth::derive(Serde)]
#[plinth::event("loan_requested")]
pub struct LoanRequested {
    pub loan_id: LoanId,
    pub borrower: Addr,
}

/// The lender approved a pending application.
#[plinth::derive(Serde)]
#[plinth::event("loan_approved")]
pub struct LoanApproved {
    pub loan_id: LoanId,
    pub asset_id: AssetId,
    pub lender: Addr,
    pub borrower: Addr,
    pub amount: u128,
}

/// The lender turned down a pending application.
#[plinth::derive(Serde)]
#[plinth::event("loan_declined")]
pub struct LoanDeclined {
    pub loan_id: LoanId,
    pub borrower: Addr,
}

/// The lender withdrew a loan offer. The principal is now claimable through
/// the refund ledger.
#[plinth::derive(Serde)]
#[plinth::event("loan_cancelled")]
pub struct LoanCancelled {
    pub loan_id: LoanId,
    pub lender: Addr,
    pub amount: u128,
}

/// An address was paid out its accumulated refund balance.
#[plinth::derive(Serde)]
#[plinth::event("refund_withdrawn")]
pub struct RefundWithdrawn {
    pub address: Addr,
    pub amount: u128,
}
