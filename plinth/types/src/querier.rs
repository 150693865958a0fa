use {
    crate::{Addr, Coin, Denom, Json, JsonDeExt, JsonSerExt, StdResult},
    serde::{de::DeserializeOwned, ser::Serialize},
};

/// The default number of records to return in a paginated query, if the
/// caller doesn't specify a limit.
pub const DEFAULT_PAGE_LIMIT: u32 = 30;

/// A query into app-wide state, answerable while a transaction is being
/// executed (reflecting that transaction's uncommitted writes) or at rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// How much of one token an account holds.
    Balance { address: Addr, denom: Denom },
    /// Call a contract's query entry point with the given message.
    WasmSmart { contract: Addr, msg: Json },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResponse {
    Balance(Coin),
    WasmSmart(Json),
}

impl QueryResponse {
    pub fn as_balance(self) -> Coin {
        match self {
            QueryResponse::Balance(coin) => coin,
            _ => panic!("QueryResponse is not Balance"),
        }
    }

    pub fn as_wasm_smart(self) -> Json {
        match self {
            QueryResponse::WasmSmart(json) => json,
            _ => panic!("QueryResponse is not WasmSmart"),
        }
    }
}

/// Something that can answer queries.
pub trait Querier {
    fn query_chain(&self, req: Query) -> StdResult<QueryResponse>;
}

/// A thin, copyable wrapper over a querier reference, so contexts holding it
/// stay copy-friendly.
#[derive(Clone, Copy)]
pub struct QuerierWrapper<'a> {
    inner: &'a dyn Querier,
}

impl<'a> QuerierWrapper<'a> {
    pub fn new(inner: &'a dyn Querier) -> Self {
        Self { inner }
    }
}

impl Querier for QuerierWrapper<'_> {
    fn query_chain(&self, req: Query) -> StdResult<QueryResponse> {
        self.inner.query_chain(req)
    }
}

/// Connects a single query request struct to the query message enum it folds
/// into and the response type it yields. Generated by the `QueryRequest`
/// derive for each variant of a query message.
pub trait QueryRequest: Sized {
    type Message: Serialize + From<Self>;
    type Response: DeserializeOwned;
}

/// Convenience methods built on top of [`Querier`].
pub trait QuerierExt: Querier {
    fn query_balance(&self, address: Addr, denom: Denom) -> StdResult<u128> {
        self.query_chain(Query::Balance { address, denom })
            .map(|res| res.as_balance().amount)
    }

    fn query_wasm_smart<R>(&self, contract: Addr, req: R) -> StdResult<R::Response>
    where
        R: QueryRequest,
    {
        let msg = R::Message::from(req).to_json_value()?;
        self.query_chain(Query::WasmSmart { contract, msg })?
            .as_wasm_smart()
            .deserialize_json()
    }
}

impl<Q> QuerierExt for Q where Q: Querier {}
