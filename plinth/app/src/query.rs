use {
    crate::{
        balance::BALANCES, get_contract_impl, AppError, AppResult, ContractWrapper,
        QuerierProvider, StorageProvider, CODES, CONTRACT_NAMESPACE,
    },
    plinth_types::{
        Addr, BlockInfo, Coin, Denom, ImmutableCtx, Json, QuerierWrapper, Query, QueryResponse,
        Storage,
    },
};

/// Route a query to its handler. Queries never mutate state, so unlike with
/// messages there is no buffering involved.
pub(crate) fn process_query(
    storage: Box<dyn Storage>,
    block: BlockInfo,
    req: Query,
) -> AppResult<QueryResponse> {
    match req {
        Query::Balance { address, denom } => {
            let res = query_balance(&storage, address, denom)?;
            Ok(QueryResponse::Balance(res))
        },
        Query::WasmSmart { contract, msg } => {
            let res = query_wasm_smart(storage, block, contract, msg)?;
            Ok(QueryResponse::WasmSmart(res))
        },
    }
}

fn query_balance(storage: &dyn Storage, address: Addr, denom: Denom) -> AppResult<Coin> {
    let amount = BALANCES.may_load(storage, (address, &denom))?.unwrap_or(0);

    Ok(Coin { denom, amount })
}

fn query_wasm_smart(
    storage: Box<dyn Storage>,
    block: BlockInfo,
    contract: Addr,
    msg: Json,
) -> AppResult<Json> {
    let code = CODES.load(&storage, contract)?;
    let contract_impl = get_contract_impl(ContractWrapper::from_bytes(&code))?;

    let querier = QuerierProvider::new(storage.clone(), block);
    let substore = StorageProvider::new(storage, &[CONTRACT_NAMESPACE, contract.as_ref()]);
    let ctx = ImmutableCtx {
        storage: &substore,
        block,
        contract,
        querier: QuerierWrapper::new(&querier),
    };

    contract_impl
        .query(ctx, msg)?
        .map_err(|msg| AppError::guest(contract, "query", msg))
}
