use {
    crate::{
        balance, get_contract_impl, handle_submessages, AppError, AppResult, ContractWrapper,
        QuerierProvider, StorageProvider, CODES, CONTRACT_NAMESPACE,
    },
    plinth_types::{
        json, Addr, BlockInfo, Coins, ContractEvent, Json, Message, MutableCtx, QuerierWrapper,
        StdResult, Storage,
    },
};

/// Process a single message, either from a transaction or emitted by a
/// contract as a submessage. Return the events emitted along the way.
pub(crate) fn process_msg(
    storage: Box<dyn Storage>,
    block: BlockInfo,
    msg_depth: usize,
    sender: Addr,
    msg: Message,
) -> AppResult<Vec<ContractEvent>> {
    match msg {
        Message::Transfer { to, coins } => do_transfer(storage, sender, to, coins),
        Message::Execute {
            contract,
            msg,
            funds,
        } => do_execute(storage, block, msg_depth, sender, contract, msg, funds),
    }
}

// ---------------------------------- transfer ---------------------------------

fn do_transfer(
    storage: Box<dyn Storage>,
    from: Addr,
    to: Addr,
    coins: Coins,
) -> AppResult<Vec<ContractEvent>> {
    match _do_transfer(storage, from, to, &coins) {
        Ok(events) => {
            #[cfg(feature = "tracing")]
            tracing::info!(
                from = from.to_string(),
                to = to.to_string(),
                coins = coins.to_string(),
                "Transferred coins"
            );

            Ok(events)
        },
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(err = err.to_string(), "Failed to transfer coins");

            Err(err)
        },
    }
}

fn _do_transfer(
    mut storage: Box<dyn Storage>,
    from: Addr,
    to: Addr,
    coins: &Coins,
) -> AppResult<Vec<ContractEvent>> {
    balance::transfer_coins(&mut storage, from, to, coins)?;

    Ok(vec![new_transfer_event(from, to, coins)?])
}

fn new_transfer_event(from: Addr, to: Addr, coins: &Coins) -> StdResult<ContractEvent> {
    ContractEvent::new("transfer", &json!({
        "from": from,
        "to": to,
        "coins": coins,
    }))
}

// ---------------------------------- execute ----------------------------------

fn do_execute(
    storage: Box<dyn Storage>,
    block: BlockInfo,
    msg_depth: usize,
    sender: Addr,
    contract: Addr,
    msg: Json,
    funds: Coins,
) -> AppResult<Vec<ContractEvent>> {
    match _do_execute(storage, block, msg_depth, sender, contract, msg, funds) {
        Ok(events) => {
            #[cfg(feature = "tracing")]
            tracing::info!(contract = contract.to_string(), "Executed contract");

            Ok(events)
        },
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(err = err.to_string(), "Failed to execute contract");

            Err(err)
        },
    }
}

fn _do_execute(
    mut storage: Box<dyn Storage>,
    block: BlockInfo,
    msg_depth: usize,
    sender: Addr,
    contract: Addr,
    msg: Json,
    funds: Coins,
) -> AppResult<Vec<ContractEvent>> {
    let code = CODES.load(&storage, contract)?;
    let contract_impl = get_contract_impl(ContractWrapper::from_bytes(&code))?;

    // Transfer the funds from the sender to the contract before the call, so
    // that the contract sees the updated balances.
    if !funds.is_empty() {
        balance::transfer_coins(&mut storage, sender, contract, &funds)?;
    }

    let querier = QuerierProvider::new(storage.clone(), block);
    let mut substore =
        StorageProvider::new(storage.clone(), &[CONTRACT_NAMESPACE, contract.as_ref()]);
    let ctx = MutableCtx {
        storage: &mut substore,
        block,
        contract,
        sender,
        funds,
        querier: QuerierWrapper::new(&querier),
    };

    let response = contract_impl
        .execute(ctx, msg)?
        .map_err(|msg| AppError::guest(contract, "execute", msg))?;

    let mut events = response.events;
    events.extend(handle_submessages(
        storage,
        block,
        msg_depth,
        contract,
        response.submsgs,
    )?);

    Ok(events)
}

// -------------------------------- instantiate --------------------------------

pub(crate) fn do_instantiate(
    storage: Box<dyn Storage>,
    block: BlockInfo,
    sender: Addr,
    code: ContractWrapper,
    msg: Json,
    salt: &[u8],
) -> AppResult<(Vec<ContractEvent>, Addr)> {
    match _do_instantiate(storage, block, sender, code, msg, salt) {
        Ok((events, address)) => {
            #[cfg(feature = "tracing")]
            tracing::info!(address = address.to_string(), "Instantiated contract");

            Ok((events, address))
        },
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(err = err.to_string(), "Failed to instantiate contract");

            Err(err)
        },
    }
}

fn _do_instantiate(
    mut storage: Box<dyn Storage>,
    block: BlockInfo,
    sender: Addr,
    code: ContractWrapper,
    msg: Json,
    salt: &[u8],
) -> AppResult<(Vec<ContractEvent>, Addr)> {
    let address = Addr::derive(sender, salt);

    if CODES.has(&storage, address) {
        return Err(AppError::contract_exists(address));
    }

    CODES.save(&mut storage, address, &code.to_bytes().to_vec())?;

    let contract_impl = get_contract_impl(code)?;

    let querier = QuerierProvider::new(storage.clone(), block);
    let mut substore =
        StorageProvider::new(storage.clone(), &[CONTRACT_NAMESPACE, address.as_ref()]);
    let ctx = MutableCtx {
        storage: &mut substore,
        block,
        contract: address,
        sender,
        funds: Coins::new(),
        querier: QuerierWrapper::new(&querier),
    };

    let response = contract_impl
        .instantiate(ctx, msg)?
        .map_err(|msg| AppError::guest(address, "instantiate", msg))?;

    let mut events = response.events;
    events.extend(handle_submessages(
        storage,
        block,
        0,
        address,
        response.submsgs,
    )?);

    Ok((events, address))
}
