use {
    crate::{process_msg, AppError, AppResult},
    plinth_types::{Addr, BlockInfo, ContractEvent, Message, Storage},
};

/// How many submessages may chain off a single transaction message.
///
/// Contract A emits a message executing contract B, which emits one executing
/// contract C, and so on. Without a cap, two contracts calling each other in a
/// loop would recurse until the stack overflows, halting the chain.
const MAX_MESSAGE_DEPTH: usize = 30;

/// Recursively execute submessages emitted in a contract response, depth
/// first. A failed submessage fails the entire transaction, so there is no
/// need to buffer state changes per submessage.
///
/// Note: the `sender` here is the contract that emitted the submessages, not
/// the transaction's sender.
pub(crate) fn handle_submessages(
    storage: Box<dyn Storage>,
    block: BlockInfo,
    msg_depth: usize,
    sender: Addr,
    submsgs: Vec<Message>,
) -> AppResult<Vec<ContractEvent>> {
    if msg_depth > MAX_MESSAGE_DEPTH {
        return Err(AppError::ExceedMaxMessageDepth);
    }

    let mut events = vec![];

    for submsg in submsgs {
        events.extend(process_msg(
            storage.clone(),
            block,
            msg_depth + 1, // important: increase message depth
            sender,
            submsg,
        )?);
    }

    Ok(events)
}
