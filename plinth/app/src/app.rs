use {
    crate::{balance, do_instantiate, process_msg, process_query, AppError, ContractWrapper, Shared},
    anyhow::{anyhow, ensure},
    plinth_storage::{Item, Map},
    plinth_types::{
        Addr, Batch, BlockInfo, Buffer, Coins, Json, Query, QueryResponse, Storage, Timestamp, Tx,
        TxOutcome,
    },
    std::collections::BTreeMap,
};

pub(crate) const LAST_FINALIZED_BLOCK: Item<BlockInfo> = Item::new("lfb");

pub(crate) const CODES: Map<Addr, Vec<u8>> = Map::new("c");

pub(crate) const CONTRACT_NAMESPACE: &[u8] = b"w";

/// The sender address for genesis instantiations: the all-zero address.
///
/// Contract addresses are derived from the deployer and a salt, so with this
/// being a constant, addresses of genesis contracts can be predicted before
/// the chain is even started.
pub const GENESIS_SENDER: Addr = Addr::mock(0);

/// The block under which genesis messages are executed.
pub const GENESIS_BLOCK: BlockInfo = BlockInfo {
    height: 0,
    timestamp: Timestamp::from_seconds(0),
};

/// The initial state of the chain: token balances, and contracts to deploy,
/// in order.
#[derive(Debug, Clone)]
pub struct GenesisState {
    pub balances: BTreeMap<Addr, Coins>,
    pub contracts: Vec<GenesisContract>,
}

/// A contract to be deployed during genesis.
#[derive(Debug, Clone)]
pub struct GenesisContract {
    pub code: ContractWrapper,
    pub msg: Json,
    pub salt: Vec<u8>,
}

/// The application. Takes a storage backend as the type parameter.
///
/// Mirrors the ABCI-style lifecycle: blocks are first finalized, buffering
/// their state changes in memory, then committed, flushing the changes to the
/// storage backend.
pub struct App<S> {
    store: Option<S>,
    pending: Option<Batch>,
    current_block: Option<BlockInfo>,
}

impl<S> App<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Some(store),
            pending: None,
            current_block: None,
        }
    }

    fn take_store(&mut self) -> anyhow::Result<S> {
        self.store.take().ok_or(anyhow!("[App]: store not found"))
    }

    fn take_pending(&mut self) -> anyhow::Result<Batch> {
        self.pending
            .take()
            .ok_or(anyhow!("[App]: pending batch not found"))
    }

    fn take_current_block(&mut self) -> anyhow::Result<BlockInfo> {
        self.current_block
            .take()
            .ok_or(anyhow!("[App]: current block info not found"))
    }

    fn put_store(&mut self, store: S) -> anyhow::Result<()> {
        ensure!(self.store.is_none(), "[App]: store already exists");
        self.store = Some(store);
        Ok(())
    }

    fn put_pending(&mut self, pending: Batch) -> anyhow::Result<()> {
        ensure!(self.pending.is_none(), "[App]: pending batch already exists");
        self.pending = Some(pending);
        Ok(())
    }

    fn put_current_block(&mut self, current_block: BlockInfo) -> anyhow::Result<()> {
        ensure!(
            self.current_block.is_none(),
            "[App]: current block info already exists"
        );
        self.current_block = Some(current_block);
        Ok(())
    }
}

impl<S> App<S>
where
    S: Storage + Clone + 'static,
{
    pub fn init_chain(&mut self, genesis_state: GenesisState) -> anyhow::Result<()> {
        // We don't use a buffer here: if anything in the genesis state fails
        // to execute, that is a fatal error, and the chain must not start.
        let mut store = self.take_store()?;

        balance::initialize(&mut store, genesis_state.balances)?;

        // Clones of a `Shared` handed to each instantiation all write to the
        // same underlying store.
        let shared = Shared::new(store);

        for contract in genesis_state.contracts {
            do_instantiate(
                Box::new(shared.clone()),
                GENESIS_BLOCK,
                GENESIS_SENDER,
                contract.code,
                contract.msg,
                &contract.salt,
            )?;
        }

        let mut store = shared.into_inner();

        // Save the genesis block.
        LAST_FINALIZED_BLOCK.save(&mut store, &GENESIS_BLOCK)?;

        self.put_store(store)?;

        #[cfg(feature = "tracing")]
        tracing::info!("Completed genesis");

        Ok(())
    }

    pub fn finalize_block(
        &mut self,
        block: BlockInfo,
        txs: Vec<Tx>,
    ) -> anyhow::Result<Vec<TxOutcome>> {
        let store = self.take_store()?;
        let last_finalized_block = LAST_FINALIZED_BLOCK.load(&store)?;

        // The new block must directly follow the last finalized one.
        if block.height != last_finalized_block.height + 1 {
            self.put_store(store)?;
            return Err(AppError::IncorrectBlockHeight {
                expect: last_finalized_block.height + 1,
                actual: block.height,
            }
            .into());
        }

        // The buffer holds the writes of this block until `commit`. Carry over
        // the pending batch in case a previous block was finalized but, for
        // whatever reason, not committed.
        let cached = Shared::new(Buffer::new(store, self.pending.take()));

        let mut outcomes = Vec::with_capacity(txs.len());
        for tx in txs {
            outcomes.push(run_tx(cached.clone(), block, tx));
        }

        let (store, pending) = cached.into_inner().disassemble();

        self.put_store(store)?;
        self.put_pending(pending)?;
        self.put_current_block(block)?;

        #[cfg(feature = "tracing")]
        tracing::info!(height = block.height, "Finalized block");

        Ok(outcomes)
    }

    pub fn query(&mut self, req: Query) -> anyhow::Result<QueryResponse> {
        // Queries are served from the state of the last finalized block;
        // uncommitted changes of the current block are not visible.
        let store = self.take_store()?;
        let block = LAST_FINALIZED_BLOCK.load(&store)?;

        let shared = Shared::new(store);
        let res = process_query(Box::new(shared.clone()), block, req);

        self.put_store(shared.into_inner())?;

        res.map_err(Into::into)
    }

    pub fn commit(&mut self) -> anyhow::Result<()> {
        let mut store = self.take_store()?;
        let pending = self.take_pending()?;
        let current_block = self.take_current_block()?;

        // Apply the state changes accumulated while finalizing the block.
        store.flush(pending);

        // Update the last finalized block info.
        LAST_FINALIZED_BLOCK.save(&mut store, &current_block)?;

        self.put_store(store)?;

        #[cfg(feature = "tracing")]
        tracing::info!(height = current_block.height, "Committed state deltas");

        Ok(())
    }
}

fn run_tx<S>(store: S, block: BlockInfo, tx: Tx) -> TxOutcome
where
    S: Storage + Clone + 'static,
{
    // Buffer the state changes of this tx. They are only flushed to the
    // underlying store if every message succeeds.
    let buffer = Shared::new(Buffer::new(store, None));

    let mut events = vec![];

    for msg in tx.msgs {
        match process_msg(Box::new(buffer.clone()), block, 0, tx.sender, msg) {
            Ok(msg_events) => events.extend(msg_events),
            Err(err) => {
                // If any message fails, the entire tx fails. Dropping the
                // buffer discards the uncommitted changes. Events of the
                // earlier messages are still reported, for debugging.
                return TxOutcome {
                    result: Err(err.to_string()),
                    events,
                };
            },
        }
    }

    // All messages succeeded. Flush the buffered changes.
    buffer.into_inner().consume();

    TxOutcome {
        result: Ok(()),
        events,
    }
}

// ----------------------------------- tests -----------------------------------
