use {
    crate::{AppError, AppResult, Contract, ExecuteFn, InstantiateFn, QueryFn},
    elsa::sync::FrozenVec,
    plinth_types::{
        Empty, GenericResult, GenericResultExt, ImmutableCtx, Json, JsonDeExt, MutableCtx,
        Response, StdError,
    },
    serde::de::DeserializeOwned,
    std::sync::OnceLock,
};

static CONTRACTS: OnceLock<FrozenVec<Box<dyn Contract + Send + Sync>>> = OnceLock::new();

pub(crate) fn get_contract_impl(
    wrapper: ContractWrapper,
) -> AppResult<&'static (dyn Contract + Send + Sync)> {
    CONTRACTS
        .get_or_init(Default::default)
        .get(wrapper.index)
        .ok_or_else(|| AppError::contract_not_found(wrapper.index))
}

// ---------------------------------- wrapper ----------------------------------

/// A handle referencing a contract in the global registry. Its byte encoding
/// is what gets stored on chain as the contract's code.
#[derive(Debug, Clone, Copy)]
pub struct ContractWrapper {
    index: usize,
}

impl ContractWrapper {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            index: usize::from_le_bytes(bytes.try_into().unwrap()),
        }
    }

    pub fn to_bytes(&self) -> [u8; usize::BITS as usize / 8] {
        self.index.to_le_bytes()
    }
}

// ---------------------------------- builder ----------------------------------

pub struct ContractBuilder<M1, E1, M2 = Empty, M3 = Empty, E2 = StdError, E3 = StdError> {
    instantiate_fn: InstantiateFn<M1, E1>,
    execute_fn: Option<ExecuteFn<M2, E2>>,
    query_fn: Option<QueryFn<M3, E3>>,
}

impl<M1, E1> ContractBuilder<M1, E1>
where
    M1: DeserializeOwned + 'static,
    E1: ToString + 'static,
{
    pub fn new(instantiate_fn: InstantiateFn<M1, E1>) -> Self {
        Self {
            instantiate_fn,
            execute_fn: None,
            query_fn: None,
        }
    }
}

impl<M1, E1, M2, M3, E2, E3> ContractBuilder<M1, E1, M2, M3, E2, E3>
where
    M1: DeserializeOwned + 'static,
    M2: DeserializeOwned + 'static,
    M3: DeserializeOwned + 'static,
    E1: ToString + 'static,
    E2: ToString + 'static,
    E3: ToString + 'static,
{
    pub fn with_execute<M2A, E2A>(
        self,
        execute_fn: ExecuteFn<M2A, E2A>,
    ) -> ContractBuilder<M1, E1, M2A, M3, E2A, E3>
    where
        M2A: DeserializeOwned + 'static,
        E2A: ToString + 'static,
    {
        ContractBuilder {
            instantiate_fn: self.instantiate_fn,
            execute_fn: Some(execute_fn),
            query_fn: self.query_fn,
        }
    }

    pub fn with_query<M3A, E3A>(
        self,
        query_fn: QueryFn<M3A, E3A>,
    ) -> ContractBuilder<M1, E1, M2, M3A, E2, E3A>
    where
        M3A: DeserializeOwned + 'static,
        E3A: ToString + 'static,
    {
        ContractBuilder {
            instantiate_fn: self.instantiate_fn,
            execute_fn: self.execute_fn,
            query_fn: Some(query_fn),
        }
    }

    pub fn build(self) -> ContractWrapper {
        let index = CONTRACTS
            .get_or_init(Default::default)
            .push_get_index(Box::new(ContractImpl {
                instantiate_fn: self.instantiate_fn,
                execute_fn: self.execute_fn,
                query_fn: self.query_fn,
            }));

        ContractWrapper { index }
    }
}

// ----------------------------------- impl ------------------------------------

struct ContractImpl<M1, M2, M3, E1, E2, E3> {
    instantiate_fn: InstantiateFn<M1, E1>,
    execute_fn: Option<ExecuteFn<M2, E2>>,
    query_fn: Option<QueryFn<M3, E3>>,
}

impl<M1, M2, M3, E1, E2, E3> Contract for ContractImpl<M1, M2, M3, E1, E2, E3>
where
    M1: DeserializeOwned,
    M2: DeserializeOwned,
    M3: DeserializeOwned,
    E1: ToString,
    E2: ToString,
    E3: ToString,
{
    fn instantiate(&self, ctx: MutableCtx, msg: Json) -> AppResult<GenericResult<Response>> {
        let msg = msg.deserialize_json()?;
        let res = (self.instantiate_fn)(ctx, msg);

        Ok(res.into_generic_result())
    }

    fn execute(&self, ctx: MutableCtx, msg: Json) -> AppResult<GenericResult<Response>> {
        let Some(execute_fn) = &self.execute_fn else {
            return Err(AppError::function_not_found("execute"));
        };

        let msg = msg.deserialize_json()?;
        let res = execute_fn(ctx, msg);

        Ok(res.into_generic_result())
    }

    fn query(&self, ctx: ImmutableCtx, msg: Json) -> AppResult<GenericResult<Json>> {
        let Some(query_fn) = &self.query_fn else {
            return Err(AppError::function_not_found("query"));
        };

        let msg = msg.deserialize_json()?;
        let res = query_fn(ctx, msg);

        Ok(res.into_generic_result())
    }
}

// ----------------------------------- tests -----------------------------------
