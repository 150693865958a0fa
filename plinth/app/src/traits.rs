use {
    crate::AppResult,
    plinth_types::{GenericResult, ImmutableCtx, Json, MutableCtx, Response, StdError},
};

// Trait aliases are unstable, so boxed closures are used instead:
// https://github.com/rust-lang/rust/issues/41517

pub type InstantiateFn<M = Json, E = StdError> = Box<dyn Fn(MutableCtx, M) -> Result<Response, E> + Send + Sync>;

pub type ExecuteFn<M = Json, E = StdError> = Box<dyn Fn(MutableCtx, M) -> Result<Response, E> + Send + Sync>;

pub type QueryFn<M = Json, E = StdError> = Box<dyn Fn(ImmutableCtx, M) -> Result<Json, E> + Send + Sync>;

/// Interface through which the app calls a contract, erasing the contract's
/// concrete message and error types.
///
/// The outer result is a host side failure, such as the requested function
/// not existing or the message failing to deserialize. The inner result is
/// the contract's own outcome, stringified.
pub trait Contract {
    fn instantiate(&self, ctx: MutableCtx, msg: Json) -> AppResult<GenericResult<Response>>;

    fn execute(&self, ctx: MutableCtx, msg: Json) -> AppResult<GenericResult<Response>>;

    fn query(&self, ctx: ImmutableCtx, msg: Json) -> AppResult<GenericResult<Json>>;
}
