use {
    crate::{TxError, TxOutcome, TxSuccess},
    std::fmt::{Debug, Display},
};

/// Result with the error type erased to a string.
///
/// Contract calls resolve to this, so that the host doesn't need to know the
/// contract's concrete error type.
pub type GenericResult<T> = Result<T, String>;

/// Conversion into a [`GenericResult`] by stringifying the error.
pub trait GenericResultExt<T> {
    fn into_generic_result(self) -> GenericResult<T>;
}

impl<T, E> GenericResultExt<T> for Result<T, E>
where
    E: ToString,
{
    fn into_generic_result(self) -> GenericResult<T> {
        self.map_err(|err| err.to_string())
    }
}

/// Assertion helpers for result types, for use in tests.
pub trait ResultExt: Sized {
    type Success;
    type Error;

    /// The result must be ok. Returns the value.
    fn should_succeed(self) -> Self::Success;

    /// The result must be an error. Returns the error.
    fn should_fail(self) -> Self::Error;

    /// The result must be ok, with a value satisfying the predicate.
    fn should_succeed_and<F>(self, predicate: F) -> Self::Success
    where
        Self::Success: Debug,
        F: FnOnce(&Self::Success) -> bool,
    {
        let value = self.should_succeed();
        assert!(
            predicate(&value),
            "value does not satisfy the predicate: {value:?}"
        );

        value
    }

    /// The result must be ok, with a value equal to the expected one.
    fn should_succeed_and_equal<U>(self, expect: U) -> Self::Success
    where
        Self::Success: Debug + PartialEq<U>,
        U: Debug,
    {
        let value = self.should_succeed();
        assert_eq!(value, expect);

        value
    }

    /// The result must be an error whose message contains the expected string.
    fn should_fail_with_error<U>(self, expect: U) -> Self::Error
    where
        Self::Error: Display,
        U: Display,
    {
        let error = self.should_fail();
        let (error_str, expect_str) = (error.to_string(), expect.to_string());
        assert!(
            error_str.contains(&expect_str),
            "wrong error: expecting `{expect_str}`, got `{error_str}`"
        );

        error
    }
}

impl<T, E> ResultExt for Result<T, E>
where
    T: Debug,
    E: Display,
{
    type Error = E;
    type Success = T;

    fn should_succeed(self) -> Self::Success {
        self.unwrap_or_else(|err| panic!("expecting ok, got error: {err}"))
    }

    fn should_fail(self) -> Self::Error {
        match self {
            Err(err) => err,
            Ok(value) => panic!("expecting error, got ok: {value:?}"),
        }
    }
}

impl ResultExt for TxOutcome {
    type Error = TxError;
    type Success = TxSuccess;

    fn should_succeed(self) -> TxSuccess {
        match self.result {
            Ok(()) => TxSuccess {
                events: self.events,
            },
            Err(err) => panic!("expecting tx to succeed, got error: {err}"),
        }
    }

    fn should_fail(self) -> TxError {
        match self.result {
            Err(error) => TxError {
                error,
                events: self.events,
            },
            Ok(()) => panic!("expecting tx to fail, got success"),
        }
    }
}
