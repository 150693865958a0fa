pub use {
    plinth_app::*, plinth_macros::*, plinth_storage::*, plinth_testing::*, plinth_types::*,
};

/// Dependencies of the procedural macros. Re-exported here so that users do
/// not have to add them to their own manifests.
#[doc(hidden)]
pub mod __private {
    pub use {::borsh, ::serde, ::serde_with};
}
