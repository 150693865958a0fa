use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// A struct with no fields. Its JSON form is `{}` and its Borsh form is zero
/// bytes, which makes it the natural filler wherever a value is required but
/// carries no information, such as the entries of a `Set`.
#[derive(
    Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Empty {}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{json, BorshSerExt, JsonSerExt},
    };

    #[test]
    fn encoding() {
        assert_eq!(Empty {}.to_json_value().unwrap(), json!({}));
        assert!(Empty {}.to_borsh_vec().unwrap().is_empty());
    }
}
