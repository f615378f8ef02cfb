use super::*;

/// A token on a CIS-2 contract: the pair of contract address and token ID.
#[derive(Debug, Serialize, SchemaType, Hash, PartialEq, Eq, Clone)]
pub struct Token {
    pub contract: ContractAddress,
    pub id: ContractTokenId,
}
