use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type. Token IDs of any byte length are accepted.
pub type ContractTokenId = TokenIdVec;

/// Contract token amount type.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS-2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;
