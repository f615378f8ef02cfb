use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Token is not listed for sale (Error code: -4).
    TokenNotListedForSale,
    /// Token is already listed for sale (Error code: -5).
    TokenAlreadyListedForSale,
    /// Token was received from a contract other than the configured
    /// collection (Error code: -6).
    UnknownCollection,
    /// Only account addresses can perform this action (Error code: -7).
    OnlyAccountAddress,
    /// This function must only be called by a contract (Error code: -8).
    ContractOnly,
    /// Unsupported (Error code: -9).
    Unsupported,
    /// Incompatible contract (Error code: -10).
    Incompatible,
    /// Failed to invoke a contract (Error code: -11).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -12).
    InvokeTransferError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError.
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
