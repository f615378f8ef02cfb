use super::*;

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Fungible token orders are settled in.
    pub currency: Token,
    /// The collection contract whose tokens may be listed.
    pub collection: ContractAddress,
    /// Active orders by token ID.
    pub orders: StateMap<ContractTokenId, Order, S>,
    /// Compact enumeration of active orders: slot -> token ID.
    pub index: StateMap<u32, ContractTokenId, S>,
    /// Slot of each listed token ID in `index`.
    pub slots: StateMap<ContractTokenId, u32, S>,
    /// Number of active orders.
    pub order_count: u32,
}

/// An active sale offer.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// Account entitled to the proceeds and to reclaim the token.
    pub seller: AccountAddress,
    /// Asking price in the currency token's native unit.
    pub price: ContractTokenAmount,
}

/// Collaborator configuration, fixed on init.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Fungible CIS-2 token used for settlement.
    pub currency: Token,
    /// CIS-2 contract whose tokens can be listed.
    pub collection: ContractAddress,
}

/// Asking price carried in the transfer data of a listing.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct ListingInfo {
    pub price: ContractTokenAmount,
}

/// Parameter for `changePrice`.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct ChangePriceParams {
    /// Token to reprice.
    pub token_id: ContractTokenId,
    /// New asking price.
    pub price: ContractTokenAmount,
}

/// A single entry returned by `getMyNFTs`.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub seller: AccountAddress,
    pub token_id: ContractTokenId,
    pub price: ContractTokenAmount,
}
