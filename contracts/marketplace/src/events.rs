use super::*;

/// An untagged event of a token listed for sale.
#[derive(Debug, Serialize, SchemaType)]
pub struct NewOrderEvent {
    /// Account that listed the token and receives the proceeds.
    pub seller: AccountAddress,
    /// The ID of the listed token.
    pub token_id: ContractTokenId,
    /// Asking price.
    pub price: ContractTokenAmount,
}

/// An untagged event of an order cancelled by its seller.
#[derive(Debug, Serialize, SchemaType)]
pub struct CancelOrderEvent {
    /// Account that owned the order.
    pub seller: AccountAddress,
    /// The ID of the unlisted token.
    pub token_id: ContractTokenId,
}

/// An untagged event of an order repriced by its seller.
#[derive(Debug, Serialize, SchemaType)]
pub struct ChangePriceEvent {
    /// The ID of the repriced token.
    pub token_id: ContractTokenId,
    /// Account that owns the order.
    pub seller: AccountAddress,
    /// Previous asking price.
    pub from: ContractTokenAmount,
    /// Updated asking price.
    pub to: ContractTokenAmount,
}

/// An untagged event of a settled purchase.
#[derive(Debug, Serialize, SchemaType)]
pub struct BuyEvent {
    /// The ID of the purchased token.
    pub token_id: ContractTokenId,
    /// The address owning the order before the sale.
    pub seller: AccountAddress,
    /// The address receiving the token.
    pub buyer: AccountAddress,
    /// Price the order settled at.
    pub price: ContractTokenAmount,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum MarketEvent {
    /// Listing a token
    NewOrder(NewOrderEvent),
    /// Cancelling an order
    CancelOrder(CancelOrderEvent),
    /// Repricing an order
    ChangePrice(ChangePriceEvent),
    /// Buying a token
    Buy(BuyEvent),
}

impl Serial for MarketEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            MarketEvent::NewOrder(event) => {
                out.write_u8(NEW_ORDER_TAG)?;
                event.serial(out)
            }
            MarketEvent::CancelOrder(event) => {
                out.write_u8(CANCEL_ORDER_TAG)?;
                event.serial(out)
            }
            MarketEvent::ChangePrice(event) => {
                out.write_u8(CHANGE_PRICE_TAG)?;
                event.serial(out)
            }
            MarketEvent::Buy(event) => {
                out.write_u8(BUY_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for MarketEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            NEW_ORDER_TAG => NewOrderEvent::deserial(source).map(MarketEvent::NewOrder),
            CANCEL_ORDER_TAG => CancelOrderEvent::deserial(source).map(MarketEvent::CancelOrder),
            CHANGE_PRICE_TAG => ChangePriceEvent::deserial(source).map(MarketEvent::ChangePrice),
            BUY_TAG => BuyEvent::deserial(source).map(MarketEvent::Buy),
            _ => Err(ParseError::default()),
        }
    }
}
