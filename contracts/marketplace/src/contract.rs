use super::*;

/// Initialize the marketplace with the currency and collection collaborators.
#[init(contract = "NftMarket", parameter = "MarketConfig")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let config: MarketConfig = ctx.parameter_cursor().get()?;
    Ok(State::empty(state_builder, config))
}

/// List a token for sale. This function is intended to be invoked by the
/// collection contract as the receive hook of a CIS-2 transfer, with the
/// asking price encoded in the transfer data.
///
/// While listed, this contract owns the token. It is transferred back out on
/// buy or cancelOrder.
///
/// It rejects if:
/// - The sender is not a contract, or not the configured collection.
/// - More than one unit of the token was transferred.
/// - The transfer data does not decode as a price.
/// - The token already carries an active order.
/// - Fails to log NewOrder event.
#[receive(
    contract = "NftMarket",
    name = "list",
    parameter = "OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>",
    mutable,
    enable_logger
)]
fn list<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: OnReceivingCis2Params<ContractTokenId, ContractTokenAmount> =
        ctx.parameter_cursor().get()?;

    let sender = match ctx.sender() {
        Address::Contract(contract) => contract,
        Address::Account(_) => bail!(CustomContractError::ContractOnly.into()),
    };
    // Only tokens of the configured collection are escrowed here
    ensure!(
        sender == host.state().collection,
        CustomContractError::UnknownCollection.into()
    );

    // A zero transfer moves nothing into custody, so there is nothing to list
    if params.amount == 0.into() {
        return Ok(());
    }
    // A listing covers exactly one token
    ensure!(
        params.amount == 1.into(),
        CustomContractError::Unsupported.into()
    );

    let seller = match params.from {
        Address::Account(seller) => seller,
        Address::Contract(_) => bail!(CustomContractError::Unsupported.into()),
    };

    let listing_info: ListingInfo = from_bytes(params.data.as_ref())?;

    host.state_mut().list(
        params.token_id.clone(),
        Order {
            seller,
            price: listing_info.price,
        },
    )?;

    // Log the new order
    logger.log(&MarketEvent::NewOrder(NewOrderEvent {
        seller,
        token_id: params.token_id,
        price: listing_info.price,
    }))?;

    Ok(())
}

/// Cancel an active order. The token leaves escrow and returns to the seller.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - The sender is not the seller of the order.
/// - The collection contract rejects the return transfer.
#[receive(
    contract = "NftMarket",
    name = "cancelOrder",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn cancel_order<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    let sender = get_account_address(ctx.sender())?;

    let collection = host.state().collection;
    let order = host.state().order(&token_id)?;

    // Only the seller may reclaim the token
    ensure!(sender == order.seller, ContractError::Unauthorized);

    // Settle the order book before the external call, so a reentrant call
    // observes the token as already unlisted
    host.state_mut().unlist(&token_id)?;

    logger.log(&MarketEvent::CancelOrder(CancelOrderEvent {
        seller: order.seller,
        token_id: token_id.clone(),
    }))?;

    // Return the token from escrow to the seller
    transfer_token(
        host,
        &collection,
        token_id,
        Address::Contract(ctx.self_address()),
        order.seller,
    )?;

    Ok(())
}

/// Change the asking price of an active order in place. No transfer happens
/// and the enumeration index is untouched.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - The sender is not the seller of the order.
#[receive(
    contract = "NftMarket",
    name = "changePrice",
    parameter = "ChangePriceParams",
    mutable,
    enable_logger
)]
fn change_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ChangePriceParams = ctx.parameter_cursor().get()?;
    let sender = get_account_address(ctx.sender())?;

    let order = host.state().order(&params.token_id)?;

    // Only the seller may reprice the order
    ensure!(sender == order.seller, ContractError::Unauthorized);

    host.state_mut().set_price(&params.token_id, params.price)?;

    logger.log(&MarketEvent::ChangePrice(ChangePriceEvent {
        token_id: params.token_id,
        seller: order.seller,
        from: order.price,
        to: params.price,
    }))?;

    Ok(())
}

/// Buy a listed token. The price moves from the buyer to the seller in the
/// currency token, then the token leaves escrow to the buyer. The seller is
/// not excluded from buying its own listing.
///
/// The buyer must have authorized this contract as an operator on the
/// currency contract beforehand.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is a contract address.
/// - The token is not listed.
/// - The currency contract rejects the payment, e.g. for missing operator
///   authorization or insufficient balance.
/// - The collection contract rejects the transfer.
#[receive(
    contract = "NftMarket",
    name = "buy",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn buy<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    let buyer = get_account_address(ctx.sender())?;

    let currency = host.state().currency.clone();
    let collection = host.state().collection;

    // Settle the order book before any external call; if a transfer below
    // rejects, the chain discards the whole update and the order with it
    let order = host.state_mut().unlist(&token_id)?;

    // Move the payment from the buyer to the seller
    transfer_currency(host, &currency, buyer, order.seller, order.price)?;

    // Hand the token over from escrow to the buyer
    transfer_token(
        host,
        &collection,
        token_id.clone(),
        Address::Contract(ctx.self_address()),
        buyer,
    )?;

    logger.log(&MarketEvent::Buy(BuyEvent {
        token_id,
        seller: order.seller,
        buyer,
        price: order.price,
    }))?;

    Ok(())
}

/// Check whether a token currently carries an active order.
#[receive(
    contract = "NftMarket",
    name = "isListed",
    parameter = "ContractTokenId",
    return_value = "bool"
)]
fn is_listed<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    Ok(host.state().is_listed(&token_id))
}

/// Number of active orders.
#[receive(contract = "NftMarket", name = "getOrderLength", return_value = "u32")]
fn get_order_length<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u32> {
    Ok(host.state().order_count)
}

/// All active orders of the given seller, computed fresh on every call.
/// Enumeration follows the order index and is not stable across
/// cancellations.
#[receive(
    contract = "NftMarket",
    name = "getMyNFTs",
    parameter = "AccountAddress",
    return_value = "Vec<OrderView>"
)]
fn get_my_nfts<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<OrderView>> {
    let seller: AccountAddress = ctx.parameter_cursor().get()?;

    Ok(host.state().orders_by_seller(&seller))
}

/// View the collaborator configuration.
#[receive(
    contract = "NftMarket",
    name = "viewConfig",
    return_value = "MarketConfig"
)]
fn view_config<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<MarketConfig> {
    let state = host.state();

    Ok(MarketConfig {
        currency: state.currency.clone(),
        collection: state.collection,
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use test_infrastructure::*;

    const SELLER: AccountAddress = AccountAddress([1u8; 32]);
    const BUYER: AccountAddress = AccountAddress([2u8; 32]);
    const INTRUDER: AccountAddress = AccountAddress([3u8; 32]);

    const CURRENCY: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const COLLECTION: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const MARKET: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };
    const OTHER_CONTRACT: ContractAddress = ContractAddress {
        index: 99,
        subindex: 0,
    };

    /// Default listing price used across the tests.
    fn price() -> ContractTokenAmount {
        ContractTokenAmount::from(0x1c6bf52634000)
    }

    fn token(n: u8) -> ContractTokenId {
        TokenIdVec(vec![n])
    }

    fn currency() -> Token {
        Token {
            contract: CURRENCY,
            id: TokenIdVec(Vec::new()),
        }
    }

    fn market_config() -> MarketConfig {
        MarketConfig {
            currency: currency(),
            collection: COLLECTION,
        }
    }

    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let parameter_bytes = to_bytes(&market_config());
        ctx.set_parameter(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_NftMarket");

        TestHost::new(state, state_builder)
    }

    fn receive_ctx<'a>(sender: Address) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx.set_self_address(MARKET);
        ctx
    }

    fn hook_params(
        token_id: ContractTokenId,
        seller: AccountAddress,
        price: ContractTokenAmount,
    ) -> OnReceivingCis2Params<ContractTokenId, ContractTokenAmount> {
        OnReceivingCis2Params {
            token_id,
            amount: ContractTokenAmount::from(1),
            from: Address::Account(seller),
            data: AdditionalData::from(to_bytes(&ListingInfo { price })),
        }
    }

    /// Lists `token_id` for `seller` through the receive hook.
    fn list_token(
        host: &mut TestHost<State<TestStateApi>>,
        logger: &mut TestLogger,
        token_id: ContractTokenId,
        seller: AccountAddress,
        price: ContractTokenAmount,
    ) {
        let parameter_bytes = to_bytes(&hook_params(token_id, seller, price));
        let mut ctx = receive_ctx(Address::Contract(COLLECTION));
        ctx.set_parameter(&parameter_bytes);

        list(&ctx, host, logger).expect_report("Listing through the receive hook failed");
    }

    /// Test initialization succeeds and stores the collaborator pair.
    #[concordium_test]
    fn test_init() {
        let host = default_host();
        let state = host.state();

        claim_eq!(state.currency, currency());
        claim_eq!(state.collection, COLLECTION);
        claim_eq!(state.order_count, 0);
        claim_eq!(state.orders.iter().count(), 0);
    }

    /// The collaborator accessors return the configured addresses.
    #[concordium_test]
    fn test_view_config() {
        let host = default_host();
        let ctx = receive_ctx(Address::Account(SELLER));

        let config = view_config(&ctx, &host).expect_report("Unexpected error in 'viewConfig'");

        claim_eq!(config, market_config());
    }

    /// Listing creates the order, grows the index and logs NewOrder once.
    #[concordium_test]
    fn test_list() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        list_token(&mut host, &mut logger, token(0), SELLER, price());

        let state = host.state();
        claim!(state.is_listed(&token(0)));
        claim_eq!(state.order_count, 1);
        claim_eq!(
            state.order(&token(0)),
            Ok(Order {
                seller: SELLER,
                price: price(),
            })
        );

        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketEvent::NewOrder(NewOrderEvent {
                seller: SELLER,
                token_id: token(0),
                price: price(),
            })),
            "Incorrect event emitted"
        );
    }

    /// A listing with undecodable price data fails without leaving a partial
    /// order behind.
    #[concordium_test]
    fn test_list_rejects_malformed_price() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let params = OnReceivingCis2Params {
            token_id: token(0),
            amount: ContractTokenAmount::from(1),
            from: Address::Account(SELLER),
            // A lone continuation byte is not a valid amount encoding
            data: AdditionalData::from(vec![0x80]),
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(Address::Contract(COLLECTION));
        ctx.set_parameter(&parameter_bytes);

        let result = list(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::ParseParams.into()));
        claim!(!host.state().is_listed(&token(0)));
        claim_eq!(host.state().order_count, 0);
        claim_eq!(logger.logs.len(), 0, "No event should be logged");
    }

    /// Re-listing a token that already carries an active order is rejected
    /// rather than overwritten. The escrowed token has to settle through buy
    /// or cancelOrder before it can enter a fresh order.
    #[concordium_test]
    fn test_list_rejects_duplicate() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        let parameter_bytes = to_bytes(&hook_params(token(0), SELLER, price()));
        let mut ctx = receive_ctx(Address::Contract(COLLECTION));
        ctx.set_parameter(&parameter_bytes);

        let result = list(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::TokenAlreadyListedForSale.into())
        );
        claim_eq!(host.state().order_count, 1);
    }

    /// Tokens arriving from a contract other than the configured collection
    /// are not listed.
    #[concordium_test]
    fn test_list_rejects_foreign_collection() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&hook_params(token(0), SELLER, price()));
        let mut ctx = receive_ctx(Address::Contract(OTHER_CONTRACT));
        ctx.set_parameter(&parameter_bytes);

        let result = list(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::UnknownCollection.into()));
        claim!(!host.state().is_listed(&token(0)));
    }

    /// The receive hook must be invoked by a contract, not an account.
    #[concordium_test]
    fn test_list_rejects_account_sender() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&hook_params(token(0), SELLER, price()));
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let result = list(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::ContractOnly.into()));
    }

    /// A transfer of more than one unit cannot become an order.
    #[concordium_test]
    fn test_list_rejects_bundle() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let params = OnReceivingCis2Params {
            token_id: token(0),
            amount: ContractTokenAmount::from(2),
            from: Address::Account(SELLER),
            data: AdditionalData::from(to_bytes(&ListingInfo { price: price() })),
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(Address::Contract(COLLECTION));
        ctx.set_parameter(&parameter_bytes);

        let result = list(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Unsupported.into()));
        claim!(!host.state().is_listed(&token(0)));
    }

    /// A zero transfer moves nothing into custody and is a no-op.
    #[concordium_test]
    fn test_list_ignores_zero_transfer() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let params = OnReceivingCis2Params {
            token_id: token(0),
            amount: ContractTokenAmount::from(0),
            from: Address::Account(SELLER),
            data: AdditionalData::from(to_bytes(&ListingInfo { price: price() })),
        };
        let parameter_bytes = to_bytes(&params);
        let mut ctx = receive_ctx(Address::Contract(COLLECTION));
        ctx.set_parameter(&parameter_bytes);

        let result = list(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(!host.state().is_listed(&token(0)));
        claim_eq!(host.state().order_count, 0);
        claim_eq!(logger.logs.len(), 0, "No event should be logged");
    }

    /// Cancelling removes the order and returns the token to the seller,
    /// leaving other orders untouched.
    #[concordium_test]
    fn test_cancel_order() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());
        list_token(&mut host, &mut logger, token(1), SELLER, price());

        host.setup_mock_entrypoint(
            COLLECTION,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<TransferParameter, _>(
                |params: &TransferParameter| {
                    let TransferParams(transfers) = params;
                    transfers.len() == 1
                        && transfers[0].token_id == token(0)
                        && transfers[0].amount == 1.into()
                        && transfers[0].from == Address::Contract(MARKET)
                        && transfers[0].to.address() == Address::Account(SELLER)
                },
                (),
            ),
        );

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let result = cancel_order(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(!host.state().is_listed(&token(0)));
        claim!(host.state().is_listed(&token(1)));
        claim_eq!(host.state().order_count, 1);
        claim!(
            logger
                .logs
                .contains(&to_bytes(&MarketEvent::CancelOrder(CancelOrderEvent {
                    seller: SELLER,
                    token_id: token(0),
                }))),
            "Expected an event for the cancelled order"
        );
    }

    /// Only the seller of an order may cancel it.
    #[concordium_test]
    fn test_cancel_order_not_seller() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(INTRUDER));
        ctx.set_parameter(&parameter_bytes);

        let result = cancel_order(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim!(host.state().is_listed(&token(0)));
        claim_eq!(host.state().order_count, 1);
    }

    /// Cancelling the same order twice fails the second time instead of
    /// silently succeeding.
    #[concordium_test]
    fn test_cancel_order_twice() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        host.setup_mock_entrypoint(
            COLLECTION,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_ok_mock::<TransferParameter, _>(()),
        );

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let result = cancel_order(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let result = cancel_order(&ctx, &mut host, &mut logger);
        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    /// Cancelling a token that was never listed fails.
    #[concordium_test]
    fn test_cancel_order_unlisted() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&token(7));
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let result = cancel_order(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    /// Repricing is visible immediately and does not touch other orders.
    #[concordium_test]
    fn test_change_price() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());
        list_token(&mut host, &mut logger, token(1), SELLER, price());

        let new_price = ContractTokenAmount::from(0x2c6bf52634000);
        let parameter_bytes = to_bytes(&ChangePriceParams {
            token_id: token(0),
            price: new_price,
        });
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let result = change_price(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        let views = host.state().orders_by_seller(&SELLER);
        claim!(views.contains(&OrderView {
            seller: SELLER,
            token_id: token(0),
            price: new_price,
        }));
        claim!(views.contains(&OrderView {
            seller: SELLER,
            token_id: token(1),
            price: price(),
        }));
        claim!(
            logger
                .logs
                .contains(&to_bytes(&MarketEvent::ChangePrice(ChangePriceEvent {
                    token_id: token(0),
                    seller: SELLER,
                    from: price(),
                    to: new_price,
                }))),
            "Expected an event for the repriced order"
        );
    }

    /// Only the seller of an order may reprice it.
    #[concordium_test]
    fn test_change_price_not_seller() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        let parameter_bytes = to_bytes(&ChangePriceParams {
            token_id: token(0),
            price: ContractTokenAmount::from(1),
        });
        let mut ctx = receive_ctx(Address::Account(INTRUDER));
        ctx.set_parameter(&parameter_bytes);

        let result = change_price(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(
            host.state().order(&token(0)),
            Ok(Order {
                seller: SELLER,
                price: price(),
            })
        );
    }

    /// Repricing a token without an active order fails.
    #[concordium_test]
    fn test_change_price_unlisted() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&ChangePriceParams {
            token_id: token(0),
            price: ContractTokenAmount::from(1),
        });
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let result = change_price(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    /// Buying pays the seller exactly the asking price in the currency token
    /// and hands the escrowed token to the buyer.
    #[concordium_test]
    fn test_buy() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        host.setup_mock_entrypoint(
            CURRENCY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<TransferParameter, _>(
                |params: &TransferParameter| {
                    let TransferParams(transfers) = params;
                    transfers.len() == 1
                        && transfers[0].token_id == TokenIdVec(Vec::new())
                        && transfers[0].amount == price()
                        && transfers[0].from == Address::Account(BUYER)
                        && transfers[0].to.address() == Address::Account(SELLER)
                },
                (),
            ),
        );
        host.setup_mock_entrypoint(
            COLLECTION,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<TransferParameter, _>(
                |params: &TransferParameter| {
                    let TransferParams(transfers) = params;
                    transfers.len() == 1
                        && transfers[0].token_id == token(0)
                        && transfers[0].amount == 1.into()
                        && transfers[0].from == Address::Contract(MARKET)
                        && transfers[0].to.address() == Address::Account(BUYER)
                },
                (),
            ),
        );

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(BUYER));
        ctx.set_parameter(&parameter_bytes);

        let result = buy(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(!host.state().is_listed(&token(0)));
        claim_eq!(host.state().order_count, 0);
        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::Buy(BuyEvent {
                token_id: token(0),
                seller: SELLER,
                buyer: BUYER,
                price: price(),
            }))),
            "Expected an event for the settled purchase"
        );
    }

    /// Buying a token without an active order fails.
    #[concordium_test]
    fn test_buy_unlisted() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(BUYER));
        ctx.set_parameter(&parameter_bytes);

        let result = buy(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    /// A rejected payment rejects the whole call. On chain the rejection
    /// discards the order removal together with the rest of the update, so
    /// the order is retained exactly as before the call.
    #[concordium_test]
    fn test_buy_payment_rejected() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        // Currency contract rejects the payment, e.g. for missing operator
        // authorization or insufficient balance
        host.setup_mock_entrypoint(
            CURRENCY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<TransferParameter, _>(|_| false, ()),
        );

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(BUYER));
        ctx.set_parameter(&parameter_bytes);

        let result = buy(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::InvokeContractError.into()));
    }

    /// The seller is not excluded from buying its own listing.
    #[concordium_test]
    fn test_buy_by_seller() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        host.setup_mock_entrypoint(
            CURRENCY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_ok_mock::<TransferParameter, _>(()),
        );
        host.setup_mock_entrypoint(
            COLLECTION,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_ok_mock::<TransferParameter, _>(()),
        );

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let result = buy(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(!host.state().is_listed(&token(0)));
    }

    /// `isListed` distinguishes active orders from settled and unknown
    /// tokens.
    #[concordium_test]
    fn test_is_listed() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());

        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(BUYER));
        ctx.set_parameter(&parameter_bytes);
        let listed = is_listed(&ctx, &host).expect_report("Unexpected error in 'isListed'");
        claim!(listed);

        let parameter_bytes = to_bytes(&token(1));
        let mut ctx = receive_ctx(Address::Account(BUYER));
        ctx.set_parameter(&parameter_bytes);
        let listed = is_listed(&ctx, &host).expect_report("Unexpected error in 'isListed'");
        claim!(!listed);
    }

    /// `getOrderLength` reports the size of the active order index.
    #[concordium_test]
    fn test_get_order_length() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let ctx = receive_ctx(Address::Account(BUYER));

        let length =
            get_order_length(&ctx, &host).expect_report("Unexpected error in 'getOrderLength'");
        claim_eq!(length, 0);

        list_token(&mut host, &mut logger, token(0), SELLER, price());
        list_token(&mut host, &mut logger, token(1), SELLER, price());

        let length =
            get_order_length(&ctx, &host).expect_report("Unexpected error in 'getOrderLength'");
        claim_eq!(length, 2);
    }

    /// `getMyNFTs` returns only the orders of the queried seller.
    #[concordium_test]
    fn test_get_my_nfts() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        list_token(&mut host, &mut logger, token(0), SELLER, price());
        list_token(&mut host, &mut logger, token(1), SELLER, price());
        list_token(&mut host, &mut logger, token(2), INTRUDER, price());

        let parameter_bytes = to_bytes(&SELLER);
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);

        let views = get_my_nfts(&ctx, &host).expect_report("Unexpected error in 'getMyNFTs'");

        claim_eq!(views.len(), 2);
        claim!(views.iter().all(|view| view.seller == SELLER));
        claim!(views.contains(&OrderView {
            seller: SELLER,
            token_id: token(0),
            price: price(),
        }));
        claim!(views.contains(&OrderView {
            seller: SELLER,
            token_id: token(1),
            price: price(),
        }));

        let parameter_bytes = to_bytes(&BUYER);
        let mut ctx = receive_ctx(Address::Account(BUYER));
        ctx.set_parameter(&parameter_bytes);

        let views = get_my_nfts(&ctx, &host).expect_report("Unexpected error in 'getMyNFTs'");
        claim_eq!(views.len(), 0);
    }

    /// Full market round trip: list two tokens, cancel the first, buy the
    /// second.
    #[concordium_test]
    fn test_list_cancel_buy_flow() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        list_token(&mut host, &mut logger, token(0), SELLER, price());
        list_token(&mut host, &mut logger, token(1), SELLER, price());
        claim_eq!(host.state().order_count, 2);

        host.setup_mock_entrypoint(
            COLLECTION,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_ok_mock::<TransferParameter, _>(()),
        );
        host.setup_mock_entrypoint(
            CURRENCY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_ok_mock::<TransferParameter, _>(()),
        );

        // Seller reclaims token 0
        let parameter_bytes = to_bytes(&token(0));
        let mut ctx = receive_ctx(Address::Account(SELLER));
        ctx.set_parameter(&parameter_bytes);
        cancel_order(&ctx, &mut host, &mut logger).expect_report("Unexpected error in 'cancelOrder'");

        claim_eq!(host.state().order_count, 1);
        claim!(!host.state().is_listed(&token(0)));
        claim!(host.state().is_listed(&token(1)));

        // Buyer takes token 1
        let parameter_bytes = to_bytes(&token(1));
        let mut ctx = receive_ctx(Address::Account(BUYER));
        ctx.set_parameter(&parameter_bytes);
        buy(&ctx, &mut host, &mut logger).expect_report("Unexpected error in 'buy'");

        claim!(!host.state().is_listed(&token(1)));
        claim_eq!(host.state().order_count, 0);
    }
}
