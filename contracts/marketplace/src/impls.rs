use super::*;

// Functions for creating, updating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates an empty order book for the given collaborator pair.
    pub fn empty(state_builder: &mut StateBuilder<S>, config: MarketConfig) -> Self {
        State {
            currency: config.currency,
            collection: config.collection,
            orders: state_builder.new_map(),
            index: state_builder.new_map(),
            slots: state_builder.new_map(),
            order_count: 0,
        }
    }

    /// Check if an active order exists for the token ID.
    pub fn is_listed(&self, token_id: &ContractTokenId) -> bool {
        self.orders.get(token_id).is_some()
    }

    /// Look up the active order for the token ID.
    pub fn order(&self, token_id: &ContractTokenId) -> ContractResult<Order> {
        self.orders
            .get(token_id)
            .map(|order| *order)
            .ok_or_else(|| CustomContractError::TokenNotListedForSale.into())
    }

    /// Create an order and append it to the enumeration index.
    ///
    /// Fails if the token already carries an active order: a listed token is
    /// in escrow and must settle through buy or cancel before it can be
    /// listed again.
    pub fn list(&mut self, token_id: ContractTokenId, order: Order) -> ContractResult<()> {
        ensure!(
            self.orders.get(&token_id).is_none(),
            CustomContractError::TokenAlreadyListedForSale.into()
        );

        let slot = self.order_count;
        self.orders.insert(token_id.clone(), order);
        self.slots.insert(token_id.clone(), slot);
        self.index.insert(slot, token_id);
        self.order_count = slot + 1;

        Ok(())
    }

    /// Remove an order, compacting the index with swap-and-pop: the last
    /// slot's entry moves into the vacated slot. Enumeration order is not
    /// stable across removals.
    pub fn unlist(&mut self, token_id: &ContractTokenId) -> ContractResult<Order> {
        let order = self.orders.remove_and_get(token_id).ok_or(
            ContractError::Custom(CustomContractError::TokenNotListedForSale),
        )?;
        let slot = self.slots.remove_and_get(token_id).ok_or(
            ContractError::Custom(CustomContractError::TokenNotListedForSale),
        )?;

        let last = self.order_count - 1;
        if slot != last {
            let moved = self.index.remove_and_get(&last).ok_or(
                ContractError::Custom(CustomContractError::TokenNotListedForSale),
            )?;
            self.slots.insert(moved.clone(), slot);
            self.index.insert(slot, moved);
        } else {
            self.index.remove(&last);
        }
        self.order_count = last;

        Ok(order)
    }

    /// Overwrite the asking price of an active order in place.
    pub fn set_price(
        &mut self,
        token_id: &ContractTokenId,
        price: ContractTokenAmount,
    ) -> ContractResult<()> {
        let mut order = self.orders.get_mut(token_id).ok_or(
            ContractError::Custom(CustomContractError::TokenNotListedForSale),
        )?;
        order.price = price;

        Ok(())
    }

    /// All active orders belonging to `seller`, in index order.
    pub fn orders_by_seller(&self, seller: &AccountAddress) -> Vec<OrderView> {
        let mut views = Vec::new();
        for slot in 0..self.order_count {
            if let Some(token_id) = self.index.get(&slot) {
                if let Some(order) = self.orders.get(&token_id) {
                    if order.seller == *seller {
                        views.push(OrderView {
                            seller: order.seller,
                            token_id: token_id.clone(),
                            price: order.price,
                        });
                    }
                }
            }
        }
        views
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const SELLER: AccountAddress = AccountAddress([1u8; 32]);
    const OTHER_SELLER: AccountAddress = AccountAddress([2u8; 32]);

    const CURRENCY: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const COLLECTION: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };

    fn token(n: u8) -> ContractTokenId {
        TokenIdVec(vec![n])
    }

    fn order(seller: AccountAddress, price: u64) -> Order {
        Order {
            seller,
            price: ContractTokenAmount::from(price),
        }
    }

    fn empty_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
        State::empty(
            state_builder,
            MarketConfig {
                currency: Token {
                    contract: CURRENCY,
                    id: TokenIdVec(Vec::new()),
                },
                collection: COLLECTION,
            },
        )
    }

    /// Checks that the enumeration index, the reverse slot map and the order
    /// map agree: no entry is lost or duplicated.
    fn check_index(state: &State<TestStateApi>) {
        claim_eq!(state.orders.iter().count() as u32, state.order_count);
        claim_eq!(state.slots.iter().count() as u32, state.order_count);
        claim_eq!(state.index.iter().count() as u32, state.order_count);

        for slot in 0..state.order_count {
            if let Some(token_id) = state.index.get(&slot) {
                let back = state.slots.get(&token_id).map(|s| *s);
                claim_eq!(back, Some(slot), "Reverse map must point at the slot");
                claim!(
                    state.orders.get(&token_id).is_some(),
                    "Indexed token must carry an order"
                );
            } else {
                claim!(false, "Index slot below order_count must be filled");
            }
        }
    }

    #[concordium_test]
    fn test_list_grows_index() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        for n in 0..3 {
            state
                .list(token(n), order(SELLER, 100 + n as u64))
                .expect_report("Listing a fresh token failed");
        }

        claim_eq!(state.order_count, 3);
        claim!(state.is_listed(&token(0)));
        claim!(state.is_listed(&token(1)));
        claim!(state.is_listed(&token(2)));
        claim!(!state.is_listed(&token(3)));
        check_index(&state);
    }

    #[concordium_test]
    fn test_list_duplicate_rejected() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        state
            .list(token(0), order(SELLER, 100))
            .expect_report("First listing failed");
        let result = state.list(token(0), order(OTHER_SELLER, 200));

        claim_eq!(
            result,
            Err(CustomContractError::TokenAlreadyListedForSale.into())
        );
        claim_eq!(state.order_count, 1);
        // The original order is untouched
        claim_eq!(state.order(&token(0)), Ok(order(SELLER, 100)));
        check_index(&state);
    }

    #[concordium_test]
    fn test_unlist_middle_compacts() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        for n in 0..3 {
            state
                .list(token(n), order(SELLER, 100))
                .expect_report("Listing failed");
        }

        let removed = state.unlist(&token(0)).expect_report("Unlisting failed");

        claim_eq!(removed, order(SELLER, 100));
        claim_eq!(state.order_count, 2);
        claim!(!state.is_listed(&token(0)));
        claim!(state.is_listed(&token(1)));
        claim!(state.is_listed(&token(2)));
        check_index(&state);
    }

    #[concordium_test]
    fn test_unlist_last_slot() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        state
            .list(token(0), order(SELLER, 100))
            .expect_report("Listing failed");
        state
            .list(token(1), order(SELLER, 200))
            .expect_report("Listing failed");

        state.unlist(&token(1)).expect_report("Unlisting failed");

        claim_eq!(state.order_count, 1);
        claim!(state.is_listed(&token(0)));
        claim!(!state.is_listed(&token(1)));
        check_index(&state);
    }

    #[concordium_test]
    fn test_unlist_missing_rejected() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        let result = state.unlist(&token(0));

        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    #[concordium_test]
    fn test_relist_after_settle() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        state
            .list(token(0), order(SELLER, 100))
            .expect_report("Listing failed");
        state
            .list(token(1), order(SELLER, 100))
            .expect_report("Listing failed");
        state.unlist(&token(0)).expect_report("Unlisting failed");
        state.unlist(&token(1)).expect_report("Unlisting failed");

        claim_eq!(state.order_count, 0);

        // A settled token may enter a fresh order
        state
            .list(token(0), order(OTHER_SELLER, 300))
            .expect_report("Relisting a settled token failed");

        claim_eq!(state.order_count, 1);
        claim_eq!(state.order(&token(0)), Ok(order(OTHER_SELLER, 300)));
        check_index(&state);
    }

    #[concordium_test]
    fn test_set_price_in_place() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        state
            .list(token(0), order(SELLER, 100))
            .expect_report("Listing failed");
        state
            .list(token(1), order(SELLER, 200))
            .expect_report("Listing failed");

        state
            .set_price(&token(0), ContractTokenAmount::from(150))
            .expect_report("Repricing failed");

        claim_eq!(state.order(&token(0)), Ok(order(SELLER, 150)));
        // No other order's price changes
        claim_eq!(state.order(&token(1)), Ok(order(SELLER, 200)));
        claim_eq!(state.order_count, 2);
        check_index(&state);
    }

    #[concordium_test]
    fn test_set_price_missing_rejected() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        let result = state.set_price(&token(0), ContractTokenAmount::from(150));

        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    #[concordium_test]
    fn test_orders_by_seller() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = empty_state(&mut state_builder);

        state
            .list(token(0), order(SELLER, 100))
            .expect_report("Listing failed");
        state
            .list(token(1), order(SELLER, 200))
            .expect_report("Listing failed");
        state
            .list(token(2), order(OTHER_SELLER, 300))
            .expect_report("Listing failed");

        let views = state.orders_by_seller(&SELLER);
        claim_eq!(views.len(), 2);
        claim!(views.iter().all(|view| view.seller == SELLER));
        claim!(views.contains(&OrderView {
            seller: SELLER,
            token_id: token(0),
            price: ContractTokenAmount::from(100),
        }));
        claim!(views.contains(&OrderView {
            seller: SELLER,
            token_id: token(1),
            price: ContractTokenAmount::from(200),
        }));

        let views = state.orders_by_seller(&OTHER_SELLER);
        claim_eq!(views.len(), 1);
        claim_eq!(
            views[0],
            OrderView {
                seller: OTHER_SELLER,
                token_id: token(2),
                price: ContractTokenAmount::from(300),
            }
        );
    }
}
