//! Helpers for testing contracts against mocked collaborator entrypoints.
use concordium_std::test_infrastructure::MockFn;
use concordium_std::*;

/// Mock entrypoint that checks that the parameter parses as `D` and returns
/// `return_value`.
pub fn parse_and_ok_mock<D: Deserial, S>(
    return_value: impl Clone + Serial + 'static,
) -> MockFn<S> {
    MockFn::new(move |parameter, _amount, _balance, _state| {
        D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
        Ok((false, Some(return_value.clone())))
    })
}

/// Mock entrypoint that parses the parameter as `D`, rejects unless `check`
/// accepts it and returns `return_value` otherwise.
pub fn parse_and_check_mock<D: Deserial, S>(
    check: impl Fn(&D) -> bool + 'static,
    return_value: impl Clone + Serial + 'static,
) -> MockFn<S> {
    MockFn::new(move |parameter, _, _, _state| {
        let value =
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
        if !check(&value) {
            return Err(CallContractError::Trap);
        };
        Ok((false, Some(return_value.clone())))
    })
}
