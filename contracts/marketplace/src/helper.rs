use super::*;

pub fn get_account_address(address: Address) -> ContractResult<AccountAddress> {
    match address {
        Address::Account(addr) => Ok(addr),
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
    }
}

/// Invoke a CIS-2 transfer of a single token on the collection contract.
pub fn transfer_token<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    collection: &ContractAddress,
    token_id: ContractTokenId,
    from: Address,
    to: AccountAddress,
) -> ContractResult<()> {
    let transfer = Transfer {
        token_id,
        amount: ContractTokenAmount::from(1),
        from,
        to: Receiver::Account(to),
        data: AdditionalData::empty(),
    };
    let parameter: TransferParameter = TransferParams(vec![transfer]);
    host.invoke_contract(
        collection,
        &parameter,
        EntrypointName::new_unchecked("transfer"),
        Amount::zero(),
    )?;

    Ok(())
}

/// Invoke a CIS-2 transfer of `amount` units of the currency token. The
/// currency contract checks that this contract is an operator of `from` and
/// that `from` holds enough balance.
pub fn transfer_currency<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    currency: &Token,
    from: AccountAddress,
    to: AccountAddress,
    amount: ContractTokenAmount,
) -> ContractResult<()> {
    let transfer = Transfer {
        token_id: currency.id.clone(),
        amount,
        from: Address::Account(from),
        to: Receiver::Account(to),
        data: AdditionalData::empty(),
    };
    let parameter: TransferParameter = TransferParams(vec![transfer]);
    host.invoke_contract(
        &currency.contract,
        &parameter,
        EntrypointName::new_unchecked("transfer"),
        Amount::zero(),
    )?;

    Ok(())
}
