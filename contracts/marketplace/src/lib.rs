//! A fixed price NFT marketplace settled in a CIS-2 currency token.
//!
//! Tokens are listed by transferring them to this contract with the asking
//! price attached to the transfer data. While listed, the token is held in
//! escrow by this contract and leaves escrow through `buy` or `cancelOrder`.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, helper::*, structs::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod contract;
mod events;
mod helper;
mod impls;
mod structs;
