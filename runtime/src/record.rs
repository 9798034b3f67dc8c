//! Stored record encoding.
//!
//! Every record is wrapped in an [`Envelope`] carrying its kind tag and the
//! storage deposit it holds. The kind tag keeps one record type from being
//! decoded as another.

use quorum_types::{Identity, NativeAmount, TokenAmount};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A typed record that can live in the account store.
pub trait AccountData: Serialize + DeserializeOwned {
    const KIND: &'static str;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Envelope {
    pub kind: String,
    pub deposit: NativeAmount,
    pub data: Vec<u8>,
}

/// Native currency held by one owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NativeBalance {
    pub owner: Identity,
    pub amount: NativeAmount,
}

impl AccountData for NativeBalance {
    const KIND: &'static str = "native_balance";
}

/// Governance tokens of one mint held by one holder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenBalance {
    pub mint: Identity,
    pub holder: Identity,
    pub amount: TokenAmount,
}

impl AccountData for TokenBalance {
    const KIND: &'static str = "token_balance";
}

/// A token mint and the only identity allowed to mint from it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintState {
    pub authority: Identity,
    pub supply: TokenAmount,
}

impl AccountData for MintState {
    const KIND: &'static str = "mint";
}
