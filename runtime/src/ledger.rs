//! Native currency and governance token ledgers.
//!
//! Balances are ordinary records keyed by derived identities, so they are
//! staged and committed together with the governance accounts that move them.

use crate::error::RuntimeError;
use crate::record::{MintState, NativeBalance, TokenBalance};
use crate::transaction::Transaction;
use quorum_crypto::derive_identity;
use quorum_types::{Identity, NativeAmount, TokenAmount};

const NATIVE_NAMESPACE: &[u8] = b"native";
const TOKEN_NAMESPACE: &[u8] = b"token";

/// Record identity holding `owner`'s native balance.
pub fn native_account(owner: &Identity) -> Identity {
    derive_identity(NATIVE_NAMESPACE, &[owner.as_bytes()])
}

/// Record identity holding `holder`'s balance of `mint`.
pub fn token_account(mint: &Identity, holder: &Identity) -> Identity {
    derive_identity(TOKEN_NAMESPACE, &[mint.as_bytes(), holder.as_bytes()])
}

/// Custody of the native currency.
pub trait NativeLedger {
    fn native_balance(&self, owner: &Identity) -> Result<NativeAmount, RuntimeError>;

    fn transfer_native(
        &mut self,
        from: &Identity,
        to: &Identity,
        amount: NativeAmount,
    ) -> Result<(), RuntimeError>;

    /// Create native units out of nothing. Genesis funding only.
    fn credit_native(&mut self, to: &Identity, amount: NativeAmount) -> Result<(), RuntimeError>;

    fn debit_native(&mut self, from: &Identity, amount: NativeAmount) -> Result<(), RuntimeError>;
}

/// Custody of governance tokens.
pub trait TokenLedger {
    fn create_mint(
        &mut self,
        mint: &Identity,
        authority: &Identity,
        payer: &Identity,
    ) -> Result<(), RuntimeError>;

    fn token_supply(&self, mint: &Identity) -> Result<TokenAmount, RuntimeError>;

    fn token_balance(&self, mint: &Identity, holder: &Identity) -> Result<TokenAmount, RuntimeError>;

    /// Open an empty token account for `holder`, deposit paid by `payer`.
    fn open_token_account(
        &mut self,
        mint: &Identity,
        holder: &Identity,
        payer: &Identity,
    ) -> Result<(), RuntimeError>;

    /// Close an empty token account, refunding its deposit to `recipient`.
    fn close_token_account(
        &mut self,
        mint: &Identity,
        holder: &Identity,
        recipient: &Identity,
    ) -> Result<(), RuntimeError>;

    fn mint_to(
        &mut self,
        authority: &Identity,
        mint: &Identity,
        to: &Identity,
        amount: TokenAmount,
    ) -> Result<(), RuntimeError>;

    fn transfer_tokens(
        &mut self,
        mint: &Identity,
        from: &Identity,
        to: &Identity,
        amount: TokenAmount,
    ) -> Result<(), RuntimeError>;
}

impl NativeLedger for Transaction<'_> {
    fn native_balance(&self, owner: &Identity) -> Result<NativeAmount, RuntimeError> {
        Ok(self
            .load_optional::<NativeBalance>(&native_account(owner))?
            .map(|b| b.amount)
            .unwrap_or_default())
    }

    fn transfer_native(
        &mut self,
        from: &Identity,
        to: &Identity,
        amount: NativeAmount,
    ) -> Result<(), RuntimeError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.debit_native(from, amount)?;
        self.credit_native(to, amount)
    }

    fn credit_native(&mut self, to: &Identity, amount: NativeAmount) -> Result<(), RuntimeError> {
        let credited = self
            .native_balance(to)?
            .checked_add(amount)
            .ok_or(RuntimeError::Overflow)?;
        let record = NativeBalance {
            owner: *to,
            amount: credited,
        };
        self.put_record(&native_account(to), &record)
    }

    fn debit_native(&mut self, from: &Identity, amount: NativeAmount) -> Result<(), RuntimeError> {
        let balance = self.native_balance(from)?;
        let remaining = balance
            .checked_sub(amount)
            .ok_or(RuntimeError::InsufficientFunds {
                needed: amount.raw(),
                available: balance.raw(),
            })?;
        let record = NativeBalance {
            owner: *from,
            amount: remaining,
        };
        self.put_record(&native_account(from), &record)
    }
}

impl Transaction<'_> {
    fn set_token_balance(
        &mut self,
        mint: &Identity,
        holder: &Identity,
        amount: TokenAmount,
    ) -> Result<(), RuntimeError> {
        let record = TokenBalance {
            mint: *mint,
            holder: *holder,
            amount,
        };
        self.put_record(&token_account(mint, holder), &record)
    }
}

impl TokenLedger for Transaction<'_> {
    fn create_mint(
        &mut self,
        mint: &Identity,
        authority: &Identity,
        payer: &Identity,
    ) -> Result<(), RuntimeError> {
        let state = MintState {
            authority: *authority,
            supply: TokenAmount::ZERO,
        };
        self.create_account(mint, payer, &state)
    }

    fn token_supply(&self, mint: &Identity) -> Result<TokenAmount, RuntimeError> {
        Ok(self.load::<MintState>(mint)?.supply)
    }

    fn token_balance(&self, mint: &Identity, holder: &Identity) -> Result<TokenAmount, RuntimeError> {
        Ok(self
            .load_optional::<TokenBalance>(&token_account(mint, holder))?
            .map(|b| b.amount)
            .unwrap_or_default())
    }

    fn open_token_account(
        &mut self,
        mint: &Identity,
        holder: &Identity,
        payer: &Identity,
    ) -> Result<(), RuntimeError> {
        let record = TokenBalance {
            mint: *mint,
            holder: *holder,
            amount: TokenAmount::ZERO,
        };
        self.create_account(&token_account(mint, holder), payer, &record)
    }

    fn close_token_account(
        &mut self,
        mint: &Identity,
        holder: &Identity,
        recipient: &Identity,
    ) -> Result<(), RuntimeError> {
        let id = token_account(mint, holder);
        let record = self.load::<TokenBalance>(&id)?;
        if !record.amount.is_zero() {
            return Err(RuntimeError::NonZeroBalance(id));
        }
        self.close_account(&id, recipient)?;
        Ok(())
    }

    fn mint_to(
        &mut self,
        authority: &Identity,
        mint: &Identity,
        to: &Identity,
        amount: TokenAmount,
    ) -> Result<(), RuntimeError> {
        let mut state = self.load::<MintState>(mint)?;
        if state.authority != *authority {
            return Err(RuntimeError::Unauthorized(*authority));
        }
        state.supply = state.supply.checked_add(amount).ok_or(RuntimeError::Overflow)?;
        let balance = self.token_balance(mint, to)?;
        let balance = balance.checked_add(amount).ok_or(RuntimeError::Overflow)?;
        self.save(mint, &state)?;
        self.set_token_balance(mint, to, balance)
    }

    fn transfer_tokens(
        &mut self,
        mint: &Identity,
        from: &Identity,
        to: &Identity,
        amount: TokenAmount,
    ) -> Result<(), RuntimeError> {
        if amount.is_zero() {
            return Ok(());
        }
        let from_balance = self.token_balance(mint, from)?;
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(RuntimeError::InsufficientFunds {
                needed: amount.raw(),
                available: from_balance.raw(),
            })?;
        self.set_token_balance(mint, from, remaining)?;
        let to_balance = self.token_balance(mint, to)?;
        let credited = to_balance.checked_add(amount).ok_or(RuntimeError::Overflow)?;
        self.set_token_balance(mint, to, credited)
    }
}
