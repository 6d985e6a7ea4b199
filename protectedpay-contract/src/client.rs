use crate::{
    abi::{decode_output, encode_call},
    types::{
        GroupPayment, RawGroupPayment, RawSavingsPot, RawTransfer, RawUserProfile, SavingsPot,
        Transfer, UserProfile,
    },
    ContractError,
};
use ethers_core::{
    abi::{Detokenize, Tokenize},
    types::{transaction::eip2718::TypedTransaction, Address, TransactionRequest, TxHash, H256, U256},
    utils::{format_ether, parse_ether},
};
use ethers_providers::Middleware;
use protectedpay_chains::ChainRegistry;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Client for the ProtectedPay contract.
///
/// Writes submit one transaction through the middleware (normally the
/// wallet adapter's `CompatSigner`) and wait for its confirmations. Queries are `eth_call`s whose amounts come back formatted
/// in ether units.
#[derive(Debug)]
pub struct ProtectedPay<M> {
    client: Arc<M>,
    address: Address,
    confirmations: usize,
}

impl<M> Clone for ProtectedPay<M> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone(), address: self.address, confirmations: self.confirmations }
    }
}

impl<M: Middleware> ProtectedPay<M> {
    pub fn new(address: impl Into<Address>, client: impl Into<Arc<M>>) -> Self {
        Self { client: client.into(), address: address.into(), confirmations: 1 }
    }

    /// Binds to the deployment on the middleware's current chain. Chains
    /// without a deployment of their own use the registry's fallback chain.
    pub async fn connect(
        client: impl Into<Arc<M>>,
        registry: &ChainRegistry,
    ) -> Result<Self, ContractError<M>> {
        let client = client.into();
        let chain_id = client.get_chainid().await.map_err(ContractError::MiddlewareError)?.low_u64();
        let address = registry
            .contract_address(chain_id)
            .or_else(|| registry.fallback().and_then(|chain| chain.contract))
            .ok_or(ContractError::NotDeployed(chain_id))?;
        debug!(chain_id, ?address, "connected to ProtectedPay");
        Ok(Self::new(address, client))
    }

    /// Number of confirmations writes wait for. With `0` a write returns as
    /// soon as the transaction is submitted.
    #[must_use]
    pub fn confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn client(&self) -> &M {
        &self.client
    }

    /// Returns `true` if there is code at the contract address. Any failure
    /// is logged and reported as `false`.
    pub async fn is_contract_deployed(&self) -> bool {
        match self.client.get_code(self.address, None).await {
            Ok(code) => !code.is_empty(),
            Err(err) => {
                warn!(address = ?self.address, %err, "could not check the contract deployment");
                false
            }
        }
    }

    async fn query<T: Tokenize, D: Detokenize>(
        &self,
        name: &str,
        args: T,
    ) -> Result<D, ContractError<M>> {
        let tx: TypedTransaction =
            TransactionRequest::new().to(self.address).data(encode_call(name, args)?).into();
        trace!(function = name, "calling contract");
        let bytes = self.client.call(&tx, None).await.map_err(ContractError::MiddlewareError)?;
        Ok(decode_output(name, bytes)?)
    }

    async fn send<T: Tokenize>(
        &self,
        name: &str,
        args: T,
        value: Option<U256>,
    ) -> Result<TxHash, ContractError<M>> {
        let mut tx = TransactionRequest::new().to(self.address).data(encode_call(name, args)?);
        if let Some(value) = value {
            tx = tx.value(value);
        }

        let pending =
            self.client.send_transaction(tx, None).await.map_err(ContractError::MiddlewareError)?;
        let hash = *pending;
        debug!(function = name, ?hash, "submitted contract transaction");
        if self.confirmations == 0 {
            return Ok(hash)
        }
        match pending.confirmations(self.confirmations).await? {
            Some(_) => Ok(hash),
            None => Err(ContractError::Dropped(hash)),
        }
    }

    pub async fn register_username(&self, username: &str) -> Result<TxHash, ContractError<M>> {
        self.send("registerUsername", username.to_string(), None).await
    }

    /// Sends `amount` ether to `recipient`, claimable by them or refundable
    /// by the sender.
    pub async fn send_to_address(
        &self,
        recipient: Address,
        amount: &str,
        remarks: &str,
    ) -> Result<TxHash, ContractError<M>> {
        let value = parse_ether(amount)?;
        self.send("sendToAddress", (recipient, remarks.to_string()), Some(value)).await
    }

    pub async fn send_to_username(
        &self,
        username: &str,
        amount: &str,
        remarks: &str,
    ) -> Result<TxHash, ContractError<M>> {
        let value = parse_ether(amount)?;
        self.send("sendToUsername", (username.to_string(), remarks.to_string()), Some(value)).await
    }

    pub async fn claim_transfer_by_address(
        &self,
        sender: Address,
    ) -> Result<TxHash, ContractError<M>> {
        self.send("claimTransferByAddress", sender, None).await
    }

    pub async fn claim_transfer_by_username(
        &self,
        username: &str,
    ) -> Result<TxHash, ContractError<M>> {
        self.send("claimTransferByUsername", username.to_string(), None).await
    }

    pub async fn claim_transfer_by_id(&self, transfer_id: H256) -> Result<TxHash, ContractError<M>> {
        self.send("claimTransferById", transfer_id, None).await
    }

    pub async fn refund_transfer(&self, transfer_id: H256) -> Result<TxHash, ContractError<M>> {
        self.send("refundTransfer", transfer_id, None).await
    }

    /// Opens a group payment to `recipient` split among `num_participants`,
    /// seeded with the creator's own `amount`.
    pub async fn create_group_payment(
        &self,
        recipient: Address,
        num_participants: u64,
        amount: &str,
        remarks: &str,
    ) -> Result<TxHash, ContractError<M>> {
        let value = parse_ether(amount)?;
        let args = (recipient, U256::from(num_participants), remarks.to_string());
        self.send("createGroupPayment", args, Some(value)).await
    }

    pub async fn contribute_to_group_payment(
        &self,
        payment_id: H256,
        amount: &str,
    ) -> Result<TxHash, ContractError<M>> {
        let value = parse_ether(amount)?;
        self.send("contributeToGroupPayment", payment_id, Some(value)).await
    }

    pub async fn create_savings_pot(
        &self,
        name: &str,
        target_amount: &str,
        remarks: &str,
    ) -> Result<TxHash, ContractError<M>> {
        let target = parse_ether(target_amount)?;
        self.send("createSavingsPot", (name.to_string(), target, remarks.to_string()), None).await
    }

    pub async fn contribute_to_savings_pot(
        &self,
        pot_id: H256,
        amount: &str,
    ) -> Result<TxHash, ContractError<M>> {
        let value = parse_ether(amount)?;
        self.send("contributeToSavingsPot", pot_id, Some(value)).await
    }

    pub async fn break_pot(&self, pot_id: H256) -> Result<TxHash, ContractError<M>> {
        self.send("breakPot", pot_id, None).await
    }

    /// Address registered under `username`; zero if there is none.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Address, ContractError<M>> {
        self.query("getUserByUsername", username.to_string()).await
    }

    /// Username registered for `user`; empty if there is none.
    pub async fn get_user_by_address(&self, user: Address) -> Result<String, ContractError<M>> {
        self.query("getUserByAddress", user).await
    }

    pub async fn get_user_profile(&self, user: Address) -> Result<UserProfile, ContractError<M>> {
        let raw: RawUserProfile = self.query("getUserProfile", user).await?;
        Ok(raw.into())
    }

    pub async fn get_transfer_details(
        &self,
        transfer_id: H256,
    ) -> Result<Transfer, ContractError<M>> {
        let raw: RawTransfer = self.query("getTransferDetails", transfer_id).await?;
        Ok(raw.into())
    }

    pub async fn get_user_transfers(&self, user: Address) -> Result<Vec<Transfer>, ContractError<M>> {
        let raw: Vec<RawTransfer> = self.query("getUserTransfers", user).await?;
        Ok(raw.into_iter().map(Into::into).collect())
    }

    pub async fn get_pending_transfers(&self, user: Address) -> Result<Vec<H256>, ContractError<M>> {
        self.query("getPendingTransfers", user).await
    }

    pub async fn get_group_payment_details(
        &self,
        payment_id: H256,
    ) -> Result<GroupPayment, ContractError<M>> {
        let raw: RawGroupPayment = self.query("getGroupPaymentDetails", payment_id).await?;
        Ok(GroupPayment::from_raw(payment_id, raw))
    }

    /// The per-participant share of a group payment, in ether units.
    pub async fn get_payment_amount(&self, payment_id: H256) -> Result<String, ContractError<M>> {
        Ok(self.get_group_payment_details(payment_id).await?.amount_per_person)
    }

    pub async fn has_contributed_to_group_payment(
        &self,
        payment_id: H256,
        user: Address,
    ) -> Result<bool, ContractError<M>> {
        self.query("hasContributedToGroupPayment", (payment_id, user)).await
    }

    /// What `user` has put into a group payment, in ether units.
    pub async fn get_group_payment_contribution(
        &self,
        payment_id: H256,
        user: Address,
    ) -> Result<String, ContractError<M>> {
        let wei: U256 = self.query("getGroupPaymentContribution", (payment_id, user)).await?;
        Ok(format_ether(wei))
    }

    pub async fn get_savings_pot_details(
        &self,
        pot_id: H256,
    ) -> Result<SavingsPot, ContractError<M>> {
        let raw: RawSavingsPot = self.query("getSavingsPotDetails", pot_id).await?;
        Ok(SavingsPot::from_raw(pot_id, raw))
    }
}
