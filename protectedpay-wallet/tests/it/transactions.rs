use crate::{
    push_error, recipient, sender, ScriptedWallet, RECIPIENT_CHECKSUM, SENDER_CHECKSUM,
};
use ethers_core::{
    types::{transaction::eip2718::TypedTransaction, Bytes, TransactionRequest, TxHash, U256},
    utils::parse_ether,
};
use ethers_providers::{Middleware, MiddlewareError, Provider};
use protectedpay_wallet::{CompatError, CompatSigner, USER_REJECTED};
use serde_json::json;

fn hash() -> TxHash {
    TxHash::repeat_byte(0xaa)
}

#[tokio::test]
async fn raw_fallback_sends_value_transfer() {
    let (provider, mock) = Provider::mocked();
    // responses are popped from the back
    mock.push::<U256, _>(U256::from(31)).unwrap();
    mock.push::<TxHash, _>(hash()).unwrap();
    let signer = CompatSigner::new(ScriptedWallet::new(provider).failing_send(4200), sender());

    let tx = TransactionRequest::new().to(recipient()).value(parse_ether("1.5").unwrap());
    let handle = signer.submit_transaction(tx, None).await.unwrap();

    mock.assert_request(
        "eth_sendTransaction",
        [json!({
            "from": SENDER_CHECKSUM,
            "to": RECIPIENT_CHECKSUM,
            "value": "0x14d1120d7b160000",
            "data": "0x",
        })],
    )
    .unwrap();
    mock.assert_request("eth_chainId", ()).unwrap();

    assert_eq!(handle.hash, hash());
    assert_eq!(handle.from, sender());
    assert_eq!(handle.to, Some(recipient()));
    assert_eq!(handle.value, parse_ether("1.5").unwrap());
    assert_eq!(handle.data, Bytes::default());
    assert_eq!(handle.chain_id, Some(U256::from(31)));
    assert_eq!(handle.nonce, U256::zero());
    assert_eq!(handle.gas, U256::zero());
    assert_eq!(handle.gas_price, U256::zero());
    assert_eq!(*handle.pending(), hash());
}

#[tokio::test]
async fn raw_fallback_contract_call_and_deployment() {
    let (provider, mock) = Provider::mocked();
    mock.push::<U256, _>(U256::from(1328)).unwrap();
    mock.push::<TxHash, _>(hash()).unwrap();
    mock.push::<U256, _>(U256::from(1328)).unwrap();
    mock.push::<TxHash, _>(hash()).unwrap();
    let signer = CompatSigner::new(ScriptedWallet::new(provider).failing_send(-32601), sender());

    // a contract call without value
    let call = TransactionRequest::new().to(recipient()).data(vec![0xde, 0xad, 0xbe, 0xef]).gas(90_000);
    signer.submit_transaction(call, None).await.unwrap();
    mock.assert_request(
        "eth_sendTransaction",
        [json!({
            "from": SENDER_CHECKSUM,
            "to": RECIPIENT_CHECKSUM,
            "value": "0x0",
            "data": "0xdeadbeef",
            "gasLimit": "0x15f90",
        })],
    )
    .unwrap();
    mock.assert_request("eth_chainId", ()).unwrap();

    // a deployment carries no recipient
    let deploy = TransactionRequest::new().data(vec![0x60, 0x80]).gas_price(5);
    let handle = signer.submit_transaction(deploy, None).await.unwrap();
    mock.assert_request(
        "eth_sendTransaction",
        [json!({
            "from": SENDER_CHECKSUM,
            "value": "0x0",
            "data": "0x6080",
            "gasPrice": "0x5",
        })],
    )
    .unwrap();
    assert_eq!(handle.to, None);
    assert_eq!(handle.chain_id, Some(U256::from(1328)));
}

#[tokio::test]
async fn raw_fallback_always_sends_from_bound_address() {
    let (provider, mock) = Provider::mocked();
    mock.push::<U256, _>(U256::from(31)).unwrap();
    mock.push::<TxHash, _>(hash()).unwrap();
    let signer = CompatSigner::new(ScriptedWallet::new(provider).failing_send(4200), sender());

    let tx = TransactionRequest::new().from(recipient()).to(recipient()).value(1);
    let handle = signer.submit_transaction(tx, None).await.unwrap();
    assert_eq!(handle.from, sender());
    mock.assert_request(
        "eth_sendTransaction",
        [json!({
            "from": SENDER_CHECKSUM,
            "to": RECIPIENT_CHECKSUM,
            "value": "0x1",
            "data": "0x",
        })],
    )
    .unwrap();
}

#[tokio::test]
async fn chain_id_failure_keeps_the_hash() {
    let (provider, mock) = Provider::mocked();
    push_error(&mock, -32603, "internal error");
    mock.push::<TxHash, _>(hash()).unwrap();
    let signer = CompatSigner::new(ScriptedWallet::new(provider).failing_send(4200), sender());

    let tx = TransactionRequest::new().to(recipient()).value(1);
    let handle = signer.submit_transaction(tx, None).await.unwrap();
    assert_eq!(handle.hash, hash());
    assert_eq!(handle.chain_id, None);
}

#[tokio::test]
async fn rejection_is_not_retried() {
    let (provider, mock) = Provider::mocked();
    let signer =
        CompatSigner::new(ScriptedWallet::new(provider).failing_send(USER_REJECTED), sender());

    let tx = TransactionRequest::new().to(recipient()).value(1);
    let err = signer.submit_transaction(tx, None).await.unwrap_err();
    assert!(matches!(err, CompatError::MiddlewareError(_)));
    assert_eq!(err.as_error_response().unwrap().code, USER_REJECTED);
    assert!(mock.assert_request("eth_sendTransaction", ()).is_err());
}

#[tokio::test]
async fn failed_fallback_is_reported() {
    let (provider, mock) = Provider::mocked();
    push_error(&mock, 4001, "User denied transaction signature");
    let signer = CompatSigner::new(ScriptedWallet::new(provider).failing_send(4200), sender());

    let tx = TransactionRequest::new().to(recipient()).value(1);
    let err = signer.submit_transaction(tx, None).await.unwrap_err();
    match &err {
        CompatError::Fallback { method, .. } => assert_eq!(*method, "eth_sendTransaction"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.as_error_response().unwrap().code, 4001);
}

#[tokio::test]
async fn standard_path_fills_handle_from_request() {
    let (provider, mock) = Provider::mocked();
    mock.push::<TxHash, _>(hash()).unwrap();
    let signer = CompatSigner::new(ScriptedWallet::new(provider), sender());

    let tx = TransactionRequest::new().to(recipient()).value(7).nonce(3).gas(21_000).chain_id(31);
    let handle = signer.submit_transaction(tx, None).await.unwrap();

    assert_eq!(handle.hash, hash());
    assert_eq!(handle.from, sender());
    assert_eq!(handle.to, Some(recipient()));
    assert_eq!(handle.value, U256::from(7));
    assert_eq!(handle.nonce, U256::from(3));
    assert_eq!(handle.gas, U256::from(21_000));
    assert_eq!(handle.chain_id, Some(U256::from(31)));
    // the standard path does not ask for the chain id
    mock.assert_request(
        "eth_sendTransaction",
        [<TypedTransaction as From<TransactionRequest>>::from(
            TransactionRequest::new()
                .from(sender())
                .to(recipient())
                .value(7)
                .nonce(3)
                .gas(21_000)
                .chain_id(31),
        )],
    )
    .unwrap();
    assert!(mock.assert_request("eth_chainId", ()).is_err());
}

#[tokio::test]
async fn middleware_send_transaction_uses_fallback() {
    let (provider, mock) = Provider::mocked();
    mock.push::<U256, _>(U256::from(31)).unwrap();
    mock.push::<TxHash, _>(hash()).unwrap();
    let signer = CompatSigner::new(ScriptedWallet::new(provider).failing_send(4200), sender());

    let pending = signer
        .send_transaction(TransactionRequest::new().to(recipient()).value(1), None)
        .await
        .unwrap();
    assert_eq!(*pending, hash());
}

#[tokio::test]
async fn connect_rebinds_and_keeps_fallback() {
    let (provider, _) = Provider::mocked();
    let signer = CompatSigner::new(ScriptedWallet::new(provider), sender());

    let (other, mock) = Provider::mocked();
    mock.push::<U256, _>(U256::from(1328)).unwrap();
    mock.push::<TxHash, _>(hash()).unwrap();
    let rebound = signer.connect(ScriptedWallet::new(other).failing_send(4200));
    assert_eq!(rebound.address(), sender());

    let handle = rebound
        .submit_transaction(TransactionRequest::new().to(recipient()).value(1), None)
        .await
        .unwrap();
    assert_eq!(handle.chain_id, Some(U256::from(1328)));
    assert_eq!(handle.from, sender());
}
