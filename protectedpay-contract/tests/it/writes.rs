use crate::{alice, bob, contract_address, id, push_error, ALICE_CHECKSUM, CONTRACT_CHECKSUM};
use ethers_core::{
    types::{Bytes, TxHash, U256},
    utils::parse_ether,
};
use ethers_providers::MockProvider;
use protectedpay_chains::ChainRegistry;
use protectedpay_contract::{encode_call, ContractError, ProtectedPay};
use protectedpay_wallet::{Flagged, VendorFlag, WalletAdapter, WalletConfig, WalletSigner};
use serde_json::{json, Value};

type Client = ProtectedPay<WalletSigner<Flagged<MockProvider>>>;

/// A contract client on top of a wallet that only accepts raw requests.
fn client() -> (Client, MockProvider) {
    let mock = MockProvider::new();
    let handle = Flagged::new(mock.clone(), [VendorFlag::SeiGlobalWallet]);
    let config =
        WalletConfig { void_signer_vendors: vec![VendorFlag::SeiGlobalWallet], ..Default::default() };
    let signer = WalletAdapter::with_config(handle, alice(), config).signer();
    (ProtectedPay::new(contract_address(), signer).confirmations(0), mock)
}

fn hex(data: Bytes) -> Value {
    serde_json::to_value(data).unwrap()
}

/// Queues the wallet's answers to one raw submission.
fn expect_submission(mock: &MockProvider, hash: TxHash) {
    // responses are popped from the back
    mock.push::<U256, _>(U256::from(31)).unwrap();
    mock.push::<TxHash, _>(hash).unwrap();
}

#[tokio::test]
async fn send_to_address_goes_through_raw_fallback() {
    let (contract, mock) = client();
    expect_submission(&mock, TxHash::repeat_byte(0xab));

    let hash = contract.send_to_address(bob(), "1.5", "rent").await.unwrap();
    assert_eq!(hash, TxHash::repeat_byte(0xab));

    let data = encode_call("sendToAddress", (bob(), "rent".to_string())).unwrap();
    mock.assert_request(
        "eth_sendTransaction",
        [json!({
            "from": ALICE_CHECKSUM,
            "to": CONTRACT_CHECKSUM,
            "value": "0x14d1120d7b160000",
            "data": hex(data),
        })],
    )
    .unwrap();
    mock.assert_request("eth_chainId", ()).unwrap();
}

#[tokio::test]
async fn writes_without_value() {
    let (contract, mock) = client();
    expect_submission(&mock, TxHash::repeat_byte(1));
    expect_submission(&mock, TxHash::repeat_byte(2));

    contract.register_username("alice").await.unwrap();
    contract.claim_transfer_by_id(id(7)).await.unwrap();

    for data in [
        encode_call("registerUsername", "alice".to_string()).unwrap(),
        encode_call("claimTransferById", id(7)).unwrap(),
    ] {
        mock.assert_request(
            "eth_sendTransaction",
            [json!({
                "from": ALICE_CHECKSUM,
                "to": CONTRACT_CHECKSUM,
                "value": "0x0",
                "data": hex(data),
            })],
        )
        .unwrap();
        mock.assert_request("eth_chainId", ()).unwrap();
    }
}

#[tokio::test]
async fn group_payment_and_savings_pot() {
    let (contract, mock) = client();
    expect_submission(&mock, TxHash::repeat_byte(1));
    expect_submission(&mock, TxHash::repeat_byte(2));

    contract.create_group_payment(bob(), 4, "0.5", "dinner").await.unwrap();
    contract.create_savings_pot("holiday", "2", "summer").await.unwrap();

    let data =
        encode_call("createGroupPayment", (bob(), U256::from(4), "dinner".to_string())).unwrap();
    mock.assert_request(
        "eth_sendTransaction",
        [json!({
            "from": ALICE_CHECKSUM,
            "to": CONTRACT_CHECKSUM,
            "value": "0x6f05b59d3b20000",
            "data": hex(data),
        })],
    )
    .unwrap();
    mock.assert_request("eth_chainId", ()).unwrap();

    // the target is an argument, not a value
    let data = encode_call(
        "createSavingsPot",
        ("holiday".to_string(), parse_ether("2").unwrap(), "summer".to_string()),
    )
    .unwrap();
    mock.assert_request(
        "eth_sendTransaction",
        [json!({
            "from": ALICE_CHECKSUM,
            "to": CONTRACT_CHECKSUM,
            "value": "0x0",
            "data": hex(data),
        })],
    )
    .unwrap();
}

#[tokio::test]
async fn invalid_amount_sends_nothing() {
    let (contract, mock) = client();
    let err = contract.send_to_username("bob", "one ether", "").await.unwrap_err();
    assert!(matches!(err, ContractError::ConversionError(_)));
    assert!(mock.assert_request("eth_sendTransaction", ()).is_err());
}

#[tokio::test]
async fn rejection_is_described() {
    let (contract, mock) = client();
    push_error(&mock, 4001, "User rejected the request.");

    let err = contract.contribute_to_savings_pot(id(3), "0.1").await.unwrap_err();
    assert!(err.is_user_rejection());
    assert_eq!(
        err.describe(ChainRegistry::builtin(), Some(31)),
        "Transaction was rejected by user"
    );
}

#[tokio::test]
async fn insufficient_funds_is_described() {
    let (contract, mock) = client();
    push_error(&mock, -32000, "insufficient funds for gas * price + value");

    let err = contract.contribute_to_group_payment(id(5), "10").await.unwrap_err();
    assert!(!err.is_user_rejection());
    assert_eq!(
        err.describe(ChainRegistry::builtin(), Some(1328)),
        "Insufficient SEI for transaction"
    );
}
