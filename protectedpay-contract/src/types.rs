use ethers_core::{
    types::{Address, H256, U256},
    utils::format_ether,
};
use serde::Serialize;
use std::fmt;

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:literal => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant,)+
            /// A status code this client does not know
            Unknown(u8),
        }

        impl From<u8> for $name {
            fn from(code: u8) -> Self {
                match code {
                    $($code => $name::$variant,)+
                    other => $name::Unknown(other),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant => f.write_str($text),)+
                    $name::Unknown(code) => write!(f, "Unknown ({code})"),
                }
            }
        }
    };
}

status_enum! {
    /// Lifecycle of a protected transfer.
    TransferStatus { Pending = 0 => "Pending", Claimed = 1 => "Completed", Refunded = 2 => "Refunded" }
}

status_enum! {
    /// Lifecycle of a group payment.
    GroupPaymentStatus { Pending = 0 => "Pending", Completed = 1 => "Completed" }
}

status_enum! {
    /// Lifecycle of a savings pot.
    PotStatus { Active = 0 => "Active", Broken = 1 => "Broken" }
}

/// Raw `getTransferDetails` / `getUserTransfers` entry.
pub(crate) type RawTransfer = (Address, Address, U256, U256, u8, String);

/// Raw `getGroupPaymentDetails` output.
pub(crate) type RawGroupPayment = (Address, Address, U256, U256, U256, U256, U256, u8, String);

/// Raw `getSavingsPotDetails` output.
pub(crate) type RawSavingsPot = (Address, String, U256, U256, U256, u8, String);

/// Raw `getUserProfile` output.
pub(crate) type RawUserProfile = (String, Vec<H256>, Vec<H256>, Vec<H256>, Vec<H256>);

/// A protected transfer. Amounts are in ether units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub sender: Address,
    pub recipient: Address,
    pub amount: String,
    /// Unix time in seconds
    pub timestamp: u64,
    pub status: TransferStatus,
    pub remarks: String,
}

impl From<RawTransfer> for Transfer {
    fn from((sender, recipient, amount, timestamp, status, remarks): RawTransfer) -> Self {
        Self {
            sender,
            recipient,
            amount: format_ether(amount),
            timestamp: timestamp.low_u64(),
            status: status.into(),
            remarks,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayment {
    pub id: H256,
    pub creator: Address,
    pub recipient: Address,
    pub total_amount: String,
    pub amount_per_person: String,
    pub num_participants: u64,
    pub amount_collected: String,
    pub timestamp: u64,
    pub status: GroupPaymentStatus,
    pub remarks: String,
}

impl GroupPayment {
    pub(crate) fn from_raw(id: H256, raw: RawGroupPayment) -> Self {
        let (
            creator,
            recipient,
            total_amount,
            amount_per_person,
            num_participants,
            amount_collected,
            timestamp,
            status,
            remarks,
        ) = raw;
        Self {
            id,
            creator,
            recipient,
            total_amount: format_ether(total_amount),
            amount_per_person: format_ether(amount_per_person),
            num_participants: num_participants.low_u64(),
            amount_collected: format_ether(amount_collected),
            timestamp: timestamp.low_u64(),
            status: status.into(),
            remarks,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPot {
    pub id: H256,
    pub owner: Address,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub timestamp: u64,
    pub status: PotStatus,
    pub remarks: String,
}

impl SavingsPot {
    pub(crate) fn from_raw(id: H256, raw: RawSavingsPot) -> Self {
        let (owner, name, target_amount, current_amount, timestamp, status, remarks) = raw;
        Self {
            id,
            owner,
            name,
            target_amount: format_ether(target_amount),
            current_amount: format_ether(current_amount),
            timestamp: timestamp.low_u64(),
            status: status.into(),
            remarks,
        }
    }
}

/// A registered user and the ids of everything they took part in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub transfer_ids: Vec<H256>,
    pub group_payment_ids: Vec<H256>,
    pub participated_group_payments: Vec<H256>,
    pub savings_pot_ids: Vec<H256>,
}

impl From<RawUserProfile> for UserProfile {
    fn from(
        (username, transfer_ids, group_payment_ids, participated_group_payments, savings_pot_ids): RawUserProfile,
    ) -> Self {
        Self {
            username,
            transfer_ids,
            group_payment_ids,
            participated_group_payments,
            savings_pot_ids,
        }
    }
}
