//! Mint account sizing and rent
//!
//! A Token-2022 mint that carries its own metadata is created at the size
//! of the base mint plus the MetadataPointer extension. Initializing the
//! metadata then grows the account by one TLV entry, so the rent-exempt
//! balance must cover both parts up front.

use spl_pod::optional_keys::OptionalNonZeroPubkey;
use spl_token_2022::{
    extension::ExtensionType,
    state::{Account, Mint},
};
use spl_token_metadata_interface::state::TokenMetadata;
use tracing::debug;

use crate::client::Ledger;
use crate::core::{SdkError, SdkResult, TokenSpec, LENGTH_SIZE, TYPE_SIZE};
use crate::prelude::*;

/// Borsh-packed metadata record, exactly as the token program stores it
#[derive(Clone, Debug, PartialEq)]
pub struct PackedMetadata {
    metadata: TokenMetadata,
    bytes: Vec<u8>,
}

impl PackedMetadata {
    pub fn new(spec: &TokenSpec, mint: &Pubkey, update_authority: &Pubkey) -> SdkResult<Self> {
        let metadata = TokenMetadata {
            update_authority: OptionalNonZeroPubkey(*update_authority),
            mint: *mint,
            name: spec.name.clone(),
            symbol: spec.symbol.clone(),
            uri: spec.uri.clone(),
            additional_metadata: Vec::new(),
        };
        let bytes = borsh::to_vec(&metadata)
            .map_err(|e| SdkError::SizingFailure(format!("Failed to pack metadata: {}", e)))?;
        Ok(Self { metadata, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }
}

/// Byte budget of a mint account with embedded metadata
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountLayout {
    /// Base mint plus account type and MetadataPointer extension
    pub mint_len: usize,
    /// Metadata TLV entry: type tag, length prefix and packed record
    pub metadata_len: usize,
}

impl AccountLayout {
    pub fn for_metadata(packed: &PackedMetadata) -> SdkResult<Self> {
        let mint_len =
            ExtensionType::try_calculate_account_len::<Mint>(&[ExtensionType::MetadataPointer])
                .map_err(|e| {
                    SdkError::SizingFailure(format!("Failed to calculate mint length: {}", e))
                })?;
        let metadata_len = TYPE_SIZE + LENGTH_SIZE + packed.len();

        Ok(Self {
            mint_len,
            metadata_len,
        })
    }

    /// Layout for a spec without knowing the final addresses. Keys are
    /// fixed width, so the result equals the layout of the real launch.
    pub fn estimate(spec: &TokenSpec) -> SdkResult<Self> {
        let placeholder = Pubkey::default();
        let packed = PackedMetadata::new(spec, &placeholder, &placeholder)?;
        Self::for_metadata(&packed)
    }

    /// Space the account occupies once metadata is written
    pub fn total_len(&self) -> usize {
        self.mint_len + self.metadata_len
    }
}

/// Size of the issuer's holding account. The associated token program
/// always gives Token-2022 accounts the ImmutableOwner extension.
pub fn holding_account_len() -> SdkResult<usize> {
    ExtensionType::try_calculate_account_len::<Account>(&[ExtensionType::ImmutableOwner]).map_err(
        |e| SdkError::SizingFailure(format!("Failed to calculate holding account length: {}", e)),
    )
}

/// Queries the ledger's rent-exemption rule for a layout
pub struct RentCalculator;

impl RentCalculator {
    pub async fn rent_exempt_minimum(ledger: &dyn Ledger, layout: &AccountLayout) -> SdkResult<u64> {
        let total = layout.total_len();
        let lamports = ledger
            .minimum_balance_for_rent_exemption(total)
            .await
            .map_err(|e| SdkError::SizingFailure(format!("Rent query for {} bytes failed: {}", total, e)))?;
        debug!(bytes = total, lamports, "Resolved rent-exempt minimum");
        Ok(lamports)
    }

    /// Rent the activation step pays for the holding account
    pub async fn holding_account_minimum(ledger: &dyn Ledger) -> SdkResult<u64> {
        let len = holding_account_len()?;
        ledger
            .minimum_balance_for_rent_exemption(len)
            .await
            .map_err(|e| SdkError::SizingFailure(format!("Rent query for {} bytes failed: {}", len, e)))
    }
}
