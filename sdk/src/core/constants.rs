use crate::prelude::*;

/// Token program that owns every mint created by this SDK
pub fn token_program_id() -> Pubkey {
    spl_token_2022::id()
}

/// Associated token account program used for holding accounts
pub fn associated_token_program_id() -> Pubkey {
    spl_associated_token_account::id()
}

/// Size of the extension type tag in a Token-2022 TLV entry
pub const TYPE_SIZE: usize = 2;

/// Size of the extension length prefix in a Token-2022 TLV entry
pub const LENGTH_SIZE: usize = 2;

/// Base-unit multiplier applied to the initial supply by the fixed scaling
/// mode. Only correct for mints with nine decimals.
pub const FIXED_SUPPLY_MULTIPLIER: u64 = 1_000_000_000;

/// Decimals for which `FIXED_SUPPLY_MULTIPLIER` is exact
pub const FIXED_SUPPLY_DECIMALS: u8 = 9;

/// Base fee charged per transaction signature
pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Form defaults
pub mod defaults {
    pub const DECIMALS: u8 = 9;
    pub const INITIAL_SUPPLY: &str = "0";
    pub const MINTABLE: bool = true;
    pub const URI: &str = "https://cdn.100xdevs.com/metadata.json";
}
