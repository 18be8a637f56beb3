//! SDK error types

use std::fmt;

use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Transaction step of a launch run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaunchStep {
    /// Create the mint account and write its metadata
    MintProvisioning,
    /// Create the issuer's associated token account
    AccountActivation,
    /// Mint the initial supply into the holding account
    SupplyIssuance,
}

impl fmt::Display for LaunchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaunchStep::MintProvisioning => "mint provisioning",
            LaunchStep::AccountActivation => "account activation",
            LaunchStep::SupplyIssuance => "supply issuance",
        };
        f.write_str(name)
    }
}

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Account layout or rent-exemption query failed
    #[error("Sizing failure: {0}")]
    SizingFailure(String),

    /// A built transaction was rejected, declined by the signer, or lost on the network
    #[error("Submission failure during {step}: {reason}")]
    SubmissionFailure { step: LaunchStep, reason: String },

    /// User input that cannot be turned into a token spec
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Local signing failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Instruction could not be encoded
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl SdkError {
    pub fn submission(step: LaunchStep, reason: impl fmt::Display) -> Self {
        SdkError::SubmissionFailure {
            step,
            reason: reason.to_string(),
        }
    }

    /// Step at which a submission failed, if this is a submission failure
    pub fn failed_step(&self) -> Option<LaunchStep> {
        match self {
            SdkError::SubmissionFailure { step, .. } => Some(*step),
            _ => None,
        }
    }
}

impl From<ProgramError> for SdkError {
    fn from(err: ProgramError) -> Self {
        SdkError::SerializationError(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
