//! In-process model of the CredentialVerifier contract.
//!
//! Mirrors the deployed demo contract's surface: a single authorized
//! institution fixed at creation, an issuance method gated on the caller,
//! and two read-only methods. `verify_credential` is deliberately a stub
//! returning a constant — the contract it models does the same, and this
//! module preserves that behavior rather than inventing verification
//! semantics.

use std::path::Path;

use crate::crypto::{Account, Address};
use crate::error::{Error, Result};
use crate::issuance::IssuanceService;

/// Descriptor the modeled contract returns from its info method.
pub const CONTRACT_INFO: &str = "CredentialVerifier - Algorand Credential System";

/// The contract model: one authorized institution, issuing through the
/// injected issuance service.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    authorized_institution: Address,
    issuance: IssuanceService,
}

impl CredentialVerifier {
    /// Equivalent of the contract's `create` method: fix the authorized
    /// institution for the lifetime of the instance.
    pub fn new(authorized_institution: Address, issuance: IssuanceService) -> Self {
        Self {
            authorized_institution,
            issuance,
        }
    }

    pub fn authorized_institution(&self) -> Address {
        self.authorized_institution
    }

    /// Issue a credential to a student. Only the authorized institution
    /// may call this; any other caller fails with `UnauthorizedSender`
    /// before anything is submitted.
    pub async fn issue_credential(
        &self,
        caller: &Account,
        student_address: Address,
        credential_name: &str,
        metadata_url: &str,
    ) -> Result<u64> {
        if caller.address() != self.authorized_institution {
            return Err(Error::UnauthorizedSender);
        }

        let asset_id = self
            .issuance
            .mint_credential(caller, credential_name, metadata_url)
            .await?;

        tracing::info!(
            asset_id = asset_id,
            student = %student_address,
            "Credential issued"
        );
        Ok(asset_id)
    }

    /// Stub preserved from the modeled contract: always `"Verified"`,
    /// regardless of input.
    pub fn verify_credential(&self, _asset_id: u64) -> &'static str {
        "Verified"
    }

    pub fn get_contract_info(&self) -> &'static str {
        CONTRACT_INFO
    }
}

/// Write the deployment identifier to a flat file. A convenience artifact
/// for demo scripts, not part of the issuance contract.
pub fn record_deployment(path: &Path, app_id: u64) -> Result<()> {
    std::fs::write(path, format!("{}\n", app_id))?;
    tracing::info!(app_id = app_id, path = %path.display(), "Deployment recorded");
    Ok(())
}

/// Read back a previously recorded deployment identifier.
pub fn read_deployment(path: &Path) -> Result<u64> {
    let text = std::fs::read_to_string(path)?;
    text.trim()
        .parse()
        .map_err(|_| Error::Encoding(format!("deployment record is not an id: {}", text.trim())))
}
