//! Demo CLI for the credential toolkit.
//!
//! # Flow
//!
//! ```text
//!     pin-file / pin-json ──▶ metadata URI
//!     mint ──────────────────▶ asset id (institution holds the unit)
//!     opt-in ────────────────▶ student registers willingness to hold it
//!     transfer ──────────────▶ unit moves to the student
//!     list / info ───────────▶ read-only lookups via the indexer
//! ```
//!
//! This layer follows demo policy: print the failure and exit non-zero.
//! The library underneath returns structured errors and never terminates
//! the process.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use algocred::algod::AlgodClient;
use algocred::crypto::{hd, mnemonic};
use algocred::indexer::IndexerClient;
use algocred::{
    Account, Address, Config, CredentialVerifier, IssuanceService, PinataClient, QueryService,
};

#[derive(Parser)]
#[command(name = "algocred", about = "Credential NFTs on Algorand", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mint a credential asset and print its id.
    Mint {
        /// Institution 25-word recovery phrase.
        #[arg(long, env = "INSTITUTION_MNEMONIC", hide_env_values = true)]
        mnemonic: String,
        /// Display name, e.g. "BS Computer Science".
        #[arg(long)]
        name: String,
        /// Metadata URI from a prior pin.
        #[arg(long)]
        url: String,
    },
    /// Opt a student wallet in to receive an asset.
    OptIn {
        /// Student 25-word recovery phrase.
        #[arg(long, env = "STUDENT_MNEMONIC", hide_env_values = true)]
        mnemonic: String,
        #[arg(long)]
        asset_id: u64,
    },
    /// Transfer a minted credential to an opted-in student.
    Transfer {
        #[arg(long, env = "INSTITUTION_MNEMONIC", hide_env_values = true)]
        mnemonic: String,
        /// Student address.
        #[arg(long)]
        student: String,
        #[arg(long)]
        asset_id: u64,
    },
    /// Check a credential through the contract model.
    Verify {
        /// Address the contract was created with as authorized institution.
        #[arg(long, env = "INSTITUTION_ADDRESS")]
        institution: String,
        asset_id: u64,
    },
    /// Print the contract model's descriptor.
    ContractInfo,
    /// List the credentials a wallet actually owns.
    List { address: String },
    /// Show a credential's creation parameters.
    Info { asset_id: u64 },
    /// Pin a file (e.g. a certificate PDF) and print its URI.
    PinFile { path: PathBuf },
    /// Pin a JSON metadata file and print its URI.
    PinJson { path: PathBuf },
    /// Derive an institution key from a BIP39 phrase.
    Derive {
        #[arg(long, env = "BIP39_MNEMONIC", hide_env_values = true)]
        phrase: String,
        #[arg(long, default_value_t = 0)]
        account: u32,
    },
    /// Report which words of a phrase are not in the wordlist.
    CheckWords { phrase: String },
    /// Brute-force the missing 25th word of a 24-word phrase.
    RecoverWord { phrase: String },
}

async fn run(config: Config, command: Command) -> algocred::Result<()> {
    match command {
        Command::Mint { mnemonic, name, url } => {
            let institution = Account::from_mnemonic(&mnemonic)?;
            let issuance = issuance_service(&config)?;
            let asset_id = issuance.mint_credential(&institution, &name, &url).await?;
            println!("{}", asset_id);
        }
        Command::OptIn { mnemonic, asset_id } => {
            let student = Account::from_mnemonic(&mnemonic)?;
            let issuance = issuance_service(&config)?;
            let txid = issuance.opt_in(&student, asset_id).await?;
            println!("{}", txid);
        }
        Command::Transfer {
            mnemonic,
            student,
            asset_id,
        } => {
            let institution = Account::from_mnemonic(&mnemonic)?;
            let student: Address = student.parse()?;
            let issuance = issuance_service(&config)?;
            let txid = issuance
                .transfer_credential(&institution, student, asset_id)
                .await?;
            println!("{}", txid);
        }
        Command::Verify {
            institution,
            asset_id,
        } => {
            let institution: Address = institution.parse()?;
            let verifier = CredentialVerifier::new(institution, issuance_service(&config)?);
            println!("{}", verifier.verify_credential(asset_id));
        }
        Command::ContractInfo => {
            println!("{}", algocred::verifier::CONTRACT_INFO);
        }
        Command::List { address } => {
            let address: Address = address.parse()?;
            let query = query_service(&config)?;
            for holding in query.list_credentials(&address).await? {
                println!("{}\tamount={}", holding.asset_id, holding.amount);
            }
        }
        Command::Info { asset_id } => {
            let query = query_service(&config)?;
            let params = query.get_credential_info(asset_id).await?;
            println!("name:     {}", params.name.as_deref().unwrap_or("-"));
            println!("unit:     {}", params.unit_name.as_deref().unwrap_or("-"));
            println!("url:      {}", params.url.as_deref().unwrap_or("-"));
            println!("total:    {}", params.total);
            println!("decimals: {}", params.decimals);
            println!("creator:  {}", params.creator);
        }
        Command::PinFile { path } => {
            let bytes = std::fs::read(&path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".to_string());
            let pinata = PinataClient::new(&config.pinning)?;
            println!("{}", pinata.store_file(&name, bytes).await?);
        }
        Command::PinJson { path } => {
            let text = std::fs::read_to_string(&path)?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| algocred::Error::Encoding(e.to_string()))?;
            let pinata = PinataClient::new(&config.pinning)?;
            println!("{}", pinata.store_json(&value).await?);
        }
        Command::Derive { phrase, account } => {
            let derived = hd::derive_account(&phrase, account)?;
            println!("address:  {}", derived.address());
            println!("mnemonic: {}", derived.mnemonic());
        }
        Command::CheckWords { phrase } => {
            let rejected = mnemonic::invalid_words(&phrase);
            if rejected.is_empty() {
                println!("all words valid");
            } else {
                println!("invalid words: {}", rejected.join(" "));
            }
        }
        Command::RecoverWord { phrase } => {
            let candidates = mnemonic::recover_checksum_word(&phrase);
            if candidates.is_empty() {
                println!("no valid 25th word found; check the 24 words");
            } else {
                for candidate in candidates {
                    println!("{} {}", phrase.trim(), candidate);
                }
            }
        }
    }
    Ok(())
}

fn issuance_service(config: &Config) -> algocred::Result<IssuanceService> {
    let node = AlgodClient::new(
        &config.algod.url,
        &config.algod.token,
        Duration::from_secs(config.algod.timeout_secs),
    )?;
    Ok(IssuanceService::new(Arc::new(node)))
}

fn query_service(config: &Config) -> algocred::Result<QueryService> {
    let index = IndexerClient::new(
        &config.indexer.url,
        Duration::from_secs(config.indexer.timeout_secs),
    )?;
    Ok(QueryService::new(Arc::new(index)))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algocred=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config, cli.command).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
