//! safe2link operator CLI.
//!
//! ```text
//! safe2link.toml + SAFE2LINK_* environment
//!     → LinkConfig → NetworkRegistry
//!     → SafeServiceApp (create) / RelayerAccount (claim)
//!     → LinkService
//! ```

use std::path::{Path, PathBuf};

use alloy::primitives::{hex, Address, Signature, U256};
use clap::{Parser, Subcommand};

use safe2link::blockchain::{RelayerAccount, TransactionSender};
use safe2link::config::{load_config, load_default, LinkConfig};
use safe2link::link::keys::{claim_digest, derive_key_pair, recover_claim_signer, sign_address_for_claim};
use safe2link::link::{CreatedLink, LinkService};
use safe2link::networks::NetworkRegistry;
use safe2link::observability::init_logging;
use safe2link::safe::SafeServiceApp;

const DEFAULT_CONFIG_FILE: &str = "safe2link.toml";

#[derive(Parser)]
#[command(name = "safe2link")]
#[command(about = "Shareable payment links funded from a Safe", long_about = None)]
struct Cli {
    /// Config file. Defaults to ./safe2link.toml when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported networks
    Networks,
    /// Show the claim authority derived from a seed
    Keys {
        #[arg(long)]
        seed: String,
    },
    /// Sign a claimant address with a link seed
    Sign {
        #[arg(long)]
        seed: String,
        #[arg(long)]
        claimant: Address,
    },
    /// Recover the claim authority from a claim signature
    Verify {
        #[arg(long)]
        claimant: Address,
        #[arg(long)]
        signature: String,
    },
    /// Number of links on a chain (the connected Safe's chain by default)
    Count {
        #[arg(long)]
        chain: Option<u64>,
    },
    /// Show a stored link
    Details {
        #[arg(long)]
        chain: u64,
        #[arg(long)]
        index: u64,
    },
    /// Prepare a link funded by the connected Safe
    Create {
        /// Token address; the zero address is the native asset
        #[arg(long, default_value_t = Address::ZERO)]
        token: Address,
        #[arg(long)]
        amount: String,
        /// Base URL the link parameters are appended to
        #[arg(long)]
        share_base: Option<String>,
    },
    /// Claim a link with the relayer account
    Claim {
        /// Share URL carrying chain, index and seed
        #[arg(long, conflicts_with_all = ["chain", "index", "seed"])]
        url: Option<String>,
        #[arg(long, required_unless_present = "url")]
        chain: Option<u64>,
        #[arg(long, required_unless_present = "url")]
        index: Option<u64>,
        #[arg(long, required_unless_present = "url")]
        seed: Option<String>,
        /// Recipient of the funds. Defaults to the relayer address.
        #[arg(long)]
        claimant: Option<Address>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = read_config(cli.config.as_deref())?;
    init_logging(&config.observability);

    let registry = NetworkRegistry::from_config(&config)?;

    match cli.command {
        Commands::Networks => {
            for network in registry.iter() {
                println!(
                    "{:<16} {:>8}  module {}  manager {}",
                    network.network.as_str(),
                    network.chain_id,
                    network.module_address,
                    network
                        .manager_address
                        .map(|a| a.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
        }
        Commands::Keys { seed } => {
            let pair = derive_key_pair(&seed)?;
            println!("{}", pair.address);
        }
        Commands::Sign { seed, claimant } => {
            let pair = derive_key_pair(&seed)?;
            let signature = sign_address_for_claim(claimant, &pair.private_key)?;
            println!("digest    {}", claim_digest(claimant));
            println!("signature 0x{}", hex::encode(signature.as_bytes()));
        }
        Commands::Verify { claimant, signature } => {
            let bytes = hex::decode(signature.trim())?;
            let signature = Signature::try_from(bytes.as_slice())?;
            println!("{}", recover_claim_signer(claimant, &signature)?);
        }
        Commands::Count { chain } => {
            let service = link_service(&config, registry)?;
            let count = match chain {
                Some(chain_id) => service.get_link_count_on(chain_id).await?,
                None => service.get_link_count().await?,
            };
            println!("{}", count);
        }
        Commands::Details { chain, index } => {
            let service = link_service(&config, registry)?;
            let record = service.get_link_details(chain, U256::from(index)).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Create {
            token,
            amount,
            share_base,
        } => {
            let service = link_service(&config, registry)?;
            match service.create_link(token, &amount).await? {
                Some(link) => match share_base {
                    Some(base) => println!("{}", link.to_url(&base)?),
                    None => println!("{}", serde_json::to_string_pretty(&link)?),
                },
                None => eprintln!("Nothing to submit"),
            }
        }
        Commands::Claim {
            url,
            chain,
            index,
            seed,
            claimant,
        } => {
            let link = match (url, chain, index, seed) {
                (Some(url), _, _, _) => CreatedLink::from_url(&url)?,
                (None, Some(c), Some(i), Some(p)) => CreatedLink { i, p, c },
                _ => return Err("either --url or --chain, --index and --seed are required".into()),
            };

            let account = relayer_account(&config)?;
            let claimant = claimant.unwrap_or_else(|| account.address());
            let service = link_service(&config, registry)?;
            let tx_hash = service
                .claim_link(link.c, link.i, &link.p, claimant, &account)
                .await?;

            let explorer = service
                .registry()
                .get_network_by_id(link.c)
                .and_then(|n| n.tx_url(tx_hash));
            match explorer {
                Some(url) => println!("{}", url),
                None => println!("{}", tx_hash),
            }
        }
    }

    Ok(())
}

fn read_config(path: Option<&Path>) -> Result<LinkConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(Path::new(DEFAULT_CONFIG_FILE))?,
        None => load_default()?,
    };
    Ok(config)
}

fn link_service(
    config: &LinkConfig,
    registry: NetworkRegistry,
) -> Result<LinkService<SafeServiceApp>, Box<dyn std::error::Error>> {
    let safe = SafeServiceApp::new(&config.safe, &registry)?;
    Ok(LinkService::new(safe, registry, config))
}

fn relayer_account(config: &LinkConfig) -> Result<RelayerAccount, Box<dyn std::error::Error>> {
    let account = RelayerAccount::from_env_with(
        |name| std::env::var(name).ok(),
        config.providers.clone(),
        config.relayer.clone(),
    )
    .map_err(|e| format!("claim needs a funded relayer key: {}", e))?;
    Ok(account)
}
