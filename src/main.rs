use bigdecimal::num_bigint::BigInt;
use clap::{Parser, Subcommand};
use eyre::{Error, Result, WrapErr};
use log::info;

use lp_harness::chain::{ArtifactStore, LocalNode};
use lp_harness::config::Config;
use lp_harness::contracts::Contract;
use lp_harness::fixture::{FixtureAccounts, FixtureParams, LiquidityFixture};
use lp_harness::math::isqrt;
use lp_harness::models::pair::sort_token_strs;
use lp_harness::scenario::verify_initial_liquidity;
use lp_harness::utils::logger::setup_logger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the suite, add liquidity and check the pool
    Deploy {
        /// Print the handles and report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Floor square root of an integer
    Sqrt { value: String },
    /// Order two token addresses the way a pair stores them
    Sort { token_a: String, token_b: String },
    /// Print the effective configuration
    Config,
}

async fn deploy(config: &Config, json: bool) -> Result<(), Error> {
    let artifacts = ArtifactStore::open(&config.artifacts_dir)?;
    let mut required = config.dependency_artifacts();
    required.push(Contract::MockErc20.artifact_name());
    artifacts.require(&required)?;

    let node = LocalNode::start(config)?;
    let runtime = node.connect(artifacts, config.chain_id).await?;
    info!(
        "Connected to {} with {} artifacts loaded",
        node.endpoint(),
        runtime.artifacts().len()
    );

    let accounts = FixtureAccounts::from_runtime(&runtime).await?;
    let params = FixtureParams::default().with_deadline_secs(config.deadline_secs);
    let deployment = LiquidityFixture::new(&runtime, accounts, params.clone())
        .deploy_all()
        .await?;
    let report = verify_initial_liquidity(&runtime, &deployment, &params).await?;

    if json {
        let output = serde_json::json!({ "deployment": deployment, "report": report });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("factory  {}", deployment.factory);
        println!("router   {}", deployment.router);
        println!("weth     {}", deployment.weth);
        println!("tokenA   {}", deployment.token_a);
        println!("tokenB   {}", deployment.token_b);
        println!("pair     {}", deployment.pair);
        println!("reserves {}", report.reserves);
        println!("lp       {}", report.lp_balance);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    setup_logger(level)?;

    let config = Config::from_env()?;

    match cli.command {
        Commands::Deploy { json } => {
            info!("Deploying liquidity fixture (chain id {})", config.chain_id);
            deploy(&config, json).await?;
        }
        Commands::Sqrt { value } => {
            let value: BigInt = value
                .trim()
                .parse()
                .wrap_err_with(|| format!("{value:?} is not an integer"))?;
            println!("{}", isqrt(&value)?);
        }
        Commands::Sort { token_a, token_b } => {
            let (token0, token1) = sort_token_strs(&token_a, &token_b);
            println!("{token0}");
            println!("{token1}");
        }
        Commands::Config => {
            println!("{config:#?}");
        }
    }

    Ok(())
}
