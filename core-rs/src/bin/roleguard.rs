//! roleguard - permission check CLI
//!
//! Evaluates descriptors against a role catalog file

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use roleguard_core::{
    user_has_permission, user_has_role, AuthzError, InMemoryRoleStore, PermissionChecker, PermissionDescriptor,
    RequestContext, RoleCatalog, RoleStore, UserId, CATALOG_ENV,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit code for an authorization denial
const EXIT_DENIED: i32 = 3;

#[derive(Parser)]
#[command(name = "roleguard")]
#[command(version)]
#[command(about = "Permission-string authorization checks", long_about = None)]
struct Cli {
    /// Log decisions (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CatalogArg {
    /// Role catalog YAML file
    #[arg(long, env = CATALOG_ENV)]
    catalog: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a descriptor and print it as JSON
    Parse {
        descriptor: String,
        /// Reject unknown actions, entities and access scopes
        #[arg(long)]
        strict: bool,
    },
    /// In-memory permission check for a catalog user
    Check {
        #[command(flatten)]
        catalog: CatalogArg,
        #[arg(long)]
        user: String,
        #[arg(long)]
        permission: String,
    },
    /// In-memory role check for a catalog user
    HasRole {
        #[command(flatten)]
        catalog: CatalogArg,
        #[arg(long)]
        user: String,
        #[arg(long)]
        role: String,
    },
    /// Store-backed require check; prints the denial body on failure
    Require {
        #[command(flatten)]
        catalog: CatalogArg,
        #[arg(long)]
        user: String,
        #[arg(long, conflicts_with = "role", required_unless_present = "role")]
        permission: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Print a role catalog as YAML
    Catalog {
        /// Print the stock admin/editor/user catalog
        #[arg(long)]
        standard: bool,
        #[arg(long, env = CATALOG_ENV)]
        catalog: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_store(arg: &CatalogArg) -> anyhow::Result<InMemoryRoleStore> {
    let catalog = RoleCatalog::load(&arg.catalog)
        .with_context(|| format!("loading catalog {}", arg.catalog.display()))?;
    Ok(InMemoryRoleStore::from_catalog(&catalog)?)
}

fn print_decision(allowed: bool) {
    println!("{}", if allowed { "allow" } else { "deny" });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse { descriptor, strict } => {
            let parsed = if strict {
                PermissionDescriptor::parse_strict(&descriptor)?
            } else {
                PermissionDescriptor::parse(&descriptor)
            };
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }

        Commands::Check { catalog, user, permission } => {
            let store = load_store(&catalog)?;
            let record = store.get_user(&UserId::new(user)).await?;
            print_decision(user_has_permission(record.as_ref(), &permission));
        }

        Commands::HasRole { catalog, user, role } => {
            let store = load_store(&catalog)?;
            let record = store.get_user(&UserId::new(user)).await?;
            print_decision(user_has_role(record.as_ref(), &role));
        }

        Commands::Require { catalog, user, permission, role } => {
            let checker = PermissionChecker::with_session_identity(Arc::new(load_store(&catalog)?));
            let ctx = RequestContext::authenticated(user);

            let result = match (permission, role) {
                (Some(permission), _) => checker.require_user_with_permission(&ctx, &permission).await,
                (None, Some(role)) => checker.require_user_with_role(&ctx, &role).await,
                (None, None) => anyhow::bail!("either --permission or --role is required"),
            };

            match result {
                Ok(id) => println!("{}", id),
                Err(AuthzError::Unauthorized(denial)) => {
                    println!("{}", serde_json::to_string_pretty(&denial)?);
                    std::process::exit(EXIT_DENIED);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Catalog { standard, catalog } => {
            let catalog = match (standard, catalog) {
                (true, _) => RoleCatalog::standard(),
                (false, Some(path)) => RoleCatalog::load(&path)?,
                (false, None) => anyhow::bail!("pass --standard or --catalog <file>"),
            };
            print!("{}", catalog.to_yaml()?);
        }
    }

    Ok(())
}
