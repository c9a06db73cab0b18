mod commands;
mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use skyfleet_cloud_openstack::OsAuth;
use skyfleet_core::Abort;
use skyfleet_core::credentials::Credentials;
use skyfleet_core::ops::Subsystem;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skyfleet")]
#[command(
    about = "Operate a fleet of compute hosts: health checks, evacuation and provisioning",
    long_about = None
)]
struct Cli {
    /// Named credentials environment (listed in the environments index)
    #[arg(long, env = "SKYFLEET_ENV", global = true)]
    env: Option<String>,

    /// Directory holding the environments index and credential files
    #[arg(
        long,
        env = "SKYFLEET_CREDENTIALS_DIR",
        default_value = "credentials",
        global = true
    )]
    credentials_dir: PathBuf,

    /// Control-plane auth URL (overrides the credentials file)
    #[arg(long, global = true)]
    host: Option<String>,

    /// User name (overrides the credentials file)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Password (overrides the credentials file)
    #[arg(long, global = true)]
    password: Option<String>,

    /// Project / tenant (overrides the credentials file)
    #[arg(long, global = true)]
    project: Option<String>,

    /// User domain (overrides the credentials file)
    #[arg(long, global = true)]
    domain: Option<String>,

    /// Append-only run log path
    #[arg(long, default_value = "skyfleet.log", global = true)]
    log_file: PathBuf,

    /// Verbose debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check compute hosts for network and API access; optionally evacuate failed hosts
    CheckHosts {
        /// Restrict the scan to one host (exact name, case-insensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Auto-evacuate hosts that fail both liveness signals
        #[arg(long)]
        evacuate: bool,

        /// Maximum simultaneous host failures to auto-remediate
        /// (default: host count minus one)
        #[arg(long)]
        failsafe: Option<u32>,
    },
    /// Check compute hosts for API access only (no network probe)
    CheckHostsApi {
        /// Restrict the sweep to one host
        #[arg(long)]
        filter: Option<String>,
    },
    /// Check volume statuses
    CheckVolumes {
        /// Restrict the sweep to one volume by name
        #[arg(long)]
        filter: Option<String>,
    },
    /// Build capability clients and exercise one API call each
    CheckClients {
        /// Subsystem to check (default: all)
        client: Option<ClientArg>,
    },
    /// List telemetry meters with optional filters
    ListMetrics {
        /// Filter to one server's meters by display name
        #[arg(long)]
        server: Option<String>,

        /// Filter by metric name
        #[arg(long)]
        metric: Option<String>,

        /// Limit the result set
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// Create a server instance and wait for it to reach active
    CreateServer {
        #[arg(long)]
        name: String,

        /// Image display name
        #[arg(long)]
        image: String,

        /// Flavor display name
        #[arg(long)]
        flavor: String,

        /// Network display name
        #[arg(long)]
        network: String,

        /// Refuse to create when a server with this name already exists
        #[arg(long)]
        unique: bool,
    },
    /// Create a volume and wait for it to become available
    CreateVolume {
        /// Volume name
        #[arg(long, required_unless_present = "config", conflicts_with = "config")]
        name: Option<String>,

        /// Size in GiB
        #[arg(long, conflicts_with = "config")]
        size: Option<u32>,

        /// Description
        #[arg(long, conflicts_with = "config")]
        description: Option<String>,

        /// JSON spec file (required when passing metadata)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Delete an existing volume with the same name first
        #[arg(long)]
        force: bool,
    },
    /// Register an image, upload its payload and wait for active
    CreateImage {
        #[arg(long)]
        name: String,

        /// Image payload file
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value = "qcow2")]
        disk_format: String,

        #[arg(long, default_value = "bare")]
        container_format: String,
    },
    /// Create a stack from a template and wait for create_complete
    CreateStack {
        #[arg(long)]
        name: String,

        /// HOT template file
        #[arg(long)]
        template: PathBuf,
    },
    /// Show listings; use them to learn the inputs for create-server
    Show {
        object: ShowObject,

        /// Restrict to one entry by name where supported
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClientArg {
    All,
    Compute,
    Storage,
    Image,
    Orchestration,
    Network,
    Telemetry,
    Identity,
}

impl ClientArg {
    fn subsystems(self) -> Vec<Subsystem> {
        match self {
            ClientArg::All => Subsystem::ALL.to_vec(),
            ClientArg::Compute => vec![Subsystem::Compute],
            ClientArg::Storage => vec![Subsystem::Storage],
            ClientArg::Image => vec![Subsystem::Image],
            ClientArg::Orchestration => vec![Subsystem::Orchestration],
            ClientArg::Network => vec![Subsystem::Network],
            ClientArg::Telemetry => vec![Subsystem::Telemetry],
            ClientArg::Identity => vec![Subsystem::Identity],
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowObject {
    Hosts,
    HostsFull,
    Flavors,
    Networks,
    Images,
    Volumes,
    Stacks,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // No credentials or logging needed for version output
    if matches!(cli.command, Commands::Version) {
        println!("skyfleet {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(e) = logging::init(&cli.log_file, cli.debug) {
        eprintln!("failed to open run log: {e}");
        std::process::exit(1);
    }

    if let Err(abort) = run(cli).await {
        fail(abort);
    }
}

/// Process boundary for fatal paths: human message to stdout, full
/// numeric code plus descriptor to stderr, 3-digit status to the exit.
fn fail(abort: Abort) -> ! {
    tracing::error!("{} {}: {}", abort.code, abort.descriptor(), abort.message);
    println!("{}", abort.message.red());
    eprintln!("{} {}", abort.code, abort.descriptor());
    std::process::exit(abort.exit_status());
}

async fn run(cli: Cli) -> Result<(), Abort> {
    let creds = build_credentials(&cli)?;

    let session = skyfleet_cloud_openstack::build_session(OsAuth {
        auth_url: creds.host,
        username: creds.user,
        password: creds.password,
        project: creds.project,
        domain: creds.domain,
    });

    match cli.command {
        Commands::CheckHosts {
            filter,
            evacuate,
            failsafe,
        } => commands::hosts::check_hosts(&session, filter.as_deref(), evacuate, failsafe).await,
        Commands::CheckHostsApi { filter } => {
            commands::hosts::check_hosts_api(&session, filter.as_deref()).await
        }
        Commands::CheckVolumes { filter } => {
            commands::volumes::check_volumes(&session, filter.as_deref()).await
        }
        Commands::CheckClients { client } => {
            let subsystems = client.unwrap_or(ClientArg::All).subsystems();
            commands::clients::check(&session, &subsystems).await
        }
        Commands::ListMetrics {
            server,
            metric,
            limit,
        } => commands::metrics::list(&session, server.as_deref(), metric.as_deref(), limit).await,
        Commands::CreateServer {
            name,
            image,
            flavor,
            network,
            unique,
        } => commands::create::server(&session, name, image, flavor, network, unique).await,
        Commands::CreateVolume {
            name,
            size,
            description,
            config,
            force,
        } => commands::create::volume(&session, name, size, description, config, force).await,
        Commands::CreateImage {
            name,
            file,
            disk_format,
            container_format,
        } => commands::create::image(&session, name, file, disk_format, container_format).await,
        Commands::CreateStack { name, template } => {
            commands::create::stack(&session, name, template).await
        }
        Commands::Show { object, filter } => match object {
            ShowObject::Hosts => commands::show::hosts(&session).await,
            ShowObject::HostsFull => commands::show::hosts_full(&session, filter.as_deref()).await,
            ShowObject::Flavors => commands::show::flavors(&session).await,
            ShowObject::Networks => commands::show::networks(&session).await,
            ShowObject::Images => commands::show::images(&session).await,
            ShowObject::Volumes => commands::show::volumes(&session).await,
            ShowObject::Stacks => commands::show::stacks(&session).await,
        },
        Commands::Version => Ok(()),
    }
}

/// Load credentials from the named environment, or assemble them from
/// flags when no environment is given. Flags always win per field.
fn build_credentials(cli: &Cli) -> Result<Credentials, Abort> {
    let mut creds = match &cli.env {
        Some(env) => Credentials::load(&cli.credentials_dir, env)?,
        None => Credentials::from_parts(
            cli.host.clone(),
            cli.user.clone(),
            cli.password.clone(),
            cli.project.clone(),
            cli.domain.clone(),
        )?,
    };

    if let Some(host) = &cli.host {
        creds.host = host.clone();
    }
    if let Some(user) = &cli.user {
        creds.user = user.clone();
    }
    if let Some(password) = &cli.password {
        creds.password = password.clone();
    }
    if let Some(project) = &cli.project {
        creds.project = project.clone();
    }
    if let Some(domain) = &cli.domain {
        creds.domain = domain.clone();
    }

    Ok(creds)
}
