mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "Provision and tear down cluster cloud infrastructure", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a resource
    #[command(subcommand)]
    Create(CreateCommands),
    /// Delete a resource
    #[command(subcommand)]
    Delete(DeleteCommands),
    /// List resources
    #[command(subcommand)]
    List(ListCommands),
    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum CreateCommands {
    /// Create a cluster
    Cluster {
        /// Cluster name
        name: String,
    },
    /// Launch an EC2 instance for a cluster
    Instance {
        /// Cluster the instance belongs to
        cluster: String,
        /// AMI to launch
        #[arg(long)]
        image: String,
        /// Instance type
        #[arg(long = "type", default_value = "t3.micro")]
        instance_type: String,
    },
}

#[derive(Subcommand)]
enum DeleteCommands {
    /// Delete a cluster
    Cluster {
        /// Cluster name
        name: String,
    },
    /// Terminate an EC2 instance
    Instance {
        /// Instance id
        id: String,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// List EC2 instances
    Instances,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Version needs no credentials
    if matches!(cli.command, Commands::Version) {
        println!("stratus {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match cli.command {
        Commands::Create(CreateCommands::Cluster { name }) => {
            commands::cluster::create(&name).await?;
        }
        Commands::Create(CreateCommands::Instance {
            cluster,
            image,
            instance_type,
        }) => {
            commands::instance::create(&cluster, &image, &instance_type).await?;
        }
        Commands::Delete(DeleteCommands::Cluster { name }) => {
            commands::cluster::delete(&name).await?;
        }
        Commands::Delete(DeleteCommands::Instance { id }) => {
            commands::instance::delete(&id).await?;
        }
        Commands::List(ListCommands::Instances) => {
            commands::instance::list().await?;
        }
        Commands::Version => {
            unreachable!("Version is handled before dispatch");
        }
    }

    Ok(())
}
