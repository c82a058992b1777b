use colored::Colorize;
use stratus_deploy::{ClusterAction, ClusterBootstrap, ClusterTeardown};

pub async fn create(name: &str) -> anyhow::Result<()> {
    let cloud_config = super::load_cloud_config()?;

    println!("{}", format!("Creating cluster {name}...").yellow());
    let bootstrap = ClusterBootstrap::new(name, cloud_config);
    bootstrap.run().await?;

    println!("{}", format!("✓ Cluster {name} created").green().bold());
    Ok(())
}

pub async fn delete(name: &str) -> anyhow::Result<()> {
    let cloud_config = super::load_cloud_config()?;

    println!("{}", format!("Deleting cluster {name}...").yellow());
    let teardown = ClusterTeardown::new(name, cloud_config);
    teardown.run().await?;

    println!("{}", format!("✓ Cluster {name} deleted").green().bold());
    Ok(())
}
