use colored::Colorize;
use stratus_cloud_aws::{AwsCloudManager, CreateInstanceConfig, InstanceInfo};

pub async fn create(cluster: &str, image: &str, instance_type: &str) -> anyhow::Result<()> {
    let cloud_config = super::load_cloud_config()?;
    let manager = AwsCloudManager::new(cloud_config);

    let config = CreateInstanceConfig {
        image_id: image.to_string(),
        instance_type: instance_type.to_string(),
    };

    println!("{}", "Launching instance...".yellow());
    let info = manager.create_instance(&config, cluster).await?;
    println!("Instance launched: {}", info.instance_id.cyan());

    manager.wait_for_instance_running(&info.instance_id).await?;
    println!("{}", "✓ Instance is running".green().bold());

    // Describe again: IPs are only assigned once the instance is up
    if let Some(details) = manager.describe_instance(&info.instance_id).await? {
        print_details(&details);
    }

    Ok(())
}

pub async fn delete(id: &str) -> anyhow::Result<()> {
    let cloud_config = super::load_cloud_config()?;
    let manager = AwsCloudManager::new(cloud_config);

    manager.delete_instance(id).await?;
    println!("{}", format!("✓ Instance {id} terminating").green().bold());
    Ok(())
}

pub async fn list() -> anyhow::Result<()> {
    let cloud_config = super::load_cloud_config()?;
    let manager = AwsCloudManager::new(cloud_config);

    let instances = manager.list_instances().await?;
    if instances.is_empty() {
        println!("No instances found.");
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<20} {:<15} {:<12} {:<16} {:<16}",
            "INSTANCE ID", "STATE", "TYPE", "PUBLIC IP", "PRIVATE IP"
        )
        .bold()
    );
    for instance in &instances {
        println!(
            "{:<20} {:<15} {:<12} {:<16} {:<16}",
            instance.instance_id,
            instance.state,
            instance.instance_type,
            instance.public_ip,
            instance.private_ip
        );
    }

    Ok(())
}

fn print_details(info: &InstanceInfo) {
    println!();
    println!("{}", "Instance details:".bold());
    println!("  ID:         {}", info.instance_id);
    println!("  State:      {}", info.state);
    println!("  Type:       {}", info.instance_type);
    println!("  Public IP:  {}", info.public_ip);
    println!("  Private IP: {}", info.private_ip);
}
