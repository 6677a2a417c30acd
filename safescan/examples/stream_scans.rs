//! Stream laser scans from a scanner on the local network

use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::time::sleep;

use safescan::ScannerDriver;
use safescan_core::ScannerConfiguration;
use safescan_types::{ScanRange, TenthOfDegree};

#[tokio::main]
async fn main() -> safescan::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let host: Ipv4Addr = std::env::var("HOST_IP")
        .unwrap_or_else(|_| "192.168.0.50".to_string())
        .parse()
        .expect("HOST_IP must be an IPv4 address");
    let device: Ipv4Addr = std::env::var("DEVICE_IP")
        .unwrap_or_else(|_| "192.168.0.10".to_string())
        .parse()
        .expect("DEVICE_IP must be an IPv4 address");

    let range = ScanRange::new(TenthOfDegree::new(0), TenthOfDegree::new(2750))?;
    let config = ScannerConfiguration::new(host, 55055, 50505, device, range)?
        .with_reply_timeout(Duration::from_millis(500))
        .with_start_retries(3);

    println!("Connecting to scanner at {device}...");
    let driver = ScannerDriver::connect(config, |scan| {
        println!("{scan}");
    })
    .await?;

    driver.start().await?.wait().await?;
    println!("✓ Session operational, streaming for 10 seconds");

    sleep(Duration::from_secs(10)).await;

    driver.stop().await?.wait().await?;
    println!("✓ Session stopped");

    Ok(())
}
