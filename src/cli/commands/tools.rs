//! Extraction tool and credential checks.

use tokio::runtime::Runtime;

use crate::config;
use crate::resolve::extractor_version;

use super::{mask_key, print_extractor_install_instructions};

/// Check that the extraction tool runs and report configured keys
pub fn cmd_check_tools(rt: &Runtime) -> anyhow::Result<()> {
    println!("Checking resolver tools...\n");

    let config = config::load();
    let extractor = config.extractor_config();

    if let Some(version) = rt.block_on(extractor_version(&extractor)) {
        println!("✓ {}: {}", extractor.program, version);
    } else {
        println!("✗ {}: NOT FOUND", extractor.program);
        print_extractor_install_instructions(&extractor.program);
    }
    println!("  Working directories under {:?}", extractor.temp_root);

    println!();
    println!("API Keys:");
    let keys = config.api_keys();
    if keys.is_empty() {
        println!("✗ YouTube Data API: no keys configured");
        println!("  YouTube searches will run through {}", extractor.program);
        println!("  Get one at: https://console.cloud.google.com/apis/library/youtube.googleapis.com");
    } else {
        for (i, key) in keys.iter().enumerate() {
            println!("✓ YouTube key #{}: {}", i + 1, mask_key(key));
        }
    }

    Ok(())
}
