//! Environment readiness check.

use crate::config::Config;
use crate::renderer::chromium::find_chromium;
use anyhow::Result;

/// Check Chromium availability and archive root writability.
pub async fn run() -> Result<()> {
    println!("Pagevault Doctor");
    println!("================");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    let chromium = find_chromium();
    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install it or set PAGEVAULT_CHROMIUM_PATH."
        ),
    }

    let cfg = Config::from_env();
    let root_ok = match std::fs::create_dir_all(&cfg.archive_root) {
        Ok(()) => {
            println!("[OK] Archive root writable: {}", cfg.archive_root.display());
            true
        }
        Err(e) => {
            println!(
                "[!!] Archive root not writable: {} ({e})",
                cfg.archive_root.display()
            );
            false
        }
    };

    println!();
    if chromium.is_some() && root_ok {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
