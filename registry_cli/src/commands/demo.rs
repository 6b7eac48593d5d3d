use anyhow::{Context, Result, bail};
use registry_db::{Registry, RegistryConfig};
use tracing::info;

use crate::config::Config;
use crate::render;
use crate::session::Session;

const DEMO_BUYER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

/// Scripted walkthrough: register, list, sell to a second wallet, inspect.
pub async fn run(config: &Config, json: bool, instant: bool) -> Result<()> {
    let registry_config = if instant {
        RegistryConfig::instant()
    } else {
        config.delays.registry_config()
    };
    let session = Session::new(
        Registry::new(registry_config),
        &config.account,
        &config.certificate_dir,
    );

    if let Some(snapshot) = walkthrough(&session, json).await? {
        println!("{}", snapshot);
    }

    Ok(())
}

/// Status line on stdout, or on the log when stdout carries JSON.
fn announce(json: bool, message: &str) {
    if json {
        info!("{}", message);
    } else {
        println!("{}", message);
    }
}

/// Runs the script against `session`. In JSON mode nothing is printed and the
/// final ledger snapshot is returned instead.
async fn walkthrough(session: &Session, json: bool) -> Result<Option<String>> {
    let first = session.register("Plot 1, Riverside", "1000 sq ft").await?;
    let second = session.register("Plot 2, Hillcrest", "2500 sq ft").await?;
    announce(json, &format!("Property registered on blockchain! ({})", first.property_id));
    announce(json, &format!("Property registered on blockchain! ({})", second.property_id));

    session.list_for_sale(&first.property_id, "50 ETH").await?;
    announce(json, &format!("Property listed for sale! ({} @ 50 ETH)", first.property_id));

    if !json {
        render::print_records("My Properties", &session.my_properties());
        render::print_records("Properties For Sale", &session.market());
    }

    let purchase = session
        .registry()
        .buy(&first.property_id, DEMO_BUYER)
        .await
        .context("Demo purchase failed")?;
    announce(
        json,
        &format!("Purchase successful! {} now owns {}", DEMO_BUYER, first.property_id),
    );

    match session.registry().buy(&second.property_id, DEMO_BUYER).await {
        Ok(_) => bail!("{} was sold without being listed", second.property_id),
        Err(e) => announce(json, &format!("Purchase failed! ({})", e)),
    }

    session
        .registry()
        .verify_chain()
        .context("Chain links are inconsistent")?;

    if json {
        let snapshot = serde_json::to_string_pretty(&session.status())
            .context("Failed to serialize ledger")?;
        return Ok(Some(snapshot));
    }

    render::print_receipt(&purchase);
    if let Some(history) = session.history(&first.property_id) {
        render::print_history(&history);
    }
    render::print_records("All Properties", &session.status());

    if let Some(text) = session.certificate_text(&first.property_id) {
        println!("{}", text);
    }

    Ok(None)
}
