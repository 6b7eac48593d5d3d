use chrono::{DateTime, Utc};
use registry_db::Record;

const RULE: &str = "===========================================";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub fn file_name(property_id: &str) -> String {
    format!("Land_Certificate_{}.txt", property_id)
}

/// Plain text ownership certificate for one record.
pub fn render(record: &Record, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(RULE);
    out.push('\n');
    out.push_str("   BLOCKCHAIN LAND REGISTRY CERTIFICATE\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    out.push_str(&format!("Property ID: {}\n", record.property_id));
    out.push_str(&format!("Location: {}\n", record.location));
    out.push_str(&format!("Size: {}\n", record.size));
    out.push_str(&format!("Block Number: {}\n\n", record.sequence_number));

    out.push_str(&format!("Current Owner: {}\n", record.owner));
    out.push_str(&format!(
        "Registration Date: {}\n\n",
        record.created_at.format(DATE_FORMAT)
    ));

    out.push_str("--- TRANSFER HISTORY ---\n");
    if record.transfer_history.is_empty() {
        out.push_str("No transfers yet - Original Owner\n");
    } else {
        for (index, transfer) in record.transfer_history.iter().enumerate() {
            out.push_str(&format!("\nTransfer #{}:\n", index + 1));
            out.push_str(&format!("  From: {}\n", transfer.from));
            out.push_str(&format!("  To: {}\n", transfer.to));
            out.push_str(&format!("  Price: {}\n", transfer.price));
            out.push_str(&format!("  Date: {}\n", transfer.timestamp.format(DATE_FORMAT)));
            out.push_str(&format!("  Transaction Hash: {}\n", transfer.transaction_hash));
        }
    }

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str("This is a blockchain-verified certificate.\n");
    out.push_str(&format!("Generated on: {}\n", generated_at.format(DATE_FORMAT)));
    out.push_str(RULE);
    out.push('\n');

    out
}
