use registry_db::{HistoryView, Purchase, Record};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn short(token: &str) -> String {
    token.chars().take(10).collect()
}

pub fn print_records(title: &str, records: &[Record]) {
    println!("--- {} ({}) ----", title, records.len());

    if records.is_empty() {
        println!("(none)");
    }

    for record in records {
        let sale = match (record.for_sale, &record.price) {
            (true, Some(price)) => format!("FOR SALE @ {}", price),
            _ => "not for sale".to_string(),
        };

        println!(
            "#{} {} [Location: {}] [Size: {}] [Owner: {}] [{}] [Hash: {}...] [Prev-Hash: {}...]",
            record.sequence_number,
            record.property_id,
            record.location,
            record.size,
            record.owner,
            sale,
            short(&record.pseudo_hash),
            short(&record.previous_pseudo_hash),
        );
    }
    println!("-----------------");
}

pub fn print_history(history: &HistoryView) {
    println!("--- History of {} ----", history.property_id);
    println!("Current Owner: {}", history.current_owner);
    println!("Block Number:  {}", history.sequence_number);
    println!("Block Hash:    {}", history.pseudo_hash);
    println!("Registered:    {}", history.created_at.format(DATE_FORMAT));

    if history.transfer_history.is_empty() {
        println!("No transfers yet - Original Owner");
    }

    for (index, transfer) in history.transfer_history.iter().enumerate() {
        println!(
            "{}: {} -> {} for {} on {} (tx {})",
            index + 1,
            transfer.from,
            transfer.to,
            transfer.price,
            transfer.timestamp.format(DATE_FORMAT),
            transfer.transaction_hash
        );
    }
    println!("-----------------");
}

pub fn print_receipt(purchase: &Purchase) {
    let receipt = &purchase.receipt;
    println!("Receipt for {}", receipt.property_id);
    println!("  From:  {}", receipt.from);
    println!("  To:    {}", receipt.to);
    println!("  Price: {}", receipt.price);
    println!("  Tx:    {}", receipt.transaction_hash);
}
