use std::collections::HashSet;

/// `previous_pseudo_hash` of the first block.
pub const GENESIS_PREV_HASH: &str = "0x000";

const TOKEN_BYTES: usize = 8;

/// Random `0x`-prefixed token. Cosmetic only, nothing is hashed.
pub fn pseudo_hash() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    format!("0x{}", hex::encode(bytes))
}

/// Draws tokens until one not already in `issued`, then records it.
pub fn unique_token(issued: &mut HashSet<String>) -> String {
    loop {
        let token = pseudo_hash();
        if issued.insert(token.clone()) {
            return token;
        }
    }
}

pub fn property_id_for(sequence_number: u64) -> String {
    format!("PROP-{}", sequence_number)
}
