#![no_main]
use gguf_forge::{GGUF_MAGIC, build_random_document};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    let seed = u64::from_le_bytes(data[0..8].try_into().unwrap());
    let budget = u64::from(u32::from_le_bytes(data[8..12].try_into().unwrap()) % (1 << 20));

    let doc = match build_random_document(budget, seed) {
        Ok(doc) => doc,
        Err(_) => return, // budget below the floor
    };

    assert!(doc.starts_with(GGUF_MAGIC));
    assert!(doc.len() >= 24);

    // Same seed, same bytes.
    let again = build_random_document(budget, seed).unwrap();
    assert_eq!(doc, again);
});
