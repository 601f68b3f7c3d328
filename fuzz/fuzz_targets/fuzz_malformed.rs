#![no_main]
use gguf_forge::{MalformedKind, build_malformed_document};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    let index = u32::from_le_bytes(data[0..4].try_into().unwrap());
    let seed = u64::from_le_bytes(data[4..12].try_into().unwrap());

    match build_malformed_document(index, seed) {
        Ok(doc) => {
            assert!(index < MalformedKind::COUNT);
            assert!(!doc.is_empty());
            // Shape is fixed per index: only the garbage payload may vary.
            if index != MalformedKind::RandomGarbage.index() {
                let replay = build_malformed_document(index, seed.wrapping_add(1)).unwrap();
                assert_eq!(doc, replay);
            }
        }
        Err(_) => assert!(index >= MalformedKind::COUNT),
    }
});
