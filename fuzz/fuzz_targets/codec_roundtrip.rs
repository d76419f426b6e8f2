#![no_main]
use libfuzzer_sys::fuzz_target;
use puid::{Chars, Puid};
use rand::rngs::StdRng;
use rand::SeedableRng;

fuzz_target!(|data: (u8, u8, String, Vec<u8>)| {
    let (which, len, text, bytes) = data;
    let chars = Chars::PREDEFINED[which as usize % Chars::PREDEFINED.len()].clone();
    let n = chars.chars().chars().count() as f64;
    let len = (len % 64) as f64 + 1.0;
    let Ok(puid) = Puid::builder().chars(chars).bits((len - 0.5) * n.log2()).build() else {
        return;
    };

    // Arbitrary input must be rejected cleanly, and anything accepted must
    // re-encode to itself.
    if let Ok(bits) = puid.decode(&text) {
        assert_eq!(puid.encode(&bits).unwrap(), text);
    }
    let _ = puid.encode(&bytes);

    // A replayed byte sequence can reject forever, so seed a generator instead.
    let mut seed = [0u8; 32];
    for (dst, src) in seed.iter_mut().zip(&bytes) {
        *dst = *src;
    }
    let mut generator = puid.generator_with(StdRng::from_seed(seed));
    let id = generator.generate();
    assert_eq!(id.chars().count(), puid.len());
    let bits = puid.decode(&id).unwrap();
    assert_eq!(puid.encode(&bits).unwrap(), id);
});
