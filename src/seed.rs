//! Reversible share-code scheme for expedition seeds.
//! Code format: EV-<WORD><NN>, e.g., EV-SHERPA42

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Word list for share codes.
pub const WORD_LIST: [&str; 32] = [
    "SHERPA", "YETI", "ICEFALL", "CWM", "LHOTSE", "SUMMIT", "BASECMP", "CRAMPON", "OXYGEN",
    "ROPES", "LADDER", "SERAC", "CORNICE", "MONSOON", "KHUMBU", "PUJA", "FLAGS", "RIDGE",
    "COULOIR", "BIVOUAC", "PORTER", "GLACIER", "CREVASS", "WINDSLAB", "ALPINE", "ASCENT",
    "TRAVERSE", "BELAY", "ANCHOR", "CACHE", "SNOWCAVE", "HILLARY",
];

#[inline]
fn pack(word_index: u16, nn: u8) -> u16 {
    word_index & 0x001F | ((u16::from(nn) & 0x7F) << 5)
}

#[inline]
fn unpack(packed: u16) -> (u16, u8) {
    (packed & 0x001F, ((packed >> 5) & 0x7F) as u8)
}

fn compose_seed(word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    // Domain-separated FNV input
    let mut buf = [0u8; 9];
    buf[..6].copy_from_slice(b"YMATH-");
    buf[6] = (packed & 0xFF) as u8;
    buf[7] = (packed >> 8) as u8;
    buf[8] = 0xA5;
    let h = fnv1a64(&buf);
    (h & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

#[must_use]
pub fn encode_friendly(seed: u64) -> String {
    let packed = (seed & 0x0FFF) as u16;
    let (wi, mut nn) = unpack(packed);
    let word = WORD_LIST.get(wi as usize).copied().unwrap_or("SHERPA");
    if nn > 99 {
        nn %= 100;
    }
    format!("EV-{word}{nn:02}")
}

#[must_use]
pub fn decode_to_seed(code: &str) -> Option<u64> {
    let s = code.trim();
    let (prefix, rest) = s.split_once('-')?;
    if !prefix.eq_ignore_ascii_case("EV") {
        return None;
    }
    if rest.len() < 3 {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len() - 2);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let idx = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let wi = u16::try_from(idx).ok()?;
    Some(compose_seed(wi, nn))
}

#[must_use]
pub fn generate_code_from_entropy(entropy: u64) -> String {
    let wi = u16::try_from(entropy % WORD_LIST.len() as u64).unwrap_or(0);
    let nn = ((entropy >> 17) % 100) as u8;
    let seed = compose_seed(wi, nn);
    encode_friendly(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrips_code() {
        let seed = 0xDEAD_BEEF_CAFE_BABE;
        let code = encode_friendly(seed);
        let new_seed = decode_to_seed(&code).unwrap();
        assert_eq!(encode_friendly(new_seed), code);
    }

    #[test]
    fn ev_sherpa_42_stable() {
        let seed = decode_to_seed("EV-SHERPA42").unwrap();
        assert_eq!(encode_friendly(seed), "EV-SHERPA42");
        assert_eq!(decode_to_seed("ev-sherpa42"), Some(seed));
    }

    #[test]
    fn rejects_unknown_prefix_and_words() {
        assert!(decode_to_seed("XX-SHERPA42").is_none());
        assert!(decode_to_seed("EV-BANANA42").is_none());
        assert!(decode_to_seed("EV-1").is_none());
    }

    #[test]
    fn entropy_codes_stay_decodable() {
        for entropy in [0u64, 1, 0xFFFF, 0x1234_5678_9ABC] {
            let code = generate_code_from_entropy(entropy);
            assert!(decode_to_seed(&code).is_some(), "code {code}");
        }
    }
}
