//! Substitution codec used by the ASV unit to obscure exported log lines.
//!
//! Each symbol of a fixed alphabet (digits, `.`, `-`, ASCII letters) maps to
//! an opaque token from a parallel table. Decoding scans left to right with a
//! longest-match-first rule; anything that matches no token passes through
//! unchanged, which is what keeps field delimiters like `,` literal in
//! encoded lines.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Plaintext alphabet, index-stable. Order matters: the token at the same
/// index in [`TOKENS`] is the encoded form of the symbol here.
const ALPHABET: [char; 64] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', //
    '.', '-', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', //
    'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', //
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', //
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', //
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', //
    'w', 'x', 'y', 'z',
];

/// Token table shipped in the device firmware. Two entries (`gH`, `jE`)
/// appear twice; the decode map is built in table order with later entries
/// overwriting, matching what deployed units expect.
const TOKENS: [&str; 64] = [
    "Dm", "An", "fo", "Up", "nq", "1r", ".s", "ot", "uC", "Nv", //
    "0Q", "F1", "2u", "3k", "4M", "O5", "d6", "7P", "8y", "x9", //
    "0S", "JT", "UR", "iV", "zW", "KX", "YI", "Zw", "aL", "Xb", //
    "T.", "-V", "A4", "B6", "Ch", "vD", "jE", "F9", "G8", "gH", //
    "Yc", "bd", "Be", "fG", "gH", "ah", "Zi", "jE", "kl", "lt", //
    "pI", "Jq", "K5", "LW", "M7", "N3", "O2", "mP", "eQ", "SR", //
    "ws", "xr", "yc", "z-",
];

static DATE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Heuristic plaintext test applied per line: a line that already contains a
/// comma and a `digits/digits/digits` date substring is taken as-is, anything
/// else goes through [`Codec::decode`] first. Files may mix both kinds of
/// line, so this is deliberately per-line, not per-file.
pub fn is_plaintext(line: &str) -> bool {
    let pattern = DATE_PATTERN
        .get_or_init(|| Regex::new(r"\d+/\d+/\d+").expect("Failed to compile date pattern"));
    line.contains(',') && pattern.is_match(line)
}

/// Bidirectional substitution codec over the fixed alphabet/token tables.
///
/// Construct once and share by reference; both directions are pure functions
/// of the input and the tables.
#[derive(Clone, Debug)]
pub struct Codec {
    decode_map: HashMap<&'static str, char>,
    encode_map: HashMap<char, &'static str>,
    /// Distinct token lengths present in the table, longest first. The
    /// current table is all two-character tokens, but the match loop is
    /// driven by this data so longer tokens keep working if the table grows.
    token_lengths: Vec<usize>,
}

impl Codec {
    pub fn new() -> Self {
        let mut decode_map = HashMap::with_capacity(TOKENS.len());
        let mut encode_map = HashMap::with_capacity(TOKENS.len());
        for (index, &token) in TOKENS.iter().enumerate() {
            // Last occurrence wins for duplicated tokens.
            decode_map.insert(token, ALPHABET[index]);
            encode_map.entry(ALPHABET[index]).or_insert(token);
        }

        let mut token_lengths: Vec<usize> = decode_map.keys().map(|t| t.len()).collect();
        token_lengths.sort_unstable_by(|a, b| b.cmp(a));
        token_lengths.dedup();

        Self {
            decode_map,
            encode_map,
            token_lengths,
        }
    }

    /// Decode one line. At each position the longest configured token length
    /// is tried first; on a match the corresponding alphabet symbol is
    /// emitted, otherwise the raw character passes through unchanged.
    pub fn decode(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() / 2 + 1);
        let mut i = 0;

        'scan: while i < line.len() {
            for &len in &self.token_lengths {
                if let Some(candidate) = line.get(i..i + len) {
                    if let Some(&symbol) = self.decode_map.get(candidate) {
                        out.push(symbol);
                        i += len;
                        continue 'scan;
                    }
                }
            }

            // No token starts here, keep the raw character.
            match line[i..].chars().next() {
                Some(ch) => {
                    out.push(ch);
                    i += ch.len_utf8();
                }
                None => break,
            }
        }

        out
    }

    /// Encode one line, substituting each alphabet symbol with its token.
    /// Characters outside the alphabet (commas, spaces, ...) are kept as-is.
    pub fn encode(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() * 2);
        for ch in line.chars() {
            match self.encode_map.get(&ch) {
                Some(token) => out.push_str(token),
                None => out.push(ch),
            }
        }
        out
    }

    /// Encode a whole multi-line text, preserving line breaks. Mirrors the
    /// fleet-side tool used to produce encoded fixtures.
    pub fn encode_text(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| self.encode(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_symbols() {
        let codec = Codec::new();
        assert_eq!(codec.encode("0"), "Dm");
        assert_eq!(codec.encode("9"), "Nv");
        assert_eq!(codec.encode("."), "0Q");
        assert_eq!(codec.encode("-"), "F1");
        assert_eq!(codec.encode("A"), "2u");
        assert_eq!(codec.encode("z"), "z-");
    }

    #[test]
    fn test_decode_token_sequence() {
        let codec = Codec::new();
        // "Dm" + "An" + "fo" = "012"
        assert_eq!(codec.decode("DmAnfo"), "012");
    }

    #[test]
    fn test_empty_input() {
        let codec = Codec::new();
        assert_eq!(codec.decode(""), "");
        assert_eq!(codec.encode(""), "");
    }

    #[test]
    fn test_passthrough_outside_alphabet() {
        let codec = Codec::new();
        assert_eq!(codec.encode(","), ",");
        assert_eq!(codec.encode(" "), " ");
        assert_eq!(codec.decode(","), ",");
        // Multi-byte characters pass through untouched too.
        assert_eq!(codec.decode("é"), "é");
        assert_eq!(codec.encode("é"), "é");
    }

    #[test]
    fn test_delimiters_survive_round_trip() {
        let codec = Codec::new();
        let line = "1,12/06/2024,08:30:00";
        assert_eq!(codec.decode(&codec.encode(line)), line);
    }

    #[test]
    fn test_round_trip_all_unshadowed_symbols() {
        let codec = Codec::new();
        for &symbol in ALPHABET.iter() {
            // 'Y' and 'b' encode to tokens that are duplicated later in the
            // table, so their decode resolves to 'j' and 'g' respectively.
            if symbol == 'Y' || symbol == 'b' {
                continue;
            }
            let s = symbol.to_string();
            assert_eq!(
                codec.decode(&codec.encode(&s)),
                s,
                "symbol {:?} should survive a round trip",
                symbol
            );
        }
    }

    #[test]
    fn test_duplicate_tokens_resolve_last_wins() {
        let codec = Codec::new();
        // "gH" appears at indices 39 ('b') and 44 ('g'); "jE" at 36 ('Y')
        // and 47 ('j'). The lookup map is built in table order with later
        // entries overwriting.
        assert_eq!(codec.decode("gH"), "g");
        assert_eq!(codec.decode("jE"), "j");
        // Encoding still uses the table index of the symbol itself.
        assert_eq!(codec.encode("b"), "gH");
        assert_eq!(codec.encode("Y"), "jE");
    }

    #[test]
    fn test_decode_is_greedy_at_chunk_boundaries() {
        let codec = Codec::new();
        let encoded = codec.encode("12/06/2024");
        // Splitting an encoded string off a token boundary desynchronizes
        // the match, so chunked decoding is only safe on token multiples.
        let (a, b) = encoded.split_at(3);
        assert_ne!(
            format!("{}{}", codec.decode(a), codec.decode(b)),
            codec.decode(&encoded)
        );
        let (a, b) = encoded.split_at(4);
        assert_eq!(
            format!("{}{}", codec.decode(a), codec.decode(b)),
            codec.decode(&encoded)
        );
    }

    #[test]
    fn test_unmatched_prefix_falls_through() {
        let codec = Codec::new();
        // 'D' alone matches nothing ("Dm" is a token); the scanner must not
        // stall and must resynchronize on the next token.
        assert_eq!(codec.decode("DAn"), "D1");
    }

    #[test]
    fn test_is_plaintext_requires_comma_and_date() {
        assert!(is_plaintext("0,12/06/2024 08:00:00,43.1,-1.2"));
        assert!(is_plaintext("1/2/3,"));
        // Date but no comma
        assert!(!is_plaintext("12/06/2024 08:00:00"));
        // Comma but no date
        assert!(!is_plaintext("a,b,c"));
        assert!(!is_plaintext(""));
    }

    #[test]
    fn test_is_plaintext_false_positive_on_encoded_line_with_date_shape() {
        // The heuristic is textual: any digits/digits/digits plus a comma
        // passes, even if the rest of the line is encoded gibberish.
        assert!(is_plaintext("xxothing,1/1/1"));
    }
}
