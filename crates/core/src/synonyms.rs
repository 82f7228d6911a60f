use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Labels that graders treat as naming the same vulnerability class.
/// The table is fixed; lookups must not assume a label appears in only
/// one group.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &[
        "Missing Check on Signature Recovery",
        "Signature replay",
        "Authorization Issue",
        "Invalid Signature Handling",
        "Invalid Signature Length",
        "Replay Attack",
        "Signature Malleability",
        "Signature Length Validation",
        "Authorization Bypass",
        "ECDSA Signature Malleability",
        "Unsecured Use of Keccak256",
        "Vulnerability in Signature Management",
        "Invalid Signature Recovery",
        "Incorrect Signature Verification",
    ],
    &[
        "Gas griefing",
        "Gas grief",
        "unchecked call",
        "Gas Limit DoS",
        "Denial of Service",
    ],
    &[
        "Unguarded function",
        "Missed access check",
        "(un?)intentional backdoor",
        "Unprotected function",
        "Unexpected privilege grants",
        "Unsecured Function",
    ],
    &["Invalid code", "Invalid"],
    &["Forced reception", "Forced Ether Reception", "Forced ETH Reception"],
    &[
        "Arithmetic Overflow",
        "Integer overflow",
        "Integer overflow/underflow",
    ],
    &[
        "Bad randomness",
        "Predictable Random Number",
        "Predictable Randomness",
        "Timestamp Dependence",
        "Weak Randomness",
        "Unsecured Randomness",
        "Unsecured Random Number Generation",
    ],
    &["Arithmetic Reentrancy", "Reentrancy", "Vulnerable to Reentrancy"],
];

static EQUIVALENCE_INDEX: OnceLock<HashMap<String, HashSet<String>>> = OnceLock::new();

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Maps every normalized label variant to the set of all variants it is
/// interchangeable with, itself included. Built on first use and never
/// mutated afterwards; concurrent first callers race on construction but
/// only one result is ever published.
fn equivalence_index() -> &'static HashMap<String, HashSet<String>> {
    EQUIVALENCE_INDEX.get_or_init(|| {
        let mut index: HashMap<String, HashSet<String>> = HashMap::new();
        for group in SYNONYM_GROUPS {
            let variants: Vec<String> = group.iter().map(|l| normalize(l)).collect();
            for variant in &variants {
                let entry = index.entry(variant.clone()).or_default();
                for other in &variants {
                    entry.insert(other.clone());
                }
            }
        }
        index
    })
}

/// Whether a free-text answer names the same vulnerability class as the
/// expected canonical label. Comparison is case- and whitespace-insensitive;
/// labels with no configured synonyms still match themselves. Never errors.
pub fn is_equivalent(expected: &str, answer: &str) -> bool {
    let expected = normalize(expected);
    let answer = normalize(answer);
    if expected == answer {
        return true;
    }
    equivalence_index()
        .get(&expected)
        .is_some_and(|group| group.contains(&answer))
}
