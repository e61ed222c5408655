//! Canned "AI" replies.
//!
//! The input is never interpreted; it is only quoted back in the reply.

use rand::Rng;

pub const REPLY_PREFIX: &str = "AI: ";

pub const CANNED_SENTENCES: [&str; 10] = [
    "I understand what you're saying.",
    "That's an interesting point!",
    "Let me think about that...",
    "I'm processing your message.",
    "Thanks for sharing that with me.",
    "I'm here to help!",
    "That's a great question!",
    "I'm analyzing your input.",
    "Let me respond to that...",
    "I'm learning from our conversation.",
];

/// Pick a reply for `input` using the thread-local RNG.
pub fn canned_reply(input: &str) -> String {
    canned_reply_with(&mut rand::rng(), input)
}

/// Pick a reply for `input` using a caller-supplied RNG.
pub fn canned_reply_with<R: Rng + ?Sized>(rng: &mut R, input: &str) -> String {
    let sentence = CANNED_SENTENCES[rng.random_range(0..CANNED_SENTENCES.len())];
    format!("{REPLY_PREFIX}{sentence} (responding to: \"{input}\")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reply_quotes_input_verbatim() {
        let mut rng = StdRng::seed_from_u64(1);
        let reply = canned_reply_with(&mut rng, "what is 2+2");
        assert!(reply.starts_with(REPLY_PREFIX));
        assert!(reply.ends_with("(responding to: \"what is 2+2\")"));
    }

    #[test]
    fn reply_uses_a_known_sentence() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let reply = canned_reply_with(&mut rng, "");
            let body = &reply[REPLY_PREFIX.len()..];
            assert!(CANNED_SENTENCES.iter().any(|s| body.starts_with(s)), "{reply}");
        }
    }

    #[test]
    fn empty_and_odd_inputs_are_fine() {
        assert!(canned_reply("").ends_with("(responding to: \"\")"));
        assert!(canned_reply("\"quoted\" ✓").contains("\"quoted\" ✓"));
    }
}
