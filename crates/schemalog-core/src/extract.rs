//! Payload extraction
//!
//! A schema-bearing message embeds its payload between two occurrences
//! of a fixed marker token:
//!
//! ```text
//! ... KLEKLE exprType:IrGetValue;hasSuppression:true;someNumber:42 KLEKLE ...
//! ```
//!
//! A message without a proper marker pair is not schema-bearing;
//! extraction returns `None` and the caller skips it.

/// The ordered `(key, value)` pairs sliced out of one message
///
/// Duplicate keys are preserved here; duplicate-key resolution is a
/// parsing concern (last occurrence wins, see [`crate::synth`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    /// Raw pairs in payload order
    pub pairs: Vec<(String, String)>,
}

impl Payload {
    /// Iterate over `(key, value)` pairs
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs, duplicates included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the payload carries no pairs
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Slice the marker-bounded payload out of `message`
///
/// Finds the first two occurrences of `marker`; if either is absent
/// the message is not schema-bearing and `None` is returned. The text
/// strictly between them is split on `;`, each chunk on its first `:`
/// (chunks without a `:` are dropped), and both sides are trimmed.
#[must_use]
pub fn extract(message: &str, marker: &str) -> Option<Payload> {
    let first = message.find(marker)?;
    let after = first + marker.len();
    let second = message[after..].find(marker)?;
    let inner = message[after..after + second].trim();

    let mut pairs = Vec::new();
    for chunk in inner.split(';') {
        let Some(idx) = chunk.find(':') else {
            continue;
        };
        let key = chunk[..idx].trim().to_string();
        let value = chunk[idx + 1..].trim().to_string();
        pairs.push((key, value));
    }
    Some(Payload { pairs })
}
