//! Memo encoding.
//!
//! Memos travel hex-encoded inside a double-wrapped JSON structure:
//! `"Memos": [{"Memo": {"MemoData": "<HEX>"}}]`.

use serde::{Deserialize, Serialize};

/// The outer wrapper element of the `Memos` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoWrapper {
    #[serde(rename = "Memo")]
    pub memo: Memo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Memo {
    /// Hex-encoded memo payload.
    pub memo_data: String,
}

/// Hex-encode a memo string into its wire wrapper.
pub fn encode_memo(text: &str) -> MemoWrapper {
    MemoWrapper {
        memo: Memo {
            memo_data: hex::encode_upper(text.as_bytes()),
        },
    }
}

/// Decode a wire memo back to text. Returns `None` for invalid hex or
/// non-UTF-8 payloads.
pub fn decode_memo(wrapper: &MemoWrapper) -> Option<String> {
    let bytes = hex::decode(&wrapper.memo.memo_data).ok()?;
    String::from_utf8(bytes).ok()
}
