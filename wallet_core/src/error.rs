use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    /// Every collected input problem, joined for display.
    #[error("{}", .messages.join("\n"))]
    Validation { messages: Vec<String> },

    #[error("could not fetch account data: {0}")]
    Query(String),

    #[error("transaction building error: {0}")]
    Build(#[from] trellis_transactions::TxError),

    #[error("removal blocked:\n{}", .blocks.join("\n"))]
    RemovalBlocked { blocks: Vec<String> },

    #[error("signing error: {0}")]
    Signing(String),

    #[error("insufficient balance: need {needed} drops, have {available}")]
    Unaffordable { needed: u64, available: u64 },

    #[error("node RPC error: {0}")]
    Node(String),

    #[error("preference store error: {0}")]
    Store(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
