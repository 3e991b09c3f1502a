use thiserror::Error;

/// Errors raised while assembling a dashboard. Nothing in a running refresh
/// cycle produces a `CoreError`: fetch failures are absorbed per cycle.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] craftwatch_api::Error),

    #[error("avatar URL template must contain {{player}}: {template:?}")]
    AvatarTemplate { template: String },

    #[error("refresh interval must be greater than zero")]
    ZeroInterval,
}
