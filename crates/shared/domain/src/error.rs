use std::borrow::Cow;

/// Data-contract violations detected while building domain values.
#[arena_derive::arena_error]
pub enum ModelError {
    /// An identifier is empty or otherwise unusable as a lookup key.
    #[error("Invalid identifier{}: {message}", format_context(.context))]
    InvalidId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A generation discriminator outside `{image, text}`.
    #[error("Invalid generation type{}: {message}", format_context(.context))]
    InvalidKind { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Content that does not fit its discriminator.
    #[error("Invalid generation content{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid rating{}: {message}", format_context(.context))]
    InvalidRating { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A vote whose winner and loser are the same generation.
    #[error("Self vote{}: {message}", format_context(.context))]
    SelfVote { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown module{}: {message}", format_context(.context))]
    UnknownModule { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfig { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
