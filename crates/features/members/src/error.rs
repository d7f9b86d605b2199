use album_event_bus::EventBusError;
use std::borrow::Cow;

/// Error types specific to the members feature.
///
/// Form problems are not errors: they come back as [`crate::Violations`].
#[album_derive::album_error]
pub enum MembersError {
    /// The shared event bus refused the store's channels.
    #[error("Member notification channel error{}: {source}", format_context(.context))]
    Events { source: EventBusError, context: Option<Cow<'static, str>> },

    #[error("Invalid member id{}: {message}", format_context(.context))]
    InvalidId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal members error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
