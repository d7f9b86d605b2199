use album_derive::album_error;
use std::borrow::Cow;

#[album_error]
pub enum PhotoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: PhotoError = "unreadable photo".into();
    assert_eq!(err.to_string(), "Internal error: unreadable photo");

    let err = PhotoError::from(String::from("empty buffer"));
    assert!(matches!(err, PhotoError::Internal { .. }));
}
