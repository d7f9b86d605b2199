use album_derive::album_error;
use std::borrow::Cow;

#[album_error]
pub enum LookupError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("disk gone"))
}

fn lookup() -> Result<(), LookupError> {
    read().context("Reading postal table")?;
    Ok(())
}

fn main() {
    let err = lookup().expect_err("read fails");
    assert_eq!(err.to_string(), "IO error (Reading postal table): disk gone");

    let missing: Result<(), LookupError> =
        Err(LookupError::NotFound { message: "27000-000".into(), context: None });
    let err = missing.context("Postal lookup").expect_err("still an error");
    assert_eq!(err.to_string(), "Not found (Postal lookup): 27000-000");
}
