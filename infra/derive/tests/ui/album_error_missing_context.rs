use album_derive::album_error;

#[album_error]
pub enum PhotoError {
    #[error("IO error: {source}")]
    Io { source: std::io::Error },
}

fn main() {}
