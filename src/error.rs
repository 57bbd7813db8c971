use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOC entry table is full")]
    TocFull,
    #[error("Bad TOC magic: {0:#x}")]
    BadMagic(u32),
    #[error("Cipher block returned {0:#x} bytes, expected {1:#x}")]
    CipherBlockSize(usize, usize),
    #[error("Parse error")]
    ParseError(#[from] deku::error::DekuError),
}
