use crate::Error;

/// Encryption step applied to the TOC blob before it lands in the output.
///
/// The boot ROM reads the TOC region through its own decryption path, so
/// the plaintext blob staged by [`crate::TocBuilder`] has to pass through
/// the device-specific cipher before it is written out. Implementations
/// must return exactly [`crate::layout::FIP_SZ`] bytes; the packer splices
/// the result verbatim over the TOC region and rejects any other length.
pub trait CipherBlock {
    fn encrypt(&self, toc: &[u8]) -> Result<Vec<u8>, Error>;
}
