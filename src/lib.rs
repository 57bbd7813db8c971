mod blkio;
mod cipher;
mod error;
mod fip;
pub mod layout;
mod stage;
mod toc;

pub use cipher::CipherBlock;
pub use error::Error;
pub use fip::{add_image, create};
pub use stage::BootImage;
pub use toc::{Toc, TocBuilder, TocEntry, TocHeader};
