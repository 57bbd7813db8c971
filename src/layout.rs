//! Fixed layout of the S905X boot container.
//!
//! None of this comes from a published document. Every value below was
//! recovered from images emitted by the vendor signing tool and checked
//! against what the boot ROM actually loads, so the whole module is golden
//! data: a one-byte drift produces a board that fails to boot with no
//! diagnostic at all.
//!
//! Final image geometry:
//!
//! ```text
//! 0x0                    BL2, pre-encrypted upstream, exactly 0xc000 bytes
//! 0xc000                 encrypted TOC blob, 0x4000 bytes
//! 0xc000 + entry.offset  BL3x payloads, each padded to 0x4000
//! ```
//!
//! TOC blob geometry (plaintext, before the cipher block runs):
//!
//! ```text
//! 0x0     16-byte header (magic, serial, zero flags)
//! 0x10    40-byte entries, appended in packing order
//! 0x400   (0x87654321, 1) word pair, only when a BL31 header is present
//! 0x430   0x50-byte BL31 header copies, one slot per entry index
//! 0xc00   0x80 bytes of 0xff closing the entry table
//! 0x4000  end of blob; first payload starts here, relative to 0xc000
//! ```

/// TOC header magic, constant in every observed image.
pub const TOC_MAGIC: u32 = 0xaa64_0001;
/// Vendor serial number, also constant.
pub const TOC_SERIAL: u32 = 0x1234_5678;

pub const TOC_HEADER_SZ: usize = 0x10;
pub const TOC_ENTRY_SZ: usize = 0x28;

/// Start of the all-ones terminator, which is also the hard cap on the
/// entry table.
pub const TOC_TABLE_END: usize = 0xc00;
/// Terminator length: sixteen 64-bit words of ones.
pub const SENTINEL_SZ: usize = 0x80;

/// Size of the plaintext TOC blob. The encrypted rendering occupies the
/// same amount in the final image.
pub const FIP_SZ: usize = 0x4000;

/// BL2 fills exactly this much at the head of the image.
pub const BL2_SZ: u64 = 0xc000;
/// Payload round-up granularity.
pub const BL3X_ALIGN: u64 = 0x4000;

/// Tag identifying a BL31 image, read from the image content itself.
pub const BL31_MAGIC: u32 = 0x1234_8765;
/// Image offset of the tag and of the header slice around it.
pub const BL31_MAGIC_OFF: u64 = 256;
/// Marker the loader expects at [`BL31_ENTRY_OFF`] once any BL31 header
/// copy exists.
pub const BL31_ENTRY_MAGIC: u32 = 0x8765_4321;
pub const BL31_ENTRY_OFF: usize = 0x400;
/// Length of the BL31 header slice duplicated into the blob.
pub const BL31_HDR_SZ: usize = 0x50;

/// Blob offset of entry slot `n`.
pub const fn toc_entry_slot(n: usize) -> usize {
    TOC_HEADER_SZ + n * TOC_ENTRY_SZ
}

/// Blob offset of the BL31 header copy for entry `n`.
pub const fn bl31_hdr_slot(n: usize) -> usize {
    0x430 + n * BL31_HDR_SZ
}

/// Round `v` up to the next multiple of `align`.
pub const fn roundup(v: u64, align: u64) -> u64 {
    ((v + align - 1) / align) * align
}
