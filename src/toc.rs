//! Table of contents for the FIP region: on-disk records, the staging
//! buffer the assembler fills, and a read-back parser.
//!
//! The staging buffer replaces the scratch file the vendor tool keeps in
//! `/tmp`: same bytes, but in memory and scoped to one build, so there is
//! no temp-file cleanup to get wrong.

use byteorder::{ByteOrder, LittleEndian};
use deku::prelude::*;

use crate::layout::{
    bl31_hdr_slot, roundup, toc_entry_slot, BL31_ENTRY_MAGIC, BL31_ENTRY_OFF, BL31_HDR_SZ,
    BL3X_ALIGN, FIP_SZ, SENTINEL_SZ, TOC_ENTRY_SZ, TOC_MAGIC, TOC_SERIAL, TOC_TABLE_END,
};
use crate::Error;

/// 16-byte header opening the TOC blob.
#[derive(Debug, Clone, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct TocHeader {
    pub name: u32,
    pub serial_number: u32,
    /// Reserved, always zero.
    pub flags: u64,
}

impl Default for TocHeader {
    fn default() -> Self {
        TocHeader {
            name: TOC_MAGIC,
            serial_number: TOC_SERIAL,
            flags: 0,
        }
    }
}

/// 40-byte entry describing one packed image.
#[derive(Debug, Clone, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct TocEntry {
    /// Stage identifier, see [`crate::BootImage::uuid`].
    pub uuid: [u8; 16],
    /// Image offset from the FIP base (the start of the encrypted TOC
    /// region in the final file).
    pub offset: u64,
    /// Exact image length in bytes, no padding included.
    pub size: u64,
    /// Reserved, always zero.
    pub flags: u64,
}

/// Staging buffer for the TOC blob, plus the bookkeeping the packer needs:
/// the next free payload offset and the number of entries recorded so far.
pub struct TocBuilder {
    blob: Vec<u8>,
    cursor: u64,
    nentries: usize,
}

impl TocBuilder {
    /// A fresh blob: header at 0, all-ones terminator at the table cap,
    /// everything else zero. The payload cursor starts one blob-size past
    /// the FIP base, right behind the encrypted TOC region.
    pub fn new() -> TocBuilder {
        let mut blob = vec![0u8; FIP_SZ];

        LittleEndian::write_u32(&mut blob[0..4], TOC_MAGIC);
        LittleEndian::write_u32(&mut blob[4..8], TOC_SERIAL);
        for b in &mut blob[TOC_TABLE_END..TOC_TABLE_END + SENTINEL_SZ] {
            *b = 0xff;
        }

        TocBuilder {
            blob,
            cursor: FIP_SZ as u64,
            nentries: 0,
        }
    }

    /// Offset the next packed image will be assigned.
    pub fn next_offset(&self) -> u64 {
        self.cursor
    }

    /// Number of entries recorded so far.
    pub fn entry_count(&self) -> usize {
        self.nentries
    }

    /// Serialize `entry` into the next table slot.
    pub fn record_entry(&mut self, entry: &TocEntry) -> Result<(), Error> {
        let slot = toc_entry_slot(self.nentries);
        if slot + TOC_ENTRY_SZ > TOC_TABLE_END {
            return Err(Error::TocFull);
        }
        let bytes = entry.to_bytes()?;
        self.blob[slot..slot + TOC_ENTRY_SZ].copy_from_slice(&bytes);
        self.nentries += 1;
        Ok(())
    }

    /// Write the entry-point marker pair and duplicate a BL31 header into
    /// the slot for entry `index`. Overwrites the same bytes when called
    /// again.
    pub fn patch_bl31_header(&mut self, index: usize, hdr: &[u8; BL31_HDR_SZ]) {
        LittleEndian::write_u32(
            &mut self.blob[BL31_ENTRY_OFF..BL31_ENTRY_OFF + 4],
            BL31_ENTRY_MAGIC,
        );
        LittleEndian::write_u32(&mut self.blob[BL31_ENTRY_OFF + 4..BL31_ENTRY_OFF + 8], 1);

        let slot = bl31_hdr_slot(index);
        self.blob[slot..slot + BL31_HDR_SZ].copy_from_slice(hdr);
    }

    /// Advance the payload cursor past an image of `len` bytes, rounded up
    /// to the payload boundary.
    pub fn advance(&mut self, len: u64) {
        self.cursor += roundup(len, BL3X_ALIGN);
    }

    /// The finished blob, ready for the cipher block.
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }
}

/// Parsed view of a TOC blob.
#[derive(Debug)]
pub struct Toc {
    pub header: TocHeader,
    pub entries: Vec<TocEntry>,
}

impl Toc {
    /// Read back header and entries from a plaintext blob. Entries are
    /// collected in slot order; an all-zero or all-ones identifier closes
    /// the table, as does the table capacity.
    pub fn parse(blob: &[u8]) -> Result<Toc, Error> {
        let (_, header) = TocHeader::from_bytes((blob, 0))?;
        if header.name != TOC_MAGIC {
            return Err(Error::BadMagic(header.name));
        }

        let mut entries = Vec::new();
        let mut n = 0;
        loop {
            let slot = toc_entry_slot(n);
            if slot + TOC_ENTRY_SZ > TOC_TABLE_END || slot + TOC_ENTRY_SZ > blob.len() {
                break;
            }
            let (_, entry) = TocEntry::from_bytes((&blob[slot..], 0))?;
            if entry.uuid == [0u8; 16] || entry.uuid == [0xffu8; 16] {
                break;
            }
            entries.push(entry);
            n += 1;
        }

        Ok(Toc { header, entries })
    }
}
