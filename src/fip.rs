//! FIP assembly: packs BL3x payloads behind a signed BL2 and splices in
//! the encrypted table of contents.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace, warn};

use crate::blkio::{copy_at, read_fill};
use crate::cipher::CipherBlock;
use crate::layout::{BL2_SZ, BL31_HDR_SZ, BL31_MAGIC, BL31_MAGIC_OFF, FIP_SZ};
use crate::stage::BootImage;
use crate::toc::{TocBuilder, TocEntry};
use crate::Error;

/// Append one image to the FIP: record its TOC entry, copy its payload
/// into `out` at the next aligned offset, and advance the cursor.
///
/// Images carrying the BL31 tag word at offset 256 additionally get their
/// header duplicated into the TOC blob so the boot ROM can locate the
/// entry point before decompressing the payload. The tag probe is by
/// content, not by `ty`: a tagged image is patched whatever identifier it
/// is filed under.
pub fn add_image<R, W>(
    toc: &mut TocBuilder,
    image: &mut R,
    out: &mut W,
    ty: BootImage,
) -> Result<(), Error>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let size = image.seek(SeekFrom::End(0))?;
    let entry = TocEntry {
        uuid: ty.uuid(),
        offset: toc.next_offset(),
        size,
        flags: 0,
    };
    let index = toc.entry_count();
    toc.record_entry(&entry)?;

    // BL31 probe. Images shorter than the tag word simply read as
    // untagged, and a tagged image shorter than a full header is copied
    // zero padded.
    let mut hdr = [0u8; BL31_HDR_SZ];
    image.seek(SeekFrom::Start(BL31_MAGIC_OFF))?;
    let got = read_fill(image, &mut hdr)?;
    if got >= 4 && LittleEndian::read_u32(&hdr[..4]) == BL31_MAGIC {
        trace!("{:?} image carries the BL31 tag, patching entry {}", ty, index);
        toc.patch_bl31_header(index, &hdr);
    }

    image.seek(SeekFrom::Start(0))?;
    let copied = copy_at(image, out, BL2_SZ + entry.offset)?;
    trace!(
        "packed {:?} at {:#x}, {:#x} bytes",
        ty,
        BL2_SZ + entry.offset,
        copied
    );

    toc.advance(size);
    Ok(())
}

/// Assemble a bootable FIP image from its four parts.
///
/// `bl2` is copied verbatim to the head of `fout`, the BL3x images are
/// packed behind the TOC region in order, and the TOC blob is run through
/// `cblk` and written over the region the boot ROM decrypts. The output
/// length covers the last image rounded up to the payload alignment.
pub fn create(
    bl2: impl AsRef<Path>,
    bl30: impl AsRef<Path>,
    bl31: impl AsRef<Path>,
    bl33: impl AsRef<Path>,
    fout: impl AsRef<Path>,
    cblk: &dyn CipherBlock,
) -> Result<(), Error> {
    debug!("Creating FIP image {}", fout.as_ref().display());
    let mut toc = TocBuilder::new();
    let mut out = File::create(fout.as_ref())?;

    let mut bl2f = File::open(bl2.as_ref())?;
    let copied = copy_at(&mut bl2f, &mut out, 0)?;
    if copied != BL2_SZ {
        warn!(
            "BL2 image is {:#x} bytes, expected {:#x}; the result may not boot",
            copied, BL2_SZ
        );
    }

    for &(path, ty) in &[
        (bl30.as_ref(), BootImage::Bl30),
        (bl31.as_ref(), BootImage::Bl31),
        (bl33.as_ref(), BootImage::Bl33),
    ] {
        let mut img = File::open(path)?;
        add_image(&mut toc, &mut img, &mut out, ty)?;
    }

    let enc = cblk.encrypt(toc.as_bytes())?;
    if enc.len() != FIP_SZ {
        return Err(Error::CipherBlockSize(enc.len(), FIP_SZ));
    }
    out.seek(SeekFrom::Start(BL2_SZ))?;
    out.write_all(&enc)?;

    // pad the tail out to the cursor so the last payload slot is whole
    out.set_len(BL2_SZ + toc.next_offset())?;
    debug!("FIP image done, {:#x} bytes", BL2_SZ + toc.next_offset());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BL31_ENTRY_OFF, TOC_MAGIC};
    use crate::toc::Toc;
    use std::io::Cursor;

    fn pack_one(body: Vec<u8>, ty: BootImage) -> (TocBuilder, Vec<u8>) {
        let mut toc = TocBuilder::new();
        let mut image = Cursor::new(body);
        let mut out = Cursor::new(Vec::new());
        add_image(&mut toc, &mut image, &mut out, ty).unwrap();
        (toc, out.into_inner())
    }

    fn tagged_body(len: usize, fill: u8) -> Vec<u8> {
        let mut body = vec![fill; len];
        LittleEndian::write_u32(&mut body[256..260], BL31_MAGIC);
        body
    }

    #[test]
    fn packs_untagged_image() {
        let (toc, out) = pack_one(vec![7u8; 100], BootImage::Bl30);

        assert_eq!(toc.entry_count(), 1);
        assert_eq!(toc.next_offset(), 0x8000);
        let parsed = Toc::parse(toc.as_bytes()).unwrap();
        assert_eq!(parsed.header.name, TOC_MAGIC);
        assert_eq!(parsed.entries[0].uuid, BootImage::Bl30.uuid());
        assert_eq!(parsed.entries[0].offset, 0x4000);
        assert_eq!(parsed.entries[0].size, 100);

        // payload lands past BL2 plus the TOC region
        assert_eq!(out.len(), 0x10000 + 100);
        assert!(out[0x10000..].iter().all(|&b| b == 7));
        // no marker pair without the tag
        assert_eq!(&toc.as_bytes()[BL31_ENTRY_OFF..BL31_ENTRY_OFF + 8], &[0u8; 8]);
    }

    #[test]
    fn patches_tagged_image() {
        let mut toc = TocBuilder::new();
        let mut filler = Cursor::new(vec![1u8; 0x20]);
        let mut out = Cursor::new(Vec::new());
        add_image(&mut toc, &mut filler, &mut out, BootImage::Bl30).unwrap();

        let body = tagged_body(0x200, 0xee);
        let mut image = Cursor::new(body.clone());
        add_image(&mut toc, &mut image, &mut out, BootImage::Bl31).unwrap();

        let blob = toc.as_bytes();
        assert_eq!(
            &blob[BL31_ENTRY_OFF..BL31_ENTRY_OFF + 8],
            &[0x21, 0x43, 0x65, 0x87, 0x01, 0x00, 0x00, 0x00]
        );
        // second entry, so the header copy lands in slot 1
        assert_eq!(&blob[0x480..0x4d0], &body[256..256 + BL31_HDR_SZ]);
        assert!(blob[0x430..0x480].iter().all(|&b| b == 0));

        // probe must not disturb the payload copy
        let out = out.into_inner();
        assert_eq!(&out[0x14000..0x14000 + 0x200], &body[..]);
    }

    #[test]
    fn short_image_reads_as_untagged() {
        let (toc, out) = pack_one(vec![0xabu8; 10], BootImage::Bl33);

        assert_eq!(toc.entry_count(), 1);
        assert_eq!(toc.next_offset(), 0x8000);
        assert_eq!(&toc.as_bytes()[BL31_ENTRY_OFF..BL31_ENTRY_OFF + 8], &[0u8; 8]);
        assert_eq!(out.len(), 0x10000 + 10);
    }

    #[test]
    fn short_tagged_image_is_zero_padded() {
        // 300 bytes leaves 44 header bytes past the tag offset
        let (toc, _) = pack_one(tagged_body(300, 0x11), BootImage::Bl31);

        let blob = toc.as_bytes();
        assert_eq!(&blob[0x430..0x434], &[0x65, 0x87, 0x34, 0x12]);
        assert!(blob[0x434..0x430 + 44].iter().all(|&b| b == 0x11));
        assert!(blob[0x430 + 44..0x480].iter().all(|&b| b == 0));
    }
}
