use std::io::{self, Read, Seek, SeekFrom, Write};

const BLK_SZ: usize = 512;

/// Read into `buf` until it is full or the source runs out. Short reads
/// are retried with the remaining length; only a genuine read error
/// aborts. Returns the number of bytes actually filled.
pub fn read_fill(src: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Copy `src` from its current position to end-of-input into `dst`,
/// starting at byte offset `off` of `dst`. Returns the number of bytes
/// copied.
pub fn copy_at(src: &mut impl Read, dst: &mut (impl Write + Seek), off: u64) -> io::Result<u64> {
    let mut blk = [0u8; BLK_SZ];
    let mut total = 0u64;

    dst.seek(SeekFrom::Start(off))?;
    loop {
        let n = read_fill(src, &mut blk)?;
        if n == 0 {
            break;
        }
        dst.write_all(&blk[..n])?;
        total += n as u64;
    }
    Ok(total)
}
