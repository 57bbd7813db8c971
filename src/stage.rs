/// Boot stages a FIP can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootImage {
    Bl2,
    Bl30,
    Bl31,
    Bl32,
    Bl33,
}

impl BootImage {
    /// 16-byte identifier naming this stage in a TOC entry. These are the
    /// ARM Trusted Firmware image UUIDs in on-disk GUID byte order, as the
    /// vendor tool writes them.
    pub fn uuid(self) -> [u8; 16] {
        match self {
            BootImage::Bl2 => [
                0x5f, 0xf9, 0xec, 0x0b, 0x4d, 0x22, 0x3e, 0x4d, //
                0xa5, 0x44, 0xc3, 0x9d, 0x81, 0xc7, 0x3f, 0x0a,
            ],
            BootImage::Bl30 => [
                0x97, 0x66, 0xfd, 0x3d, 0x89, 0xbe, 0xe8, 0x49, //
                0xae, 0x5d, 0x78, 0xa1, 0x40, 0x60, 0x82, 0x13,
            ],
            BootImage::Bl31 => [
                0x47, 0xd4, 0x08, 0x6d, 0x4c, 0xfe, 0x98, 0x46, //
                0x9b, 0x95, 0x29, 0x50, 0xcb, 0xbd, 0x5a, 0x00,
            ],
            BootImage::Bl32 => [
                0x05, 0xd0, 0xe1, 0x89, 0x53, 0xdc, 0x13, 0x47, //
                0x8d, 0x2b, 0x50, 0x0a, 0x4b, 0x7a, 0x3e, 0x38,
            ],
            BootImage::Bl33 => [
                0xd6, 0xd0, 0xee, 0xa7, 0xfc, 0xea, 0xd5, 0x4b, //
                0x97, 0x82, 0x99, 0x34, 0xf2, 0x34, 0xb6, 0xe4,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BootImage; 5] = [
        BootImage::Bl2,
        BootImage::Bl30,
        BootImage::Bl31,
        BootImage::Bl32,
        BootImage::Bl33,
    ];

    #[test]
    fn uuids_are_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.uuid(), b.uuid(), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn bl31_uuid_bytes() {
        assert_eq!(BootImage::Bl31.uuid()[..4], [0x47, 0xd4, 0x08, 0x6d]);
        assert_eq!(BootImage::Bl31.uuid()[15], 0x00);
    }
}
