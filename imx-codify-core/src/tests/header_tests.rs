use super::*;

#[test]
fn test_decode_descriptor_sequence() {
    let header = decode_descriptor("00112233445566778899AABBCCDDEEFF").unwrap();
    assert_eq!(
        header,
        [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD,
            0xEE, 0xFF
        ]
    );
}

#[test]
fn test_decode_descriptor_lowercase() {
    let upper = decode_descriptor("00112233445566778899AABBCCDDEEFF").unwrap();
    let lower = decode_descriptor("00112233445566778899aabbccddeeff").unwrap();
    assert_eq!(upper, lower);
}

#[test]
fn test_decode_descriptor_ignores_trailing_text() {
    let header = decode_descriptor("0102030405060708090a0b0c0d0e0f10\n# build 42").unwrap();
    assert_eq!(header[0], 0x01);
    assert_eq!(header[15], 0x10);
}

#[test]
fn test_decode_descriptor_all_zero() {
    assert_eq!(decode_descriptor(&"00".repeat(16)).unwrap(), [0u8; 16]);
}

#[test]
fn test_decode_descriptor_too_short() {
    let err = decode_descriptor("0011223344").unwrap_err();
    assert_eq!(
        err,
        DecodeError::TooShort {
            expected: 32,
            actual: 10
        }
    );
    assert!(decode_descriptor("").is_err());
    assert!(decode_descriptor(&"0".repeat(31)).is_err());
}

#[test]
fn test_decode_descriptor_invalid_digit() {
    for pos in [0, 7, 30] {
        let mut text = "00".repeat(16).into_bytes();
        text[pos] = b'G';
        text[pos + 1] = b'G';
        let err = decode_descriptor_bytes(&text).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidHexDigit {
                position: pos,
                found: b'G'
            }
        );
    }
}

#[test]
fn test_decode_descriptor_rejects_whitespace_inside() {
    let err = decode_descriptor("00 11223344556677889900aabbccddeeff").unwrap_err();
    assert!(matches!(err, DecodeError::InvalidHexDigit { position: 2, .. }));
}

#[test]
fn test_decode_error_message() {
    let err = DecodeError::InvalidHexDigit {
        position: 3,
        found: b'\n',
    };
    assert_eq!(err.to_string(), "invalid hex digit '\\n' at position 3");
}

#[test]
fn test_encode_descriptor_is_lowercase() {
    let header = [0xABu8; 16];
    assert_eq!(encode_descriptor(&header), "ab".repeat(16));
    assert_eq!(decode_descriptor(&encode_descriptor(&header)).unwrap(), header);
}

#[test]
fn test_image_header_layout() {
    let header = ImageHeader {
        payload_len: 0x0001_2345,
        checksum: 0xBEEF,
        build_date: Some(BuildDate::new(14, 6, 2019)),
        version: FirmwareVersion::new(1, 0),
    };
    let bytes = header.to_bytes();
    assert_eq!(&bytes[0..4], &[0x45, 0x23, 0x01, 0x00]);
    assert_eq!(&bytes[4..6], &[0xEF, 0xBE]);
    assert_eq!(&bytes[6..8], &[0x00, 0x00]);
    assert_eq!(&bytes[8..12], &[14, 6, 20, 19]);
    assert_eq!(&bytes[12..14], &[1, 0]);
    assert_eq!(&bytes[14..16], &[0x00, 0x00]);
    assert_eq!(ImageHeader::from_bytes(&bytes), header);
}

#[test]
fn test_image_header_without_date() {
    let header = ImageHeader {
        payload_len: 4,
        checksum: 0x4097,
        build_date: None,
        version: FirmwareVersion::new(2, 3),
    };
    let bytes = header.to_bytes();
    assert_eq!(&bytes[8..12], &[0, 0, 0, 0]);
    assert_eq!(ImageHeader::from_bytes(&bytes).build_date, None);
    assert_eq!(header.to_descriptor(), "04000000974000000000000002030000");
}

#[test]
fn test_embed_checksum() {
    let mut bytes = [0u8; 16];
    embed_checksum(&mut bytes, 0x1234);
    assert_eq!(bytes[4], 0x34);
    assert_eq!(bytes[5], 0x12);
    assert_eq!(ImageHeader::from_bytes(&bytes).checksum, 0x1234);
}

#[test]
fn test_firmware_version_parse() {
    assert_eq!("1.0".parse::<FirmwareVersion>(), Ok(FirmwareVersion::new(1, 0)));
    assert_eq!("12.34".parse::<FirmwareVersion>(), Ok(FirmwareVersion::new(12, 34)));
    assert!("1".parse::<FirmwareVersion>().is_err());
    assert!("1.x".parse::<FirmwareVersion>().is_err());
    assert!("256.0".parse::<FirmwareVersion>().is_err());
    assert_eq!(FirmwareVersion::new(3, 7).to_string(), "3.7");
}

#[test]
fn test_build_date_display() {
    assert_eq!(BuildDate::new(1, 2, 2024).to_string(), "2024-02-01");
}

#[test]
fn test_build_date_year_clamped_to_header_range() {
    assert_eq!(BuildDate::new(1, 1, 30000).year, BuildDate::MAX_YEAR);
    assert_eq!(BuildDate::new(1, 1, 2019).year, 2019);

    // A year set directly on the field is clamped when encoded
    let header = ImageHeader {
        payload_len: 0,
        checksum: 0,
        build_date: Some(BuildDate {
            day: 1,
            month: 1,
            year: u16::MAX,
        }),
        version: FirmwareVersion::new(1, 0),
    };
    let bytes = header.to_bytes();
    assert_eq!(&bytes[10..12], &[255, 99]);
    assert_eq!(
        ImageHeader::from_bytes(&bytes).build_date.map(|d| d.year),
        Some(BuildDate::MAX_YEAR)
    );
}
