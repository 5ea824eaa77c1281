use super::*;

use std::fs;

use imx_codify_core::crc16;

use crate::files::partial_path;

/// Lay out a descriptor and a payload binary in a fresh temp directory.
fn setup(descriptor: &str, payload: &[u8]) -> (tempfile::TempDir, PathBuf, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let descriptor_path = dir.path().join("Application_CRC_file.txt");
    let payload_path = dir.path().join("ea3_wsgw.imx");
    let output_path = dir.path().join("CRC_ea3_wsgw.imx");
    fs::write(&descriptor_path, descriptor).unwrap();
    fs::write(&payload_path, payload).unwrap();
    (dir, descriptor_path, payload_path, output_path)
}

/// 16 bytes of prefix followed by DE AD BE EF.
fn sample_payload() -> Vec<u8> {
    let mut payload = vec![0x11u8; 16];
    payload.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    payload
}

#[test]
fn test_assemble_zero_header_example() {
    let (_dir, descriptor, payload, output) = setup(&"00".repeat(16), &sample_payload());

    let report = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap();

    let image = fs::read(&output).unwrap();
    assert_eq!(image.len(), 20);
    assert_eq!(&image[..16], &[0u8; 16]);
    assert_eq!(&image[16..], &[0xDE, 0xAD, 0xBE, 0xEF]);

    assert_eq!(report.payload_len, 4);
    assert_eq!(report.image_len, 20);
    assert_eq!(report.checksum, 0x4097);
    assert_eq!(report.checksum, crc16(&[0xDE, 0xAD, 0xBE, 0xEF]));
    assert_eq!(report.output_path, output);
}

#[test]
fn test_assemble_header_written_verbatim() {
    let (_dir, descriptor, payload, output) =
        setup("00112233445566778899AABBCCDDEEFF\n", &sample_payload());

    let report = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap();

    let image = fs::read(&output).unwrap();
    assert_eq!(
        &image[..16],
        &[
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD,
            0xEE, 0xFF
        ]
    );
    assert_eq!(report.header[..], image[..16]);
    assert_eq!(report.placement, ChecksumPlacement::Report);
}

#[test]
fn test_output_length_is_header_plus_remaining_payload() {
    for len in [16usize, 17, 100, 4096] {
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let (_dir, descriptor, payload, output) = setup(&"ab".repeat(16), &data);

        let report = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap();
        let image = fs::read(&output).unwrap();
        assert_eq!(image.len(), 16 + (len - 16), "payload of {len} bytes");
        assert_eq!(report.image_len, image.len() as u64);
        assert_eq!(&image[16..], &data[16..]);
    }
}

#[test]
fn test_payload_shorter_than_skip_is_rejected() {
    let (_dir, descriptor, payload, output) = setup(&"00".repeat(16), &[0u8; 15]);

    let err = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap_err();
    match &err {
        CodifyError::PayloadRead { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::UnexpectedEof)
        }
        other => panic!("expected PayloadRead, got {other:?}"),
    }
    assert!(err.to_string().contains("15 bytes"));
    assert!(!output.exists());
}

#[test]
fn test_missing_payload() {
    let (dir, descriptor, _payload, output) = setup(&"00".repeat(16), &[]);
    let missing = dir.path().join("nope.imx");

    let err = assemble(&descriptor, &missing, &output, &AssembleOptions::default()).unwrap_err();
    assert!(matches!(err, CodifyError::PayloadOpen { .. }));
    assert!(!output.exists());
}

#[test]
fn test_short_descriptor_fails_before_output() {
    let (_dir, descriptor, payload, output) = setup("0011", &sample_payload());

    let err = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap_err();
    assert!(matches!(err, CodifyError::HeaderRead { .. }));
    assert!(!output.exists());
}

#[test]
fn test_non_hex_descriptor() {
    let descriptor_text = format!("{}GG{}", "00".repeat(7), "00".repeat(8));
    let (_dir, descriptor, payload, output) = setup(&descriptor_text, &sample_payload());

    let err = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap_err();
    match err {
        CodifyError::Decode { source, .. } => assert_eq!(
            source,
            imx_codify_core::DecodeError::InvalidHexDigit {
                position: 14,
                found: b'G'
            }
        ),
        other => panic!("expected Decode, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_leaves_no_file() {
    let (dir, descriptor, payload, _output) = setup(&"00".repeat(16), &sample_payload());
    let output = dir.path().join("missing-dir").join("image.imx");

    let err = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap_err();
    assert!(matches!(err, CodifyError::OutputWrite { .. }));
    assert_eq!(err.stage(), "output");
    assert!(!output.exists());
    assert!(!partial_path(&output).exists());
}

#[test]
fn test_output_that_is_a_directory_is_not_clobbered() {
    let (dir, descriptor, payload, _output) = setup(&"00".repeat(16), &sample_payload());
    let output = dir.path().join("image.imx");
    fs::create_dir(&output).unwrap();

    let err = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap_err();
    assert!(matches!(err, CodifyError::OutputWrite { .. }));
    assert!(output.is_dir());
    assert!(!partial_path(&output).exists());
}

#[test]
fn test_existing_output_is_replaced() {
    let (_dir, descriptor, payload, output) = setup(&"00".repeat(16), &sample_payload());
    fs::write(&output, vec![0xFFu8; 1000]).unwrap();

    assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap();
    assert_eq!(fs::read(&output).unwrap().len(), 20);
}

#[test]
fn test_embed_checksum_in_header() {
    let (_dir, descriptor, payload, output) = setup(&"00".repeat(16), &sample_payload());
    let options = AssembleOptions::new().placement(ChecksumPlacement::Header);

    let report = assemble(&descriptor, &payload, &output, &options).unwrap();

    let image = fs::read(&output).unwrap();
    assert_eq!(image.len(), 20);
    assert_eq!(&image[4..6], &report.checksum.to_le_bytes());
    assert_eq!(&image[4..6], &[0x97, 0x40]);
    assert_eq!(&image[16..], &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_custom_skip_and_algorithm() {
    let (_dir, descriptor, payload, output) = setup(&"00".repeat(16), &sample_payload());
    let options = AssembleOptions::new()
        .payload_skip(0)
        .algorithm(ChecksumAlgorithm::X25);

    let report = assemble(&descriptor, &payload, &output, &options).unwrap();

    assert_eq!(report.payload_len, 20);
    assert_eq!(report.checksum, ChecksumAlgorithm::X25.compute(&sample_payload()));
    assert_eq!(fs::read(&output).unwrap().len(), 36);
}

#[test]
fn test_assemble_is_deterministic() {
    let (_dir, descriptor, payload, output) = setup(&"5a".repeat(16), &sample_payload());

    let first = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap();
    let first_image = fs::read(&output).unwrap();
    let second = assemble(&descriptor, &payload, &output, &AssembleOptions::default()).unwrap();

    assert_eq!(first.checksum, second.checksum);
    assert_eq!(first_image, fs::read(&output).unwrap());
}
