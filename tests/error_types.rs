use mvdec::core::SectionKind;
use mvdec::decode::indices::DecodeTypeIdxError;
use mvdec::decode::instructions::ParseError;
use mvdec::decode::integer::DecodeU32Error;
use mvdec::decode::sections::code::{DecodeCodeError, DecodeCodeSectionError};
use mvdec::decode::sections::export::{DecodeExportError, InvalidExportDescMarkerByte};
use mvdec::decode::sections::memory::DecodeMemoryError;
use mvdec::decode::sections::{
    DecodeExportSectionError, DecodeFunctionSectionError, DecodeMemorySectionError,
    DecodeTypeSectionError,
};
use mvdec::decode::types::{
    DecodeFuncTypeError, DecodeResultTypeError, DecodeValTypeError, InvalidValTypeMarkerError,
    ParseLimitsError,
};
use mvdec::decode::{
    DecodeModuleError, DecodeSectionHeaderError, DecodeVectorError, ErrorKind,
    InvalidSectionIdError, ParseExpressionError, ParseHeaderError,
};
use mvdec::decode;

const PREAMBLE: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

fn module_bytes(sections: &[Vec<u8>]) -> Vec<u8> {
    let mut out = PREAMBLE.to_vec();
    for s in sections {
        out.extend_from_slice(s);
    }
    out
}

fn section(id: u8, content: &[u8]) -> Vec<u8> {
    assert!(content.len() < 0x80);
    let mut out = vec![id, content.len() as u8];
    out.extend_from_slice(content);
    out
}

#[test]
fn invalid_magic_is_a_distinct_error_kind() {
    let input: &[u8] = &[0xD3, 0xAD, 0xBE, 0xEF, 0x01, 0x00, 0x00, 0x00];

    let err = decode(input).expect_err("wrong magic bytes should fail");

    assert_eq!(err.kind(), ErrorKind::InvalidMagic);
    match err {
        DecodeModuleError::ParseHeader(ParseHeaderError::InvalidMagic(got)) => {
            assert_eq!(got, [0xD3, 0xAD, 0xBE, 0xEF]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn truncated_magic_is_malformed_not_invalid_magic() {
    // the magic comparison requires all four bytes to be present
    let input: &[u8] = &[0x00, 0x61];

    let err = decode(input).expect_err("truncated header should fail");

    assert_eq!(err.kind(), ErrorKind::MalformedBinary);
    match err {
        DecodeModuleError::ParseHeader(ParseHeaderError::Io(io_err)) => {
            assert_eq!(io_err.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unsupported_version_is_a_distinct_error_kind() {
    let input: &[u8] = &[0x00, 0x61, 0x73, 0x6D, 0x02, 0x00, 0x00, 0x00];

    let err = decode(input).expect_err("version 2 should fail");

    assert_eq!(err.kind(), ErrorKind::InvalidVersion);
    assert!(matches!(
        err,
        DecodeModuleError::ParseHeader(ParseHeaderError::InvalidVersion(2))
    ));
}

#[test]
fn out_of_range_section_id_fails() {
    let input = module_bytes(&[section(13, &[])]);

    let err = decode(input.as_slice()).expect_err("section id 13 should fail");

    assert_eq!(err.kind(), ErrorKind::MalformedBinary);
    assert!(matches!(
        err,
        DecodeModuleError::DecodeSectionHeader(DecodeSectionHeaderError::InvalidSectionId(
            InvalidSectionIdError(13)
        ))
    ));
}

#[test]
fn type_section_entry_without_functype_marker_fails() {
    let input = module_bytes(&[section(1, &[0x01, 0x61])]);

    let err = decode(input.as_slice()).expect_err("bad functype marker should fail");

    match err {
        DecodeModuleError::DecodeTypeSection(DecodeTypeSectionError::DecodeVector(
            DecodeVectorError::DecodeElement {
                position: 0,
                source: DecodeFuncTypeError::InvalidMarkerByte(0x61),
            },
        )) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn type_section_with_invalid_valtype_tag_fails() {
    // functype with one parameter whose tag 0x7A is not a value type
    let input = module_bytes(&[section(1, &[0x01, 0x60, 0x01, 0x7A])]);

    let err = decode(input.as_slice()).expect_err("invalid valtype tag should fail");

    match err {
        DecodeModuleError::DecodeTypeSection(DecodeTypeSectionError::DecodeVector(
            DecodeVectorError::DecodeElement {
                position: 0,
                source:
                    DecodeFuncTypeError::DecodeParameterTypes(DecodeResultTypeError::DecodeVector(
                        DecodeVectorError::DecodeElement {
                            position: 0,
                            source:
                                DecodeValTypeError::InvalidMarkerByte(InvalidValTypeMarkerError(
                                    0x7A,
                                )),
                        },
                    )),
            },
        )) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn function_section_rejects_overlong_type_index() {
    // the type index below never terminates within the 5-byte LEB128 bound
    let input = module_bytes(&[section(3, &[0x01, 0x80, 0x80, 0x80, 0x80, 0x80])]);

    let err = decode(input.as_slice()).expect_err("overlong type index should fail");

    match err {
        DecodeModuleError::DecodeFunctionSection(DecodeFunctionSectionError::DecodeVector(
            DecodeVectorError::DecodeElement {
                position: 0,
                source: DecodeTypeIdxError(DecodeU32Error::RepresentationTooLong),
            },
        )) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn export_descriptor_out_of_range_fails() {
    let input = module_bytes(&[section(7, &[0x01, 0x01, b'f', 0x04, 0x00])]);

    let err = decode(input.as_slice()).expect_err("descriptor byte 4 should fail");

    assert_eq!(err.kind(), ErrorKind::MalformedBinary);
    match err {
        DecodeModuleError::DecodeExportSection(DecodeExportSectionError::DecodeVector(
            DecodeVectorError::DecodeElement {
                position: 0,
                source:
                    DecodeExportError::InvalidDescriptorMarkerByte(InvalidExportDescMarkerByte(4)),
            },
        )) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn code_section_count_may_not_exceed_function_count() {
    // no function section, but the code section declares one entry
    let input = module_bytes(&[section(10, &[0x01, 0x02, 0x00, 0x0B])]);

    let err = decode(input.as_slice()).expect_err("unmatched code entry should fail");

    assert_eq!(err.kind(), ErrorKind::MalformedBinary);
    assert!(matches!(
        err,
        DecodeModuleError::DecodeCodeSection(DecodeCodeSectionError::CountExceedsFunctions {
            declared: 1,
            funcs: 0,
        })
    ));
}

#[test]
fn function_without_code_entry_fails() {
    let input = module_bytes(&[
        section(1, &[0x01, 0x60, 0x00, 0x00]),
        section(3, &[0x01, 0x00]),
    ]);

    let err = decode(input.as_slice()).expect_err("function without a body should fail");

    assert!(matches!(
        err,
        DecodeModuleError::MissingFunctionBody { func_idx: 0 }
    ));
}

#[test]
fn repeated_code_section_may_not_reassign_a_body() {
    let code = section(10, &[0x01, 0x02, 0x00, 0x0B]);
    let input = module_bytes(&[
        section(1, &[0x01, 0x60, 0x00, 0x00]),
        section(3, &[0x01, 0x00]),
        code.clone(),
        code,
    ]);

    let err = decode(input.as_slice()).expect_err("second body assignment should fail");

    assert!(matches!(
        err,
        DecodeModuleError::DecodeCodeSection(DecodeCodeSectionError::BodyAlreadyAssigned {
            func_idx: 0
        })
    ));
}

#[test]
fn unknown_opcode_fails_instead_of_being_skipped() {
    let input = module_bytes(&[
        section(1, &[0x01, 0x60, 0x00, 0x00]),
        section(3, &[0x01, 0x00]),
        // body starts with 0x01 (`nop`), which has no dispatch entry
        section(10, &[0x01, 0x03, 0x00, 0x01, 0x0B]),
    ]);

    let err = decode(input.as_slice()).expect_err("unknown opcode should fail");

    match err {
        DecodeModuleError::DecodeCodeSection(DecodeCodeSectionError::DecodeEntry {
            position: 0,
            source:
                DecodeCodeError::DecodeFunctionBody(ParseExpressionError::DecodeInstruction(
                    ParseError::InvalidOpcode(0x01),
                )),
        }) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn memory_limits_flag_out_of_range_fails() {
    let input = module_bytes(&[section(5, &[0x01, 0x02, 0x00])]);

    let err = decode(input.as_slice()).expect_err("limits flag 2 should fail");

    match err {
        DecodeModuleError::DecodeMemorySection(DecodeMemorySectionError::DecodeVector(
            DecodeVectorError::DecodeElement {
                position: 0,
                source:
                    DecodeMemoryError::ParseLimits(ParseLimitsError::UnexpectedFlagByte(0x02)),
            },
        )) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn memory_page_count_over_ceiling_fails_before_allocating() {
    // min = 65537 pages, one past the format's ceiling
    let input = module_bytes(&[section(5, &[0x01, 0x00, 0x81, 0x80, 0x04])]);

    let err = decode(input.as_slice()).expect_err("oversized memory should fail");

    match err {
        DecodeModuleError::DecodeMemorySection(DecodeMemorySectionError::DecodeVector(
            DecodeVectorError::DecodeElement {
                position: 0,
                source: DecodeMemoryError::SizeOutOfRange { got: 65537 },
            },
        )) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn section_content_shorter_than_declared_fails() {
    // the type section declares 5 content bytes but its vector only uses 1
    let input = module_bytes(&[section(1, &[0x00, 0xAA, 0xBB, 0xCC, 0xDD])]);

    let err = decode(input.as_slice()).expect_err("undersized content should fail");

    assert!(matches!(
        err,
        DecodeModuleError::SectionSizeMismatch {
            kind: SectionKind::Type,
            declared: 5,
            got: 1,
        }
    ));
}

#[test]
fn skipped_section_truncated_by_end_of_input_fails() {
    let mut input = module_bytes(&[]);
    // custom section declaring 4 content bytes, only 1 present
    input.extend_from_slice(&[0x00, 0x04, 0xAA]);

    let err = decode(input.as_slice()).expect_err("truncated skip should fail");

    assert_eq!(err.kind(), ErrorKind::MalformedBinary);
    assert!(matches!(
        err,
        DecodeModuleError::SectionSizeMismatch {
            kind: SectionKind::Custom,
            declared: 4,
            got: 1,
        }
    ));
}

#[test]
fn code_entry_size_mismatch_fails() {
    // the entry declares 5 bytes but locals + expr only consume 2
    let input = module_bytes(&[
        section(1, &[0x01, 0x60, 0x00, 0x00]),
        section(3, &[0x01, 0x00]),
        section(10, &[0x01, 0x05, 0x00, 0x0B, 0xAA, 0xBB, 0xCC]),
    ]);

    let err = decode(input.as_slice()).expect_err("code entry size mismatch should fail");

    match err {
        DecodeModuleError::DecodeCodeSection(DecodeCodeSectionError::DecodeEntry {
            position: 0,
            source:
                DecodeCodeError::EntrySizeMismatch {
                    declared_bytes: 5,
                    leftover_bytes: 3,
                    consumed_bytes: 2,
                },
        }) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn truncated_section_size_field_fails() {
    let mut input = module_bytes(&[]);
    // a section id whose size LEB128 never completes
    input.extend_from_slice(&[0x01, 0x80]);

    let err = decode(input.as_slice()).expect_err("truncated section size should fail");

    match err {
        DecodeModuleError::DecodeSectionHeader(DecodeSectionHeaderError::DecodeSectionSize(
            DecodeU32Error::Io(io_err),
        )) => {
            assert_eq!(io_err.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
