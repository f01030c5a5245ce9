use voltronic_p18::p18::validator::{payload, validate_query, validate_set_ack, Acknowledgement};
use voltronic_p18::Error;

#[test]
fn query_payload_range() -> anyhow::Result<()> {
    let buf = b"^D008ABCDEFG";
    let range = validate_query(buf, 12)?;
    assert_eq!(range, 5..10);
    assert_eq!(payload(buf, range), "ABCDE");
    Ok(())
}

#[test]
fn query_size_counts_stripped_bytes() -> anyhow::Result<()> {
    // CRC and CR already removed by the link, but counted in `size`
    let buf = b"^D00518";
    let range = validate_query(buf, 10)?;
    assert_eq!(payload(buf, range), "18");
    Ok(())
}

#[test]
fn query_rejects_short_reads() {
    assert!(matches!(
        validate_query(b"^D008ABCDEFG", 11),
        Err(Error::MalformedResponse(_))
    ));
}

#[test]
fn query_rejects_bad_headers() {
    for buf in [&b"^P008ABCDEFG"[..], b"(D008ABCDEFG", b"^D0x8ABCDEFG", b"^D0", b""] {
        assert!(
            matches!(validate_query(buf, 64), Err(Error::MalformedResponse(_))),
            "{:?}",
            buf
        );
    }
}

#[test]
fn query_rejects_length_below_its_own_field() {
    assert!(matches!(
        validate_query(b"^D002", 16),
        Err(Error::MalformedResponse(_))
    ));
}

#[test]
fn payload_is_clamped_to_the_buffer() {
    assert_eq!(payload(b"^D020AB", 5..20), "AB");
}

#[test]
fn set_acknowledgements() -> anyhow::Result<()> {
    assert_eq!(validate_set_ack(b"^1", 5)?, Acknowledgement::Success);
    assert_eq!(validate_set_ack(b"^0", 5)?, Acknowledgement::Failure);
    assert!(Acknowledgement::Success.into_result().is_ok());
    assert!(matches!(
        Acknowledgement::Failure.into_result(),
        Err(Error::SetCommandFailure)
    ));
    Ok(())
}

#[test]
fn set_acknowledgement_framing() {
    assert!(validate_set_ack(b"^", 1).is_err());
    assert!(validate_set_ack(b"(1", 5).is_err());
    assert!(validate_set_ack(b"", 0).is_err());
}
