//! End-to-end checks of the generate / verify / describe contract.

use std::collections::HashSet;
use std::thread;

use chrono::Utc;
use fident_openid::{
    describe, generate, get_time_from_id, is_valid, validate, verify, Indicator, OpenId,
    OpenIdError, ID_LENGTH,
};

fn matches_layout(id: &str) -> bool {
    let widths: Vec<usize> = id.split('-').map(str::len).collect();
    widths == [9, 8, 5, 7]
        && id
            .bytes()
            .all(|b| b == b'-' || b == b'=' || b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[test]
fn test_generate_signed_entity() {
    let id = generate("E", "FOR", "TE", "ST", "", "secr3t").unwrap();
    assert_eq!(id.as_str().len(), ID_LENGTH);
    assert!(matches_layout(id.as_str()), "unexpected layout: {id}");
    assert_eq!(verify(id.as_str(), "secr3t"), Ok(()));
    assert!(verify(id.as_str(), "").is_ok());
}

#[test]
fn test_wrong_secret_rejected() {
    let signed = "IPIH7MI2=-EABCCDEF-MISCR-V669VF3";
    assert!(is_valid(signed, "secr3t"));
    assert!(!is_valid(signed, "wrong"));
    assert!(verify(signed, "wrong").unwrap_err().is_checksum_mismatch());
}

#[test]
fn test_known_id_validates_without_secret() {
    let id = "IPIH7MI2=-EABCCDEF-MISCR-V669VFQ";
    assert_eq!(verify(id, ""), Ok(()));
    assert_eq!(validate(id), Ok(()));
}

#[test]
fn test_describe_recent_id() {
    let before = Utc::now();
    let id = generate("T", "FOR", "TE", "ST", "LON01", "").unwrap();
    let after = Utc::now();

    let description = describe(id.as_str()).unwrap();
    assert_eq!(description.indicator(), Some(Indicator::TimeSeries));
    assert_eq!(description.vendor(), "FOR");
    assert_eq!(description.id_type(), "TE");
    assert_eq!(description.subtype(), "ST");
    assert_eq!(description.location(), "LON01");
    assert_eq!(description.random(), id.random());

    // Millisecond truncation can put the decoded time just before `before`.
    let time = get_time_from_id(id.as_str()).unwrap();
    assert!(time >= before - chrono::Duration::milliseconds(1));
    assert!(time <= after);
}

#[test]
fn test_normalization_defaults() {
    let id = generate("?", "FOR", "TE", "", "", "").unwrap();
    assert_eq!(id.indicator(), Some(Indicator::Entity));
    assert_eq!(id.subtype(), "TE");
    assert_eq!(id.location(), "MISCR");
}

#[test]
fn test_field_errors() {
    let err = generate("E", "", "TE", "ST", "", "").unwrap_err();
    assert!(matches!(err, OpenIdError::InvalidField { field: "vendor", .. }));

    let err = generate("E", "FOR", "T", "ST", "", "").unwrap_err();
    assert!(matches!(err, OpenIdError::InvalidField { field: "type", .. }));
}

#[test]
fn test_malformed_ids_rejected() {
    let cases = [
        ("", "length"),
        ("55QRHT4E-EFOTKPS-USC1B-39H6POWT", "length"),
        ("IPIH7MI2=-EABCCDEF-MISCR-V669VFQX", "length"),
        ("ipih7mi2=-eabccdef-miscr-v669vfq", "format"),
        ("EABCCDEF-IPIH7MI2=-MISCR-V669VFQ", "format"),
        ("IPIH7MI2=-EABCCDEF-MISCR-V669VF-", "structure"),
        ("IPIH7MI2==EABCCDEF-MISCR-V669VFQ", "structure"),
    ];

    for (id, kind) in cases {
        let err = verify(id, "").unwrap_err();
        assert!(err.is_structural(), "{id}: {err}");
        let matched = match kind {
            "length" => matches!(err, OpenIdError::InvalidLength { .. }),
            "format" => matches!(err, OpenIdError::InvalidFormat { .. }),
            _ => matches!(err, OpenIdError::InvalidStructure { .. }),
        };
        assert!(matched, "{id}: expected {kind} error, got {err:?}");
    }
}

#[test]
fn test_concurrent_generation_is_unique() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (0..250)
                    .map(|_| generate("E", "FOR", "TE", "ST", "", "").unwrap())
                    .collect::<Vec<OpenId>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id.clone()), "duplicate ID {id}");
        }
    }
    assert_eq!(seen.len(), 2000);
}
