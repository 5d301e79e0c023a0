use crate::ManifestError;
use crate::types::Manifest;

/// Opening marker line of a framed manifest.
pub const MANIFEST_BEGIN: &str = "-----BEGIN HOOKSTASH MANIFEST-----";
/// Closing marker line of a framed manifest.
pub const MANIFEST_END: &str = "-----END HOOKSTASH MANIFEST-----";

/// Encodes a manifest as a marker-framed JSON block.
///
/// The result is a small self-delimiting text object suitable for storage
/// through the same transport as the pieces it indexes.
pub fn encode(manifest: &Manifest) -> Result<String, ManifestError> {
    let json = serde_json::to_string(manifest)?;
    Ok(format!("{MANIFEST_BEGIN}\n{json}\n{MANIFEST_END}"))
}

/// Decodes a marker-framed manifest.
///
/// The markers may appear anywhere in `text` (transports are free to wrap
/// stored objects in their own decoration); everything between the first
/// BEGIN marker and the following END marker is parsed as JSON.
pub fn decode(text: &str) -> Result<Manifest, ManifestError> {
    let begin = text.find(MANIFEST_BEGIN).ok_or(ManifestError::Framing)?;
    let inner_start = begin + MANIFEST_BEGIN.len();
    let end = text[inner_start..]
        .find(MANIFEST_END)
        .ok_or(ManifestError::Framing)?;

    let inner = text[inner_start..inner_start + end].trim();
    Ok(serde_json::from_str(inner)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_wraps_with_markers() {
        let manifest = Manifest::new("save.bin", vec!["100".into()]);
        let text = encode(&manifest).unwrap();
        assert!(text.starts_with(MANIFEST_BEGIN));
        assert!(text.ends_with(MANIFEST_END));
        assert!(text.contains("\"fileName\":\"save.bin\""));
    }

    #[test]
    fn roundtrip_preserves_name_and_ids() {
        let manifest = Manifest::new(
            "weird name émoji 🎮.tar.gz",
            vec![
                "123456789".into(),
                "with_underscores_and spaces".into(),
                "\"quoted\"".into(),
                String::new(),
            ],
        );
        let decoded = decode(&encode(&manifest).unwrap()).unwrap();
        assert_eq!(decoded, manifest);
    }

    #[test]
    fn roundtrip_empty_ids() {
        let manifest = Manifest::new("empty.bin", Vec::new());
        let decoded = decode(&encode(&manifest).unwrap()).unwrap();
        assert_eq!(decoded, manifest);
        assert!(decoded.ids.is_empty());
    }

    #[test]
    fn roundtrip_many_ids_keeps_order() {
        let ids: Vec<String> = (0..500).map(|i| format!("id-{i}")).collect();
        let manifest = Manifest::new("large.bin", ids.clone());
        let decoded = decode(&encode(&manifest).unwrap()).unwrap();
        assert_eq!(decoded.ids, ids);
    }

    #[test]
    fn decode_tolerates_surrounding_text() {
        let manifest = Manifest::new("doc.pdf", vec!["1".into(), "2".into()]);
        let wrapped = format!(
            "stored by hookstash:\n{}\n-- end of message",
            encode(&manifest).unwrap()
        );
        let decoded = decode(&wrapped).unwrap();
        assert_eq!(decoded, manifest);
    }

    #[test]
    fn decode_rejects_missing_begin_marker() {
        let text = format!("{{\"fileName\":\"x\",\"ids\":[]}}\n{MANIFEST_END}");
        assert!(matches!(decode(&text), Err(ManifestError::Framing)));
    }

    #[test]
    fn decode_rejects_missing_end_marker() {
        let text = format!("{MANIFEST_BEGIN}\n{{\"fileName\":\"x\",\"ids\":[]}}");
        assert!(matches!(decode(&text), Err(ManifestError::Framing)));
    }

    #[test]
    fn decode_rejects_end_before_begin() {
        let text = format!("{MANIFEST_END}\n{MANIFEST_BEGIN}");
        assert!(matches!(decode(&text), Err(ManifestError::Framing)));
    }

    #[test]
    fn decode_rejects_garbage_between_markers() {
        let text = format!("{MANIFEST_BEGIN}\nnot json at all\n{MANIFEST_END}");
        assert!(matches!(decode(&text), Err(ManifestError::Json(_))));
    }

    #[test]
    fn decode_rejects_plain_text() {
        assert!(matches!(decode("hello there"), Err(ManifestError::Framing)));
        assert!(matches!(decode(""), Err(ManifestError::Framing)));
    }

    #[test]
    fn decode_rejects_wrong_json_shape() {
        let text = format!("{MANIFEST_BEGIN}\n[1,2,3]\n{MANIFEST_END}");
        assert!(matches!(decode(&text), Err(ManifestError::Json(_))));
    }
}
