use std::{collections::HashMap, fs::File, io::{BufReader, BufWriter}, path::Path, str::FromStr};

use crate::{codec::encoder::EncodeStats, CodecConfig, HuffError, Layout, MatcherKind, Result};

/// Metadata stored in the `<name>.properties` sidecar of a compressed file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Properties {
    pub layout: Layout,
    pub matcher: MatcherKind,
    pub original_length: usize,
    pub compressed_length: usize,
    pub distinct_symbols: usize,
    pub table_bytes: usize,
    pub body_bits: u64,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            matcher: MatcherKind::default(),
            original_length: 0,
            compressed_length: 0,
            distinct_symbols: 0,
            table_bytes: 0,
            body_bits: 0,
        }
    }
}

fn parse_value<T: FromStr>(map: &HashMap<String, String>, key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match map.get(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HuffError::InvalidProperty { key: key.into(), reason: format!("{value:?}: {e}") }),
    }
}

fn required<T: FromStr>(map: &HashMap<String, String>, key: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    parse_value(map, key)?.ok_or_else(|| HuffError::InvalidProperty { key: key.into(), reason: "missing".into() })
}

impl TryFrom<HashMap<String, String>> for Properties {
    type Error = HuffError;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        Ok(Properties {
            layout: required(&value, "layout")?,
            original_length: required(&value, "originallength")?,
            matcher: parse_value(&value, "matcher")?.unwrap_or_default(),
            compressed_length: parse_value(&value, "compressedlength")?.unwrap_or_default(),
            distinct_symbols: parse_value(&value, "distinctsymbols")?.unwrap_or_default(),
            table_bytes: parse_value(&value, "tablebytes")?.unwrap_or_default(),
            body_bits: parse_value(&value, "bodybits")?.unwrap_or_default(),
        })
    }
}

impl From<&Properties> for HashMap<String, String> {
    fn from(props: &Properties) -> Self {
        HashMap::from([
            ("layout".to_string(), props.layout.to_string()),
            ("matcher".to_string(), props.matcher.to_string()),
            ("originallength".to_string(), props.original_length.to_string()),
            ("compressedlength".to_string(), props.compressed_length.to_string()),
            ("distinctsymbols".to_string(), props.distinct_symbols.to_string()),
            ("tablebytes".to_string(), props.table_bytes.to_string()),
            ("bodybits".to_string(), props.body_bits.to_string()),
        ])
    }
}

impl Properties {
    pub fn from_stats(stats: &EncodeStats, matcher: MatcherKind) -> Self {
        Self {
            layout: stats.layout,
            matcher,
            original_length: stats.original_length,
            compressed_length: stats.container_bytes,
            distinct_symbols: stats.distinct_symbols,
            table_bytes: stats.table_bytes,
            body_bits: stats.body_bits,
        }
    }

    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig::new(self.layout, self.matcher)
    }

    /// Checks a decoded message against the recorded length. Legacy bodies
    /// over-decode their padding, so a longer legacy message is cut back.
    pub fn fit_decoded(&self, layout: Layout, mut message: Vec<u8>) -> Result<Vec<u8>> {
        if layout == Layout::Legacy && message.len() > self.original_length {
            message.truncate(self.original_length);
        }
        if message.len() != self.original_length {
            return Err(HuffError::MalformedContainer(format!(
                "decoded {} bytes but the sidecar records {}",
                message.len(),
                self.original_length
            )));
        }
        Ok(message)
    }

    /// Sidecar path for a compressed file: `<basename>.properties`.
    pub fn path_for(basename: &str) -> String {
        format!("{basename}.properties")
    }

    pub fn load(basename: &str) -> Result<Self> {
        let file = File::open(Self::path_for(basename))?;
        let map = java_properties::read(BufReader::new(file))?;
        Self::try_from(map)
    }

    /// Like [`Properties::load`], but a missing sidecar is not an error.
    pub fn load_if_present(basename: &str) -> Result<Option<Self>> {
        if !Path::new(&Self::path_for(basename)).exists() {
            return Ok(None);
        }
        Self::load(basename).map(Some)
    }

    pub fn store(&self, basename: &str) -> Result<()> {
        let file = File::create(Self::path_for(basename))?;
        java_properties::write(BufWriter::new(file), &HashMap::from(self))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_minimal_properties() {
        let props = Properties::try_from(map(&[("layout", "wide"), ("originallength", "42")])).unwrap();

        assert_eq!(props.layout, Layout::Wide);
        assert_eq!(props.original_length, 42);
        assert_eq!(props.matcher, MatcherKind::Trie);
        assert_eq!(props.body_bits, 0);
    }

    #[test]
    fn test_missing_required_key() {
        let result = Properties::try_from(map(&[("layout", "compact")]));

        assert!(matches!(result, Err(HuffError::InvalidProperty { key, .. }) if key == "originallength"));
    }

    #[test]
    fn test_invalid_value() {
        let result = Properties::try_from(map(&[("layout", "compact"), ("originallength", "many")]));

        assert!(matches!(result, Err(HuffError::InvalidProperty { key, .. }) if key == "originallength"));
    }

    #[test]
    fn test_unknown_layout_reason() {
        let err = Properties::try_from(map(&[("layout", "zip"), ("originallength", "1")])).unwrap_err();

        assert!(matches!(&err, HuffError::InvalidProperty { key, .. } if key == "layout"));
        assert_eq!(err.to_string(), "Invalid property layout: \"zip\": unknown layout \"zip\"");
    }

    #[test]
    fn test_fit_decoded_truncates_legacy_padding() {
        let props = Properties { layout: Layout::Legacy, original_length: 5, ..Default::default() };

        let message = props.fit_decoded(Layout::Legacy, b"aaaabbbb".to_vec()).unwrap();
        assert_eq!(message, b"aaaab");

        let short = props.fit_decoded(Layout::Legacy, b"aaaa".to_vec());
        assert!(matches!(short, Err(HuffError::MalformedContainer(_))));
    }

    #[test]
    fn test_fit_decoded_requires_exact_length() {
        let props = Properties { original_length: 5, ..Default::default() };

        assert_eq!(props.fit_decoded(Layout::Compact, b"aaaab".to_vec()).unwrap(), b"aaaab");
        let long = props.fit_decoded(Layout::Compact, b"aaaabbbb".to_vec());
        assert!(matches!(long, Err(HuffError::MalformedContainer(_))));
    }

    #[test]
    fn test_legacy_file_roundtrip_through_sidecar() {
        let codec = crate::HuffmanCodec::new(CodecConfig::new(Layout::Legacy, MatcherKind::Trie));
        let (container, stats) = codec.encode_with_stats(b"aaaab").unwrap();
        let props = Properties::from_stats(&stats, MatcherKind::Trie);

        let decoded = codec.decode(&container).unwrap();
        assert_eq!(decoded, b"aaaabbbb");
        assert_eq!(props.fit_decoded(props.layout, decoded).unwrap(), b"aaaab");
    }

    #[test]
    fn test_map_roundtrip() {
        let props = Properties {
            layout: Layout::Legacy,
            matcher: MatcherKind::LinearScan,
            original_length: 1000,
            compressed_length: 612,
            distinct_symbols: 17,
            table_bytes: 98,
            body_bits: 4030,
        };

        let back = Properties::try_from(HashMap::from(&props)).unwrap();

        assert_eq!(back, props);
    }

    #[test]
    fn test_store_and_load() {
        let basename = std::env::temp_dir()
            .join(format!("huffman_rust_props_{}", std::process::id()))
            .to_string_lossy()
            .into_owned();
        let props = Properties { original_length: 5, body_bits: 5, ..Default::default() };

        props.store(&basename).unwrap();
        let loaded = Properties::load_if_present(&basename).unwrap();
        std::fs::remove_file(Properties::path_for(&basename)).unwrap();

        assert_eq!(loaded, Some(props));
        assert_eq!(Properties::load_if_present(&basename).unwrap(), None);
    }
}
