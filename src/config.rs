use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Container layout. The layout is not recorded inside the container, so
/// encoder and decoder must agree on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// 1-byte table length, no symbol count. Trailing padding bits that happen
    /// to form codes are decoded as extra symbols.
    Legacy,
    /// 1-byte table length followed by the encoded symbol count.
    #[default]
    Compact,
    /// 2-byte table length followed by the encoded symbol count.
    Wide,
}

impl Layout {
    /// Width in bytes of the table length field.
    pub fn table_len_bytes(self) -> usize {
        match self {
            Layout::Legacy | Layout::Compact => 1,
            Layout::Wide => 2,
        }
    }

    /// Largest serialized table the length field can describe.
    pub fn max_table_len(self) -> usize {
        match self {
            Layout::Legacy | Layout::Compact => u8::MAX as usize,
            Layout::Wide => u16::MAX as usize,
        }
    }

    pub fn has_symbol_count(self) -> bool {
        !matches!(self, Layout::Legacy)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::Legacy => "legacy",
            Layout::Compact => "compact",
            Layout::Wide => "wide",
        })
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "legacy" => Ok(Layout::Legacy),
            "compact" => Ok(Layout::Compact),
            "wide" => Ok(Layout::Wide),
            other => Err(format!("unknown layout {other:?}")),
        }
    }
}

/// Prefix matching strategy used while walking the bitstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    #[default]
    Trie,
    /// Compares the accumulated bits against every table entry after each bit.
    LinearScan,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatcherKind::Trie => "trie",
            MatcherKind::LinearScan => "linearscan",
        })
    }
}

impl FromStr for MatcherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "trie" => Ok(MatcherKind::Trie),
            "linearscan" => Ok(MatcherKind::LinearScan),
            other => Err(format!("unknown matcher {other:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub matcher: MatcherKind,
}

impl CodecConfig {
    pub fn new(layout: Layout, matcher: MatcherKind) -> Self {
        Self { layout, matcher }
    }
}

#[test]
fn test_layout_names_roundtrip() {
    for layout in [Layout::Legacy, Layout::Compact, Layout::Wide] {
        assert_eq!(layout.to_string().parse::<Layout>().unwrap(), layout);
    }
    assert!("zip".parse::<Layout>().is_err());
}

#[test]
fn test_config_json_defaults() {
    let config: CodecConfig = serde_json::from_str(r#"{"layout": "wide"}"#).unwrap();

    assert_eq!(config, CodecConfig::new(Layout::Wide, MatcherKind::Trie));
    assert_eq!(serde_json::to_string(&CodecConfig::default()).unwrap(), r#"{"layout":"compact","matcher":"trie"}"#);
}
