//! BIP-32 derivation paths.
//!
//! Paths are written `m/44'/818'/0'/0/0`: a mandatory `m` root followed by
//! `/`-separated indices, each optionally marked hardened with `'`, `h` or `H`.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// SLIP-44 coin type registered for VeChain.
pub const VECHAIN_COIN_TYPE: u32 = 818;

/// SLIP-44 coin type registered for Ethereum.
pub const ETHEREUM_COIN_TYPE: u32 = 60;

/// Default path used when none is supplied: first VeChain receiving address.
pub const DEFAULT_PATH: &str = "m/44'/818'/0'/0/0";

/// One path component: an index below 2^31 plus a hardened flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Public derivation, written `n`.
    Normal(u32),
    /// Private derivation, written `n'`; serialized as `n + 2^31`.
    Hardened(u32),
}

impl ChildIndex {
    /// Bit set on the serialized form of hardened indices.
    pub const HARDENED_OFFSET: u32 = 1 << 31;

    /// Non-hardened index; fails when `index` has the hardened bit set.
    pub fn normal(index: u32) -> Result<Self> {
        Self::checked(index, false)
    }

    /// Hardened index; `index` is given without the offset.
    pub fn hardened(index: u32) -> Result<Self> {
        Self::checked(index, true)
    }

    fn checked(index: u32, hardened: bool) -> Result<Self> {
        match (index < Self::HARDENED_OFFSET, hardened) {
            (false, _) => Err(Error::InvalidDerivationPath(format!("index {index} out of range"))),
            (true, false) => Ok(Self::Normal(index)),
            (true, true) => Ok(Self::Hardened(index)),
        }
    }

    /// Whether derivation uses the parent private key.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Index without the hardened offset.
    pub const fn index(&self) -> u32 {
        match *self {
            Self::Normal(i) | Self::Hardened(i) => i,
        }
    }

    /// Big-endian `ser32` input for child key derivation.
    pub const fn to_u32(&self) -> u32 {
        match *self {
            Self::Normal(i) => i,
            Self::Hardened(i) => i | Self::HARDENED_OFFSET,
        }
    }

    /// Same kind of index, `offset` further along.
    pub fn checked_add(self, offset: u32) -> Result<Self> {
        let index = self.index().checked_add(offset).ok_or_else(|| {
            Error::InvalidDerivationPath(format!("index {self} + {offset} out of range"))
        })?;
        Self::checked(index, self.is_hardened())
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_hardened() { "'" } else { "" };
        write!(f, "{}{marker}", self.index())
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDerivationPath(format!("{reason}: {s:?}"));

        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        // u32::from_str would accept a leading '+'.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("non-numeric index"));
        }

        let index: u32 = digits.parse().map_err(|_| invalid("index out of range"))?;
        Self::checked(index, hardened).map_err(|_| invalid("index out of range"))
    }
}

/// A BIP-32 derivation path.
///
/// Represents paths like "m/44'/818'/0'/0/0" as a sequence of child indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    /// The sequence of child indices in the path.
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// Create an empty derivation path (master key).
    pub fn master() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Create a derivation path from a vector of child indices.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// Parse a derivation path from a string.
    ///
    /// Accepts `m` (master) or `m/` followed by one or more indices.
    /// Rejects a missing root, empty components, non-numeric indices and
    /// indices of 2^31 or more.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();

        let rest = match path.split_once('/') {
            Some((root, rest)) if root == "m" || root == "M" => rest,
            None if path == "m" || path == "M" => return Ok(Self::master()),
            _ => {
                return Err(Error::InvalidDerivationPath(format!(
                    "missing \"m\" root: {path:?}"
                )));
            }
        };

        let indices = rest
            .split('/')
            .map(|component| {
                if component.is_empty() {
                    Err(Error::InvalidDerivationPath(format!("empty component in {path:?}")))
                } else {
                    component.parse()
                }
            })
            .collect::<Result<Vec<ChildIndex>>>()?;

        if indices.len() > usize::from(u8::MAX) {
            return Err(Error::MaxDepthExceeded);
        }

        Ok(Self { indices })
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Get the number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Check if this path is empty (master key).
    pub fn is_master(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a child index to the path.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    /// Create BIP-44 path: m/44'/coin_type'/account'/change/address_index
    pub fn bip44(coin_type: u32, account: u32, change: u32, address_index: u32) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(44)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
                ChildIndex::normal(change)?,
                ChildIndex::normal(address_index)?,
            ],
        })
    }

    /// Create BIP-44 VeChain path: m/44'/818'/account'/change/address_index
    pub fn vechain(account: u32, change: u32, address_index: u32) -> Result<Self> {
        Self::bip44(VECHAIN_COIN_TYPE, account, change, address_index)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_index_serialization() {
        let cases = [
            (ChildIndex::normal(0).unwrap(), 0, "0"),
            (ChildIndex::normal(0x7fff_ffff).unwrap(), 0x7fff_ffff, "2147483647"),
            (ChildIndex::hardened(0).unwrap(), 0x8000_0000, "0'"),
            (ChildIndex::hardened(818).unwrap(), 0x8000_0332, "818'"),
        ];
        for (index, raw, text) in cases {
            assert_eq!(index.to_u32(), raw);
            assert_eq!(index.to_string(), text);
            assert_eq!(text.parse::<ChildIndex>().unwrap(), index);
        }
    }

    #[test]
    fn test_child_index_checked_add() {
        assert_eq!(ChildIndex::Normal(5).checked_add(3).unwrap(), ChildIndex::Normal(8));
        assert_eq!(ChildIndex::Hardened(0).checked_add(1).unwrap(), ChildIndex::Hardened(1));
        assert!(ChildIndex::Normal(0x7fff_ffff).checked_add(1).is_err());
        assert!(ChildIndex::Hardened(0x7fff_ffff).checked_add(1).is_err());
        assert!(ChildIndex::Normal(1).checked_add(u32::MAX).is_err());
    }

    #[test]
    fn test_child_index_parse() {
        assert_eq!("44".parse::<ChildIndex>().unwrap(), ChildIndex::Normal(44));
        assert_eq!("44'".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert_eq!("44h".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
        assert_eq!("44H".parse::<ChildIndex>().unwrap(), ChildIndex::Hardened(44));
    }

    #[test]
    fn test_child_index_rejects_garbage() {
        for bad in ["", "'", "x", "4x", "+4", "-1", "4''", " 4", "2147483648", "99999999999"] {
            assert!(
                matches!(bad.parse::<ChildIndex>(), Err(Error::InvalidDerivationPath(_))),
                "accepted {bad:?}"
            );
        }
        assert!(ChildIndex::normal(ChildIndex::HARDENED_OFFSET).is_err());
        assert!(ChildIndex::hardened(ChildIndex::HARDENED_OFFSET).is_err());
    }

    #[test]
    fn test_derivation_path_parse() {
        let path: DerivationPath = "m/44'/818'/0'/0/0".parse().unwrap();
        assert_eq!(path.depth(), 5);
        assert_eq!(
            path.indices(),
            &[
                ChildIndex::Hardened(44),
                ChildIndex::Hardened(818),
                ChildIndex::Hardened(0),
                ChildIndex::Normal(0),
                ChildIndex::Normal(0),
            ]
        );
    }

    #[test]
    fn test_derivation_path_display_round_trip() {
        for text in ["m", "m/0", "m/44'/818'/0'/0/0", "m/2147483647'/1"] {
            let path: DerivationPath = text.parse().unwrap();
            assert_eq!(path.to_string(), text);
        }
        let path: DerivationPath = "M/44h/60H/0'/0/7".parse().unwrap();
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/7");
    }

    #[test]
    fn test_derivation_path_root_only() {
        for text in ["m", "M", " m "] {
            let path = DerivationPath::parse(text).unwrap();
            assert!(path.is_master());
            assert_eq!(path, DerivationPath::master());
        }
        for bad in ["", "m'", "m/", "/", "0"] {
            assert!(DerivationPath::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_derivation_path_rejects_malformed() {
        for bad in [
            "",
            "44'/818'/0'/0/0",
            "/44'/818'",
            "n/44'",
            "m/",
            "m//0",
            "m/44'/818'/",
            "m/44'/abc'/0'",
            "m/44'/2147483648/0",
            "m/44'/-1",
            "mm/0",
        ] {
            assert!(
                matches!(DerivationPath::parse(bad), Err(Error::InvalidDerivationPath(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_derivation_path_too_deep() {
        let deep = format!("m{}", "/0".repeat(256));
        assert!(matches!(DerivationPath::parse(&deep), Err(Error::MaxDepthExceeded)));
        let ok = format!("m{}", "/0".repeat(255));
        assert_eq!(DerivationPath::parse(&ok).unwrap().depth(), 255);
    }

    #[test]
    fn test_derivation_path_extends_by_child() {
        let account: DerivationPath = "m/44'/818'/0'".parse().unwrap();
        let leaf = account.child(ChildIndex::Normal(0)).child(ChildIndex::Normal(0));
        assert_eq!(leaf, DerivationPath::parse(DEFAULT_PATH).unwrap());
        assert_eq!(account.depth(), 3);
    }

    #[test]
    fn test_vechain_path() {
        let path = DerivationPath::vechain(0, 0, 0).unwrap();
        assert_eq!(path.to_string(), DEFAULT_PATH);
        assert_eq!(
            DerivationPath::bip44(ETHEREUM_COIN_TYPE, 0, 0, 3).unwrap().to_string(),
            "m/44'/60'/0'/0/3"
        );
    }
}
