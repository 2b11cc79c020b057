//! Station visibility bitmask and per-brand station counting.
//!
//! The third-party station feed tags every station with an integer `Filter`
//! whose bits say which brand apps show the station. Which bit belongs to
//! which brand is configuration ([`BrandBitMap`]), e.g. `0:ovolt,1:sharz-net`.
//! Observed feed values include 65 (bit 0), 66 (bit 1) and 67 (both); the
//! higher bits carry vendor flags that are ignored here.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::CoreError;
use crate::slug::validate_slug;

/// Highest bit position a mapping may reference.
pub const MAX_FILTER_BIT: u8 = 62;

/// Default mapping used when none is configured.
pub const DEFAULT_BRAND_BITS: &str = "0:ovolt,1:sharz-net";

/// Whether `bit` is set in a station's filter value.
pub fn is_visible(filter: i64, bit: u8) -> bool {
    bit <= MAX_FILTER_BIT && (filter >> bit) & 1 == 1
}

/// One filter bit and the slug of the brand it makes a station visible for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandBit {
    pub bit: u8,
    pub brand_slug: String,
}

/// Ordered list of bit -> brand assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandBitMap(Vec<BrandBit>);

impl BrandBitMap {
    pub fn entries(&self) -> &[BrandBit] {
        &self.0
    }

    /// Brand slugs in mapping order.
    pub fn brand_slugs(&self) -> Vec<&str> {
        self.0.iter().map(|b| b.brand_slug.as_str()).collect()
    }

    /// Count stations per mapped brand.
    ///
    /// A station counts once toward every brand whose bit is set, so it may
    /// count toward several brands or none. Every mapped brand appears in the
    /// result, with zero when no station carries its bit.
    pub fn tally<I>(&self, filters: I) -> BTreeMap<String, i64>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut counts: BTreeMap<String, i64> = self
            .0
            .iter()
            .map(|b| (b.brand_slug.clone(), 0))
            .collect();

        for filter in filters {
            for entry in &self.0 {
                if is_visible(filter, entry.bit) {
                    if let Some(count) = counts.get_mut(&entry.brand_slug) {
                        *count += 1;
                    }
                }
            }
        }
        counts
    }
}

impl FromStr for BrandBitMap {
    type Err = CoreError;

    /// Parse `"<bit>:<brand-slug>,..."`. Bits and slugs must each be unique.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries: Vec<BrandBit> = Vec::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (bit, slug) = part.split_once(':').ok_or_else(|| {
                CoreError::Validation(format!("Expected '<bit>:<brand-slug>', got '{part}'"))
            })?;

            let bit: u8 = bit
                .trim()
                .parse()
                .ok()
                .filter(|b| *b <= MAX_FILTER_BIT)
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Invalid filter bit '{bit}' (expected 0..={MAX_FILTER_BIT})"
                    ))
                })?;
            let slug = slug.trim();
            validate_slug(slug)?;

            if entries.iter().any(|e| e.bit == bit) {
                return Err(CoreError::Validation(format!(
                    "Filter bit {bit} is mapped more than once"
                )));
            }
            if entries.iter().any(|e| e.brand_slug == slug) {
                return Err(CoreError::Validation(format!(
                    "Brand '{slug}' is mapped more than once"
                )));
            }

            entries.push(BrandBit {
                bit,
                brand_slug: slug.to_string(),
            });
        }

        if entries.is_empty() {
            return Err(CoreError::Validation(
                "Station brand mapping must not be empty".into(),
            ));
        }
        Ok(Self(entries))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn default_map() -> BrandBitMap {
        DEFAULT_BRAND_BITS.parse().unwrap()
    }

    #[test]
    fn known_feed_values_decode_to_expected_brands() {
        assert!(is_visible(65, 0) && !is_visible(65, 1));
        assert!(!is_visible(66, 0) && is_visible(66, 1));
        assert!(is_visible(67, 0) && is_visible(67, 1));
        assert!(!is_visible(64, 0) && !is_visible(64, 1));
    }

    #[test]
    fn out_of_range_bit_is_never_visible() {
        assert!(!is_visible(-1, 63));
    }

    #[test]
    fn station_counts_toward_both_neither_or_either() {
        let counts = default_map().tally([67, 65, 66, 64, 0, 3]);
        assert_eq!(counts["ovolt"], 3);
        assert_eq!(counts["sharz-net"], 3);
    }

    #[test]
    fn every_mapped_brand_appears_even_with_no_stations() {
        let counts = default_map().tally(std::iter::empty());
        assert_eq!(counts.len(), 2);
        assert!(counts.values().all(|c| *c == 0));
    }

    #[test]
    fn tally_is_deterministic_for_the_same_input() {
        let filters = vec![65, 66, 67, 67, 1];
        let map = default_map();
        assert_eq!(map.tally(filters.clone()), map.tally(filters));
    }

    #[test]
    fn parse_preserves_order_and_trims() {
        let map: BrandBitMap = " 1:sharz-net , 0:ovolt ".parse().unwrap();
        assert_eq!(map.brand_slugs(), vec!["sharz-net", "ovolt"]);
        assert_eq!(map.entries()[1].bit, 0);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_matches!("".parse::<BrandBitMap>(), Err(CoreError::Validation(_)));
        assert_matches!("ovolt".parse::<BrandBitMap>(), Err(CoreError::Validation(_)));
        assert_matches!("99:ovolt".parse::<BrandBitMap>(), Err(CoreError::Validation(_)));
        assert_matches!("0:ovolt,0:other".parse::<BrandBitMap>(), Err(CoreError::Validation(_)));
        assert_matches!("0:ovolt,1:ovolt".parse::<BrandBitMap>(), Err(CoreError::Validation(_)));
        assert_matches!("0:Ovolt".parse::<BrandBitMap>(), Err(CoreError::Validation(_)));
    }
}
