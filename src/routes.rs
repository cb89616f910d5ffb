//! Numeric route ids and display colours derived from route short names
use feed_reader::RawRoute;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result, RouteIdFailure};
use crate::patterns::leading_digits;

/// Digits after a class letter must stay below this so that two classes never overlap
pub const ROUTE_CLASS_BAND: i64 = 10_000;

/// Letter-prefixed short names, e.g. `T3`, live in their own band of ids
#[derive(Debug, Clone)]
pub struct RouteIdRules {
    classes: FxHashMap<char, i64>,
}

impl RouteIdRules {
    pub fn new(classes: impl IntoIterator<Item = (char, i64)>) -> Self {
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// Taxibus routes (`T<n>`) start at 20 000
    pub fn citcrc() -> Self {
        Self::new([('T', 20_000)])
    }

    /// Plain numeric short names must stay below every class band
    fn lowest_offset(&self) -> i64 {
        self.classes.values().copied().min().unwrap_or(i64::MAX)
    }

    pub fn resolve(&self, route: &RawRoute) -> Result<i64> {
        let short_name = route.short_name.as_str();
        let fail = |reason| Error::UnexpectedRouteId {
            route: Box::new(route.clone()),
            reason,
        };

        if !short_name.is_empty() && short_name.bytes().all(|b| b.is_ascii_digit()) {
            let id: i64 = short_name
                .parse()
                .map_err(|_| fail(RouteIdFailure::NumberInClassBand))?;
            if id >= self.lowest_offset() {
                return Err(fail(RouteIdFailure::NumberInClassBand));
            }
            return Ok(id);
        }

        let mut chars = short_name.chars();
        let offset = chars
            .next()
            .and_then(|class| self.classes.get(&class))
            .copied()
            .ok_or_else(|| fail(RouteIdFailure::UnknownShortName))?;
        let rest = chars.as_str();
        let digits = match leading_digits(rest) {
            Some(digits) if rest.starts_with(digits) && digits.len() == rest.len() => digits,
            Some(digits) if rest.starts_with(digits) => {
                return Err(fail(RouteIdFailure::TrailingCharacters))
            }
            _ => return Err(fail(RouteIdFailure::UnknownShortName)),
        };
        let digits: i64 = digits
            .parse()
            .map_err(|_| fail(RouteIdFailure::DigitsOutOfBand))?;
        if digits >= ROUTE_CLASS_BAND {
            return Err(fail(RouteIdFailure::DigitsOutOfBand));
        }
        Ok(offset + digits)
    }
}

/// Route colour by short name, with a fallback for taxibus routes
#[derive(Debug, Clone)]
pub struct ColorTable {
    by_short_name: FxHashMap<&'static str, &'static str>,
    fallback_marker: &'static str,
    fallback_color: &'static str,
}

impl ColorTable {
    pub fn citcrc() -> Self {
        let by_short_name = [
            ("10", "FDBF4C"),
            ("11", "E5003D"),
            ("12", "81378E"),
            ("13", "FFDD00"),
            ("14", "009486"),
            ("15", "014A99"),
            ("16", "20A74B"),
            ("20", "D50080"),
            ("300", "00B5E2"),
            ("301", "00B5E2"),
            ("302", "00B5E2"),
            ("303", "00B5E2"),
            ("400", "BFD885"),
            ("401", "BFD885"),
            ("450", "EF7B0A"),
            ("500", "666666"),
            ("600", "ACAA00"),
        ]
        .into_iter()
        .collect();

        Self {
            by_short_name,
            fallback_marker: "Taxibus",
            fallback_color: "74797D",
        }
    }

    pub fn resolve(&self, route: &RawRoute) -> Result<String> {
        if let Some(color) = route.color.as_deref().filter(|c| !c.trim().is_empty()) {
            return Ok(color.to_owned());
        }
        if let Some(color) = self.by_short_name.get(route.short_name.as_str()) {
            return Ok((*color).to_owned());
        }
        if route.long_name.contains(self.fallback_marker) {
            debug!("{} gets the {} colour", route, self.fallback_marker);
            return Ok(self.fallback_color.to_owned());
        }
        Err(Error::UnexpectedRouteColor {
            route: Box::new(route.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(short_name: &str, long_name: &str, color: Option<&str>) -> RawRoute {
        RawRoute {
            id: format!("CITCRC_{short_name}"),
            short_name: short_name.to_owned(),
            long_name: long_name.to_owned(),
            color: color.map(str::to_owned),
            ..Default::default()
        }
    }

    #[test]
    fn numeric_short_names() {
        let rules = RouteIdRules::citcrc();
        assert_eq!(14, rules.resolve(&route("14", "", None)).unwrap());
        assert_eq!(450, rules.resolve(&route("450", "", None)).unwrap());
        assert!(matches!(
            rules.resolve(&route("20003", "", None)),
            Err(Error::UnexpectedRouteId { .. })
        ));
    }

    #[test]
    fn class_prefixed_short_names() {
        let rules = RouteIdRules::citcrc();
        assert_eq!(20_003, rules.resolve(&route("T3", "", None)).unwrap());
        assert_eq!(20_005, rules.resolve(&route("T5", "", None)).unwrap());
        assert_eq!(29_999, rules.resolve(&route("T9999", "", None)).unwrap());
    }

    #[test]
    fn unexpected_short_names_abort() {
        let rules = RouteIdRules::citcrc();
        for short_name in ["X3", "T", "T3A", "3T", "", "T10000", "T-3"] {
            let result = rules.resolve(&route(short_name, "", None));
            assert!(
                matches!(result, Err(Error::UnexpectedRouteId { .. })),
                "{short_name} should be rejected"
            );
        }
    }

    #[test]
    fn rejections_explain_the_band_limits() {
        let rules = RouteIdRules::citcrc();
        let reason = |short_name: &str| match rules.resolve(&route(short_name, "", None)) {
            Err(Error::UnexpectedRouteId { reason, .. }) => Some(reason),
            _ => None,
        };
        assert_eq!(Some(RouteIdFailure::NumberInClassBand), reason("20003"));
        assert_eq!(Some(RouteIdFailure::TrailingCharacters), reason("T3A"));
        assert_eq!(Some(RouteIdFailure::DigitsOutOfBand), reason("T10000"));
        assert_eq!(Some(RouteIdFailure::UnknownShortName), reason("X3"));

        let message = rules.resolve(&route("T3A", "", None)).unwrap_err().to_string();
        assert!(message.contains("a suffix has no band"), "{message}");
    }

    #[test]
    fn distinct_short_names_give_distinct_ids() {
        let rules = RouteIdRules::citcrc();
        let mut ids = rustc_hash::FxHashSet::default();
        for n in [1, 3, 14, 300, 9999] {
            assert!(ids.insert(rules.resolve(&route(&n.to_string(), "", None)).unwrap()));
            assert!(ids.insert(rules.resolve(&route(&format!("T{n}"), "", None)).unwrap()));
        }
    }

    #[test]
    fn colours() {
        let colors = ColorTable::citcrc();
        assert_eq!("009486", colors.resolve(&route("14", "", None)).unwrap());
        assert_eq!("00B5E2", colors.resolve(&route("302", "", None)).unwrap());
        assert_eq!(
            "123ABC",
            colors.resolve(&route("14", "", Some("123ABC"))).unwrap()
        );
        assert_eq!("009486", colors.resolve(&route("14", "", Some(""))).unwrap());
        assert_eq!(
            "74797D",
            colors.resolve(&route("T3", "Taxibus Chambly", None)).unwrap()
        );
    }

    #[test]
    fn unknown_colour_aborts() {
        let colors = ColorTable::citcrc();
        let result = colors.resolve(&route("99", "Chambly", None));
        match result {
            Err(Error::UnexpectedRouteColor { route }) => assert_eq!("99", route.short_name),
            other => panic!("unexpected {other:?}"),
        }
    }
}
