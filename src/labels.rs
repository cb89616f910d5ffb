//! The three label pipelines: route long names, trip headsigns and stop names
use crate::patterns;

pub fn normalize_route_long_name(raw: &str) -> String {
    let label = patterns::to_nfc(raw);
    let label = patterns::contract_saint(&label);
    let label = patterns::fix_chambly_longueuil(&label);
    patterns::clean_label(&label)
}

/// Headsign rules run in a fixed order, the from/to rewrite has to see the raw separators
pub fn normalize_headsign(raw: &str) -> String {
    let label = patterns::to_nfc(raw);
    let label = patterns::normalize_separators(&label);
    let label = patterns::keep_to(&label);
    let label = patterns::remove_via(&label);
    let label = patterns::remove_fillers(&label);
    let label = patterns::clean_bounds(&label);
    let label = patterns::clean_street_types(&label);
    patterns::clean_label(&label)
}

pub fn normalize_stop_name(raw: &str) -> String {
    let label = patterns::to_nfc(raw);
    let label = patterns::contract_avenue(&label);
    let label = patterns::remove_facing(&label);
    let label = patterns::remove_devant(&label);
    let label = patterns::clean_bounds(&label);
    let label = patterns::clean_street_types(&label);
    patterns::clean_label(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_long_names() {
        assert_eq!(
            "St-Jean - Chambly - Longueuil (Express)",
            normalize_route_long_name("saint-jean - chambly - longueuil (express)")
        );
        assert_eq!(
            "Chambly - Longueuil",
            normalize_route_long_name("CHAMBLY-LONGUEUIL")
        );
        assert_eq!("Richelieu - Chambly", normalize_route_long_name("Richelieu - Chambly"));
        assert_eq!("Taxibus Chambly", normalize_route_long_name("Taxibus  Chambly"));
    }

    #[test]
    fn headsigns() {
        assert_eq!("Chambly - Longueuil", normalize_headsign("direction Chambly - Longueuil"));
        assert_eq!("Chambly", normalize_headsign("Direction Chambly"));
        assert_eq!("Longueuil", normalize_headsign("Direction Longueuil via Chambly"));
        assert_eq!("Longueuil", normalize_headsign("De Chambly à Longueuil"));
        assert_eq!("Stat Incitatif", normalize_headsign("stationnement incitatif"));
        assert_eq!("Route 112", normalize_headsign("Rte 112 express"));
        assert_eq!("Richelieu-Chambly", normalize_headsign("Richelieu-Chambly"));
        assert_eq!("AM", normalize_headsign("AM"));
    }

    #[test]
    fn stop_names() {
        assert_eq!(
            "L'Église Av. Bourgogne",
            normalize_stop_name("face à l'église avenue Bourgogne")
        );
        assert_eq!("Gare St-Jean", normalize_stop_name("Gare devant St-Jean"));
        assert_eq!("Chemin Bellerive Parc", normalize_stop_name("Chemin Bellerive face au parc"));
        assert_eq!("Boul. Périgny / De Salaberry", normalize_stop_name("Boulevard Périgny / De Salaberry"));
        assert_eq!("Chambly Chambly", normalize_stop_name("Chambly face face Chambly"));
    }

    #[test]
    fn pipelines_are_idempotent() {
        let samples = [
            "direction Chambly - Longueuil",
            "Direction de Chambly à Longueuil",
            "De Chambly à Longueuil via Carignan",
            "face à l'église avenue Bourgogne",
            "Face Face à la gare",
            "saint-jean - chambly - longueuil (express)",
            "  ( ) Terminus - ",
            "ch. de la Petite-Caroline",
            "Boul. Périgny / de Salaberry",
            "Chambly face face Chambly",
            "Gare face face au parc",
            "( – – 112",
            "",
        ];
        for raw in samples {
            let headsign = normalize_headsign(raw);
            assert_eq!(headsign, normalize_headsign(&headsign), "headsign {raw:?}");
            let stop = normalize_stop_name(raw);
            assert_eq!(stop, normalize_stop_name(&stop), "stop name {raw:?}");
            let long_name = normalize_route_long_name(raw);
            assert_eq!(long_name, normalize_route_long_name(&long_name), "long name {raw:?}");
        }
    }
}
