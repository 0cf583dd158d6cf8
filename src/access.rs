use indexmap::IndexMap;

use super::error::{OdError, Result};

/// Substring marking an access point where trips enter the network.
pub const ORIGIN_TAG: &str = "in_";
/// Substring marking an access point where trips leave the network.
pub const DESTINATION_TAG: &str = "out_";

/// Trip totals keyed by access point id, in insertion order.
pub type Totals = IndexMap<String, f64>;


#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum AccessRole {
    Origin,
    Destination,
}

impl AccessRole {
    /// Reads the role from the direction column of a counts table.
    pub fn from_direction(direction: &str) -> Result<AccessRole> {
        match direction.trim() {
            "in" => Ok(AccessRole::Origin),
            "out" => Ok(AccessRole::Destination),
            other => Err(OdError::UnknownDirection(String::from(other))),
        }
    }

    /// Infers the role from the tag embedded in a composite id.  Ids with no tag are `None`.
    pub fn from_id(id: &str) -> Result<Option<AccessRole>> {
        match (id.contains(ORIGIN_TAG), id.contains(DESTINATION_TAG)) {
            (true, true) => Err(OdError::AmbiguousRole(String::from(id))),
            (true, false) => Ok(Some(AccessRole::Origin)),
            (false, true) => Ok(Some(AccessRole::Destination)),
            (false, false) => Ok(None),
        }
    }

    pub fn direction(&self) -> &'static str {
        match self {
            AccessRole::Origin => "in",
            AccessRole::Destination => "out",
        }
    }
}

/// One observed hourly count at a network access point.
#[derive(PartialEq, Debug, Clone)]
pub struct AccessCount {
    pub id: String,
    pub role: AccessRole,
    pub vehicles_per_hour: f64,
}

impl AccessCount {
    pub fn new(access_type: &str, role: AccessRole, avenue: &str, vehicles_per_hour: f64)
               -> Result<AccessCount> {
        let id = format!("{}_{}_{}", access_type, role.direction(), avenue);
        check_count(&id, vehicles_per_hour)?;
        Ok(AccessCount {id, role, vehicles_per_hour})
    }
}

fn check_count(id: &str, count: f64) -> Result<()> {
    if count.is_finite() && count >= 0. {
        Ok(())
    } else {
        Err(OdError::InvalidCount{id: String::from(id), count})
    }
}

/// Splits flat id -> count pairs into generation and attraction totals by the tag in each id.
/// Ids carrying neither tag are dropped; a repeated id keeps its last count.
pub fn classify<I>(counts: I) -> Result<(Totals, Totals)>
    where I: IntoIterator<Item = (String, f64)>
{
    let mut generation = Totals::new();
    let mut attraction = Totals::new();
    for (id, count) in counts {
        check_count(&id, count)?;
        match AccessRole::from_id(&id)? {
            Some(AccessRole::Origin) => {
                generation.insert(id, count);
            }
            Some(AccessRole::Destination) => {
                attraction.insert(id, count);
            }
            None => log::debug!("dropping untagged access id {}", id),
        }
    }
    Ok((generation, attraction))
}

/// Splits counts into generation and attraction totals by their explicit role.
pub fn split_by_role(counts: &[AccessCount]) -> (Totals, Totals) {
    let mut generation = Totals::new();
    let mut attraction = Totals::new();
    for count in counts {
        let totals = match count.role {
            AccessRole::Origin => &mut generation,
            AccessRole::Destination => &mut attraction,
        };
        totals.insert(count.id.clone(), count.vehicles_per_hour);
    }
    (generation, attraction)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(id, cc)| (String::from(*id), *cc)).collect()
    }

    #[test]
    fn test_classify_partition() {
        let raw = counts(&[
            ("car_in_north", 120.),
            ("car_out_south", 90.),
            ("bus_in_east", 15.),
            ("parking_lot", 40.),
            ("car_out_west", 60.),
        ]);
        let (gg, aa) = classify(raw).unwrap();

        let origins: Vec<&str> = gg.keys().map(|kk| kk.as_str()).collect();
        assert_eq!(origins, vec!["car_in_north", "bus_in_east"]);
        let destinations: Vec<&str> = aa.keys().map(|kk| kk.as_str()).collect();
        assert_eq!(destinations, vec!["car_out_south", "car_out_west"]);
        assert_eq!(gg["bus_in_east"], 15.);
        assert_eq!(aa["car_out_west"], 60.);
        // nothing lands in both
        assert!(gg.keys().all(|kk| !aa.contains_key(kk)));
    }

    #[test]
    fn test_classify_last_write_wins() {
        let raw = counts(&[("car_in_north", 120.), ("car_out_south", 5.),
                           ("car_in_north", 80.)]);
        let (gg, _) = classify(raw).unwrap();
        assert_eq!(gg.len(), 1);
        assert_eq!(gg["car_in_north"], 80.);
    }

    #[test]
    fn test_classify_rejects_ambiguous_id() {
        let raw = counts(&[("in_out_nowhere", 10.)]);
        match classify(raw) {
            Err(OdError::AmbiguousRole(id)) => assert_eq!(id, "in_out_nowhere"),
            other => panic!("expected ambiguous role error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_rejects_negative_count() {
        let raw = counts(&[("car_in_north", -1.)]);
        assert!(matches!(classify(raw), Err(OdError::InvalidCount{..})));
    }

    #[test]
    fn test_role_from_direction() {
        assert_eq!(AccessRole::from_direction("in").unwrap(), AccessRole::Origin);
        assert_eq!(AccessRole::from_direction(" out ").unwrap(), AccessRole::Destination);
        assert!(matches!(AccessRole::from_direction("sideways"),
                         Err(OdError::UnknownDirection(_))));
    }

    #[test]
    fn test_split_by_role() {
        // "main" contains the origin tag as a substring; the explicit role decides.
        let counts = vec![
            AccessCount::new("main", AccessRole::Destination, "harbour", 30.).unwrap(),
            AccessCount::new("car", AccessRole::Origin, "north", 45.).unwrap(),
        ];
        assert_eq!(counts[0].id, "main_out_harbour");
        let (gg, aa) = split_by_role(&counts);
        assert_eq!(gg.len(), 1);
        assert_eq!(gg["car_in_north"], 45.);
        assert_eq!(aa["main_out_harbour"], 30.);
    }
}
