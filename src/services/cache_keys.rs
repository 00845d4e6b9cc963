// Cache key builders
//
// Every strategy looks its entry up through one of these so the key layout
// of the cache document lives in one place.

pub fn agent() -> String {
    "agent_info".to_string()
}

pub fn ship_list() -> String {
    "ship_list".to_string()
}

pub fn contract_list() -> String {
    "contract_list".to_string()
}

/// Full waypoint listing of a system, e.g. `waypoints_X1-AB12`.
pub fn waypoints(system_symbol: &str) -> String {
    format!("waypoints_{}", system_symbol)
}

pub fn market(waypoint_symbol: &str) -> String {
    format!("market_{}", waypoint_symbol)
}

pub fn shipyard(waypoint_symbol: &str) -> String {
    format!("shipyard_{}", waypoint_symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_keys() {
        assert_eq!(agent(), "agent_info");
        assert_eq!(ship_list(), "ship_list");
        assert_eq!(contract_list(), "contract_list");
    }

    #[test]
    fn test_parameterised_keys() {
        assert_eq!(waypoints("X1-AB12"), "waypoints_X1-AB12");
        assert_eq!(market("X1-AB12-C3"), "market_X1-AB12-C3");
        assert_eq!(shipyard("X1-AB12-C3"), "shipyard_X1-AB12-C3");
    }
}
