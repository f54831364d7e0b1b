/// Whether an address should be handed to the ban executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Ban,
}

/// Substring containment test against the resolved region string.
///
/// This is deliberately not a structured field comparison: the allow list is
/// one configured marker (a city or region name) and any region string that
/// contains it exempts the address from banning.
#[derive(Clone, Debug)]
pub struct BanPolicy {
    allow_marker: String,
}

impl BanPolicy {
    pub fn new(allow_marker: impl Into<String>) -> Self {
        Self {
            allow_marker: allow_marker.into(),
        }
    }

    pub fn decide(&self, region: &str) -> Decision {
        if region.contains(&self.allow_marker) {
            Decision::Allow
        } else {
            Decision::Ban
        }
    }
}
