//! Input rows for a single (vendor, region) group.

use chrono::NaiveDate;

/// One day's pre-aggregated invoice total for a vendor in a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Invoice date.
    pub date: NaiveDate,
    /// Invoice total for the day. Expected to be non-negative.
    pub amount: f64,
    /// Vendor identifier, constant within a group.
    pub vendor_id: String,
}

impl Observation {
    pub fn new(date: NaiveDate, amount: f64, vendor_id: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            vendor_id: vendor_id.into(),
        }
    }
}

/// Identifying columns attached to every row of a result frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupIdentity {
    pub vendor: String,
    pub region: String,
    pub vendor_id: String,
}

impl GroupIdentity {
    pub fn new(
        vendor: impl Into<String>,
        region: impl Into<String>,
        vendor_id: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            region: region.into(),
            vendor_id: vendor_id.into(),
        }
    }

    /// Build the identity for a group, taking the vendor id from its first row.
    ///
    /// Returns `None` for an empty group. The vendor id is assumed constant
    /// across the group and is not checked.
    pub fn from_group(vendor: &str, region: &str, group: &[Observation]) -> Option<Self> {
        group
            .first()
            .map(|first| Self::new(vendor, region, first.vendor_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn identity_uses_first_row_vendor_id() {
        let group = vec![
            Observation::new(day(2), 4.0, "V-100"),
            Observation::new(day(1), 3.0, "V-999"),
        ];
        let identity = GroupIdentity::from_group("Acme", "EMEA", &group).unwrap();
        assert_eq!(identity.vendor, "Acme");
        assert_eq!(identity.region, "EMEA");
        assert_eq!(identity.vendor_id, "V-100");
    }

    #[test]
    fn identity_of_empty_group_is_none() {
        assert!(GroupIdentity::from_group("Acme", "EMEA", &[]).is_none());
    }
}
