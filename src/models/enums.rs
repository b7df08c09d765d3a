//! Closed enumerations and their endpoints.
//!
//! Priorities and resolutions are small closed sets whose members are
//! stable across the service. Payload elements are looked up by their
//! integer `id`; the server-supplied `name` is deliberately ignored in
//! favor of the canonical local label.

use std::fmt;

use serde_json::Value;

use crate::client::BacklogClient;
use crate::error::{BacklogError, Result};
use crate::mapping;

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    /// Every member, in code order.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Normal, Priority::Low];

    /// Look up the member with the given integer code.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::UnknownEnumValue`] for any code outside
    /// {2, 3, 4}; unknown codes are never defaulted.
    pub fn value_of(code: i64) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.to_value() == code)
            .ok_or(BacklogError::UnknownEnumValue {
                entity: "Priority",
                value: code,
            })
    }

    /// The integer code of this member.
    pub fn to_value(self) -> i64 {
        match self {
            Priority::High => 2,
            Priority::Normal => 3,
            Priority::Low => 4,
        }
    }

    /// The canonical display label.
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Issue resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Fixed,
    WontFix,
    Invalid,
    Duplication,
    CannotReproduce,
}

impl Resolution {
    /// Every member, in code order.
    pub const ALL: [Resolution; 5] = [
        Resolution::Fixed,
        Resolution::WontFix,
        Resolution::Invalid,
        Resolution::Duplication,
        Resolution::CannotReproduce,
    ];

    /// Look up the member with the given integer code.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::UnknownEnumValue`] for any code outside
    /// {0, 1, 2, 3, 4}.
    pub fn value_of(code: i64) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.to_value() == code)
            .ok_or(BacklogError::UnknownEnumValue {
                entity: "Resolution",
                value: code,
            })
    }

    /// The integer code of this member.
    pub fn to_value(self) -> i64 {
        match self {
            Resolution::Fixed => 0,
            Resolution::WontFix => 1,
            Resolution::Invalid => 2,
            Resolution::Duplication => 3,
            Resolution::CannotReproduce => 4,
        }
    }

    /// The canonical display label.
    pub fn label(self) -> &'static str {
        match self {
            Resolution::Fixed => "Fixed",
            Resolution::WontFix => "Won't Fix",
            Resolution::Invalid => "Invalid",
            Resolution::Duplication => "Duplication",
            Resolution::CannotReproduce => "Cannot Reproduce",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map an array of `{"id": .., "name": ..}` elements to enum members by
/// their `id` code, in server order. The `name` field is ignored.
fn codes_from_json(entity: &'static str, value: &Value) -> Result<Vec<i64>> {
    let items = value.as_array().ok_or(BacklogError::UnexpectedType {
        entity,
        field: "(root)",
        expected: "an array",
    })?;
    items
        .iter()
        .map(|item| {
            let obj = mapping::as_object(entity, item)?;
            mapping::req_i64(entity, obj, "id")
        })
        .collect()
}

/// Fetch the priority table.
///
/// `GET /priorities`
pub async fn get_priorities(client: &BacklogClient) -> Result<Vec<Priority>> {
    let value = client.fetch("priorities", &[]).await?;
    codes_from_json("Priority", &value)?
        .into_iter()
        .map(Priority::value_of)
        .collect()
}

/// Fetch the resolution table.
///
/// `GET /resolutions`
pub async fn get_resolutions(client: &BacklogClient) -> Result<Vec<Resolution>> {
    let value = client.fetch("resolutions", &[]).await?;
    codes_from_json("Resolution", &value)?
        .into_iter()
        .map(Resolution::value_of)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn priority_lookup_is_total_over_its_codes() {
        assert_eq!(Priority::value_of(2).unwrap(), Priority::High);
        assert_eq!(Priority::value_of(3).unwrap(), Priority::Normal);
        assert_eq!(Priority::value_of(4).unwrap(), Priority::Low);

        for code in [-1, 0, 1, 5, 100] {
            let err = Priority::value_of(code).unwrap_err();
            assert!(matches!(
                err,
                BacklogError::UnknownEnumValue {
                    entity: "Priority",
                    value
                } if value == code
            ));
        }
    }

    #[test]
    fn resolution_lookup_is_total_over_its_codes() {
        assert_eq!(Resolution::value_of(0).unwrap(), Resolution::Fixed);
        assert_eq!(Resolution::value_of(1).unwrap(), Resolution::WontFix);
        assert_eq!(Resolution::value_of(2).unwrap(), Resolution::Invalid);
        assert_eq!(Resolution::value_of(3).unwrap(), Resolution::Duplication);
        assert_eq!(Resolution::value_of(4).unwrap(), Resolution::CannotReproduce);

        for code in [-1, 5, 42] {
            assert!(Resolution::value_of(code).is_err());
        }
    }

    #[test]
    fn codes_round_trip() {
        for p in Priority::ALL {
            assert_eq!(Priority::value_of(p.to_value()).unwrap(), p);
        }
        for r in Resolution::ALL {
            assert_eq!(Resolution::value_of(r.to_value()).unwrap(), r);
        }
    }

    #[test]
    fn labels_are_canonical() {
        assert_eq!(Priority::High.to_string(), "High");
        assert_eq!(Resolution::WontFix.to_string(), "Won't Fix");
        assert_eq!(Resolution::CannotReproduce.to_string(), "Cannot Reproduce");
    }

    #[test]
    fn server_label_is_ignored_during_mapping() {
        // The payload claims a different name; only the id counts.
        let value = json!([{"id": 2, "name": "Sehr hoch"}]);
        let codes = codes_from_json("Priority", &value).unwrap();
        assert_eq!(codes, [2]);
        assert_eq!(Priority::value_of(codes[0]).unwrap().label(), "High");
    }
}
