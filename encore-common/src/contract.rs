use serde::{Deserialize, Serialize};

/// Agreement between an offering and a receiving party. Fee amounts are
/// carried in the contract's `currency_code`; the split percentages
/// always sum to 100.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub offeror_id: i64,
    pub offeree_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub currency_code: String,
    pub performance_fee: f64,
    pub travel_expenses: f64,
    pub accommodation_expenses: f64,
    pub other_expenses: f64,
    pub total_fee: f64,
    pub upon_signing: u8,
    pub upon_completion: u8,
}

impl Contract {
    /// Position of `user_id` relative to the contract's two parties.
    pub const fn role_of(&self, user_id: i64) -> ContractRole {
        if user_id == self.offeror_id {
            ContractRole::Offeror
        } else if user_id == self.offeree_id {
            ContractRole::Offeree
        } else {
            ContractRole::Viewer
        }
    }
}

/// How the requesting user relates to a contract's parties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractRole {
    Offeror,
    Offeree,
    Viewer,
}

impl ContractRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Offeror => "Offeror",
            Self::Offeree => "Offeree",
            Self::Viewer => "Viewer",
        }
    }
}

/// Envelope returned by `GET /user/{id}/contracts`
#[derive(Debug, Serialize, Deserialize)]
pub struct UserContracts {
    pub user_contracts: Vec<Contract>,
}

/// Payload for creating a contract. `total_fee` and `upon_completion` are
/// derived from the other fields before submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateContractRequest {
    pub offeree_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub currency_code: String,
    pub performance_fee: f64,
    pub travel_expenses: f64,
    pub accommodation_expenses: f64,
    pub other_expenses: f64,
    pub total_fee: f64,
    pub upon_signing: u8,
    pub upon_completion: u8,
}

/// Sum of the fee components, each treated as 0 when the form field was
/// left blank.
pub fn total_fee(
    performance_fee: Option<f64>,
    travel_expenses: Option<f64>,
    accommodation_expenses: Option<f64>,
    other_expenses: Option<f64>,
) -> f64 {
    performance_fee.unwrap_or(0.0)
        + travel_expenses.unwrap_or(0.0)
        + accommodation_expenses.unwrap_or(0.0)
        + other_expenses.unwrap_or(0.0)
}

/// Share of the fee due on completion for a given signing share.
pub const fn upon_completion(upon_signing: u8) -> u8 {
    100u8.saturating_sub(upon_signing)
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{total_fee, upon_completion, Contract, ContractRole};

    fn test_contract(offeror_id: i64, offeree_id: i64) -> Contract {
        Contract {
            id: 42,
            offeror_id,
            offeree_id,
            title: "Summer residency".to_owned(),
            description: None,
            currency_code: "EUR".to_owned(),
            performance_fee: 1000.0,
            travel_expenses: 150.0,
            accommodation_expenses: 0.0,
            other_expenses: 0.0,
            total_fee: 1150.0,
            upon_signing: 70,
            upon_completion: 30,
        }
    }

    #[rstest]
    #[case(1, 2, 2, ContractRole::Offeree)]
    #[case(1, 2, 1, ContractRole::Offeror)]
    #[case(1, 2, 9, ContractRole::Viewer)]
    fn role_of_should_match_party_ids(
        #[case] offeror_id: i64,
        #[case] offeree_id: i64,
        #[case] user_id: i64,
        #[case] expected: ContractRole,
    ) {
        assert_eq!(test_contract(offeror_id, offeree_id).role_of(user_id), expected);
    }

    #[rstest]
    #[case(70, 30)]
    #[case(0, 100)]
    #[case(100, 0)]
    fn upon_completion_should_be_remainder_of_signing_share(
        #[case] upon_signing: u8,
        #[case] expected: u8,
    ) {
        assert_eq!(upon_completion(upon_signing), expected);
    }

    #[test]
    fn total_fee_should_default_blank_components_to_zero() {
        assert_eq!(total_fee(None, None, None, None), 0.0);
        assert_eq!(total_fee(Some(1000.0), None, Some(200.0), None), 1200.0);
        assert_eq!(
            total_fee(Some(1000.0), Some(150.0), Some(80.0), Some(20.0)),
            1250.0
        );
    }
}
