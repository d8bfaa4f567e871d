use std::fmt::Debug;

use lazy_regex::{regex, Lazy, Regex};

use crate::{
    contract::{total_fee, CreateContractRequest},
    event::CreateEventRequest,
    profile::CreateProfileRequest,
    user::CreateUserRequest,
};

static CURRENCY_CODE_REGEX: &Lazy<Regex, fn() -> Regex> = regex!(r"^[A-Z]{3}$");
static EMAIL_REGEX: &Lazy<Regex, fn() -> Regex> = regex!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$");

const MIN_PASSWORD_LENGTH: usize = 8;

/// Validator for request payloads that must be checked client side before
/// they are submitted to the backend. Failures carry a message ready for
/// inline display and block the network round-trip entirely.
pub trait RequestValidator {
    /// Type of request this validator is processing
    type Request: Debug;
    /// Perform checks against the `request` to confirm it meets specified
    /// requirements
    /// # Errors
    /// This function will return an error if the `request` is not valid
    fn validate(request: &Self::Request) -> Result<(), String>;
}

/// Checks applied to a contract before `POST /contract`
pub struct ContractValidator;

impl RequestValidator for ContractValidator {
    type Request = CreateContractRequest;

    fn validate(request: &Self::Request) -> Result<(), String> {
        if request.title.trim().is_empty() {
            return Err("Contract title cannot be empty".to_owned());
        }
        if !CURRENCY_CODE_REGEX.is_match(&request.currency_code) {
            return Err(format!(
                "Currency code `{}` must be exactly 3 uppercase letters",
                request.currency_code
            ));
        }
        for (label, amount) in [
            ("Performance fee", request.performance_fee),
            ("Travel expenses", request.travel_expenses),
            ("Accommodation expenses", request.accommodation_expenses),
            ("Other expenses", request.other_expenses),
        ] {
            if amount < 0.0 {
                return Err(format!("{label} cannot be negative"));
            }
        }
        if request.upon_signing > 100 || request.upon_completion > 100 {
            return Err("Payment shares must be percentages between 0 and 100".to_owned());
        }
        if u16::from(request.upon_signing) + u16::from(request.upon_completion) != 100 {
            return Err("Payment shares must sum to 100".to_owned());
        }
        let expected = total_fee(
            Some(request.performance_fee),
            Some(request.travel_expenses),
            Some(request.accommodation_expenses),
            Some(request.other_expenses),
        );
        if (request.total_fee - expected).abs() > f64::EPSILON {
            return Err("Total fee must equal the sum of its components".to_owned());
        }
        Ok(())
    }
}

/// Checks applied to a new account before `POST /user`
pub struct NewUserValidator;

impl RequestValidator for NewUserValidator {
    type Request = CreateUserRequest;

    fn validate(request: &Self::Request) -> Result<(), String> {
        if request.username.trim().is_empty() {
            return Err("Username cannot be empty".to_owned());
        }
        if request.username.contains(char::is_whitespace) {
            return Err("Username cannot contain spaces".to_owned());
        }
        email(&request.email)?;
        if request.name.trim().is_empty() || request.surname.trim().is_empty() {
            return Err("Name and surname cannot be empty".to_owned());
        }
        password_strength(&request.password)
    }
}

/// Checks applied to a profile before `POST /profile`
pub struct ProfileValidator;

impl RequestValidator for ProfileValidator {
    type Request = CreateProfileRequest;

    fn validate(request: &Self::Request) -> Result<(), String> {
        if request.title.trim().is_empty() {
            return Err("Profile title cannot be empty".to_owned());
        }
        if request.discipline.trim().is_empty() {
            return Err("Discipline cannot be empty".to_owned());
        }
        Ok(())
    }
}

/// Checks applied to an event before `POST /event`
pub struct EventValidator;

impl RequestValidator for EventValidator {
    type Request = CreateEventRequest;

    fn validate(request: &Self::Request) -> Result<(), String> {
        if request.name.trim().is_empty() {
            return Err("Event name cannot be empty".to_owned());
        }
        if request.venue.trim().is_empty() {
            return Err("Venue cannot be empty".to_owned());
        }
        Ok(())
    }
}

/// Shape check shared by every email-bearing form
/// # Errors
/// This function will return an error if the address is not of the form
/// `local@domain.tld`
pub fn email(address: &str) -> Result<(), String> {
    if !EMAIL_REGEX.is_match(address) {
        return Err(format!("`{address}` is not a valid email address"));
    }
    Ok(())
}

/// Minimum strength rule shared by every password-bearing form
/// # Errors
/// This function will return an error if the password is too short
pub fn password_strength(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Confirmation check run before any password is submitted
/// # Errors
/// This function will return an error if the two entries differ or the
/// password is too weak
pub fn password_pair(password: &str, confirmation: &str) -> Result<(), String> {
    password_strength(password)?;
    if password != confirmation {
        return Err("Passwords do not match".to_owned());
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{password_pair, ContractValidator, RequestValidator};
    use crate::contract::CreateContractRequest;

    fn contract_request(currency_code: &str) -> CreateContractRequest {
        CreateContractRequest {
            offeree_id: 2,
            title: "Festival booking".to_owned(),
            description: None,
            currency_code: currency_code.to_owned(),
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
    #[case("EUR")]
    #[case("USD")]
    #[case("JPY")]
    fn contract_should_pass_when_currency_code_is_three_uppercase_letters(#[case] code: &str) {
        assert!(ContractValidator::validate(&contract_request(code)).is_ok());
    }

    #[rstest]
    #[case("eur")]
    #[case("EU")]
    #[case("EURO")]
    #[case("E1R")]
    #[case("")]
    #[case("eU R")]
    fn contract_should_fail_when_currency_code_is_malformed(#[case] code: &str) {
        assert!(ContractValidator::validate(&contract_request(code)).is_err());
    }

    #[test]
    fn contract_should_fail_when_shares_do_not_sum_to_100() {
        let mut request = contract_request("EUR");
        request.upon_signing = 70;
        request.upon_completion = 40;
        assert!(ContractValidator::validate(&request).is_err());
    }

    #[test]
    fn contract_should_fail_when_total_fee_disagrees_with_components() {
        let mut request = contract_request("EUR");
        request.total_fee = 9999.0;
        assert!(ContractValidator::validate(&request).is_err());
    }

    #[test]
    fn contract_should_fail_when_a_fee_is_negative() {
        let mut request = contract_request("EUR");
        request.travel_expenses = -1.0;
        assert!(ContractValidator::validate(&request).is_err());
    }

    #[rstest]
    #[case("correct horse", "correct horse", true)]
    #[case("correct horse", "wrong horse", false)]
    #[case("short", "short", false)]
    fn password_pair_should_require_matching_strong_entries(
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(password_pair(password, confirmation).is_ok(), expected);
    }
}
