use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use web_sys::FormData;

use encore_common::{
    auth::{
        ChangePasswordRequest, Credentials, ForgotPasswordRequest, ResetPasswordRequest,
        TokenPayload,
    },
    contract::{Contract, CreateContractRequest, UserContracts},
    event::{CreateEventRequest, Event},
    profile::{CreateProfileRequest, Profile, UpdateProfileRequest},
    user::{CreateUserRequest, UpdateUserRequest, User},
    CreatedId, UploadResponse,
};

use crate::error::{Error, Result};

/// API surface available before a bearer token is held.
#[derive(Clone, Copy)]
pub struct UnauthorizedApi {
    url: &'static str,
}

impl UnauthorizedApi {
    pub const fn new(url: &'static str) -> Self {
        Self { url }
    }

    /// Exchange credentials for a bearer token. The exchange is
    /// form-encoded and made exactly once; whether to prompt again is the
    /// caller's decision.
    pub async fn login(&self, credentials: &Credentials) -> Result<(AuthorizedApi, TokenPayload)> {
        let url = format!("{}/token", self.url);
        let body = format!(
            "username={}&password={}",
            urlencoding::encode(&credentials.username),
            urlencoding::encode(&credentials.password),
        );
        let response = Request::post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        let payload: TokenPayload = parse_response(response).await?;
        let Some(token) = payload.access_token.clone() else {
            return Err(Error::MissingField("access_token"));
        };
        Ok((AuthorizedApi::new(self.url, token), payload))
    }

    /// Create an account and return the id of the new user.
    pub async fn register(&self, request: &CreateUserRequest) -> Result<i64> {
        let url = format!("{}/user", self.url);
        let response = Request::post(&url).json(request)?.send().await?;
        let created: CreatedId = parse_response(response).await?;
        created.id.ok_or(Error::MissingField("id"))
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<()> {
        let url = format!("{}/forgot-password", self.url);
        let response = Request::post(&url).json(request)?.send().await?;
        expect_success(response).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        let url = format!("{}/reset-password", self.url);
        let response = Request::post(&url).json(request)?.send().await?;
        expect_success(response).await
    }
}

/// API surface for calls that attach the session's bearer token.
#[derive(Clone)]
pub struct AuthorizedApi {
    url: &'static str,
    token: String,
}

impl AuthorizedApi {
    pub const fn new(url: &'static str, token: String) -> Self {
        Self { url, token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn auth_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn send<T>(&self, req: Request) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = req
            .header("Authorization", &self.auth_header_value())
            .send()
            .await?;
        parse_response(response).await
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send(Request::get(&format!("{}{path}", self.url))).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send(Request::post(&format!("{}{path}", self.url)).json(body)?)
            .await
    }

    async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send(Request::patch(&format!("{}{path}", self.url)).json(body)?)
            .await
    }

    pub async fn current_user(&self) -> Result<User> {
        self.get("/user/me/").await
    }

    pub async fn user(&self, id: i64) -> Result<User> {
        self.get(&format!("/user/{id}")).await
    }

    pub async fn update_user(&self, request: &UpdateUserRequest) -> Result<User> {
        self.patch("/user", request).await
    }

    pub async fn user_contracts(&self, user_id: i64) -> Result<Vec<Contract>> {
        let envelope: UserContracts = self.get(&format!("/user/{user_id}/contracts")).await?;
        Ok(envelope.user_contracts)
    }

    pub async fn profiles(&self) -> Result<Vec<Profile>> {
        self.get("/profile").await
    }

    /// Profiles owned by one account. The backend only exposes the full
    /// listing; ownership is filtered here.
    pub async fn profiles_for_user(&self, user_id: i64) -> Result<Vec<Profile>> {
        let profiles = self.profiles().await?;
        Ok(profiles
            .into_iter()
            .filter(|profile| profile.user_id == user_id)
            .collect())
    }

    pub async fn profile(&self, id: i64) -> Result<Profile> {
        self.get(&format!("/profile/{id}")).await
    }

    pub async fn create_profile(&self, request: &CreateProfileRequest) -> Result<Profile> {
        self.post("/profile", request).await
    }

    pub async fn update_profile(&self, id: i64, request: &UpdateProfileRequest) -> Result<Profile> {
        self.patch(&format!("/profile/{id}"), request).await
    }

    pub async fn contract(&self, id: i64) -> Result<Contract> {
        self.get(&format!("/contract/{id}")).await
    }

    /// Create a contract and return the id of the new record.
    pub async fn create_contract(&self, request: &CreateContractRequest) -> Result<i64> {
        let created: CreatedId = self.post("/contract", request).await?;
        created.id.ok_or(Error::MissingField("id"))
    }

    pub async fn event(&self, id: i64) -> Result<Event> {
        self.get(&format!("/event/{id}")).await
    }

    pub async fn create_event(&self, request: &CreateEventRequest) -> Result<i64> {
        let created: CreatedId = self.post("/event", request).await?;
        created.id.ok_or(Error::MissingField("id"))
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        let response = Request::post(&format!("{}/change_password", self.url))
            .header("Authorization", &self.auth_header_value())
            .json(request)?
            .send()
            .await?;
        expect_success(response).await
    }

    /// Upload files and return the urls the backend stored them under.
    pub async fn upload_files(&self, files: &[web_sys::File]) -> Result<Vec<String>> {
        let form = FormData::new().map_err(|_| Error::Upload)?;
        for file in files {
            form.append_with_blob_and_filename("files", file, &file.name())
                .map_err(|_| Error::Upload)?;
        }
        let response = Request::post(&format!("{}/upload-multiple", self.url))
            .header("Authorization", &self.auth_header_value())
            .body(form)
            .send()
            .await?;
        let uploaded: UploadResponse = parse_response(response).await?;
        Ok(uploaded.urls)
    }

    /// Contract aggregate: the contract record first, then both referenced
    /// parties concurrently. A failed contract fetch skips the party
    /// fetches entirely; a failed party fetch fails the whole aggregate.
    pub async fn contract_detail(&self, id: i64) -> Result<ContractDetail> {
        let contract = self.contract(id).await?;
        let (offeror, offeree) = futures::future::try_join(
            self.user(contract.offeror_id),
            self.user(contract.offeree_id),
        )
        .await?;
        Ok(ContractDetail {
            contract,
            offeror,
            offeree,
        })
    }
}

/// Contract plus both resolved parties; everything role derivation needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractDetail {
    pub contract: Contract,
    pub offeror: User,
    pub offeree: User,
}

/// Failure body shapes the backend has been seen to produce.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<String>,
}

/// Translate a non-success response into the error taxonomy. A 401 gets
/// its own variant so call sites can route back to login; anything else
/// keeps the message the backend provided.
fn error_from_status(status: u16, body: &str) -> Error {
    if status == 401 {
        return Error::Unauthorized;
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message.or(body.detail))
        .unwrap_or_else(|| format!("Request failed with status {status}"));
    Error::Api { status, message }
}

async fn parse_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if response.ok() {
        return response.json::<T>().await.map_err(|error| match error {
            gloo_net::Error::SerdeError(error) => Error::Schema(error.to_string()),
            other => Error::Fetch(other),
        });
    }
    let body = match response.text().await {
        Ok(inner) => inner,
        Err(error) => {
            log::error!("{error}");
            String::new()
        }
    };
    Err(error_from_status(status, &body))
}

/// Like [parse_response] for endpoints whose success body carries nothing
/// the client needs.
async fn expect_success(response: Response) -> Result<()> {
    let status = response.status();
    if response.ok() {
        return Ok(());
    }
    let body = match response.text().await {
        Ok(inner) => inner,
        Err(error) => {
            log::error!("{error}");
            String::new()
        }
    };
    Err(error_from_status(status, &body))
}

#[cfg(test)]
mod test {
    use super::error_from_status;
    use crate::error::Error;

    #[test]
    fn error_from_status_should_map_401_to_unauthorized() {
        assert!(error_from_status(401, "").is_unauthorized());
    }

    #[test]
    fn error_from_status_should_keep_server_message() {
        let error = error_from_status(422, r#"{"message":"Offeree does not exist"}"#);
        assert_eq!(error.to_string(), "Offeree does not exist");
    }

    #[test]
    fn error_from_status_should_fall_back_to_detail_field() {
        let error = error_from_status(400, r#"{"detail":"Malformed payload"}"#);
        assert_eq!(error.to_string(), "Malformed payload");
    }

    #[test]
    fn error_from_status_should_describe_unstructured_bodies() {
        let error = error_from_status(502, "<html>bad gateway</html>");
        assert_eq!(error.to_string(), "Request failed with status 502");
    }
}
