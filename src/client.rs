use reqwest::Method;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::http::{encode_path_segment, RequestHandler};
use crate::types::{Balance, EditBalance, SetBalance};

/// UnbelievaBoat API client.
///
/// One client holds one HTTP connection pool and one rate-limit tracker;
/// clone-free sharing works through `&self` since every operation takes a
/// shared reference.
#[derive(Debug)]
pub struct Client {
    handler: RequestHandler,
}

impl Client {
    /// Create a client from an API token (see <https://unbelievaboat.com/api/docs>)
    /// and explicit options. Fails before any request is possible when the
    /// token is empty or the options are malformed.
    pub fn new(token: impl Into<String>, options: ClientOptions) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Configuration(
                "the API token must be a non-empty string".into(),
            ));
        }
        Ok(Self {
            handler: RequestHandler::new(&token, &options)?,
        })
    }

    /// Create a client against the production API with default options.
    pub fn with_defaults(token: impl Into<String>) -> Result<Self, Error> {
        Self::new(token, ClientOptions::default())
    }

    /// Fetch a user's current balance.
    pub async fn get_user_balance(&self, guild_id: &str, user_id: &str) -> Result<Balance, Error> {
        self.handler
            .request(
                Method::GET,
                &balance_route(guild_id, user_id),
                &serde_json::json!({}),
            )
            .await
    }

    /// Increase or decrease a user's cash or bank balance. Returns the
    /// balance after the adjustment.
    pub async fn edit_user_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        data: &EditBalance,
    ) -> Result<Balance, Error> {
        self.handler
            .request(Method::PATCH, &balance_route(guild_id, user_id), data)
            .await
    }

    /// Set a user's cash or bank balance to an absolute value. Returns the
    /// balance after the assignment.
    pub async fn set_user_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        data: &SetBalance,
    ) -> Result<Balance, Error> {
        self.handler
            .request(Method::PUT, &balance_route(guild_id, user_id), data)
            .await
    }
}

fn balance_route(guild_id: &str, user_id: &str) -> String {
    format!(
        "guilds/{}/users/{}",
        encode_path_segment(guild_id),
        encode_path_segment(user_id)
    )
}
